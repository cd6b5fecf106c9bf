use crate::interpreter::error::{Result, SyntaxError};
use crate::interpreter::operator::BinaryOperator;
use crate::interpreter::syntax::expression_tree::Node;
use crate::interpreter::token::{Token, TokenKind, END_OF_INPUT};

/// Parses infix tokens directly into an expression tree.
///
/// ```text
/// Expression := AddSub EndOfInput
/// AddSub     := MulDiv (('+' | '-') MulDiv)*
/// MulDiv     := Unary (('*' | '/') Unary)*
/// Unary      := ('+' | '-')* Leaf
/// Leaf       := Number | Variable | '(' AddSub ')'
/// ```
///
/// # Arguments
///
/// * `infix_tokens`: The tokens to parse, in infix order. Must not be empty.
///
/// returns: The root of the expression tree.
///
/// # Examples
///
/// ```
/// # use anyhow::Result;
/// # fn main() -> Result<()> {
/// use infix_calculator::{parse, tokenize, Node};
///
/// let tree = parse(&tokenize("x - 2")?)?;
/// assert_eq!(
///     tree,
///     Node::new_binary_subtraction(Node::new_variable("x".into()), Node::new_number(2.0))
/// );
/// # Ok(()) }
/// ```
pub fn parse(infix_tokens: &[Token]) -> Result<Node> {
    let mut parser = TreeParser {
        tokens: TokenCursor::new(infix_tokens),
    };
    parser.parse_expression()
}

struct TreeParser<'a> {
    tokens: TokenCursor<'a>,
}

impl TreeParser<'_> {
    fn parse_expression(&mut self) -> Result<Node> {
        let expression = self.parse_add_subtract()?;

        match self.tokens.current().kind {
            TokenKind::EndOfInput => Ok(expression),
            _ => Err(self.unexpected()),
        }
    }

    fn parse_add_subtract(&mut self) -> Result<Node> {
        let mut left_operand = self.parse_multiply_divide()?;

        while let Some(operator) = self.current_operator(&[TokenKind::Add, TokenKind::Subtract]) {
            self.tokens.advance();
            let right_operand = self.parse_multiply_divide()?;
            left_operand = Node::new_binary(operator, left_operand, right_operand);
        }

        Ok(left_operand)
    }

    fn parse_multiply_divide(&mut self) -> Result<Node> {
        let mut left_operand = self.parse_unary()?;

        while let Some(operator) =
            self.current_operator(&[TokenKind::Multiply, TokenKind::Divide])
        {
            self.tokens.advance();
            let right_operand = self.parse_unary()?;
            left_operand = Node::new_binary(operator, left_operand, right_operand);
        }

        Ok(left_operand)
    }

    /// Only the parity of the minus signs matters, `+` is a no-op.
    fn parse_unary(&mut self) -> Result<Node> {
        let mut negations = 0;
        while self.tokens.current().is_sign() {
            if self.tokens.current().kind != TokenKind::Add {
                negations += 1;
            }
            self.tokens.advance();
        }

        let leaf = self.parse_leaf()?;

        if negations % 2 == 1 {
            Ok(Node::new_negation(leaf))
        } else {
            Ok(leaf)
        }
    }

    fn parse_leaf(&mut self) -> Result<Node> {
        let token = self.tokens.current();
        let node = match token.kind {
            TokenKind::Number => Node::new_number(parse_number(token)?),
            TokenKind::Variable => Node::new_variable(token.text.clone()),
            TokenKind::OpenParenthesis => {
                self.tokens.advance();
                let inner = self.parse_add_subtract()?;
                if self.tokens.current().kind != TokenKind::CloseParenthesis {
                    return Err(SyntaxError::MissingCloseParenthesis);
                }
                inner
            }
            _ => return Err(self.unexpected()),
        };
        self.tokens.advance();
        Ok(node)
    }

    fn current_operator(&self, accepted: &[TokenKind]) -> Option<BinaryOperator> {
        let kind = self.tokens.current().kind;
        if accepted.contains(&kind) {
            BinaryOperator::from_token_kind(kind)
        } else {
            None
        }
    }

    fn unexpected(&self) -> SyntaxError {
        SyntaxError::UnexpectedToken(self.tokens.current().to_string())
    }
}

pub(crate) fn parse_number(token: &Token) -> Result<f64> {
    token
        .text
        .parse::<f64>()
        .map_err(|_| SyntaxError::UnexpectedToken(token.to_string()))
}

/// Yields [`END_OF_INPUT`] once every token has been consumed.
struct TokenCursor<'a> {
    tokens: &'a [Token],
    index: usize,
}

impl<'a> TokenCursor<'a> {
    fn new(tokens: &'a [Token]) -> TokenCursor<'a> {
        TokenCursor { tokens, index: 0 }
    }

    fn current(&self) -> &'a Token {
        self.tokens.get(self.index).unwrap_or(&END_OF_INPUT)
    }

    fn advance(&mut self) {
        if self.index < self.tokens.len() {
            self.index += 1;
        }
    }
}
