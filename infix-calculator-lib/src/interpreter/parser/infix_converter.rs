use crate::interpreter::error::{Result, SyntaxError};
use crate::interpreter::operator::{Associativity, BinaryOperator, UnaryOperator};
use crate::interpreter::token::{Token, TokenKind, END_OF_INPUT};
use log::trace;
use std::collections::VecDeque;
use std::iter::Peekable;

const STAGE: &str = "Shunting-yard";

/// Converts infix tokens into postfix (reverse polish) order using the shunting-yard algorithm.
///
/// A chain of `+`/`-` in operand position (start of input, after an operator or after `(`)
/// is folded into a single [`TokenKind::Negate`] when it negates an odd number of times,
/// and dropped otherwise. Operands and binary operators must alternate, so `1 2 +` or `()`
/// are rejected here rather than left to the evaluator.
///
/// # Arguments
///
/// * `infix_tokens`: The tokens to convert, in infix order.
///
/// returns: A new token sequence in postfix order, without parentheses.
///
/// # Examples
///
/// ```
/// # use anyhow::Result;
/// # fn main() -> Result<()> {
/// use infix_calculator::{infix_to_postfix, tokenize};
/// use infix_calculator::interpreter::postfix_to_string;
///
/// let postfix = infix_to_postfix(&tokenize("a + b * c")?)?;
/// assert_eq!(postfix_to_string(&postfix), "a b c * +");
/// # Ok(()) }
/// ```
pub fn infix_to_postfix(infix_tokens: &[Token]) -> Result<Vec<Token>> {
    let mut tokens = infix_tokens.iter().peekable();
    let mut operators: VecDeque<Token> = VecDeque::new();
    let mut output: Vec<Token> = Vec::with_capacity(infix_tokens.len());
    let mut expects_operand = true;

    while let Some(token) = tokens.next() {
        trace!("{:?} | output {:?} | operators {:?}", token, output, operators);
        match token.kind {
            TokenKind::Number
            | TokenKind::Variable
            | TokenKind::OpenParenthesis
            | TokenKind::Negate
                if !expects_operand =>
            {
                return Err(unexpected(token))
            }
            TokenKind::Multiply | TokenKind::Divide | TokenKind::CloseParenthesis
                if expects_operand =>
            {
                return Err(unexpected(token))
            }
            TokenKind::Number | TokenKind::Variable => {
                output.push(token.clone());
                expects_operand = false;
            }
            TokenKind::Negate => {
                parse_sign_chain(&mut operators, &mut output, &mut tokens, token)?
            }
            TokenKind::Add | TokenKind::Subtract if expects_operand => {
                parse_sign_chain(&mut operators, &mut output, &mut tokens, token)?
            }
            TokenKind::Add | TokenKind::Subtract | TokenKind::Multiply | TokenKind::Divide => {
                parse_operator_token(&mut operators, &mut output, token)?;
                expects_operand = true;
            }
            TokenKind::OpenParenthesis => {
                operators.push_front(token.clone());
                expects_operand = true;
            }
            TokenKind::CloseParenthesis => {
                parse_closing_parenthesis_token(&mut operators, &mut output)?;
                expects_operand = false;
            }
            TokenKind::EndOfInput => {
                return Err(SyntaxError::UnsupportedToken {
                    stage: STAGE,
                    token: token.to_string(),
                })
            }
        };
    }

    if expects_operand && !infix_tokens.is_empty() {
        return Err(unexpected(&END_OF_INPUT));
    }
    transfer_leftover_operators(&mut operators, &mut output)?;

    Ok(output)
}

fn unexpected(token: &Token) -> SyntaxError {
    SyntaxError::UnexpectedToken(token.to_string())
}

/// Consumes every sign directly following `first` and pushes a prefix negation if the
/// chain negates an odd number of times.
fn parse_sign_chain<'a>(
    operators: &mut VecDeque<Token>,
    output: &mut Vec<Token>,
    tokens: &mut Peekable<impl Iterator<Item = &'a Token>>,
    first: &Token,
) -> Result<()> {
    let is_negation = |token: &Token| token.kind != TokenKind::Add;

    let mut negations = usize::from(is_negation(first));
    while let Some(sign) = tokens.next_if(|token| token.is_sign()) {
        negations += usize::from(is_negation(sign));
    }

    if negations % 2 == 1 {
        let negate = UnaryOperator::Negate;
        push_operator(
            operators,
            output,
            negate.token(),
            negate.precedence(),
            negate.associativity(),
        )?;
    }
    Ok(())
}

fn transfer_leftover_operators(
    operators: &mut VecDeque<Token>,
    output: &mut Vec<Token>,
) -> Result<()> {
    while let Some(operator) = operators.pop_front() {
        match operator.kind {
            TokenKind::OpenParenthesis | TokenKind::CloseParenthesis => {
                return Err(SyntaxError::MismatchedParenthesis);
            }
            _ => output.push(operator),
        }
    }
    Ok(())
}

fn parse_closing_parenthesis_token(
    operators: &mut VecDeque<Token>,
    output: &mut Vec<Token>,
) -> Result<()> {
    loop {
        match operators.pop_front() {
            None => return Err(SyntaxError::MismatchedParenthesis),
            // Discard the open parenthesis.
            Some(top_of_operator_stack)
                if top_of_operator_stack.kind == TokenKind::OpenParenthesis =>
            {
                return Ok(())
            }
            Some(operator) => output.push(operator),
        }
    }
}

fn parse_operator_token(
    operators: &mut VecDeque<Token>,
    output: &mut Vec<Token>,
    token: &Token,
) -> Result<()> {
    let operator = BinaryOperator::from_token_kind(token.kind).ok_or_else(|| {
        SyntaxError::UnsupportedToken {
            stage: STAGE,
            token: token.to_string(),
        }
    })?;

    push_operator(
        operators,
        output,
        token.clone(),
        operator.precedence(),
        operator.associativity(),
    )
}

/// Pops every stacked operator that binds at least as tight as the incoming one, then stacks it.
/// A right-associative operator leaves equal precedence on the stack.
fn push_operator(
    operators: &mut VecDeque<Token>,
    output: &mut Vec<Token>,
    token: Token,
    precedence: u8,
    associativity: Associativity,
) -> Result<()> {
    while let Some(top_of_operator_stack) = operators.front() {
        if top_of_operator_stack.kind == TokenKind::OpenParenthesis {
            break;
        }

        let other_precedence = stacked_precedence(top_of_operator_stack)?;
        let pops = other_precedence > precedence
            || (other_precedence == precedence && associativity == Associativity::Left);
        if !pops {
            break;
        }

        if let Some(other_operator_token) = operators.pop_front() {
            output.push(other_operator_token);
        }
    }

    operators.push_front(token);
    Ok(())
}

fn stacked_precedence(token: &Token) -> Result<u8> {
    if token.kind == TokenKind::Negate {
        return Ok(UnaryOperator::Negate.precedence());
    }
    BinaryOperator::from_token_kind(token.kind)
        .map(|operator| operator.precedence())
        .ok_or_else(|| SyntaxError::UnsupportedToken {
            stage: STAGE,
            token: token.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::tokenize;
    use pretty_assertions::assert_eq;

    /// Whitespace separated lexemes, `~` stands for a folded negation.
    fn postfix(lexemes: &str) -> Vec<Token> {
        lexemes
            .split_whitespace()
            .map(|lexeme| match lexeme {
                "~" => Token::symbol(TokenKind::Negate),
                lexeme => lexeme.parse().unwrap(),
            })
            .collect()
    }

    fn convert(expression: &str) -> Result<Vec<Token>> {
        infix_to_postfix(&tokenize(expression).unwrap())
    }

    #[test]
    fn infix_to_postfix_simple_expression() {
        let infix = [
            Token::variable("x"),
            "+".parse().unwrap(),
            Token::variable("y"),
        ];
        let expected = [
            Token::variable("x"),
            Token::variable("y"),
            "+".parse().unwrap(),
        ];

        let actual = infix_to_postfix(&infix).unwrap();

        assert_eq!(actual, expected)
    }

    #[test]
    fn infix_to_postfix_simple_parenthesised_expression() {
        assert_eq!(convert("x - (y + z)").unwrap(), postfix("x y z + -"))
    }

    #[test]
    fn infix_to_postfix_complex_expression() {
        assert_eq!(
            convert("a + b * c / (d - e) - f").unwrap(),
            postfix("a b c * d e - / + f -")
        )
    }

    #[test]
    fn infix_to_postfix_multi_operator_expression() {
        assert_eq!(convert("A + B * C - D").unwrap(), postfix("A B C * + D -"))
    }

    #[test]
    fn infix_to_postfix_nested_parenthesis_expression() {
        assert_eq!(
            convert("a + ((b + c) * d)").unwrap(),
            postfix("a b c + d * +")
        )
    }

    #[test]
    fn equal_precedence_operators_are_left_associative() {
        assert_eq!(convert("8 / 4 / 2").unwrap(), postfix("8 4 / 2 /"));
        assert_eq!(convert("8 - 4 + 2").unwrap(), postfix("8 4 - 2 +"));
    }

    #[test]
    fn infix_to_postfix_mismatched_parenthesis_should_return_err() {
        assert_eq!(
            convert("(x + y))").unwrap_err(),
            SyntaxError::MismatchedParenthesis
        );
    }

    #[test]
    fn infix_to_postfix_unclosed_parenthesis_should_return_err() {
        assert_eq!(
            convert("((1 + 1) * (pi)").unwrap_err(),
            SyntaxError::MismatchedParenthesis
        );
    }

    #[test]
    fn leading_minus_is_folded_into_negation() {
        assert_eq!(convert("-1").unwrap(), postfix("1 ~"));
    }

    #[test]
    fn odd_sign_chain_negates_once() {
        assert_eq!(convert("+--++-+1").unwrap(), postfix("1 ~"));
    }

    #[test]
    fn even_sign_chain_is_dropped() {
        assert_eq!(convert("1 + + - - + 1").unwrap(), postfix("1 1 +"));
    }

    #[test]
    fn negation_binds_tighter_than_multiplication() {
        assert_eq!(convert("-a * b").unwrap(), postfix("a ~ b *"));
        assert_eq!(convert("a * -b").unwrap(), postfix("a b ~ *"));
    }

    #[test]
    fn sign_after_operand_is_binary() {
        assert_eq!(convert("-3--2").unwrap(), postfix("3 ~ 2 ~ -"));
    }

    #[test]
    fn sign_after_open_parenthesis_is_unary() {
        assert_eq!(convert("(-x)").unwrap(), postfix("x ~"));
    }

    #[test]
    fn multiplicative_operator_is_never_unary() {
        assert_eq!(
            convert("/ 2").unwrap_err(),
            SyntaxError::UnexpectedToken("/".into())
        );
    }

    #[test]
    fn operand_after_operand_is_rejected() {
        assert_eq!(
            convert("1 2 +").unwrap_err(),
            SyntaxError::UnexpectedToken("2".into())
        );
        assert_eq!(
            convert("x ()").unwrap_err(),
            SyntaxError::UnexpectedToken("(".into())
        );
        assert_eq!(
            convert("() 2").unwrap_err(),
            SyntaxError::UnexpectedToken(")".into())
        );
    }

    #[test]
    fn operators_must_alternate_with_operands() {
        for expression in ["* 1 2", "(1 2 +)", "(1 + )", "1 * / 2", "(1) (2)", "1 +", "-"] {
            let result = convert(expression);

            assert!(
                matches!(result, Err(SyntaxError::UnexpectedToken(_))),
                "{:?} gave {:?}",
                expression,
                result
            );
        }
    }

    #[test]
    fn trailing_operator_reports_end_of_input() {
        assert_eq!(
            convert("(1 + 1) /").unwrap_err(),
            SyntaxError::UnexpectedToken("end of expression".into())
        );
    }

    #[test]
    fn empty_input_converts_to_nothing() {
        assert_eq!(infix_to_postfix(&[]).unwrap(), Vec::<Token>::new());
    }

    #[test]
    fn end_of_input_sentinel_is_unsupported() {
        let infix = [Token::number("1"), Token::new(TokenKind::EndOfInput, "")];

        let error = infix_to_postfix(&infix).unwrap_err();

        assert!(matches!(error, SyntaxError::UnsupportedToken { .. }));
    }
}
