use crate::interpreter::error::{Result, SyntaxError};
use crate::interpreter::operator::{BinaryOperator, UnaryOperator};
use crate::interpreter::parser::parse_number;
use crate::interpreter::resolver::VariableResolver;
use crate::interpreter::token::{Token, TokenKind};

/// Evaluates a postfix (reverse polish) token sequence on a single stack.
///
/// # Arguments
///
/// * `postfix_tokens`: Tokens in postfix order, as produced by
///   [`infix_to_postfix`](crate::interpreter::parser::infix_to_postfix).
/// * `resolver`: Supplies the values of variables.
///
/// returns: The single value left on the stack once every token is consumed.
pub fn evaluate_postfix<R: VariableResolver + ?Sized>(
    postfix_tokens: &[Token],
    resolver: &R,
) -> Result<f64> {
    let mut stack: Vec<f64> = Vec::with_capacity(postfix_tokens.len());

    for token in postfix_tokens {
        match token.kind {
            TokenKind::Number => stack.push(parse_number(token)?),
            TokenKind::Variable => stack.push(resolver.resolve(&token.text)?),
            TokenKind::Negate => {
                let operand = stack.pop().ok_or(SyntaxError::MissingOperand)?;
                stack.push(UnaryOperator::Negate.evaluate(operand));
            }
            TokenKind::Add | TokenKind::Subtract | TokenKind::Multiply | TokenKind::Divide => {
                let operator =
                    BinaryOperator::from_token_kind(token.kind).ok_or_else(|| unsupported(token))?;
                // The right operand was pushed last.
                let right_operand = stack.pop().ok_or(SyntaxError::MissingOperand)?;
                let left_operand = stack.pop().ok_or(SyntaxError::MissingOperand)?;
                stack.push(operator.evaluate(left_operand, right_operand));
            }
            TokenKind::OpenParenthesis | TokenKind::CloseParenthesis | TokenKind::EndOfInput => {
                return Err(unsupported(token))
            }
        }
    }

    match stack.as_slice() {
        [result] => Ok(*result),
        values => Err(SyntaxError::ResultCount(values.len())),
    }
}

fn unsupported(token: &Token) -> SyntaxError {
    SyntaxError::UnsupportedToken {
        stage: "RPN evaluation",
        token: token.to_string(),
    }
}
