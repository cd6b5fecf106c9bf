pub mod calculator;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod operator;
pub mod parser;
pub mod resolver;
pub mod syntax;
pub mod token;

use crate::interpreter::calculator::{Calculator, Strategy};
use crate::interpreter::error::Result;
use crate::interpreter::resolver::VariableResolver;
use crate::interpreter::token::{Token, TokenKind};
use itertools::Itertools;
use string_builder::Builder;
use syntax::expression_tree::Node;

/// Calculates the value of the given infix expression.
///
/// # Arguments
///
/// * `expression`: A text expression in infix format.
/// * `resolver`: Supplies the values of the variables in the expression.
///
/// returns: The value of the expression, `0` if it is empty.
///
/// # Examples
///
/// ```
/// use infix_calculator::interpreter::calculate;
/// use std::collections::HashMap;
/// # use anyhow::Result;
///
/// # fn main() -> Result<()> {
/// let variables = HashMap::from([("x1".to_string(), 0.5)]);
/// assert_eq!(calculate("(3 - 1) * x1", &variables)?, 1.0);
/// # Ok(()) }
/// ```
pub fn calculate(expression: &str, resolver: &impl VariableResolver) -> Result<f64> {
    Calculator::new(Strategy::default(), resolver).calculate(expression)
}

/// Converts the given input string into an equivalent expression tree.
///
/// # Arguments
///
/// * `expression`: The text-representation of the infix expression.
///
/// returns: The equivalent expression tree.
///
/// # Examples
///
/// ```
/// use infix_calculator::interpreter::{convert, tokens_to_string};
/// # use anyhow::Result;
///
/// # fn main() -> Result<()> {
/// let tree = convert("((a)) + b * (c - d)")?;
/// assert_eq!(tokens_to_string(&tree.to_infix()), "a + b * (c - d)");
/// # Ok(()) }
/// ```
pub fn convert(expression: &str) -> Result<Node> {
    let tokens = lexer::tokenize(expression)?;
    let expression_tree = parser::parse(&tokens)?;
    Ok(expression_tree)
}

/// Pretty-prints the given infix tokens with added whitespace around binary operators.
///
/// # Arguments
///
/// * `tokens`: The tokens to print.
///
/// returns: A pretty-printed text-version of the given tokens.
///
/// # Examples
///
/// ```
/// use infix_calculator::interpreter::tokens_to_string;
/// use infix_calculator::interpreter::token::{Token, TokenKind};
///
/// let tokens = vec![
///     Token::symbol(TokenKind::Negate),
///     Token::variable("x"),
///     Token::symbol(TokenKind::Multiply),
///     Token::number("2"),
/// ];
/// assert_eq!(tokens_to_string(&tokens), "-x * 2");
/// ```
pub fn tokens_to_string(tokens: &[Token]) -> String {
    let mut builder = Builder::new(tokens.len());

    for token in tokens {
        if token.is_binary_operator() {
            builder.append(" ");
            builder.append(token.to_string());
            builder.append(" ");
        } else {
            builder.append(token.to_string());
        }
    }

    builder.string().unwrap_or_default()
}

/// Prints postfix tokens separated by single spaces, a folded negation is printed as `~`.
pub fn postfix_to_string(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|token| match token.kind {
            TokenKind::Negate => "~".to_string(),
            _ => token.to_string(),
        })
        .join(" ")
}
