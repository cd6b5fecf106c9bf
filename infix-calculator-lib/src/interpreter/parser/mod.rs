mod infix_converter;
mod recursive_descent;

pub use infix_converter::infix_to_postfix;
pub use recursive_descent::parse;
pub(crate) use recursive_descent::parse_number;

use crate::interpreter::error::Result;
use crate::interpreter::syntax::expression_tree::Node;
use crate::interpreter::token::Token;

/// Parses the given infix tokens into an expression tree by way of the shunting-yard
/// algorithm, rather than by recursive descent.
///
/// # Arguments
///
/// * `infix_tokens`: The tokens to parse, in infix format.
///
/// returns: The equivalent expression tree.
///
/// # Examples
///
/// ```
/// # use anyhow::Result;
/// # fn main() -> Result<()> {
/// use infix_calculator::interpreter::parser::{parse, parse_via_postfix};
/// use infix_calculator::tokenize;
///
/// let tokens = tokenize("-3 - -2 * x")?;
/// assert_eq!(parse_via_postfix(&tokens)?, parse(&tokens)?);
/// # Ok(()) }
/// ```
pub fn parse_via_postfix(infix_tokens: &[Token]) -> Result<Node> {
    let postfix_tokens = infix_to_postfix(infix_tokens)?;
    Node::from_postfix(&postfix_tokens)
}
