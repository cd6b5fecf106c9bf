use crate::interpreter::error::Result;
use crate::interpreter::resolver::VariableResolver;
use crate::interpreter::syntax::expression_tree::Node;

/// Evaluates an expression tree, looking variables up through the given resolver.
///
/// The tree is well-formed by construction, so the only failures are the resolver's.
/// Division by zero follows IEEE 754 and yields an infinity or NaN.
///
/// # Examples
///
/// ```
/// # use anyhow::Result;
/// # fn main() -> Result<()> {
/// use infix_calculator::{evaluate, parse, tokenize};
/// use std::collections::HashMap;
///
/// let tree = parse(&tokenize("-(x - 1) * 2")?)?;
/// let variables = HashMap::from([("x".to_string(), 4.0)]);
/// assert_eq!(evaluate(&tree, &variables)?, -6.0);
/// # Ok(()) }
/// ```
pub fn evaluate<R: VariableResolver + ?Sized>(node: &Node, resolver: &R) -> Result<f64> {
    match node {
        Node::Number(value) => Ok(*value),
        Node::Variable(name) => resolver.resolve(name),
        Node::UnaryOperation { operator, operand } => {
            Ok(operator.evaluate(evaluate(operand, resolver)?))
        }
        Node::BinaryOperation {
            operator,
            left_operand,
            right_operand,
        } => {
            let left = evaluate(left_operand, resolver)?;
            let right = evaluate(right_operand, resolver)?;
            Ok(operator.evaluate(left, right))
        }
    }
}
