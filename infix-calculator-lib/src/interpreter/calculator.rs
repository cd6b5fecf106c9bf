use crate::interpreter::error::{Result, SyntaxError};
use crate::interpreter::evaluator::{evaluate, evaluate_postfix};
use crate::interpreter::lexer::tokenize;
use crate::interpreter::parser::{infix_to_postfix, parse};
use crate::interpreter::resolver::VariableResolver;
use log::debug;
use std::fmt;
use std::fmt::Formatter;
use std::str::FromStr;

/// How a [`Calculator`] turns tokens into a value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    /// Shunting-yard conversion to postfix, then a stack evaluation.
    ShuntingYard,
    /// Recursive descent into an expression tree, then a tree evaluation.
    #[default]
    SyntaxTree,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::ShuntingYard => write!(f, "shunting-yard"),
            Strategy::SyntaxTree => write!(f, "tree"),
        }
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(input: &str) -> std::result::Result<Strategy, Self::Err> {
        match input.to_ascii_lowercase().as_str() {
            "shunting-yard" | "postfix" => Ok(Strategy::ShuntingYard),
            "tree" | "syntax-tree" => Ok(Strategy::SyntaxTree),
            other => Err(format!("unknown strategy '{}'", other)),
        }
    }
}

/// Calculates infix expressions with a fixed strategy and variable resolver.
///
/// # Examples
///
/// ```
/// # use anyhow::Result;
/// # fn main() -> Result<()> {
/// use infix_calculator::{Calculator, Strategy};
/// use std::collections::HashMap;
///
/// let variables = HashMap::from([("r".to_string(), 2.0)]);
/// let calculator = Calculator::new(Strategy::ShuntingYard, variables);
/// assert_eq!(calculator.calculate("2 * 3 * r")?, 12.0);
/// # Ok(()) }
/// ```
#[derive(Debug, Clone)]
pub struct Calculator<R> {
    strategy: Strategy,
    resolver: R,
}

impl<R: VariableResolver> Calculator<R> {
    pub fn new(strategy: Strategy, resolver: R) -> Calculator<R> {
        Calculator { strategy, resolver }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Calculates the value of an infix expression.
    ///
    /// An empty or all-whitespace expression evaluates to `0`.
    pub fn calculate(&self, expression: &str) -> Result<f64> {
        let tokens = tokenize(expression)?;

        if tokens.is_empty() {
            debug!("Expression {:?} is empty, nothing to calculate", expression);
            return Ok(0.0);
        }

        let result = match self.strategy {
            Strategy::ShuntingYard => {
                let postfix_tokens = infix_to_postfix(&tokens)?;
                debug!("Postfix form: {:?}", postfix_tokens);
                evaluate_postfix(&postfix_tokens, &self.resolver)
            }
            Strategy::SyntaxTree => {
                let tree = parse(&tokens)?;
                debug!("Expression tree: {:?}", tree);
                evaluate(&tree, &self.resolver)
            }
        };

        match &result {
            Ok(value) => debug!("{:?} = {} ({})", expression, value, self.strategy),
            Err(error) => debug!("{:?} failed ({}): {}", expression, self.strategy, error),
        }
        result
    }

    /// Calculates the expression with both strategies, failing if they disagree.
    pub fn cross_check(&self, expression: &str) -> Result<f64> {
        let tree = Calculator::new(Strategy::SyntaxTree, &self.resolver).calculate(expression)?;
        let postfix =
            Calculator::new(Strategy::ShuntingYard, &self.resolver).calculate(expression)?;

        if values_agree(tree, postfix) {
            Ok(tree)
        } else {
            Err(SyntaxError::StrategiesDisagree { tree, postfix })
        }
    }
}

fn values_agree(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || a == b || (a - b).abs() <= 1e-9 * a.abs().max(b.abs())
}
