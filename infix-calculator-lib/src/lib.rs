pub mod interpreter;

pub use interpreter::calculator::{Calculator, Strategy};
pub use interpreter::error::{Result, SyntaxError};
pub use interpreter::evaluator::{evaluate, evaluate_postfix};
pub use interpreter::lexer::tokenize;
pub use interpreter::parser::{infix_to_postfix, parse};
pub use interpreter::resolver::{FnResolver, VariableResolver};
pub use interpreter::syntax::expression_tree::Node;
