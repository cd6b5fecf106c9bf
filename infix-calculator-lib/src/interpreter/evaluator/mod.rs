mod postfix;
mod tree;

pub use postfix::evaluate_postfix;
pub use tree::evaluate;
