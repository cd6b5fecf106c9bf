use thiserror::Error;

pub type Result<T> = std::result::Result<T, SyntaxError>;

/// Raised whenever an expression cannot be tokenized, parsed or evaluated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SyntaxError {
    #[error("Unknown symbol '{symbol}' at position {position}")]
    UnknownSymbol { symbol: char, position: usize },
    #[error("Invalid number at position {position}")]
    InvalidNumber { position: usize },
    #[error("Invalid variable at position {position}")]
    InvalidVariable { position: usize },
    #[error("Mismatched parenthesis")]
    MismatchedParenthesis,
    #[error("Missing close parenthesis")]
    MissingCloseParenthesis,
    #[error("Unexpected token: {0}")]
    UnexpectedToken(String),
    #[error("{stage} failed, unsupported token found: {token}")]
    UnsupportedToken { stage: &'static str, token: String },
    #[error("Expected an operand, but none was left")]
    MissingOperand,
    #[error("Calculation failed, expected a single result, but was: {0}")]
    ResultCount(usize),
    #[error("Unknown variable: {0}")]
    UnknownVariable(String),
    #[error("Strategies disagree: syntax tree gave {tree}, shunting-yard gave {postfix}")]
    StrategiesDisagree { tree: f64, postfix: f64 },
}
