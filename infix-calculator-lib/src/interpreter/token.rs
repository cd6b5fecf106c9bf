use crate::interpreter::error::{Result, SyntaxError};
use crate::interpreter::lexer::tokenize;
use std::fmt;
use std::fmt::Formatter;
use std::str;

/// The category of a [`Token`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Number,
    Variable,
    Add,
    Subtract,
    Multiply,
    Divide,
    OpenParenthesis,
    CloseParenthesis,
    /// Folded unary minus. Never produced by the lexer, only by the postfix
    /// converter and by infix regeneration.
    Negate,
    /// Sentinel returned by the parser cursor once all tokens are consumed.
    EndOfInput,
}

/// A discrete part of an expression
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

pub(crate) static END_OF_INPUT: Token = Token {
    kind: TokenKind::EndOfInput,
    text: String::new(),
};

pub(crate) static SYMBOLS: [(char, TokenKind); 6] = [
    ('+', TokenKind::Add),
    ('-', TokenKind::Subtract),
    ('*', TokenKind::Multiply),
    ('/', TokenKind::Divide),
    ('(', TokenKind::OpenParenthesis),
    (')', TokenKind::CloseParenthesis),
];

impl TokenKind {
    /// The fixed spelling of symbol kinds, `None` for kinds that carry a lexeme.
    pub fn symbol(&self) -> Option<&'static str> {
        match self {
            TokenKind::Add => Some("+"),
            TokenKind::Subtract | TokenKind::Negate => Some("-"),
            TokenKind::Multiply => Some("*"),
            TokenKind::Divide => Some("/"),
            TokenKind::OpenParenthesis => Some("("),
            TokenKind::CloseParenthesis => Some(")"),
            TokenKind::Number | TokenKind::Variable | TokenKind::EndOfInput => None,
        }
    }

    pub(crate) fn from_symbol(symbol: char) -> Option<TokenKind> {
        SYMBOLS
            .iter()
            .find(|(candidate, _)| *candidate == symbol)
            .map(|(_, kind)| *kind)
    }
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Token {
        Token {
            kind,
            text: text.into(),
        }
    }

    pub fn number(text: impl Into<String>) -> Token {
        Token::new(TokenKind::Number, text)
    }

    pub fn variable(name: impl Into<String>) -> Token {
        Token::new(TokenKind::Variable, name)
    }

    /// Creates a token for a kind with a fixed spelling, e.g. an operator.
    pub fn symbol(kind: TokenKind) -> Token {
        Token::new(kind, kind.symbol().unwrap_or_default())
    }

    pub fn is_binary_operator(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Add | TokenKind::Subtract | TokenKind::Multiply | TokenKind::Divide
        )
    }

    pub fn is_sign(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Add | TokenKind::Subtract | TokenKind::Negate
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::EndOfInput => write!(f, "end of expression"),
            _ => write!(f, "{}", self.text),
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Number | TokenKind::Variable => write!(f, "{:?}({})", self.kind, self.text),
            _ => write!(f, "{:?}", self.kind),
        }
    }
}

impl str::FromStr for Token {
    type Err = SyntaxError;

    /// Parses a single lexeme into its token.
    fn from_str(input: &str) -> Result<Token> {
        let mut tokens = tokenize(input)?;
        match tokens.len() {
            1 => Ok(tokens.remove(0)),
            0 => Err(SyntaxError::UnexpectedToken(END_OF_INPUT.to_string())),
            _ => Err(SyntaxError::UnexpectedToken(tokens[1].to_string())),
        }
    }
}
