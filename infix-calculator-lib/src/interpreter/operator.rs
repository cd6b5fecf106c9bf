use crate::interpreter::token::{Token, TokenKind};
use std::fmt;
use std::fmt::Formatter;

/// A binary mathematical operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

/// An unary mathematical operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Negate,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

impl UnaryOperator {
    pub fn token(&self) -> Token {
        match self {
            UnaryOperator::Negate => Token::symbol(TokenKind::Negate),
        }
    }

    /// Binds tighter than every binary operator.
    pub(crate) fn precedence(&self) -> u8 {
        3
    }

    pub(crate) fn associativity(&self) -> Associativity {
        Associativity::Right
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        match self {
            UnaryOperator::Negate => -x,
        }
    }
}

impl BinaryOperator {
    pub fn from_token_kind(kind: TokenKind) -> Option<BinaryOperator> {
        match kind {
            TokenKind::Add => Some(BinaryOperator::Add),
            TokenKind::Subtract => Some(BinaryOperator::Subtract),
            TokenKind::Multiply => Some(BinaryOperator::Multiply),
            TokenKind::Divide => Some(BinaryOperator::Divide),
            _ => None,
        }
    }

    pub fn token(&self) -> Token {
        let kind = match self {
            BinaryOperator::Add => TokenKind::Add,
            BinaryOperator::Subtract => TokenKind::Subtract,
            BinaryOperator::Multiply => TokenKind::Multiply,
            BinaryOperator::Divide => TokenKind::Divide,
        };
        Token::symbol(kind)
    }

    pub(crate) fn associativity(&self) -> Associativity {
        Associativity::Left
    }

    pub(crate) fn precedence(&self) -> u8 {
        match self {
            BinaryOperator::Add | BinaryOperator::Subtract => 1,
            BinaryOperator::Multiply | BinaryOperator::Divide => 2,
        }
    }

    /// Whether `a op (b op' c)` differs from `a op b op' c` when `op'` has the same precedence.
    pub(crate) fn is_right_sensitive(&self) -> bool {
        matches!(self, BinaryOperator::Subtract | BinaryOperator::Divide)
    }

    pub(crate) fn precedence_eq(&self, other: &Self) -> bool {
        self.precedence().eq(&other.precedence())
    }

    pub(crate) fn precedence_gt(&self, other: &Self) -> bool {
        self.precedence().gt(&other.precedence())
    }

    pub fn evaluate(&self, a: f64, b: f64) -> f64 {
        match self {
            BinaryOperator::Add => a + b,
            BinaryOperator::Subtract => a - b,
            BinaryOperator::Multiply => a * b,
            BinaryOperator::Divide => a / b,
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}
