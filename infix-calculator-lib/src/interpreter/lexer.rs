use crate::interpreter::error::{Result, SyntaxError};
use crate::interpreter::token::{Token, TokenKind};
use log::debug;

/// Splits the given infix expression into tokens.
///
/// Whitespace is skipped. `+` and `-` are always lexed as [`TokenKind::Add`] and
/// [`TokenKind::Subtract`], whether they are used as signs is decided by the parser.
///
/// # Arguments
///
/// * `expression`: A text expression in infix format.
///
/// returns: The tokens of the expression, in the order they appear.
///
/// # Examples
///
/// ```
/// use infix_calculator::interpreter::lexer::tokenize;
/// use infix_calculator::interpreter::token::TokenKind;
/// # use anyhow::Result;
///
/// # fn main() -> Result<()> {
/// let tokens = tokenize("( 1 + pi ) / 2")?;
/// assert_eq!(tokens.len(), 7);
/// assert_eq!(tokens[0].kind, TokenKind::OpenParenthesis);
/// # Ok(()) }
/// ```
pub fn tokenize(expression: &str) -> Result<Vec<Token>> {
    let mut cursor = Cursor::new(expression);
    let mut tokens = Vec::new();

    while let Some(next) = cursor.peek() {
        if next.is_whitespace() {
            cursor.advance();
            continue;
        }
        tokens.push(read_token(&mut cursor, next)?);
    }

    debug!("Tokenized {:?} into {:?}", expression, tokens);
    Ok(tokens)
}

fn read_token(cursor: &mut Cursor, next: char) -> Result<Token> {
    if let Some(kind) = TokenKind::from_symbol(next) {
        cursor.advance();
        return Ok(Token::symbol(kind));
    }
    if next.is_ascii_digit() || next == '.' {
        return read_number(cursor);
    }
    if next.is_alphabetic() {
        return read_variable(cursor);
    }
    Err(SyntaxError::UnknownSymbol {
        symbol: next,
        position: cursor.position,
    })
}

/// `digits ['.' digits]`, a leading '.' without integer digits is rejected.
/// Literals too large for an `f64` are rejected rather than read as infinity.
fn read_number(cursor: &mut Cursor) -> Result<Token> {
    let start = cursor.position;

    let integer_digits = cursor.advance_while(|c| c.is_ascii_digit());
    if cursor.peek() == Some('.') {
        cursor.advance();
        cursor.advance_while(|c| c.is_ascii_digit());
    }

    let text = cursor.slice_from(start);
    let is_finite = text.parse::<f64>().map_or(false, f64::is_finite);
    if integer_digits == 0 || !is_finite {
        return Err(SyntaxError::InvalidNumber { position: start });
    }
    Ok(Token::number(text))
}

/// `letters [digits]`
fn read_variable(cursor: &mut Cursor) -> Result<Token> {
    let start = cursor.position;

    let letters = cursor.advance_while(char::is_alphabetic);
    cursor.advance_while(|c| c.is_ascii_digit());

    if letters == 0 {
        return Err(SyntaxError::InvalidVariable { position: start });
    }
    Ok(Token::variable(cursor.slice_from(start)))
}

struct Cursor {
    characters: Vec<char>,
    position: usize,
}

impl Cursor {
    fn new(text: &str) -> Cursor {
        Cursor {
            characters: text.chars().collect(),
            position: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.characters.get(self.position).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    /// Consumes characters while they satisfy the predicate, returning how many were consumed.
    fn advance_while(&mut self, predicate: impl Fn(char) -> bool) -> usize {
        let start = self.position;
        while self.peek().map_or(false, &predicate) {
            self.advance();
        }
        self.position - start
    }

    fn slice_from(&self, start: usize) -> String {
        self.characters[start..self.position].iter().collect()
    }
}
