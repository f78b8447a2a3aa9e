//! Tokenizer for informal numeric expressions
//!
//! Turns raw text like `30 billion * 500 bytes` into a token stream the
//! evaluator can walk. Magnitude words/suffixes and data-size units are
//! resolved against their closed lookup tables here, so the evaluator only
//! ever sees numbers, multipliers, and operators.
//!
//! A trailing `/ <time-word>` clause is not part of the arithmetic body; it
//! is split off first with [`split_time_divisor`] and handled by the
//! evaluator after the body is reduced to a value.

use crate::error::ParseError;
use crate::types::{ByteUnit, Magnitude, TimeUnit};
use std::fmt;
use tracing::trace;

/// A lexical token of the expression body
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Numeric literal, including scientific notation (`1.5e3`)
    Number(f64),
    /// Magnitude word or suffix (`million`, `K`)
    Scale(Magnitude),
    /// Data-size unit (`bytes`, `GB`)
    Unit(ByteUnit),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{n}"),
            Token::Scale(m) => write!(f, "{}", m.label()),
            Token::Unit(u) => write!(f, "{}", u.label()),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
        }
    }
}

/// Split an optional trailing `/ <time-word>` clause off an expression
///
/// Returns the arithmetic body and the divisor unit, if one was present.
/// The clause is only recognized when the final word names a known time
/// unit; `1/0` or `100 / x` are left untouched for the evaluator to judge.
///
/// # Examples
/// ```
/// use napkin::tokenizer::split_time_divisor;
/// use napkin::types::TimeUnit;
///
/// let (body, unit) = split_time_divisor("500 million / month");
/// assert_eq!(body.trim(), "500 million");
/// assert_eq!(unit, Some(TimeUnit::Month));
///
/// let (body, unit) = split_time_divisor("1/0");
/// assert_eq!(body, "1/0");
/// assert_eq!(unit, None);
/// ```
pub fn split_time_divisor(input: &str) -> (&str, Option<TimeUnit>) {
    let trimmed = input.trim_end();
    let Some(idx) = trimmed.rfind('/') else {
        return (input, None);
    };
    let tail = trimmed[idx + 1..].trim();
    if !tail.is_empty() && tail.chars().all(|c| c.is_ascii_alphabetic()) {
        if let Some(unit) = TimeUnit::from_token(tail) {
            return (&trimmed[..idx], Some(unit));
        }
    }
    (input, None)
}

/// Tokenize the arithmetic body of an expression
///
/// Words are resolved case-insensitively: data-size units first, then
/// magnitude words/suffixes. Anything else is a [`ParseError::UnknownToken`].
pub fn tokenize(body: &str) -> Result<Vec<Token>, ParseError> {
    let chars: Vec<char> = body.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            _ if c.is_whitespace() => i += 1,
            '+' => {
                tokens.push(Token::Plus);
                i += 1;
            }
            '-' => {
                tokens.push(Token::Minus);
                i += 1;
            }
            '*' => {
                tokens.push(Token::Star);
                i += 1;
            }
            '/' => {
                tokens.push(Token::Slash);
                i += 1;
            }
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            _ if c.is_ascii_digit() || c == '.' => {
                let (token, next) = scan_number(&chars, i)?;
                tokens.push(token);
                i = next;
            }
            _ if c.is_ascii_alphabetic() => {
                let start = i;
                while i < chars.len() && chars[i].is_ascii_alphabetic() {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();
                tokens.push(classify_word(&word)?);
            }
            other => return Err(ParseError::UnknownToken(other.to_string())),
        }
    }

    trace!(count = tokens.len(), "tokenized expression body");
    Ok(tokens)
}

/// Scan a numeric literal starting at `start`, returning the token and the
/// index just past it
fn scan_number(chars: &[char], start: usize) -> Result<(Token, usize), ParseError> {
    let mut i = start;
    while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
        i += 1;
    }

    // Optional exponent: only consumed when digits actually follow, so the
    // suffix in `2e` or a word like `3 events` still lexes on its own.
    if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
        let mut j = i + 1;
        if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
            j += 1;
        }
        if j < chars.len() && chars[j].is_ascii_digit() {
            i = j;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
        }
    }

    let literal: String = chars[start..i].iter().collect();
    let value = literal
        .parse::<f64>()
        .map_err(|_| ParseError::InvalidNumber(literal.clone()))?;
    Ok((Token::Number(value), i))
}

/// Resolve an alphabetic word against the unit and magnitude tables
fn classify_word(word: &str) -> Result<Token, ParseError> {
    if let Some(unit) = ByteUnit::from_token(word) {
        return Ok(Token::Unit(unit));
    }
    if let Some(magnitude) = Magnitude::from_token(word) {
        return Ok(Token::Scale(magnitude));
    }
    Err(ParseError::UnknownToken(word.to_string()))
}
