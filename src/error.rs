//! Error types for napkin
//!
//! This module defines the error types used throughout the napkin library.
//! All errors are derived from `thiserror` for convenient error handling
//! and automatic `From` implementations.
//!
//! The public API fails in exactly two ways: [`ParseError`] when an
//! expression cannot be evaluated, and [`FormatError`] when a value cannot
//! be rendered. [`NapkinError`] wraps both for callers (like the CLI binary)
//! that handle either.
//!
//! # Example
//!
//! ```
//! use napkin::error::ParseError;
//!
//! let err = napkin::evaluate("1 / 0").unwrap_err();
//! assert!(matches!(err, ParseError::DivisionByZero));
//! ```

use thiserror::Error;

/// Failure to evaluate an expression
///
/// Every malformed expression maps to one of these variants. No partial or
/// best-effort result is ever returned alongside an error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Input was empty or all whitespace
    #[error("empty expression")]
    EmptyExpression,

    /// A word or character the tokenizer does not recognize
    #[error("unknown token: `{0}`")]
    UnknownToken(String),

    /// A numeric literal that failed to parse
    #[error("invalid number: `{0}`")]
    InvalidNumber(String),

    /// A token in a position the grammar does not allow
    #[error("unexpected token: `{0}`")]
    UnexpectedToken(String),

    /// Expression ended where an operand or operator was required
    #[error("unexpected end of expression")]
    UnexpectedEnd,

    /// Parentheses do not pair up
    #[error("unbalanced parentheses")]
    UnbalancedParens,

    /// Division by a zero-valued sub-expression
    #[error("division by zero")]
    DivisionByZero,

    /// Byte units combined with plain counts in a way that has no single
    /// unit classification
    #[error("cannot mix byte units with plain counts")]
    MixedUnits,
}

/// Failure to render a value
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    /// Byte sizes are non-negative by definition
    #[error("negative byte size: {0}")]
    NegativeByteValue(f64),
}

/// Top-level error type for napkin operations
///
/// Wraps the two core error kinds plus IO errors from the CLI binary.
#[derive(Error, Debug)]
pub enum NapkinError {
    /// Expression could not be evaluated
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Value could not be rendered
    #[error(transparent)]
    Format(#[from] FormatError),

    /// IO error occurred (reading expressions from stdin)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in napkin
pub type Result<T, E = NapkinError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            ParseError::UnknownToken("widgets".into()).to_string(),
            "unknown token: `widgets`"
        );
        assert_eq!(ParseError::DivisionByZero.to_string(), "division by zero");
        assert_eq!(
            FormatError::NegativeByteValue(-5.0).to_string(),
            "negative byte size: -5"
        );
    }

    #[test]
    fn test_error_conversion() {
        let err: NapkinError = ParseError::MixedUnits.into();
        assert!(matches!(err, NapkinError::Parse(ParseError::MixedUnits)));

        let err: NapkinError = FormatError::NegativeByteValue(-1.0).into();
        assert!(matches!(err, NapkinError::Format(_)));
    }
}
