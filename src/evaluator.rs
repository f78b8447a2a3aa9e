//! Expression evaluator
//!
//! Reduces a tokenized expression to a single numeric value with a unit
//! classification, honoring standard operator precedence (`*` `/` before
//! `+` `-`, left-to-right within a level) and parenthesis grouping.
//!
//! Magnitude and data-size tokens bind as postfix multipliers of the
//! preceding operand (`500 million bytes`), and may also stand alone as
//! operands with an implied `1` (`million * 3`); recursive descent makes
//! both positions unambiguous. Every sub-expression carries its unit kind,
//! so mixing byte quantities with plain counts is rejected during
//! evaluation rather than silently coerced.
//!
//! # Examples
//!
//! ```
//! use napkin::evaluate;
//!
//! let eval = evaluate("2 + 3 * 4").unwrap();
//! assert_eq!(eval.value, 14.0);
//! assert!(!eval.is_byte_valued);
//!
//! let eval = evaluate("500 million / month").unwrap();
//! assert!(eval.had_time_divisor);
//! assert!((eval.value - 192.9).abs() < 0.1);
//! ```

use crate::error::ParseError;
use crate::tokenizer::{Token, split_time_divisor, tokenize};
use crate::types::Evaluation;
use tracing::debug;

/// Unit classification of a sub-expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UnitKind {
    /// Dimensionless count
    Count,
    /// Byte-valued quantity
    Bytes,
}

/// A partially evaluated sub-expression
#[derive(Debug, Clone, Copy)]
struct Quantity {
    value: f64,
    kind: UnitKind,
}

/// Evaluate an informal numeric expression
///
/// Applies magnitude words/suffixes and data-size units, evaluates the
/// arithmetic, and divides by the trailing time divisor when one is
/// present. The result value of a rate expression is normalized to
/// per-second.
///
/// # Errors
///
/// Returns a [`ParseError`] for unknown tokens, unbalanced parentheses,
/// division by a zero-valued sub-expression, or an expression that mixes
/// byte units with plain counts.
///
/// # Examples
///
/// ```
/// use napkin::evaluate;
///
/// let eval = evaluate("30 billion * 500 bytes").unwrap();
/// assert_eq!(eval.value, 1.5e13);
/// assert!(eval.is_byte_valued);
///
/// assert!(evaluate("500 million bytes + 3").is_err());
/// ```
pub fn evaluate(raw: &str) -> Result<Evaluation, ParseError> {
    let (body, divisor) = split_time_divisor(raw);
    if body.trim().is_empty() {
        return Err(ParseError::EmptyExpression);
    }

    let tokens = tokenize(body)?;
    let mut parser = Parser::new(&tokens);
    let quantity = parser.parse_expr()?;

    if let Some(leftover) = parser.peek() {
        return Err(match leftover {
            Token::RParen => ParseError::UnbalancedParens,
            other => ParseError::UnexpectedToken(other.to_string()),
        });
    }

    let mut value = quantity.value;
    if let Some(unit) = divisor {
        value /= unit.seconds();
    }

    let is_byte_valued = quantity.kind == UnitKind::Bytes;
    debug!(value, is_byte_valued, divisor = ?divisor, "evaluated expression");

    Ok(Evaluation {
        value,
        is_byte_valued,
        had_time_divisor: divisor.is_some(),
    })
}

/// Recursive-descent parser over the token stream
///
/// Grammar, loosest binding first:
/// ```text
/// expr    := term (('+' | '-') term)*
/// term    := unary (('*' | '/') unary)*
/// unary   := '-' unary | postfix
/// postfix := primary (scale | unit)*
/// primary := number | scale | unit | '(' expr ')'
/// ```
struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn parse_expr(&mut self) -> Result<Quantity, ParseError> {
        let mut lhs = self.parse_term()?;
        loop {
            let negate = match self.peek() {
                Some(Token::Plus) => false,
                Some(Token::Minus) => true,
                _ => break,
            };
            self.bump();
            let rhs = self.parse_term()?;
            if lhs.kind != rhs.kind {
                return Err(ParseError::MixedUnits);
            }
            lhs.value += if negate { -rhs.value } else { rhs.value };
        }
        Ok(lhs)
    }

    fn parse_term(&mut self) -> Result<Quantity, ParseError> {
        let mut lhs = self.parse_unary()?;
        loop {
            let divide = match self.peek() {
                Some(Token::Star) => false,
                Some(Token::Slash) => true,
                _ => break,
            };
            self.bump();
            let rhs = self.parse_unary()?;
            lhs = if divide {
                Self::divide(lhs, rhs)?
            } else {
                Self::multiply(lhs, rhs)?
            };
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Quantity, ParseError> {
        if matches!(self.peek(), Some(Token::Minus)) {
            self.bump();
            let operand = self.parse_unary()?;
            return Ok(Quantity {
                value: -operand.value,
                kind: operand.kind,
            });
        }
        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> Result<Quantity, ParseError> {
        let mut quantity = self.parse_primary()?;
        loop {
            match self.peek() {
                Some(&Token::Scale(magnitude)) => {
                    self.bump();
                    quantity.value *= magnitude.multiplier();
                }
                Some(&Token::Unit(unit)) => {
                    // a second data-size unit on one operand has no meaning
                    if quantity.kind == UnitKind::Bytes {
                        return Err(ParseError::MixedUnits);
                    }
                    self.bump();
                    quantity.value *= unit.multiplier();
                    quantity.kind = UnitKind::Bytes;
                }
                _ => break,
            }
        }
        Ok(quantity)
    }

    fn parse_primary(&mut self) -> Result<Quantity, ParseError> {
        match self.bump() {
            None => Err(ParseError::UnexpectedEnd),
            Some(Token::Number(n)) => Ok(Quantity {
                value: n,
                kind: UnitKind::Count,
            }),
            // bare magnitude word: implied 1
            Some(Token::Scale(magnitude)) => Ok(Quantity {
                value: magnitude.multiplier(),
                kind: UnitKind::Count,
            }),
            Some(Token::Unit(unit)) => Ok(Quantity {
                value: unit.multiplier(),
                kind: UnitKind::Bytes,
            }),
            Some(Token::LParen) => {
                let inner = self.parse_expr()?;
                match self.bump() {
                    Some(Token::RParen) => Ok(inner),
                    Some(other) => Err(ParseError::UnexpectedToken(other.to_string())),
                    None => Err(ParseError::UnbalancedParens),
                }
            }
            Some(Token::RParen) => Err(ParseError::UnbalancedParens),
            Some(other) => Err(ParseError::UnexpectedToken(other.to_string())),
        }
    }

    fn multiply(lhs: Quantity, rhs: Quantity) -> Result<Quantity, ParseError> {
        let kind = match (lhs.kind, rhs.kind) {
            (UnitKind::Count, UnitKind::Count) => UnitKind::Count,
            (UnitKind::Bytes, UnitKind::Count) | (UnitKind::Count, UnitKind::Bytes) => {
                UnitKind::Bytes
            }
            // bytes * bytes has no single unit classification
            (UnitKind::Bytes, UnitKind::Bytes) => return Err(ParseError::MixedUnits),
        };
        Ok(Quantity {
            value: lhs.value * rhs.value,
            kind,
        })
    }

    fn divide(lhs: Quantity, rhs: Quantity) -> Result<Quantity, ParseError> {
        if rhs.value == 0.0 {
            return Err(ParseError::DivisionByZero);
        }
        let kind = match (lhs.kind, rhs.kind) {
            (kind, UnitKind::Count) => kind,
            // a byte ratio cancels to a plain count
            (UnitKind::Bytes, UnitKind::Bytes) => UnitKind::Count,
            (UnitKind::Count, UnitKind::Bytes) => return Err(ParseError::MixedUnits),
        };
        Ok(Quantity {
            value: lhs.value / rhs.value,
            kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value_of(expr: &str) -> f64 {
        evaluate(expr).unwrap().value
    }

    #[test]
    fn test_precedence() {
        assert_eq!(value_of("2 + 3 * 4"), 14.0);
        assert_eq!(value_of("2 * 3 + 4"), 10.0);
        assert_eq!(value_of("(2 + 3) * 4"), 20.0);
        assert_eq!(value_of("100 - 10 - 5"), 85.0);
        assert_eq!(value_of("100 / 10 / 5"), 2.0);
    }

    #[test]
    fn test_unary_minus() {
        assert_eq!(value_of("-5"), -5.0);
        assert_eq!(value_of("10 * -2"), -20.0);
        assert_eq!(value_of("-(2 + 3)"), -5.0);
        assert_eq!(value_of("-5 million"), -5e6);
    }

    #[test]
    fn test_magnitude_words() {
        assert_eq!(value_of("500 million"), 5e8);
        assert_eq!(value_of("2 thousand"), 2e3);
        assert_eq!(value_of("3 trillion"), 3e12);
    }

    #[test]
    fn test_magnitude_suffixes() {
        assert_eq!(value_of("1.7B"), 1.7e9);
        assert_eq!(value_of("20K"), 2e4);
        assert_eq!(value_of("4M"), 4e6);
        assert_eq!(value_of("2T"), 2e12);
    }

    #[test]
    fn test_bare_magnitude_word() {
        assert_eq!(value_of("million"), 1e6);
        assert_eq!(value_of("2 * million"), 2e6);
        assert_eq!(value_of("billion / thousand"), 1e6);
    }

    #[test]
    fn test_byte_units() {
        let eval = evaluate("30 billion * 500 bytes").unwrap();
        assert_eq!(eval.value, 1.5e13);
        assert!(eval.is_byte_valued);

        let eval = evaluate("1.5 KB").unwrap();
        assert_eq!(eval.value, 1500.0);
        assert!(eval.is_byte_valued);

        let eval = evaluate("2 GB + 500 MB").unwrap();
        assert_eq!(eval.value, 2.5e9);
        assert!(eval.is_byte_valued);
    }

    #[test]
    fn test_byte_ratio_cancels() {
        let eval = evaluate("1 GB / 4 KB").unwrap();
        assert_eq!(eval.value, 250_000.0);
        assert!(!eval.is_byte_valued);
    }

    #[test]
    fn test_time_divisor() {
        let eval = evaluate("500 million / month").unwrap();
        assert!((eval.value - 5e8 / 2_592_000.0).abs() < 1e-9);
        assert!(eval.had_time_divisor);
        assert!(!eval.is_byte_valued);

        let eval = evaluate("10 MB / s").unwrap();
        assert_eq!(eval.value, 1e7);
        assert!(eval.is_byte_valued);
        assert!(eval.had_time_divisor);

        let eval = evaluate("86400 / day").unwrap();
        assert_eq!(eval.value, 1.0);
    }

    #[test]
    fn test_mixed_units_rejected() {
        assert_eq!(
            evaluate("500 million bytes + 3").unwrap_err(),
            ParseError::MixedUnits
        );
        assert_eq!(
            evaluate("1 KB * 2 KB").unwrap_err(),
            ParseError::MixedUnits
        );
        assert_eq!(evaluate("5 / 2 bytes").unwrap_err(), ParseError::MixedUnits);
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(evaluate("1/0").unwrap_err(), ParseError::DivisionByZero);
        assert_eq!(
            evaluate("5 / (2 - 2)").unwrap_err(),
            ParseError::DivisionByZero
        );
    }

    #[test]
    fn test_unbalanced_parens() {
        assert_eq!(
            evaluate("(2 + 3").unwrap_err(),
            ParseError::UnbalancedParens
        );
        assert_eq!(
            evaluate("2 + 3)").unwrap_err(),
            ParseError::UnbalancedParens
        );
    }

    #[test]
    fn test_empty_and_garbage() {
        assert_eq!(evaluate("").unwrap_err(), ParseError::EmptyExpression);
        assert_eq!(evaluate("   ").unwrap_err(), ParseError::EmptyExpression);
        assert_eq!(
            evaluate("2 + ").unwrap_err(),
            ParseError::UnexpectedEnd
        );
        assert_eq!(
            evaluate("2 3").unwrap_err(),
            ParseError::UnexpectedToken("3".to_string())
        );
        assert!(matches!(
            evaluate("hello world"),
            Err(ParseError::UnknownToken(_))
        ));
    }

    #[test]
    fn test_evaluation_is_pure() {
        let a = evaluate("20000 * 3600 * 24").unwrap();
        let b = evaluate("20000 * 3600 * 24").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.value, 1_728_000_000.0);
    }
}
