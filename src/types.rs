//! Core domain types for napkin
//!
//! This module contains the fundamental types used throughout the napkin
//! library: the byte-size and time units the evaluator understands, the rate
//! selector applied at format time, and the evaluation result passed from
//! evaluator to formatter.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Decimal magnitude word or suffix
///
/// The closed token table maps both word and one-letter suffix spellings,
/// case-insensitively: `thousand`/`K`, `million`/`M`, `billion`/`B`,
/// `trillion`/`T`. Suffix forms fuse to a preceding numeral (`1.7B`); word
/// forms stand alone as multiplier operands (`500 million`).
///
/// # Examples
/// ```
/// use napkin::types::Magnitude;
///
/// assert_eq!(Magnitude::from_token("billion"), Some(Magnitude::Billion));
/// assert_eq!(Magnitude::from_token("B"), Some(Magnitude::Billion));
/// assert_eq!(Magnitude::Billion.multiplier(), 1e9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Magnitude {
    /// 10^3
    Thousand,
    /// 10^6
    Million,
    /// 10^9
    Billion,
    /// 10^12
    Trillion,
}

/// Closed lookup table consulted during tokenization: token -> magnitude
static MAGNITUDE_TOKENS: Lazy<HashMap<&'static str, Magnitude>> = Lazy::new(|| {
    HashMap::from([
        ("thousand", Magnitude::Thousand),
        ("k", Magnitude::Thousand),
        ("million", Magnitude::Million),
        ("m", Magnitude::Million),
        ("billion", Magnitude::Billion),
        ("b", Magnitude::Billion),
        ("trillion", Magnitude::Trillion),
        ("t", Magnitude::Trillion),
    ])
});

impl Magnitude {
    /// Numeric multiplier
    pub fn multiplier(&self) -> f64 {
        match self {
            Magnitude::Thousand => 1e3,
            Magnitude::Million => 1e6,
            Magnitude::Billion => 1e9,
            Magnitude::Trillion => 1e12,
        }
    }

    /// Word spelling, used in error messages
    pub fn label(&self) -> &'static str {
        match self {
            Magnitude::Thousand => "thousand",
            Magnitude::Million => "million",
            Magnitude::Billion => "billion",
            Magnitude::Trillion => "trillion",
        }
    }

    /// Look up a magnitude from an expression token
    pub fn from_token(token: &str) -> Option<Self> {
        MAGNITUDE_TOKENS.get(token.to_lowercase().as_str()).copied()
    }
}

impl fmt::Display for Magnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Data-size unit on the decimal byte ladder
///
/// Multipliers are powers of 1000 starting at `bytes = 1`, matching how the
/// displayed units (`KB`, `MB`, ...) are conventionally read in capacity
/// estimates.
///
/// # Examples
/// ```
/// use napkin::types::ByteUnit;
///
/// assert_eq!(ByteUnit::Terabytes.multiplier(), 1e12);
/// assert_eq!(ByteUnit::Terabytes.label(), "TB");
/// assert_eq!("GB".parse::<ByteUnit>().unwrap(), ByteUnit::Gigabytes);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ByteUnit {
    /// 1 byte
    Bytes,
    /// 10^3 bytes
    Kilobytes,
    /// 10^6 bytes
    Megabytes,
    /// 10^9 bytes
    Gigabytes,
    /// 10^12 bytes
    Terabytes,
    /// 10^15 bytes
    Petabytes,
}

impl ByteUnit {
    /// Units from largest to smallest, the order the formatter walks
    pub const LADDER: [ByteUnit; 6] = [
        ByteUnit::Petabytes,
        ByteUnit::Terabytes,
        ByteUnit::Gigabytes,
        ByteUnit::Megabytes,
        ByteUnit::Kilobytes,
        ByteUnit::Bytes,
    ];

    /// Multiplier in bytes
    pub fn multiplier(&self) -> f64 {
        match self {
            ByteUnit::Bytes => 1.0,
            ByteUnit::Kilobytes => 1e3,
            ByteUnit::Megabytes => 1e6,
            ByteUnit::Gigabytes => 1e9,
            ByteUnit::Terabytes => 1e12,
            ByteUnit::Petabytes => 1e15,
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            ByteUnit::Bytes => "bytes",
            ByteUnit::Kilobytes => "KB",
            ByteUnit::Megabytes => "MB",
            ByteUnit::Gigabytes => "GB",
            ByteUnit::Terabytes => "TB",
            ByteUnit::Petabytes => "PB",
        }
    }

    /// Look up a unit from an expression token (case-insensitive, accepts
    /// long spellings and plurals)
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_lowercase().as_str() {
            "byte" | "bytes" => Some(ByteUnit::Bytes),
            "kb" | "kilobyte" | "kilobytes" => Some(ByteUnit::Kilobytes),
            "mb" | "megabyte" | "megabytes" => Some(ByteUnit::Megabytes),
            "gb" | "gigabyte" | "gigabytes" => Some(ByteUnit::Gigabytes),
            "tb" | "terabyte" | "terabytes" => Some(ByteUnit::Terabytes),
            "pb" | "petabyte" | "petabytes" => Some(ByteUnit::Petabytes),
            _ => None,
        }
    }
}

impl fmt::Display for ByteUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for ByteUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s).ok_or_else(|| format!("invalid byte unit: {s}"))
    }
}

/// Time unit for trailing divisors and rate selectors
///
/// Lengths are fixed conventions: month = 30 days, year = 365 days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeUnit {
    Second,
    Minute,
    Hour,
    Day,
    Month,
    Year,
}

impl TimeUnit {
    /// Length in seconds
    pub fn seconds(&self) -> f64 {
        match self {
            TimeUnit::Second => 1.0,
            TimeUnit::Minute => 60.0,
            TimeUnit::Hour => 3_600.0,
            TimeUnit::Day => 86_400.0,
            TimeUnit::Month => 2_592_000.0,
            TimeUnit::Year => 31_536_000.0,
        }
    }

    /// Look up a unit from an expression token (case-insensitive, accepts
    /// abbreviations and plurals)
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_lowercase().as_str() {
            "s" | "sec" | "second" | "seconds" => Some(TimeUnit::Second),
            "min" | "minute" | "minutes" => Some(TimeUnit::Minute),
            "hr" | "hour" | "hours" => Some(TimeUnit::Hour),
            "day" | "days" => Some(TimeUnit::Day),
            "month" | "months" => Some(TimeUnit::Month),
            "year" | "years" => Some(TimeUnit::Year),
            _ => None,
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimeUnit::Second => "second",
            TimeUnit::Minute => "minute",
            TimeUnit::Hour => "hour",
            TimeUnit::Day => "day",
            TimeUnit::Month => "month",
            TimeUnit::Year => "year",
        };
        write!(f, "{name}")
    }
}

/// Rate selector applied at format time
///
/// Orthogonal to any time divisor inside the expression itself: selecting a
/// rate divides the evaluated value by the selector's seconds-length and
/// appends the matching suffix to the formatted string.
///
/// # Examples
/// ```
/// use napkin::types::RateUnit;
///
/// assert_eq!("/s".parse::<RateUnit>().unwrap(), RateUnit::PerSecond);
/// assert_eq!("none".parse::<RateUnit>().unwrap(), RateUnit::None);
/// assert_eq!(RateUnit::PerMonth.suffix(), "/month");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateUnit {
    /// No rate conversion
    #[default]
    None,
    PerSecond,
    PerMinute,
    PerHour,
    PerDay,
    PerMonth,
    PerYear,
}

impl RateUnit {
    /// Seconds-length of the selected unit, or `None` when no rate is applied
    pub fn seconds(&self) -> Option<f64> {
        self.time_unit().map(|u| u.seconds())
    }

    /// The underlying time unit, if any
    pub fn time_unit(&self) -> Option<TimeUnit> {
        match self {
            RateUnit::None => None,
            RateUnit::PerSecond => Some(TimeUnit::Second),
            RateUnit::PerMinute => Some(TimeUnit::Minute),
            RateUnit::PerHour => Some(TimeUnit::Hour),
            RateUnit::PerDay => Some(TimeUnit::Day),
            RateUnit::PerMonth => Some(TimeUnit::Month),
            RateUnit::PerYear => Some(TimeUnit::Year),
        }
    }

    /// Suffix appended to the formatted magnitude (empty for `None`)
    pub fn suffix(&self) -> &'static str {
        match self {
            RateUnit::None => "",
            RateUnit::PerSecond => "/s",
            RateUnit::PerMinute => "/min",
            RateUnit::PerHour => "/hour",
            RateUnit::PerDay => "/day",
            RateUnit::PerMonth => "/month",
            RateUnit::PerYear => "/year",
        }
    }
}

impl fmt::Display for RateUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateUnit::None => write!(f, "none"),
            _ => write!(f, "{}", self.suffix()),
        }
    }
}

impl std::str::FromStr for RateUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(RateUnit::None),
            "/s" => Ok(RateUnit::PerSecond),
            "/min" => Ok(RateUnit::PerMinute),
            "/hour" => Ok(RateUnit::PerHour),
            "/day" => Ok(RateUnit::PerDay),
            "/month" => Ok(RateUnit::PerMonth),
            "/year" => Ok(RateUnit::PerYear),
            _ => Err(format!("invalid rate: {s}")),
        }
    }
}

/// Result of evaluating an expression
///
/// The sole artifact passed from evaluator to formatter. Each expression is
/// independently re-evaluable; nothing persists between calls.
///
/// # Examples
/// ```
/// use napkin::evaluate;
///
/// let eval = evaluate("30 billion * 500 bytes").unwrap();
/// assert_eq!(eval.value, 1.5e13);
/// assert!(eval.is_byte_valued);
/// assert!(!eval.had_time_divisor);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// The evaluated numeric value. When the expression ended in a time
    /// divisor this is already normalized to a per-second rate.
    pub value: f64,
    /// True when a data-size unit appeared anywhere in the expression
    pub is_byte_valued: bool,
    /// True when the expression ended in a `/ <time-word>` clause
    pub had_time_divisor: bool,
}
