//! Result formatting module for napkin
//!
//! Renders an evaluated value back into the most human-readable form:
//! byte-valued quantities walk the byte ladder (`bytes` through `PB`),
//! plain counts walk the magnitude ladder (`K`, `million`, `billion`,
//! `trillion`), and both pick the largest unit where the scaled magnitude
//! is at least 1. A `~` prefix marks renderings that lose more than the
//! fixed rounding tolerance.
//!
//! # Examples
//!
//! ```
//! use napkin::{format_quantity, RateUnit};
//!
//! assert_eq!(format_quantity(1.5e13, true, RateUnit::None).unwrap(), "15 TB");
//! assert_eq!(format_quantity(2e4, false, RateUnit::PerSecond).unwrap(), "20K/s");
//! assert_eq!(format_quantity(1.728e9, false, RateUnit::None).unwrap(), "~1.7 billion");
//! ```

use crate::error::FormatError;
use crate::types::{ByteUnit, RateUnit};

/// Magnitude ladder steps from largest to smallest: multiplier and label.
/// Thousands abbreviate to `K`; million and up display as words.
const COUNT_LADDER: [(f64, &str); 4] = [
    (1e12, "trillion"),
    (1e9, "billion"),
    (1e6, "million"),
    (1e3, "K"),
];

/// Relative distance to the nearest integer below which the rendering
/// snaps to that integer (with a `~` marker)
const SNAP_TOLERANCE: f64 = 0.05;

/// Absolute distance to the nearest integer below which the rendering
/// counts as exact (no marker)
const EXACT_TOLERANCE: f64 = 0.01;

/// Format a value in the most readable unit
///
/// Selecting a rate divides the value by the selector's seconds-length and
/// appends the matching suffix directly after the magnitude.
///
/// # Errors
///
/// Returns [`FormatError::NegativeByteValue`] for a negative byte-valued
/// quantity; byte sizes are non-negative by definition.
///
/// # Examples
///
/// ```
/// use napkin::{format_quantity, RateUnit};
///
/// assert_eq!(format_quantity(5e10, false, RateUnit::None).unwrap(), "50 billion");
/// assert_eq!(format_quantity(2.5e11, true, RateUnit::None).unwrap(), "250 GB");
/// assert!(format_quantity(-5.0, true, RateUnit::None).is_err());
/// ```
pub fn format_quantity(
    value: f64,
    is_byte_valued: bool,
    rate: RateUnit,
) -> Result<String, FormatError> {
    if is_byte_valued && value < 0.0 {
        return Err(FormatError::NegativeByteValue(value));
    }

    let (value, suffix) = apply_rate(value, rate);
    if !value.is_finite() {
        return Ok(format!("{value}{suffix}"));
    }

    Ok(if is_byte_valued {
        format_bytes(value, suffix)
    } else {
        format_count(value, suffix)
    })
}

/// Format a value forced into a specific byte unit, skipping the ladder
///
/// The value is taken as bytes regardless of how the expression was
/// classified, matching the behavior of an explicit unit override.
///
/// # Examples
///
/// ```
/// use napkin::{format_in_unit, ByteUnit, RateUnit};
///
/// assert_eq!(
///     format_in_unit(1.5e13, ByteUnit::Gigabytes, RateUnit::None).unwrap(),
///     "15000 GB"
/// );
/// ```
pub fn format_in_unit(
    value: f64,
    unit: ByteUnit,
    rate: RateUnit,
) -> Result<String, FormatError> {
    if value < 0.0 {
        return Err(FormatError::NegativeByteValue(value));
    }

    let (value, suffix) = apply_rate(value, rate);
    if !value.is_finite() {
        return Ok(format!("{value} {}{suffix}", unit.label()));
    }

    Ok(format!(
        "{} {}{}",
        render_magnitude(value / unit.multiplier()),
        unit.label(),
        suffix
    ))
}

fn apply_rate(value: f64, rate: RateUnit) -> (f64, &'static str) {
    match rate.seconds() {
        Some(seconds) => (value / seconds, rate.suffix()),
        None => (value, ""),
    }
}

fn format_bytes(value: f64, rate_suffix: &str) -> String {
    let abs = value.abs();
    let unit = ByteUnit::LADDER
        .into_iter()
        .find(|u| abs >= u.multiplier())
        .unwrap_or(ByteUnit::Bytes);
    format!(
        "{} {}{}",
        render_magnitude(value / unit.multiplier()),
        unit.label(),
        rate_suffix
    )
}

fn format_count(value: f64, rate_suffix: &str) -> String {
    let abs = value.abs();
    for (step, label) in COUNT_LADDER {
        if abs >= step {
            // no space before the one-letter K, one space before words
            let sep = if label.len() <= 1 { "" } else { " " };
            return format!(
                "{}{}{}{}",
                render_magnitude(value / step),
                sep,
                label,
                rate_suffix
            );
        }
    }
    format!("{}{}", render_magnitude(value), rate_suffix)
}

/// Render a scaled magnitude: `15`, `100`, `~193`, `~1.7`
///
/// Within [`EXACT_TOLERANCE`] of an integer the rendering is that integer,
/// exact. Within [`SNAP_TOLERANCE`] relative of a nonzero integer it snaps
/// to `~<integer>`. Everything else renders to one decimal place behind a
/// `~`, with a trailing `.0` trimmed.
fn render_magnitude(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    let nearest = value.round();
    if nearest != 0.0 && ((value - nearest) / nearest).abs() < SNAP_TOLERANCE {
        if (value - nearest).abs() < EXACT_TOLERANCE {
            return format!("{nearest:.0}");
        }
        return format!("~{nearest:.0}");
    }

    let rounded = (value * 10.0).round() / 10.0;
    if rounded == rounded.trunc() {
        format!("~{rounded:.0}")
    } else {
        format!("~{rounded:.1}")
    }
}
