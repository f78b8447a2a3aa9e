//! Output formatting module for napkin
//!
//! This module provides formatters for displaying batches of evaluated
//! estimates in different formats:
//! - Table format for human-readable terminal output
//! - JSON format for machine-readable output and integration with other tools
//!
//! # Examples
//!
//! ```
//! use napkin::output::{Estimate, get_formatter};
//!
//! let estimates = vec![Estimate {
//!     expression: "30 billion * 500 bytes".to_string(),
//!     display: "15 TB".to_string(),
//!     raw_value: 1.5e13,
//!     is_byte_valued: true,
//! }];
//!
//! // Table formatter for human-readable output
//! let formatter = get_formatter(false);
//! println!("{}", formatter.format_estimates(&estimates));
//!
//! // JSON formatter for machine-readable output
//! let json_formatter = get_formatter(true);
//! println!("{}", json_formatter.format_estimates(&estimates));
//! ```

use prettytable::{Table, format, row};
use serde::Serialize;
use serde_json::json;

/// One evaluated expression with its rendered result
#[derive(Debug, Clone, Serialize)]
pub struct Estimate {
    /// The raw expression as entered
    pub expression: String,
    /// Human-readable rendering
    pub display: String,
    /// Unformatted numeric value
    pub raw_value: f64,
    /// Whether a data-size unit appeared in the expression
    pub is_byte_valued: bool,
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format a batch of estimates
    fn format_estimates(&self, data: &[Estimate]) -> String;
}

/// Table formatter for human-readable output
///
/// Produces ASCII tables suitable for terminal display. Raw values are
/// shown with thousands separators when they are whole numbers.
pub struct TableFormatter;

impl TableFormatter {
    /// Format a number with thousands separators
    fn format_number(n: u64) -> String {
        let s = n.to_string();
        let mut result = String::new();

        for (count, ch) in s.chars().rev().enumerate() {
            if count > 0 && count % 3 == 0 {
                result.push(',');
            }
            result.push(ch);
        }

        result.chars().rev().collect()
    }

    /// Render a raw value: separators for exactly representable integers,
    /// plain float formatting otherwise
    fn format_raw(value: f64) -> String {
        if value.is_finite() && value.fract() == 0.0 && value.abs() < 9e15 {
            if value < 0.0 {
                format!("-{}", Self::format_number(-value as u64))
            } else {
                Self::format_number(value as u64)
            }
        } else {
            format!("{value}")
        }
    }
}

impl OutputFormatter for TableFormatter {
    fn format_estimates(&self, data: &[Estimate]) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(row![b -> "Expression", b -> "Result", b -> "Raw Value"]);

        for estimate in data {
            table.add_row(row![
                estimate.expression,
                estimate.display,
                r -> Self::format_raw(estimate.raw_value)
            ]);
        }

        table.to_string()
    }
}

/// JSON formatter for machine-readable output
///
/// Produces structured JSON that can be parsed by other tools or used in
/// automation pipelines.
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_estimates(&self, data: &[Estimate]) -> String {
        let output = json!({
            "estimates": data.iter().map(|e| json!({
                "expression": e.expression,
                "display": e.display,
                "raw_value": e.raw_value,
                "is_byte_valued": e.is_byte_valued,
            })).collect::<Vec<_>>()
        });

        serde_json::to_string_pretty(&output).unwrap()
    }
}

/// Get the appropriate formatter based on the JSON flag
pub fn get_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(TableFormatter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Estimate> {
        vec![
            Estimate {
                expression: "30 billion * 500 bytes".to_string(),
                display: "15 TB".to_string(),
                raw_value: 1.5e13,
                is_byte_valued: true,
            },
            Estimate {
                expression: "500 million / month".to_string(),
                display: "~193/s".to_string(),
                raw_value: 192.901_234_567_901_23,
                is_byte_valued: false,
            },
        ]
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(TableFormatter::format_number(0), "0");
        assert_eq!(TableFormatter::format_number(999), "999");
        assert_eq!(TableFormatter::format_number(1000), "1,000");
        assert_eq!(TableFormatter::format_number(1_728_000_000), "1,728,000,000");
    }

    #[test]
    fn test_raw_value_formatting() {
        assert_eq!(TableFormatter::format_raw(1.5e13), "15,000,000,000,000");
        assert_eq!(TableFormatter::format_raw(-42.0), "-42");
        assert_eq!(TableFormatter::format_raw(192.5), "192.5");
    }

    #[test]
    fn test_table_output() {
        let output = TableFormatter.format_estimates(&sample());
        assert!(output.contains("Expression"));
        assert!(output.contains("15 TB"));
        assert!(output.contains("~193/s"));
        assert!(output.contains("15,000,000,000,000"));
    }

    #[test]
    fn test_json_output() {
        let output = JsonFormatter.format_estimates(&sample());
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        let estimates = parsed["estimates"].as_array().unwrap();
        assert_eq!(estimates.len(), 2);
        assert_eq!(estimates[0]["display"], "15 TB");
        assert_eq!(estimates[0]["raw_value"], 1.5e13);
        assert_eq!(estimates[1]["is_byte_valued"], false);
    }

    #[test]
    fn test_get_formatter() {
        let table = get_formatter(false).format_estimates(&sample());
        assert!(table.contains('|'));
        let json = get_formatter(true).format_estimates(&sample());
        assert!(serde_json::from_str::<serde_json::Value>(&json).is_ok());
    }
}
