//! CLI interface for napkin
//!
//! This module defines the command-line interface using clap. The binary is
//! batch-only: every expression is evaluated independently and the process
//! exits, so results stay easy to pipe and script against.
//!
//! # Example
//!
//! ```bash
//! # Evaluate one expression
//! napkin "30 billion * 500 bytes"
//!
//! # Re-express as a per-second rate
//! napkin --rate /s "500 million / month"
//!
//! # Machine-readable batch over stdin
//! cat expressions.txt | napkin --json
//! ```

use crate::types::{ByteUnit, RateUnit};
use clap::Parser;

/// Back-of-the-envelope estimation calculator
///
/// Evaluates informal expressions like "30 billion * 500 bytes" or
/// "500 million / month" and prints the most readable rendering.
#[derive(Parser, Debug, Clone)]
#[command(name = "napkin")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Expressions to evaluate; reads one per line from stdin when omitted
    pub expressions: Vec<String>,

    /// Re-express the result as a rate (/s, /min, /hour, /day, /month, /year)
    #[arg(long, short = 'r', default_value = "none")]
    pub rate: RateUnit,

    /// Force a byte unit (bytes, KB, MB, GB, TB, PB) instead of auto-selecting
    #[arg(long, short = 'u')]
    pub unit: Option<ByteUnit>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Print only the raw numeric value
    #[arg(long, conflicts_with = "json")]
    pub raw: bool,

    /// Show debug output (default is quiet mode with only warnings and errors)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["napkin", "2 + 2"]);
        assert_eq!(cli.expressions, vec!["2 + 2"]);
        assert_eq!(cli.rate, RateUnit::None);
        assert_eq!(cli.unit, None);
        assert!(!cli.json);
        assert!(!cli.raw);
    }

    #[test]
    fn test_cli_rate_and_unit() {
        let cli = Cli::parse_from(["napkin", "--rate", "/s", "--unit", "GB", "1e10 bytes"]);
        assert_eq!(cli.rate, RateUnit::PerSecond);
        assert_eq!(cli.unit, Some(ByteUnit::Gigabytes));
    }

    #[test]
    fn test_cli_rejects_bad_rate() {
        assert!(Cli::try_parse_from(["napkin", "--rate", "/fortnight", "1"]).is_err());
    }
}
