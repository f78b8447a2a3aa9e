//! napkin - Back-of-the-envelope estimation calculator
//!
//! This library provides functionality to:
//! - Parse informal numeric expressions mixing arithmetic, magnitude words
//!   and suffixes (thousand/K through trillion/T), data-size units (bytes
//!   through PB), and trailing time divisors (/second through /year)
//! - Render evaluated values in the most readable unit, optionally
//!   re-expressed as a rate per a chosen time unit
//! - Format batches of results as terminal tables or JSON
//!
//! Both entry points are pure functions: no shared state, no I/O, safe to
//! call concurrently from any number of threads.
//!
//! # Examples
//!
//! ```
//! use napkin::{RateUnit, evaluate, format_quantity};
//!
//! let eval = evaluate("30 billion * 500 bytes")?;
//! assert_eq!(eval.value, 1.5e13);
//! assert!(eval.is_byte_valued);
//!
//! let display = format_quantity(eval.value, eval.is_byte_valued, RateUnit::None)?;
//! assert_eq!(display, "15 TB");
//! # Ok::<(), napkin::NapkinError>(())
//! ```

pub mod cli;
pub mod error;
pub mod evaluator;
pub mod formatter;
pub mod output;
pub mod tokenizer;
pub mod types;

// Re-export commonly used items
pub use error::{FormatError, NapkinError, ParseError, Result};
pub use evaluator::evaluate;
pub use formatter::{format_in_unit, format_quantity};
pub use types::{ByteUnit, Evaluation, Magnitude, RateUnit, TimeUnit};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
