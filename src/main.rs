//! napkin - Back-of-the-envelope estimation calculator

use clap::Parser;
use colored::Colorize;
use is_terminal::IsTerminal;
use napkin::{
    cli::Cli,
    error::Result,
    evaluator::evaluate,
    formatter::{format_in_unit, format_quantity},
    output::{Estimate, get_formatter},
    types::RateUnit,
};
use std::io::BufRead;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging to stderr so stdout stays machine-readable.
    // --verbose overrides RUST_LOG.
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::new("napkin=debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if cli.no_color || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let expressions = match collect_expressions(&cli) {
        Ok(expressions) => expressions,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            return ExitCode::FAILURE;
        }
    };

    if expressions.is_empty() {
        eprintln!("{} no expressions to evaluate", "error:".red().bold());
        return ExitCode::FAILURE;
    }

    let mut estimates = Vec::new();
    let mut failures = 0usize;

    for expression in &expressions {
        match run_expression(expression, &cli) {
            Ok(estimate) => estimates.push(estimate),
            Err(e) => {
                failures += 1;
                eprintln!("{} {}: {}", "error:".red().bold(), expression.bold(), e);
            }
        }
    }

    print_estimates(&cli, &estimates);

    if failures > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Expressions come from arguments, or one per line from stdin when no
/// arguments were given. Blank lines and `#` comments are skipped.
fn collect_expressions(cli: &Cli) -> Result<Vec<String>> {
    if !cli.expressions.is_empty() {
        return Ok(cli.expressions.clone());
    }

    debug!("reading expressions from stdin");
    let mut expressions = Vec::new();
    for line in std::io::stdin().lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        expressions.push(trimmed.to_string());
    }
    Ok(expressions)
}

fn run_expression(expression: &str, cli: &Cli) -> Result<Estimate> {
    let eval = evaluate(expression)?;

    // A rate expression with no explicit selector still reads best as /s.
    let rate = if cli.rate == RateUnit::None && eval.had_time_divisor {
        RateUnit::PerSecond
    } else {
        cli.rate
    };

    let display = match cli.unit {
        Some(unit) => format_in_unit(eval.value, unit, rate)?,
        None => format_quantity(eval.value, eval.is_byte_valued, rate)?,
    };

    Ok(Estimate {
        expression: expression.to_string(),
        display,
        raw_value: eval.value,
        is_byte_valued: eval.is_byte_valued,
    })
}

fn print_estimates(cli: &Cli, estimates: &[Estimate]) {
    if estimates.is_empty() {
        return;
    }

    if cli.json {
        println!("{}", get_formatter(true).format_estimates(estimates));
    } else if cli.raw {
        for estimate in estimates {
            println!("{}", estimate.raw_value);
        }
    } else if estimates.len() == 1 {
        println!("{}", estimates[0].display.bold());
    } else {
        print!("{}", get_formatter(false).format_estimates(estimates));
    }
}
