//! Integration tests for napkin
//!
//! End-to-end scenarios driving the evaluator and formatter together, the
//! way the CLI does.

use napkin::{ByteUnit, ParseError, RateUnit, evaluate, format_in_unit, format_quantity};

/// Evaluate an expression and render it, propagating the byte flag
fn render(expr: &str, rate: RateUnit) -> String {
    let eval = evaluate(expr).unwrap();
    format_quantity(eval.value, eval.is_byte_valued, rate).unwrap()
}

#[test]
fn test_arithmetic_precedence() {
    let eval = evaluate("2 + 3 * 4").unwrap();
    assert_eq!(eval.value, 14.0);
    assert!(!eval.is_byte_valued);
}

#[test]
fn test_magnitude_expansion() {
    assert_eq!(evaluate("500 million").unwrap().value, 5e8);
    assert_eq!(evaluate("1.7B").unwrap().value, 1.7e9);
    assert_eq!(evaluate("20K").unwrap().value, 2e4);
}

#[test]
fn test_byte_detection_is_contagious() {
    let eval = evaluate("30 billion * 500 bytes").unwrap();
    assert!(eval.is_byte_valued);
    assert_eq!(eval.value, 1.5e13);

    // the unit may appear on either operand
    let eval = evaluate("500 bytes * 30 billion").unwrap();
    assert!(eval.is_byte_valued);
    assert_eq!(eval.value, 1.5e13);
}

#[test]
fn test_rate_is_orthogonal_to_embedded_divisor() {
    let eval = evaluate("500 million / month").unwrap();
    assert!(eval.had_time_divisor);
    let display = format_quantity(eval.value, false, RateUnit::PerSecond).unwrap();
    assert_eq!(display, "~193/s");
}

#[test]
fn test_formatter_ladder_selection() {
    assert_eq!(
        format_quantity(1.5e13, true, RateUnit::None).unwrap(),
        "15 TB"
    );
    assert_eq!(
        format_quantity(2.5e11, true, RateUnit::None).unwrap(),
        "250 GB"
    );
}

#[test]
fn test_daily_event_volume_scenario() {
    // 20K events/sec sustained for a day
    let eval = evaluate("20000 * 3600 * 24").unwrap();
    assert_eq!(eval.value, 1_728_000_000.0);
    let display = format_quantity(eval.value, eval.is_byte_valued, RateUnit::None).unwrap();
    assert_eq!(display, "~1.7 billion");
}

#[test]
fn test_storage_estimate_scenario() {
    // 30B records at 500 bytes each
    assert_eq!(render("30 billion * 500 bytes", RateUnit::None), "15 TB");
    // per-user quota across a fleet
    assert_eq!(render("100 KB * 2.5 million", RateUnit::None), "250 GB");
}

#[test]
fn test_bandwidth_scenario() {
    // byte-valued rate expressions keep their unit through the rate suffix
    assert_eq!(render("10 MB / s", RateUnit::PerSecond), "10 MB/s");
    assert_eq!(render("1 GB / hour", RateUnit::PerHour), "~77 bytes/hour");
}

#[test]
fn test_round_trip_stability() {
    let eval = evaluate("500 million / month").unwrap();
    let first = format_quantity(eval.value, eval.is_byte_valued, RateUnit::PerSecond).unwrap();
    let second = format_quantity(eval.value, eval.is_byte_valued, RateUnit::PerSecond).unwrap();
    assert_eq!(first, second);

    let again = evaluate("500 million / month").unwrap();
    assert_eq!(eval, again);
}

#[test]
fn test_forced_unit_override() {
    assert_eq!(
        format_in_unit(1.5e13, ByteUnit::Gigabytes, RateUnit::None).unwrap(),
        "15000 GB"
    );
    assert_eq!(
        format_in_unit(1.5e13, ByteUnit::Petabytes, RateUnit::None).unwrap(),
        "~0 PB"
    );
}

#[test]
fn test_error_cases() {
    assert_eq!(
        evaluate("500 million bytes + 3").unwrap_err(),
        ParseError::MixedUnits
    );
    assert_eq!(evaluate("1/0").unwrap_err(), ParseError::DivisionByZero);
    assert!(format_quantity(-5.0, true, RateUnit::None).is_err());
}
