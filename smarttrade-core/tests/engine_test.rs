//! Golden tests for the signal engine — pinned end-to-end expectations for
//! known prices, including the degenerate inputs that must be rejected.

use smarttrade_core::domain::{Signal, Trend};
use smarttrade_core::engine::{analyze, AnalysisError};

fn assert_approx(actual: f64, expected: f64, eps: f64) {
    assert!(
        (actual - expected).abs() < eps,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn golden_price_100() {
    let r = analyze(100.0).unwrap();

    assert_eq!(r.seed, 0);
    assert_eq!(r.relative_strength_index, 30);
    // seed not > 50 → positive offset → reference above price
    assert_approx(r.reference_average, 101.5, 1e-9);
    assert_eq!(r.trend, Trend::Bearish);
    // rsi 30 is not above the SELL floor
    assert_eq!(r.signal, Signal::Hold);
    assert_eq!(r.confidence, 70);
    assert_approx(r.volatility, 1.5, 1e-9);
    assert_approx(r.stop_loss, 101.5, 1e-9);
    assert_approx(r.target, 97.0, 1e-9);
    assert_eq!(r.position_size, 666);
}

#[test]
fn golden_price_151() {
    let r = analyze(151.0).unwrap();

    assert_eq!(r.seed, 51);
    assert_eq!(r.relative_strength_index, 41);
    // seed > 50 → negative offset → reference below price
    assert_approx(r.reference_average, 148.735, 1e-9);
    assert_eq!(r.trend, Trend::Bullish);
    assert_eq!(r.signal, Signal::Buy);
    assert_eq!(r.confidence, 71);
    assert_approx(r.volatility, 2.265, 1e-9);
    assert_approx(r.stop_loss, 148.735, 1e-9);
    assert_approx(r.target, 155.53, 1e-9);
    assert_eq!(r.position_size, 441);
}

#[test]
fn zero_price_is_rejected_not_infinite() {
    // The naive formula divides by |price - stop|, which is zero here.
    assert_eq!(analyze(0.0), Err(AnalysisError::InvalidPrice(0.0)));
}

#[test]
fn repeated_calls_are_bit_identical() {
    for price in [0.07, 1.0, 99.99, 151.0, 2450.10, 1.0e9] {
        let first = analyze(price).unwrap();
        for _ in 0..5 {
            assert_eq!(analyze(price).unwrap(), first);
        }
    }
}

#[test]
fn result_survives_serialization() {
    let r = analyze(2450.10).unwrap();
    let json = serde_json::to_string(&r).unwrap();
    let deser: smarttrade_core::domain::AnalysisResult = serde_json::from_str(&json).unwrap();
    assert_eq!(r, deser);
}
