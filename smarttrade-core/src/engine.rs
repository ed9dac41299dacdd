//! Signal engine — the pure price-to-analysis transformation.
//!
//! One deterministic, stateless mapping from the latest traded price to a
//! full `AnalysisResult`. No I/O, nothing retained between calls; the caller
//! invokes it synchronously once per price observation.
//!
//! The whole construction is seeded from the price's integer digits rather
//! than any volume or time-series history — a placeholder scoring function,
//! not a technical-analysis algorithm.

use thiserror::Error;

use crate::domain::{AnalysisResult, Signal, Trend};

/// Fixed risk budget; divided by the stop distance to size a position.
pub const RISK_BUDGET: f64 = 1_000.0;

/// Fractional offset used for both the reference average and the
/// volatility estimate.
const VOLATILITY_FACTOR: f64 = 0.015;

/// A bullish trend with RSI below this issues BUY.
const BUY_RSI_CEILING: u32 = 45;

/// A bearish trend with RSI above this issues SELL.
const SELL_RSI_FLOOR: u32 = 55;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalysisError {
    /// Price must be finite and strictly positive.
    #[error("invalid price {0}: must be a positive finite number")]
    InvalidPrice(f64),

    /// The stop distance collapsed to zero, so position sizing would
    /// divide by zero.
    #[error("stop distance is zero at price {0}: cannot size a position")]
    ZeroStopDistance(f64),
}

/// Compute the full analysis record for a single price observation.
///
/// Repeated calls with the same input yield bit-identical output. Invalid
/// input is rejected up front rather than letting `NaN` or `Infinity`
/// propagate into the position size.
pub fn analyze(price: f64) -> Result<AnalysisResult, AnalysisError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(AnalysisError::InvalidPrice(price));
    }

    // floor(price) mod 100 — f64 remainder is exact, so this is stable
    // for arbitrarily large prices.
    let seed = (price.floor() % 100.0) as u32;
    let relative_strength_index = (seed % 40) + 30;

    let offset = if seed > 50 {
        -VOLATILITY_FACTOR
    } else {
        VOLATILITY_FACTOR
    };
    let reference_average = price * (1.0 + offset);

    let trend = if price > reference_average {
        Trend::Bullish
    } else {
        Trend::Bearish
    };

    let signal = match trend {
        Trend::Bullish if relative_strength_index < BUY_RSI_CEILING => Signal::Buy,
        Trend::Bearish if relative_strength_index > SELL_RSI_FLOOR => Signal::Sell,
        _ => Signal::Hold,
    };

    let confidence = 70 + (seed % 25);
    let volatility = price * VOLATILITY_FACTOR;

    let (stop_loss, target) = match trend {
        Trend::Bullish => (price - volatility, price + 2.0 * volatility),
        Trend::Bearish => (price + volatility, price - 2.0 * volatility),
    };

    let stop_distance = (price - stop_loss).abs();
    if stop_distance == 0.0 {
        // Subnormal prices can underflow the volatility to zero; refuse to
        // produce an infinite position size.
        return Err(AnalysisError::ZeroStopDistance(price));
    }
    let position_size = (RISK_BUDGET / stop_distance).floor() as u64;

    Ok(AnalysisResult {
        price,
        seed,
        relative_strength_index,
        reference_average,
        trend,
        signal,
        confidence,
        volatility,
        stop_loss,
        target,
        position_size,
    })
}
