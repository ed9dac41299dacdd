//! Analysis record — derived trading parameters for one price observation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Binary market bias classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Trend {
    Bullish,
    Bearish,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Bullish => write!(f, "BULLISH"),
            Trend::Bearish => write!(f, "BEARISH"),
        }
    }
}

/// Discrete trading recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl Signal {
    /// Check if the signal asks for directional action.
    pub fn is_actionable(&self) -> bool {
        matches!(self, Signal::Buy | Signal::Sell)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Buy => write!(f, "BUY"),
            Signal::Sell => write!(f, "SELL"),
            Signal::Hold => write!(f, "HOLD"),
        }
    }
}

/// Immutable record derived from exactly one price observation.
///
/// Recomputed in full on every new price; holds no display tokens — mapping
/// a signal to a color is the presentation layer's concern, which receives
/// the enum value across that boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// The price the record was derived from.
    pub price: f64,
    /// Integer part of the price, modulo 100. Drives every discrete field.
    pub seed: u32,
    /// Always in [30, 69].
    pub relative_strength_index: u32,
    pub reference_average: f64,
    pub trend: Trend,
    pub signal: Signal,
    /// Always in [70, 94].
    pub confidence: u32,
    pub volatility: f64,
    pub stop_loss: f64,
    pub target: f64,
    /// Units from a fixed risk budget divided by the stop distance.
    pub position_size: u64,
}

impl AnalysisResult {
    /// Stop distance used for position sizing.
    pub fn stop_distance(&self) -> f64 {
        (self.price - self.stop_loss).abs()
    }
}
