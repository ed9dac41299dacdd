//! Quote — the latest exchange quote for a single symbol.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Latest traded quote, received fresh on every fetch and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Exchange-suffixed symbol as reported by the provider.
    pub symbol: String,
    pub price: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub previous_close: f64,
    pub change: f64,
    /// Day change as a percentage (e.g. 1.25 for +1.25%).
    pub change_percent: f64,
    pub volume: u64,
    pub latest_trading_day: NaiveDate,
    pub fetched_at: DateTime<Utc>,
}

impl Quote {
    /// Basic sanity check: positive price inside the day's range.
    ///
    /// Providers occasionally ship partial rows around the open; callers
    /// treat an insane quote as a data-quality warning, not a hard error.
    pub fn is_sane(&self) -> bool {
        self.price.is_finite()
            && self.price > 0.0
            && self.high >= self.low
            && self.high >= self.price
            && self.low <= self.price
    }
}
