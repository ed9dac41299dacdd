//! Quote provider trait and structured error types.
//!
//! The QuoteProvider trait abstracts over quote sources so the TUI poller
//! and the CLI share one code path and tests can substitute a stub.

use thiserror::Error;

use crate::domain::{Quote, Ticker};

/// Structured error types for quote operations.
///
/// These are designed to be displayable in both CLI and TUI contexts.
#[derive(Debug, Error, Clone)]
pub enum QuoteError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider: {0}")]
    RateLimited(String),

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("no API key configured — set ALPHAVANTAGE_API_KEY or add api_key to config.toml")]
    MissingApiKey,

    #[error("hard stop: quote provider has blocked requests (circuit breaker tripped)")]
    CircuitBreakerTripped,

    #[error("quote error: {0}")]
    Other(String),
}

impl QuoteError {
    /// Coarse category label for the TUI error history.
    pub fn category(&self) -> &'static str {
        match self {
            QuoteError::NetworkUnreachable(_) => "network",
            QuoteError::RateLimited(_) | QuoteError::CircuitBreakerTripped => "throttle",
            QuoteError::ResponseFormatChanged(_)
            | QuoteError::SymbolNotFound { .. }
            | QuoteError::Other(_) => "data",
            QuoteError::MissingApiKey => "config",
        }
    }
}

/// Trait for quote sources.
///
/// Implementations handle the specifics of one vendor API; callers never see
/// wire formats, only `Quote` or a structured error.
pub trait QuoteProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch the latest quote for a ticker.
    fn fetch(&self, ticker: &Ticker) -> Result<Quote, QuoteError>;

    /// Check if the provider is currently available (not blocked).
    fn is_available(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_cover_every_variant() {
        assert_eq!(QuoteError::NetworkUnreachable("x".into()).category(), "network");
        assert_eq!(QuoteError::RateLimited("x".into()).category(), "throttle");
        assert_eq!(QuoteError::CircuitBreakerTripped.category(), "throttle");
        assert_eq!(
            QuoteError::SymbolNotFound { symbol: "X.NSE".into() }.category(),
            "data"
        );
        assert_eq!(QuoteError::MissingApiKey.category(), "config");
    }
}
