//! Quote fetching — provider trait, Alpha Vantage client, circuit breaker.

pub mod alphavantage;
pub mod circuit_breaker;
pub mod provider;

pub use alphavantage::AlphaVantageProvider;
pub use circuit_breaker::{BreakerState, CircuitBreaker};
pub use provider::{QuoteError, QuoteProvider};
