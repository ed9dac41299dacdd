//! SmartTrade Core — domain types, signal engine, quote provider, configuration.
//!
//! This crate contains everything the terminal surfaces share:
//! - Domain types (tickers, quotes, analysis records)
//! - The pure price-to-signal engine
//! - The Alpha Vantage quote provider with retry and circuit breaker
//! - TOML configuration with environment overrides

pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
