//! Domain types shared by the engine, provider, and display surfaces.

pub mod analysis;
pub mod quote;
pub mod ticker;

pub use analysis::{AnalysisResult, Signal, Trend};
pub use quote::Quote;
pub use ticker::{Exchange, Ticker, TickerError};
