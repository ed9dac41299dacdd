//! Ticker — exchange-qualified symbol identity.
//!
//! Input form is `EXCH:CODE` (e.g. `BSE:RELIANCE`); a bare code defaults to
//! NSE. The quote API wants the code with an exchange suffix instead
//! (`RELIANCE.BSE`), which `query_symbol` produces.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Exchange venue for a ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Exchange {
    Bse,
    Nse,
}

impl Exchange {
    /// Prefix used in the `EXCH:CODE` input form.
    pub fn prefix(self) -> &'static str {
        match self {
            Exchange::Bse => "BSE",
            Exchange::Nse => "NSE",
        }
    }

    /// Suffix the quote API expects on the symbol.
    pub fn suffix(self) -> &'static str {
        match self {
            Exchange::Bse => ".BSE",
            Exchange::Nse => ".NSE",
        }
    }
}

/// Structured parse errors, displayable in both CLI and TUI contexts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TickerError {
    #[error("empty ticker")]
    Empty,

    #[error("unknown exchange '{0}' (expected BSE or NSE)")]
    UnknownExchange(String),
}

/// Exchange-qualified ticker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticker {
    pub exchange: Exchange,
    pub code: String,
}

impl Ticker {
    pub fn new(exchange: Exchange, code: impl Into<String>) -> Self {
        Self {
            exchange,
            code: code.into().to_ascii_uppercase(),
        }
    }

    /// Parse `EXCH:CODE` or a bare code (defaults to NSE).
    pub fn parse(input: &str) -> Result<Self, TickerError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(TickerError::Empty);
        }

        match input.split_once(':') {
            Some((venue, code)) => {
                let code = code.trim();
                if code.is_empty() {
                    return Err(TickerError::Empty);
                }
                let exchange = match venue.trim().to_ascii_uppercase().as_str() {
                    "BSE" => Exchange::Bse,
                    "NSE" => Exchange::Nse,
                    other => return Err(TickerError::UnknownExchange(other.to_string())),
                };
                Ok(Self::new(exchange, code))
            }
            None => Ok(Self::new(Exchange::Nse, input)),
        }
    }

    /// Symbol form the quote API expects, e.g. `RELIANCE.BSE`.
    pub fn query_symbol(&self) -> String {
        format!("{}{}", self.code, self.exchange.suffix())
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.exchange.prefix(), self.code)
    }
}

impl FromStr for Ticker {
    type Err = TickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
