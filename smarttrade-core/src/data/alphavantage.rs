//! Alpha Vantage quote provider.
//!
//! Fetches the GLOBAL_QUOTE endpoint. Two quirks dominate the error
//! handling: every numeric field arrives as a JSON string, and throttling is
//! reported in-band as a `Note`/`Information` body with HTTP 200. An unknown
//! symbol comes back as an empty `Global Quote` object, also with HTTP 200.

use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use log::{debug, warn};
use serde::Deserialize;

use super::circuit_breaker::CircuitBreaker;
use super::provider::{QuoteError, QuoteProvider};
use crate::domain::{Quote, Ticker};

/// GLOBAL_QUOTE response envelope. Exactly one of the fields is populated.
#[derive(Debug, Deserialize)]
struct GlobalQuoteResponse {
    #[serde(rename = "Global Quote")]
    global_quote: Option<GlobalQuoteFields>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
}

/// The numbered string fields of a GLOBAL_QUOTE payload.
#[derive(Debug, Default, Deserialize)]
struct GlobalQuoteFields {
    #[serde(rename = "01. symbol")]
    symbol: Option<String>,
    #[serde(rename = "02. open")]
    open: Option<String>,
    #[serde(rename = "03. high")]
    high: Option<String>,
    #[serde(rename = "04. low")]
    low: Option<String>,
    #[serde(rename = "05. price")]
    price: Option<String>,
    #[serde(rename = "06. volume")]
    volume: Option<String>,
    #[serde(rename = "07. latest trading day")]
    latest_trading_day: Option<String>,
    #[serde(rename = "08. previous close")]
    previous_close: Option<String>,
    #[serde(rename = "09. change")]
    change: Option<String>,
    #[serde(rename = "10. change percent")]
    change_percent: Option<String>,
}

/// Alpha Vantage quote provider.
pub struct AlphaVantageProvider {
    client: reqwest::blocking::Client,
    api_key: Option<String>,
    circuit_breaker: Arc<CircuitBreaker>,
    max_retries: u32,
    base_delay: Duration,
}

impl AlphaVantageProvider {
    pub fn new(api_key: Option<String>, circuit_breaker: Arc<CircuitBreaker>) -> Self {
        Self::with_timeout(api_key, circuit_breaker, Duration::from_secs(30))
    }

    pub fn with_timeout(
        api_key: Option<String>,
        circuit_breaker: Arc<CircuitBreaker>,
        timeout: Duration,
    ) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("smarttrade/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            api_key: api_key.filter(|k| !k.is_empty()),
            circuit_breaker,
            max_retries: 2,
            base_delay: Duration::from_millis(500),
        }
    }

    /// Build the GLOBAL_QUOTE URL for a ticker.
    fn quote_url(&self, ticker: &Ticker, api_key: &str) -> String {
        format!(
            "https://www.alphavantage.co/query?function=GLOBAL_QUOTE\
             &symbol={}&apikey={api_key}",
            ticker.query_symbol()
        )
    }

    /// Map a response envelope into a Quote or a structured error.
    fn parse_response(
        ticker: &Ticker,
        resp: GlobalQuoteResponse,
    ) -> Result<Quote, QuoteError> {
        // Throttle notices take priority: they come with HTTP 200 and no
        // quote body.
        if let Some(msg) = resp.note.or(resp.information) {
            return Err(QuoteError::RateLimited(msg));
        }
        if resp.error_message.is_some() {
            return Err(QuoteError::SymbolNotFound {
                symbol: ticker.query_symbol(),
            });
        }

        let fields = resp.global_quote.ok_or_else(|| {
            QuoteError::ResponseFormatChanged("no 'Global Quote' object".into())
        })?;

        // An unknown symbol is an empty object, not an error body.
        if fields.price.is_none() {
            return Err(QuoteError::SymbolNotFound {
                symbol: ticker.query_symbol(),
            });
        }

        let day = fields
            .latest_trading_day
            .as_deref()
            .ok_or_else(|| QuoteError::ResponseFormatChanged("no latest trading day".into()))?;
        let latest_trading_day = NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|e| {
            QuoteError::ResponseFormatChanged(format!("bad trading day '{day}': {e}"))
        })?;

        Ok(Quote {
            symbol: fields
                .symbol
                .unwrap_or_else(|| ticker.query_symbol()),
            price: parse_decimal("price", fields.price.as_deref())?,
            open: parse_decimal("open", fields.open.as_deref())?,
            high: parse_decimal("high", fields.high.as_deref())?,
            low: parse_decimal("low", fields.low.as_deref())?,
            previous_close: parse_decimal("previous close", fields.previous_close.as_deref())?,
            change: parse_decimal("change", fields.change.as_deref())?,
            change_percent: parse_decimal(
                "change percent",
                fields.change_percent.as_deref().map(|s| s.trim_end_matches('%')),
            )?,
            volume: parse_volume(fields.volume.as_deref())?,
            latest_trading_day,
            fetched_at: Utc::now(),
        })
    }

    /// Execute the HTTP request with retry and circuit breaker logic.
    fn fetch_with_retry(&self, ticker: &Ticker) -> Result<Quote, QuoteError> {
        let api_key = self.api_key.as_deref().ok_or(QuoteError::MissingApiKey)?;

        if !self.circuit_breaker.is_allowed() {
            return Err(QuoteError::CircuitBreakerTripped);
        }

        let url = self.quote_url(ticker, api_key);
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.base_delay * 2u32.pow(attempt - 1);
                debug!("retrying {ticker} after {delay:?} (attempt {attempt})");
                std::thread::sleep(delay);

                if !self.circuit_breaker.is_allowed() {
                    return Err(QuoteError::CircuitBreakerTripped);
                }
            }

            match self.client.get(&url).send() {
                Ok(resp) => {
                    let status = resp.status();

                    if !status.is_success() {
                        self.circuit_breaker.record_failure();
                        warn!("quote request for {ticker} failed: HTTP {status}");
                        last_error = Some(QuoteError::Other(format!("HTTP {status} for {ticker}")));
                        continue;
                    }

                    let envelope: GlobalQuoteResponse = resp.json().map_err(|e| {
                        QuoteError::ResponseFormatChanged(format!(
                            "failed to parse response for {ticker}: {e}"
                        ))
                    })?;

                    return match Self::parse_response(ticker, envelope) {
                        Ok(quote) => {
                            self.circuit_breaker.record_success();
                            Ok(quote)
                        }
                        Err(err @ QuoteError::RateLimited(_)) => {
                            // Retrying inside the per-minute window cannot
                            // succeed; count the failure and surface it.
                            self.circuit_breaker.record_failure();
                            warn!("quote provider throttled: {err}");
                            Err(err)
                        }
                        Err(other) => Err(other),
                    };
                }
                Err(e) => {
                    if e.is_connect() || e.is_timeout() {
                        debug!("network error for {ticker}: {e}");
                        last_error = Some(QuoteError::NetworkUnreachable(e.to_string()));
                        continue;
                    }
                    return Err(QuoteError::NetworkUnreachable(e.to_string()));
                }
            }
        }

        Err(last_error.unwrap_or_else(|| QuoteError::Other("max retries exceeded".into())))
    }
}

fn parse_decimal(field: &str, value: Option<&str>) -> Result<f64, QuoteError> {
    let raw = value
        .ok_or_else(|| QuoteError::ResponseFormatChanged(format!("missing field '{field}'")))?;
    raw.trim().parse::<f64>().map_err(|_| {
        QuoteError::ResponseFormatChanged(format!("field '{field}' is not numeric: '{raw}'"))
    })
}

fn parse_volume(value: Option<&str>) -> Result<u64, QuoteError> {
    let raw = value
        .ok_or_else(|| QuoteError::ResponseFormatChanged("missing field 'volume'".into()))?;
    raw.trim().parse::<u64>().map_err(|_| {
        QuoteError::ResponseFormatChanged(format!("field 'volume' is not an integer: '{raw}'"))
    })
}

impl QuoteProvider for AlphaVantageProvider {
    fn name(&self) -> &str {
        "alpha_vantage"
    }

    fn fetch(&self, ticker: &Ticker) -> Result<Quote, QuoteError> {
        self.fetch_with_retry(ticker)
    }

    fn is_available(&self) -> bool {
        self.circuit_breaker.is_allowed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticker() -> Ticker {
        Ticker::parse("BSE:RELIANCE").unwrap()
    }

    fn parse(body: &str) -> Result<Quote, QuoteError> {
        let envelope: GlobalQuoteResponse = serde_json::from_str(body).unwrap();
        AlphaVantageProvider::parse_response(&ticker(), envelope)
    }

    #[test]
    fn parses_full_quote() {
        let quote = parse(
            r#"{
                "Global Quote": {
                    "01. symbol": "RELIANCE.BSE",
                    "02. open": "2440.0000",
                    "03. high": "2462.5500",
                    "04. low": "2431.2000",
                    "05. price": "2450.1000",
                    "06. volume": "412385",
                    "07. latest trading day": "2024-06-14",
                    "08. previous close": "2444.8500",
                    "09. change": "5.2500",
                    "10. change percent": "0.2147%"
                }
            }"#,
        )
        .unwrap();

        assert_eq!(quote.symbol, "RELIANCE.BSE");
        assert!((quote.price - 2450.10).abs() < 1e-9);
        assert!((quote.change_percent - 0.2147).abs() < 1e-9);
        assert_eq!(quote.volume, 412_385);
        assert_eq!(
            quote.latest_trading_day,
            NaiveDate::from_ymd_opt(2024, 6, 14).unwrap()
        );
    }

    #[test]
    fn note_body_means_rate_limited() {
        let err = parse(r#"{"Note": "Thank you for using Alpha Vantage!"}"#).unwrap_err();
        assert!(matches!(err, QuoteError::RateLimited(_)));
    }

    #[test]
    fn information_body_means_rate_limited() {
        let err = parse(r#"{"Information": "25 requests per day"}"#).unwrap_err();
        assert!(matches!(err, QuoteError::RateLimited(_)));
    }

    #[test]
    fn empty_quote_object_means_unknown_symbol() {
        let err = parse(r#"{"Global Quote": {}}"#).unwrap_err();
        assert!(matches!(err, QuoteError::SymbolNotFound { .. }));
    }

    #[test]
    fn error_message_body_means_unknown_symbol() {
        let err = parse(r#"{"Error Message": "Invalid API call."}"#).unwrap_err();
        assert!(matches!(err, QuoteError::SymbolNotFound { .. }));
    }

    #[test]
    fn garbage_numeric_field_is_format_error() {
        let err = parse(
            r#"{
                "Global Quote": {
                    "05. price": "not-a-number",
                    "07. latest trading day": "2024-06-14"
                }
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, QuoteError::ResponseFormatChanged(_)));
    }

    #[test]
    fn missing_key_fails_before_any_request() {
        let cb = Arc::new(CircuitBreaker::default_provider());
        let provider = AlphaVantageProvider::new(None, cb);
        let err = provider.fetch(&ticker()).unwrap_err();
        assert!(matches!(err, QuoteError::MissingApiKey));
    }

    #[test]
    fn tripped_breaker_blocks_fetch() {
        let cb = Arc::new(CircuitBreaker::default_provider());
        cb.trip();
        let provider = AlphaVantageProvider::new(Some("demo".into()), cb);
        let err = provider.fetch(&ticker()).unwrap_err();
        assert!(matches!(err, QuoteError::CircuitBreakerTripped));
        assert!(!provider.is_available());
    }
}
