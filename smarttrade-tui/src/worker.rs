//! Background poller thread — the quote fetch loop runs here.
//!
//! The original page re-fetched inside a UI lifecycle hook keyed on the
//! symbol; here a timer loop delivers fresh observations over an `mpsc`
//! channel. The UI thread runs the analysis in its receive handler — the
//! poller never touches the engine and keeps no state between fetches
//! beyond which ticker it is watching.

use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use smarttrade_core::data::QuoteProvider;
use smarttrade_core::domain::{Quote, Ticker};

/// Commands sent from the TUI to the poller.
#[derive(Debug)]
pub enum WorkerCommand {
    /// Switch the watched ticker and fetch immediately.
    SetTicker(Ticker),
    /// Fetch now without waiting for the next tick.
    Refresh,
    /// Suspend or resume the timer-driven fetches.
    SetPaused(bool),
    Shutdown,
}

/// Responses sent from the poller back to the TUI.
#[derive(Debug, Clone)]
pub enum WorkerResponse {
    /// A fresh price observation for the watched ticker.
    Observation { ticker: Ticker, quote: Quote },
    /// A fetch failed; category matches `QuoteError::category`.
    FetchFailed {
        ticker: Ticker,
        category: String,
        message: String,
    },
}

/// Spawn the poller thread.
pub fn spawn_poller(
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
    provider: Arc<dyn QuoteProvider>,
    poll_interval: Duration,
) -> JoinHandle<()> {
    thread::Builder::new()
        .name("smarttrade-poller".into())
        .spawn(move || poller_loop(rx, tx, provider, poll_interval))
        .expect("failed to spawn poller thread")
}

fn poller_loop(
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
    provider: Arc<dyn QuoteProvider>,
    poll_interval: Duration,
) {
    let mut watched: Option<Ticker> = None;
    let mut paused = false;

    loop {
        match rx.recv_timeout(poll_interval) {
            Ok(WorkerCommand::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
            Ok(WorkerCommand::SetTicker(ticker)) => {
                watched = Some(ticker.clone());
                fetch_once(provider.as_ref(), &ticker, &tx);
            }
            Ok(WorkerCommand::Refresh) => {
                if let Some(ticker) = watched.clone() {
                    fetch_once(provider.as_ref(), &ticker, &tx);
                }
            }
            Ok(WorkerCommand::SetPaused(value)) => paused = value,
            Err(RecvTimeoutError::Timeout) => {
                if !paused {
                    if let Some(ticker) = watched.clone() {
                        fetch_once(provider.as_ref(), &ticker, &tx);
                    }
                }
            }
        }
    }
}

fn fetch_once(provider: &dyn QuoteProvider, ticker: &Ticker, tx: &Sender<WorkerResponse>) {
    match provider.fetch(ticker) {
        Ok(quote) => {
            let _ = tx.send(WorkerResponse::Observation {
                ticker: ticker.clone(),
                quote,
            });
        }
        Err(e) => {
            let _ = tx.send(WorkerResponse::FetchFailed {
                ticker: ticker.clone(),
                category: e.category().to_string(),
                message: e.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    use chrono::{NaiveDate, Utc};
    use smarttrade_core::data::QuoteError;

    /// Provider stub that answers from a fixed script, no network.
    struct StubProvider {
        fail: bool,
    }

    impl QuoteProvider for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }

        fn fetch(&self, ticker: &Ticker) -> Result<Quote, QuoteError> {
            if self.fail {
                return Err(QuoteError::SymbolNotFound {
                    symbol: ticker.query_symbol(),
                });
            }
            Ok(Quote {
                symbol: ticker.query_symbol(),
                price: 151.0,
                open: 150.0,
                high: 152.0,
                low: 149.5,
                previous_close: 150.5,
                change: 0.5,
                change_percent: 0.33,
                volume: 1_000,
                latest_trading_day: NaiveDate::from_ymd_opt(2024, 6, 14).unwrap(),
                fetched_at: Utc::now(),
            })
        }

        fn is_available(&self) -> bool {
            true
        }
    }

    fn start(fail: bool) -> (
        Sender<WorkerCommand>,
        Receiver<WorkerResponse>,
        JoinHandle<()>,
    ) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        let provider = Arc::new(StubProvider { fail });
        let handle = spawn_poller(cmd_rx, resp_tx, provider, Duration::from_secs(60));
        (cmd_tx, resp_rx, handle)
    }

    #[test]
    fn shutdown_joins_cleanly() {
        let (cmd_tx, _resp_rx, handle) = start(false);
        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().expect("poller should join cleanly");
    }

    #[test]
    fn set_ticker_fetches_immediately() {
        let (cmd_tx, resp_rx, handle) = start(false);
        let ticker = Ticker::parse("BSE:RELIANCE").unwrap();
        cmd_tx.send(WorkerCommand::SetTicker(ticker.clone())).unwrap();

        match resp_rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            WorkerResponse::Observation { ticker: t, quote } => {
                assert_eq!(t, ticker);
                assert_eq!(quote.symbol, "RELIANCE.BSE");
            }
            other => panic!("expected Observation, got {other:?}"),
        }

        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn fetch_failure_is_reported_with_category() {
        let (cmd_tx, resp_rx, handle) = start(true);
        let ticker = Ticker::parse("NSE:NOPE").unwrap();
        cmd_tx.send(WorkerCommand::SetTicker(ticker)).unwrap();

        match resp_rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            WorkerResponse::FetchFailed { category, message, .. } => {
                assert_eq!(category, "data");
                assert!(message.contains("NOPE.NSE"));
            }
            other => panic!("expected FetchFailed, got {other:?}"),
        }

        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn refresh_without_ticker_is_a_no_op() {
        let (cmd_tx, resp_rx, handle) = start(false);
        cmd_tx.send(WorkerCommand::Refresh).unwrap();
        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().unwrap();
        assert!(resp_rx.try_recv().is_err());
    }
}
