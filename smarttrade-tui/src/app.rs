//! Application state — single-owner, main-thread only.
//!
//! All TUI state lives here. The poller thread communicates via channels,
//! and the signal analysis runs synchronously inside the observation
//! handler on this thread.

use std::collections::VecDeque;
use std::sync::mpsc::{Receiver, Sender};

use chrono::{DateTime, Local, NaiveDateTime};

use smarttrade_core::config::AppConfig;
use smarttrade_core::domain::{AnalysisResult, Quote, Ticker};
use smarttrade_core::engine;

use crate::worker::{WorkerCommand, WorkerResponse};

/// Cap on the session price history used by the chart panel.
const HISTORY_CAP: usize = 500;

/// Cap on the error history overlay.
const ERROR_CAP: usize = 50;

/// Which panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Terminal,
    Chart,
    About,
    Help,
}

impl Panel {
    pub fn index(self) -> usize {
        match self {
            Panel::Terminal => 0,
            Panel::Chart => 1,
            Panel::About => 2,
            Panel::Help => 3,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Panel::Terminal),
            1 => Some(Panel::Chart),
            2 => Some(Panel::About),
            3 => Some(Panel::Help),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Terminal => "Terminal",
            Panel::Chart => "Chart",
            Panel::About => "About",
            Panel::Help => "Help",
        }
    }

    pub fn next(self) -> Panel {
        Panel::from_index((self.index() + 1) % 4).unwrap()
    }

    pub fn prev(self) -> Panel {
        Panel::from_index((self.index() + 3) % 4).unwrap()
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

/// Error category for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Throttle,
    Data,
    Config,
    Analysis,
    Other,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Network => "NET",
            ErrorCategory::Throttle => "RATE",
            ErrorCategory::Data => "DATA",
            ErrorCategory::Config => "CFG",
            ErrorCategory::Analysis => "CALC",
            ErrorCategory::Other => "ERR",
        }
    }

    /// Map a worker-reported category string back to the display enum.
    pub fn from_worker(category: &str) -> Self {
        match category {
            "network" => ErrorCategory::Network,
            "throttle" => ErrorCategory::Throttle,
            "data" => ErrorCategory::Data,
            "config" => ErrorCategory::Config,
            _ => ErrorCategory::Other,
        }
    }
}

/// Everything known about the currently watched symbol.
#[derive(Debug)]
pub struct MarketState {
    pub ticker: Ticker,
    pub quote: Option<Quote>,
    pub analysis: Option<AnalysisResult>,
    /// Prices observed this session, oldest first. Session-local only.
    pub history: Vec<f64>,
    pub last_updated: Option<DateTime<Local>>,
    pub paused: bool,
}

impl MarketState {
    pub fn new(ticker: Ticker) -> Self {
        Self {
            ticker,
            quote: None,
            analysis: None,
            history: Vec::new(),
            last_updated: None,
            paused: false,
        }
    }

    /// True until the first observation lands (the SCANNING state).
    pub fn loading(&self) -> bool {
        self.quote.is_none()
    }

    /// Reset per-symbol state when the watched ticker changes.
    pub fn switch_to(&mut self, ticker: Ticker) {
        self.ticker = ticker;
        self.quote = None;
        self.analysis = None;
        self.history.clear();
        self.last_updated = None;
    }
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Search,
    ErrorHistory,
}

/// Top-level application state.
pub struct AppState {
    // Navigation
    pub active_panel: Panel,
    pub running: bool,

    // Watched symbol
    pub market: MarketState,

    // Poller communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,
    pub search_input: String,

    pub config: AppConfig,
}

impl AppState {
    pub fn new(
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
        ticker: Ticker,
        config: AppConfig,
    ) -> Self {
        Self {
            active_panel: Panel::Terminal,
            running: true,
            market: MarketState::new(ticker),
            worker_tx,
            worker_rx,
            status_message: None,
            error_history: VecDeque::with_capacity(ERROR_CAP),
            error_scroll: 0,
            overlay: Overlay::None,
            search_input: String::new(),
            config,
        }
    }

    /// Handle one observation from the poller. Analysis runs here,
    /// synchronously — the poller only delivers prices.
    pub fn record_observation(&mut self, ticker: Ticker, quote: Quote) {
        if ticker != self.market.ticker {
            // Stale response from before a symbol switch.
            return;
        }

        if !quote.is_sane() {
            self.set_warning(format!(
                "questionable quote for {ticker}: price {} outside range {}..{}",
                quote.price, quote.low, quote.high
            ));
        }

        match engine::analyze(quote.price) {
            Ok(analysis) => {
                self.set_status(format!("{ticker} {:.2} → {}", quote.price, analysis.signal));
                self.market.analysis = Some(analysis);
            }
            Err(e) => {
                self.push_error(ErrorCategory::Analysis, e.to_string(), ticker.to_string());
                self.market.analysis = None;
            }
        }

        self.market.history.push(quote.price);
        if self.market.history.len() > HISTORY_CAP {
            let excess = self.market.history.len() - HISTORY_CAP;
            self.market.history.drain(..excess);
        }
        self.market.quote = Some(quote);
        self.market.last_updated = Some(Local::now());
    }

    /// Switch the watched symbol and tell the poller.
    pub fn watch(&mut self, ticker: Ticker) {
        self.market.switch_to(ticker.clone());
        let _ = self.worker_tx.send(WorkerCommand::SetTicker(ticker.clone()));
        self.set_status(format!("Watching {ticker}"));
    }

    /// Fetch now without waiting for the next poll tick.
    pub fn refresh(&mut self) {
        let _ = self.worker_tx.send(WorkerCommand::Refresh);
        self.set_status(format!("Refreshing {}", self.market.ticker));
    }

    pub fn toggle_paused(&mut self) {
        self.market.paused = !self.market.paused;
        let _ = self
            .worker_tx
            .send(WorkerCommand::SetPaused(self.market.paused));
        if self.market.paused {
            self.set_warning("Polling paused");
        } else {
            self.set_status("Polling resumed");
        }
    }

    /// Push an error to the history, capping its length.
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > ERROR_CAP {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    use chrono::{NaiveDate, Utc};
    use smarttrade_core::domain::Signal;

    fn test_app() -> (AppState, Receiver<WorkerCommand>) {
        let (tx, cmd_rx) = mpsc::channel();
        let (_resp_tx, resp_rx) = mpsc::channel();
        let app = AppState::new(
            tx,
            resp_rx,
            Ticker::parse("BSE:RELIANCE").unwrap(),
            AppConfig::default(),
        );
        (app, cmd_rx)
    }

    fn quote_for(ticker: &Ticker, price: f64) -> Quote {
        Quote {
            symbol: ticker.query_symbol(),
            price,
            open: price - 1.0,
            high: price + 2.0,
            low: price - 2.0,
            previous_close: price - 0.5,
            change: 0.5,
            change_percent: 0.2,
            volume: 1_000,
            latest_trading_day: NaiveDate::from_ymd_opt(2024, 6, 14).unwrap(),
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn panel_cycle() {
        assert_eq!(Panel::Terminal.next(), Panel::Chart);
        assert_eq!(Panel::Help.next(), Panel::Terminal);
        assert_eq!(Panel::Terminal.prev(), Panel::Help);
        assert_eq!(Panel::Chart.prev(), Panel::Terminal);
    }

    #[test]
    fn panel_from_index() {
        for i in 0..4 {
            let p = Panel::from_index(i).unwrap();
            assert_eq!(p.index(), i);
        }
        assert!(Panel::from_index(4).is_none());
    }

    #[test]
    fn observation_runs_analysis_and_extends_history() {
        let (mut app, _cmd_rx) = test_app();
        let ticker = app.market.ticker.clone();
        assert!(app.market.loading());

        app.record_observation(ticker.clone(), quote_for(&ticker, 151.0));

        assert!(!app.market.loading());
        let analysis = app.market.analysis.as_ref().unwrap();
        assert_eq!(analysis.signal, Signal::Buy);
        assert_eq!(app.market.history, vec![151.0]);

        app.record_observation(ticker.clone(), quote_for(&ticker, 152.0));
        assert_eq!(app.market.history, vec![151.0, 152.0]);
    }

    #[test]
    fn stale_observation_is_dropped() {
        let (mut app, _cmd_rx) = test_app();
        let old = Ticker::parse("NSE:TCS").unwrap();
        app.record_observation(old.clone(), quote_for(&old, 151.0));
        assert!(app.market.loading());
        assert!(app.market.history.is_empty());
    }

    #[test]
    fn history_is_capped() {
        let (mut app, _cmd_rx) = test_app();
        let ticker = app.market.ticker.clone();
        for i in 0..(HISTORY_CAP + 25) {
            app.record_observation(ticker.clone(), quote_for(&ticker, 100.0 + i as f64));
        }
        assert_eq!(app.market.history.len(), HISTORY_CAP);
        // Oldest entries were dropped.
        assert_eq!(app.market.history[0], 100.0 + 25.0);
    }

    #[test]
    fn watch_resets_state_and_notifies_poller() {
        let (mut app, cmd_rx) = test_app();
        let ticker = app.market.ticker.clone();
        app.record_observation(ticker.clone(), quote_for(&ticker, 151.0));

        let next = Ticker::parse("NSE:INFY").unwrap();
        app.watch(next.clone());

        assert_eq!(app.market.ticker, next);
        assert!(app.market.loading());
        assert!(app.market.history.is_empty());
        match cmd_rx.try_recv().unwrap() {
            WorkerCommand::SetTicker(t) => assert_eq!(t, next),
            other => panic!("expected SetTicker, got {other:?}"),
        }
    }

    #[test]
    fn error_history_caps() {
        let (mut app, _cmd_rx) = test_app();
        for i in 0..(ERROR_CAP + 10) {
            app.push_error(ErrorCategory::Other, format!("error {i}"), String::new());
        }
        assert_eq!(app.error_history.len(), ERROR_CAP);
        assert!(app.error_history[0].message.contains("59"));
    }

    #[test]
    fn pause_toggles_and_notifies_poller() {
        let (mut app, cmd_rx) = test_app();
        app.toggle_paused();
        assert!(app.market.paused);
        match cmd_rx.try_recv().unwrap() {
            WorkerCommand::SetPaused(true) => {}
            other => panic!("expected SetPaused(true), got {other:?}"),
        }
    }
}
