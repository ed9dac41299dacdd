//! SmartTrade TUI — terminal rendition of the single-page trading dashboard.
//!
//! Panels:
//! 1. Terminal — stat cards (price, target, sentiment) + technical scanner
//! 2. Chart — session price line chart
//! 3. About — what the scoring model computes
//! 4. Help — keyboard shortcuts
//!
//! A background poller thread delivers quote observations over a channel;
//! the signal analysis runs synchronously in the receive handler here.

mod app;
mod input;
mod theme;
mod ui;
mod worker;

use std::io::{self, stdout};
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use smarttrade_core::config::AppConfig;
use smarttrade_core::data::{AlphaVantageProvider, CircuitBreaker};
use smarttrade_core::domain::Ticker;

use crate::app::{AppState, ErrorCategory};
use crate::worker::{WorkerCommand, WorkerResponse};

fn main() -> Result<()> {
    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let config = AppConfig::load(&AppConfig::default_path())?;
    let default_ticker = Ticker::parse(&config.default_symbol)
        .unwrap_or_else(|_| Ticker::parse("BSE:RELIANCE").expect("fallback ticker parses"));

    // Provider shared with the poller thread.
    let circuit_breaker = Arc::new(CircuitBreaker::default_provider());
    let provider = Arc::new(AlphaVantageProvider::with_timeout(
        config.resolved_api_key(),
        circuit_breaker,
        Duration::from_secs(config.http_timeout_secs),
    ));

    // Poller channels.
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let poll_interval = Duration::from_secs(config.poll_interval_secs.max(1));
    let worker_handle = worker::spawn_poller(cmd_rx, resp_tx, provider, poll_interval);

    let mut app = AppState::new(cmd_tx.clone(), resp_rx, default_ticker.clone(), config);

    // Kick off the first fetch immediately.
    let _ = cmd_tx.send(WorkerCommand::SetTicker(default_ticker));

    // Setup terminal.
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the main event loop.
    let result = run_app(&mut terminal, &mut app);

    // Shutdown poller.
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    let _ = worker_handle.join();

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain poller responses (non-blocking)
        while let Ok(resp) = app.worker_rx.try_recv() {
            handle_worker_response(app, resp);
        }

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}

fn handle_worker_response(app: &mut AppState, resp: WorkerResponse) {
    match resp {
        WorkerResponse::Observation { ticker, quote } => {
            app.record_observation(ticker, quote);
        }
        WorkerResponse::FetchFailed {
            ticker,
            category,
            message,
        } => {
            app.push_error(
                ErrorCategory::from_worker(&category),
                message,
                ticker.to_string(),
            );
        }
    }
}
