//! Keyboard input dispatch — overlays first, then global keys.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use smarttrade_core::domain::Ticker;

use crate::app::{AppState, Overlay, Panel};

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match app.overlay {
        Overlay::Search => {
            handle_search_overlay(app, key);
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. Global keys.
    match key.code {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('1') => app.active_panel = Panel::Terminal,
        KeyCode::Char('2') => app.active_panel = Panel::Chart,
        KeyCode::Char('3') => app.active_panel = Panel::About,
        KeyCode::Char('4') => app.active_panel = Panel::Help,
        KeyCode::Tab => app.active_panel = app.active_panel.next(),
        KeyCode::BackTab => app.active_panel = app.active_panel.prev(),
        KeyCode::Char('s') | KeyCode::Char('/') => {
            app.search_input.clear();
            app.overlay = Overlay::Search;
        }
        KeyCode::Char('e') => {
            app.error_scroll = 0;
            app.overlay = Overlay::ErrorHistory;
        }
        KeyCode::Char('r') => app.refresh(),
        KeyCode::Char('p') => app.toggle_paused(),
        _ => {}
    }
}

fn handle_search_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.overlay = Overlay::None;
            app.search_input.clear();
        }
        KeyCode::Enter => match Ticker::parse(&app.search_input) {
            Ok(ticker) => {
                app.overlay = Overlay::None;
                app.search_input.clear();
                app.watch(ticker);
            }
            // Stay in the overlay so the input can be corrected.
            Err(e) => app.set_warning(e.to_string()),
        },
        KeyCode::Backspace => {
            app.search_input.pop();
        }
        KeyCode::Char(c) => {
            app.search_input.push(c.to_ascii_uppercase());
        }
        _ => {}
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}
