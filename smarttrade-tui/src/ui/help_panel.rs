//! Panel 4 — Help: keyboard shortcuts.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, _app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Global Navigation");
    key(&mut lines, "1-4", "Switch to panel by number");
    key(&mut lines, "Tab / Shift+Tab", "Cycle panels forward / back");
    key(&mut lines, "q", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Market Data");
    key(&mut lines, "s or /", "Switch the watched symbol");
    key(&mut lines, "r", "Refresh the quote now");
    key(&mut lines, "p", "Pause / resume polling");
    lines.push(Line::from(""));

    section(&mut lines, "Overlays");
    key(&mut lines, "e", "Open error history");
    key(&mut lines, "j / k", "Scroll error history");
    key(&mut lines, "Esc", "Close overlay");
    lines.push(Line::from(""));

    section(&mut lines, "Symbols");
    key(&mut lines, "BSE:RELIANCE", "Bombay Stock Exchange listing");
    key(&mut lines, "NSE:TCS", "National Stock Exchange listing");
    key(&mut lines, "INFY", "Bare codes default to NSE");

    f.render_widget(Paragraph::new(lines), area);
}

fn section<'a>(lines: &mut Vec<Line<'a>>, title: &str) {
    lines.push(Line::from(Span::styled(
        title.to_string(),
        theme::accent_bold(),
    )));
}

fn key<'a>(lines: &mut Vec<Line<'a>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {keys:>16}  "), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
