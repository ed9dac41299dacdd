//! Panel 3 — About: what the scanner actually computes.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, _app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Scoring Model");
    entry(&mut lines, "Trend", "price versus a reference average offset ±1.5%");
    entry(&mut lines, "RSI", "band [30, 69], seeded from the price's integer digits");
    entry(&mut lines, "Confidence", "band [70, 94], same seed");
    entry(
        &mut lines,
        "Levels",
        "stop at 1× volatility, target at 2× (volatility = 1.5% of price)",
    );
    entry(
        &mut lines,
        "Quantity",
        "fixed risk budget of 1,000 divided by the stop distance",
    );
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  The seed is the price's integer part mod 100 — a placeholder",
        theme::muted(),
    )));
    lines.push(Line::from(Span::styled(
        "  scoring function, not a technical-analysis algorithm.",
        theme::muted(),
    )));
    lines.push(Line::from(""));

    section(&mut lines, "Data");
    entry(&mut lines, "Quotes", "Alpha Vantage GLOBAL_QUOTE, polled on a timer");
    entry(&mut lines, "Symbols", "BSE and NSE, entered as EXCH:CODE");
    entry(&mut lines, "API key", "ALPHAVANTAGE_API_KEY or config.toml");
    lines.push(Line::from(""));

    section(&mut lines, "Disclaimer");
    lines.push(Line::from(Span::styled(
        "  Educational research terminal — not an advisory tool.",
        theme::warning(),
    )));

    f.render_widget(Paragraph::new(lines), area);
}

fn section<'a>(lines: &mut Vec<Line<'a>>, title: &str) {
    lines.push(Line::from(Span::styled(
        title.to_string(),
        theme::accent_bold(),
    )));
}

fn entry<'a>(lines: &mut Vec<Line<'a>>, label: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {label:>12}  "), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
