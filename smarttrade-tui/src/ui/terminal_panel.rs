//! Panel 1 — Terminal: stat cards plus the technical scanner.
//!
//! Mirrors the original page layout: Live Price / Target / Sentiment cards
//! on top, scanner details below. Until the first observation lands the
//! cards show the SCANNING placeholder.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(4)])
        .split(area);

    render_stat_cards(f, rows[0], app);
    render_scanner(f, rows[1], app);
}

fn render_stat_cards(f: &mut Frame, area: Rect, app: &AppState) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    let market = &app.market;
    match (&market.quote, &market.analysis) {
        (Some(quote), Some(analysis)) => {
            let sentiment = Span::styled(
                analysis.signal.to_string(),
                Style::default()
                    .fg(theme::signal_color(analysis.signal))
                    .add_modifier(Modifier::BOLD),
            );
            stat_card(
                f,
                cards[0],
                "Live Price",
                Span::styled(format!("₹{:.2}", quote.price), theme::text()),
            );
            stat_card(
                f,
                cards[1],
                "Target",
                Span::styled(format!("₹{:.2}", analysis.target), theme::accent()),
            );
            stat_card(f, cards[2], "Sentiment", sentiment);
        }
        _ => {
            stat_card(f, cards[0], "Live Price", Span::styled("---", theme::muted()));
            stat_card(f, cards[1], "Target", Span::styled("---", theme::muted()));
            stat_card(
                f,
                cards[2],
                "Sentiment",
                Span::styled("SCANNING...", theme::warning()),
            );
        }
    }
}

fn stat_card(f: &mut Frame, area: Rect, label: &str, value: Span) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::muted())
        .title(format!(" {label} "))
        .title_style(theme::muted());
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(Line::from(value)), inner);
}

fn render_scanner(f: &mut Frame, area: Rect, app: &AppState) {
    let market = &app.market;
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(
        format!("Technical Scanner — {}", market.ticker),
        theme::accent_bold(),
    )));
    lines.push(Line::from(""));

    if market.loading() {
        lines.push(Line::from(Span::styled(
            "Scanning for signals...",
            theme::warning(),
        )));
    } else if let Some(a) = &market.analysis {
        // The condition label is view-only, derived here and not in the
        // analysis record.
        let condition = if a.relative_strength_index < 40 {
            "Oversold"
        } else {
            "Neutral"
        };

        row(&mut lines, "Confidence", format!("{}%", a.confidence), theme::text());
        row(
            &mut lines,
            "RSI",
            format!("{} ({condition})", a.relative_strength_index),
            theme::text(),
        );
        row(
            &mut lines,
            "Trend",
            a.trend.to_string(),
            Style::default().fg(theme::trend_color(a.trend)),
        );
        row(
            &mut lines,
            "Reference Avg",
            format!("₹{:.2}", a.reference_average),
            theme::muted(),
        );
        row(
            &mut lines,
            "Volatility",
            format!("₹{:.2}", a.volatility),
            theme::muted(),
        );

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Execution Unit", theme::accent_bold())));
        row(&mut lines, "Stop", format!("₹{:.2}", a.stop_loss), theme::negative());
        row(&mut lines, "Target", format!("₹{:.2}", a.target), theme::positive());
        row(&mut lines, "Quantity", a.position_size.to_string(), theme::text());
    } else {
        // A quote arrived but the price was rejected by the engine.
        lines.push(Line::from(Span::styled(
            "Analysis unavailable for the last observation — see error history (e).",
            theme::negative(),
        )));
    }

    if let Some(quote) = &market.quote {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Day: ", theme::muted()),
            Span::styled(
                format!("{:+.2} ({:+.2}%)", quote.change, quote.change_percent),
                Style::default().fg(theme::change_color(quote.change)),
            ),
            Span::styled(
                format!("  Vol: {}  Session: {}", quote.volume, quote.latest_trading_day),
                theme::muted(),
            ),
        ]));
    }

    let mut footer: Vec<Span> = Vec::new();
    if let Some(updated) = market.last_updated {
        footer.push(Span::styled(
            format!(
                "Updated {} (every {}s)",
                updated.format("%H:%M:%S"),
                app.config.poll_interval_secs
            ),
            theme::muted(),
        ));
    }
    if market.paused {
        footer.push(Span::styled("  [PAUSED]", theme::warning()));
    }
    if !footer.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(footer));
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn row<'a>(lines: &mut Vec<Line<'a>>, label: &str, value: String, style: Style) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {label:>14}: "), theme::muted()),
        Span::styled(value, style),
    ]));
}
