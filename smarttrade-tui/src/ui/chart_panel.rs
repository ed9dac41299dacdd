//! Panel 2 — Chart: session price line chart.
//!
//! The chart receives the ticker and the raw prices observed this session,
//! never the analysis record. History is session-local and capped; nothing
//! is persisted.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let market = &app.market;
    if market.history.is_empty() {
        render_empty(f, area);
        return;
    }

    let label = match &market.quote {
        Some(quote) => format!("{} ₹{:.2}", market.ticker, quote.price),
        None => market.ticker.to_string(),
    };
    render_chart(f, area, &market.history, &label);
}

fn render_empty(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "No price observations yet.",
            theme::muted(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "The chart fills as quotes arrive. Press r to fetch now.",
            theme::muted(),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_chart(f: &mut Frame, area: Rect, prices: &[f64], label: &str) {
    let min_y = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let max_y = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    // A flat session still gets a visible band around the line.
    let padding = ((max_y - min_y).abs() * 0.05).max(max_y.abs() * 0.001 + 1e-6);
    let y_min = min_y - padding;
    let y_max = max_y + padding;
    let x_max = prices.len().saturating_sub(1) as f64;

    let data: Vec<(f64, f64)> = prices
        .iter()
        .enumerate()
        .map(|(i, &p)| (i as f64, p))
        .collect();

    let dataset = Dataset::default()
        .name(label)
        .marker(symbols::Marker::Braille)
        .style(Style::default().fg(theme::ACCENT))
        .graph_type(GraphType::Line)
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .x_axis(
            Axis::default()
                .title(Span::styled("Observations", theme::muted()))
                .style(theme::muted())
                .bounds([0.0, x_max.max(1.0)])
                .labels(vec![
                    Span::styled("0", theme::muted()),
                    Span::styled(format!("{}", prices.len()), theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("Price", theme::muted()))
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(format!("{y_min:.2}"), theme::muted()),
                    Span::styled(format!("{y_max:.2}"), theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}
