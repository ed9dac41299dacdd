//! Dark terminal theme — palette tokens and the presentation half of the
//! signal boundary.
//!
//! The engine hands the UI plain enum values; mapping a signal or trend to
//! a color happens here and nowhere else.

use ratatui::style::{Color, Modifier, Style};

use smarttrade_core::domain::{Signal, Trend};

/// Electric blue (focus, highlights).
pub const ACCENT: Color = Color::Rgb(59, 130, 246);
/// Green (gains, BUY, bullish).
pub const POSITIVE: Color = Color::Rgb(74, 222, 128);
/// Red (losses, SELL, bearish).
pub const NEGATIVE: Color = Color::Rgb(248, 113, 113);
/// Yellow (HOLD, warnings, the scanning state).
pub const WARNING: Color = Color::Rgb(250, 204, 21);
/// Purple (secondary info).
pub const NEUTRAL: Color = Color::Rgb(168, 85, 247);
/// Gray (muted text, borders).
pub const MUTED: Color = Color::Rgb(107, 114, 128);

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn text() -> Style {
    Style::default().fg(Color::White)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

/// Signal → color. The original rendered this as a CSS class baked into the
/// data record; here the enum crosses the boundary instead.
pub fn signal_color(signal: Signal) -> Color {
    match signal {
        Signal::Buy => POSITIVE,
        Signal::Sell => NEGATIVE,
        Signal::Hold => WARNING,
    }
}

pub fn trend_color(trend: Trend) -> Color {
    match trend {
        Trend::Bullish => POSITIVE,
        Trend::Bearish => NEGATIVE,
    }
}

/// Color for a signed day change.
pub fn change_color(value: f64) -> Color {
    if value >= 0.0 {
        POSITIVE
    } else {
        NEGATIVE
    }
}
