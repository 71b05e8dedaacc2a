pub mod help;
pub mod landing;
pub mod starfield;
pub mod viewer;

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::App;

/// Spinner frames for animated progress indication.
const SPINNER_FRAMES: &[char] = &[
    '\u{280B}', '\u{2819}', '\u{2839}', '\u{2838}', '\u{283C}', '\u{2834}', '\u{2826}', '\u{2827}',
    '\u{2807}', '\u{280F}',
];

/// Get the current spinner character based on a tick counter.
pub fn spinner_char(tick: usize) -> char {
    SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
}

/// Truncate a string to fit in `max_width` columns, appending "\u{2026}" if truncated.
pub fn truncate(s: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if s.width() <= max_width {
        return s.to_string();
    }
    let budget = max_width - 1;
    let mut used = 0;
    let mut truncated = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        truncated.push(c);
    }
    truncated.push('\u{2026}');
    truncated
}

/// Word wrap to `width` terminal columns. Runs of whitespace collapse to one
/// space; words wider than a line are split. Always returns at least one
/// (possibly empty) line.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalized.is_empty() {
        return vec![String::new()];
    }
    textwrap::wrap(&normalized, width.max(1))
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

/// Right-pad `s` with spaces to `width` columns.
pub fn pad_to(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(s.width());
    format!("{s}{}", " ".repeat(pad))
}

/// Line count or offset as a ratatui row, saturating at `u16::MAX`.
pub fn to_row(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// Footer: status message (or key hints) on the left, backend health on the right.
pub fn footer_line(app: &App, hints: &str, width: u16) -> Line<'static> {
    let theme = &app.theme;
    let left = match app.status_message() {
        Some(message) => format!(" {message}"),
        None => format!(" {hints}"),
    };
    let Some((label, healthy)) = health_label(app.backend_health.as_ref()) else {
        return Line::from(Span::styled(left, theme.footer_style()));
    };
    let right = format!("\u{25CF} {label} ");
    let indicator = if healthy {
        theme.footer_style().fg(theme.accent)
    } else {
        theme.footer_style().fg(theme.error_fg)
    };
    let gap = usize::from(width)
        .saturating_sub(left.width() + right.width())
        .max(1);
    Line::from(vec![
        Span::styled(left, theme.footer_style()),
        Span::styled(" ".repeat(gap), theme.footer_style()),
        Span::styled(right, indicator),
    ])
}

fn health_label(health: Option<&Result<bool, String>>) -> Option<(&'static str, bool)> {
    match health? {
        Ok(true) => Some(("backend online", true)),
        Ok(false) => Some(("backend unhealthy", false)),
        Err(_) => Some(("backend offline", false)),
    }
}

/// Create a centered rectangle of the given width (columns) and height (rows).
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .split(area);
    Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .split(vertical[0])[0]
}
