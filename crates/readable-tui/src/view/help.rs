use ratatui::Frame;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::centered_rect;
use crate::theme::Theme;

/// Render the help overlay as a centered popup.
pub fn render(f: &mut Frame, theme: &Theme) {
    let popup = centered_rect(60, 30, f.area());

    let lines = vec![
        Line::from(Span::styled(" Keyboard Shortcuts ", theme.header_style())),
        Line::from(""),
        section_header("Reading", theme),
        key_line("j / \u{2193}", "Scroll down", theme),
        key_line("k / \u{2191}", "Scroll up", theme),
        key_line("Ctrl+d / PgDn", "Page down", theme),
        key_line("Ctrl+u / PgUp", "Page up", theme),
        key_line("g / G", "Top / bottom", theme),
        key_line("n / Tab", "Next section", theme),
        key_line("p / Shift+Tab", "Previous section", theme),
        key_line("Enter", "Jump to active section", theme),
        Line::from(""),
        section_header("Paper", theme),
        key_line("o", "Open PDF in browser", theme),
        key_line("y", "Copy PDF link (OSC 52)", theme),
        key_line("r", "Reload paper", theme),
        key_line("Esc", "Back to start", theme),
        Line::from(""),
        section_header("Start screen", theme),
        key_line("Enter", "View sample paper", theme),
        key_line("/ or :", "Type a paper id", theme),
        Line::from(""),
        section_header("Global", theme),
        key_line("t", "Cycle theme", theme),
        key_line("1 / 2 / 3", "Light / dark / stars", theme),
        key_line("?", "Toggle this help", theme),
        key_line("q", "Quit", theme),
        Line::from(""),
        section_header("Mouse", theme),
        key_line("Wheel", "Scroll", theme),
        key_line("Click", "Select section in side panel", theme),
    ];

    let paragraph = Paragraph::new(lines)
        .style(theme.panel_style())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.link_style())
                .title(" Help "),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}

fn section_header<'a>(title: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(Span::styled(format!("  {title}"), theme.link_style()))
}

fn key_line<'a>(key: &'a str, desc: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("    {key:<16}"), theme.title_style()),
        Span::styled(desc, theme.dim_style()),
    ])
}
