use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::{centered_rect, footer_line};
use crate::app::{App, InputMode};

/// Render the start screen: welcome text, two cards and the id prompt.
pub fn render(f: &mut Frame, app: &App) {
    let area = f.area();
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(f, app, header);

    let content = centered_rect(76, 18, body);
    let [intro, cards, prompt] = Layout::vertical([
        Constraint::Length(6),
        Constraint::Length(8),
        Constraint::Length(3),
    ])
    .areas(content);

    let theme = &app.theme;
    let welcome = Paragraph::new(vec![
        Line::from(Span::styled("Welcome to Readable Research", theme.title_style())),
        Line::from(""),
        Line::from(Span::styled(
            "Transform academic papers into a readable format with enhanced navigation.",
            theme.dim_style(),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    f.render_widget(welcome, intro);

    let [left, right] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .spacing(2)
            .areas(cards);

    let upload = Paragraph::new(vec![
        Line::from(Span::styled("Upload Papers", theme.heading_style())),
        Line::from(""),
        Line::from("Open any paper by its identifier."),
        Line::from(""),
        Line::from(Span::styled(
            format!("View Sample Paper (Enter) \u{2192} {}", app.sample_paper_id),
            theme.link_style(),
        )),
    ])
    .style(theme.block_style())
    .block(card_block(theme))
    .wrap(Wrap { trim: true });
    f.render_widget(upload, left);

    let explore = Paragraph::new(vec![
        Line::from(Span::styled("Explore Research", theme.heading_style())),
        Line::from(""),
        Line::from("Jump between sections, switch themes and open the PDF."),
        Line::from(""),
        Line::from(Span::styled("Press ? for all keys", theme.dim_style())),
    ])
    .style(theme.block_style())
    .block(card_block(theme))
    .wrap(Wrap { trim: true });
    f.render_widget(explore, right);

    render_prompt(f, app, prompt);

    let hint = footer_line(
        app,
        "Enter sample \u{2502} / paper id \u{2502} t theme \u{2502} ? help \u{2502} q quit",
        footer.width,
    );
    f.render_widget(Paragraph::new(hint), footer);
}

fn card_block(theme: &crate::theme::Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .style(theme.block_style())
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let line = Line::from(vec![
        Span::styled(" Readable Research ", theme.header_style()),
        Span::styled(
            format!(" {} {} ", theme.icon(), theme.scheme.label()),
            theme.header_style(),
        ),
    ]);
    f.render_widget(Paragraph::new(line).style(theme.header_style()), area);
}

fn render_prompt(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let (text, style) = if app.input_mode == InputMode::PaperId {
        (format!("Paper id: {}\u{2588}", app.paper_input), theme.title_style())
    } else {
        ("Press / to open a paper by id".to_string(), theme.dim_style())
    };
    let prompt = Paragraph::new(Line::from(Span::styled(text, style)))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style()),
        );
    f.render_widget(prompt, area);
}
