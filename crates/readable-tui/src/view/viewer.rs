use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use readable_core::{ABSTRACT_ENTRY, PaperView, ViewModel};
use unicode_width::UnicodeWidthStr;

use super::{
    centered_rect, footer_line, pad_to, spinner_char, starfield, to_row, truncate, wrap_text,
};
use crate::app::App;
use crate::theme::Theme;

const SIDE_PANEL_WIDTH: u16 = 30;

/// Render the paper viewer for the given view model.
pub fn render(f: &mut Frame, app: &mut App, model: &ViewModel) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(f.area());

    render_header(f, app, header);

    let [side, main] =
        Layout::horizontal([Constraint::Length(SIDE_PANEL_WIDTH), Constraint::Min(0)])
            .areas(body);

    app.nav_hitboxes.clear();
    match model {
        ViewModel::Paper(view) => {
            render_side_panel(f, app, view, side);
            render_paper(f, app, view, main);
        }
        ViewModel::Skeleton => {
            render_side_skeleton(f, &app.theme, side);
            render_skeleton(f, app, main);
        }
        ViewModel::Alert { message } => {
            render_side_skeleton(f, &app.theme, side);
            render_alert(f, &app.theme, message, main);
        }
        ViewModel::Redirect => {
            let p = Paragraph::new("No paper selected. Press Esc to go back.")
                .style(app.theme.dim_style())
                .alignment(Alignment::Center);
            f.render_widget(p, centered_rect(50, 1, main));
        }
    }

    starfield::render(f.buffer_mut(), main, &app.theme, app.tick);
    render_footer(f, app, footer);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let paper = app
        .viewer
        .selected()
        .map(|id| id.to_string())
        .unwrap_or_default();
    let left = format!(" Readable Research \u{2502} {paper}");
    let right = format!("{} {} ", theme.icon(), theme.scheme.label());
    let pad = (area.width as usize).saturating_sub(left.width() + right.width());
    let line = Line::from(vec![
        Span::raw(left),
        Span::raw(" ".repeat(pad)),
        Span::raw(right),
    ]);
    f.render_widget(Paragraph::new(line).style(theme.header_style()), area);
}

fn side_block(theme: &Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::RIGHT)
        .border_style(theme.border_style())
        .title(Span::styled(" SECTIONS ", theme.dim_style()))
        .padding(Padding::new(1, 1, 1, 0))
        .style(theme.panel_style())
}

fn render_side_panel(f: &mut Frame, app: &mut App, view: &PaperView, area: Rect) {
    let theme = &app.theme;
    let block = side_block(theme);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [list, extras] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(3)]).areas(inner);

    // Scroll the entry list so the active entry stays visible.
    let rows = usize::from(list.height);
    let active = view.nav.iter().position(|e| e.active).unwrap_or(0);
    let offset = if rows == 0 {
        0
    } else {
        (active + 1).saturating_sub(rows)
    };

    let width = list.width as usize;
    let mut lines = Vec::new();
    for (row, entry) in view.nav.iter().skip(offset).take(rows).enumerate() {
        let marker = if entry.active { "\u{25B8} " } else { "  " };
        let label = truncate(&entry.title, width.saturating_sub(2));
        lines.push(Line::from(Span::styled(
            format!("{marker}{}", pad_to(&label, width.saturating_sub(2))),
            theme.nav_style(entry.active),
        )));
        app.nav_hitboxes.push((
            Rect::new(list.x, list.y + to_row(row), list.width, 1),
            entry.title.clone(),
        ));
    }
    f.render_widget(Paragraph::new(lines), list);

    let extra_lines = vec![
        Line::from(""),
        Line::from(Span::styled("View PDF (o)", theme.link_style())),
        Line::from(Span::styled(
            format!("Citations: {}", view.citations),
            theme.dim_style(),
        )),
    ];
    f.render_widget(Paragraph::new(extra_lines), extras);
}

fn render_side_skeleton(f: &mut Frame, theme: &Theme, area: Rect) {
    let block = side_block(theme);
    let inner = block.inner(area);
    f.render_widget(block, area);
    let lines: Vec<Line> = [18usize, 12, 15, 10]
        .iter()
        .map(|w| bar(*w, inner.width as usize, theme))
        .collect();
    f.render_widget(Paragraph::new(lines), inner);
}

fn bar(width: usize, max: usize, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(
        "\u{2588}".repeat(width.min(max)),
        theme.skeleton_style(),
    ))
}

fn main_inner(area: Rect) -> Rect {
    Block::default().padding(Padding::new(3, 3, 1, 0)).inner(area)
}

/// Build the reading pane lines, recording where each navigation entry starts.
fn paper_lines(view: &PaperView, width: usize, theme: &Theme) -> (Vec<Line<'static>>, Vec<(String, u16)>) {
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut anchors = Vec::new();

    for l in wrap_text(&view.title, width) {
        lines.push(Line::from(Span::styled(l, theme.title_style())));
    }
    for l in wrap_text(&view.byline, width) {
        lines.push(Line::from(Span::styled(l, theme.dim_style())));
    }
    if !view.keywords.is_empty() {
        lines.push(Line::from(""));
        let mut spans = Vec::new();
        for kw in &view.keywords {
            if !spans.is_empty() {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(format!(" {kw} "), theme.badge_style()));
        }
        lines.push(Line::from(spans));
    }
    lines.push(Line::from(""));

    anchors.push((ABSTRACT_ENTRY.to_string(), to_row(lines.len())));
    lines.push(Line::from(Span::styled(
        format!(" {ABSTRACT_ENTRY}"),
        theme.heading_style().bg(theme.block_bg),
    )));
    for l in wrap_text(&view.abstract_text, width.saturating_sub(2)) {
        lines.push(Line::from(Span::styled(
            format!(" {} ", pad_to(&l, width.saturating_sub(2))),
            theme.block_style(),
        )));
    }

    for section in &view.sections {
        lines.push(Line::from(""));
        anchors.push((section.title.clone(), to_row(lines.len())));
        for l in wrap_text(&section.title, width) {
            lines.push(Line::from(Span::styled(l, theme.heading_style())));
        }
        for paragraph in &section.paragraphs {
            lines.push(Line::from(""));
            for l in wrap_text(paragraph, width) {
                lines.push(Line::from(Span::styled(l, Style::default().fg(theme.text))));
            }
        }
    }

    (lines, anchors)
}

fn render_paper(f: &mut Frame, app: &mut App, view: &PaperView, area: Rect) {
    let inner = main_inner(area);
    let (lines, anchors) = paper_lines(view, inner.width as usize, &app.theme);

    app.viewport_height = inner.height;
    app.max_scroll = to_row(lines.len()).saturating_sub(inner.height);
    if let Some(title) = app.pending_scroll.take()
        && let Some((_, line)) = anchors.iter().find(|(t, _)| *t == title)
    {
        app.scroll = *line;
    }
    app.scroll = app.scroll.min(app.max_scroll);
    app.anchors = anchors;

    f.render_widget(Paragraph::new(lines).scroll((app.scroll, 0)), inner);
}

fn render_skeleton(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let inner = main_inner(area);
    let w = inner.width as usize;
    let mut lines = vec![
        Line::from(Span::styled(
            format!("{} Loading paper\u{2026}", spinner_char(app.tick)),
            theme.link_style(),
        )),
        Line::from(""),
        bar(w * 3 / 4, w, theme),
        bar(w / 2, w, theme),
        Line::from(""),
    ];
    for _ in 0..3 {
        lines.push(bar(w, w, theme));
        lines.push(bar(w * 5 / 6, w, theme));
        lines.push(Line::from(""));
    }
    f.render_widget(Paragraph::new(lines), inner);
}

fn render_alert(f: &mut Frame, theme: &Theme, message: &str, area: Rect) {
    let popup = centered_rect(area.width.saturating_sub(8).min(70), 7, area);
    let alert = Paragraph::new(vec![
        Line::from(Span::styled(message.to_string(), theme.error_style())),
        Line::from(""),
        Line::from(Span::styled("r retry \u{2502} Esc back", theme.dim_style())),
    ])
    .style(theme.error_style())
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.error_border))
            .title(" Error ")
            .padding(Padding::horizontal(1)),
    );
    f.render_widget(alert, popup);
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let hints = "j/k scroll \u{2502} n/p section \u{2502} o pdf \u{2502} y copy \u{2502} t theme \u{2502} Esc back \u{2502} ? help";
    f.render_widget(Paragraph::new(footer_line(app, hints, area.width)), area);
}
