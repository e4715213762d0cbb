//! Chat view: message history, swarm strip and prompt input.

use crate::state::App;
use crate::theme::message_origin_color;
use crate::views::swarm;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use vibe_core::{Message, MessageOrigin};

pub const EMPTY_TITLE: &str = "Architect Your Dream";
pub const EMPTY_TEXT: &str = "Describe your app idea. Our swarm of autonomous agents will architect, integrate, and build it for you.";
pub const ACTIVE_INDICATOR: &str = "Swarm is active...";

/// Chat view: the chat column plus the idle backdrop when there is room.
pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    if area.width < 90 {
        render_panel(f, app, area);
        return;
    }
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Min(0)])
        .split(area);
    render_panel(f, app, columns[0]);
    render_backdrop(f, app, columns[1]);
}

/// The chat column, also shown beside the IDE.
pub fn render_panel(f: &mut Frame<'_>, app: &App, area: Rect) {
    let processing = app.state().processing;
    let mut constraints = vec![Constraint::Min(3)];
    if processing {
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Length(swarm::height(&app.state().agents)));
    }
    constraints.push(Constraint::Length(3));
    constraints.push(Constraint::Length(1));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    render_history(f, app, rows[0]);
    let mut next = 1;
    if processing {
        render_indicator(f, app, rows[1]);
        swarm::render(f, app, rows[2]);
        next = 3;
    }
    f.render_widget(&app.input, rows[next]);
    render_hints(f, app, rows[next + 1]);
}

fn render_history(f: &mut Frame<'_>, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let messages = &app.state().messages;
    if messages.is_empty() {
        render_empty_state(f, app, inner);
        return;
    }

    let lines: Vec<Line> = messages
        .iter()
        .flat_map(|message| message_lines(message, app))
        .collect();
    let scroll = wrapped_height(&lines, inner.width).saturating_sub(inner.height);
    let history = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(history, inner);
}

/// Lines for one message, followed by a blank separator.
pub fn message_lines(message: &Message, app: &App) -> Vec<Line<'static>> {
    let color = message_origin_color(message.origin, &app.theme);
    let mut lines = Vec::new();

    match message.origin {
        MessageOrigin::User => {
            lines.extend(message.content.split('\n').map(|text| {
                Line::from(Span::styled(text.to_string(), Style::default().fg(color)))
                    .alignment(Alignment::Right)
            }));
        }
        MessageOrigin::Assistant => {
            let speaker = app.state().speaker_name(message).to_uppercase();
            lines.push(Line::from(Span::styled(
                speaker,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )));
            lines.extend(message.content.split('\n').map(|text| {
                Line::from(Span::styled(
                    text.to_string(),
                    Style::default().fg(app.theme.text),
                ))
            }));
        }
        MessageOrigin::System => {
            lines.extend(message.content.split('\n').map(|text| {
                Line::from(Span::styled(
                    text.to_string(),
                    Style::default().fg(color).add_modifier(Modifier::DIM),
                ))
            }));
        }
    }
    lines.push(Line::default());
    lines
}

/// Rows `lines` occupy when word-wrapped to `width` columns.
fn wrapped_height(lines: &[Line], width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let rows: usize = lines.iter().map(|line| wrapped_rows(line, width)).sum();
    u16::try_from(rows).unwrap_or(u16::MAX)
}

/// Greedy word wrap. A word wider than the row is split across rows, and a
/// break never lands inside a word that would fit on the next row.
fn wrapped_rows(line: &Line, width: usize) -> usize {
    let text: String = line.spans.iter().map(|span| span.content.as_ref()).collect();
    let mut rows = 1;
    let mut used = 0;
    for word in text.split(' ') {
        let word_width = Span::raw(word).width();
        let gap = usize::from(used > 0);
        if used + gap + word_width <= width {
            used += gap + word_width;
            continue;
        }
        if used > 0 {
            rows += 1;
        }
        used = word_width;
        while used > width {
            rows += 1;
            used -= width;
        }
    }
    rows
}

fn render_empty_state(f: &mut Frame<'_>, app: &App, area: Rect) {
    let text = vec![
        Line::from(Span::styled("✦", Style::default().fg(app.theme.neon_amber))),
        Line::from(""),
        Line::from(Span::styled(
            EMPTY_TITLE,
            Style::default()
                .fg(app.theme.text)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(EMPTY_TEXT, Style::default().fg(app.theme.text_dim))),
    ];
    let top = area.height.saturating_sub(6) / 2;
    let body = Rect {
        y: area.y + top,
        height: area.height - top,
        ..area
    };
    f.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        body,
    );
}

fn render_indicator(f: &mut Frame<'_>, app: &App, area: Rect) {
    let dots = ["•  ", "•• ", "•••"][(app.tick % 3) as usize];
    let line = Line::from(vec![
        Span::styled(format!(" {} ", dots), Style::default().fg(app.theme.neon_blue)),
        Span::styled(ACTIVE_INDICATOR, Style::default().fg(app.theme.text_dim)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn render_hints(f: &mut Frame<'_>, app: &App, area: Rect) {
    let style = Style::default().fg(app.theme.text_muted);
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    f.render_widget(Paragraph::new(Span::styled(" Context 7 Enabled", style)), halves[0]);
    f.render_widget(
        Paragraph::new(Span::styled("Enter to Send ", style)).alignment(Alignment::Right),
        halves[1],
    );
}

fn render_backdrop(f: &mut Frame<'_>, app: &App, area: Rect) {
    let top = area.height.saturating_sub(3) / 2;
    let body = Rect {
        y: area.y + top,
        height: area.height - top,
        ..area
    };
    let text = vec![
        Line::from(Span::styled(
            "V I B E",
            Style::default()
                .fg(app.theme.bg_highlight)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "AWAITING INSTRUCTIONS",
            Style::default().fg(app.theme.text_muted),
        )),
    ];
    f.render_widget(Paragraph::new(text).alignment(Alignment::Center), body);
}
