//! View rendering dispatch.

pub mod chat;
pub mod ide;
pub mod swarm;

use crate::keys::Focus;
use crate::state::App;
use crate::widgets::StatusIndicator;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use vibe_core::ViewMode;

pub fn render_view(f: &mut Frame<'_>, app: &App) {
    let area = f.size();
    f.render_widget(Block::default().style(Style::default().bg(app.theme.bg)), area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(area);

    render_header(f, app, layout[0]);

    match app.state().view_mode {
        ViewMode::Chat => chat::render(f, app, layout[1]),
        ViewMode::Code => ide::render(f, app, layout[1]),
    }

    render_footer(f, app, layout[2]);

    if app.modal.is_some() {
        render_modal(f, app, area);
    }
}

fn render_header(f: &mut Frame<'_>, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(30)])
        .split(inner);

    let view_mode = app.state().view_mode;
    let title = Line::from(vec![
        Span::styled(
            "VibeCoder",
            Style::default()
                .fg(app.theme.text)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" BETA", Style::default().fg(app.theme.neon_blue)),
        Span::styled(
            format!("  [{}]", view_mode.title()),
            Style::default().fg(app.theme.text_dim),
        ),
    ]);
    f.render_widget(Paragraph::new(title), columns[0]);

    let connected = app.state().project.knowledge_connected;
    let (status, color) = if connected {
        ("Connected", app.theme.neon_green)
    } else {
        ("Connecting...", app.theme.neon_amber)
    };
    StatusIndicator {
        label: "Context 7",
        status,
        style: Style::default().fg(color),
        pulse: (!connected).then_some(app.tick),
    }
    .render(f, columns[1], Alignment::Right);
}

fn render_footer(f: &mut Frame<'_>, app: &App, area: Rect) {
    let help = match (app.state().view_mode, app.focus) {
        (ViewMode::Chat, _) => "Enter send • Ctrl-O code view • Ctrl-C quit",
        (ViewMode::Code, Focus::Input) => "Tab file tree • Ctrl-P push • Ctrl-O chat • Ctrl-C quit",
        (ViewMode::Code, Focus::Tree) => "j/k move • Enter open • Tab input • Ctrl-P push • Ctrl-C quit",
    };
    let (text, style) = if let Some(note) = app.current_notification() {
        let color = crate::theme::notification_color(note.level, &app.theme);
        (
            format!("{}: {}", note.level.label(), note.message),
            Style::default().fg(color),
        )
    } else {
        (help.to_string(), Style::default().fg(app.theme.text_dim))
    };
    let footer = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .style(style);
    f.render_widget(footer, area);
}

fn render_modal(f: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(modal) = app.modal.as_ref() else {
        return;
    };
    let popup = centered_rect(50, 7, area);
    f.render_widget(Clear, popup);

    let text = vec![
        Line::from(Span::styled(
            modal.message.clone(),
            Style::default().fg(app.theme.text),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[y] ", Style::default().fg(app.theme.neon_green)),
            Span::raw("Connect   "),
            Span::styled("[n] ", Style::default().fg(app.theme.neon_pink)),
            Span::raw("Cancel"),
        ]),
    ];
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(modal.title.as_str())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.neon_purple))
                .style(Style::default().bg(app.theme.bg_panel)),
        );
    f.render_widget(widget, popup);
}

/// A rect `percent_x` wide and `height` rows tall, centred in `area`.
pub fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let width = (area.width.saturating_mul(percent_x) / 100).max(20).min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
