//! Swarm status strip: one row per agent.

use crate::state::App;
use crate::theme::agent_status_color;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use vibe_core::Agent;

pub const STRIP_TITLE: &str = "Active Swarm";

/// Rows needed to draw the strip for `agents`, borders included.
pub fn height(agents: &[Agent]) -> u16 {
    agents.len() as u16 + 2
}

pub fn agent_line(agent: &Agent, app: &App) -> Line<'static> {
    let color = agent_status_color(agent.status, &app.theme);
    let mut status = Style::default().fg(color);
    if agent.status.is_busy() {
        status = status.add_modifier(Modifier::BOLD);
    }
    Line::from(vec![
        Span::styled(
            format!("{:<12}", agent.role.to_string()),
            Style::default().fg(app.theme.text),
        ),
        Span::styled(
            format!("{:<8}", agent.id),
            Style::default().fg(app.theme.text_muted),
        ),
        Span::styled(agent.status_text().to_string(), status),
    ])
}

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let agents = &app.state().agents;
    let lines: Vec<Line> = agents.iter().map(|agent| agent_line(agent, app)).collect();

    let block = Block::default()
        .title(Line::from(vec![
            Span::styled(STRIP_TITLE, Style::default().fg(app.theme.neon_blue)),
            Span::styled(" • Context 7 Active", Style::default().fg(app.theme.neon_green)),
        ]))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border))
        .style(Style::default().bg(app.theme.bg_panel));
    f.render_widget(Paragraph::new(lines).block(block), area);
}
