//! Code view: chat column, file tree, editor and preview panel.

use crate::keys::Focus;
use crate::state::App;
use crate::views::chat;
use crate::widgets::{SyntaxHighlighter, TreeStyle, TreeWidget};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub const NO_FILE_TEXT: &str = "Select a file to view code";

const TERMINAL_LINES: [&str; 5] = [
    "➜  vibe-project git:(main) npm run dev",
    "   ready - started server on 0.0.0.0:3000, url: http://localhost:3000",
    "   event - compiled client and server successfully in 1241 ms (156 modules)",
    "   wait  - compiling...",
    "   event - compiled successfully in 320 ms (142 modules)",
];

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Min(0)])
        .split(area);
    chat::render_panel(f, app, columns[0]);
    render_workspace(f, app, columns[1]);
}

fn render_workspace(f: &mut Frame<'_>, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(26),
            Constraint::Min(20),
            Constraint::Length(34),
        ])
        .split(area);
    render_tree(f, app, columns[0]);
    render_editor(f, app, columns[1]);
    render_preview(f, app, columns[2]);
}

fn render_tree(f: &mut Frame<'_>, app: &App, area: Rect) {
    let theme = &app.theme;
    let focused = app.focus == Focus::Tree;
    let project = &app.state().project;
    let items = app.tree.visible(&project.files);
    let active = app.active_file_node().map(|node| node.id.as_str());
    let title = format!(" {} ", project.name.to_uppercase());

    TreeWidget {
        title: &title,
        items: &items,
        selected: focused.then_some(app.tree.cursor()),
        active,
        style: TreeStyle {
            normal: Style::default().fg(theme.text_dim),
            directory: Style::default().fg(theme.text),
            active: Style::default().fg(theme.neon_blue),
            selected: Style::default()
                .bg(theme.bg_highlight)
                .add_modifier(Modifier::BOLD),
            border: Style::default().fg(if focused {
                theme.border_focus
            } else {
                theme.border
            }),
        },
    }
    .render(f, area);
}

fn render_editor(f: &mut Frame<'_>, app: &App, area: Rect) {
    let theme = &app.theme;
    let border = Style::default().fg(theme.border);
    let Some(file) = app.active_file_node() else {
        let empty = Paragraph::new(NO_FILE_TEXT)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.text_muted))
            .block(Block::default().borders(Borders::ALL).border_style(border));
        f.render_widget(empty, area);
        return;
    };

    let highlighter = SyntaxHighlighter {
        plain_color: theme.text,
        keyword_color: theme.neon_purple,
        string_color: theme.neon_green,
        comment_color: theme.text_muted,
        type_color: theme.neon_amber,
        bracket_color: theme.text_dim,
        line_number_color: theme.border,
        border_style: Style::default().fg(theme.neon_blue),
    };
    let title = format!(" {} ", file.name);
    highlighter.render(f, area, &title, file.content().unwrap_or_default());
}

fn render_preview(f: &mut Frame<'_>, app: &App, area: Rect) {
    let theme = &app.theme;
    let block = Block::default()
        .title(Line::from(vec![
            Span::styled(" Preview ", Style::default().fg(theme.neon_green)),
            Span::styled("| Terminal ", Style::default().fg(theme.text_muted)),
        ]))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(TERMINAL_LINES.len() as u16 + 1)])
        .split(inner);

    let preview = vec![
        Line::from(Span::styled("● ● ●  localhost:3000", Style::default().fg(theme.text_dim))),
        Line::from(""),
        Line::from(Span::styled(
            "App Preview Active",
            Style::default()
                .fg(theme.text_dim)
                .add_modifier(Modifier::SLOW_BLINK),
        )),
    ];
    f.render_widget(Paragraph::new(preview).alignment(Alignment::Center), rows[0]);

    let colors = [
        theme.neon_green,
        theme.text_dim,
        theme.text_muted,
        theme.neon_blue,
        theme.neon_green,
    ];
    let terminal: Vec<Line> = TERMINAL_LINES
        .iter()
        .zip(colors)
        .map(|(text, color)| Line::from(Span::styled(*text, Style::default().fg(color))))
        .collect();
    f.render_widget(
        Paragraph::new(terminal).block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(theme.border)),
        ),
        rows[1],
    );
}
