//! Collapsible file tree widget.
//!
//! The project tree is flattened into visible rows on every render. Which
//! directories are collapsed and where the cursor sits live in
//! [`FileTreeState`]; the nodes themselves stay in the swarm state.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};
use std::collections::HashSet;
use vibe_core::{FileNode, NodeKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeItem {
    pub id: String,
    pub label: String,
    pub depth: usize,
    pub expanded: bool,
    pub is_directory: bool,
}

/// What activating a row did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeSignal {
    /// A directory opened or closed. Selection is unchanged.
    Toggled { id: String, expanded: bool },
    /// A file was chosen.
    Selected(String),
}

/// Visible rows, depth first. Children of collapsed directories are skipped.
pub fn flatten(nodes: &[FileNode], collapsed: &HashSet<String>) -> Vec<TreeItem> {
    let mut items = Vec::new();
    flatten_into(nodes, 0, collapsed, &mut items);
    items
}

fn flatten_into(
    nodes: &[FileNode],
    depth: usize,
    collapsed: &HashSet<String>,
    out: &mut Vec<TreeItem>,
) {
    for node in nodes {
        match &node.kind {
            NodeKind::File { .. } => out.push(TreeItem {
                id: node.id.clone(),
                label: node.name.clone(),
                depth,
                expanded: false,
                is_directory: false,
            }),
            NodeKind::Directory { children } => {
                let expanded = !collapsed.contains(&node.id);
                out.push(TreeItem {
                    id: node.id.clone(),
                    label: node.name.clone(),
                    depth,
                    expanded,
                    is_directory: true,
                });
                if expanded {
                    flatten_into(children, depth + 1, collapsed, out);
                }
            }
        }
    }
}

/// Directories start open.
#[derive(Debug, Clone, Default)]
pub struct FileTreeState {
    collapsed: HashSet<String>,
    cursor: usize,
}

impl FileTreeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        !self.collapsed.contains(id)
    }

    pub fn visible(&self, files: &[FileNode]) -> Vec<TreeItem> {
        flatten(files, &self.collapsed)
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self, files: &[FileNode]) {
        let len = self.visible(files).len();
        if self.cursor + 1 < len {
            self.cursor += 1;
        }
    }

    /// Keep the cursor on a row after the tree shrank or was replaced.
    pub fn clamp(&mut self, files: &[FileNode]) {
        let len = self.visible(files).len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    /// Flip a directory open or closed. Returns the new expanded state.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.collapsed.remove(id) {
            true
        } else {
            self.collapsed.insert(id.to_string());
            false
        }
    }

    /// Act on the row under the cursor.
    pub fn activate(&mut self, files: &[FileNode]) -> Option<TreeSignal> {
        let item = self.visible(files).into_iter().nth(self.cursor)?;
        if item.is_directory {
            let expanded = self.toggle(&item.id);
            self.clamp(files);
            Some(TreeSignal::Toggled { id: item.id, expanded })
        } else {
            Some(TreeSignal::Selected(item.id))
        }
    }

    /// Forget collapsed directories and return to the top row.
    pub fn reset(&mut self) {
        self.collapsed.clear();
        self.cursor = 0;
    }
}

#[derive(Debug, Clone)]
pub struct TreeStyle {
    pub normal: Style,
    pub directory: Style,
    pub active: Style,
    pub selected: Style,
    pub border: Style,
}

pub struct TreeWidget<'a> {
    pub title: &'a str,
    pub items: &'a [TreeItem],
    /// Cursor row, highlighted only while the tree has focus.
    pub selected: Option<usize>,
    /// The file shown in the editor.
    pub active: Option<&'a str>,
    pub style: TreeStyle,
}

impl<'a> TreeWidget<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let rows: Vec<ListItem> = self
            .items
            .iter()
            .map(|item| {
                let indent = "  ".repeat(item.depth);
                let (marker, style) = if item.is_directory {
                    let marker = if item.expanded { "▾ " } else { "▸ " };
                    (marker, self.style.directory)
                } else if self.active == Some(item.id.as_str()) {
                    ("  ", self.style.active)
                } else {
                    ("  ", self.style.normal)
                };
                ListItem::new(Line::from(vec![
                    Span::raw(indent),
                    Span::styled(format!("{}{}", marker, item.label), style),
                ]))
            })
            .collect();

        let list = List::new(rows)
            .block(
                Block::default()
                    .title(self.title)
                    .borders(Borders::ALL)
                    .border_style(self.style.border),
            )
            .highlight_style(self.style.selected);

        let mut state = ListState::default();
        state.select(self.selected);
        f.render_stateful_widget(list, area, &mut state);
    }
}
