//! Application state and key action handling.

use crate::config::VibeConfig;
use crate::keys::{Action, Focus};
use crate::notifications::{Notification, NotificationLevel};
use crate::theme::{ThemeName, VibeTheme};
use crate::widgets::{FileTreeState, TreeSignal};
use chrono::{Duration, Utc};
use crossterm::event::KeyEvent;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders};
use tui_textarea::TextArea;
use vibe_core::{FileNode, ViewMode};
use vibe_swarm::{PushRequest, Swarm, SwarmEvent, SwarmState};

pub const INPUT_PLACEHOLDER: &str = "Build me a SaaS dashboard with...";

/// How long a notification stays in the footer.
pub const NOTIFICATION_TTL_SECS: i64 = 6;

const MAX_NOTIFICATIONS: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modal {
    pub title: String,
    pub message: String,
}

pub struct App {
    pub config: VibeConfig,
    pub theme: VibeTheme,
    pub swarm: Swarm,
    pub input: TextArea<'static>,
    pub focus: Focus,
    pub tree: FileTreeState,
    /// File chosen in the tree, if any.
    pub active_file: Option<String>,
    pub modal: Option<Modal>,
    pub notifications: Vec<Notification>,
    pub should_quit: bool,
    pub tick: u64,
}

impl App {
    pub fn new(config: VibeConfig, swarm: Swarm) -> Self {
        let theme = config
            .ui
            .theme
            .parse::<ThemeName>()
            .map(VibeTheme::named)
            .unwrap_or_default();
        let mut app = Self {
            config,
            input: TextArea::default(),
            theme,
            swarm,
            focus: Focus::Input,
            tree: FileTreeState::new(),
            active_file: None,
            modal: None,
            notifications: Vec::new(),
            should_quit: false,
            tick: 0,
        };
        app.reset_input();
        app
    }

    pub fn state(&self) -> &SwarmState {
        self.swarm.state()
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        let note = Notification::new(level, message);
        tracing::debug!(level = note.level.label(), message = %note.message, "Notification");
        self.notifications.push(note);
        if self.notifications.len() > MAX_NOTIFICATIONS {
            self.notifications.remove(0);
        }
    }

    /// Most recent notification still within its display window.
    pub fn current_notification(&self) -> Option<&Notification> {
        let ttl = Duration::seconds(NOTIFICATION_TTL_SECS);
        self.notifications
            .last()
            .filter(|note| note.is_fresh(Utc::now(), ttl))
    }

    pub fn input_text(&self) -> String {
        self.input.lines().join("\n")
    }

    /// The file shown in the editor: the chosen file while it still exists,
    /// otherwise the first file depth first.
    pub fn active_file_node(&self) -> Option<&FileNode> {
        let project = &self.state().project;
        self.active_file
            .as_deref()
            .and_then(|id| project.find_node(id))
            .filter(|node| !node.is_directory())
            .or_else(|| project.first_file())
    }

    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    pub fn apply_swarm_event(&mut self, event: SwarmEvent) {
        let was_processing = self.state().processing;
        let project_replaced = matches!(event, SwarmEvent::ProjectGenerated { .. });
        if let Some(notice) = self.swarm.apply(event) {
            self.notify(NotificationLevel::Success, notice);
        }
        if project_replaced {
            self.tree.reset();
            self.active_file = None;
        }
        if was_processing != self.state().processing {
            self.refresh_input_chrome();
        }
        if self.state().view_mode == ViewMode::Chat && self.focus == Focus::Tree {
            self.set_focus(Focus::Input);
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Submit => self.submit(),
            Action::ToggleView => self.toggle_view(),
            Action::SwitchFocus => {
                if self.state().view_mode == ViewMode::Code {
                    self.set_focus(self.focus.toggled());
                }
            }
            Action::MoveUp => self.tree.move_up(),
            Action::MoveDown => self.tree.move_down(&self.swarm.state().project.files),
            Action::Activate => self.activate_tree_row(),
            Action::Push => self.push(),
            Action::Confirm => self.confirm_modal(),
            Action::Cancel => self.modal = None,
            Action::Edit(key) => self.edit(key),
        }
    }

    fn submit(&mut self) {
        let text = self.input_text();
        if self.swarm.submit(&text) {
            tracing::info!(chars = text.chars().count(), "Prompt submitted");
            self.reset_input();
            self.set_focus(Focus::Input);
        }
    }

    fn edit(&mut self, key: KeyEvent) {
        if self.state().processing {
            return;
        }
        self.input.input(key);
    }

    fn toggle_view(&mut self) {
        match self.swarm.toggle_view() {
            Ok(mode) => {
                if mode == ViewMode::Chat {
                    self.set_focus(Focus::Input);
                }
            }
            Err(err) => self.notify(NotificationLevel::Warning, err.to_string()),
        }
    }

    fn activate_tree_row(&mut self) {
        match self.tree.activate(&self.swarm.state().project.files) {
            Some(TreeSignal::Selected(id)) => {
                tracing::debug!(file = %id, "File selected");
                self.active_file = Some(id);
            }
            Some(TreeSignal::Toggled { id, expanded }) => {
                tracing::debug!(directory = %id, expanded, "Directory toggled");
            }
            None => {}
        }
    }

    fn push(&mut self) {
        if self.state().view_mode != ViewMode::Code {
            self.notify(NotificationLevel::Warning, "Push is available from the IDE view");
            return;
        }
        match self.swarm.request_push() {
            PushRequest::NeedsConfirmation { prompt } => {
                self.modal = Some(Modal {
                    title: "Push to GitHub".to_string(),
                    message: prompt.to_string(),
                });
            }
            PushRequest::Pushing { notice } => self.notify(NotificationLevel::Info, notice),
        }
    }

    fn confirm_modal(&mut self) {
        if self.modal.take().is_some() {
            let notice = self.swarm.confirm_push();
            self.notify(NotificationLevel::Info, notice);
        }
    }

    fn set_focus(&mut self, focus: Focus) {
        if self.focus != focus {
            self.focus = focus;
            self.refresh_input_chrome();
        }
    }

    fn reset_input(&mut self) {
        let mut input = TextArea::default();
        input.set_placeholder_text(INPUT_PLACEHOLDER);
        input.set_placeholder_style(Style::default().fg(self.theme.text_muted));
        input.set_cursor_line_style(Style::default());
        input.set_style(Style::default().fg(self.theme.text));
        self.input = input;
        self.refresh_input_chrome();
    }

    /// Border and cursor reflect focus and whether input is accepted.
    fn refresh_input_chrome(&mut self) {
        let enabled = !self.state().processing && self.focus == Focus::Input;
        let border = if enabled {
            self.theme.border_focus
        } else {
            self.theme.border
        };
        let cursor = if enabled {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        self.input.set_cursor_style(cursor);
        self.input.set_block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        );
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("swarm", &self.swarm)
            .field("focus", &self.focus)
            .field("active_file", &self.active_file)
            .field("modal", &self.modal)
            .field("tick", &self.tick)
            .finish_non_exhaustive()
    }
}
