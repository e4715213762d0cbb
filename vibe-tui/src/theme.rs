//! Neon-on-dark theme and color utilities.

use crate::notifications::NotificationLevel;
use ratatui::style::Color;
use std::str::FromStr;
use vibe_core::{AgentStatus, MessageOrigin};

/// Supported theme names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeName {
    Vibe,
}

impl FromStr for ThemeName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vibe" => Ok(ThemeName::Vibe),
            other => Err(format!("unknown theme '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct VibeTheme {
    pub bg: Color,
    pub bg_panel: Color,
    pub bg_highlight: Color,
    pub neon_blue: Color,
    pub neon_purple: Color,
    pub neon_green: Color,
    pub neon_amber: Color,
    pub neon_pink: Color,
    pub text: Color,
    pub text_dim: Color,
    pub text_muted: Color,
    pub border: Color,
    pub border_focus: Color,
}

impl VibeTheme {
    pub fn vibe() -> Self {
        Self {
            bg: Color::Rgb(5, 5, 16),
            bg_panel: Color::Rgb(13, 13, 20),
            bg_highlight: Color::Rgb(38, 38, 64),
            neon_blue: Color::Rgb(0, 243, 255),
            neon_purple: Color::Rgb(188, 19, 254),
            neon_green: Color::Rgb(0, 255, 157),
            neon_amber: Color::Rgb(255, 184, 0),
            neon_pink: Color::Rgb(255, 0, 170),
            text: Color::Rgb(226, 226, 240),
            text_dim: Color::Rgb(140, 140, 170),
            text_muted: Color::Rgb(84, 84, 110),
            border: Color::Rgb(60, 60, 90),
            border_focus: Color::Rgb(0, 243, 255),
        }
    }

    pub fn named(name: ThemeName) -> Self {
        match name {
            ThemeName::Vibe => Self::vibe(),
        }
    }
}

impl Default for VibeTheme {
    fn default() -> Self {
        Self::vibe()
    }
}

pub fn agent_status_color(status: AgentStatus, theme: &VibeTheme) -> Color {
    match status {
        AgentStatus::Thinking => theme.neon_amber,
        AgentStatus::Working => theme.neon_blue,
        AgentStatus::Completed => theme.neon_green,
        AgentStatus::Error => theme.neon_pink,
        AgentStatus::Idle | AgentStatus::Waiting => theme.text_dim,
    }
}

pub fn message_origin_color(origin: MessageOrigin, theme: &VibeTheme) -> Color {
    match origin {
        MessageOrigin::User => theme.text,
        MessageOrigin::Assistant => theme.neon_purple,
        MessageOrigin::System => theme.text_muted,
    }
}

pub fn notification_color(level: NotificationLevel, theme: &VibeTheme) -> Color {
    match level {
        NotificationLevel::Info => theme.neon_blue,
        NotificationLevel::Warning => theme.neon_amber,
        NotificationLevel::Error => theme.neon_pink,
        NotificationLevel::Success => theme.neon_green,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_name_parse() {
        assert_eq!("Vibe".parse::<ThemeName>(), Ok(ThemeName::Vibe));
        assert!("synthwave".parse::<ThemeName>().is_err());
    }

    #[test]
    fn test_busy_statuses_are_highlighted() {
        let theme = VibeTheme::vibe();
        assert_eq!(agent_status_color(AgentStatus::Working, &theme), theme.neon_blue);
        assert_eq!(agent_status_color(AgentStatus::Idle, &theme), theme.text_dim);
    }
}
