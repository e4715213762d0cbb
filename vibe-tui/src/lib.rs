//! VibeCoder TUI library exports.

pub mod config;
pub mod error;
pub mod events;
pub mod keys;
pub mod notifications;
pub mod state;
pub mod telemetry;
pub mod theme;
pub mod views;
pub mod widgets;
