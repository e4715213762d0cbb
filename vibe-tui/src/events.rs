//! Event types for the TUI event loop.

use crossterm::event::KeyEvent;
use vibe_swarm::SwarmEvent;

#[derive(Debug, Clone)]
pub enum TuiEvent {
    Input(KeyEvent),
    Tick,
    Resize { width: u16, height: u16 },
    Swarm(Box<SwarmEvent>),
}

impl From<SwarmEvent> for TuiEvent {
    fn from(event: SwarmEvent) -> Self {
        TuiEvent::Swarm(Box::new(event))
    }
}
