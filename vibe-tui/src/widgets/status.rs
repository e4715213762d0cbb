//! Status indicator widget.

use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const PULSE_FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// A dot, a label and a status, on one line.
pub struct StatusIndicator<'a> {
    pub label: &'a str,
    pub status: &'a str,
    pub style: Style,
    /// Animate the dot with this tick count.
    pub pulse: Option<u64>,
}

impl<'a> StatusIndicator<'a> {
    pub fn dot(&self) -> &'static str {
        match self.pulse {
            Some(tick) => PULSE_FRAMES[(tick % PULSE_FRAMES.len() as u64) as usize],
            None => "●",
        }
    }

    pub fn line(&self) -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("{} ", self.dot()), self.style),
            Span::raw(format!("{} ", self.label)),
            Span::styled(self.status.to_string(), self.style),
        ])
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect, alignment: Alignment) {
        f.render_widget(Paragraph::new(self.line()).alignment(alignment), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulse_cycles() {
        let mut indicator = StatusIndicator {
            label: "Context 7",
            status: "Connected",
            style: Style::default(),
            pulse: None,
        };
        assert_eq!(indicator.dot(), "●");
        indicator.pulse = Some(5);
        assert_eq!(indicator.dot(), PULSE_FRAMES[1]);
    }
}
