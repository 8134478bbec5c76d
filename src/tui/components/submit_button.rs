//! # SubmitButton Component
//!
//! The form's actionable control. Purely presentational: `enabled` is a prop
//! read from the [`ControlHandle`](crate::core::greeter::ControlHandle) that
//! the binder toggles.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::tui::component::Component;

pub struct SubmitButton {
    pub label: String,
    pub enabled: bool,
}

impl SubmitButton {
    pub fn new(label: impl Into<String>, enabled: bool) -> Self {
        Self {
            label: label.into(),
            enabled,
        }
    }

    fn style(&self) -> Style {
        if self.enabled {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
        }
    }
}

impl Component for SubmitButton {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = self.style();
        let button = Paragraph::new(self.label.as_str())
            .alignment(Alignment::Center)
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(style),
            )
            .style(style);
        frame.render_widget(button, area);
    }
}
