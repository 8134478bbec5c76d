//! # InputBox Component
//!
//! The name field of the greet form.
//!
//! ## Responsibilities
//!
//! - Capture text input (typing, paste, backspace)
//! - Turn Enter into a form submission
//! - Render the current name with the cursor at its end
//!
//! ## State Management
//!
//! The text lives in an [`InputHandle`] shared with the binder, which reads it
//! at trigger time. Editing stays possible while a greeting is in flight.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::binder::FormSubmit;
use crate::core::greeter::InputHandle;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted the form (Enter pressed)
    Submit(FormSubmit),
    /// Text content changed
    ContentChanged,
}

pub struct InputBox {
    input: InputHandle,
}

impl InputBox {
    pub fn new(input: InputHandle) -> Self {
        Self { input }
    }

    pub fn text(&self) -> String {
        self.input.read()
    }

    /// The form's default submit behavior: reset the field.
    pub fn reset(&mut self) {
        self.input.clear();
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let text = self.input.read();
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title("Enter your name");

        // Keep the tail visible when the name is wider than the box
        let inner_width = area.width.saturating_sub(2) as usize;
        let width = text.width();
        let scroll = width.saturating_sub(inner_width.saturating_sub(1));

        let input = Paragraph::new(text.as_str())
            .block(block)
            .scroll((0, scroll as u16))
            .style(Style::default().fg(Color::Green));
        frame.render_widget(input, area);

        let cursor_x = area.x + 1 + (width - scroll) as u16;
        frame.set_cursor_position((cursor_x, area.y + 1));
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.input.push(*c);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // Single-line field
                let line = text.replace(['\r', '\n'], " ");
                self.input.push_str(&line);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => self.input.pop().map(|_| InputEvent::ContentChanged),
            TuiEvent::Submit => Some(InputEvent::Submit(FormSubmit::new())),
            _ => None,
        }
    }
}
