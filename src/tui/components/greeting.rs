//! # Greeting Component
//!
//! The display target. Shows the last applied greeting, or a hint while
//! nothing has been greeted yet.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

use crate::tui::component::Component;

pub const PLACEHOLDER: &str = "Type a name and press Enter";

pub struct Greeting {
    pub text: String,
}

impl Greeting {
    pub fn new(text: String) -> Self {
        Self { text }
    }
}

impl Component for Greeting {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let (content, style) = if self.text.is_empty() {
            (
                PLACEHOLDER,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            (
                self.text.as_str(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        };

        let paragraph = Paragraph::new(content)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .style(style)
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .title("Greeting"),
            );
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(text: &str) -> String {
        let backend = TestBackend::new(40, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut greeting = Greeting::new(text.to_string());
        terminal.draw(|f| greeting.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_renders_greeting_text() {
        let text = rendered("Hello, Ada!");
        assert!(text.contains("Hello, Ada!"));
        assert!(!text.contains(PLACEHOLDER));
    }

    #[test]
    fn test_renders_placeholder_when_empty() {
        assert!(rendered("").contains(PLACEHOLDER));
    }
}
