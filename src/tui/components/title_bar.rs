//! # TitleBar Component
//!
//! Top status bar showing which service answers and whether a greeting is
//! in flight.
//!
//! Stateless: it receives everything as props and renders a single line.
//!
//! 1. **Status message**: `"Greeter (service: http) | Greeting..."`
//! 2. **Default**: `"Greeter (service: http)"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

/// Top status bar component.
pub struct TitleBar {
    /// Name of the greet service (e.g., "local", "http")
    pub service_name: String,
    /// Transient status (e.g., "Greeting...")
    pub status_message: String,
}

impl TitleBar {
    pub fn new(service_name: String, status_message: String) -> Self {
        Self {
            service_name,
            status_message,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title_text = if self.status_message.is_empty() {
            format!("Greeter (service: {})", self.service_name)
        } else {
            format!(
                "Greeter (service: {}) | {}",
                self.service_name, self.status_message
            )
        };

        frame.render_widget(Span::raw(title_text), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(60, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| title_bar.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_title_bar_with_status_message() {
        let mut title_bar = TitleBar::new("http".to_string(), "Greeting...".to_string());
        let text = rendered(&mut title_bar);

        assert!(text.contains("Greeter (service: http)"));
        assert!(text.contains("| Greeting..."));
    }

    #[test]
    fn test_title_bar_default_no_status() {
        let mut title_bar = TitleBar::new("local".to_string(), String::new());
        let text = rendered(&mut title_bar);

        assert!(text.contains("Greeter (service: local)"));
        assert!(!text.contains('|'));
    }
}
