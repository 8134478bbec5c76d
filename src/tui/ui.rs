use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{Greeting, SubmitButton, TitleBar};

const HELP_TEXT: &str = "Enter: greet · Ctrl+L: clear · Esc: quit";

pub fn draw_ui(frame: &mut Frame, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(3), Length(3), Length(1)]);
    let [title_area, greeting_area, form_area, help_area] = layout.areas(frame.area());
    let [input_area, button_area] = Layout::horizontal([Min(10), Length(11)]).areas(form_area);

    let mut title_bar = TitleBar::new(tui.service_name.clone(), tui.status_message());
    title_bar.render(frame, title_area);

    let mut greeting = Greeting::new(tui.display.text());
    greeting.render(frame, greeting_area);

    tui.input_box.render(frame, input_area);

    let mut button = SubmitButton::new("Greet", tui.control.is_enabled());
    button.render(frame, button_area);

    frame.render_widget(
        Span::styled(HELP_TEXT, Style::default().fg(Color::DarkGray)),
        help_area,
    );
}
