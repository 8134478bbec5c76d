//! # TUI Adapter
//!
//! The ratatui-specific layer. Plays the part of the page: a name field, a
//! Greet button and a greeting display, all backed by handles that are
//! injected into the core [`ActionBinder`].
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! Each pass draws, polls for the first event, then drains everything already
//! queued before drawing again. Invocations run as tokio tasks and write to
//! the shared handles; the loop only reads them back when drawing. While a
//! greeting is pending the poll timeout is short so the button and status
//! update promptly when it lands.

mod component;
mod components;
mod event;
mod ui;

use log::{info, warn};
use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::core::binder::ActionBinder;
use crate::core::config::ResolvedConfig;
use crate::core::greeter::{ControlHandle, DisplayHandle, InputHandle, greet_binder};
use crate::service::{GreetService, build_service};
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const PENDING_POLL: Duration = Duration::from_millis(80);
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Presentation state plus the binder that drives it.
pub struct TuiState {
    pub input_box: InputBox,
    pub control: ControlHandle,
    pub display: DisplayHandle,
    pub binder: ActionBinder<String, String>,
    pub service_name: String,
}

impl TuiState {
    pub fn new(service: Arc<dyn GreetService>, render_failures: bool, initial_name: String) -> Self {
        let input = InputHandle::new(initial_name);
        let control = ControlHandle::new();
        let display = DisplayHandle::default();
        let service_name = service.name().to_string();
        let binder = greet_binder(
            service,
            input.clone(),
            control.clone(),
            display.clone(),
            render_failures,
        );

        Self {
            input_box: InputBox::new(input),
            control,
            display,
            binder,
            service_name,
        }
    }

    pub fn status_message(&self) -> String {
        if self.binder.is_pending() {
            "Greeting...".to_string()
        } else {
            String::new()
        }
    }
}

/// Whether the event loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Routes one event. Accepted submissions are spawned on the tokio runtime.
pub fn dispatch(tui: &mut TuiState, event: TuiEvent) -> Flow {
    match event {
        TuiEvent::Quit => return Flow::Quit,
        TuiEvent::Resize => {}
        TuiEvent::ClearGreeting => {
            tui.binder.invalidate();
            tui.display.clear();
        }
        event => {
            if let Some(InputEvent::Submit(mut submit)) = tui.input_box.handle_event(&event) {
                if let Some(invocation) = tui.binder.activate(&mut submit) {
                    info!("Greeting submitted ({})", invocation.id());
                    tokio::spawn(invocation);
                }
                if !submit.default_prevented() {
                    tui.input_box.reset();
                }
            }
        }
    }
    Flow::Continue
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock  // Non-blinking: redraws reset the blink timer
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste);
    }
}

pub fn run(config: ResolvedConfig, initial_name: Option<String>) -> std::io::Result<()> {
    let service = build_service(&config);
    let mut tui = TuiState::new(service, config.render_failures, initial_name.unwrap_or_default());

    let mut terminal = ratatui::init();
    let terminal_mode_guard = TerminalModeGuard::new()
        .inspect_err(|e| warn!("Failed to enable terminal modes: {}", e))
        .ok();

    let result = event_loop(&mut terminal, &mut tui);

    drop(terminal_mode_guard);
    ratatui::restore();
    info!("Greeter shutting down");
    result
}

fn event_loop(terminal: &mut DefaultTerminal, tui: &mut TuiState) -> std::io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw_ui(f, tui))?;

        let timeout = if tui.binder.is_pending() {
            PENDING_POLL
        } else {
            IDLE_POLL
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if dispatch(tui, event) == Flow::Quit {
                return Ok(());
            }
        }
    }
}
