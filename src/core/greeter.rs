//! # Greet Wiring
//!
//! Binds the service's `greet` to three UI handles:
//!
//! ```text
//! InputHandle ──read at trigger──▶ greet(name) ──▶ DisplayHandle
//!                                      │
//!                  ControlHandle ◀─────┘ disabled while pending
//! ```
//!
//! The handles are cheap `Arc` clones. The UI keeps one copy for rendering,
//! the binder keeps another for its side effects.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::core::binder::{ActionBinder, ActionFailure, ActionResult, FormSubmit};
use crate::service::GreetService;

fn lock(text: &Mutex<String>) -> MutexGuard<'_, String> {
    text.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The free-text name field.
#[derive(Debug, Clone, Default)]
pub struct InputHandle(Arc<Mutex<String>>);

impl InputHandle {
    pub fn new(initial: impl Into<String>) -> Self {
        Self(Arc::new(Mutex::new(initial.into())))
    }

    pub fn read(&self) -> String {
        lock(&self.0).clone()
    }

    pub fn push(&self, c: char) {
        lock(&self.0).push(c);
    }

    pub fn push_str(&self, s: &str) {
        lock(&self.0).push_str(s);
    }

    pub fn pop(&self) -> Option<char> {
        lock(&self.0).pop()
    }

    pub fn clear(&self) {
        lock(&self.0).clear();
    }
}

/// The actionable control (the Greet button).
#[derive(Debug, Clone)]
pub struct ControlHandle(Arc<AtomicBool>);

impl ControlHandle {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_enabled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.0.store(enabled, Ordering::SeqCst);
    }
}

impl Default for ControlHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// The text output element.
#[derive(Debug, Clone, Default)]
pub struct DisplayHandle(Arc<Mutex<String>>);

impl DisplayHandle {
    pub fn text(&self) -> String {
        lock(&self.0).clone()
    }

    pub fn set_text(&self, text: impl Into<String>) {
        *lock(&self.0) = text.into();
    }

    pub fn clear(&self) {
        lock(&self.0).clear();
    }
}

/// Binds `service.greet` to the given handles.
///
/// On failure the display keeps its previous text unless `render_failures`
/// is set, in which case it shows `Error: {reason}`.
pub fn greet_binder(
    service: Arc<dyn GreetService>,
    input: InputHandle,
    control: ControlHandle,
    display: DisplayHandle,
    render_failures: bool,
) -> ActionBinder<String, String> {
    ActionBinder::bind(
        move || input.read(),
        move |name: String| {
            let service = Arc::clone(&service);
            async move { service.greet(&name).await.map_err(ActionFailure::from) }
        },
        move |enabled| control.set_enabled(enabled),
        move |result: ActionResult<String>| match result {
            Ok(greeting) => display.set_text(greeting),
            Err(failure) if render_failures => display.set_text(format!("Error: {failure}")),
            Err(_) => {}
        },
    )
}

/// Greets `name` once through a freshly bound binder and returns the outcome.
/// Used by the headless `--once` mode.
pub async fn greet_once(service: Arc<dyn GreetService>, name: &str) -> ActionResult<String> {
    let outcome: Arc<Mutex<Option<ActionResult<String>>>> = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&outcome);
    let input = InputHandle::new(name);

    let binder = ActionBinder::bind(
        move || input.read(),
        move |name: String| {
            let service = Arc::clone(&service);
            async move { service.greet(&name).await.map_err(ActionFailure::from) }
        },
        |_| {},
        move |result| {
            *sink.lock().unwrap_or_else(PoisonError::into_inner) = Some(result);
        },
    );

    if let Some(invocation) = binder.activate(&mut FormSubmit::new()) {
        invocation.await;
    }

    let result = outcome
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .take();
    result.unwrap_or_else(|| Err(ActionFailure::Unavailable("no result was produced".to_string())))
}
