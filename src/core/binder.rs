//! # Action Binder
//!
//! Wires a trigger (form submission) to one asynchronous action and keeps the
//! bound control and the display target consistent with it.
//!
//! ```text
//!            activate()                         action resolves
//!   Idle ─────────────────────▶ Pending ───────────────────────────▶ Idle
//!          prevent_default()              set_enabled(true)
//!          extract request                apply(result)
//!          set_enabled(false)
//!          perform(request)
//! ```
//!
//! A second activation while Pending is dropped, not queued. The binder never
//! looks anything up by name: the input reader, the action, the enable setter
//! and the result sink are all handed to [`ActionBinder::bind`].
//!
//! The Idle/Pending transition and the matching `set_enabled` call happen under
//! the same lock, so disable/enable strictly alternate even when invocations
//! complete on another worker thread. The result is applied under that lock
//! too, so `invalidate()` cannot slip in between settling and applying.

use std::any::Any;
use std::fmt;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};

use futures::future::{self, BoxFuture, FutureExt};
use log::{debug, info, warn};
use thiserror::Error;

/// Busy/idle state of a bound control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionState {
    #[default]
    Idle,
    Pending,
}

/// Why an action produced no value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionFailure {
    /// The action ran and reported an error (e.g. the remote service is down).
    #[error("action unavailable: {0}")]
    Unavailable(String),
    /// The action panicked instead of returning.
    #[error("action panicked: {0}")]
    Panicked(String),
}

impl ActionFailure {
    fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        ActionFailure::Panicked(panic_message(payload.as_ref()))
    }
}

/// Outcome of one invocation, consumed once by the result sink.
pub type ActionResult<T> = Result<T, ActionFailure>;

/// An activation event whose default platform behavior can be suppressed.
pub trait Trigger {
    fn prevent_default(&mut self);
}

/// A form submission. Its default behavior (resetting the form) runs only if
/// nobody called `prevent_default()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSubmit {
    default_prevented: bool,
}

impl FormSubmit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

impl Trigger for FormSubmit {
    fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}

/// Identity of an accepted activation. Increases by one per accepted trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InvocationId(u64);

impl InvocationId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for InvocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

type ExtractFn<R> = dyn Fn() -> R + Send + Sync;
type PerformFn<R, T> = dyn Fn(R) -> BoxFuture<'static, ActionResult<T>> + Send + Sync;
type SetEnabledFn = dyn Fn(bool) + Send + Sync;
type ApplyFn<T> = dyn Fn(ActionResult<T>) + Send + Sync;

#[derive(Debug, Default)]
struct Lifecycle {
    state: ActionState,
    issued: u64,
    /// Set by `invalidate()`; the in-flight result will not be applied.
    stale: bool,
}

struct Shared<R, T> {
    lifecycle: Mutex<Lifecycle>,
    extract: Box<ExtractFn<R>>,
    perform: Box<PerformFn<R, T>>,
    set_enabled: Box<SetEnabledFn>,
    apply: Box<ApplyFn<T>>,
}

impl<R, T> Shared<R, T> {
    fn lock(&self) -> MutexGuard<'_, Lifecycle> {
        self.lifecycle.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Pending → Idle and re-enable the control. Returns whether the result
    /// should still be applied.
    fn settle_locked(&self, lifecycle: &mut Lifecycle, id: InvocationId) -> bool {
        lifecycle.state = ActionState::Idle;
        (self.set_enabled)(true);
        let fresh = !lifecycle.stale;
        lifecycle.stale = false;
        if !fresh {
            debug!("Invocation {id} settled stale, result discarded");
        }
        fresh
    }

    fn settle(&self, id: InvocationId) {
        let mut lifecycle = self.lock();
        self.settle_locked(&mut lifecycle, id);
    }

    /// Settles and applies under one lock, so an `invalidate()` either lands
    /// before the staleness check or observes the result already applied.
    fn finish(&self, id: InvocationId, result: ActionResult<T>) {
        let mut lifecycle = self.lock();
        if self.settle_locked(&mut lifecycle, id) {
            self.apply_result(id, result);
        }
    }

    fn apply_result(&self, id: InvocationId, result: ActionResult<T>) {
        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| (self.apply)(result))) {
            warn!(
                "Result sink panicked for invocation {id}: {}",
                panic_message(payload.as_ref())
            );
        }
    }
}

/// Restores Idle if an invocation is dropped before its action resolved.
struct SettleGuard<R, T> {
    shared: Arc<Shared<R, T>>,
    id: InvocationId,
    armed: bool,
}

impl<R, T> Drop for SettleGuard<R, T> {
    fn drop(&mut self) {
        if self.armed {
            debug!("Invocation {} dropped before completion", self.id);
            self.shared.settle(self.id);
        }
    }
}

/// Single-in-flight binder for one asynchronous action.
///
/// Cloning is cheap and every clone shares the same Idle/Pending state.
pub struct ActionBinder<R, T> {
    shared: Arc<Shared<R, T>>,
}

impl<R, T> Clone for ActionBinder<R, T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<R, T> ActionBinder<R, T>
where
    R: Send + 'static,
    T: Send + 'static,
{
    /// Binds an action to a control.
    ///
    /// - `extract` reads the current input into a request. It runs once per
    ///   accepted activation, at trigger time.
    /// - `perform` starts the action for a request.
    /// - `set_enabled` toggles the bound control.
    /// - `apply` renders the outcome. Panics inside it are caught and dropped.
    ///
    /// `extract`, `set_enabled` and `apply` run while the binder holds its
    /// state lock and must not call back into the binder.
    pub fn bind<E, P, Fut, S, A>(extract: E, perform: P, set_enabled: S, apply: A) -> Self
    where
        E: Fn() -> R + Send + Sync + 'static,
        P: Fn(R) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ActionResult<T>> + Send + 'static,
        S: Fn(bool) + Send + Sync + 'static,
        A: Fn(ActionResult<T>) + Send + Sync + 'static,
    {
        Self {
            shared: Arc::new(Shared {
                lifecycle: Mutex::new(Lifecycle::default()),
                extract: Box::new(extract),
                perform: Box::new(move |request: R| perform(request).boxed()),
                set_enabled: Box::new(set_enabled),
                apply: Box::new(apply),
            }),
        }
    }

    /// Handles one activation.
    ///
    /// The trigger's default behavior is always suppressed. Returns `None` when
    /// the activation was dropped because an invocation is already pending;
    /// otherwise the action has been started and the returned [`Invocation`]
    /// must be driven to completion (spawned or awaited) for its result to be
    /// applied. Dropping it early still returns the binder to Idle.
    pub fn activate<G>(&self, trigger: &mut G) -> Option<Invocation>
    where
        G: Trigger + ?Sized,
    {
        trigger.prevent_default();

        let (id, request) = {
            let mut lifecycle = self.shared.lock();
            if lifecycle.state == ActionState::Pending {
                debug!(
                    "Activation dropped: invocation #{} still pending",
                    lifecycle.issued
                );
                return None;
            }
            let request = (self.shared.extract)();
            lifecycle.issued += 1;
            lifecycle.state = ActionState::Pending;
            lifecycle.stale = false;
            (self.shared.set_enabled)(false);
            (InvocationId(lifecycle.issued), request)
        };
        debug!("Invocation {id} started");

        let mut guard = SettleGuard {
            shared: Arc::clone(&self.shared),
            id,
            armed: true,
        };

        let action = match panic::catch_unwind(AssertUnwindSafe(|| (self.shared.perform)(request))) {
            Ok(action) => AssertUnwindSafe(action)
                .catch_unwind()
                .map(|outcome| outcome.unwrap_or_else(|payload| Err(ActionFailure::from_panic(payload))))
                .boxed(),
            Err(payload) => future::ready(Err(ActionFailure::from_panic(payload))).boxed(),
        };

        let future = async move {
            let result = action.await;
            guard.armed = false;
            match &result {
                Ok(_) => debug!("Invocation {id} succeeded"),
                Err(failure) => info!("Invocation {id} failed: {failure}"),
            }
            guard.shared.finish(id, result);
        };

        Some(Invocation {
            id,
            future: future.boxed(),
        })
    }

    /// Marks the in-flight invocation, if any, as stale. It still returns the
    /// binder to Idle and re-enables the control, but its result is discarded.
    pub fn invalidate(&self) {
        let mut lifecycle = self.shared.lock();
        if lifecycle.state == ActionState::Pending {
            debug!("Invocation #{} invalidated", lifecycle.issued);
            lifecycle.stale = true;
        }
    }

    pub fn state(&self) -> ActionState {
        self.shared.lock().state
    }

    pub fn is_pending(&self) -> bool {
        self.state() == ActionState::Pending
    }
}

/// A started action. Resolves once the result has been applied.
#[must_use = "an invocation only applies its result when driven to completion"]
pub struct Invocation {
    id: InvocationId,
    future: BoxFuture<'static, ()>,
}

impl Invocation {
    pub fn id(&self) -> InvocationId {
        self.id
    }
}

impl fmt::Debug for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invocation").field("id", &self.id).finish()
    }
}

impl Future for Invocation {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        self.future.as_mut().poll(cx)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
