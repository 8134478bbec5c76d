//! # Core Application Logic
//!
//! Everything here is independent of the terminal. The TUI (or a test) hands
//! in the capabilities the binder needs and drives the returned invocations.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │                         │
//!                    │  • ActionBinder         │
//!                    │  • greet wiring         │
//!                    │  • config               │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │  headless  │      │   tests    │
//!     │  Adapter   │      │   --once   │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`binder`]: the single-in-flight `ActionBinder`
//! - [`greeter`]: handles and the greet action bound to them
//! - [`config`]: file/env/CLI settings

pub mod binder;
pub mod config;
pub mod greeter;
