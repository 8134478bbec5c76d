//! # TUI Components
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: service name and busy status
//! - `Greeting`: the display target
//! - `SubmitButton`: the actionable control, enabled or greyed out
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `InputBox`: the name field; emits form submissions
//!
//! Components receive external data as props or shared handles, never by
//! reaching into global state.

mod title_bar;
pub use title_bar::TitleBar;

pub mod greeting;
pub mod input_box;
pub mod submit_button;
pub use greeting::Greeting;
pub use input_box::{InputBox, InputEvent};
pub use submit_button::SubmitButton;
