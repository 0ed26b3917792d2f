//! The compositor state and its event handlers.
//!
//! [`Stage`] is driven by a single-threaded event loop: every backend
//! notification maps to one `handle_*` method, which runs to completion and
//! issues backend commands before returning.

mod focus_handlers;
mod keyboard_handlers;
mod lock_handlers;
mod output_handlers;
mod pointer_handlers;
mod state;
mod view_handlers;
mod workspace_handlers;

pub use keyboard_handlers::KeyDispatch;
pub use state::{FocusState, FocusTarget, LayerSurface, Stage, StageSettings};
