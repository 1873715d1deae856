//! Terminal UI for the annotation form
//!
//! The UI thread owns all state. Network I/O runs on one worker thread per
//! submission and reports back over a channel drained by the event loop.

pub mod handlers;
pub mod input;
pub mod state;
pub mod view;

// Re-exports
pub use handlers::apply_action;
pub use input::{map_key, InputAction};
pub use state::{App, RequestState, SubmitError};
pub use view::{draw, render};
