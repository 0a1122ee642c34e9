//! Input subsystem: filter text editing and terminal event polling.

pub mod service;

// Public re-exports for convenience. Modules outside this crate should prefer importing
// from `crate::input` rather than reaching into submodules.
pub use service::{
    render_input_row, spawn_input_thread, FilterInput, InputAction, InputService,
    DEFAULT_CHAR_LIMIT, DEFAULT_PLACEHOLDER,
};
