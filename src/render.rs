//! Rendering subsystem.
//!
//! [`pipeline`] turns the line store and the current filter into a [`Frame`]; [`ui`]
//! paints frames onto the terminal.

pub mod pipeline;
pub mod ui;

pub use pipeline::{Frame, RenderOptions, RenderPipeline, Viewport, MIN_RESERVED_ROWS};
