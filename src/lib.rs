//! # tailsift - Live Filter for Endless Input Streams
//!
//! tailsift reads lines from a live, unbounded input stream and shows the most recent
//! lines that match a filter the user types, re-rendering on every keystroke while new
//! lines keep arriving underneath.
//!
//! ## Architecture
//!
//! - [`store`] - Append-only line store shared by the reader and the renderer
//! - [`stream`] - Background reader that frames input bytes into lines
//! - [`filter`] - Include/exclude query parsing and line matching
//! - [`render`] - Per-event render pipeline and the terminal painter
//! - [`input`] - Filter text editing and terminal event polling
//! - [`app`] - Event loop tying the pieces together
//! - [`config`] - Settings from defaults, config file and command line
//! - [`error`] - Centralized error types

// Core modules
pub mod error;
pub mod filter;
pub mod store;
pub mod stream;

// Subsystems
pub mod input;
pub mod render;

// Application wiring
pub mod app;
pub mod config;

// Re-export commonly used types for convenience
pub use error::{Result, SiftError};

// Public API surface for external usage
pub use app::Application;
pub use config::Settings;
pub use filter::Query;
pub use render::{Frame, RenderOptions, RenderPipeline, Viewport};
pub use store::LineStore;
pub use stream::StreamReader;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
