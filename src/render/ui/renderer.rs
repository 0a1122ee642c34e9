//! UI renderer trait
//!
//! This module defines the `UIRenderer` trait that paints finished frames and manages
//! terminal lifecycle hooks such as initialization and cleanup.

use crate::error::Result;
use crate::render::pipeline::Frame;

/// Core trait for painting frames to a display surface
pub trait UIRenderer {
    /// Paint one frame produced by the render pipeline
    fn render(&mut self, frame: &Frame) -> Result<()>;

    /// Initialize the terminal UI
    ///
    /// This method should:
    /// - Set up raw mode
    /// - Enter the alternate screen
    fn initialize(&mut self) -> Result<()>;

    /// Clean up and restore terminal state
    ///
    /// This method should:
    /// - Leave the alternate screen
    /// - Exit raw mode
    fn cleanup(&mut self) -> Result<()>;

    /// Get current terminal dimensions
    fn get_terminal_size(&self) -> Result<(u16, u16)>; // (width, height)
}
