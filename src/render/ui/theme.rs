//! Color theme and styling definitions using ratatui colors

use ratatui::style::{Color, Style};

/// Color theme for terminal UI elements
#[derive(Debug, Clone)]
pub struct ColorTheme {
    /// Matched log lines
    pub content: Style,

    /// Filter input row
    pub input: Style,

    /// Status line summarizing terms and line count
    pub status: Style,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            content: Style::default(),
            input: Style::default(),
            status: Style::default().fg(Color::Rgb(0x0C, 0x8C, 0x6C)),
        }
    }
}

impl ColorTheme {
    /// Create a monochrome theme for terminals without color support
    pub fn monochrome() -> Self {
        Self {
            content: Style::default(),
            input: Style::default(),
            status: Style::default(),
        }
    }
}
