//! Terminal UI implementation using ratatui
//!
//! Paints the frames produced by the render pipeline onto the alternate screen. Frame
//! contents are already laid out; this layer only maps rows onto terminal lines and
//! applies the theme to the input and status rows.

use crate::error::{Result, SiftError};
use crate::render::pipeline::Frame;
use crate::render::ui::{ColorTheme, UIRenderer};
use ratatui::crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    text::{Line, Text},
    widgets::Paragraph,
    Terminal,
};
use std::io::{self, Stdout};

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Terminal UI implementation with ratatui backend
pub struct TerminalUI {
    terminal: Option<CrosstermTerminal>,
    /// Raw mode is on; tracked apart from `terminal` so a failed setup is still undone
    raw_mode: bool,
    theme: ColorTheme,
}

impl TerminalUI {
    /// Create a terminal UI drawing with `theme`; the terminal is untouched until `initialize`
    pub fn new(theme: ColorTheme) -> Result<Self> {
        Ok(Self {
            terminal: None,
            raw_mode: false,
            theme,
        })
    }

    /// Alternate screen, bracketed paste and the ratatui terminal
    fn enter_screen() -> Result<CrosstermTerminal> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)
            .map_err(|err| SiftError::io("entering alternate screen", err))?;

        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend).map_err(|err| SiftError::ui(format!("terminal init: {err}")))
    }

    /// Map frame rows onto styled lines
    fn frame_text<'a>(frame: &'a Frame, theme: &ColorTheme) -> Text<'a> {
        let content_len = frame.content_rows().len();
        let lines: Vec<Line<'a>> = frame
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                let style = match idx.checked_sub(content_len) {
                    None => theme.content,
                    Some(0) => theme.input,
                    Some(_) => theme.status,
                };
                Line::styled(row.as_str(), style)
            })
            .collect();
        Text::from(lines)
    }
}

impl UIRenderer for TerminalUI {
    fn render(&mut self, frame: &Frame) -> Result<()> {
        if let Some(ref mut terminal) = self.terminal {
            let text = Self::frame_text(frame, &self.theme);
            terminal
                .draw(|f| {
                    let area = f.size();
                    f.render_widget(Paragraph::new(text), area);
                })
                .map_err(|err| SiftError::io("drawing frame", err))?;
        }
        Ok(())
    }

    fn initialize(&mut self) -> Result<()> {
        enable_raw_mode().map_err(|err| SiftError::io("enabling raw mode", err))?;
        self.raw_mode = true;

        match Self::enter_screen() {
            Ok(terminal) => {
                self.terminal = Some(terminal);
                log::debug!("terminal initialized");
                Ok(())
            }
            Err(err) => {
                if let Err(restore_err) = self.cleanup() {
                    log::warn!("restoring terminal after failed init: {restore_err}");
                }
                Err(err)
            }
        }
    }

    fn cleanup(&mut self) -> Result<()> {
        if self.raw_mode {
            self.terminal = None;
            self.raw_mode = false;
            disable_raw_mode()?;
            execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen)?;
            log::debug!("terminal restored");
        }
        Ok(())
    }

    fn get_terminal_size(&self) -> Result<(u16, u16)> {
        let (cols, rows) = ratatui::crossterm::terminal::size()?;
        Ok((cols, rows))
    }
}

impl Drop for TerminalUI {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::pipeline::{RenderOptions, RenderPipeline, Viewport};
    use crate::store::LineStore;
    use ratatui::style::Color;

    #[test]
    fn test_terminal_ui_creation() {
        let ui = TerminalUI::new(ColorTheme::default()).unwrap();
        assert!(ui.terminal.is_none());
        assert!(!ui.raw_mode);

        let mono = TerminalUI::new(ColorTheme::monochrome()).unwrap();
        assert_eq!(mono.theme.status.fg, None);
    }

    #[test]
    fn test_cleanup_without_initialize_leaves_terminal_alone() {
        let mut ui = TerminalUI::new(ColorTheme::default()).unwrap();
        assert!(ui.cleanup().is_ok());
        assert!(ui.cleanup().is_ok());
        assert!(!ui.raw_mode);
        assert!(ui.terminal.is_none());
    }

    #[test]
    fn test_render_before_initialize_is_noop() {
        let mut ui = TerminalUI::new(ColorTheme::default()).unwrap();
        let store = LineStore::with_capacity(1);
        let frame = RenderPipeline::default().render(&store, "", "> ", Viewport::new(80, 5));
        assert!(ui.render(&frame).is_ok());
    }

    #[test]
    fn test_frame_text_styles_last_two_rows() {
        let store = LineStore::with_capacity(2);
        store.append("one".to_string());
        store.append("two".to_string());
        let pipeline = RenderPipeline::new(RenderOptions {
            reserved_rows: 3,
            pad_reserve: None,
        });
        let frame = pipeline.render(&store, "", "> ", Viewport::new(80, 10));

        let theme = ColorTheme::default();
        let text = TerminalUI::frame_text(&frame, &theme);
        assert_eq!(text.lines.len(), 4);
        assert_eq!(text.lines[0].style.fg, None);
        assert_eq!(text.lines[2].style, theme.input);
        assert_eq!(text.lines[3].style.fg, Some(Color::Rgb(0x0C, 0x8C, 0x6C)));
    }
}
