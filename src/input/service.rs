//! High-level input service.
//!
//! Polls crossterm for terminal events, runs them through the filter editor, and yields
//! domain-level `InputAction`s that the application loop consumes.

use crate::error::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// Default maximum filter length in characters.
pub const DEFAULT_CHAR_LIMIT: usize = 1000;
/// Text shown in the input row while the filter is empty.
pub const DEFAULT_PLACEHOLDER: &str = "filter for words...";
/// Prompt drawn in front of the filter text.
pub const PROMPT: &str = "> ";

/// Poll timeout used when the caller does not provide one.
const DEFAULT_POLL_TIMEOUT_MS: u64 = 50;

/// High-level input actions emitted by the editor/service.
#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    /// The filter text changed; carries the full new text
    UpdateFilter(String),
    Resize {
        width: u16,
        height: u16,
    },
    Quit,
    NoAction,
}

/// Minimal single-line editor for the filter text.
#[derive(Debug, Clone)]
pub struct FilterInput {
    value: String,
    char_limit: usize,
}

impl FilterInput {
    pub fn new(char_limit: usize) -> Self {
        Self {
            value: String::new(),
            char_limit,
        }
    }

    /// Start with pre-filled text, clipped to the character limit.
    pub fn with_value(value: &str, char_limit: usize) -> Self {
        Self {
            value: value.chars().take(char_limit).collect(),
            char_limit,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> InputAction {
        if key_event.kind != KeyEventKind::Press {
            return InputAction::NoAction;
        }

        match (key_event.code, key_event.modifiers) {
            (KeyCode::Enter, _) | (KeyCode::Esc, _) => InputAction::Quit,
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => InputAction::Quit,
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                if self.value.is_empty() {
                    return InputAction::NoAction;
                }
                self.value.clear();
                self.changed()
            }
            (KeyCode::Char('w'), KeyModifiers::CONTROL) => {
                if self.value.is_empty() {
                    return InputAction::NoAction;
                }
                let kept = self.value.trim_end().rfind(' ').map_or(0, |idx| idx + 1);
                self.value.truncate(kept);
                self.changed()
            }
            (KeyCode::Char(ch), modifiers)
                if !ch.is_control()
                    && !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                if self.value.chars().count() >= self.char_limit {
                    return InputAction::NoAction;
                }
                self.value.push(ch);
                self.changed()
            }
            (KeyCode::Backspace, _) => {
                if self.value.pop().is_none() {
                    return InputAction::NoAction;
                }
                self.changed()
            }
            _ => InputAction::NoAction,
        }
    }

    fn changed(&self) -> InputAction {
        InputAction::UpdateFilter(self.value.clone())
    }
}

impl Default for FilterInput {
    fn default() -> Self {
        Self::new(DEFAULT_CHAR_LIMIT)
    }
}

/// Rendered form of the filter input row.
pub fn render_input_row(value: &str, placeholder: &str) -> String {
    if value.is_empty() {
        format!("{PROMPT}{placeholder}")
    } else {
        format!("{PROMPT}{value}")
    }
}

/// Service responsible for producing high-level `InputAction`s from terminal events.
pub struct InputService {
    editor: FilterInput,
}

impl InputService {
    pub fn new(editor: FilterInput) -> Self {
        Self { editor }
    }

    /// Wait up to `timeout` for terminal events and translate everything available.
    pub fn poll_actions(&mut self, timeout: Option<Duration>) -> Result<Vec<InputAction>> {
        let mut actions = Vec::new();
        let poll_timeout = timeout.unwrap_or(Duration::from_millis(DEFAULT_POLL_TIMEOUT_MS));

        if !event::poll(poll_timeout)? {
            return Ok(actions);
        }

        actions.extend(self.process_event(event::read()?));
        while event::poll(Duration::ZERO)? {
            actions.extend(self.process_event(event::read()?));
        }

        Ok(actions)
    }

    pub fn process_event(&mut self, event: Event) -> Option<InputAction> {
        let action = match event {
            Event::Key(key_event) => self.editor.handle_key_event(key_event),
            Event::Resize(width, height) => InputAction::Resize { width, height },
            Event::Paste(text) => {
                let mut last = InputAction::NoAction;
                for ch in text.chars().filter(|ch| !ch.is_control()) {
                    let key = KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE);
                    if let action @ InputAction::UpdateFilter(_) = self.editor.handle_key_event(key) {
                        last = action;
                    }
                }
                last
            }
            _ => InputAction::NoAction,
        };

        match action {
            InputAction::NoAction => None,
            _ => Some(action),
        }
    }
}

/// Spawn a blocking thread that polls for terminal events and forwards actions to the app loop.
pub fn spawn_input_thread(
    tx: UnboundedSender<InputAction>,
    editor: FilterInput,
    shutdown: Arc<AtomicBool>,
    poll_interval: Duration,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let mut service = InputService::new(editor);
        while !shutdown.load(Ordering::SeqCst) {
            match service.poll_actions(Some(poll_interval)) {
                Ok(actions) => {
                    for action in actions {
                        if tx.send(action).is_err() {
                            return;
                        }
                    }
                }
                Err(err) => {
                    log::error!("input thread error: {err}");
                    let _ = tx.send(InputAction::Quit);
                    break;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn type_str(input: &mut FilterInput, text: &str) -> InputAction {
        let mut last = InputAction::NoAction;
        for ch in text.chars() {
            last = input.handle_key_event(key(KeyCode::Char(ch)));
        }
        last
    }

    #[test]
    fn typing_updates_filter() {
        let mut input = FilterInput::default();
        assert_eq!(
            type_str(&mut input, "err"),
            InputAction::UpdateFilter("err".to_string())
        );
        assert_eq!(input.value(), "err");
    }

    #[test]
    fn backspace_removes_last_char() {
        let mut input = FilterInput::with_value("ab", 10);
        assert_eq!(
            input.handle_key_event(key(KeyCode::Backspace)),
            InputAction::UpdateFilter("a".to_string())
        );
        input.handle_key_event(key(KeyCode::Backspace));
        assert_eq!(
            input.handle_key_event(key(KeyCode::Backspace)),
            InputAction::NoAction
        );
    }

    #[test]
    fn quit_keys() {
        let mut input = FilterInput::default();
        assert_eq!(input.handle_key_event(key(KeyCode::Enter)), InputAction::Quit);
        assert_eq!(input.handle_key_event(key(KeyCode::Esc)), InputAction::Quit);
        assert_eq!(input.handle_key_event(ctrl('c')), InputAction::Quit);
    }

    #[test]
    fn ctrl_u_clears_and_ctrl_w_deletes_word() {
        let mut input = FilterInput::with_value("error !warn timeout", 100);
        assert_eq!(
            input.handle_key_event(ctrl('w')),
            InputAction::UpdateFilter("error !warn ".to_string())
        );
        assert_eq!(
            input.handle_key_event(ctrl('w')),
            InputAction::UpdateFilter("error ".to_string())
        );
        assert_eq!(
            input.handle_key_event(ctrl('u')),
            InputAction::UpdateFilter(String::new())
        );
        assert_eq!(input.handle_key_event(ctrl('u')), InputAction::NoAction);
    }

    #[test]
    fn char_limit_is_enforced() {
        let mut input = FilterInput::new(3);
        type_str(&mut input, "abcdef");
        assert_eq!(input.value(), "abc");
        assert_eq!(FilterInput::with_value("abcdef", 2).value(), "ab");
    }

    #[test]
    fn release_events_are_ignored() {
        let mut input = FilterInput::default();
        let mut release = key(KeyCode::Char('x'));
        release.kind = KeyEventKind::Release;
        assert_eq!(input.handle_key_event(release), InputAction::NoAction);
        assert_eq!(input.value(), "");
    }

    #[test]
    fn input_row_uses_placeholder_when_empty() {
        assert_eq!(render_input_row("", "type here"), "> type here");
        assert_eq!(render_input_row("err", "type here"), "> err");
    }

    #[test]
    fn service_translates_resize_and_paste() {
        let mut service = InputService::new(FilterInput::default());
        assert_eq!(
            service.process_event(Event::Resize(100, 40)),
            Some(InputAction::Resize {
                width: 100,
                height: 40
            })
        );
        assert_eq!(
            service.process_event(Event::Paste("a b\n".to_string())),
            Some(InputAction::UpdateFilter("a b".to_string()))
        );
        assert_eq!(service.process_event(Event::FocusGained), None);
    }
}
