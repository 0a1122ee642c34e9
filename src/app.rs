//! Application orchestration layer
//!
//! Owns the process-wide pieces (line store, stream reader, renderer) and runs the UI
//! event loop: every input action or tick produces exactly one render pass, and render
//! passes never overlap because they all run on this loop.

pub mod runtime;

use crate::config::Settings;
use crate::error::Result;
use crate::input::{render_input_row, FilterInput, InputAction};
use crate::render::ui::UIRenderer;
use crate::render::{RenderPipeline, Viewport};
use crate::store::LineStore;
use crate::stream::ReaderHandle;
use runtime::InputRuntime;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::MissedTickBehavior;

/// State the render loop carries between events.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub filter_text: String,
    pub viewport: Viewport,
}

impl ViewState {
    pub fn new(filter_text: impl Into<String>, width: u16, height: u16) -> Self {
        Self {
            filter_text: filter_text.into(),
            viewport: Viewport::new(width as usize, height as usize),
        }
    }

    /// Returns true if the dimensions actually changed.
    pub fn update_terminal_size(&mut self, width: u16, height: u16) -> bool {
        let viewport = Viewport::new(width as usize, height as usize);
        let changed = self.viewport != viewport;
        self.viewport = viewport;
        changed
    }
}

/// Application orchestrator - wires the store, reader, pipeline and renderer together
pub struct Application {
    store: Arc<LineStore>,
    pipeline: RenderPipeline,
    ui_renderer: Box<dyn UIRenderer>,
    settings: Settings,
    reader: Option<ReaderHandle>,
}

impl Application {
    pub fn new(store: Arc<LineStore>, ui_renderer: Box<dyn UIRenderer>, settings: Settings) -> Self {
        Self {
            pipeline: RenderPipeline::new(settings.render_options()),
            store,
            ui_renderer,
            settings,
            reader: None,
        }
    }

    /// Take ownership of the stream reader feeding this application's store.
    pub fn attach_reader(&mut self, reader: ReaderHandle) {
        self.reader = Some(reader);
    }

    /// Run the interactive session until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        self.ui_renderer.initialize()?;

        let editor = FilterInput::with_value(&self.settings.initial_filter, self.settings.char_limit);
        let mut input = InputRuntime::start(editor);
        let result = self.run_loop(&mut input.actions).await;
        input.stop();

        self.ui_renderer.cleanup()?;
        match &self.reader {
            Some(reader) if reader.is_finished() => log::debug!("input stream had already ended"),
            // A blocking read on stdin cannot be interrupted; process exit reclaims it.
            Some(reader) => reader.request_shutdown(),
            None => {}
        }
        result
    }

    /// Event loop over input actions and periodic ticks.
    pub async fn run_loop(&mut self, actions: &mut UnboundedReceiver<InputAction>) -> Result<()> {
        let (width, height) = self.ui_renderer.get_terminal_size()?;
        let filter: String = self
            .settings
            .initial_filter
            .chars()
            .take(self.settings.char_limit)
            .collect();
        let mut view_state = ViewState::new(filter, width, height);

        let mut ticker = tokio::time::interval(self.settings.tick_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        self.render(&view_state)?;

        loop {
            tokio::select! {
                biased;

                action = actions.recv() => {
                    let Some(action) = action else {
                        log::warn!("input channel closed, leaving event loop");
                        break;
                    };
                    if !Self::apply_action(action, &mut view_state) {
                        break;
                    }
                }
                _ = ticker.tick() => {}
            }

            self.render(&view_state)?;
        }

        Ok(())
    }

    /// Fold one action into the view state - returns false if should quit
    fn apply_action(action: InputAction, view_state: &mut ViewState) -> bool {
        match action {
            InputAction::Quit => false,
            InputAction::UpdateFilter(text) => {
                view_state.filter_text = text;
                true
            }
            InputAction::Resize { width, height } => {
                if view_state.update_terminal_size(width, height) {
                    log::debug!("terminal resized to {width}x{height}");
                }
                true
            }
            InputAction::NoAction => true,
        }
    }

    fn render(&mut self, view_state: &ViewState) -> Result<()> {
        let input_row = render_input_row(&view_state.filter_text, &self.settings.placeholder);
        let frame = self.pipeline.render(
            &self.store,
            &view_state.filter_text,
            &input_row,
            view_state.viewport,
        );
        self.ui_renderer.render(&frame)
    }
}
