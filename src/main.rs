//! tailsift - Live Filter for Endless Input Streams
//!
//! Pipe any line-oriented output into tailsift and narrow it down as it scrolls by.

use anyhow::{Context, Result};
use std::io::{self, IsTerminal};
use std::sync::Arc;
use tailsift::render::ui::TerminalUI;
use tailsift::{Application, LineStore, Settings, StreamReader};

#[tokio::main]
async fn main() -> Result<()> {
    // Log to stderr; redirect it (2>file) since the UI owns the terminal
    env_logger::init();

    let matches = Settings::command().get_matches();
    let mut settings = Settings::from_matches(&matches).context("failed to load settings")?;
    if std::env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty()) {
        settings.no_color = true;
    }

    if io::stdin().is_terminal() {
        anyhow::bail!("standard input is a terminal; pipe a stream into tailsift");
    }

    let store = Arc::new(LineStore::with_capacity(settings.capacity_hint));
    let reader = StreamReader::new(io::stdin(), Arc::clone(&store))
        .spawn()
        .context("failed to start the input reader")?;

    let ui_renderer = Box::new(TerminalUI::new(settings.theme())?);
    let mut app = Application::new(store, ui_renderer, settings);
    app.attach_reader(reader);

    if let Err(err) = app.run().await {
        log::error!("session failed: {err}");
        return Err(err).context("terminal session failed");
    }

    Ok(())
}
