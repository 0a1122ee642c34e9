use crate::input::{spawn_input_thread, FilterInput, InputAction};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};

/// Poll interval of the blocking terminal input thread.
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Running terminal input thread plus the channel it feeds.
pub struct InputRuntime {
    pub actions: UnboundedReceiver<InputAction>,
    shutdown: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl InputRuntime {
    /// Start polling the terminal on a background thread.
    pub fn start(editor: FilterInput) -> Self {
        let (tx, actions) = mpsc::unbounded_channel();
        let shutdown = Arc::new(AtomicBool::new(false));
        let handle = spawn_input_thread(tx, editor, Arc::clone(&shutdown), INPUT_POLL_INTERVAL);

        Self {
            actions,
            shutdown,
            handle: Some(handle),
        }
    }

    /// Stop the input thread and wait for it; it exits within one poll interval.
    pub fn stop(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for InputRuntime {
    fn drop(&mut self) {
        self.stop();
    }
}
