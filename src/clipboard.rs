//! System clipboard hand-off.
//!
//! The write runs on a detached thread and reports back over a channel the
//! event loop drains once per tick, so a slow or broken clipboard backend
//! never stalls the UI. The outcome only ever produces a notification; it
//! never touches document state.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

/// Result of one copy attempt, delivered asynchronously.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied(String),
    Failed(String),
}

/// Spawns clipboard writes and collects their outcomes.
pub struct ClipboardWriter {
    tx: Sender<CopyOutcome>,
    rx: Receiver<CopyOutcome>,
}

impl ClipboardWriter {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    /// Start an asynchronous copy of `text`. Returns immediately.
    pub fn copy(&self, text: String) {
        let tx = self.tx.clone();
        thread::spawn(move || {
            let outcome = write_clipboard(&text);
            if let CopyOutcome::Failed(ref err) = outcome {
                warn!(error = %err, "clipboard write failed");
            } else {
                debug!(bytes = text.len(), "clipboard write ok");
            }
            // Receiver gone means the app is shutting down.
            let _ = tx.send(outcome);
        });
    }

    /// Non-blocking poll for a finished copy.
    pub fn poll(&self) -> Option<CopyOutcome> {
        match self.rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}

impl Default for ClipboardWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn write_clipboard(text: &str) -> CopyOutcome {
    match arboard::Clipboard::new() {
        Ok(mut clipboard) => match clipboard.set_text(text.to_string()) {
            Ok(()) => {
                // Keep the clipboard handle alive briefly so managers see it
                thread::sleep(Duration::from_millis(100));
                CopyOutcome::Copied(text.to_string())
            }
            Err(e) => CopyOutcome::Failed(e.to_string()),
        },
        Err(e) => CopyOutcome::Failed(e.to_string()),
    }
}
