//! Search input debouncing.
//!
//! Keystrokes go into a [`SearchDebouncer`]; a background task forwards the
//! latest text once input has been quiet for the debounce delay. Pending
//! text is dropped when the debouncer is dropped.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;

/// Quiet period before search text is emitted.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Sending half: accepts raw keystroke text.
#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    input: mpsc::UnboundedSender<String>,
}

/// Receiving half: yields settled search text.
#[derive(Debug)]
pub struct DebouncedSearch {
    output: mpsc::UnboundedReceiver<String>,
}

impl SearchDebouncer {
    /// Spawn the debounce task on the current tokio runtime.
    ///
    /// # Panics
    /// Panics when called outside a tokio runtime.
    #[must_use]
    pub fn spawn(delay: Duration) -> (Self, DebouncedSearch) {
        let (input, input_rx) = mpsc::unbounded_channel();
        let (output_tx, output) = mpsc::unbounded_channel();
        tokio::spawn(debounce(input_rx, output_tx, delay));
        (Self { input }, DebouncedSearch { output })
    }

    /// Record the current search text. Returns `false` once the receiving
    /// half has gone away.
    pub fn push(&self, text: impl Into<String>) -> bool {
        self.input.send(text.into()).is_ok()
    }
}

impl DebouncedSearch {
    /// Next settled search text, or `None` when the debouncer is dropped.
    pub async fn next(&mut self) -> Option<String> {
        self.output.recv().await
    }
}

async fn debounce(
    mut input: mpsc::UnboundedReceiver<String>,
    output: mpsc::UnboundedSender<String>,
    delay: Duration,
) {
    while let Some(first) = input.recv().await {
        let mut latest = first;
        loop {
            match timeout(delay, input.recv()).await {
                Ok(Some(next)) => latest = next,
                Ok(None) => return,
                Err(_quiet) => break,
            }
        }
        if output.send(latest).is_err() {
            return;
        }
    }
}
