//! Cooperative cancellation for completion calls

use std::{sync::Arc, time::Duration};
use tokio::sync::watch;

/// A clonable cancellation signal threaded through completion calls.
///
/// Clones share one flag: cancelling any clone cancels them all.
/// Backends race the outbound call against [`CancelToken::cancelled`]
/// and surface `Error::Cancelled` when the token fires first.
#[derive(Clone, Debug)]
pub struct CancelToken {
    tx: Arc<watch::Sender<bool>>,
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    /// Create a token that only fires when cancelled.
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(false);
        Self {
            tx: Arc::new(tx),
            rx,
        }
    }

    /// Create a token that cancels itself after `timeout`.
    ///
    /// Requires a running tokio runtime.
    pub fn with_timeout(timeout: Duration) -> Self {
        let token = Self::new();
        let timer = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            timer.cancel();
        });
        token
    }

    /// Fire the token. Idempotent.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    /// Whether the token has fired.
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Wait until the token fires.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        if rx.wait_for(|cancelled| *cancelled).await.is_err() {
            // The sender lives in self; never report a phantom cancellation.
            std::future::pending::<()>().await;
        }
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}
