//! Progress messages for the user.

use std::fmt::Display;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// A sink for the human-readable progress log of a download.
///
/// Every message is emitted as a `tracing` event. If the sink was made with
/// [`Progress::channel`], the message is also sent to the paired receiver, which can be drained
/// from another thread while the download is running.
#[derive(Clone, Debug, Default)]
pub struct Progress {
    tx: Option<UnboundedSender<String>>,
}

impl Progress {
    /// Creates a sink that only emits `tracing` events.
    pub fn new() -> Self {
        Progress::default()
    }

    pub fn channel() -> (Self, UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Progress { tx: Some(tx) }, rx)
    }

    pub fn info(&self, message: impl Display) {
        let message = message.to_string();
        tracing::info!("{}", message);
        self.send(message);
    }

    pub fn warn(&self, message: impl Display) {
        let message = message.to_string();
        tracing::warn!("{}", message);
        self.send(message);
    }

    fn send(&self, message: String) {
        if let Some(ref tx) = self.tx {
            // The receiving side may have gone away, in which case nobody is listening anymore.
            let _ = tx.send(message);
        }
    }
}
