//! Shutdown coordination.

use tokio::sync::broadcast;

/// Shared shutdown signal.
///
/// The signal watcher holds one clone and triggers it; the server holds a
/// subscription and starts draining when it fires. Triggering more than once
/// is harmless.
#[derive(Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Fire the shutdown signal. Send errors mean no task is listening yet,
    /// which is fine.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_observe_trigger() {
        let shutdown = Shutdown::new();
        let mut rx = shutdown.subscribe();

        shutdown.trigger();

        assert!(rx.recv().await.is_ok());
    }

    #[tokio::test]
    async fn trigger_without_subscribers_does_not_panic() {
        Shutdown::new().trigger();
    }

    #[tokio::test]
    async fn clones_share_the_same_signal() {
        let shutdown = Shutdown::new();
        let mut rx = shutdown.subscribe();

        shutdown.clone().trigger();

        assert!(rx.recv().await.is_ok());
    }
}
