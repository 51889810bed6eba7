//! Shutdown coordination.

use tokio::sync::watch;

/// Owner side of the shutdown flag.
///
/// Unlike a one-shot broadcast, the flag stays set, so a listener that starts
/// waiting after the trigger still sees it.
#[derive(Debug)]
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

/// Listener side handed to the address monitor.
#[derive(Debug, Clone)]
pub struct ShutdownListener {
    rx: watch::Receiver<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    pub fn listener(&self) -> ShutdownListener {
        ShutdownListener {
            rx: self.tx.subscribe(),
        }
    }

    /// Set the flag and wake every listener.
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownListener {
    pub fn is_triggered(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once shutdown was triggered or the owner was dropped.
    pub async fn wait(&mut self) {
        // An Err means the sender is gone, which also ends the service.
        let _ = self.rx.wait_for(|stopped| *stopped).await;
    }
}
