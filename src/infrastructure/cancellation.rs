//! Per-request cancellation signal.
//!
//! A [`CancellationSource`] is owned by whoever may withdraw interest in an
//! operation; the operation receives a [`CancellationSignal`] and races its
//! suspension points against [`CancellationSignal::cancelled`].
//!
//! ```ignore
//! let source = CancellationSource::new();
//! let signal = source.signal();
//!
//! tokio::select! {
//!     () = tokio::time::sleep(delay) => {}
//!     () = signal.cancelled() => return Err(ProcessingError::Cancelled),
//! }
//! ```

use tokio::sync::watch;

// =============================================================================
// Cancellation Source
// =============================================================================

/// Owning side of a cancellation signal.
#[derive(Debug)]
pub struct CancellationSource {
    sender: watch::Sender<bool>,
}

impl CancellationSource {
    /// Creates a source that has not been cancelled.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _receiver) = watch::channel(false);
        Self { sender }
    }

    /// Returns a signal observing this source.
    #[must_use]
    pub fn signal(&self) -> CancellationSignal {
        CancellationSignal {
            receiver: self.sender.subscribe(),
        }
    }

    /// Requests cancellation. Idempotent.
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }

    /// Returns whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.sender.borrow()
    }

    /// Converts the source into a guard that cancels when dropped.
    #[must_use]
    pub fn cancel_on_drop(self) -> CancelOnDrop {
        CancelOnDrop { source: self }
    }
}

impl Default for CancellationSource {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Cancellation Signal
// =============================================================================

/// Observing side of a cancellation source.
#[derive(Debug, Clone)]
pub struct CancellationSignal {
    receiver: watch::Receiver<bool>,
}

impl CancellationSignal {
    /// A signal that never fires.
    #[must_use]
    pub fn never() -> Self {
        let (_sender, receiver) = watch::channel(false);
        Self { receiver }
    }

    /// Returns whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Completes once cancellation is requested.
    ///
    /// If the source is dropped without cancelling, this never completes.
    pub async fn cancelled(&self) {
        let mut receiver = self.receiver.clone();
        loop {
            if *receiver.borrow_and_update() {
                return;
            }
            if receiver.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

// =============================================================================
// Cancel On Drop
// =============================================================================

/// Guard that cancels its source when dropped.
///
/// Held by the request handler so that a dropped request (client disconnect)
/// aborts the work it started.
#[derive(Debug)]
pub struct CancelOnDrop {
    source: CancellationSource,
}

impl CancelOnDrop {
    /// Returns a signal observing the guarded source.
    #[must_use]
    pub fn signal(&self) -> CancellationSignal {
        self.source.signal()
    }
}

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.source.cancel();
    }
}

// =============================================================================
// Tests
// =============================================================================
