//! Cooperative pass cancellation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use propgen_foundation::{Error, Result};

/// Shared flag a host sets when a newer snapshot supersedes a running pass.
///
/// Clones observe the same flag. The driver checks it between stages.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Returns true if cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Fails with [`propgen_foundation::ErrorKind::Cancelled`] once cancelled.
    ///
    /// # Errors
    /// Returns an error if cancellation was requested.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(Error::cancelled())
        } else {
            Ok(())
        }
    }
}
