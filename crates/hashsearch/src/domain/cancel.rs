//! Cooperative cancellation
//!
//! A one-shot flag shared by every worker of a search. Workers poll it before
//! each candidate; the first worker to find a hit sets it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared one-shot cancellation flag
///
/// Clones share the same flag. The transition `not cancelled -> cancelled` is
/// permanent.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation (idempotent)
    #[inline]
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested by any holder
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
