//! Cooperative cancellation.
//!
//! Long-running strategies take a [`CancelToken`] and poll it at every loop
//! boundary. Setting the token never discards work: each runner returns the
//! best incumbent found so far with its `cancelled` flag raised.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared, set-once stop flag.
///
/// Clones share the same flag. Once [`cancel`](Self::cancel) has been called
/// the token stays cancelled; there is no reset.
///
/// # Examples
///
/// ```
/// use u_tsp::CancelToken;
///
/// let token = CancelToken::new();
/// let handle = token.clone();
/// assert!(!token.is_cancelled());
/// handle.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a token in the "not cancelled" state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Safe to call from any thread, any number of times.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Returns the underlying flag, e.g. for a signal handler that can only
    /// capture an `Arc<AtomicBool>`.
    pub fn as_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }
}

impl From<Arc<AtomicBool>> for CancelToken {
    fn from(flag: Arc<AtomicBool>) -> Self {
        Self { flag }
    }
}
