//! Cooperative cancellation for in-flight valuations.
//!
//! Engines poll the token between lattice layers and between simulated
//! paths. A cancelled valuation returns [`PricingError::Cancelled`] and
//! never a partial price.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use pricer_core::types::PricingError;

/// Shared cancellation flag.
///
/// Cloning yields a handle to the same flag, so one clone can be handed to
/// the valuation config while another stays with the caller.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::CancelToken;
///
/// let token = CancelToken::new();
/// let handle = token.clone();
/// assert!(!token.is_cancelled());
/// handle.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Returns whether cancellation was requested.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Returns `Err(Cancelled)` if a token is present and set.
#[inline]
pub(crate) fn check(token: Option<&CancelToken>) -> Result<(), PricingError> {
    match token {
        Some(t) if t.is_cancelled() => Err(PricingError::Cancelled),
        _ => Ok(()),
    }
}
