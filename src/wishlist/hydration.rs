//! Hydration guard.
//!
//! A one-way latch flipped on the first interactive (client) pass. Clones
//! share the latch, so the provider and the persistence adapter it builds
//! observe the same flip.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct HydrationGuard {
    open: Arc<AtomicBool>,
}

impl HydrationGuard {
    /// A closed guard
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the guard. Returns `true` only for the call that flipped it.
    pub fn open(&self) -> bool {
        let flipped = !self.open.swap(true, Ordering::AcqRel);
        if flipped {
            tracing::debug!("[WISHLIST] Hydration complete, storage access enabled");
        }
        flipped
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }
}
