//! Debug utilities and helpers
//!
//! Checks and logging that only do work in debug builds or when the
//! `debug` feature is enabled.

/// Debug mode feature flag
pub const DEBUG_MODE: bool = cfg!(debug_assertions);

/// Debug log macro
///
/// Only logs in debug builds or when debug feature is enabled.
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        if cfg!(debug_assertions) || cfg!(feature = "debug") {
            tracing::debug!($($arg)*);
        }
    };
}

/// Validate state invariant
///
/// Debug builds log and panic when the condition does not hold; release
/// builds skip the check.
pub fn validate_invariant(condition: bool, message: &str) {
    if DEBUG_MODE && !condition {
        tracing::error!("Invariant violation: {}", message);
        #[cfg(debug_assertions)]
        {
            panic!("Invariant violation: {}", message);
        }
    }
}
