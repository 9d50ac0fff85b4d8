//! Shared Error Types
//!
//! This module defines the error types used across the wishlist store and its
//! collaborators (storage backends, feedback sinks).
//!
//! # Error Categories
//!
//! - `WishlistError` - Why a facade operation was refused or degraded
//! - `StorageError` - Key-value storage failures (I/O, quota, marshaling)
//! - `FeedbackError` - Failures of the user feedback channel
//!
//! # Usage
//!
//! ```rust
//! use storefront::shared::error::{StorageError, WishlistError};
//!
//! let error = WishlistError::duplicate("p1", None);
//! assert!(error.is_informational());
//!
//! let quota = StorageError::quota("wishlist", 6_000_000, 5_000_000);
//! assert!(quota.to_string().contains("quota"));
//! ```
//!
//! # Propagation
//!
//! The wishlist facade never returns these to its callers. They are recorded
//! in the state container's error slot and rendered through the feedback
//! channel. Storage backends return `StorageError` to the persistence adapter,
//! which converts load failures to empty partitions.
use thiserror::Error;

/// Reasons a wishlist operation was refused or only partially applied
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WishlistError {
    /// A mutating call was attempted without an authenticated actor
    #[error("Please sign in to manage your wishlist")]
    AuthRequired,

    /// The dedup key is already present for this actor
    #[error("'{key}' is already in your wishlist")]
    DuplicateItem {
        /// Display form of the dedup key
        key: String,
    },

    /// No item matched the requested key or ids
    #[error("No wishlist item matches {what}")]
    NotFound {
        /// Description of what was looked up
        what: String,
    },

    /// The store was used before hydration completed
    #[error("Wishlist is not ready yet")]
    NotReady,

    /// The human-in-the-loop confirmation was declined
    #[error("Clearing the wishlist was cancelled")]
    ConfirmationDeclined,

    /// The persisted blob could not be parsed
    #[error("Stored wishlist data is corrupt: {message}")]
    StorageCorrupt {
        /// Parser diagnostic
        message: String,
    },

    /// A write to durable storage failed after the in-memory state advanced
    #[error("Wishlist changes could not be saved: {message}")]
    StorageWrite {
        /// Underlying storage failure
        message: String,
    },
}

impl WishlistError {
    /// Create a duplicate item error. `label` is what the user sees, usually
    /// the product name, falling back to its id.
    pub fn duplicate(label: impl AsRef<str>, size_id: Option<&str>) -> Self {
        let key = match size_id {
            Some(size) => format!("{}:{}", label.as_ref(), size),
            None => label.as_ref().to_string(),
        };
        Self::DuplicateItem { key }
    }

    /// Create a not-found error
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Create a storage corruption error
    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::StorageCorrupt {
            message: message.into(),
        }
    }

    /// Create a storage write error
    pub fn write(message: impl Into<String>) -> Self {
        Self::StorageWrite {
            message: message.into(),
        }
    }

    /// Informational outcomes are surfaced to the user but are not failures
    pub fn is_informational(&self) -> bool {
        matches!(self, Self::DuplicateItem { .. } | Self::ConfirmationDeclined)
    }
}

impl From<StorageError> for WishlistError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Serialization { message } => Self::corrupt(message),
            other => Self::write(other.to_string()),
        }
    }
}

/// Failures reported by a key-value storage backend
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Filesystem or platform I/O failure
    #[error("I/O error: {message}")]
    Io {
        /// Human-readable error message
        message: String,
    },

    /// The value does not fit in the backend's quota
    #[error("Storage quota exceeded for '{key}': {needed} bytes needed, limit is {limit}")]
    QuotaExceeded {
        /// Key being written
        key: String,
        /// Size of the rejected value
        needed: usize,
        /// Configured ceiling
        limit: usize,
    },

    /// JSON marshaling or parsing failure
    #[error("Serialization error: {message}")]
    Serialization {
        /// Human-readable error message
        message: String,
    },

    /// The backend is not reachable in this environment
    #[error("Storage unavailable: {message}")]
    Unavailable {
        /// Human-readable error message
        message: String,
    },
}

impl StorageError {
    /// Create a new I/O error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Create a new quota error
    pub fn quota(key: impl Into<String>, needed: usize, limit: usize) -> Self {
        Self::QuotaExceeded {
            key: key.into(),
            needed,
            limit,
        }
    }

    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create a new unavailable error
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

/// Failure of the fire-and-forget feedback channel
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Feedback channel error: {message}")]
pub struct FeedbackError {
    /// Human-readable error message
    pub message: String,
}

impl FeedbackError {
    /// Create a new feedback error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
