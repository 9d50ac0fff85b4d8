//! Shared Module
//!
//! Types shared by the wishlist store and everything that talks to it:
//! the persisted item shape, the consumed product and session shapes,
//! configuration, and error types. All of them are plain serializable data.

/// Wishlist item and dedup key
pub mod wishlist;

/// Product and snapshot shapes
pub mod product;

/// Session and user record shapes
pub mod types;

/// Shared error types
pub mod error;

/// Store configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use wishlist::{DedupKey, WishlistItem};
pub use product::{Product, ProductSize, ProductSnapshot};
pub use types::{Session, UserInfo};
pub use error::{FeedbackError, StorageError, WishlistError};
pub use config::{ConfigError, WishlistConfig, WishlistConfigBuilder};
