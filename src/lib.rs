//! Storefront - Wishlist Library
//!
//! The client-side favorites store of the storefront: a per-user collection
//! persisted in the browser's key-value storage, with optimistic mutation,
//! deduplication, an O(1) membership cache, and safe initialization when
//! storage is not available yet.
//!
//! # Module Structure
//!
//! - **`shared`** - Plain data shared with the rest of the storefront
//!   - Wishlist item and dedup key, product snapshot, session shapes
//!   - Configuration and error types
//!
//! - **`wishlist`** - The store itself
//!   - Persistence adapter over a pluggable key-value backend
//!   - Actor resolver, hydration guard, reducer with membership cache
//!   - The facade consumers call, and the provider that selects it
//!
//! - **`debug`** - Invariant checks and debug-only logging
//!
//! # Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use storefront::shared::WishlistConfig;
//! use storefront::wishlist::{
//!     AlwaysConfirm, MemoryStorage, RecordingFeedback, SharedSession, WishlistDeps,
//!     WishlistProvider,
//! };
//!
//! let session = Arc::new(SharedSession::anonymous());
//! let mut provider = WishlistProvider::new(WishlistDeps::new(
//!     Arc::new(MemoryStorage::new()),
//!     session.clone(),
//!     Arc::new(RecordingFeedback::new()),
//!     Arc::new(AlwaysConfirm),
//!     WishlistConfig::default(),
//! ));
//!
//! // Before the first interactive pass everything is neutral
//! assert!(!provider.wishlist().is_in_wishlist("p1", None));
//!
//! provider.mount();
//! session.login("u1", "token");
//! assert!(provider.wishlist_mut().add_to_wishlist("p1", None, None));
//! ```
//!
//! # Error Handling
//!
//! The facade never returns errors. Refusals come back as `false` (or a
//! failed `ToggleResult`) and are explained through the feedback channel;
//! the last error is kept in the store's state. See `shared::error`.
//!
//! # Thread Safety
//!
//! A store is driven from one thread, like the UI it serves. Backends and
//! session readers are `Send + Sync` so several stores may share them.

/// Shared types and data structures
pub mod shared;

/// Client-side wishlist store
pub mod wishlist;

/// Debug utilities
pub mod debug;
