//! # Wishlist Store
//!
//! Client-side, per-user persisted favorites with optimistic mutation and an
//! O(1) membership cache.
//!
//! ## Architecture
//!
//! Leaves first:
//! - **`storage`**: key-value backends and the partitioned persistence adapter
//! - **`sync`**: storage-change notifications (cross-tab channel)
//! - **`identity`**: session readers and the actor resolver
//! - **`hydration`**: the one-way guard that gates all storage access
//! - **`state`**: the reducer and membership cache
//! - **`query`**: filtering, sorting, and summary projections
//! - **`feedback`**: user messages and the confirmation gate
//! - **`store`**: the live facade
//! - **`provider`**: picks the pre-hydration or live facade
//!
//! ## Consistency
//!
//! One store holds one actor's partition. Two stores sharing a backend (two
//! tabs) can each write a stale view; the last write wins and the other store
//! only notices when a session change makes it reload.

pub mod storage;
pub mod sync;
pub mod identity;
pub mod hydration;
pub mod state;
pub mod query;
pub mod feedback;
pub mod store;
pub mod provider;

// Re-export commonly used types
pub use storage::{FileStorage, KeyValueStorage, LoadedPartition, MemoryStorage, PartitionStore};
pub use sync::{StorageEvent, StorageEvents, StorageSubscription};
pub use identity::{Actor, ActorResolver, SessionReader, SharedSession, StorageSession};
pub use hydration::HydrationGuard;
pub use state::{WishlistAction, WishlistState};
pub use query::{SortBy, SortOrder, WishlistSummary};
pub use feedback::{
    AlwaysConfirm, Confirm, Feedback, FeedbackSink, FeedbackVariant, NeverConfirm,
    RecordingFeedback, TracingFeedback,
};
pub use store::{ToggleAction, ToggleResult, WishlistDeps, WishlistFacade, WishlistStore};
pub use provider::{PendingWishlist, WishlistProvider};
