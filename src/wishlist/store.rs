//! # Wishlist Store
//!
//! The live facade: every consumer-facing wishlist operation, wired to the
//! actor resolver, the state container, the persistence adapter, and the
//! feedback channel.
//!
//! ## Flow of a mutation
//!
//! 1. Consult the actor resolver. No authenticated actor: refuse with
//!    "please sign in" feedback. Different actor than the loaded partition:
//!    reload first.
//! 2. Apply the change to the state container (optimistic).
//! 3. Write the actor's partition in the same call.
//! 4. Patch the membership cache and emit feedback.
//!
//! A failed write does not roll back step 2. The state is flagged unsynced
//! until a later write (or [`WishlistStore::retry_sync`]) succeeds.
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use storefront::shared::{ProductSnapshot, WishlistConfig};
//! use storefront::wishlist::{
//!     AlwaysConfirm, HydrationGuard, MemoryStorage, RecordingFeedback, SharedSession,
//!     WishlistDeps, WishlistFacade, WishlistStore,
//! };
//!
//! let session = Arc::new(SharedSession::anonymous());
//! session.login("u1", "token");
//! let deps = WishlistDeps::new(
//!     Arc::new(MemoryStorage::new()),
//!     session,
//!     Arc::new(RecordingFeedback::new()),
//!     Arc::new(AlwaysConfirm),
//!     WishlistConfig::default(),
//! );
//! let guard = HydrationGuard::new();
//! guard.open();
//!
//! let mut store = WishlistStore::open(deps, guard);
//! assert!(store.add_to_wishlist("p1", None, Some(ProductSnapshot::new("Shirt", 20.0))));
//! assert!(store.is_in_wishlist("p1", None));
//! assert_eq!(store.summary().total_value, 20.0);
//! ```

use crate::debug_log;
use crate::shared::config::WishlistConfig;
use crate::shared::error::WishlistError;
use crate::shared::product::ProductSnapshot;
use crate::shared::wishlist::{DedupKey, WishlistItem};
use crate::wishlist::feedback::{notify, Confirm, Feedback, FeedbackSink};
use crate::wishlist::hydration::HydrationGuard;
use crate::wishlist::identity::{ActorResolver, SessionReader};
use crate::wishlist::query::{filter_items, summarize, SortBy, SortOrder, WishlistSummary};
use crate::wishlist::state::{WishlistAction, WishlistState};
use crate::wishlist::storage::{KeyValueStorage, PartitionStore};
use crate::wishlist::sync::StorageSubscription;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::Arc;

/// What a toggle ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    Added,
    Removed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleResult {
    pub success: bool,
    pub action: ToggleAction,
    pub in_wishlist: bool,
}

impl ToggleResult {
    fn failed(in_wishlist: bool) -> Self {
        Self {
            success: false,
            action: ToggleAction::Failed,
            in_wishlist,
        }
    }
}

/// The only surface consumers use
///
/// Implemented by the live [`WishlistStore`] and by the not-yet-hydrated
/// [`PendingWishlist`](crate::wishlist::provider::PendingWishlist). No method
/// panics or returns an error; refusals are `false` plus feedback.
pub trait WishlistFacade {
    fn add_to_wishlist(
        &mut self,
        product_id: &str,
        size_id: Option<&str>,
        product_data: Option<ProductSnapshot>,
    ) -> bool;

    fn remove_from_wishlist(&mut self, product_id: &str, size_id: Option<&str>) -> bool;

    fn toggle_wishlist(
        &mut self,
        product_id: &str,
        size_id: Option<&str>,
        product_data: Option<ProductSnapshot>,
    ) -> ToggleResult;

    /// O(1) cache read. Never reads the wishlist blob; only the session
    /// reader is consulted to confirm the actor.
    fn is_in_wishlist(&self, product_id: &str, size_id: Option<&str>) -> bool;

    /// Cache read that populates a cold entry from the item list
    fn check_wishlist_status(&mut self, product_id: &str, size_id: Option<&str>) -> bool;

    /// Empty the wishlist after interactive confirmation
    fn clear_wishlist(&mut self) -> bool;

    /// Remove every item whose id is listed, in one transition and one write
    fn remove_multiple_items(&mut self, ids: &[String]) -> bool;

    fn get_filtered_items(
        &self,
        search_term: &str,
        sort_by: SortBy,
        sort_order: SortOrder,
    ) -> Vec<WishlistItem>;

    fn summary(&self) -> WishlistSummary;

    fn items(&self) -> &[WishlistItem];

    fn item_count(&self) -> usize {
        self.items().len()
    }

    fn is_loading(&self) -> bool;

    fn error(&self) -> Option<&str>;

    /// Whether the store is hydrated and live
    fn is_ready(&self) -> bool;
}

/// Collaborators injected into a store
#[derive(Clone)]
pub struct WishlistDeps {
    pub storage: Arc<dyn KeyValueStorage>,
    pub session: Arc<dyn SessionReader>,
    pub feedback: Arc<dyn FeedbackSink>,
    pub confirm: Arc<dyn Confirm>,
    pub config: WishlistConfig,
}

impl WishlistDeps {
    pub fn new(
        storage: Arc<dyn KeyValueStorage>,
        session: Arc<dyn SessionReader>,
        feedback: Arc<dyn FeedbackSink>,
        confirm: Arc<dyn Confirm>,
        config: WishlistConfig,
    ) -> Self {
        Self {
            storage,
            session,
            feedback,
            confirm,
            config,
        }
    }
}

/// Live, hydrated wishlist for the current actor
pub struct WishlistStore {
    state: WishlistState,
    partitions: PartitionStore,
    identity: ActorResolver,
    feedback: Arc<dyn FeedbackSink>,
    confirm: Arc<dyn Confirm>,
    identity_keys: Vec<String>,
    subscription: Option<StorageSubscription>,
    /// Actor whose partition is in `state`
    loaded_actor: Option<String>,
}

impl WishlistStore {
    /// Build the store and run the initial load
    pub fn open(deps: WishlistDeps, guard: HydrationGuard) -> Self {
        let subscription = deps.storage.events().map(|events| events.subscribe());
        let identity_keys = deps
            .config
            .identity_keys()
            .iter()
            .map(|key| key.to_string())
            .collect();
        let partitions = PartitionStore::new(deps.storage, deps.config.storage_key, guard);

        let mut store = Self {
            state: WishlistState::new(),
            partitions,
            identity: ActorResolver::new(deps.session),
            feedback: deps.feedback,
            confirm: deps.confirm,
            identity_keys,
            subscription,
            loaded_actor: None,
        };
        store.reload();
        store
    }

    /// Discard in-memory state and load the current actor's partition
    pub fn reload(&mut self) {
        self.state.apply(WishlistAction::SetLoading(true));
        self.state.apply(WishlistAction::ClearError);
        self.state.apply(WishlistAction::SetUnsynced(false));

        let actor = self.identity.current();
        match actor.authenticated_id() {
            Some(actor_id) => {
                let loaded = self.partitions.load_partition(actor_id);
                tracing::info!(actor = actor_id, count = loaded.items.len(), "[WISHLIST] Loaded wishlist");
                self.state.apply(WishlistAction::SetWishlist(loaded.items));
                if let Some(problem) = loaded.problem {
                    self.state.apply(WishlistAction::SetError(problem.to_string()));
                }
                self.loaded_actor = Some(actor_id.to_string());
            }
            None => {
                tracing::debug!("[WISHLIST] No authenticated actor, wishlist empty");
                self.state.apply(WishlistAction::SetWishlist(Vec::new()));
                self.loaded_actor = None;
            }
        }

        self.state.apply(WishlistAction::SetLoading(false));
    }

    /// Handle queued storage-change notifications. Returns whether a reload ran.
    ///
    /// Only identity-relevant keys (session token, user record) trigger a
    /// reload. Whatever another tab wrote last wins; nothing is merged.
    pub fn sync_storage_events(&mut self) -> bool {
        let Some(subscription) = self.subscription.as_mut() else {
            return false;
        };
        let keys: Vec<&str> = self.identity_keys.iter().map(String::as_str).collect();
        let relevant = subscription
            .drain()
            .iter()
            .any(|event| event.touches(&keys));

        if relevant {
            tracing::info!("[WISHLIST] Session changed in storage, reloading");
            self.reload();
        }
        relevant
    }

    /// Rewrite the loaded partition after an earlier failed write
    pub fn retry_sync(&mut self) -> bool {
        let Some(actor_id) = self.loaded_actor.clone() else {
            return false;
        };
        if !self.state.is_unsynced() {
            return true;
        }
        self.persist(&actor_id)
    }

    pub fn is_unsynced(&self) -> bool {
        self.state.is_unsynced()
    }

    /// Actor whose partition is loaded
    pub fn actor_id(&self) -> Option<&str> {
        self.loaded_actor.as_deref()
    }

    pub fn partitions(&self) -> &PartitionStore {
        &self.partitions
    }

    /// Authenticated actor id with its partition loaded, or a refusal
    fn require_actor(&mut self) -> Option<String> {
        let actor = self.identity.current();
        let Some(actor_id) = actor.authenticated_id() else {
            tracing::debug!("[WISHLIST] Mutation refused, no authenticated actor");
            self.state
                .apply(WishlistAction::SetError(WishlistError::AuthRequired.to_string()));
            notify(
                self.feedback.as_ref(),
                Feedback::destructive(
                    "Authentication required",
                    WishlistError::AuthRequired.to_string(),
                ),
            );
            return None;
        };

        if self.loaded_actor.as_deref() != Some(actor_id) {
            tracing::info!(actor = actor_id, "[WISHLIST] Actor changed, reloading partition");
            self.reload();
        }
        Some(actor_id.to_string())
    }

    /// Loaded partition still belongs to the current actor
    fn is_visible(&self) -> bool {
        match self.loaded_actor.as_deref() {
            Some(loaded) => self.identity.current().authenticated_id() == Some(loaded),
            None => false,
        }
    }

    /// Write the loaded partition; failures mark the state unsynced
    fn persist(&mut self, actor_id: &str) -> bool {
        match self.partitions.save(actor_id, self.state.items()) {
            Ok(()) => {
                if self.state.is_unsynced() {
                    tracing::info!(actor = actor_id, "[WISHLIST] Wishlist back in sync with storage");
                    self.state.apply(WishlistAction::SetUnsynced(false));
                    self.state.apply(WishlistAction::ClearError);
                }
                true
            }
            Err(e) => {
                let error = WishlistError::from(e);
                tracing::error!(actor = actor_id, "[WISHLIST] Persist failed, keeping in-memory state: {}", error);
                self.state.apply(WishlistAction::SetUnsynced(true));
                self.state.apply(WishlistAction::SetError(error.to_string()));
                notify(
                    self.feedback.as_ref(),
                    Feedback::destructive(
                        "Wishlist not saved",
                        "Your change may be lost when the page reloads.",
                    ),
                );
                false
            }
        }
    }

    /// Per-insertion id, suffixed if a same-millisecond id is already taken
    fn build_item(
        &self,
        product_id: &str,
        size_id: Option<&str>,
        product_data: Option<ProductSnapshot>,
        added_at: DateTime<Utc>,
    ) -> WishlistItem {
        let mut item = WishlistItem::new(product_id, size_id.map(str::to_string), product_data, added_at);
        if self.state.find_by_id(&item.id).is_some() {
            let base = item.id.clone();
            let mut suffix = 1;
            while self.state.find_by_id(&format!("{}-{}", base, suffix)).is_some() {
                suffix += 1;
            }
            item.id = format!("{}-{}", base, suffix);
        }
        item
    }
}

fn display_name(product_id: &str, product_data: Option<&ProductSnapshot>) -> String {
    match product_data {
        Some(snapshot) if !snapshot.name.is_empty() => snapshot.name.clone(),
        _ => product_id.to_string(),
    }
}

impl WishlistFacade for WishlistStore {
    fn add_to_wishlist(
        &mut self,
        product_id: &str,
        size_id: Option<&str>,
        product_data: Option<ProductSnapshot>,
    ) -> bool {
        let Some(actor_id) = self.require_actor() else {
            return false;
        };

        let key = DedupKey::of(product_id, size_id);
        let name = display_name(product_id, product_data.as_ref());
        if self.state.contains(&key) {
            tracing::debug!(actor = %actor_id, key = %key, "[WISHLIST] Duplicate add ignored");
            notify(
                self.feedback.as_ref(),
                Feedback::info(
                    "Already in wishlist",
                    WishlistError::duplicate(&name, size_id).to_string(),
                ),
            );
            return false;
        }

        let item = self.build_item(product_id, size_id, product_data, Utc::now());
        self.state.apply(WishlistAction::AddItem(item));
        self.persist(&actor_id);
        self.state.apply(WishlistAction::SetWishlistStatus(key.clone(), true));

        tracing::info!(actor = %actor_id, key = %key, "[WISHLIST] Item added");
        notify(
            self.feedback.as_ref(),
            Feedback::success("Added to wishlist", format!("{} was added to your wishlist", name)),
        );
        true
    }

    fn remove_from_wishlist(&mut self, product_id: &str, size_id: Option<&str>) -> bool {
        let Some(actor_id) = self.require_actor() else {
            return false;
        };

        let key = DedupKey::of(product_id, size_id);
        let existing_name = self
            .state
            .items()
            .iter()
            .find(|item| item.matches(&key))
            .map(|item| display_name(product_id, item.product_data.as_ref()));
        let Some(name) = existing_name else {
            tracing::debug!(actor = %actor_id, "[WISHLIST] Remove ignored: {}", WishlistError::not_found(key.to_string()));
            self.state.apply(WishlistAction::SetWishlistStatus(key, false));
            return false;
        };

        self.state.apply(WishlistAction::RemoveItem(key.clone()));
        self.persist(&actor_id);
        self.state.apply(WishlistAction::SetWishlistStatus(key.clone(), false));

        tracing::info!(actor = %actor_id, key = %key, "[WISHLIST] Item removed");
        notify(
            self.feedback.as_ref(),
            Feedback::success("Removed from wishlist", format!("{} was removed from your wishlist", name)),
        );
        true
    }

    fn toggle_wishlist(
        &mut self,
        product_id: &str,
        size_id: Option<&str>,
        product_data: Option<ProductSnapshot>,
    ) -> ToggleResult {
        if self.require_actor().is_none() {
            return ToggleResult::failed(false);
        }

        let key = DedupKey::of(product_id, size_id);
        if self.state.check_status(&key) {
            if self.remove_from_wishlist(product_id, size_id) {
                ToggleResult {
                    success: true,
                    action: ToggleAction::Removed,
                    in_wishlist: false,
                }
            } else {
                ToggleResult::failed(self.state.contains(&key))
            }
        } else if self.add_to_wishlist(product_id, size_id, product_data) {
            ToggleResult {
                success: true,
                action: ToggleAction::Added,
                in_wishlist: true,
            }
        } else {
            ToggleResult::failed(self.state.contains(&key))
        }
    }

    fn is_in_wishlist(&self, product_id: &str, size_id: Option<&str>) -> bool {
        if !self.is_visible() {
            return false;
        }
        self.state
            .cached_status(&DedupKey::of(product_id, size_id))
            .unwrap_or(false)
    }

    fn check_wishlist_status(&mut self, product_id: &str, size_id: Option<&str>) -> bool {
        let actor = self.identity.current();
        let Some(actor_id) = actor.authenticated_id() else {
            return false;
        };
        if self.loaded_actor.as_deref() != Some(actor_id) {
            self.reload();
        }

        let key = DedupKey::of(product_id, size_id);
        if self.state.cached_status(&key).is_none() {
            debug_log!(key = %key, "[WISHLIST] Cold membership lookup");
        }
        self.state.check_status(&key)
    }

    fn clear_wishlist(&mut self) -> bool {
        let Some(actor_id) = self.require_actor() else {
            return false;
        };

        let count = self.state.len();
        if count == 0 {
            notify(
                self.feedback.as_ref(),
                Feedback::info("Wishlist is empty", "There is nothing to clear."),
            );
            return false;
        }

        let prompt = format!("Remove all {} items from your wishlist?", count);
        if !self.confirm.confirm(&prompt) {
            tracing::debug!(actor = %actor_id, "[WISHLIST] Clear cancelled: {}", WishlistError::ConfirmationDeclined);
            return false;
        }

        self.state.apply(WishlistAction::ClearWishlist);
        self.persist(&actor_id);

        tracing::info!(actor = %actor_id, count, "[WISHLIST] Wishlist cleared");
        notify(
            self.feedback.as_ref(),
            Feedback::success("Wishlist cleared", format!("Removed {} items from your wishlist", count)),
        );
        true
    }

    fn remove_multiple_items(&mut self, ids: &[String]) -> bool {
        let Some(actor_id) = self.require_actor() else {
            return false;
        };

        let ids: HashSet<String> = ids.iter().cloned().collect();
        let removed: Vec<DedupKey> = self
            .state
            .items()
            .iter()
            .filter(|item| ids.contains(&item.id))
            .map(WishlistItem::key)
            .collect();
        if removed.is_empty() {
            tracing::debug!(actor = %actor_id, "[WISHLIST] Bulk remove matched nothing");
            return false;
        }

        self.state.apply(WishlistAction::RemoveItems(ids));
        self.persist(&actor_id);
        for key in &removed {
            self.state
                .apply(WishlistAction::SetWishlistStatus(key.clone(), false));
        }

        tracing::info!(actor = %actor_id, count = removed.len(), "[WISHLIST] Items removed");
        notify(
            self.feedback.as_ref(),
            Feedback::success(
                "Items removed",
                format!("Removed {} items from your wishlist", removed.len()),
            ),
        );
        true
    }

    fn get_filtered_items(
        &self,
        search_term: &str,
        sort_by: SortBy,
        sort_order: SortOrder,
    ) -> Vec<WishlistItem> {
        filter_items(self.items(), search_term, sort_by, sort_order)
    }

    fn summary(&self) -> WishlistSummary {
        summarize(self.items())
    }

    fn items(&self) -> &[WishlistItem] {
        if self.is_visible() {
            self.state.items()
        } else {
            &[]
        }
    }

    fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    fn error(&self) -> Option<&str> {
        self.state.error()
    }

    fn is_ready(&self) -> bool {
        true
    }
}
