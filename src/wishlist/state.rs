//! # Wishlist State Container
//!
//! The authoritative in-memory item list for the loaded actor, a loading flag,
//! the last error, and the membership cache. All changes go through
//! [`WishlistState::apply`], a total reducer over [`WishlistAction`]: every
//! action applies to every state without failing.
//!
//! ## Membership Cache
//!
//! `DedupKey -> bool`, derived from the item list. It is rebuilt on
//! `SetWishlist`, emptied on `ClearWishlist`, and otherwise patched one entry
//! at a time with `SetWishlistStatus`. A key missing from the cache means
//! "not yet looked up", which [`WishlistState::check_status`] resolves
//! against the item list lazily.

use crate::debug::validate_invariant;
use crate::shared::wishlist::{DedupKey, WishlistItem};
use std::collections::{HashMap, HashSet};

/// The reducer's fixed action set
#[derive(Debug, Clone, PartialEq)]
pub enum WishlistAction {
    SetLoading(bool),
    SetError(String),
    ClearError,
    /// Replace the whole list (initial load, actor switch)
    SetWishlist(Vec<WishlistItem>),
    /// Prepend one item
    AddItem(WishlistItem),
    /// Drop every item with this dedup key
    RemoveItem(DedupKey),
    /// Drop every item whose id is in the set, in one transition
    RemoveItems(HashSet<String>),
    /// Replace the item with the same id
    UpdateItem(WishlistItem),
    ClearWishlist,
    SetWishlistStatus(DedupKey, bool),
    /// Mark the in-memory list as diverged from durable storage (or back in sync)
    SetUnsynced(bool),
}

#[derive(Debug, Clone, Default)]
pub struct WishlistState {
    items: Vec<WishlistItem>,
    is_loading: bool,
    error: Option<String>,
    unsynced: bool,
    status_cache: HashMap<DedupKey, bool>,
}

impl WishlistState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one action
    pub fn apply(&mut self, action: WishlistAction) {
        match action {
            WishlistAction::SetLoading(loading) => self.is_loading = loading,
            WishlistAction::SetError(message) => self.error = Some(message),
            WishlistAction::ClearError => self.error = None,
            WishlistAction::SetWishlist(items) => {
                self.status_cache = items.iter().map(|item| (item.key(), true)).collect();
                self.items = items;
            }
            WishlistAction::AddItem(item) => {
                let key = item.key();
                self.items.insert(0, item);
                self.check_dedup(&key);
            }
            WishlistAction::RemoveItem(key) => self.items.retain(|item| !item.matches(&key)),
            WishlistAction::RemoveItems(ids) => self.items.retain(|item| !ids.contains(&item.id)),
            WishlistAction::UpdateItem(updated) => {
                if let Some(slot) = self.items.iter_mut().find(|item| item.id == updated.id) {
                    *slot = updated;
                }
            }
            WishlistAction::ClearWishlist => {
                self.items.clear();
                self.status_cache.clear();
            }
            WishlistAction::SetWishlistStatus(key, present) => {
                self.status_cache.insert(key, present);
            }
            WishlistAction::SetUnsynced(unsynced) => self.unsynced = unsynced,
        }
    }

    fn check_dedup(&self, key: &DedupKey) {
        let copies = self.items.iter().filter(|item| item.matches(key)).count();
        validate_invariant(copies == 1, "wishlist holds two items with the same dedup key");
    }

    pub fn items(&self) -> &[WishlistItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_unsynced(&self) -> bool {
        self.unsynced
    }

    /// Whether the live list holds this key (linear scan, no cache)
    pub fn contains(&self, key: &DedupKey) -> bool {
        self.items.iter().any(|item| item.matches(key))
    }

    /// O(1) membership read; unknown keys are reported absent
    pub fn cached_status(&self, key: &DedupKey) -> Option<bool> {
        self.status_cache.get(key).copied()
    }

    /// Cache read that falls back to the item list and remembers the answer
    pub fn check_status(&mut self, key: &DedupKey) -> bool {
        if let Some(present) = self.cached_status(key) {
            return present;
        }
        let present = self.contains(key);
        self.apply(WishlistAction::SetWishlistStatus(key.clone(), present));
        present
    }

    pub fn find_by_id(&self, id: &str) -> Option<&WishlistItem> {
        self.items.iter().find(|item| item.id == id)
    }
}
