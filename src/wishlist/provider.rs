//! Provider boundary.
//!
//! Selects the facade implementation once: a [`PendingWishlist`] answering
//! neutral defaults until the hydration guard opens, then the live
//! [`WishlistStore`]. Consumers only ever hold `&dyn WishlistFacade`, so no
//! method has to check the hydration flag itself.

use crate::shared::error::WishlistError;
use crate::shared::product::ProductSnapshot;
use crate::shared::wishlist::WishlistItem;
use crate::wishlist::hydration::HydrationGuard;
use crate::wishlist::query::{SortBy, SortOrder, WishlistSummary};
use crate::wishlist::store::{ToggleAction, ToggleResult, WishlistDeps, WishlistFacade, WishlistStore};

/// Facade used before hydration: empty answers, refused mutations, no side effects
#[derive(Debug, Default, Clone, Copy)]
pub struct PendingWishlist;

impl WishlistFacade for PendingWishlist {
    fn add_to_wishlist(
        &mut self,
        product_id: &str,
        _size_id: Option<&str>,
        _product_data: Option<ProductSnapshot>,
    ) -> bool {
        tracing::debug!(product_id, "[WISHLIST] Add refused: {}", WishlistError::NotReady);
        false
    }

    fn remove_from_wishlist(&mut self, product_id: &str, _size_id: Option<&str>) -> bool {
        tracing::debug!(product_id, "[WISHLIST] Remove refused: {}", WishlistError::NotReady);
        false
    }

    fn toggle_wishlist(
        &mut self,
        _product_id: &str,
        _size_id: Option<&str>,
        _product_data: Option<ProductSnapshot>,
    ) -> ToggleResult {
        ToggleResult {
            success: false,
            action: ToggleAction::Failed,
            in_wishlist: false,
        }
    }

    fn is_in_wishlist(&self, _product_id: &str, _size_id: Option<&str>) -> bool {
        false
    }

    fn check_wishlist_status(&mut self, _product_id: &str, _size_id: Option<&str>) -> bool {
        false
    }

    fn clear_wishlist(&mut self) -> bool {
        false
    }

    fn remove_multiple_items(&mut self, _ids: &[String]) -> bool {
        false
    }

    fn get_filtered_items(
        &self,
        _search_term: &str,
        _sort_by: SortBy,
        _sort_order: SortOrder,
    ) -> Vec<WishlistItem> {
        Vec::new()
    }

    fn summary(&self) -> WishlistSummary {
        WishlistSummary::default()
    }

    fn items(&self) -> &[WishlistItem] {
        &[]
    }

    fn is_loading(&self) -> bool {
        false
    }

    fn error(&self) -> Option<&str> {
        None
    }

    fn is_ready(&self) -> bool {
        false
    }
}

enum Stage {
    Pending(Box<WishlistDeps>, PendingWishlist),
    Ready(Box<WishlistStore>),
}

/// Owns the hydration guard and hands out the right facade
pub struct WishlistProvider {
    guard: HydrationGuard,
    stage: Stage,
}

impl WishlistProvider {
    /// A provider in the pre-hydration stage. Nothing is read until [`mount`](Self::mount).
    pub fn new(deps: WishlistDeps) -> Self {
        Self {
            guard: HydrationGuard::new(),
            stage: Stage::Pending(Box::new(deps), PendingWishlist),
        }
    }

    /// First interactive pass: open the guard and switch to the live store.
    /// Returns `false` if already mounted.
    pub fn mount(&mut self) -> bool {
        let Stage::Pending(deps, _) = &self.stage else {
            return false;
        };
        let deps = deps.as_ref().clone();
        self.guard.open();
        self.stage = Stage::Ready(Box::new(WishlistStore::open(deps, self.guard.clone())));
        true
    }

    pub fn is_hydrated(&self) -> bool {
        self.guard.is_open()
    }

    pub fn wishlist(&self) -> &dyn WishlistFacade {
        match &self.stage {
            Stage::Pending(_, pending) => pending,
            Stage::Ready(store) => store.as_ref(),
        }
    }

    pub fn wishlist_mut(&mut self) -> &mut dyn WishlistFacade {
        match &mut self.stage {
            Stage::Pending(_, pending) => pending,
            Stage::Ready(store) => store.as_mut(),
        }
    }

    /// The live store, once mounted
    pub fn store_mut(&mut self) -> Option<&mut WishlistStore> {
        match &mut self.stage {
            Stage::Pending(..) => None,
            Stage::Ready(store) => Some(store.as_mut()),
        }
    }

    /// Forward storage-change notifications to the live store
    pub fn sync_storage_events(&mut self) -> bool {
        self.store_mut()
            .map(|store| store.sync_storage_events())
            .unwrap_or(false)
    }
}
