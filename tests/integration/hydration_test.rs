//! Nothing touches storage before the first interactive pass

use crate::assert_in_wishlist;
use crate::common::{snapshot, TestWishlist};
use std::sync::Arc;
use storefront::shared::WishlistConfig;
use storefront::wishlist::{
    HydrationGuard, MemoryStorage, PartitionStore, SortBy, SortOrder, WishlistFacade,
};

#[test]
fn test_pending_wishlist_answers_defaults() {
    let storage = Arc::new(MemoryStorage::new());
    let mut seed = TestWishlist::with_storage(storage.clone());
    seed.session.login("u1", "tok");
    seed.provider.mount();
    seed.wishlist().add_to_wishlist("p1", None, Some(snapshot("Shirt", 20.0)));

    let mut tab = TestWishlist::with_storage(storage);
    tab.session.login("u1", "tok");
    assert!(!tab.provider.is_hydrated());
    assert!(!tab.wishlist().is_ready());
    assert!(!tab.wishlist().is_in_wishlist("p1", None));
    assert!(tab.wishlist().items().is_empty());
    assert!(tab
        .wishlist()
        .get_filtered_items("", SortBy::AddedAt, SortOrder::Desc)
        .is_empty());
    assert!(!tab.wishlist().toggle_wishlist("p2", None, None).success);
    assert_eq!(tab.feedback.count(), 0);

    assert!(tab.provider.mount());
    assert!(tab.wishlist().is_ready());
    assert_in_wishlist!(tab.wishlist(), "p1");
    assert_eq!(tab.wishlist().summary().total_value, 20.0);
}

#[test]
fn test_pending_mutations_are_not_persisted() {
    let mut tab = TestWishlist::new();
    tab.session.login("u1", "tok");

    assert!(!tab.wishlist().add_to_wishlist("p1", None, None));
    assert!(!tab.wishlist().clear_wishlist());
    assert!(tab.storage.is_empty());
}

#[test]
fn test_partition_store_behind_closed_guard() {
    let storage = Arc::new(MemoryStorage::new());
    let config = WishlistConfig::default();
    let open = HydrationGuard::new();
    open.open();
    let writer = PartitionStore::new(storage.clone(), config.storage_key.clone(), open);
    let mut seed = TestWishlist::with_storage(storage.clone());
    seed.session.login("u1", "tok");
    seed.provider.mount();
    seed.wishlist().add_to_wishlist("p1", None, None);
    assert_eq!(writer.load("u1").len(), 1);

    let closed = PartitionStore::new(storage, config.storage_key, HydrationGuard::new());
    assert!(closed.load("u1").is_empty());
    assert!(closed.save("u1", &[]).is_ok());
    assert_eq!(writer.load("u1").len(), 1);
}
