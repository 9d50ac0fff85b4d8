//! End-to-end behavior of the facade operations

use crate::common::{sized_product, snapshot, TestWishlist};
use crate::{assert_approx_eq, assert_contains, assert_in_wishlist, assert_last_feedback, assert_not_in_wishlist};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use storefront::shared::ProductSnapshot;
use storefront::wishlist::{
    FeedbackVariant, KeyValueStorage, MemoryStorage, NeverConfirm, SortBy, SortOrder,
    ToggleAction, WishlistFacade,
};

#[test]
fn test_anonymous_add_requires_sign_in() {
    let mut tab = TestWishlist::new();
    tab.provider.mount();

    assert!(!tab.wishlist().add_to_wishlist("p1", None, None));
    assert_eq!(tab.wishlist().item_count(), 0);
    assert_last_feedback!(tab.feedback, "Authentication required");
    assert_contains!(tab.feedback.last().unwrap().description, "sign in");
    assert!(tab.storage.is_empty());
}

#[test]
fn test_authenticated_add_updates_cache_and_summary() {
    let mut tab = TestWishlist::signed_in("u1");

    assert!(tab.wishlist().add_to_wishlist("p1", None, Some(snapshot("Shirt", 20.0))));
    assert_in_wishlist!(tab.wishlist(), "p1");
    assert_approx_eq!(tab.wishlist().summary().total_value, 20.0);
    assert_last_feedback!(tab.feedback, "Added to wishlist");
}

#[test]
fn test_duplicate_add_is_refused() {
    let mut tab = TestWishlist::signed_in("u1");
    tab.wishlist().add_to_wishlist("p1", None, Some(snapshot("Shirt", 20.0)));

    assert!(!tab.wishlist().add_to_wishlist("p1", None, None));
    assert_eq!(tab.wishlist().item_count(), 1);
    assert_eq!(tab.feedback.last().unwrap().variant, FeedbackVariant::Info);
}

#[test]
fn test_stored_duplicates_are_collapsed_on_mount() {
    let storage = Arc::new(MemoryStorage::new());
    storage
        .set(
            "wishlist",
            r#"{"u1":[
                {"id":"a","productId":"p1","addedAt":"2024-02-01T00:00:00Z"},
                {"id":"b","productId":"p1","addedAt":"2024-01-01T00:00:00Z"}
            ]}"#,
        )
        .unwrap();
    let mut tab = TestWishlist::with_storage(storage);
    tab.session.login("u1", "tok");
    tab.provider.mount();

    assert_eq!(tab.wishlist().item_count(), 1);
    assert_eq!(tab.wishlist().items()[0].id, "a");
    assert_in_wishlist!(tab.wishlist(), "p1");

    assert!(tab.wishlist().add_to_wishlist("p2", None, None));
    assert_eq!(tab.wishlist().item_count(), 2);
    assert!(!tab.wishlist().add_to_wishlist("p1", None, None));
    assert_eq!(tab.store().partitions().load("u1").len(), 2);
}

#[test]
fn test_sizes_are_distinct_keys() {
    let mut tab = TestWishlist::signed_in("u1");
    let product = sized_product();

    assert!(tab.wishlist().add_to_wishlist(
        "tee",
        Some("m"),
        Some(ProductSnapshot::from_product(&product, Some("m")))
    ));
    assert!(tab.wishlist().add_to_wishlist(
        "tee",
        Some("xl"),
        Some(ProductSnapshot::from_product(&product, Some("xl")))
    ));
    assert!(tab.wishlist().add_to_wishlist("tee", None, None));

    assert_eq!(tab.wishlist().item_count(), 3);
    assert_in_wishlist!(tab.wishlist(), "tee", Some("xl"));
    assert_not_in_wishlist!(tab.wishlist(), "tee", Some("s"));

    let summary = tab.wishlist().summary();
    assert_eq!(summary.available_items_count, 1);
    assert_eq!(summary.unavailable_items_count, 2);
    assert_approx_eq!(summary.total_value, 38.0);
    assert_approx_eq!(summary.total_savings, 6.0);
}

#[test]
fn test_remove_multiple_items_is_one_write() {
    let mut tab = TestWishlist::signed_in("u1");
    for product in ["p1", "p2", "p3"] {
        tab.wishlist().add_to_wishlist(product, None, None);
    }
    let ids: Vec<String> = tab
        .wishlist()
        .items()
        .iter()
        .filter(|item| item.product_id != "p2")
        .map(|item| item.id.clone())
        .collect();
    let before = tab.wishlist().summary().active_items_count;

    let mut events = match tab.storage.events() {
        Some(events) => events.subscribe(),
        None => panic!("memory storage publishes events"),
    };
    assert!(tab.wishlist().remove_multiple_items(&ids));

    let writes = events.drain();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].key.as_deref(), Some("wishlist"));
    assert_eq!(tab.wishlist().summary().active_items_count, before - 2);
    assert_not_in_wishlist!(tab.wishlist(), "p1");
    assert_in_wishlist!(tab.wishlist(), "p2");
    assert_not_in_wishlist!(tab.wishlist(), "p3");
}

#[test]
fn test_remove_multiple_unknown_ids() {
    let mut tab = TestWishlist::signed_in("u1");
    tab.wishlist().add_to_wishlist("p1", None, None);

    assert!(!tab.wishlist().remove_multiple_items(&["nope".to_string()]));
    assert_eq!(tab.wishlist().item_count(), 1);
}

#[test]
fn test_filtered_items_search_and_sort() {
    let mut tab = TestWishlist::signed_in("u1");
    tab.wishlist().add_to_wishlist("p1", None, Some(snapshot("Red Shirt", 30.0)));
    tab.wishlist().add_to_wishlist("p2", None, Some(snapshot("Blue Shirt", 10.0)));
    tab.wishlist().add_to_wishlist("p3", None, Some(snapshot("Hat", 5.0)));

    let names: Vec<String> = tab
        .wishlist()
        .get_filtered_items("shirt", SortBy::Price, SortOrder::Asc)
        .into_iter()
        .filter_map(|item| item.product_data.map(|p| p.name))
        .collect();
    assert_eq!(names, vec!["Blue Shirt", "Red Shirt"]);
}

#[test]
fn test_items_are_newest_first() {
    let mut tab = TestWishlist::signed_in("u1");
    tab.wishlist().add_to_wishlist("p1", None, None);
    tab.wishlist().add_to_wishlist("p2", None, None);

    let products: Vec<&str> = tab
        .wishlist()
        .items()
        .iter()
        .map(|item| item.product_id.as_str())
        .collect();
    assert_eq!(products, vec!["p2", "p1"]);
}

#[test]
fn test_toggle_round_trip() {
    let mut tab = TestWishlist::signed_in("u1");

    let added = tab.wishlist().toggle_wishlist("p1", Some("m"), None);
    assert!(added.success);
    assert_eq!(added.action, ToggleAction::Added);

    let removed = tab.wishlist().toggle_wishlist("p1", Some("m"), None);
    assert!(removed.success);
    assert_eq!(removed.action, ToggleAction::Removed);
    assert!(!removed.in_wishlist);
    assert_eq!(tab.wishlist().item_count(), 0);
}

#[test]
fn test_clear_declined_keeps_items() {
    let storage = Arc::new(MemoryStorage::new());
    let mut tab = TestWishlist::build(storage, Arc::new(NeverConfirm));
    tab.session.login("u1", "tok");
    tab.provider.mount();
    tab.wishlist().add_to_wishlist("p1", None, None);

    assert!(!tab.wishlist().clear_wishlist());
    assert_in_wishlist!(tab.wishlist(), "p1");
}

#[test]
fn test_clear_confirmed_empties_partition() {
    let mut tab = TestWishlist::signed_in("u1");
    tab.wishlist().add_to_wishlist("p1", None, None);
    tab.wishlist().add_to_wishlist("p2", None, None);

    assert!(tab.wishlist().clear_wishlist());
    assert_eq!(tab.wishlist().item_count(), 0);
    assert_not_in_wishlist!(tab.wishlist(), "p1");
    assert!(tab.store().partitions().load("u1").is_empty());
    assert_contains!(tab.feedback.last().unwrap().description, "2 items");
}

#[test]
fn test_quota_failure_keeps_optimistic_state() {
    let mut tab = TestWishlist::signed_in("u1");
    tab.storage.set_quota(Some(16));

    assert!(tab.wishlist().add_to_wishlist("p1", None, Some(snapshot("Shirt", 20.0))));
    assert_in_wishlist!(tab.wishlist(), "p1");
    assert!(tab.store().is_unsynced());
    assert!(tab.store().partitions().load("u1").is_empty());

    tab.storage.set_quota(None);
    assert!(tab.wishlist().add_to_wishlist("p2", None, None));
    assert!(!tab.store().is_unsynced());
    assert_eq!(tab.store().partitions().load("u1").len(), 2);
}
