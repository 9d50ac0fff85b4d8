//! File-backed storage survives a restart

use crate::assert_ok;
use crate::common::{deps, snapshot};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use storefront::shared::{UserInfo, WishlistConfig};
use storefront::wishlist::{FileStorage, StorageSession, WishlistFacade, WishlistProvider};
use tempfile::TempDir;

fn open(config: &WishlistConfig) -> WishlistProvider {
    let storage = Arc::new(assert_ok!(FileStorage::from_config(config)));
    let session = Arc::new(StorageSession::new(storage.clone(), config));
    let mut provider = WishlistProvider::new(deps(storage, session));
    provider.mount();
    provider
}

fn signed_in_config(dir: &TempDir) -> WishlistConfig {
    let config = assert_ok!(WishlistConfig::builder().data_dir(dir.path()).build());
    let storage = Arc::new(assert_ok!(FileStorage::from_config(&config)));
    let user = UserInfo {
        id: "u1".to_string(),
        username: "alice".to_string(),
        email: String::new(),
    };
    assert_ok!(StorageSession::new(storage, &config).sign_in(&user, "tok"));
    config
}

#[test]
fn test_items_survive_restart() {
    let dir = assert_ok!(tempfile::tempdir());
    let config = signed_in_config(&dir);

    let mut first = open(&config);
    assert!(first.wishlist_mut().add_to_wishlist("p1", Some("m"), Some(snapshot("Shirt", 20.0))));
    assert!(first.wishlist_mut().add_to_wishlist("p2", None, None));
    let written = first.wishlist().items().to_vec();
    drop(first);

    let second = open(&config);
    assert_eq!(second.wishlist().items(), written.as_slice());
    assert!(second.wishlist().is_in_wishlist("p1", Some("m")));
}

#[test]
fn test_corrupt_file_is_reported_and_replaced() {
    let dir = assert_ok!(tempfile::tempdir());
    let config = signed_in_config(&dir);
    assert_ok!(std::fs::write(dir.path().join("wishlist.json"), "{not json"));

    let mut provider = open(&config);
    assert!(provider.wishlist().items().is_empty());
    assert!(provider.wishlist().error().is_some());

    assert!(provider.wishlist_mut().add_to_wishlist("p1", None, None));
    let reopened = open(&config);
    assert!(reopened.wishlist().is_in_wishlist("p1", None));
}

#[test]
fn test_quota_from_config() {
    let dir = assert_ok!(tempfile::tempdir());
    let config = signed_in_config(&dir);
    let limited = WishlistConfig {
        quota_bytes: Some(10),
        ..config.clone()
    };

    let mut provider = open(&limited);
    assert!(provider.wishlist_mut().add_to_wishlist("p1", None, None));
    assert!(provider.store_mut().is_some_and(|store| store.is_unsynced()));

    let reopened = open(&config);
    assert!(reopened.wishlist().items().is_empty());
}
