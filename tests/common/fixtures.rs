//! Test fixtures
//!
//! A wishlist wired to in-memory collaborators, plus product builders.

use std::sync::Arc;
use storefront::shared::{Product, ProductSize, ProductSnapshot, WishlistConfig};
use storefront::wishlist::{
    AlwaysConfirm, Confirm, KeyValueStorage, MemoryStorage, RecordingFeedback, SessionReader,
    SharedSession, WishlistDeps, WishlistFacade, WishlistProvider, WishlistStore,
};

/// One "tab": a provider plus handles on everything injected into it
pub struct TestWishlist {
    pub storage: Arc<MemoryStorage>,
    pub session: Arc<SharedSession>,
    pub feedback: Arc<RecordingFeedback>,
    pub provider: WishlistProvider,
}

impl TestWishlist {
    /// Unmounted wishlist over fresh storage
    pub fn new() -> Self {
        Self::with_storage(Arc::new(MemoryStorage::new()))
    }

    /// Unmounted wishlist over shared storage
    pub fn with_storage(storage: Arc<MemoryStorage>) -> Self {
        Self::build(storage, Arc::new(AlwaysConfirm))
    }

    pub fn build(storage: Arc<MemoryStorage>, confirm: Arc<dyn Confirm>) -> Self {
        let session = Arc::new(SharedSession::anonymous());
        let feedback = Arc::new(RecordingFeedback::new());
        let provider = WishlistProvider::new(WishlistDeps::new(
            storage.clone(),
            session.clone(),
            feedback.clone(),
            confirm,
            WishlistConfig::default(),
        ));
        Self {
            storage,
            session,
            feedback,
            provider,
        }
    }

    /// Mounted and signed in as `user`
    pub fn signed_in(user: &str) -> Self {
        let mut wishlist = Self::new();
        wishlist.session.login(user, format!("token-{}", user));
        wishlist.provider.mount();
        wishlist
    }

    pub fn wishlist(&mut self) -> &mut dyn WishlistFacade {
        self.provider.wishlist_mut()
    }

    pub fn store(&mut self) -> &mut WishlistStore {
        match self.provider.store_mut() {
            Some(store) => store,
            None => panic!("wishlist not mounted"),
        }
    }
}

impl Default for TestWishlist {
    fn default() -> Self {
        Self::new()
    }
}

/// Deps over arbitrary collaborators, for tests that bring their own
pub fn deps(storage: Arc<dyn KeyValueStorage>, session: Arc<dyn SessionReader>) -> WishlistDeps {
    WishlistDeps::new(
        storage,
        session,
        Arc::new(RecordingFeedback::new()),
        Arc::new(AlwaysConfirm),
        WishlistConfig::default(),
    )
}

pub fn snapshot(name: &str, price: f64) -> ProductSnapshot {
    ProductSnapshot::new(name, price)
}

/// A catalog product with two sizes priced differently
pub fn sized_product() -> Product {
    Product {
        id: "tee".to_string(),
        name: "Basic Tee".to_string(),
        description: Some("Plain cotton tee".to_string()),
        price: 20.0,
        discounted_price: Some(15.0),
        inventory: Some(10),
        images: vec!["tee.png".to_string()],
        product_sizes: vec![
            ProductSize {
                size_id: "m".to_string(),
                price: Some(20.0),
                discounted_price: None,
                inventory: Some(4),
            },
            ProductSize {
                size_id: "xl".to_string(),
                price: Some(24.0),
                discounted_price: Some(18.0),
                inventory: Some(0),
            },
        ],
    }
}
