//! Wishlist Item Types
//!
//! `WishlistItem` is the persisted record; `DedupKey` is the composite
//! `(product_id, size_id)` identity that decides uniqueness. A missing size is
//! its own key, distinct from every concrete size.

use crate::shared::product::ProductSnapshot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One favorited product (and optional size) for one actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    /// Per-insertion identifier, not the dedup key
    pub id: String,
    pub product_id: String,
    #[serde(default)]
    pub size_id: Option<String>,
    pub added_at: DateTime<Utc>,
    #[serde(default)]
    pub product_data: Option<ProductSnapshot>,
}

impl WishlistItem {
    /// Build a new item stamped with `added_at`
    pub fn new(
        product_id: impl Into<String>,
        size_id: Option<String>,
        product_data: Option<ProductSnapshot>,
        added_at: DateTime<Utc>,
    ) -> Self {
        let product_id = product_id.into();
        let id = compose_item_id(&product_id, size_id.as_deref(), added_at);
        Self {
            id,
            product_id,
            size_id,
            added_at,
            product_data,
        }
    }

    /// The uniqueness key of this item
    pub fn key(&self) -> DedupKey {
        DedupKey::new(self.product_id.clone(), self.size_id.clone())
    }

    /// Whether this item has the given dedup key
    pub fn matches(&self, key: &DedupKey) -> bool {
        self.product_id == key.product_id && self.size_id == key.size_id
    }
}

/// `{product}-{size|default}-{millis}`
fn compose_item_id(product_id: &str, size_id: Option<&str>, added_at: DateTime<Utc>) -> String {
    format!(
        "{}-{}-{}",
        product_id,
        size_id.unwrap_or("default"),
        added_at.timestamp_millis()
    )
}

/// Composite uniqueness key `(product_id, size_id)`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DedupKey {
    pub product_id: String,
    pub size_id: Option<String>,
}

impl DedupKey {
    pub fn new(product_id: impl Into<String>, size_id: Option<String>) -> Self {
        Self {
            product_id: product_id.into(),
            size_id,
        }
    }

    /// Borrowed-argument constructor used by the facade
    pub fn of(product_id: &str, size_id: Option<&str>) -> Self {
        Self::new(product_id, size_id.map(str::to_string))
    }
}

impl fmt::Display for DedupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.size_id {
            Some(size) => write!(f, "{}:{}", self.product_id, size),
            None => write!(f, "{}:-", self.product_id),
        }
    }
}
