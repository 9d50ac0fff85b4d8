//! Product Snapshot Types
//!
//! The catalog shape consumed from the product API, and the denormalized
//! snapshot copied into a wishlist item at add-time. Snapshots are never
//! refreshed; they only serve offline rendering and the derived summary.

use serde::{Deserialize, Serialize};

/// Product as returned by the catalog API (consumed, not owned)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub discounted_price: Option<f64>,
    #[serde(default)]
    pub inventory: Option<i64>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub product_sizes: Vec<ProductSize>,
}

/// Per-size pricing and stock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSize {
    pub size_id: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub discounted_price: Option<f64>,
    #[serde(default)]
    pub inventory: Option<i64>,
}

/// Denormalized product fields stored inside a wishlist item
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductSnapshot {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discounted_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

impl ProductSnapshot {
    /// Minimal snapshot with a name and list price
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_discount(mut self, discounted_price: f64) -> Self {
        self.discounted_price = Some(discounted_price);
        self
    }

    pub fn with_inventory(mut self, inventory: i64) -> Self {
        self.inventory = Some(inventory);
        self
    }

    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }

    /// Copy a catalog product, letting a listed size override price and stock
    pub fn from_product(product: &Product, size_id: Option<&str>) -> Self {
        let mut snapshot = Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            discounted_price: product.discounted_price,
            inventory: product.inventory,
            images: product.images.clone(),
        };

        let size = size_id.and_then(|id| product.product_sizes.iter().find(|s| s.size_id == id));
        if let Some(size) = size {
            if let Some(price) = size.price {
                snapshot.price = price;
                snapshot.discounted_price = size.discounted_price;
            }
            if size.inventory.is_some() {
                snapshot.inventory = size.inventory;
            }
        }

        snapshot
    }

    /// Price the shopper actually pays
    ///
    /// A discount only applies when it is positive and below the list price.
    pub fn effective_price(&self) -> f64 {
        match self.discounted_price {
            Some(discounted) if discounted > 0.0 && discounted < self.price => discounted,
            _ => self.price,
        }
    }

    /// List price minus effective price, never negative
    pub fn savings(&self) -> f64 {
        self.price - self.effective_price()
    }

    /// In stock according to the snapshot. Unknown stock counts as unavailable.
    pub fn is_available(&self) -> bool {
        self.inventory.is_some_and(|count| count > 0)
    }

    /// Case-insensitive substring match against name and description
    pub(crate) fn matches(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle_lower))
    }
}
