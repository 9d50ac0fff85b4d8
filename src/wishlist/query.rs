//! Derived, non-mutating views over the item list: search/sort projection
//! and the summary figures shown next to the list.

use crate::shared::wishlist::WishlistItem;
use serde::Serialize;
use std::cmp::Ordering;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    AddedAt,
    Name,
    Price,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Unrecognized sort key or order
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort option '{0}'")]
pub struct ParseSortError(pub String);

impl FromStr for SortBy {
    type Err = ParseSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "addedat" | "added_at" | "added" => Ok(Self::AddedAt),
            "name" => Ok(Self::Name),
            "price" => Ok(Self::Price),
            _ => Err(ParseSortError(s.to_string())),
        }
    }
}

impl FromStr for SortOrder {
    type Err = ParseSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(ParseSortError(s.to_string())),
        }
    }
}

/// Figures derived from item snapshots
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistSummary {
    pub active_items_count: usize,
    pub total_value: f64,
    pub total_savings: f64,
    pub available_items_count: usize,
    pub unavailable_items_count: usize,
}

fn name_of(item: &WishlistItem) -> String {
    item.product_data
        .as_ref()
        .map(|p| p.name.to_lowercase())
        .unwrap_or_default()
}

fn price_of(item: &WishlistItem) -> f64 {
    item.product_data
        .as_ref()
        .map(|p| p.effective_price())
        .unwrap_or(0.0)
}

/// Search and sort a copy of `items`
///
/// A non-empty `search_term` keeps items whose snapshot name or description
/// contains it, ignoring case; items without a snapshot never match. The sort
/// is stable, so ties keep their list order.
pub fn filter_items(
    items: &[WishlistItem],
    search_term: &str,
    sort_by: SortBy,
    sort_order: SortOrder,
) -> Vec<WishlistItem> {
    let needle = search_term.trim().to_lowercase();
    let mut filtered: Vec<WishlistItem> = items
        .iter()
        .filter(|item| {
            needle.is_empty()
                || item
                    .product_data
                    .as_ref()
                    .is_some_and(|p| p.matches(&needle))
        })
        .cloned()
        .collect();

    filtered.sort_by(|a, b| {
        let ordering = match sort_by {
            SortBy::AddedAt => a.added_at.cmp(&b.added_at),
            SortBy::Name => name_of(a).cmp(&name_of(b)),
            SortBy::Price => price_of(a)
                .partial_cmp(&price_of(b))
                .unwrap_or(Ordering::Equal),
        };
        match sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
    filtered
}

/// Summarize `items`. Items without a snapshot add no value and count as unavailable.
pub fn summarize(items: &[WishlistItem]) -> WishlistSummary {
    let mut summary = WishlistSummary {
        active_items_count: items.len(),
        ..WishlistSummary::default()
    };

    for snapshot in items.iter().filter_map(|item| item.product_data.as_ref()) {
        summary.total_value += snapshot.effective_price();
        summary.total_savings += snapshot.savings();
        if snapshot.is_available() {
            summary.available_items_count += 1;
        }
    }
    summary.unavailable_items_count = summary.active_items_count - summary.available_items_count;
    summary
}
