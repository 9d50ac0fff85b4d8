//! Property-based tests for wishlist invariants

mod wishlist_proptest;
