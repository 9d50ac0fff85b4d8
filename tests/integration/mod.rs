//! Integration tests: the wishlist driven through its provider, the way a
//! page uses it.

mod file_storage_test;
mod hydration_test;
mod scenarios_test;
