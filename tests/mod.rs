//! Test suite for the storefront wishlist
//!
//! This module organizes all tests

pub mod common;
pub mod integration;
pub mod property;
