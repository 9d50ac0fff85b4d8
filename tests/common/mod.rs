//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - Wishlist fixtures wired to in-memory collaborators
//! - Custom assertion macros

pub mod assertions;
pub mod fixtures;

// Re-export commonly used utilities
pub use fixtures::*;
