//! Custom assertion macros for wishlist tests
//!
//! Wrap the common checks so failures print the item list or the feedback
//! log instead of a bare `false`.

/// Assert that a result is ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that two money amounts are approximately equal
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr) => {
        $crate::assert_approx_eq!($left, $right, 1e-9)
    };
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let (left, right): (f64, f64) = ($left, $right);
        let diff = (left - right).abs();
        assert!(
            diff < $epsilon,
            "Values are not approximately equal: {} vs {} (diff: {})",
            left,
            right,
            diff
        );
    }};
}

/// Assert that a string contains a substring
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {
        assert!(
            $haystack.contains($needle),
            "Expected '{}' to contain '{}'",
            $haystack,
            $needle
        );
    };
}

/// Assert membership through the facade's cache read
#[macro_export]
macro_rules! assert_in_wishlist {
    ($wishlist:expr, $product:expr) => {
        $crate::assert_in_wishlist!($wishlist, $product, None)
    };
    ($wishlist:expr, $product:expr, $size:expr) => {{
        let size: Option<&str> = $size;
        assert!(
            $wishlist.is_in_wishlist($product, size),
            "Expected {}:{:?} in wishlist, items: {:?}",
            $product,
            size,
            $wishlist.items()
        );
    }};
}

/// Assert absence through the facade's cache read
#[macro_export]
macro_rules! assert_not_in_wishlist {
    ($wishlist:expr, $product:expr) => {
        $crate::assert_not_in_wishlist!($wishlist, $product, None)
    };
    ($wishlist:expr, $product:expr, $size:expr) => {{
        let size: Option<&str> = $size;
        assert!(
            !$wishlist.is_in_wishlist($product, size),
            "Expected {}:{:?} absent from wishlist, items: {:?}",
            $product,
            size,
            $wishlist.items()
        );
    }};
}

/// Assert the most recent feedback title
#[macro_export]
macro_rules! assert_last_feedback {
    ($feedback:expr, $title:expr) => {
        match $feedback.last() {
            Some(last) => assert_eq!(last.title, $title, "feedback log: {:?}", $feedback.messages()),
            None => panic!("Expected feedback '{}', got none", $title),
        }
    };
}
