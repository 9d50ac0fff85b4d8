//! Invariants that must hold for any sequence of facade calls

use crate::common::TestWishlist;
use proptest::prelude::*;
use std::collections::HashSet;
use storefront::shared::DedupKey;
use storefront::wishlist::WishlistFacade;

#[derive(Debug, Clone)]
enum Op {
    Add(usize, Option<usize>),
    Remove(usize, Option<usize>),
    Toggle(usize, Option<usize>),
    RemoveFirstTwo,
}

const PRODUCTS: &[&str] = &["p0", "p1", "p2", "p3"];
const SIZES: &[&str] = &["s", "m", "l"];

fn key_args(product: usize, size: Option<usize>) -> (&'static str, Option<&'static str>) {
    (PRODUCTS[product], size.map(|s| SIZES[s]))
}

fn key_strategy() -> impl Strategy<Value = (usize, Option<usize>)> {
    (0..PRODUCTS.len(), proptest::option::of(0..SIZES.len()))
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => key_strategy().prop_map(|(p, s)| Op::Add(p, s)),
        2 => key_strategy().prop_map(|(p, s)| Op::Remove(p, s)),
        2 => key_strategy().prop_map(|(p, s)| Op::Toggle(p, s)),
        1 => Just(Op::RemoveFirstTwo),
    ]
}

fn run(tab: &mut TestWishlist, op: &Op) {
    match *op {
        Op::Add(p, s) => {
            let (product, size) = key_args(p, s);
            tab.wishlist().add_to_wishlist(product, size, None);
        }
        Op::Remove(p, s) => {
            let (product, size) = key_args(p, s);
            tab.wishlist().remove_from_wishlist(product, size);
        }
        Op::Toggle(p, s) => {
            let (product, size) = key_args(p, s);
            tab.wishlist().toggle_wishlist(product, size, None);
        }
        Op::RemoveFirstTwo => {
            let ids: Vec<String> = tab
                .wishlist()
                .items()
                .iter()
                .take(2)
                .map(|item| item.id.clone())
                .collect();
            tab.wishlist().remove_multiple_items(&ids);
        }
    }
}

fn all_keys() -> impl Iterator<Item = (&'static str, Option<&'static str>)> {
    PRODUCTS.iter().flat_map(|product| {
        std::iter::once(None)
            .chain(SIZES.iter().map(|size| Some(*size)))
            .map(move |size| (*product, size))
    })
}

proptest! {
    #[test]
    fn test_no_duplicate_keys(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut tab = TestWishlist::signed_in("u1");
        for op in &ops {
            run(&mut tab, op);
        }
        let items = tab.wishlist().items().to_vec();
        let keys: HashSet<DedupKey> = items.iter().map(|item| item.key()).collect();
        prop_assert_eq!(keys.len(), items.len());
    }

    #[test]
    fn test_cache_mirrors_items(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut tab = TestWishlist::signed_in("u1");
        for op in &ops {
            run(&mut tab, op);
        }
        for (product, size) in all_keys() {
            let key = DedupKey::of(product, size);
            let listed = tab.wishlist().items().iter().any(|item| item.matches(&key));
            prop_assert_eq!(tab.wishlist().is_in_wishlist(product, size), listed);
            prop_assert_eq!(tab.wishlist().check_wishlist_status(product, size), listed);
        }
    }

    #[test]
    fn test_storage_mirrors_items(ops in prop::collection::vec(op_strategy(), 1..30)) {
        let mut tab = TestWishlist::signed_in("u1");
        for op in &ops {
            run(&mut tab, op);
        }
        let items = tab.wishlist().items().to_vec();
        prop_assert_eq!(tab.store().partitions().load("u1"), items);
    }

    #[test]
    fn test_toggle_parity(product in 0..PRODUCTS.len(), size in proptest::option::of(0..SIZES.len()), times in 1usize..8) {
        let mut tab = TestWishlist::signed_in("u1");
        let (product, size) = key_args(product, size);
        let mut last = None;
        for _ in 0..times {
            last = Some(tab.wishlist().toggle_wishlist(product, size, None));
        }
        let odd = times % 2 == 1;
        prop_assert_eq!(last.map(|r| r.in_wishlist), Some(odd));
        prop_assert_eq!(tab.wishlist().is_in_wishlist(product, size), odd);
        prop_assert_eq!(tab.wishlist().item_count(), usize::from(odd));
    }

    #[test]
    fn test_other_partition_untouched(
        seed in prop::collection::vec(op_strategy(), 1..15),
        ops in prop::collection::vec(op_strategy(), 0..25),
    ) {
        let mut tab = TestWishlist::signed_in("u1");
        for op in &seed {
            run(&mut tab, op);
        }
        let before = tab.store().partitions().load("u1");

        tab.session.login("u2", "token-u2");
        for op in &ops {
            run(&mut tab, op);
        }
        tab.wishlist().clear_wishlist();

        prop_assert_eq!(tab.store().partitions().load("u1"), before);
    }
}
