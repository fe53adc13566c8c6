//! Random insert/delete sequences checked against a `Vec`-based reference
//! model (spec's 100k-key stress scenario), in the style of the teacher's
//! `content-tree/tests/fuzzer.rs`: a `SmallRng`-seeded loop drives both the
//! tree and a plain `Vec` through the same operations, and every so often
//! we assert the tree's in-order walk agrees with the model, including
//! duplicate-group insertion order.

use ebtree_core::{next, Absolute, Entry, InsertOutcome, Root};
use rand::prelude::*;
use std::ptr::NonNull;

fn boxed(key: u32) -> NonNull<Entry<u32, Absolute>> {
    let b = Box::new(Entry::new(key));
    NonNull::new(Box::into_raw(b)).unwrap()
}

unsafe fn check_against_model(root: &Root<Absolute>, live: &[NonNull<Entry<u32, Absolute>>]) {
    let mut model = live.to_vec();
    // Stable sort: equal keys keep their relative (insertion) order, which
    // is exactly the order a duplicate subtree must expose on traversal.
    model.sort_by_key(|e| e.as_ref().key);

    let mut walked: Vec<NonNull<Entry<u32, Absolute>>> = Vec::with_capacity(model.len());
    let mut cur = ebtree_core::nav::first::<u32, Absolute>(root);
    while let Some(e) = cur {
        walked.push(e);
        cur = next(e);
    }

    assert_eq!(walked.len(), model.len());
    for (got, want) in walked.iter().zip(model.iter()) {
        assert_eq!(got.as_ptr(), want.as_ptr(), "traversal order diverged from insertion-ordered model");
    }
}

fn random_edits_once(iterations: usize, key_range: u32) {
    let mut rng = SmallRng::seed_from_u64(0x1357_2468);
    let mut root = Root::<Absolute>::new();
    let mut live: Vec<NonNull<Entry<u32, Absolute>>> = Vec::new();

    unsafe {
        for i in 0..iterations {
            // Bias toward insertion early on so deletes have something to
            // work with, then let the tree oscillate in size.
            let do_insert = live.is_empty() || rng.gen_bool(0.55);
            if do_insert {
                let key = rng.gen_range(0..key_range);
                let e = boxed(key);
                match ebtree_core::insert::insert(&mut root, e) {
                    InsertOutcome::Inserted => live.push(e),
                    InsertOutcome::AlreadyExists(_) => unreachable!("root allows duplicates"),
                }
            } else {
                let idx = rng.gen_range(0..live.len());
                let e = live.swap_remove(idx);
                ebtree_core::delete::delete(&mut root, e);
                drop(Box::from_raw(e.as_ptr()));
            }

            if i % 200 == 0 {
                check_against_model(&root, &live);
            }
        }
        check_against_model(&root, &live);

        for e in live {
            ebtree_core::delete::delete(&mut root, e);
            drop(Box::from_raw(e.as_ptr()));
        }
        assert!(root.is_empty());
    }
}

#[test]
fn random_edits() {
    random_edits_once(3_000, 40);
}

#[test]
#[ignore]
fn random_edits_100k() {
    random_edits_once(100_000, 4_000);
}
