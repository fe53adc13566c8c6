//! Elastic binary trees (EB-tree): intrusive, self-organizing, radix-style
//! ordered containers with O(1) insert/delete and duplicate-key support.
//!
//! This crate instantiates the generic engine in `ebtree-core` for the
//! integer key domains ([`eb32`], [`ebs32`], [`eb64`], [`ebs64`]) and the
//! byte-string key domain ([`bytes`]), exposing one module per variant with
//! an identical surface: `insert`, `lookup`, `lookup_ge`, `lookup_le`,
//! `delete`, `first`, `last`, `next`, `prev`, `next_dup`, `prev_dup`,
//! `next_unique`, `prev_unique`. The address-keyed CB variant lives in the
//! sibling `cbtree` crate, re-exported here for a single point of entry.
//!
//! Every variant is additionally parameterized over a storage encoding —
//! [`Absolute`] (plain pointers) or [`Relative`] (pointer-relative
//! displacements, letting the whole structure be relocated without
//! fix-up) — selected as the second type parameter on each variant's
//! `Tree`/`Entry` aliases.

pub use ebtree_core::{Absolute, BranchTag, InsertOutcome, Key, ParentKind, Relative, Side};

pub use cbtree::{cba_delete, cba_insert, cba_lookup, cba_lookup_ge, cba_lookup_le, CbEntry, CbTree};

pub mod bytes;

macro_rules! define_integer_variant {
    ($(#[$meta:meta])* $modname:ident, $key:ty) => {
        $(#[$meta])*
        pub mod $modname {
            use ebtree_core::{Entry, InsertOutcome, LinkStorage, Tree};
            use std::ptr::NonNull;

            /// Entry storage for this variant; embed one in any caller-owned struct.
            pub type TreeEntry<S> = Entry<$key, S>;

            /// A tree over this variant's key domain and storage encoding.
            pub type EbTree<S> = Tree<$key, S>;

            /// # Safety
            /// `entry` must not already be linked into any tree, and must outlive
            /// its membership in this one.
            pub unsafe fn insert<S: LinkStorage>(
                tree: &mut EbTree<S>,
                entry: NonNull<TreeEntry<S>>,
            ) -> InsertOutcome<$key, S> {
                tree.insert(entry)
            }

            /// # Safety
            /// `entry` must currently be linked into `tree`.
            pub unsafe fn delete<S: LinkStorage>(tree: &mut EbTree<S>, entry: NonNull<TreeEntry<S>>) {
                tree.delete(entry)
            }

            pub unsafe fn lookup<S: LinkStorage>(tree: &EbTree<S>, key: $key) -> Option<NonNull<TreeEntry<S>>> {
                tree.lookup(&key)
            }

            pub unsafe fn lookup_ge<S: LinkStorage>(tree: &EbTree<S>, key: $key) -> Option<NonNull<TreeEntry<S>>> {
                tree.lookup_ge(&key)
            }

            pub unsafe fn lookup_le<S: LinkStorage>(tree: &EbTree<S>, key: $key) -> Option<NonNull<TreeEntry<S>>> {
                tree.lookup_le(&key)
            }

            pub unsafe fn first<S: LinkStorage>(tree: &EbTree<S>) -> Option<NonNull<TreeEntry<S>>> {
                tree.first()
            }

            pub unsafe fn last<S: LinkStorage>(tree: &EbTree<S>) -> Option<NonNull<TreeEntry<S>>> {
                tree.last()
            }

            pub unsafe fn next<S: LinkStorage>(e: NonNull<TreeEntry<S>>) -> Option<NonNull<TreeEntry<S>>> {
                ebtree_core::next(e)
            }

            pub unsafe fn prev<S: LinkStorage>(e: NonNull<TreeEntry<S>>) -> Option<NonNull<TreeEntry<S>>> {
                ebtree_core::prev(e)
            }

            pub unsafe fn next_dup<S: LinkStorage>(e: NonNull<TreeEntry<S>>) -> Option<NonNull<TreeEntry<S>>> {
                ebtree_core::next_dup(e)
            }

            pub unsafe fn prev_dup<S: LinkStorage>(e: NonNull<TreeEntry<S>>) -> Option<NonNull<TreeEntry<S>>> {
                ebtree_core::prev_dup(e)
            }

            pub unsafe fn next_unique<S: LinkStorage>(e: NonNull<TreeEntry<S>>) -> Option<NonNull<TreeEntry<S>>> {
                ebtree_core::next_unique(e)
            }

            pub unsafe fn prev_unique<S: LinkStorage>(e: NonNull<TreeEntry<S>>) -> Option<NonNull<TreeEntry<S>>> {
                ebtree_core::prev_unique(e)
            }

        }
    };
}

define_integer_variant!(
    /// Unsigned 32-bit integer keys.
    eb32,
    u32
);
define_integer_variant!(
    /// Signed 32-bit integer keys.
    ebs32,
    i32
);
define_integer_variant!(
    /// Unsigned 64-bit integer keys.
    eb64,
    u64
);
define_integer_variant!(
    /// Signed 64-bit integer keys.
    ebs64,
    i64
);
