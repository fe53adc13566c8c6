//! Byte-string keyed variant (spec's "multi-byte" string form): keys up to
//! `N` bytes, compared lexicographically. The "indirect/zero-terminated
//! string" form named alongside it adds nothing the generic engine doesn't
//! already give for free once the string is captured into a fixed-capacity
//! key at insert time, so both forms share this one implementation —
//! callers who have a `&[u8]` (whether it came from a fixed buffer or from
//! walking a C string to its NUL) just call [`TreeEntry::new`] with it.

use ebtree_core::{ByteStringKey, Entry, InsertOutcome, LinkStorage, Tree};
use std::ptr::NonNull;

pub type TreeEntry<const N: usize, S> = Entry<ByteStringKey<N>, S>;
pub type EbTree<const N: usize, S> = Tree<ByteStringKey<N>, S>;

/// # Safety
/// `entry` must not already be linked into any tree, and must outlive its
/// membership in this one.
pub unsafe fn insert<const N: usize, S: LinkStorage>(
    tree: &mut EbTree<N, S>,
    entry: NonNull<TreeEntry<N, S>>,
) -> InsertOutcome<ByteStringKey<N>, S> {
    tree.insert(entry)
}

/// # Safety
/// `entry` must currently be linked into `tree`.
pub unsafe fn delete<const N: usize, S: LinkStorage>(tree: &mut EbTree<N, S>, entry: NonNull<TreeEntry<N, S>>) {
    tree.delete(entry)
}

pub unsafe fn lookup<const N: usize, S: LinkStorage>(
    tree: &EbTree<N, S>,
    key: &[u8],
) -> Option<NonNull<TreeEntry<N, S>>> {
    tree.lookup(&ByteStringKey::new(key))
}

/// The "lookup with length" form (spec: "enforces that the queried prefix
/// ends at the stated byte count"): `key` is truncated to `len` bytes
/// before comparison, so a stored key that is a strict extension of the
/// truncated prefix does not match.
pub unsafe fn lookup_with_len<const N: usize, S: LinkStorage>(
    tree: &EbTree<N, S>,
    key: &[u8],
    len: usize,
) -> Option<NonNull<TreeEntry<N, S>>> {
    tree.lookup(&ByteStringKey::new(&key[..len]))
}

pub unsafe fn lookup_ge<const N: usize, S: LinkStorage>(
    tree: &EbTree<N, S>,
    key: &[u8],
) -> Option<NonNull<TreeEntry<N, S>>> {
    tree.lookup_ge(&ByteStringKey::new(key))
}

pub unsafe fn lookup_le<const N: usize, S: LinkStorage>(
    tree: &EbTree<N, S>,
    key: &[u8],
) -> Option<NonNull<TreeEntry<N, S>>> {
    tree.lookup_le(&ByteStringKey::new(key))
}

pub unsafe fn first<const N: usize, S: LinkStorage>(tree: &EbTree<N, S>) -> Option<NonNull<TreeEntry<N, S>>> {
    tree.first()
}

pub unsafe fn last<const N: usize, S: LinkStorage>(tree: &EbTree<N, S>) -> Option<NonNull<TreeEntry<N, S>>> {
    tree.last()
}

pub unsafe fn next<const N: usize, S: LinkStorage>(e: NonNull<TreeEntry<N, S>>) -> Option<NonNull<TreeEntry<N, S>>> {
    ebtree_core::next(e)
}

pub unsafe fn prev<const N: usize, S: LinkStorage>(e: NonNull<TreeEntry<N, S>>) -> Option<NonNull<TreeEntry<N, S>>> {
    ebtree_core::prev(e)
}

pub unsafe fn next_dup<const N: usize, S: LinkStorage>(
    e: NonNull<TreeEntry<N, S>>,
) -> Option<NonNull<TreeEntry<N, S>>> {
    ebtree_core::next_dup(e)
}

pub unsafe fn prev_dup<const N: usize, S: LinkStorage>(
    e: NonNull<TreeEntry<N, S>>,
) -> Option<NonNull<TreeEntry<N, S>>> {
    ebtree_core::prev_dup(e)
}

pub unsafe fn next_unique<const N: usize, S: LinkStorage>(
    e: NonNull<TreeEntry<N, S>>,
) -> Option<NonNull<TreeEntry<N, S>>> {
    ebtree_core::next_unique(e)
}

pub unsafe fn prev_unique<const N: usize, S: LinkStorage>(
    e: NonNull<TreeEntry<N, S>>,
) -> Option<NonNull<TreeEntry<N, S>>> {
    ebtree_core::prev_unique(e)
}
