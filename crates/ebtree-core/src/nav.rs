//! In-order navigation: `first`/`last`/`next`/`prev` and the
//! duplicate-aware variants (spec §4.5).

use crate::descent::{descend_leftmost, descend_rightmost, Slot};
use crate::entry::{Entry, Root};
use crate::key::Key;
use crate::link::{ParentKind, Side};
use crate::storage::LinkStorage;
use std::ptr::NonNull;

/// Leftmost (smallest-key) entry, or `None` if `root` is empty.
pub unsafe fn first<K, S: LinkStorage>(root: &Root<S>) -> Option<NonNull<Entry<K, S>>> {
    if root.is_empty() {
        return None;
    }
    Some(descend_leftmost(Slot::Root(NonNull::from(root))))
}

/// Rightmost (largest-key) entry, or `None` if `root` is empty.
pub unsafe fn last<K, S: LinkStorage>(root: &Root<S>) -> Option<NonNull<Entry<K, S>>> {
    if root.is_empty() {
        return None;
    }
    Some(descend_rightmost(Slot::Root(NonNull::from(root))))
}

/// In-order successor of `e`, or `None` if `e` is the last entry.
///
/// Walks up from `e`'s leaf position: the first time the walk arrives at
/// an ancestor via its *left* branch, that ancestor's right subtree holds
/// the answer (descend it leftmost). If the walk reaches the root without
/// ever arriving via a left branch, `e` was the rightmost entry.
pub unsafe fn next<K, S: LinkStorage>(e: NonNull<Entry<K, S>>) -> Option<NonNull<Entry<K, S>>> {
    walk_up_over(e, Side::Left, Side::Right)
}

/// Symmetric to [`next`]: in-order predecessor, or `None` if `e` is first.
pub unsafe fn prev<K, S: LinkStorage>(e: NonNull<Entry<K, S>>) -> Option<NonNull<Entry<K, S>>> {
    walk_up_over(e, Side::Right, Side::Left)
}

/// Shared machinery for [`next`]/[`prev`]: ascend while `e`'s position is
/// on `away_side` of its parent; the first time it's on the opposite side,
/// descend that parent's `toward_side` branch all the way in the
/// `away_side` direction.
unsafe fn walk_up_over<K, S: LinkStorage>(
    e: NonNull<Entry<K, S>>,
    away_side: Side,
    toward_side: Side,
) -> Option<NonNull<Entry<K, S>>> {
    let e_ref = e.as_ref();
    let mut kind = e_ref.leaf_p.kind();
    let mut addr = e_ref.leaf_p.addr(Entry::leaf_p_addr(e));

    loop {
        match kind {
            ParentKind::Root => return None,
            ParentKind::Side(side) if side == away_side => {
                let parent: NonNull<Entry<K, S>> = NonNull::new_unchecked(addr as *mut Entry<K, S>);
                return Some(descend_side(Slot::Entry(parent, toward_side), away_side));
            }
            ParentKind::Side(_) => {
                let parent: NonNull<Entry<K, S>> = NonNull::new_unchecked(addr as *mut Entry<K, S>);
                let parent_ref = parent.as_ref();
                kind = parent_ref.node_p.kind();
                addr = parent_ref.node_p.addr(Entry::node_p_addr(parent));
            }
        }
    }
}

#[inline]
unsafe fn descend_side<K, S: LinkStorage>(slot: Slot<K, S>, side: Side) -> NonNull<Entry<K, S>> {
    match side {
        Side::Left => descend_leftmost(slot),
        Side::Right => descend_rightmost(slot),
    }
}

/// `next`, but `None` if stepping would land in a different duplicate
/// group than `e` (spec §6 `next_dup`).
pub unsafe fn next_dup<K: Key, S: LinkStorage>(e: NonNull<Entry<K, S>>) -> Option<NonNull<Entry<K, S>>> {
    let candidate = next(e)?;
    if candidate.as_ref().key.key_cmp(&e.as_ref().key) == std::cmp::Ordering::Equal {
        Some(candidate)
    } else {
        None
    }
}

/// Symmetric to [`next_dup`].
pub unsafe fn prev_dup<K: Key, S: LinkStorage>(e: NonNull<Entry<K, S>>) -> Option<NonNull<Entry<K, S>>> {
    let candidate = prev(e)?;
    if candidate.as_ref().key.key_cmp(&e.as_ref().key) == std::cmp::Ordering::Equal {
        Some(candidate)
    } else {
        None
    }
}

/// `next`, skipping the rest of `e`'s own duplicate group: returns the
/// first entry with a strictly greater key, or `None` (spec §4.5
/// `next_unique`).
pub unsafe fn next_unique<K: Key, S: LinkStorage>(e: NonNull<Entry<K, S>>) -> Option<NonNull<Entry<K, S>>> {
    let key = e.as_ref().key;
    let mut cur = e;
    loop {
        cur = next(cur)?;
        if cur.as_ref().key.key_cmp(&key) != std::cmp::Ordering::Equal {
            return Some(cur);
        }
    }
}

/// Symmetric to [`next_unique`].
pub unsafe fn prev_unique<K: Key, S: LinkStorage>(e: NonNull<Entry<K, S>>) -> Option<NonNull<Entry<K, S>>> {
    let key = e.as_ref().key;
    let mut cur = e;
    loop {
        cur = prev(cur)?;
        if cur.as_ref().key.key_cmp(&key) != std::cmp::Ordering::Equal {
            return Some(cur);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insert::insert;
    use crate::storage::Absolute;

    fn boxed(key: u32) -> NonNull<Entry<u32, Absolute>> {
        let b = Box::new(Entry::new(key));
        NonNull::new(Box::into_raw(b)).unwrap()
    }

    #[test]
    fn first_last_and_forward_walk_are_sorted() {
        let mut root = Root::<Absolute>::new();
        let keys = [5u32, 2, 8, 1, 9, 3, 7];
        for &k in &keys {
            unsafe {
                insert(&mut root, boxed(k));
            }
        }
        unsafe {
            let mut out = Vec::new();
            let mut cur = first(&root);
            while let Some(e) = cur {
                out.push(e.as_ref().key);
                cur = next(e);
            }
            let mut sorted = keys.to_vec();
            sorted.sort();
            assert_eq!(out, sorted);
            assert_eq!(first::<u32, Absolute>(&root).unwrap().as_ref().key, 1);
            assert_eq!(last::<u32, Absolute>(&root).unwrap().as_ref().key, 9);
        }
    }

    #[test]
    fn next_unique_skips_whole_duplicate_group() {
        let mut root = Root::<Absolute>::new();
        unsafe {
            insert(&mut root, boxed(3));
            let d1 = boxed(7);
            insert(&mut root, d1);
            for _ in 0..4 {
                insert(&mut root, boxed(7));
            }
            insert(&mut root, boxed(11));

            assert_eq!(next_unique(d1).unwrap().as_ref().key, 11);
            let three = first::<u32, Absolute>(&root).unwrap();
            assert_eq!(next_unique(three).unwrap().as_ref().key, 7);
        }
    }

    #[test]
    fn next_dup_stays_within_group_then_none() {
        let mut root = Root::<Absolute>::new();
        unsafe {
            let a = boxed(7);
            let b = boxed(7);
            insert(&mut root, a);
            insert(&mut root, b);
            insert(&mut root, boxed(11));
            assert_eq!(next_dup(a).unwrap().as_ref().key, 7);
            assert!(next_dup(b).is_none());
        }
    }
}
