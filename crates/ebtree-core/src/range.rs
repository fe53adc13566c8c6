//! Exact lookup and the `_ge`/`_le` nearest-neighbor range queries (spec
//! §4.6).

use crate::descent::{descend_leftmost, descend_rightmost, find_candidate, Candidate, Slot};
use crate::entry::{Entry, Root};
use crate::key::Key;
use crate::link::Side;
use crate::storage::LinkStorage;
use std::cmp::Ordering;
use std::ptr::NonNull;

/// Exact-match lookup. Returns some entry whose key equals `key` (for a
/// duplicate group, an unspecified member of the group), or `None`.
pub unsafe fn lookup<K: Key, S: LinkStorage>(root: &Root<S>, key: &K) -> Option<NonNull<Entry<K, S>>> {
    if root.is_empty() {
        return None;
    }
    let cand = match find_candidate(root, key) {
        Candidate::Leaf(e) => e,
        Candidate::DupRoot(e) => e,
    };
    if cand.as_ref().key.key_cmp(key) == Ordering::Equal {
        Some(cand)
    } else {
        None
    }
}

/// Lowest-keyed entry with `entry.key >= key`, or `None`.
pub unsafe fn lookup_ge<K: Key, S: LinkStorage>(root: &Root<S>, key: &K) -> Option<NonNull<Entry<K, S>>> {
    descend_toward(root, key, Side::Left)
}

/// Highest-keyed entry with `entry.key <= key`, or `None`.
pub unsafe fn lookup_le<K: Key, S: LinkStorage>(root: &Root<S>, key: &K) -> Option<NonNull<Entry<K, S>>> {
    descend_toward(root, key, Side::Right)
}

/// Shared engine for [`lookup_ge`] (`rewind_side = Left`) and [`lookup_le`]
/// (`rewind_side = Right`): descend the tree remembering the last node at
/// which the query turned toward `rewind_side`'s opposite, then either
/// confirm the leaf reached or rewind to that remembered node's
/// `rewind_side` sibling (spec §4.6 steps 1-2).
unsafe fn descend_toward<K: Key, S: LinkStorage>(
    root: &Root<S>,
    key: &K,
    rewind_side: Side,
) -> Option<NonNull<Entry<K, S>>> {
    if root.is_empty() {
        return None;
    }
    // `Left` for `_ge` (we rewind across a remembered *left* turn, spec's
    // `last_l`); `Right` for `_le` (`last_r`).
    let turn_side = rewind_side;
    let mut slot: Slot<K, S> = Slot::Root(NonNull::from(root));
    let mut last_turn: Option<NonNull<Entry<K, S>>> = None;

    loop {
        let link = slot.read();
        let addr = link.addr(slot.link_addr());
        match link.tag() {
            crate::link::BranchTag::Leaf => {
                let leaf: NonNull<Entry<K, S>> = NonNull::new_unchecked(addr as *mut Entry<K, S>);
                let cmp = leaf.as_ref().key.key_cmp(key);
                let qualifies = match rewind_side {
                    Side::Left => cmp != Ordering::Less,    // _ge: leaf.key >= key
                    Side::Right => cmp != Ordering::Greater, // _le: leaf.key <= key
                };
                if qualifies {
                    return Some(leaf);
                }
                return rewind(last_turn, rewind_side);
            }
            crate::link::BranchTag::Node => {
                let node: NonNull<Entry<K, S>> = NonNull::new_unchecked(addr as *mut Entry<K, S>);
                let node_ref = node.as_ref();
                if node_ref.bit < 0 {
                    let cmp = node_ref.key.key_cmp(key);
                    let qualifies = match rewind_side {
                        Side::Left => cmp != Ordering::Less,
                        Side::Right => cmp != Ordering::Greater,
                    };
                    if qualifies {
                        // whole duplicate group qualifies; pick its
                        // oldest member for `_ge`, newest for `_le`.
                        return Some(match rewind_side {
                            Side::Left => descend_leftmost(Slot::Entry(node, Side::Left)),
                            Side::Right => descend_rightmost(Slot::Entry(node, Side::Right)),
                        });
                    }
                    return rewind(last_turn, rewind_side);
                }
                let side = key.test_bit(node_ref.bit);
                if side == turn_side {
                    last_turn = Some(node);
                }
                slot = Slot::Entry(node, side);
            }
        }
    }
}

/// After a descent bottomed out below `key` (spec §4.6 step 2b): the
/// answer is the boundary crossing at the last remembered turn, or `None`
/// if descent never turned that way.
unsafe fn rewind<K, S: LinkStorage>(
    last_turn: Option<NonNull<Entry<K, S>>>,
    rewind_side: Side,
) -> Option<NonNull<Entry<K, S>>> {
    let node = last_turn?;
    let other = rewind_side.opposite();
    Some(match other {
        Side::Left => descend_leftmost(Slot::Entry(node, other)),
        Side::Right => descend_rightmost(Slot::Entry(node, other)),
    })
}
