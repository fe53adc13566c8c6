//! Insertion, including duplicate-subtree creation and growth (spec §4.3).

use crate::descent::{descend_side_slot, find_candidate, find_graft_point, graft, slot_from_parent, Candidate, Slot};
use crate::entry::{Entry, Root};
use crate::key::Key;
use crate::link::{BranchTag, ParentKind, Side};
use crate::storage::LinkStorage;
use std::cmp::Ordering;
use std::ptr::NonNull;

/// Result of attempting to insert `new`.
pub enum InsertOutcome<K, S: LinkStorage> {
    /// `new` is now linked into the tree.
    Inserted,
    /// The tree enforces unique keys and already holds an entry comparing
    /// equal to `new`'s key (spec §4.3 step 2a / S2). `new` was left
    /// untouched; the existing entry is returned so the caller can inspect
    /// or replace it.
    AlreadyExists(NonNull<Entry<K, S>>),
}

/// Link `new` into `root`.
///
/// # Safety
/// `new` must not currently be linked into any tree (callers are
/// responsible for this; see spec §5 "Undefined behavior on misuse").
/// `new.key` must already hold the value to insert (set by
/// [`Entry::new`]).
pub unsafe fn insert<K: Key, S: LinkStorage>(
    root: &mut Root<S>,
    new: NonNull<Entry<K, S>>,
) -> InsertOutcome<K, S> {
    let new_key = new.as_ref().key;

    if root.is_empty() {
        attach_sole_entry(root, new);
        return InsertOutcome::Inserted;
    }

    match find_candidate(root, &new_key) {
        Candidate::Leaf(cand) => match new_key.key_cmp(&cand.as_ref().key) {
            Ordering::Equal => {
                if root.unique {
                    return InsertOutcome::AlreadyExists(cand);
                }
                graft_new_dup_group(new, cand);
                InsertOutcome::Inserted
            }
            _ => {
                graft_ordinary_split(root, new, &new_key, cand.as_ref().key);
                InsertOutcome::Inserted
            }
        },
        Candidate::DupRoot(cand) => match new_key.key_cmp(&cand.as_ref().key) {
            Ordering::Equal => {
                if root.unique {
                    return InsertOutcome::AlreadyExists(cand);
                }
                graft_append_to_dup_group(new, cand);
                InsertOutcome::Inserted
            }
            _ => {
                graft_ordinary_split(root, new, &new_key, cand.as_ref().key);
                InsertOutcome::Inserted
            }
        },
    }
}

/// First-ever insertion: `new` becomes the whole tree, holding only the
/// leaf role (spec §3 invariant 4's "first leaf" case). No node role, no
/// dual-role self-reference — those only arise once a second entry forces
/// a split.
unsafe fn attach_sole_entry<K, S: LinkStorage>(root: &mut Root<S>, new: NonNull<Entry<K, S>>) {
    let addr = Entry::addr(new);
    (*new.as_ptr())
        .leaf_p
        .set(root.addr(), Entry::leaf_p_addr(new), ParentKind::Root);
    root.left.set(addr, root.left_addr(), BranchTag::Leaf);
}

unsafe fn graft_ordinary_split<K: Key, S: LinkStorage>(
    root: &mut Root<S>,
    new: NonNull<Entry<K, S>>,
    new_key: &K,
    cand_key: K,
) {
    let diff = new_key.diff_bit(&cand_key);
    let slot: Slot<K, S> = find_graft_point(root, new_key, diff);
    let new_side = new_key.test_bit(diff);
    graft(slot, new, diff, new_side);
}

/// `cand` is a plain leaf (no node role) whose key equals `new`'s: start a
/// one-deep duplicate subtree, oldest (`cand`) on the left, `new` on the
/// right (spec §4.3 step 2c, "oldest is leftmost").
unsafe fn graft_new_dup_group<K, S: LinkStorage>(new: NonNull<Entry<K, S>>, cand: NonNull<Entry<K, S>>) {
    let cand_ref = cand.as_ref();
    let kind = cand_ref.leaf_p.kind();
    let parent_addr = cand_ref.leaf_p.addr(Entry::leaf_p_addr(cand));
    let slot: Slot<K, S> = slot_from_parent(kind, parent_addr);
    graft(slot, new, -1, Side::Right);
}

/// `cand` is the root of an existing duplicate subtree (`bit < 0`) equal
/// to `new`'s key: descend the subtree's always-right chain to its
/// current newest member and append `new` past it.
unsafe fn graft_append_to_dup_group<K, S: LinkStorage>(
    new: NonNull<Entry<K, S>>,
    cand: NonNull<Entry<K, S>>,
) {
    let dup_slot: Slot<K, S> = descend_side_slot(Slot::Entry(cand, Side::Right), Side::Right);
    let parent_bit = match dup_slot {
        Slot::Entry(parent, _) => parent.as_ref().bit,
        Slot::Root(_) => unreachable!("a duplicate subtree is never the tree root itself"),
    };
    graft(dup_slot, new, parent_bit - 1, Side::Right);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Absolute;

    fn boxed(key: u32) -> NonNull<Entry<u32, Absolute>> {
        let b = Box::new(Entry::new(key));
        NonNull::new(Box::into_raw(b)).unwrap()
    }

    unsafe fn collect_inorder(root: &Root<Absolute>) -> Vec<u32> {
        let mut out = Vec::new();
        if root.is_empty() {
            return out;
        }
        unsafe fn walk<S: LinkStorage>(
            slot: Slot<u32, S>,
            out: &mut Vec<u32>,
        ) {
            let link = slot.read();
            let addr = link.addr(slot.link_addr());
            match link.tag() {
                BranchTag::Leaf => out.push((*(addr as *const Entry<u32, S>)).key),
                BranchTag::Node => {
                    let node = NonNull::new_unchecked(addr as *mut Entry<u32, S>);
                    walk(Slot::Entry(node, Side::Left), out);
                    walk(Slot::Entry(node, Side::Right), out);
                }
            }
        }
        walk(Slot::Root(NonNull::from(root)), &mut out);
        out
    }

    #[test]
    fn single_insert_is_reachable() {
        let mut root = Root::<Absolute>::new();
        let e = boxed(42);
        unsafe {
            assert!(matches!(insert(&mut root, e), InsertOutcome::Inserted));
            assert_eq!(collect_inorder(&root), vec![42]);
        }
    }

    #[test]
    fn ordered_insert_produces_ascending_inorder_walk() {
        let mut root = Root::<Absolute>::new();
        let keys = [5u32, 1, 9, 3, 7, 2, 8, 4, 6, 0];
        for &k in &keys {
            let e = boxed(k);
            unsafe {
                insert(&mut root, e);
            }
        }
        let mut sorted = keys.to_vec();
        sorted.sort();
        unsafe {
            assert_eq!(collect_inorder(&root), sorted);
        }
    }

    #[test]
    fn duplicate_keys_keep_insertion_order() {
        let mut root = Root::<Absolute>::new();
        let a = boxed(7);
        let b = boxed(7);
        let c = boxed(7);
        unsafe {
            insert(&mut root, a);
            insert(&mut root, b);
            insert(&mut root, c);
            assert_eq!(collect_inorder(&root), vec![7, 7, 7]);
        }
    }

    #[test]
    fn unique_tree_rejects_collision() {
        let mut root = Root::<Absolute>::new_unique();
        let a = boxed(3);
        let b = boxed(3);
        unsafe {
            assert!(matches!(insert(&mut root, a), InsertOutcome::Inserted));
            match insert(&mut root, b) {
                InsertOutcome::AlreadyExists(existing) => {
                    assert_eq!(existing.as_ref().key, 3);
                }
                InsertOutcome::Inserted => panic!("unique tree accepted a collision"),
            }
        }
    }
}
