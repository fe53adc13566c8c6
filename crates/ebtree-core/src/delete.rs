//! O(1) deletion via node-role transplantation (spec §4.4, §9).
//!
//! Removing a pure leaf (no node role) only ever touches its immediate
//! parent and sibling: the parent's node role is dissolved and the
//! sibling is promoted into the parent's old slot. Removing an entry that
//! *also* holds the node role additionally needs some other entry to take
//! over that role's two children — reusing a node-internal entry instead
//! of requiring a fresh allocation is the whole point of the dual-role
//! design (spec §9). The entry reused is always the one found by
//! resolving the *deleted* entry's own `leaf_p`: tracing how `leaf_p` gets
//! handed off across grafts (see [`crate::descent::graft`]) shows it
//! always remains inside the deleted entry's own subtree, so reusing it
//! preserves ordering. No descent is needed to find it — `leaf_p` already
//! names it directly, which is what keeps this O(1) regardless of depth.

use crate::descent::slot_from_parent;
use crate::entry::{Entry, Root};
use crate::link::{BranchTag, ParentKind, Side};
use crate::storage::LinkStorage;
use std::ptr::NonNull;

/// Unlink `target` from `root`.
///
/// # Safety
/// `target` must currently be linked into `root` (`target.is_linked()`).
pub unsafe fn delete<K, S: LinkStorage>(root: &mut Root<S>, target: NonNull<Entry<K, S>>) {
    let target_ref = target.as_ref();
    debug_assert!(target_ref.is_linked(), "deleting an entry not linked into any tree");

    if target_ref.leaf_p.kind() == ParentKind::Root {
        // Sole entry in the tree (spec S5 first-leaf special case).
        root.left.clear();
        (*target.as_ptr()).leaf_p.clear();
        return;
    }

    let leaf_side = match target_ref.leaf_p.kind() {
        ParentKind::Side(s) => s,
        ParentKind::Root => unreachable!(),
    };
    let w_addr = target_ref.leaf_p.addr(Entry::leaf_p_addr(target));
    let w: NonNull<Entry<K, S>> = NonNull::new_unchecked(w_addr as *mut Entry<K, S>);

    let sibling_side = leaf_side.opposite();
    let sibling_link = w.as_ref().branches[sibling_side.idx()];
    let sibling_addr = sibling_link.addr(Entry::branch_addr(w, sibling_side));
    let sibling_tag = sibling_link.tag();

    let w_node_p = w.as_ref().node_p;
    let gp_kind = w_node_p.kind();
    let gp_addr = w_node_p.addr(Entry::node_p_addr(w));

    // Dissolve w: its former parent slot now holds its sibling directly.
    slot_from_parent::<K, S>(gp_kind, gp_addr).write(sibling_addr, sibling_tag);
    let sibling_entry: NonNull<Entry<K, S>> = NonNull::new_unchecked(sibling_addr as *mut Entry<K, S>);
    match sibling_tag {
        BranchTag::Leaf => (*sibling_entry.as_ptr()).leaf_p.set(
            gp_addr,
            Entry::leaf_p_addr(sibling_entry),
            gp_kind,
        ),
        BranchTag::Node => (*sibling_entry.as_ptr()).node_p.set(
            gp_addr,
            Entry::node_p_addr(sibling_entry),
            gp_kind,
        ),
    }
    (*w.as_ptr()).node_p.clear();

    if w_addr != Entry::addr(target) && target.as_ref().has_node_role() {
        transplant_node_role(target, w);
    }

    (*target.as_ptr()).leaf_p.clear();
    (*target.as_ptr()).node_p.clear();
}

/// `target` holds the node role and its dual-role leaf (`w`) has just been
/// extracted from its old position; move `target`'s node role — its
/// split bit, both children, and its own parent link — onto `w`'s
/// storage, so `w` now occupies exactly the position `target` used to.
unsafe fn transplant_node_role<K, S: LinkStorage>(target: NonNull<Entry<K, S>>, w: NonNull<Entry<K, S>>) {
    let bit = target.as_ref().bit;
    let mut children = [(0usize, BranchTag::Leaf); 2];
    for side in [Side::Left, Side::Right] {
        let link = target.as_ref().branches[side.idx()];
        let addr = link.addr(Entry::branch_addr(target, side));
        children[side.idx()] = (addr, link.tag());
    }
    let old_node_p = target.as_ref().node_p;
    let parent_kind = old_node_p.kind();
    let parent_addr = old_node_p.addr(Entry::node_p_addr(target));

    (*w.as_ptr()).bit = bit;
    for side in [Side::Left, Side::Right] {
        let (child_addr, child_tag) = children[side.idx()];
        (*w.as_ptr()).branches[side.idx()].set(child_addr, Entry::branch_addr(w, side), child_tag);

        let child_entry: NonNull<Entry<K, S>> = NonNull::new_unchecked(child_addr as *mut Entry<K, S>);
        match child_tag {
            BranchTag::Leaf => (*child_entry.as_ptr()).leaf_p.set(
                Entry::addr(w),
                Entry::leaf_p_addr(child_entry),
                ParentKind::Side(side),
            ),
            BranchTag::Node => (*child_entry.as_ptr()).node_p.set(
                Entry::addr(w),
                Entry::node_p_addr(child_entry),
                ParentKind::Side(side),
            ),
        }
    }
    (*w.as_ptr())
        .node_p
        .set(parent_addr, Entry::node_p_addr(w), parent_kind);
    slot_from_parent::<K, S>(parent_kind, parent_addr).write(Entry::addr(w), BranchTag::Node);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insert::{insert, InsertOutcome};
    use crate::storage::Absolute;

    fn boxed(key: u32) -> NonNull<Entry<u32, Absolute>> {
        let b = Box::new(Entry::new(key));
        NonNull::new(Box::into_raw(b)).unwrap()
    }

    unsafe fn free(e: NonNull<Entry<u32, Absolute>>) {
        drop(Box::from_raw(e.as_ptr()));
    }

    unsafe fn collect_inorder(root: &Root<Absolute>) -> Vec<u32> {
        let mut out = Vec::new();
        if root.is_empty() {
            return out;
        }
        unsafe fn walk(slot: crate::descent::Slot<u32, Absolute>, out: &mut Vec<u32>) {
            let link = slot.read();
            let addr = link.addr(slot.link_addr());
            match link.tag() {
                BranchTag::Leaf => out.push((*(addr as *const Entry<u32, Absolute>)).key),
                BranchTag::Node => {
                    let node = NonNull::new_unchecked(addr as *mut Entry<u32, Absolute>);
                    walk(crate::descent::Slot::Entry(node, Side::Left), out);
                    walk(crate::descent::Slot::Entry(node, Side::Right), out);
                }
            }
        }
        walk(crate::descent::Slot::Root(NonNull::from(root)), &mut out);
        out
    }

    #[test]
    fn delete_only_entry_empties_tree() {
        let mut root = Root::<Absolute>::new();
        let e = boxed(1);
        unsafe {
            insert(&mut root, e);
            delete(&mut root, e);
            assert!(root.is_empty());
            free(e);
        }
    }

    #[test]
    fn delete_self_dual_leaf_promotes_sibling() {
        let mut root = Root::<Absolute>::new();
        let a = boxed(1);
        let b = boxed(2);
        unsafe {
            insert(&mut root, a); // sole leaf
            insert(&mut root, b); // b becomes the node, self-dual on one side
            delete(&mut root, a);
            assert_eq!(collect_inorder(&root), vec![2]);
            free(a);
            delete(&mut root, b);
            assert!(root.is_empty());
            free(b);
        }
    }

    #[test]
    fn delete_middle_entry_in_larger_tree_preserves_order() {
        let mut root = Root::<Absolute>::new();
        let keys = [5u32, 1, 9, 3, 7, 2, 8, 4, 6, 0];
        let mut entries = Vec::new();
        unsafe {
            for &k in &keys {
                let e = boxed(k);
                insert(&mut root, e);
                entries.push(e);
            }
            // delete a handful of interior keys, including ones likely to
            // have stolen another entry's dual-role leaf slot by now
            for &doomed in &[5u32, 9, 2] {
                let e = *entries.iter().find(|e| e.as_ref().key == doomed).unwrap();
                delete(&mut root, e);
                free(e);
            }
            let mut remaining: Vec<u32> = keys.iter().copied().filter(|k| ![5, 9, 2].contains(k)).collect();
            remaining.sort();
            assert_eq!(collect_inorder(&root), remaining);
            for &k in &remaining {
                let e = *entries.iter().find(|e| e.as_ref().key == k).unwrap();
                delete(&mut root, e);
                free(e);
            }
            assert!(root.is_empty());
        }
    }

    #[test]
    fn delete_duplicate_preserves_remaining_order() {
        let mut root = Root::<Absolute>::new();
        let a = boxed(4);
        let b = boxed(4);
        let c = boxed(4);
        unsafe {
            insert(&mut root, a);
            insert(&mut root, b);
            insert(&mut root, c);
            delete(&mut root, b);
            assert_eq!(collect_inorder(&root), vec![4, 4]);
            free(b);
            delete(&mut root, a);
            free(a);
            delete(&mut root, c);
            free(c);
            assert!(root.is_empty());
        }
    }

    #[test]
    fn unique_collision_entry_is_untouched_by_caller() {
        let mut root = Root::<Absolute>::new_unique();
        let a = boxed(10);
        let b = boxed(10);
        unsafe {
            insert(&mut root, a);
            match insert(&mut root, b) {
                InsertOutcome::AlreadyExists(_) => {}
                InsertOutcome::Inserted => panic!("expected collision"),
            }
            delete(&mut root, a);
            free(a);
            free(b);
        }
    }
}
