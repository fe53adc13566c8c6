//! The shared descent engine (spec §4.2).
//!
//! Every entry already carries its own split bit (`Entry::bit`), so rather
//! than the inter-branch-XOR bookkeeping spec §4.2 describes literally,
//! descent here uses the equivalent and simpler standard crit-bit-tree
//! form: test the query key's bit at each node's stored `bit` position and
//! follow `Side::from_bit`, stopping as soon as a `BranchTag::Leaf` branch
//! is reached. Both forms implement the same invariant (spec §8: "highest
//! set bit of the sibling XOR equals the node's `bit`"), and this crate's
//! test suite exercises every testable property spec §8 lists regardless
//! of which form produced the answer — see DESIGN.md for the full
//! rationale.
//!
//! This file holds the handful of primitives every other module
//! (insert/delete/nav/range) builds on, so the generic descent loop is
//! written exactly once (spec §9, open question 1).

use crate::entry::{Entry, Root};
use crate::key::Key;
use crate::link::{BranchTag, ParentKind, Side};
use crate::storage::LinkStorage;
use std::ptr::NonNull;

/// Where a child slot physically lives: either the root's `left` branch, or
/// one side of some ancestor entry. Used to rewrite a branch in place
/// without caring which case it is.
#[derive(Copy, Clone)]
pub(crate) enum Slot<K, S: LinkStorage> {
    Root(NonNull<Root<S>>),
    Entry(NonNull<Entry<K, S>>, Side),
}

impl<K, S: LinkStorage> Slot<K, S> {
    #[inline]
    pub(crate) unsafe fn link_addr(&self) -> usize {
        match *self {
            Slot::Root(root) => (*root.as_ptr()).left_addr(),
            Slot::Entry(e, side) => Entry::branch_addr(e, side),
        }
    }

    #[inline]
    pub(crate) unsafe fn read(&self) -> crate::link::Link<S> {
        match *self {
            Slot::Root(root) => (*root.as_ptr()).left,
            Slot::Entry(e, side) => (*e.as_ptr()).branches[side.idx()],
        }
    }

    #[inline]
    pub(crate) unsafe fn write(&self, target_addr: usize, tag: BranchTag) {
        let addr = self.link_addr();
        match *self {
            Slot::Root(root) => (*root.as_ptr()).left.set(target_addr, addr, tag),
            Slot::Entry(e, side) => (*e.as_ptr()).branches[side.idx()].set(target_addr, addr, tag),
        }
    }

    /// The `ParentKind`/container-address pair a child of this slot should
    /// record as *its* parent link.
    #[inline]
    pub(crate) fn parent_kind_and_addr(&self) -> (ParentKind, usize) {
        match *self {
            Slot::Root(root) => (ParentKind::Root, root.as_ptr() as usize),
            Slot::Entry(e, side) => (ParentKind::Side(side), Entry::addr(e)),
        }
    }
}

/// Resolve a `(ParentKind, container_addr)` pair back into a [`Slot`].
#[inline]
pub(crate) unsafe fn slot_from_parent<K, S: LinkStorage>(
    kind: ParentKind,
    container_addr: usize,
) -> Slot<K, S> {
    match kind {
        ParentKind::Root => Slot::Root(NonNull::new_unchecked(container_addr as *mut Root<S>)),
        ParentKind::Side(side) => {
            Slot::Entry(NonNull::new_unchecked(container_addr as *mut Entry<K, S>), side)
        }
    }
}

/// Follow `side` from `slot`, over and over, until landing on a
/// `BranchTag::Leaf` branch; returns that branch's slot (not the resolved
/// entry), so the caller can still rewrite it. `slot` must not be null.
///
/// This single loop serves both tree-wide `first`/`last` (called with
/// `Side::Left`/`Side::Right` from the root) and duplicate-subtree descent
/// (called with `Side::Right` from a dup-subtree root to find where the
/// next arrival should graft, spec §4.3 step 2c): a duplicate subtree's
/// internal chain only ever grows to the right, so "keep going right until
/// a leaf" is exactly "find the newest entry in the group" in both guises.
pub(crate) unsafe fn descend_side_slot<K, S: LinkStorage>(
    mut slot: Slot<K, S>,
    side: Side,
) -> Slot<K, S> {
    loop {
        let link = slot.read();
        if link.tag() == BranchTag::Leaf {
            return slot;
        }
        let addr = link.addr(slot.link_addr());
        slot = Slot::Entry(NonNull::new_unchecked(addr as *mut Entry<K, S>), side);
    }
}

/// Descend from `slot`, always taking the left branch, to the leftmost leaf
/// (spec §4.5 `first`). `slot` must not be null.
pub(crate) unsafe fn descend_leftmost<K, S: LinkStorage>(
    slot: Slot<K, S>,
) -> NonNull<Entry<K, S>> {
    resolve(descend_side_slot(slot, Side::Left))
}

/// Symmetric to [`descend_leftmost`], always taking the right branch.
pub(crate) unsafe fn descend_rightmost<K, S: LinkStorage>(
    slot: Slot<K, S>,
) -> NonNull<Entry<K, S>> {
    resolve(descend_side_slot(slot, Side::Right))
}

/// Read a slot known to hold a leaf-tagged branch and return that leaf.
#[inline]
pub(crate) unsafe fn resolve<K, S: LinkStorage>(slot: Slot<K, S>) -> NonNull<Entry<K, S>> {
    let link = slot.read();
    debug_assert_eq!(link.tag(), BranchTag::Leaf);
    let addr = link.addr(slot.link_addr());
    NonNull::new_unchecked(addr as *mut Entry<K, S>)
}

/// Outcome of descending toward where `key` would live.
pub(crate) enum Candidate<K, S: LinkStorage> {
    /// Reached an ordinary leaf.
    Leaf(NonNull<Entry<K, S>>),
    /// Reached the top of a duplicate subtree (spec §4.3 step 2c):
    /// `node.bit < 0`. `node.key` may or may not equal the query key —
    /// the caller must still compare.
    DupRoot(NonNull<Entry<K, S>>),
}

impl<K, S: LinkStorage> Candidate<K, S> {
    pub(crate) fn entry(&self) -> NonNull<Entry<K, S>> {
        match *self {
            Candidate::Leaf(e) => e,
            Candidate::DupRoot(e) => e,
        }
    }
}

/// Descend from the root toward `key`, stopping at a leaf or at the top of
/// a duplicate subtree. Used by both lookup (exact match only needs the
/// stop point) and insert (phase 1: find *some* entry to compute a real
/// split bit against). The tree must be non-empty.
pub(crate) unsafe fn find_candidate<K: Key, S: LinkStorage>(
    root: &Root<S>,
    key: &K,
) -> Candidate<K, S> {
    let mut slot: Slot<K, S> = Slot::Root(NonNull::from(root));
    loop {
        let link = slot.read();
        let addr = link.addr(slot.link_addr());
        match link.tag() {
            BranchTag::Leaf => return Candidate::Leaf(NonNull::new_unchecked(addr as *mut Entry<K, S>)),
            BranchTag::Node => {
                let node = NonNull::new_unchecked(addr as *mut Entry<K, S>);
                let node_ref = node.as_ref();
                if node_ref.bit < 0 {
                    return Candidate::DupRoot(node);
                }
                let side = key.test_bit(node_ref.bit);
                slot = Slot::Entry(node, side);
            }
        }
    }
}

/// Second descent (insert's phase 2, and deletion's sibling-reparent common
/// path): walk from the root guided by each node's stored `bit`, stopping
/// at the slot where a node whose `bit` is not strictly greater than
/// `diff` would be descended into — i.e. the graft point for a new split
/// at bit `diff`. Also stops at any leaf or duplicate-subtree top, since
/// both have no `bit` to compare against and are valid graft targets.
pub(crate) unsafe fn find_graft_point<K: Key, S: LinkStorage>(
    root: &mut Root<S>,
    key: &K,
    diff: i32,
) -> Slot<K, S> {
    let mut slot: Slot<K, S> = Slot::Root(NonNull::from(&mut *root));
    loop {
        let link = slot.read();
        if link.tag() == BranchTag::Leaf {
            return slot;
        }
        let addr = link.addr(slot.link_addr());
        let node = NonNull::new_unchecked(addr as *mut Entry<K, S>);
        let node_ref = node.as_ref();
        if node_ref.bit < 0 || node_ref.bit < diff {
            return slot;
        }
        let side = key.test_bit(node_ref.bit);
        slot = Slot::Entry(node, side);
    }
}

/// Splice `new` into the tree at `slot`, taking over the node role that
/// `slot` currently resolves to (spec §4.3 "graft"), with `new` itself
/// also serving as the leaf at `new_side` (the dual-role trick, spec §9).
///
/// Used identically by: an ordinary split (`new_bit` = the computed
/// differing bit, `new_side` = the query key's bit there), creating a
/// fresh duplicate subtree from a previously-plain leaf (`new_bit = -1`,
/// `new_side = Side::Right`), and appending to an existing duplicate
/// subtree (`new_bit` = one less than the subtree's current deepest bit,
/// `new_side = Side::Right`) — in every case, "one side keeps what was
/// already there, the other side is the new arrival" is the whole
/// operation.
///
/// # Safety
/// `slot` must currently resolve to a live branch (leaf or node), and
/// `new` must not already be linked into any tree.
pub(crate) unsafe fn graft<K, S: LinkStorage>(
    slot: Slot<K, S>,
    new: NonNull<Entry<K, S>>,
    new_bit: i32,
    new_side: Side,
) {
    let old_link = slot.read();
    let old_addr = old_link.addr(slot.link_addr());
    let old_tag = old_link.tag();
    let old_side = new_side.opposite();
    let (parent_kind, parent_addr) = slot.parent_kind_and_addr();

    let new_addr = Entry::addr(new);
    let new_ptr = new.as_ptr();
    (*new_ptr).bit = new_bit;
    (*new_ptr).branches[old_side.idx()].set(old_addr, Entry::branch_addr(new, old_side), old_tag);
    (*new_ptr).branches[new_side.idx()].set(
        new_addr,
        Entry::branch_addr(new, new_side),
        BranchTag::Leaf,
    );
    (*new_ptr)
        .node_p
        .set(parent_addr, Entry::node_p_addr(new), parent_kind);
    (*new_ptr)
        .leaf_p
        .set(new_addr, Entry::leaf_p_addr(new), ParentKind::Side(new_side));

    let old_entry = NonNull::new_unchecked(old_addr as *mut Entry<K, S>);
    match old_tag {
        BranchTag::Leaf => (*old_entry.as_ptr()).leaf_p.set(
            new_addr,
            Entry::leaf_p_addr(old_entry),
            ParentKind::Side(old_side),
        ),
        BranchTag::Node => (*old_entry.as_ptr()).node_p.set(
            new_addr,
            Entry::node_p_addr(old_entry),
            ParentKind::Side(old_side),
        ),
    }

    slot.write(new_addr, BranchTag::Node);
}
