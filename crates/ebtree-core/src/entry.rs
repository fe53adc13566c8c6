//! The dual-role entry and the tree root (spec §3).

use crate::link::{BranchTag, Link, ParentKind, ParentLink, Side};
use crate::storage::LinkStorage;
use std::ptr::NonNull;

/// A single intrusive tree entry, simultaneously a leaf (the terminal
/// holding `key`) and, when `node_p` is non-null, an internal branching
/// point (spec §3, §9 "Dual-role entry"). Both roles' fields are always
/// present; "role unused" is spelled with a null link, never a second type
/// — the deletion algorithm depends on being able to transplant a freed
/// entry's node role into another entry's storage (spec §4.4, §9).
///
/// Field order matters: `branches` is placed last so that `branches[0]`'s
/// own storage address can never equal `self`'s address, which guarantees
/// the "first leaf" self-loop (spec §3 invariant 7, §4.3 step 1) never
/// collides with the `Relative` storage's null-displacement sentinel (see
/// [`crate::storage::Relative`]).
///
/// The tree never owns or allocates an `Entry` (spec §3 Lifecycle, §5
/// Shared-resource policy): callers hold their own storage and pass
/// `NonNull<Entry<K, S>>` in; the tree only ever mutates link fields.
#[repr(C)]
#[derive(Debug)]
pub struct Entry<K, S: LinkStorage> {
    /// Split-bit index when serving the node role. Non-negative for a
    /// regular internal node; negative (starting at -1, strictly
    /// decreasing with depth) inside a duplicate subtree (spec §3
    /// invariant 5). Meaningless while `node_p` is null.
    pub bit: i32,
    pub key: K,
    /// Parent link for the node role. Null iff this entry is not currently
    /// serving as an internal branching point.
    pub node_p: ParentLink<S>,
    /// Parent link for the leaf role. Null iff this entry is detached.
    pub leaf_p: ParentLink<S>,
    /// The two child branches, populated only while `node_p` is non-null.
    pub branches: [Link<S>; 2],
}

impl<K, S: LinkStorage> Entry<K, S> {
    pub fn new(key: K) -> Self {
        Entry {
            bit: 0,
            key,
            node_p: ParentLink::null(),
            leaf_p: ParentLink::null(),
            branches: [Link::null(), Link::null()],
        }
    }

    /// Whether this entry is currently linked into some tree.
    #[inline]
    pub fn is_linked(&self) -> bool {
        !self.leaf_p.is_null()
    }

    /// Whether this entry is serving the node role anywhere.
    #[inline]
    pub fn has_node_role(&self) -> bool {
        !self.node_p.is_null()
    }

    /// Whether this entry is the top of a duplicate subtree.
    #[inline]
    pub fn is_dup_root(&self) -> bool {
        self.has_node_role() && self.bit < 0
    }

    #[inline]
    pub(crate) fn addr(this: NonNull<Self>) -> usize {
        this.as_ptr() as usize
    }

    #[inline]
    pub(crate) fn branch_addr(this: NonNull<Self>, side: Side) -> usize {
        unsafe { std::ptr::addr_of!((*this.as_ptr()).branches[side.idx()]) as usize }
    }

    #[inline]
    pub(crate) fn node_p_addr(this: NonNull<Self>) -> usize {
        unsafe { std::ptr::addr_of!((*this.as_ptr()).node_p) as usize }
    }

    #[inline]
    pub(crate) fn leaf_p_addr(this: NonNull<Self>) -> usize {
        unsafe { std::ptr::addr_of!((*this.as_ptr()).leaf_p) as usize }
    }
}

/// A tree's two root branches (spec §3 "Entity: Tree root").
///
/// `left` is the whole tree; an empty tree is exactly `left.is_null()`.
/// The C source packs the unique-vs-duplicate policy into the root's
/// (otherwise always-null) right branch as a space optimization; in a
/// typed Rust struct there is no packing to be gained, so we spell the
/// same invariant as a plain field instead (documented as a deliberate
/// divergence in DESIGN.md).
#[derive(Debug)]
pub struct Root<S: LinkStorage> {
    pub left: Link<S>,
    pub unique: bool,
}

impl<S: LinkStorage> Default for Root<S> {
    fn default() -> Self {
        Root {
            left: Link::null(),
            unique: false,
        }
    }
}

impl<S: LinkStorage> Root<S> {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.left.is_null()
    }

    #[inline]
    pub(crate) fn left_addr(&self) -> usize {
        std::ptr::addr_of!(self.left) as usize
    }

    #[inline]
    pub(crate) fn addr(&self) -> usize {
        self as *const Self as usize
    }
}

// Concrete, monomorphic `const fn` constructors give each storage mode a
// compile-time-constant empty root (spec §6: "Constant-initialized form
// must be available"). A single generic `const fn` over `S: LinkStorage`
// isn't possible on stable Rust (trait methods aren't `const`), so we
// provide one inherent impl per concrete storage type instead — exactly
// mirroring how the C source's `EB_ROOT`/`EB_ROOT_UNIQUE` are literal
// initializers for one concrete representation, not a generic template.
impl Root<crate::storage::Absolute> {
    pub const fn new() -> Self {
        Root {
            left: Link::from_parts(crate::storage::Absolute::zero(), BranchTag::Leaf),
            unique: false,
        }
    }

    pub const fn new_unique() -> Self {
        Root {
            left: Link::from_parts(crate::storage::Absolute::zero(), BranchTag::Leaf),
            unique: true,
        }
    }
}

impl Root<crate::storage::Relative> {
    pub const fn new() -> Self {
        Root {
            left: Link::from_parts(crate::storage::Relative::zero(), BranchTag::Leaf),
            unique: false,
        }
    }

    pub const fn new_unique() -> Self {
        Root {
            left: Link::from_parts(crate::storage::Relative::zero(), BranchTag::Leaf),
            unique: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Absolute;

    #[test]
    fn empty_root_is_empty() {
        let r = Root::<Absolute>::new();
        assert!(r.is_empty());
        assert!(!r.unique);
    }

    #[test]
    fn branches_field_never_aliases_entry_base_address() {
        let e: Entry<u32, Absolute> = Entry::new(0);
        let base = &e as *const _ as usize;
        let b0 = &e.branches[0] as *const _ as usize;
        assert_ne!(base, b0);
    }
}
