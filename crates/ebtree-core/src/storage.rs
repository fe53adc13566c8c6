//! Physical encodings for tagged links (spec "Storage modes").
//!
//! The descent/insert/delete/navigation engine never looks at these types
//! directly — it only ever calls `LinkStorage::encode`/`decode` through
//! [`crate::link::Link`] and [`crate::link::ParentLink`]. That's what lets
//! the same ~1500 lines of algorithm serve both an absolute-pointer tree and
//! a relocatable, relative-offset tree.

use std::fmt::Debug;

/// A physical representation for "the address this link refers to", encoded
/// relative to the address at which the link itself is stored.
///
/// Implementors must treat the all-zero value as "null" and must never
/// produce it for a real target (see [`Absolute`] and [`Relative`] for how
/// each encoding rules that out).
pub trait LinkStorage: Copy + Clone + Eq + Debug + Default {
    fn null() -> Self;
    fn is_null(&self) -> bool;

    /// Decode the absolute address this link points at.
    ///
    /// # Safety
    /// `self_addr` must be the address at which this exact value is stored
    /// (e.g. `&entry.branches[0] as *const _ as usize`), not the address of
    /// the owning entry or any other field.
    unsafe fn decode(self, self_addr: usize) -> usize;

    /// Encode `target_addr` into a value that will be stored at `self_addr`.
    fn encode(target_addr: usize, self_addr: usize) -> Self;
}

/// Stores the target's address directly. Trees using this encoding cannot be
/// relocated (moved to a different base address) without fixing up every
/// link, but decoding is a plain load.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct Absolute(usize);

impl Absolute {
    pub(crate) const fn zero() -> Self {
        Absolute(0)
    }
}

impl LinkStorage for Absolute {
    #[inline]
    fn null() -> Self {
        Absolute(0)
    }

    #[inline]
    fn is_null(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    unsafe fn decode(self, _self_addr: usize) -> usize {
        self.0
    }

    #[inline]
    fn encode(target_addr: usize, _self_addr: usize) -> Self {
        debug_assert_ne!(target_addr, 0, "cannot encode a null target as a live link");
        Absolute(target_addr)
    }
}

/// Stores a signed displacement from the link's own storage address. A tree
/// built entirely out of `Relative` links can be `memcpy`'d to a new base
/// address (or mapped at a different address on a later run) with no
/// fix-up pass, because every displacement stays correct under translation.
///
/// Zero means "null". This can never collide with a real displacement: see
/// [`crate::entry::Entry`]'s field order, which guarantees `branches[0]`'s
/// own storage address never equals the address of the entry that owns it
/// (so a self-loop first-leaf, whose branch targets *its own entry*, still
/// encodes a nonzero displacement).
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct Relative(isize);

impl Relative {
    pub(crate) const fn zero() -> Self {
        Relative(0)
    }
}

impl LinkStorage for Relative {
    #[inline]
    fn null() -> Self {
        Relative(0)
    }

    #[inline]
    fn is_null(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    unsafe fn decode(self, self_addr: usize) -> usize {
        (self_addr as isize + self.0) as usize
    }

    #[inline]
    fn encode(target_addr: usize, self_addr: usize) -> Self {
        let disp = target_addr as isize - self_addr as isize;
        debug_assert_ne!(disp, 0, "relative displacement collides with the null sentinel");
        Relative(disp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_roundtrip() {
        let a = Absolute::encode(0x1000, 0x2000);
        assert!(!a.is_null());
        assert_eq!(unsafe { a.decode(0x2000) }, 0x1000);
    }

    #[test]
    fn relative_roundtrip_is_location_independent() {
        let r = Relative::encode(0x1000, 0x2000);
        assert!(!r.is_null());
        // Same displacement decodes correctly no matter where it is re-read from,
        // as long as self_addr shifts by the same amount as the target did.
        assert_eq!(unsafe { r.decode(0x2000) }, 0x1000);
        assert_eq!(unsafe { r.decode(0x2100) }, 0x1100);
    }

    #[test]
    fn null_is_zero() {
        assert!(Absolute::null().is_null());
        assert!(Relative::null().is_null());
    }
}
