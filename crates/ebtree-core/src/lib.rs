//! The generic descent/insert/delete/navigation engine shared by the
//! integer-, byte-string-, and address-keyed trees built on top of it.
//!
//! Every public type here is generic over two axes: the key domain
//! ([`key::Key`]) and the physical link encoding ([`storage::LinkStorage`]).
//! The algorithms in [`descent`], [`insert`], [`delete`], [`nav`], and
//! [`range`] are written once against those two traits; concrete crates
//! (`ebtree`, `cbtree`) only ever supply a `Key` impl and pick a storage
//! mode.
//!
//! This crate does no I/O, performs no allocation, and starts no threads
//! or timers: every entry's storage is owned by the caller, and every
//! operation is a bounded number of pointer-sized reads and writes.

mod bits;
mod descent;
mod link;
mod storage;

pub mod delete;
pub mod entry;
pub mod insert;
pub mod key;
pub mod nav;
pub mod range;
pub mod tree;

pub use entry::{Entry, Root};
pub use insert::InsertOutcome;
pub use key::{ByteStringKey, Key};
pub use link::{BranchTag, ParentKind, Side};
pub use storage::{Absolute, LinkStorage, Relative};
pub use tree::{next, next_dup, next_unique, prev, prev_dup, prev_unique, Tree};
