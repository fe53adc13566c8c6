//! `Tree`: the public, storage-generic handle wrapping a [`Root`] (spec §6
//! external interface, generalized to one type for all integer/byte-string
//! instantiations built on top of this crate).

use crate::delete::delete as delete_impl;
use crate::entry::{Entry, Root};
use crate::insert::{insert as insert_impl, InsertOutcome};
use crate::key::Key;
use crate::nav;
use crate::range;
use crate::storage::LinkStorage;
use std::ptr::NonNull;

/// An elastic binary tree over caller-owned `Entry<K, S>` storage.
///
/// The tree never allocates, frees, or otherwise owns entries (spec §5):
/// every method takes or returns a `NonNull<Entry<K, S>>` pointing at
/// storage the caller keeps alive for as long as the entry stays linked.
/// All methods are `unsafe` for that reason — see each method's safety
/// section.
#[derive(Debug)]
pub struct Tree<K, S: LinkStorage> {
    root: Root<S>,
    _marker: std::marker::PhantomData<K>,
}

impl<K, S: LinkStorage> Tree<K, S> {
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    pub fn allows_duplicates(&self) -> bool {
        !self.root.unique
    }

    pub fn root(&self) -> &Root<S> {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Root<S> {
        &mut self.root
    }
}

impl<K: Key, S: LinkStorage> Tree<K, S> {
    /// # Safety
    /// `entry` must not already be linked into any tree, and must
    /// outlive its membership in this one.
    pub unsafe fn insert(&mut self, entry: NonNull<Entry<K, S>>) -> InsertOutcome<K, S> {
        insert_impl(&mut self.root, entry)
    }

    /// # Safety
    /// `entry` must currently be linked into this tree.
    pub unsafe fn delete(&mut self, entry: NonNull<Entry<K, S>>) {
        delete_impl(&mut self.root, entry)
    }

    pub unsafe fn lookup(&self, key: &K) -> Option<NonNull<Entry<K, S>>> {
        range::lookup(&self.root, key)
    }

    pub unsafe fn lookup_ge(&self, key: &K) -> Option<NonNull<Entry<K, S>>> {
        range::lookup_ge(&self.root, key)
    }

    pub unsafe fn lookup_le(&self, key: &K) -> Option<NonNull<Entry<K, S>>> {
        range::lookup_le(&self.root, key)
    }

    pub unsafe fn first(&self) -> Option<NonNull<Entry<K, S>>> {
        nav::first(&self.root)
    }

    pub unsafe fn last(&self) -> Option<NonNull<Entry<K, S>>> {
        nav::last(&self.root)
    }
}

/// Navigation from an entry doesn't need the tree handle (an entry's own
/// links are enough), but is re-exported here under the same module for
/// discoverability.
pub unsafe fn next<K, S: LinkStorage>(e: NonNull<Entry<K, S>>) -> Option<NonNull<Entry<K, S>>> {
    nav::next(e)
}

pub unsafe fn prev<K, S: LinkStorage>(e: NonNull<Entry<K, S>>) -> Option<NonNull<Entry<K, S>>> {
    nav::prev(e)
}

pub unsafe fn next_dup<K: Key, S: LinkStorage>(e: NonNull<Entry<K, S>>) -> Option<NonNull<Entry<K, S>>> {
    nav::next_dup(e)
}

pub unsafe fn prev_dup<K: Key, S: LinkStorage>(e: NonNull<Entry<K, S>>) -> Option<NonNull<Entry<K, S>>> {
    nav::prev_dup(e)
}

pub unsafe fn next_unique<K: Key, S: LinkStorage>(e: NonNull<Entry<K, S>>) -> Option<NonNull<Entry<K, S>>> {
    nav::next_unique(e)
}

pub unsafe fn prev_unique<K: Key, S: LinkStorage>(e: NonNull<Entry<K, S>>) -> Option<NonNull<Entry<K, S>>> {
    nav::prev_unique(e)
}

macro_rules! impl_concrete_constructors {
    ($storage:ty) => {
        impl<K> Tree<K, $storage> {
            pub const fn new() -> Self {
                Tree {
                    root: Root::<$storage>::new(),
                    _marker: std::marker::PhantomData,
                }
            }

            pub const fn new_unique() -> Self {
                Tree {
                    root: Root::<$storage>::new_unique(),
                    _marker: std::marker::PhantomData,
                }
            }
        }
    };
}

impl_concrete_constructors!(crate::storage::Absolute);
impl_concrete_constructors!(crate::storage::Relative);
