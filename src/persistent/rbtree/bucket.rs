//! The elements stored at one tree node.
//!
//! Every node owns a distinct hash. Unequal elements whose hashes collide
//! share a single node through a collision bucket, so no rotation or
//! predecessor swap can ever separate them. Within a bucket, elements keep
//! their insertion order.

use std::borrow::Borrow;
use std::slice;

use super::super::ReferenceCounter;

/// The elements held by one node, all sharing the node's hash.
pub(super) enum Bucket<T> {
    /// The common case: exactly one element.
    Single(ReferenceCounter<T>),
    /// Two or more unequal elements with the same hash.
    Collision(ReferenceCounter<[ReferenceCounter<T>]>),
}

impl<T> Clone for Bucket<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Single(element) => Self::Single(element.clone()),
            Self::Collision(entries) => Self::Collision(entries.clone()),
        }
    }
}

impl<T> Bucket<T> {
    fn entries(&self) -> &[ReferenceCounter<T>] {
        match self {
            Self::Single(element) => slice::from_ref(element),
            Self::Collision(entries) => entries,
        }
    }

    /// Returns the number of elements in this bucket.
    pub(super) fn len(&self) -> usize {
        self.entries().len()
    }

    /// Iterates the elements in insertion order.
    pub(super) fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries().iter().map(|element| &**element)
    }

    /// Returns the index of the element equal to `element`.
    pub(super) fn position<Q>(&self, element: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.entries()
            .iter()
            .position(|stored| (**stored).borrow() == element)
    }

    /// Returns the stored element equal to `element`.
    pub(super) fn find<Q>(&self, element: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.position(element)
            .map(|index| &*self.entries()[index])
    }

    /// Returns a new bucket with `element` appended.
    pub(super) fn with(&self, element: ReferenceCounter<T>) -> Self {
        let entries: Vec<ReferenceCounter<T>> = self
            .entries()
            .iter()
            .cloned()
            .chain(std::iter::once(element))
            .collect();
        Self::Collision(entries.into())
    }

    /// Returns a new bucket without the element at `index`, or `None` when
    /// nothing would be left.
    pub(super) fn without(&self, index: usize) -> Option<Self> {
        let remaining: Vec<ReferenceCounter<T>> = self
            .entries()
            .iter()
            .enumerate()
            .filter(|&(position, _)| position != index)
            .map(|(_, element)| element.clone())
            .collect();
        match remaining.len() {
            0 => None,
            1 => remaining.into_iter().next().map(Self::Single),
            _ => Some(Self::Collision(remaining.into())),
        }
    }
}

impl<T: Eq> Bucket<T> {
    /// Returns `true` if a collision bucket holds at least two elements and
    /// no two of them are equal.
    pub(super) fn is_well_formed(&self) -> bool {
        match self {
            Self::Single(_) => true,
            Self::Collision(entries) => {
                entries.len() >= 2
                    && entries.iter().enumerate().all(|(index, element)| {
                        entries[index + 1..].iter().all(|other| other != element)
                    })
            }
        }
    }
}
