//! Persistent (immutable) set based on a path-copying Red-Black Tree.
//!
//! This module provides [`PersistentRbTree`], an immutable set whose
//! mutating operations return new versions while every earlier version
//! remains valid and unchanged.
//!
//! # Overview
//!
//! - O(log N) find
//! - O(log N) insert, allocating O(log N) nodes
//! - O(log N) remove, allocating O(log N) nodes
//! - O(N) size, validation and structural hash
//!
//! # Ordering
//!
//! Elements are ordered by their `u64` hash rather than by `Ord`. Elements
//! with a smaller hash live to the left. Unequal elements that share a hash
//! are kept together in one node's collision bucket, the newcomer after the
//! elements already there, so every node owns a distinct hash.
//!
//! # Examples
//!
//! ```rust
//! use persistent_rbtree::persistent::PersistentRbTree;
//!
//! let tree = PersistentRbTree::new()
//!     .insert("Hello".to_string())
//!     .insert("brown".to_string())
//!     .insert("fox".to_string());
//!
//! assert_eq!(tree.size(), 3);
//! assert_eq!(tree.find("fox"), Some(&"fox".to_string()));
//! assert_eq!(tree.find("red"), None);
//! assert!(tree.valid());
//! ```
//!
//! # Internal Structure
//!
//! The handle itself is the sentinel: a keyless, always-black holder of the
//! root link. Nodes have no parent pointers; the insertion and deletion
//! engines carry rebalancing signals back up the recursion instead. Every
//! published version satisfies:
//!
//! 1. The root is black
//! 2. Red nodes have only black children
//! 3. Every path from a node to an absent child has the same number of black nodes
//! 4. Left descendants hash lower; right descendants hash higher
//! 5. No two nodes share a hash, and no bucket holds two equal elements

mod bucket;
mod diagnostics;
mod insert;
mod lookup;
mod node;
mod remove;

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

use super::ReferenceCounter;
use super::error::RbTreeError;
use super::hashing::element_hash;
use node::{Color, Link, recolored};

// =============================================================================
// PersistentRbTree Definition
// =============================================================================

/// A persistent (immutable) set based on a Red-Black Tree.
///
/// `PersistentRbTree` is an immutable data structure that uses path copying:
/// an `insert` or `remove` builds new nodes only along the root-to-element
/// path and shares every other subtree with the version it started from.
///
/// Elements must implement `Hash` and `Eq`, and equal elements must hash
/// equally. `Clone` is not required; elements are shared between versions.
///
/// # Time Complexity
///
/// | Operation         | Complexity |
/// |-------------------|------------|
/// | `new`             | O(1)       |
/// | `is_empty`        | O(1)       |
/// | `find`            | O(log N)   |
/// | `contains`        | O(log N)   |
/// | `insert`          | O(log N)   |
/// | `remove`          | O(log N)   |
/// | `size`            | O(N)       |
/// | `valid`           | O(N)       |
/// | `structural_hash` | O(N)       |
///
/// # Examples
///
/// ```rust
/// use persistent_rbtree::persistent::PersistentRbTree;
///
/// let version1 = PersistentRbTree::new().insert(1).insert(2);
/// let version2 = version1.remove(&1);
///
/// assert_eq!(version1.size(), 2); // Original unchanged
/// assert_eq!(version2.size(), 1);
/// assert_eq!(version2.find(&1), None);
/// ```
pub struct PersistentRbTree<T> {
    /// Root node of the tree, always black when present.
    root: Link<T>,
}

impl<T> PersistentRbTree<T> {
    /// Creates a new empty tree. No allocation takes place.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_rbtree::persistent::PersistentRbTree;
    ///
    /// let tree: PersistentRbTree<i32> = PersistentRbTree::new();
    /// assert!(tree.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { root: None }
    }

    /// Returns `true` if the tree contains no elements.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of elements in the tree.
    ///
    /// # Complexity
    ///
    /// O(N): the tree does not store its size, so every node is counted.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_rbtree::persistent::PersistentRbTree;
    ///
    /// let tree = PersistentRbTree::new().insert('a').insert('b').insert('a');
    /// assert_eq!(tree.size(), 2);
    /// ```
    #[must_use]
    pub fn size(&self) -> usize {
        diagnostics::count(self.root.as_ref())
    }

    /// Returns `true` if both handles refer to the very same version.
    ///
    /// This is an identity check, not an equality check: two trees holding
    /// the same elements but built separately are not `ptr_eq`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_rbtree::persistent::PersistentRbTree;
    ///
    /// let tree = PersistentRbTree::new().insert(1);
    /// assert!(tree.insert(1).ptr_eq(&tree));
    /// assert!(!tree.insert(2).ptr_eq(&tree));
    /// ```
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.root, &other.root) {
            (None, None) => true,
            (Some(root), Some(other_root)) => ReferenceCounter::ptr_eq(root, other_root),
            _ => false,
        }
    }

    /// Returns a fingerprint of the tree's elements and shape.
    ///
    /// Each element contributes its hash, negated when its node is red, and
    /// the contributions are summed with wrapping arithmetic. The empty
    /// tree hashes to zero. Meant for checking that a version has not changed,
    /// not for bucketing.
    ///
    /// # Complexity
    ///
    /// O(N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_rbtree::persistent::PersistentRbTree;
    ///
    /// let tree = PersistentRbTree::new().insert(3).insert(1);
    /// let fingerprint = tree.structural_hash();
    /// let _derived = tree.insert(2).remove(&3);
    /// assert_eq!(tree.structural_hash(), fingerprint);
    /// assert_eq!(PersistentRbTree::<i32>::new().structural_hash(), 0);
    /// ```
    #[must_use]
    pub fn structural_hash(&self) -> u64 {
        diagnostics::structural_hash(self.root.as_ref())
    }
}

impl<T: Hash + Eq> PersistentRbTree<T> {
    /// Creates a tree containing a single element.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_rbtree::persistent::PersistentRbTree;
    ///
    /// let tree = PersistentRbTree::singleton(42);
    /// assert_eq!(tree.size(), 1);
    /// assert_eq!(tree.find(&42), Some(&42));
    /// ```
    #[inline]
    #[must_use]
    pub fn singleton(element: T) -> Self {
        Self::new().insert(element)
    }

    /// Returns the stored element equal to `element`.
    ///
    /// The element may be any borrowed form of the tree's element type, as
    /// long as the borrowed form hashes and compares like the owned one.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_rbtree::persistent::PersistentRbTree;
    ///
    /// let tree = PersistentRbTree::new().insert("fox".to_string());
    /// assert_eq!(tree.find("fox"), Some(&"fox".to_string()));
    /// assert_eq!(tree.find("red"), None);
    /// ```
    #[must_use]
    pub fn find<Q>(&self, element: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        lookup::find_element(self.root.as_ref(), element, element_hash(element))
    }

    /// Returns `true` if the tree contains an element equal to `element`.
    ///
    /// # Complexity
    ///
    /// O(log N)
    #[must_use]
    pub fn contains<Q>(&self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(element).is_some()
    }

    /// Returns a new version that also contains `element`.
    ///
    /// If an equal element is already present, the returned handle is the
    /// same version as `self` (see [`ptr_eq`](Self::ptr_eq)) and the stored
    /// element is kept.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_rbtree::persistent::PersistentRbTree;
    ///
    /// let version1 = PersistentRbTree::new().insert(5);
    /// let version2 = version1.insert(1);
    ///
    /// assert_eq!(version1.find(&1), None);     // Original unchanged
    /// assert_eq!(version2.find(&1), Some(&1)); // New version
    /// assert!(version2.insert(5).ptr_eq(&version2));
    /// ```
    #[must_use]
    pub fn insert(&self, element: T) -> Self {
        let hash = element_hash(&element);
        insert::insert_into(self.root.as_ref(), element, hash).map_or_else(
            || self.clone(),
            |mut root| {
                root.color = Color::Black;
                Self {
                    root: Some(root.seal()),
                }
            },
        )
    }

    /// Returns a new version without the element equal to `element`.
    ///
    /// If no such element exists, the returned handle is the same version as
    /// `self`.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_rbtree::persistent::PersistentRbTree;
    ///
    /// let tree = PersistentRbTree::new().insert(1).insert(2);
    /// let removed = tree.remove(&1);
    ///
    /// assert_eq!(tree.size(), 2);    // Original unchanged
    /// assert_eq!(removed.size(), 1); // New version
    /// assert!(removed.remove(&1).ptr_eq(&removed));
    /// ```
    #[must_use]
    pub fn remove<Q>(&self, element: &Q) -> Self
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(root) = self.root.as_ref() else {
            return self.clone();
        };
        // A deficiency that reaches the root shortens every path equally.
        remove::remove_from(root, element, element_hash(element)).map_or_else(
            || self.clone(),
            |removal| Self {
                root: removal.subtree.map(|root| {
                    if root.is_red() {
                        recolored(&root, Color::Black)
                    } else {
                        root
                    }
                }),
            },
        )
    }

    /// Like [`find`](Self::find), but accepts a possibly absent element.
    ///
    /// # Errors
    ///
    /// Returns [`RbTreeError::InvalidArgument`] if `element` is `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_rbtree::persistent::PersistentRbTree;
    ///
    /// let tree = PersistentRbTree::new().insert(1);
    /// assert_eq!(tree.try_find(Some(&1)), Ok(Some(&1)));
    /// assert!(tree.try_find::<i32>(None).is_err());
    /// ```
    pub fn try_find<Q>(&self, element: Option<&Q>) -> Result<Option<&T>, RbTreeError>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let element = Self::require(element, "try_find")?;
        Ok(self.find(element))
    }

    /// Like [`insert`](Self::insert), but accepts a possibly absent element.
    ///
    /// # Errors
    ///
    /// Returns [`RbTreeError::InvalidArgument`] if `element` is `None`.
    pub fn try_insert(&self, element: Option<T>) -> Result<Self, RbTreeError> {
        let element = Self::require(element, "try_insert")?;
        Ok(self.insert(element))
    }

    /// Like [`remove`](Self::remove), but accepts a possibly absent element.
    ///
    /// # Errors
    ///
    /// Returns [`RbTreeError::InvalidArgument`] if `element` is `None`.
    pub fn try_remove<Q>(&self, element: Option<&Q>) -> Result<Self, RbTreeError>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let element = Self::require(element, "try_remove")?;
        Ok(self.remove(element))
    }

    fn require<A>(element: Option<A>, method_name: &'static str) -> Result<A, RbTreeError> {
        element.ok_or_else(|| {
            log::debug!("PersistentRbTree::{method_name} rejected an absent element");
            RbTreeError::invalid_argument(method_name)
        })
    }

    /// Checks every Red-Black Tree invariant.
    ///
    /// Returns `false` if the root is red, a red node has a red child, two
    /// paths disagree on black height, an element is out of hash order, or a
    /// collision bucket is malformed.
    /// The first violation found is logged at debug level.
    ///
    /// # Complexity
    ///
    /// O(N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_rbtree::persistent::PersistentRbTree;
    ///
    /// let tree: PersistentRbTree<i32> = (0..100).collect();
    /// assert!(tree.valid());
    /// ```
    #[must_use]
    pub fn valid(&self) -> bool {
        match diagnostics::validate(self.root.as_ref()) {
            Ok(black_height) => {
                log::trace!("PersistentRbTree is valid with black height {black_height}");
                true
            }
            Err(violation) => {
                log::debug!("PersistentRbTree invariant violated: {violation}");
                false
            }
        }
    }
}

impl<T: fmt::Display> PersistentRbTree<T> {
    /// Returns a human-readable dump of the tree's structure.
    ///
    /// The empty tree renders as `is empty`. Otherwise the output is `head`
    /// followed by the root, where each node renders as
    /// `(<element><R|B><left><right>)` and an absent child as `?`. A node
    /// holding colliding elements lists them separated by `,`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_rbtree::persistent::PersistentRbTree;
    ///
    /// let empty: PersistentRbTree<i32> = PersistentRbTree::new();
    /// assert_eq!(empty.to_string_debug(), "is empty");
    /// assert_eq!(PersistentRbTree::singleton(7).to_string_debug(), "head(7B??)");
    /// ```
    #[must_use]
    pub fn to_string_debug(&self) -> String {
        self.to_string()
    }
}

impl<T> PersistentRbTree<T> {
    fn write_dump<F>(&self, formatter: &mut fmt::Formatter<'_>, write_element: &F) -> fmt::Result
    where
        F: Fn(&T, &mut fmt::Formatter<'_>) -> fmt::Result,
    {
        if self.is_empty() {
            return formatter.write_str("is empty");
        }
        formatter.write_str("head")?;
        diagnostics::write_structure(formatter, self.root.as_ref(), write_element)
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Clone for PersistentRbTree<T> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
        }
    }
}

impl<T> Default for PersistentRbTree<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Hash + Eq> FromIterator<T> for PersistentRbTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        for element in iter {
            tree = tree.insert(element);
        }
        tree
    }
}

impl<T: fmt::Display> fmt::Display for PersistentRbTree<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_dump(formatter, &<T as fmt::Display>::fmt)
    }
}

impl<T: fmt::Debug> fmt::Debug for PersistentRbTree<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_dump(formatter, &<T as fmt::Debug>::fmt)
    }
}

// =============================================================================
// Tests
// =============================================================================


// =============================================================================
// Send + Sync Tests (arc feature only)
// =============================================================================
