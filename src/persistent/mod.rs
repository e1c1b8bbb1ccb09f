//! Persistent (immutable) data structures.
//!
//! This module provides [`PersistentRbTree`], a versioned set that uses
//! path copying and structural sharing:
//!
//! - Each `insert` or `remove` allocates only the nodes on the root-to-target path
//! - Every other subtree is shared by reference with the previous version
//! - A published node is never mutated again
//!
//! # Examples
//!
//! ```rust
//! use persistent_rbtree::persistent::PersistentRbTree;
//!
//! let version1 = PersistentRbTree::new().insert(5).insert(1).insert(4);
//! let version2 = version1.insert(3);
//!
//! // Structural sharing: the original version is preserved
//! assert_eq!(version1.find(&3), None);
//! assert_eq!(version2.find(&3), Some(&3));
//!
//! // Inserting a present element returns the very same version
//! assert!(version2.insert(3).ptr_eq(&version2));
//! ```

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`,
/// which is thread-safe but has slightly higher overhead.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

mod error;
mod hashing;
mod rbtree;

pub use error::InvalidArgumentError;
pub use error::RbTreeError;
pub use rbtree::PersistentRbTree;

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod reference_counter_tests {
    use super::ReferenceCounter;
    use rstest::rstest;

    #[rstest]
    fn test_reference_counter_ptr_eq_after_clone() {
        let reference_counter: ReferenceCounter<i32> = ReferenceCounter::new(42);
        let reference_counter_clone = reference_counter.clone();
        assert!(ReferenceCounter::ptr_eq(
            &reference_counter,
            &reference_counter_clone
        ));
    }

    #[rstest]
    fn test_reference_counter_strong_count() {
        let reference_counter: ReferenceCounter<i32> = ReferenceCounter::new(42);
        assert_eq!(ReferenceCounter::strong_count(&reference_counter), 1);
        let reference_counter_clone = reference_counter.clone();
        assert_eq!(ReferenceCounter::strong_count(&reference_counter), 2);
        drop(reference_counter_clone);
        assert_eq!(ReferenceCounter::strong_count(&reference_counter), 1);
    }
}
