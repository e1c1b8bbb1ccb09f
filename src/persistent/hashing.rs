//! Element hash computation.
//!
//! The tree orders elements by their `u64` hash, so the hasher must produce
//! the same value for the same element every time it is asked within one
//! process. All hashers selectable here are seeded with fixed keys.
//!
//! - default: `std::collections::hash_map::DefaultHasher`
//! - `fxhash` feature: `rustc_hash::FxHasher`
//! - `ahash` feature: `ahash::AHasher` (ignored when `fxhash` is also enabled)

use std::hash::{Hash, Hasher};

#[cfg(feature = "fxhash")]
type ElementHasher = rustc_hash::FxHasher;

#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
type ElementHasher = ahash::AHasher;

#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
type ElementHasher = std::collections::hash_map::DefaultHasher;

/// Computes the ordering hash of an element.
#[inline]
pub(crate) fn element_hash<T: Hash + ?Sized>(element: &T) -> u64 {
    let mut hasher = ElementHasher::default();
    element.hash(&mut hasher);
    hasher.finish()
}
