//! # persistent-rbtree
//!
//! A persistent (immutable, versioned) set backed by a Red-Black Tree.
//!
//! ## Overview
//!
//! Every mutating operation returns a new tree version while all previously
//! obtained versions stay valid, unchanged, and independently usable:
//!
//! - O(log N) `find`, `insert` and `remove`
//! - O(log N) new nodes per mutation; every other subtree is shared
//! - Ordering derived from the element hash, with equality as the tie-break
//!
//! ## Feature Flags
//!
//! - `arc`: Use `Arc` instead of `Rc` so versions are `Send + Sync`
//! - `fxhash`: Hash elements with `rustc-hash`
//! - `ahash`: Hash elements with `ahash`
//!
//! ## Example
//!
//! ```rust
//! use persistent_rbtree::prelude::*;
//!
//! let tree = PersistentRbTree::new().insert("Hello").insert("fox");
//! let smaller = tree.remove(&"Hello");
//!
//! assert_eq!(tree.find(&"fox"), Some(&"fox"));
//! assert_eq!(tree.size(), 2);    // Original unchanged
//! assert_eq!(smaller.size(), 1); // New version
//! assert!(smaller.valid());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use persistent_rbtree::prelude::*;
/// ```
pub mod prelude {
    pub use crate::persistent::*;
}

pub mod persistent;
