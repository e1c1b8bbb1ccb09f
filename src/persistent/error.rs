//! Error types for the persistent tree.
//!
//! The only failure the tree can report is an absent element handed to one
//! of the checked `try_*` operations. It is raised before any traversal, so
//! no partial result ever exists.

/// Represents an absent (`None`) element passed to a checked operation.
///
/// # Examples
///
/// ```rust
/// use persistent_rbtree::persistent::InvalidArgumentError;
///
/// let error = InvalidArgumentError {
///     method_name: "try_insert",
/// };
/// assert_eq!(
///     format!("{}", error),
///     "PersistentRbTree::try_insert: element must not be absent"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidArgumentError {
    /// The name of the method that rejected the argument.
    pub method_name: &'static str,
}

impl std::fmt::Display for InvalidArgumentError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "PersistentRbTree::{}: element must not be absent",
            self.method_name
        )
    }
}

impl std::error::Error for InvalidArgumentError {}

/// Represents errors that can occur when operating on a [`PersistentRbTree`].
///
/// [`PersistentRbTree`]: super::PersistentRbTree
///
/// # Examples
///
/// ```rust
/// use persistent_rbtree::persistent::{PersistentRbTree, RbTreeError};
///
/// let tree: PersistentRbTree<i32> = PersistentRbTree::new();
/// let result = tree.try_insert(None);
/// assert!(matches!(result, Err(RbTreeError::InvalidArgument(_))));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RbTreeError {
    /// The element argument was absent.
    InvalidArgument(InvalidArgumentError),
}

impl RbTreeError {
    pub(crate) const fn invalid_argument(method_name: &'static str) -> Self {
        Self::InvalidArgument(InvalidArgumentError { method_name })
    }
}

impl std::fmt::Display for RbTreeError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(error) => write!(formatter, "{error}"),
        }
    }
}

impl std::error::Error for RbTreeError {}

impl From<InvalidArgumentError> for RbTreeError {
    fn from(error: InvalidArgumentError) -> Self {
        Self::InvalidArgument(error)
    }
}
