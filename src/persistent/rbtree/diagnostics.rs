//! O(n) structural checks used by tests and assertions.

use std::fmt;

use super::super::ReferenceCounter;
use super::node::Node;

/// The first broken Red-Black Tree invariant found by [`validate`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(super) enum InvariantViolation {
    /// The root is red.
    RedRoot,
    /// A red node has a red child.
    RedRedAdjacency,
    /// Two paths below a node pass through different numbers of black nodes.
    BlackHeightMismatch,
    /// A node sits on the wrong side of an ancestor, or shares its hash.
    Ordering,
    /// A collision bucket is too short or holds two equal elements.
    MalformedBucket,
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = match self {
            Self::RedRoot => "root is red",
            Self::RedRedAdjacency => "red node has a red child",
            Self::BlackHeightMismatch => "black height differs between paths",
            Self::Ordering => "element is out of hash order",
            Self::MalformedBucket => "collision bucket is malformed",
        };
        formatter.write_str(description)
    }
}

/// Verifies every invariant below `root` and returns its black height.
pub(super) fn validate<T: Eq>(
    root: Option<&ReferenceCounter<Node<T>>>,
) -> Result<usize, InvariantViolation> {
    match root {
        None => Ok(0),
        Some(root) if root.is_red() => Err(InvariantViolation::RedRoot),
        Some(root) => black_height(root, None, None),
    }
}

/// Checks the subtree at `node` against the hash bounds inherited from its
/// ancestors.
///
/// `lower` and `upper` are the hashes of the nearest ancestors this subtree
/// lies to the right and to the left of. Both bounds are strict, so no two
/// nodes anywhere in the tree share a hash.
fn black_height<T: Eq>(
    node: &Node<T>,
    lower: Option<u64>,
    upper: Option<u64>,
) -> Result<usize, InvariantViolation> {
    if node.is_red() && node.has_red_child() {
        return Err(InvariantViolation::RedRedAdjacency);
    }
    if lower.is_some_and(|lower| node.hash <= lower)
        || upper.is_some_and(|upper| node.hash >= upper)
    {
        return Err(InvariantViolation::Ordering);
    }
    if !node.bucket.is_well_formed() {
        return Err(InvariantViolation::MalformedBucket);
    }

    let left = match node.left.as_deref() {
        Some(left) => black_height(left, lower, Some(node.hash))?,
        None => 0,
    };
    let right = match node.right.as_deref() {
        Some(right) => black_height(right, Some(node.hash), upper)?,
        None => 0,
    };
    if left != right {
        return Err(InvariantViolation::BlackHeightMismatch);
    }
    Ok(left + usize::from(!node.is_red()))
}

/// Counts the elements below `link`.
pub(super) fn count<T>(link: Option<&ReferenceCounter<Node<T>>>) -> usize {
    link.map_or(0, |node| {
        node.bucket.len() + count(node.left.as_ref()) + count(node.right.as_ref())
    })
}

/// Combines element hashes with node colors into a fingerprint of the shape.
///
/// Every element contributes its hash, negated when its node is red. The
/// empty subtree contributes 0.
pub(super) fn structural_hash<T>(link: Option<&ReferenceCounter<Node<T>>>) -> u64 {
    link.map_or(0, |node| {
        let signed = if node.is_red() {
            node.hash.wrapping_neg()
        } else {
            node.hash
        };
        let own = node
            .bucket
            .iter()
            .fold(0_u64, |sum, _| sum.wrapping_add(signed));
        own.wrapping_add(structural_hash(node.left.as_ref()))
            .wrapping_add(structural_hash(node.right.as_ref()))
    })
}

/// Writes `(<elements><R|B><left><right>)`, with `?` for an absent child and
/// the elements of a collision bucket separated by `,`.
pub(super) fn write_structure<T, F>(
    formatter: &mut fmt::Formatter<'_>,
    link: Option<&ReferenceCounter<Node<T>>>,
    write_element: &F,
) -> fmt::Result
where
    F: Fn(&T, &mut fmt::Formatter<'_>) -> fmt::Result,
{
    let Some(node) = link else {
        return formatter.write_str("?");
    };
    formatter.write_str("(")?;
    for (index, element) in node.bucket.iter().enumerate() {
        if index > 0 {
            formatter.write_str(",")?;
        }
        write_element(element, formatter)?;
    }
    formatter.write_str(if node.is_red() { "R" } else { "B" })?;
    write_structure(formatter, node.left.as_ref(), write_element)?;
    write_structure(formatter, node.right.as_ref(), write_element)?;
    formatter.write_str(")")
}
