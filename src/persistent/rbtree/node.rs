//! Node model for the persistent Red-Black Tree.
//!
//! A node exists in two states:
//!
//! - **staged**: an owned `Node<T>` value, freshly cloned or created, that the
//!   insertion and deletion engines may recolor and rotate freely
//! - **published**: a `ReferenceCounter<Node<T>>` produced by [`Node::seal`],
//!   which may be shared by any number of tree versions and is never mutated
//!
//! Rotations only ever take a staged node and a staged pivot, so no published
//! node is touched while rebalancing.

use std::cmp::Ordering;

use super::super::ReferenceCounter;
use super::bucket::Bucket;

// =============================================================================
// Color and Side
// =============================================================================

/// The color of a Red-Black Tree node.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(super) enum Color {
    Red,
    Black,
}

/// Which child slot of a node.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(super) enum Side {
    Left,
    Right,
}

impl Side {
    pub(super) const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// A shared, possibly absent, subtree.
pub(super) type Link<T> = Option<ReferenceCounter<Node<T>>>;

// =============================================================================
// Node Definition
// =============================================================================

/// Internal node structure for the Red-Black Tree.
pub(super) struct Node<T> {
    pub(super) bucket: Bucket<T>,
    /// Cached ordering hash shared by every element in `bucket`.
    pub(super) hash: u64,
    pub(super) color: Color,
    pub(super) left: Link<T>,
    pub(super) right: Link<T>,
}

impl<T> Node<T> {
    /// Creates a new red node with no children.
    pub(super) const fn new_red(element: ReferenceCounter<T>, hash: u64) -> Self {
        Self::leaf(element, hash, Color::Red)
    }

    /// Creates a childless node of the given color.
    pub(super) const fn leaf(element: ReferenceCounter<T>, hash: u64, color: Color) -> Self {
        Self::holding(Bucket::Single(element), hash, color)
    }

    /// Creates a childless node holding `bucket`.
    pub(super) const fn holding(bucket: Bucket<T>, hash: u64, color: Color) -> Self {
        Self {
            bucket,
            hash,
            color,
            left: None,
            right: None,
        }
    }

    /// Clones a published node into a staged node that may be edited.
    ///
    /// Only reference counts are touched; the elements and both subtrees are
    /// shared with the original.
    pub(super) fn stage(&self) -> Self {
        Self {
            bucket: self.bucket.clone(),
            hash: self.hash,
            color: self.color,
            left: self.left.clone(),
            right: self.right.clone(),
        }
    }

    /// Publishes a staged node. No further edits are possible afterwards.
    pub(super) fn seal(self) -> ReferenceCounter<Self> {
        ReferenceCounter::new(self)
    }

    /// Checks if this node is red.
    pub(super) fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    pub(super) fn child(&self, side: Side) -> Option<&ReferenceCounter<Self>> {
        match side {
            Side::Left => self.left.as_ref(),
            Side::Right => self.right.as_ref(),
        }
    }

    pub(super) fn take_child(&mut self, side: Side) -> Link<T> {
        match side {
            Side::Left => self.left.take(),
            Side::Right => self.right.take(),
        }
    }

    pub(super) fn set_child(&mut self, side: Side, link: Link<T>) {
        match side {
            Side::Left => self.left = link,
            Side::Right => self.right = link,
        }
    }

    /// Returns `true` if either child is red.
    pub(super) fn has_red_child(&self) -> bool {
        is_red(self.left.as_ref()) || is_red(self.right.as_ref())
    }

    /// Rotates toward `toward`, lifting `pivot` above this node.
    ///
    /// `pivot` must be the staged replacement of this node's child on the
    /// opposite side. The pivot's inner subtree moves under this node, and
    /// this node is sealed as the pivot's child on the `toward` side.
    ///
    /// ```text
    ///   rotate toward Right:      self              pivot
    ///                           pivot  c    ->    a      self
    ///                          a     b                  b    c
    /// ```
    pub(super) fn rotate_under(mut self, mut pivot: Self, toward: Side) -> Self {
        self.set_child(toward.opposite(), pivot.take_child(toward));
        pivot.set_child(toward, Some(self.seal()));
        pivot
    }

    /// Rotates toward `toward`, staging the opposite child as the pivot.
    ///
    /// Returns the node unchanged when there is no child to lift.
    pub(super) fn rotate(mut self, toward: Side) -> Self {
        match self.take_child(toward.opposite()) {
            Some(child) => {
                let pivot = child.stage();
                self.rotate_under(pivot, toward)
            }
            None => self,
        }
    }
}

impl<T> Node<T> {
    /// Decides where an element hashing to `hash` lives relative to this node.
    ///
    /// Returns `None` when the hash is this node's own, in which case the
    /// element can only be in this node's bucket.
    pub(super) fn route(&self, hash: u64) -> Option<Side> {
        match hash.cmp(&self.hash) {
            Ordering::Less => Some(Side::Left),
            Ordering::Equal => None,
            Ordering::Greater => Some(Side::Right),
        }
    }

    /// Returns the first element of the bucket.
    #[cfg(test)]
    pub(super) fn element(&self) -> &T {
        self.bucket.iter().next().unwrap()
    }
}

/// Helper function to check if an optional node is red.
pub(super) fn is_red<T>(node: Option<&ReferenceCounter<Node<T>>>) -> bool {
    node.is_some_and(|node| node.is_red())
}

/// Publishes a copy of `node` with a different color.
pub(super) fn recolored<T>(
    node: &ReferenceCounter<Node<T>>,
    color: Color,
) -> ReferenceCounter<Node<T>> {
    let mut staged = node.stage();
    staged.color = color;
    staged.seal()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn red(value: i32) -> Node<i32> {
        Node::new_red(ReferenceCounter::new(value), value.unsigned_abs().into())
    }

    fn black(value: i32) -> Node<i32> {
        Node::leaf(
            ReferenceCounter::new(value),
            value.unsigned_abs().into(),
            Color::Black,
        )
    }

    #[rstest]
    #[case(Side::Left, Side::Right)]
    #[case(Side::Right, Side::Left)]
    fn test_side_opposite(#[case] side: Side, #[case] expected: Side) {
        assert_eq!(side.opposite(), expected);
        assert_eq!(side.opposite().opposite(), side);
    }

    #[rstest]
    fn test_stage_shares_children_and_element() {
        let mut parent = black(2);
        parent.left = Some(red(1).seal());
        let published = parent.seal();
        let staged = published.stage();

        assert!(std::ptr::eq(staged.element(), published.element()));
        assert!(ReferenceCounter::ptr_eq(
            staged.left.as_ref().unwrap(),
            published.left.as_ref().unwrap()
        ));
        assert_eq!(staged.color, Color::Black);
    }

    #[rstest]
    fn test_recolored_leaves_original_untouched() {
        let published = red(7).seal();
        let blackened = recolored(&published, Color::Black);
        assert!(published.is_red());
        assert!(!blackened.is_red());
        assert_eq!(*blackened.element(), 7);
    }

    #[rstest]
    fn test_rotate_right_lifts_left_child() {
        //     4            2
        //   2   5   ->   1   4
        //  1 3              3 5
        let mut left = black(2);
        left.left = Some(red(1).seal());
        left.right = Some(red(3).seal());
        let mut node = black(4);
        node.left = Some(left.seal());
        node.right = Some(black(5).seal());

        let top = node.rotate(Side::Right);
        assert_eq!(*top.element(), 2);
        assert_eq!(*top.left.as_ref().unwrap().element(), 1);
        let lowered = top.right.as_ref().unwrap();
        assert_eq!(*lowered.element(), 4);
        assert_eq!(*lowered.left.as_ref().unwrap().element(), 3);
        assert_eq!(*lowered.right.as_ref().unwrap().element(), 5);
    }

    #[rstest]
    fn test_rotate_left_lifts_right_child() {
        let mut node = black(1);
        node.right = Some(red(2).seal());

        let top = node.rotate(Side::Left);
        assert_eq!(*top.element(), 2);
        assert!(top.right.is_none());
        assert_eq!(*top.left.as_ref().unwrap().element(), 1);
    }

    #[rstest]
    fn test_rotate_without_child_is_identity() {
        let node = black(1);
        let top = node.rotate(Side::Left);
        assert_eq!(*top.element(), 1);
        assert!(top.left.is_none() && top.right.is_none());
    }

    #[rstest]
    fn test_route_stops_at_own_hash() {
        let node = black(5);
        assert_eq!(node.route(5), None);
        assert_eq!(node.route(1), Some(Side::Left));
        assert_eq!(node.route(9), Some(Side::Right));
    }

    #[rstest]
    fn test_has_red_child() {
        let mut node = black(2);
        assert!(!node.has_red_child());
        node.right = Some(red(3).seal());
        assert!(node.has_red_child());
    }
}
