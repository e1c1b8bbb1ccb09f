//! Path-copying deletion with double-black rebalancing.
//!
//! Removing a black node without a red replacement leaves its subtree one
//! black node short. The engine reports that state upward as
//! [`Removal::deficient`]; every ancestor that receives it stages itself and
//! runs exactly one [`DeficiencyCase`]. Five of the six cases absorb the
//! deficiency locally. The sixth recolors and passes it on, and a deficiency
//! that reaches the root is simply dropped: it shortens every path equally.

use std::borrow::Borrow;

use super::super::ReferenceCounter;
use super::bucket::Bucket;
use super::node::{Color, Link, Node, Side, is_red, recolored};

/// The result of removing from a subtree.
pub(super) struct Removal<T> {
    /// The replacement subtree.
    pub(super) subtree: Link<T>,
    /// Set when `subtree` has one black node fewer on every path than the
    /// subtree it replaces.
    pub(super) deficient: bool,
}

impl<T> Removal<T> {
    const fn balanced(subtree: Link<T>) -> Self {
        Self {
            subtree,
            deficient: false,
        }
    }
}

/// Removes the element equal to `element` from the subtree rooted at `node`.
///
/// Returns `None` when no such element exists, so the caller can reuse the
/// original subtree.
pub(super) fn remove_from<T, Q>(
    node: &ReferenceCounter<Node<T>>,
    element: &Q,
    hash: u64,
) -> Option<Removal<T>>
where
    T: Borrow<Q>,
    Q: Eq + ?Sized,
{
    match node.route(hash) {
        None => {
            let index = node.bucket.position(element)?;
            Some(match node.bucket.without(index) {
                // Leaving a collision bucket keeps the node and its color.
                Some(remaining) => {
                    let mut staged = node.stage();
                    staged.bucket = remaining;
                    Removal::balanced(Some(staged.seal()))
                }
                None => excise(node),
            })
        }
        Some(side) => {
            let removal = remove_from(node.child(side)?, element, hash)?;
            Some(reattach(node.stage(), side, removal))
        }
    }
}

/// Attaches a child removal result to a staged parent, rebalancing if the
/// child came back deficient.
fn reattach<T>(mut parent: Node<T>, side: Side, removal: Removal<T>) -> Removal<T> {
    parent.set_child(side, removal.subtree);
    if removal.deficient {
        let (rebalanced, deficient) = rebalance(parent, side);
        Removal {
            subtree: Some(rebalanced.seal()),
            deficient,
        }
    } else {
        Removal::balanced(Some(parent.seal()))
    }
}

/// Removes `node` itself from its subtree.
fn excise<T>(node: &ReferenceCounter<Node<T>>) -> Removal<T> {
    match (&node.left, &node.right) {
        (Some(left), Some(_)) => {
            // Replace with the in-order predecessor and delete that instead.
            let (predecessor, removal) = remove_rightmost(left);
            let mut staged = node.stage();
            staged.bucket = predecessor.bucket;
            staged.hash = predecessor.hash;
            reattach(staged, Side::Left, removal)
        }
        _ => excise_with_at_most_one_child(node),
    }
}

/// Removes a node that has zero or one child.
///
/// A single child is always a red leaf: its bucket moves up into the node's
/// position, keeping the node's color. A red leaf simply disappears. A black
/// leaf disappears and leaves a deficiency behind.
fn excise_with_at_most_one_child<T>(node: &ReferenceCounter<Node<T>>) -> Removal<T> {
    match node.left.as_ref().or(node.right.as_ref()) {
        Some(only_child) => Removal::balanced(Some(
            Node::holding(only_child.bucket.clone(), only_child.hash, node.color).seal(),
        )),
        None => Removal {
            subtree: None,
            deficient: !node.is_red(),
        },
    }
}

/// A whole bucket lifted out of a subtree, with its cached hash.
struct Predecessor<T> {
    bucket: Bucket<T>,
    hash: u64,
}

/// Removes the rightmost node of the subtree rooted at `node`.
fn remove_rightmost<T>(node: &ReferenceCounter<Node<T>>) -> (Predecessor<T>, Removal<T>) {
    match &node.right {
        None => {
            let predecessor = Predecessor {
                bucket: node.bucket.clone(),
                hash: node.hash,
            };
            (predecessor, excise_with_at_most_one_child(node))
        }
        Some(right) => {
            let (predecessor, removal) = remove_rightmost(right);
            (predecessor, reattach(node.stage(), Side::Right, removal))
        }
    }
}

// =============================================================================
// Double-Black Rebalancing
// =============================================================================

/// The six ways a deficient child can be repaired at its parent.
///
/// Chosen only from the colors of the parent, the sibling, the sibling's two
/// children (nephews), and for a red sibling the children of the near nephew
/// (grandnephews).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum DeficiencyCase {
    /// Case 1: red parent, at least one red nephew.
    RedParentRedNephew,
    /// Case 2: red parent, no red nephew.
    RedParentBlackNephews,
    /// Case 3: red sibling whose near child has a red child.
    RedSiblingRedGrandnephew,
    /// Case 4: red sibling whose near child has no red child.
    RedSiblingBlackGrandnephews,
    /// Case 5: black sibling with at least one red child.
    BlackSiblingRedNephew,
    /// Case 6: black sibling with no red child. The deficiency moves up.
    BlackSiblingBlackNephews,
}

impl DeficiencyCase {
    fn classify<T>(parent: Color, sibling: &Node<T>, side: Side) -> Self {
        let near = sibling.child(side);
        let far = sibling.child(side.opposite());
        match (parent, sibling.color, is_red(near) || is_red(far)) {
            (Color::Red, _, true) => Self::RedParentRedNephew,
            (Color::Red, _, false) => Self::RedParentBlackNephews,
            (Color::Black, Color::Red, _) => {
                if near.is_some_and(|nephew| nephew.has_red_child()) {
                    Self::RedSiblingRedGrandnephew
                } else {
                    Self::RedSiblingBlackGrandnephews
                }
            }
            (Color::Black, Color::Black, true) => Self::BlackSiblingRedNephew,
            (Color::Black, Color::Black, false) => Self::BlackSiblingBlackNephews,
        }
    }
}

/// Repairs a staged `parent` whose child on `side` is one black node short.
///
/// Returns the staged replacement for `parent` and whether the replacement is
/// itself still deficient.
fn rebalance<T>(parent: Node<T>, side: Side) -> (Node<T>, bool) {
    // A deficient side had a black node, so equal black height forces a sibling.
    debug_assert!(
        parent.child(side.opposite()).is_some(),
        "deficient child has no sibling"
    );
    let Some(sibling) = parent.child(side.opposite()).cloned() else {
        return (parent, false);
    };
    match DeficiencyCase::classify(parent.color, &sibling, side) {
        DeficiencyCase::RedParentRedNephew => {
            (red_parent_red_nephew(parent, &sibling, side), false)
        }
        DeficiencyCase::RedParentBlackNephews => {
            (red_parent_black_nephews(parent, &sibling, side), false)
        }
        DeficiencyCase::RedSiblingRedGrandnephew => {
            (red_sibling_red_grandnephew(parent, &sibling, side), false)
        }
        DeficiencyCase::RedSiblingBlackGrandnephews => {
            (red_sibling_black_grandnephews(parent, &sibling, side), false)
        }
        DeficiencyCase::BlackSiblingRedNephew => {
            (black_sibling_red_nephew(parent, &sibling, side), false)
        }
        DeficiencyCase::BlackSiblingBlackNephews => {
            (black_sibling_black_nephews(parent, &sibling, side), true)
        }
    }
}

/// Case 1. The red nephew is rotated up; the new top stays red and both of
/// its children become black.
fn red_parent_red_nephew<T>(
    parent: Node<T>,
    sibling: &ReferenceCounter<Node<T>>,
    side: Side,
) -> Node<T> {
    lift_red_nephew(parent, sibling, side)
}

/// Case 2. Parent and sibling swap colors.
fn red_parent_black_nephews<T>(
    mut parent: Node<T>,
    sibling: &ReferenceCounter<Node<T>>,
    side: Side,
) -> Node<T> {
    parent.color = Color::Black;
    parent.set_child(side.opposite(), Some(recolored(sibling, Color::Red)));
    parent
}

/// Case 3. Two rotations move a black grandnephew to the top; the sibling
/// stays red beneath it.
///
/// ```text
///   inner grandnephew d:      P             d
///                          x     S       P     S
///                              c   e    x a   c e
///                             d             b
///                            a b
/// ```
fn red_sibling_red_grandnephew<T>(
    parent: Node<T>,
    sibling: &ReferenceCounter<Node<T>>,
    side: Side,
) -> Node<T> {
    let far = side.opposite();
    // A red sibling of a deficient side has black children on both sides.
    debug_assert!(sibling.child(side).is_some(), "red sibling has no near child");
    let mut staged_sibling = sibling.stage();
    let Some(nephew) = staged_sibling.take_child(side) else {
        return parent;
    };

    let pivot = if is_red(nephew.child(side)) {
        let mut grandnephew = nephew.stage().rotate(far);
        grandnephew.color = Color::Black;
        grandnephew
    } else {
        let mut staged_nephew = nephew.stage();
        let outer = staged_nephew
            .child(far)
            .map(|grandnephew| recolored(grandnephew, Color::Black));
        staged_nephew.set_child(far, outer);
        staged_nephew
    };

    let pivot = staged_sibling.rotate_under(pivot, far);
    let mut top = parent.rotate_under(pivot, side);
    top.color = Color::Black;
    top
}

/// Case 4. A single rotation lifts the sibling, now black, and moves the
/// near nephew under the parent as a red node.
fn red_sibling_black_grandnephews<T>(
    mut parent: Node<T>,
    sibling: &ReferenceCounter<Node<T>>,
    side: Side,
) -> Node<T> {
    let mut top = sibling.stage();
    top.color = Color::Black;
    let nephew = top
        .take_child(side)
        .map(|nephew| recolored(&nephew, Color::Red));
    parent.set_child(side.opposite(), nephew);
    top.set_child(side, Some(parent.seal()));
    top
}

/// Case 5. The red nephew is rotated up; everything on top stays black.
fn black_sibling_red_nephew<T>(
    parent: Node<T>,
    sibling: &ReferenceCounter<Node<T>>,
    side: Side,
) -> Node<T> {
    lift_red_nephew(parent, sibling, side)
}

/// Case 6. The sibling turns red, shortening its side to match.
fn black_sibling_black_nephews<T>(
    mut parent: Node<T>,
    sibling: &ReferenceCounter<Node<T>>,
    side: Side,
) -> Node<T> {
    parent.set_child(side.opposite(), Some(recolored(sibling, Color::Red)));
    parent
}

/// Rotates a black sibling's red child toward the deficient side.
///
/// A red far nephew needs one rotation with the sibling on top; otherwise the
/// red near nephew is lifted through the sibling first. The new top takes
/// the parent's original color and both of its children end up black.
fn lift_red_nephew<T>(
    mut parent: Node<T>,
    sibling: &ReferenceCounter<Node<T>>,
    side: Side,
) -> Node<T> {
    let far = side.opposite();
    let top_color = parent.color;
    parent.color = Color::Black;

    let pivot = if is_red(sibling.child(far)) {
        let mut staged_sibling = sibling.stage();
        let outer = sibling
            .child(far)
            .map(|nephew| recolored(nephew, Color::Black));
        staged_sibling.set_child(far, outer);
        staged_sibling
    } else {
        sibling.stage().rotate(far)
    };

    let mut top = parent.rotate_under(pivot, side);
    top.color = top_color;
    top
}

// =============================================================================
// Tests
// =============================================================================
