//! Path-copying insertion with red-red rebalancing.
//!
//! An element whose hash is already owned by a node joins that node's
//! collision bucket; only a new hash adds a node.
//!
//! The recursion descends by the lookup ordering and, while unwinding,
//! stages a copy of every node on the path with its new child attached.
//! Each staged copy gets a local fix-up before it is handed to its parent,
//! which may leave a red node at the top for the parent to resolve. The
//! caller forces the final root black.

use super::super::ReferenceCounter;
use super::node::{Color, Node, Side, is_red, recolored};

/// Inserts `element` below `link`.
///
/// Returns the staged replacement for `link`, or `None` when an equal element
/// is already present and the subtree must be reused unchanged.
pub(super) fn insert_into<T: Eq>(
    link: Option<&ReferenceCounter<Node<T>>>,
    element: T,
    hash: u64,
) -> Option<Node<T>> {
    let Some(node) = link else {
        return Some(Node::new_red(ReferenceCounter::new(element), hash));
    };

    let Some(side) = node.route(hash) else {
        // Joining a collision bucket leaves colors and shape untouched.
        if node.bucket.position(&element).is_some() {
            return None;
        }
        let mut staged = node.stage();
        staged.bucket = node.bucket.with(ReferenceCounter::new(element));
        return Some(staged);
    };
    let child = insert_into(node.child(side), element, hash)?;

    let mut staged = node.stage();
    staged.set_child(side, Some(child.seal()));
    Some(balance(staged))
}

/// Resolves a red-red violation among the children and grandchildren of a
/// staged node.
fn balance<T>(mut node: Node<T>) -> Node<T> {
    // Red uncle: recolor and push the red up one level.
    if is_red(node.left.as_ref()) && is_red(node.right.as_ref()) {
        let has_red_grandchild = node.left.as_ref().is_some_and(|left| left.has_red_child())
            || node.right.as_ref().is_some_and(|right| right.has_red_child());
        if has_red_grandchild {
            node.color = Color::Red;
            node.left = node.left.as_ref().map(|left| recolored(left, Color::Black));
            node.right = node
                .right
                .as_ref()
                .map(|right| recolored(right, Color::Black));
        }
        return node;
    }

    let Some(side) = [Side::Left, Side::Right]
        .into_iter()
        .find(|&side| is_red(node.child(side)))
    else {
        return node;
    };
    let Some(child) = node.child(side).cloned() else {
        return node;
    };

    // Inner grandchild: rotate it to the outside first.
    let pivot = if is_red(child.child(side.opposite())) {
        child.stage().rotate(side)
    } else if is_red(child.child(side)) {
        child.stage()
    } else {
        return node;
    };

    // Outer grandchild: lift the red child above this node.
    node.color = Color::Red;
    let mut top = node.rotate_under(pivot, side.opposite());
    top.color = Color::Black;
    top
}
