//! Hash-guided lookup.

use std::borrow::Borrow;

use super::super::ReferenceCounter;
use super::node::Node;

/// Returns the stored element equal to `element`, if any.
///
/// Descends by comparing `hash` against each node's cached hash. The node
/// owning `hash` is the only place the element can be, so its bucket decides.
pub(super) fn find_element<'a, T, Q>(
    link: Option<&'a ReferenceCounter<Node<T>>>,
    element: &Q,
    hash: u64,
) -> Option<&'a T>
where
    T: Borrow<Q>,
    Q: Eq + ?Sized,
{
    let mut current = link;
    while let Some(node) = current {
        match node.route(hash) {
            None => return node.bucket.find(element),
            Some(side) => current = node.child(side),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistent::rbtree::node::Color;
    use rstest::rstest;

    fn node(value: &'static str, hash: u64) -> Node<&'static str> {
        Node::leaf(ReferenceCounter::new(value), hash, Color::Black)
    }

    #[rstest]
    fn test_find_in_empty_link() {
        assert_eq!(find_element::<i32, i32>(None, &1, 1), None);
    }

    #[rstest]
    fn test_find_follows_hash_order() {
        let mut root = node("m", 50);
        root.left = Some(node("a", 10).seal());
        root.right = Some(node("z", 90).seal());
        let root = root.seal();

        assert_eq!(find_element(Some(&root), &"a", 10), Some(&"a"));
        assert_eq!(find_element(Some(&root), &"z", 90), Some(&"z"));
        assert_eq!(find_element(Some(&root), &"m", 50), Some(&"m"));
        assert_eq!(find_element(Some(&root), &"q", 70), None);
    }

    #[rstest]
    fn test_find_searches_collision_bucket() {
        let mut root = node("first", 42);
        root.bucket = root.bucket.with(ReferenceCounter::new("second"));
        root.left = Some(node("low", 7).seal());
        let root = root.seal();

        assert_eq!(find_element(Some(&root), &"first", 42), Some(&"first"));
        assert_eq!(find_element(Some(&root), &"second", 42), Some(&"second"));
        assert_eq!(find_element(Some(&root), &"third", 42), None);
    }
}
