use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::Node;

/// Inline capacity of traversal stacks. Deeper trees spill to the heap.
pub(crate) const STACK_INLINE: usize = 32;

/// Explicit stack used by every tree walk in place of recursion, so walks over
/// degenerate (chain-shaped) trees never grow the call stack.
pub(crate) type Stack = SmallVec<[Handle; STACK_INLINE]>;

/// An in-order (ascending) walk over handles.
///
/// The stack holds the nodes whose key has not been yielded yet but whose
/// left subtree has been fully pushed: the top is always the next node.
#[derive(Clone, Debug, Default)]
pub(crate) struct InOrder {
    stack: Stack,
}

impl InOrder {
    /// A walk over the whole subtree rooted at `root`.
    pub(crate) fn new<K, V>(nodes: &Arena<Node<K, V>>, root: Option<Handle>) -> Self {
        let mut walk = Self::default();
        walk.push_left_spine(nodes, root);
        walk
    }

    /// A walk resuming from a stack prepared by the caller (see
    /// `RawBstMap::seek_lower`).
    pub(crate) const fn from_stack(stack: Stack) -> Self {
        Self { stack }
    }

    /// The handle `next` would return, without advancing.
    pub(crate) fn peek(&self) -> Option<Handle> {
        self.stack.last().copied()
    }

    /// Advances the walk, returning the next handle in ascending key order.
    pub(crate) fn next<K, V>(&mut self, nodes: &Arena<Node<K, V>>) -> Option<Handle> {
        let handle = self.stack.pop()?;
        self.push_left_spine(nodes, nodes.get(handle).right());
        Some(handle)
    }

    /// Ends the walk early.
    pub(crate) fn clear(&mut self) {
        self.stack.clear();
    }

    fn push_left_spine<K, V>(&mut self, nodes: &Arena<Node<K, V>>, mut current: Option<Handle>) {
        while let Some(h) = current {
            self.stack.push(h);
            current = nodes.get(h).left();
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::raw::node::Side;

    //     4
    //    / \
    //   2   6
    //  /   /
    // 1   5
    fn sample() -> (Arena<Node<i32, ()>>, Handle) {
        let mut nodes = Arena::new();
        let h4 = nodes.alloc(Node::leaf(4, ()));
        let h2 = nodes.alloc(Node::leaf(2, ()));
        let h6 = nodes.alloc(Node::leaf(6, ()));
        let h1 = nodes.alloc(Node::leaf(1, ()));
        let h5 = nodes.alloc(Node::leaf(5, ()));
        nodes.get_mut(h4).set_child(Side::Left, Some(h2));
        nodes.get_mut(h4).set_child(Side::Right, Some(h6));
        nodes.get_mut(h2).set_child(Side::Left, Some(h1));
        nodes.get_mut(h6).set_child(Side::Left, Some(h5));
        (nodes, h4)
    }

    #[test]
    fn walks_ascending() {
        let (nodes, root) = sample();
        let mut walk = InOrder::new(&nodes, Some(root));
        let mut keys = Vec::new();
        while let Some(h) = walk.next(&nodes) {
            keys.push(*nodes.get(h).key());
        }
        assert_eq!(keys, [1, 2, 4, 5, 6]);
    }

    #[test]
    fn peek_and_clear() {
        let (nodes, root) = sample();
        let mut walk = InOrder::new(&nodes, Some(root));
        let first = walk.peek();
        assert_eq!(walk.next(&nodes), first);
        walk.clear();
        assert_eq!(walk.peek(), None);
        assert_eq!(walk.next(&nodes), None);
    }

    #[test]
    fn empty_walk() {
        let nodes: Arena<Node<i32, ()>> = Arena::new();
        let mut walk = InOrder::new(&nodes, None);
        assert_eq!(walk.next(&nodes), None);
    }
}
