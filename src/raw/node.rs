use super::handle::Handle;

/// Which child link of a node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

/// Where a subtree hangs: either the tree's root link or one child link of a
/// parent node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Link {
    Root,
    Child(Handle, Side),
}

/// A single tree node: one entry and two owned child links.
#[derive(Clone)]
pub(crate) struct Node<K, V> {
    key: K,
    value: V,
    left: Option<Handle>,
    right: Option<Handle>,
}

impl<K, V> Node<K, V> {
    /// Creates a leaf holding `key` and `value`.
    pub(crate) const fn leaf(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub(crate) const fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub(crate) const fn value(&self) -> &V {
        &self.value
    }

    #[inline]
    pub(crate) fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    #[inline]
    pub(crate) const fn entry(&self) -> (&K, &V) {
        (&self.key, &self.value)
    }

    #[inline]
    pub(crate) fn entry_mut(&mut self) -> (&K, &mut V) {
        (&self.key, &mut self.value)
    }

    #[inline]
    pub(crate) const fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) const fn right(&self) -> Option<Handle> {
        self.right
    }

    #[inline]
    pub(crate) const fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    pub(crate) fn set_child(&mut self, side: Side, child: Option<Handle>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    /// The only child, if the node has at most one. `Err` if it has two.
    pub(crate) const fn sole_child(&self) -> Result<Option<Handle>, (Handle, Handle)> {
        match (self.left, self.right) {
            (Some(l), Some(r)) => Err((l, r)),
            (Some(c), None) | (None, Some(c)) => Ok(Some(c)),
            (None, None) => Ok(None),
        }
    }

    /// Replaces the stored value, returning the previous one. The key is kept.
    pub(crate) fn replace_value(&mut self, value: V) -> V {
        core::mem::replace(&mut self.value, value)
    }

    /// Replaces both key and value, returning the previous pair. Links are kept.
    pub(crate) fn replace_entry(&mut self, key: K, value: V) -> (K, V) {
        let key = core::mem::replace(&mut self.key, key);
        let value = core::mem::replace(&mut self.value, value);
        (key, value)
    }

    pub(crate) fn into_entry(self) -> (K, V) {
        (self.key, self.value)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn new_node_is_leaf() {
        let node = Node::leaf(1, "a");
        assert_eq!(node.entry(), (&1, &"a"));
        assert_eq!(node.sole_child(), Ok(None));
    }

    #[test]
    fn child_links() {
        let l = Handle::from_index(1);
        let r = Handle::from_index(2);
        let mut node = Node::leaf(5, ());

        node.set_child(Side::Left, Some(l));
        assert_eq!(node.left(), Some(l));
        assert_eq!(node.child(Side::Left), Some(l));
        assert_eq!(node.sole_child(), Ok(Some(l)));

        node.set_child(Side::Right, Some(r));
        assert_eq!(node.right(), Some(r));
        assert_eq!(node.sole_child(), Err((l, r)));

        node.set_child(Side::Left, None);
        assert_eq!(node.sole_child(), Ok(Some(r)));
    }

    #[test]
    fn replacing_entries_keeps_links() {
        let r = Handle::from_index(0);
        let mut node = Node::leaf(3, 30);
        node.set_child(Side::Right, Some(r));

        assert_eq!(node.replace_value(31), 30);
        assert_eq!(node.entry(), (&3, &31));

        assert_eq!(node.replace_entry(2, 20), (3, 31));
        assert_eq!(node.right(), Some(r));
        assert_eq!(node.into_entry(), (2, 20));
    }
}
