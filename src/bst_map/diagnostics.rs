use core::borrow::Borrow;
use core::ops::Bound;

use super::BstMap;
use crate::comparator::Comparator;

impl<K, V, C> BstMap<K, V, C> {
    /// Calls `visit` with every entry, in ascending key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let map = BstMap::from([(3, "c"), (1, "a"), (2, "b")]);
    /// let mut seen = Vec::new();
    /// map.traverse_in_order(|k, v| seen.push((*k, *v)));
    /// assert_eq!(seen, [(1, "a"), (2, "b"), (3, "c")]);
    /// ```
    pub fn traverse_in_order<F>(&self, mut visit: F)
    where
        F: FnMut(&K, &V),
    {
        for (k, v) in self {
            visit(k, v);
        }
    }

    /// Calls `visit` with every entry, in ascending key order, allowing the
    /// values to be modified.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut map = BstMap::from([(1, 10), (2, 20)]);
    /// map.traverse_in_order_mut(|_, v| *v += 1);
    /// assert_eq!(map.values().copied().collect::<Vec<_>>(), [11, 21]);
    /// ```
    pub fn traverse_in_order_mut<F>(&mut self, visit: F)
    where
        F: FnMut(&K, &mut V),
    {
        self.raw.for_each_mut(visit);
    }

    /// Returns the number of edges on the longest path from the root down to
    /// a leaf.
    ///
    /// Both an empty map and a map with a single entry have height 0. Keys
    /// inserted in sorted order produce a chain of height `len() - 1`.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let balanced: BstMap<i32, ()> = [2, 1, 3].into_iter().map(|k| (k, ())).collect();
    /// assert_eq!(balanced.height(), 1);
    ///
    /// let chain: BstMap<i32, ()> = [1, 2, 3].into_iter().map(|k| (k, ())).collect();
    /// assert_eq!(chain.height(), 2);
    /// ```
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Returns the number of entries in the subtree rooted at `key`'s node,
    /// counting that node itself, or 0 if `key` is absent.
    ///
    /// # Complexity
    ///
    /// O(h + size of the subtree)
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let map: BstMap<i32, ()> = [5, 3, 8, 1, 4].into_iter().map(|k| (k, ())).collect();
    /// assert_eq!(map.subtree_size(&5), 5);
    /// assert_eq!(map.subtree_size(&3), 3);
    /// assert_eq!(map.subtree_size(&8), 1);
    /// assert_eq!(map.subtree_size(&6), 0);
    /// ```
    #[must_use]
    pub fn subtree_size<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.raw.subtree_size(key)
    }

    /// Returns the stored key, its value, and the depth of its node: the
    /// number of edges from the root, so the root is at depth 0.
    ///
    /// # Complexity
    ///
    /// O(h)
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let map = BstMap::from([(5, "e"), (3, "c"), (1, "a")]);
    /// assert_eq!(map.get_with_depth(&5), Some((&5, &"e", 0)));
    /// assert_eq!(map.get_with_depth(&1), Some((&1, &"a", 2)));
    /// assert_eq!(map.get_with_depth(&2), None);
    /// ```
    pub fn get_with_depth<Q>(&self, key: &Q) -> Option<(&K, &V, usize)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.raw.find_with_depth(key).map(|(h, depth)| {
            let (k, v) = self.raw.node(h).entry();
            (k, v, depth)
        })
    }

    /// Checks the binary-search-tree ordering of every node: each key is
    /// strictly greater than every key in its left subtree and strictly less
    /// than every key in its right subtree.
    ///
    /// A map only ever fails this check if its comparator is not a consistent
    /// total order. An empty map is always valid.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let map = BstMap::from([(2, ()), (1, ()), (3, ())]);
    /// assert!(map.is_valid_bst());
    /// ```
    #[must_use]
    pub fn is_valid_bst(&self) -> bool
    where
        C: Comparator<K>,
    {
        self.raw.is_valid_within::<K>(Bound::Unbounded, Bound::Unbounded)
    }

    /// Like [`is_valid_bst`](BstMap::is_valid_bst), but additionally requires
    /// every key to lie within `min..=max`.
    ///
    /// The bounds given here are inclusive. The bounds each node's key
    /// imposes on its subtrees are exclusive, so a key equal to an ancestor's
    /// key is a violation. An empty map is always valid, whatever the bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let map = BstMap::from([(2, ()), (1, ()), (3, ())]);
    /// assert!(map.is_valid_bst_within(&1, &3));
    /// assert!(!map.is_valid_bst_within(&2, &3));
    /// ```
    #[must_use]
    pub fn is_valid_bst_within<Q>(&self, min: &Q, max: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.raw.is_valid_within(Bound::Included(min), Bound::Included(max))
    }
}
