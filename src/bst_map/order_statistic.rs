use core::borrow::Borrow;
use core::ops::{Bound, RangeBounds};

use alloc::vec::Vec;

use super::{BstMap, Range};
use crate::comparator::Comparator;
use crate::raw::InOrder;

impl<K, V, C> BstMap<K, V, C> {
    /// Returns the smallest key in the map, or `None` if it is empty.
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
    /// let mut map = BstMap::new();
    /// assert_eq!(map.min(), None);
    /// map.put(2, "b");
    /// map.put(1, "a");
    /// assert_eq!(map.min(), Some(&1));
    /// ```
    #[must_use]
    pub fn min(&self) -> Option<&K> {
        self.first_key_value().map(|(k, _)| k)
    }

    /// Returns the largest key in the map, or `None` if it is empty.
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
    /// let mut map = BstMap::new();
    /// assert_eq!(map.max(), None);
    /// map.put(1, "a");
    /// map.put(2, "b");
    /// assert_eq!(map.max(), Some(&2));
    /// ```
    #[must_use]
    pub fn max(&self) -> Option<&K> {
        self.last_key_value().map(|(k, _)| k)
    }

    /// Returns the entry with the smallest key.
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.raw.first().map(|h| self.raw.node(h).entry())
    }

    /// Returns the entry with the largest key.
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.raw.last().map(|h| self.raw.node(h).entry())
    }

    /// Removes and returns the entry with the smallest key.
    ///
    /// The leftmost node has no left child, so its right subtree simply
    /// takes its place.
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
    /// let mut map = BstMap::from([(1, "a"), (2, "b")]);
    /// while let Some((key, _)) = map.delete_min() {
    ///     assert!(map.keys().all(|k| *k > key));
    /// }
    /// assert!(map.is_empty());
    /// ```
    #[doc(alias = "pop_first")]
    pub fn delete_min(&mut self) -> Option<(K, V)> {
        self.raw.delete_first()
    }

    /// Removes and returns the entry with the largest key.
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
    /// let mut map = BstMap::from([(1, "a"), (2, "b")]);
    /// assert_eq!(map.delete_max(), Some((2, "b")));
    /// assert_eq!(map.max(), Some(&1));
    /// ```
    #[doc(alias = "pop_last")]
    pub fn delete_max(&mut self) -> Option<(K, V)> {
        self.raw.delete_last()
    }

    /// Returns the largest key less than or equal to `key`.
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
    /// let map = BstMap::from([(10, ()), (20, ()), (30, ())]);
    /// assert_eq!(map.floor(&25), Some(&20));
    /// assert_eq!(map.floor(&20), Some(&20));
    /// assert_eq!(map.floor(&5), None);
    /// ```
    pub fn floor<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.raw.floor(key).map(|h| self.raw.node(h).key())
    }

    /// Returns the smallest key greater than or equal to `key`.
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
    /// let map = BstMap::from([(10, ()), (20, ()), (30, ())]);
    /// assert_eq!(map.ceiling(&25), Some(&30));
    /// assert_eq!(map.ceiling(&20), Some(&20));
    /// assert_eq!(map.ceiling(&35), None);
    /// ```
    pub fn ceiling<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.raw.ceiling(key).map(|h| self.raw.node(h).key())
    }

    /// Returns the largest key strictly less than `key`. `key` itself need
    /// not be in the map.
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
    /// let map = BstMap::from([(10, ()), (20, ()), (30, ())]);
    /// assert_eq!(map.predecessor(&20), Some(&10));
    /// assert_eq!(map.predecessor(&25), Some(&20));
    /// assert_eq!(map.predecessor(&10), None);
    /// ```
    pub fn predecessor<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.raw.predecessor(key).map(|h| self.raw.node(h).key())
    }

    /// Returns the smallest key strictly greater than `key`. `key` itself
    /// need not be in the map.
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
    /// let map = BstMap::from([(10, ()), (20, ()), (30, ())]);
    /// assert_eq!(map.successor(&20), Some(&30));
    /// assert_eq!(map.successor(&5), Some(&10));
    /// assert_eq!(map.successor(&30), None);
    /// ```
    pub fn successor<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.raw.successor(key).map(|h| self.raw.node(h).key())
    }

    /// Returns the number of keys strictly less than `key`. `key` itself need
    /// not be in the map.
    ///
    /// For a key in the map this is its zero-based position in ascending
    /// order.
    ///
    /// # Complexity
    ///
    /// O(n). Nodes do not cache subtree sizes, so every key below `key` is
    /// visited.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let map = BstMap::from([(10, ()), (20, ()), (30, ())]);
    /// assert_eq!(map.rank(&10), 0);
    /// assert_eq!(map.rank(&25), 2);
    /// assert_eq!(map.rank(&99), 3);
    /// ```
    #[must_use]
    pub fn rank<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.raw.rank(key)
    }

    /// Constructs an iterator over a sub-range of entries, in ascending key
    /// order.
    ///
    /// The simplest way is to use the range syntax `min..max`, thus
    /// `range(min..max)` will yield entries from `min` (inclusive) to `max`
    /// (exclusive). The range may also be entered as `(Bound<T>, Bound<T>)`,
    /// so for example `range((Excluded(4), Included(10)))` will yield a
    /// left-exclusive, right-inclusive range from 4 to 10.
    ///
    /// A range whose start lies after its end is empty.
    ///
    /// # Complexity
    ///
    /// O(h) to position the iterator, then amortized O(1) per entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    /// use std::ops::Bound::Included;
    ///
    /// let mut map = BstMap::new();
    /// map.put(3, "a");
    /// map.put(5, "b");
    /// map.put(8, "c");
    /// for (&key, &value) in map.range((Included(&4), Included(&8))) {
    ///     println!("{key}: {value}");
    /// }
    /// assert_eq!(Some((&5, &"b")), map.range(4..).next());
    /// ```
    pub fn range<T, R>(&self, range: R) -> Range<'_, K, V>
    where
        T: ?Sized,
        K: Borrow<T>,
        R: RangeBounds<T>,
        C: Comparator<T>,
    {
        let (walk, last) = match self.raw.range_walk(range.start_bound(), range.end_bound()) {
            Some((walk, last)) => (walk, Some(last)),
            None => (InOrder::default(), None),
        };
        Range {
            nodes: self.raw.nodes(),
            walk,
            last,
        }
    }

    /// Returns every key `k` with `low <= k <= high`, in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let map: BstMap<i32, ()> = [5, 3, 8, 1, 4, 7, 9].into_iter().map(|k| (k, ())).collect();
    /// assert_eq!(map.keys_range(&3, &7), [&3, &4, &5, &7]);
    /// assert!(map.keys_range(&7, &3).is_empty());
    /// ```
    #[must_use]
    pub fn keys_range<Q>(&self, low: &Q, high: &Q) -> Vec<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.range::<Q, _>((Bound::Included(low), Bound::Included(high))).map(|(k, _)| k).collect()
    }

    /// Returns every key less than or equal to `key`, in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let map: BstMap<i32, ()> = [5, 3, 8, 1, 4, 7, 9].into_iter().map(|k| (k, ())).collect();
    /// assert_eq!(map.keys_le(&6), [&1, &3, &4, &5]);
    /// assert!(map.keys_le(&0).is_empty());
    /// ```
    #[must_use]
    pub fn keys_le<Q>(&self, key: &Q) -> Vec<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.range::<Q, _>((Bound::Unbounded, Bound::Included(key))).map(|(k, _)| k).collect()
    }
}
