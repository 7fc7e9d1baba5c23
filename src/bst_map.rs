use core::borrow::Borrow;
use core::fmt;
use core::iter::FusedIterator;
use core::ops::Index;

use crate::comparator::{Comparator, NaturalOrder};
use crate::raw::{Arena, Handle, InOrder, Node, RawBstMap};

mod capacity;
mod diagnostics;
mod order_statistic;

/// An ordered map based on an unbalanced [binary search tree].
///
/// Keys are ordered by a [`Comparator`] chosen when the map is created. Maps
/// made with [`BstMap::new`] use [`NaturalOrder`], the key type's [`Ord`]
/// implementation; [`BstMap::with_comparator`] takes any other total order,
/// including a closure.
///
/// Every node holds one entry and two child links. New keys are attached
/// where their search ends, and the tree is never rebalanced, so its shape
/// depends entirely on the order of insertions and deletions. Lookups,
/// insertions and deletions take O(h), where h is the current
/// [`height`](BstMap::height): about log<sub>2</sub> n for keys inserted in
/// random order, but n - 1 for keys inserted in sorted order.
///
/// Iterators obtained from [`BstMap::iter`], [`BstMap::keys`],
/// [`BstMap::values`], [`BstMap::range`] and [`BstMap::into_iter`] produce
/// their items in ascending key order, as do [`BstMap::keys_range`],
/// [`BstMap::keys_le`] and [`BstMap::traverse_in_order`].
///
/// No tree walk recurses: all of them keep an explicit stack, so even a
/// degenerate tree of millions of nodes cannot overflow the call stack.
///
/// It is a logic error for a key to be modified in such a way that its
/// ordering relative to any other key, as determined by the comparator,
/// changes while it is in the map. The behavior resulting from such a logic
/// error is not specified, but will be encapsulated to the `BstMap` that
/// observed it and will not result in undefined behavior.
///
/// # Examples
///
/// ```
/// use bst_map::BstMap;
///
/// let mut grades = BstMap::new();
///
/// grades.put("Carol", 92);
/// grades.put("Alice", 100);
/// grades.put("Bob", 85);
///
/// assert_eq!(grades.get("Bob"), Some(&85));
/// assert_eq!(grades.len(), 3);
///
/// // Updating returns the previous value.
/// assert_eq!(grades.put("Bob", 88), Some(85));
///
/// // Order statistics.
/// assert_eq!(grades.min(), Some(&"Alice"));
/// assert_eq!(grades.rank("Carol"), 2);
/// assert_eq!(grades.floor("Bz"), Some(&"Bob"));
///
/// for (name, grade) in &grades {
///     println!("{name}: {grade}");
/// }
/// ```
///
/// A map with a custom order:
///
/// ```
/// use bst_map::BstMap;
///
/// let mut descending = BstMap::with_comparator(|a: &i32, b: &i32| b.cmp(a));
/// descending.put(1, "one");
/// descending.put(3, "three");
/// descending.put(2, "two");
///
/// let keys: Vec<_> = descending.keys().copied().collect();
/// assert_eq!(keys, [3, 2, 1]);
/// ```
///
/// [binary search tree]: https://en.wikipedia.org/wiki/Binary_search_tree
#[derive(Clone)]
pub struct BstMap<K, V, C = NaturalOrder> {
    raw: RawBstMap<K, V, C>,
}

/// An iterator over the entries of a `BstMap`, in ascending key order.
///
/// This `struct` is created by the [`iter`] method on [`BstMap`]. See its
/// documentation for more.
///
/// # Examples
///
/// ```
/// use bst_map::BstMap;
///
/// let map = BstMap::from([(2, "b"), (1, "a")]);
/// let mut iter = map.iter();
/// assert_eq!(iter.next(), Some((&1, &"a")));
/// assert_eq!(iter.next(), Some((&2, &"b")));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: BstMap::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    nodes: &'a Arena<Node<K, V>>,
    walk: InOrder,
    remaining: usize,
}

/// An iterator over the keys of a `BstMap`, in ascending order.
///
/// This `struct` is created by the [`keys`] method on [`BstMap`]. See its
/// documentation for more.
///
/// [`keys`]: BstMap::keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// An iterator over the values of a `BstMap`, in ascending key order.
///
/// This `struct` is created by the [`values`] method on [`BstMap`]. See its
/// documentation for more.
///
/// [`values`]: BstMap::values
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// An iterator over a sub-range of entries in a `BstMap`.
///
/// This `struct` is created by the [`range`] method on [`BstMap`]. See its
/// documentation for more.
///
/// [`range`]: BstMap::range
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Range<'a, K, V> {
    nodes: &'a Arena<Node<K, V>>,
    walk: InOrder,
    // The last node inside the range; the walk stops after yielding it.
    last: Option<Handle>,
}

/// An owning iterator over the entries of a `BstMap`, in ascending key order.
///
/// This `struct` is created by the [`into_iter`] method on [`BstMap`]
/// (provided by the [`IntoIterator`] trait) and by [`BstMap::drain`].
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<K, V> {
    inner: alloc::vec::IntoIter<(K, V)>,
}

impl<K, V> BstMap<K, V> {
    /// Makes a new, empty `BstMap` ordered by the keys' [`Ord`]
    /// implementation.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut map = BstMap::new();
    ///
    /// // entries can now be inserted into the empty map
    /// map.put(1, "a");
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<K, V, C> BstMap<K, V, C> {
    /// Makes a new, empty `BstMap` ordered by `cmp`.
    ///
    /// The comparator is fixed for the lifetime of the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut map = BstMap::with_comparator(|a: &String, b: &String| {
    ///     a.to_lowercase().cmp(&b.to_lowercase())
    /// });
    /// map.put("Apple".to_string(), 1);
    /// assert_eq!(map.put("APPLE".to_string(), 2), Some(1));
    /// assert_eq!(map.len(), 1);
    /// ```
    #[must_use]
    pub const fn with_comparator(cmp: C) -> Self {
        BstMap {
            raw: RawBstMap::new(cmp),
        }
    }

    /// Returns a reference to the comparator ordering this map.
    #[must_use]
    pub const fn comparator(&self) -> &C {
        self.raw.comparator()
    }

    /// Clears the map, dropping every key and value.
    ///
    /// The comparator is kept. To take the entries out instead of dropping
    /// them, use [`drain`](BstMap::drain).
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
    /// let mut a = BstMap::new();
    /// a.put(1, "a");
    /// a.clear();
    /// assert!(a.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Empties the map, returning all entries in ascending key order.
    ///
    /// Unlike [`clear`](BstMap::clear), no key or value is dropped: ownership
    /// passes to the returned iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut map = BstMap::from([(2, 'b'), (1, 'a')]);
    /// let entries: Vec<_> = map.drain().collect();
    /// assert_eq!(entries, [(1, 'a'), (2, 'b')]);
    /// assert!(map.is_empty());
    /// ```
    pub fn drain(&mut self) -> IntoIter<K, V> {
        IntoIter {
            inner: self.raw.drain_to_vec().into_iter(),
        }
    }

    /// Returns the number of entries in the map.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut a = BstMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.put(1, "a");
    /// assert_eq!(a.len(), 1);
    /// ```
    #[doc(alias = "size")]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut a = BstMap::new();
    /// assert!(a.is_empty());
    /// a.put(1, "a");
    /// assert!(!a.is_empty());
    /// ```
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Gets an iterator over the entries of the map, in ascending key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.put(3, "c");
    /// map.put(2, "b");
    /// map.put(1, "a");
    ///
    /// for (key, value) in map.iter() {
    ///     println!("{key}: {value}");
    /// }
    ///
    /// let (first_key, first_value) = map.iter().next().unwrap();
    /// assert_eq!((*first_key, *first_value), (1, "a"));
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            nodes: self.raw.nodes(),
            walk: InOrder::new(self.raw.nodes(), self.raw.root()),
            remaining: self.raw.len(),
        }
    }

    /// Gets an iterator over the keys of the map, in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut a = BstMap::new();
    /// a.put(2, "b");
    /// a.put(1, "a");
    ///
    /// let keys: Vec<_> = a.keys().cloned().collect();
    /// assert_eq!(keys, [1, 2]);
    /// ```
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values of the map, in ascending key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut a = BstMap::new();
    /// a.put(1, "hello");
    /// a.put(2, "goodbye");
    ///
    /// let values: Vec<&str> = a.values().cloned().collect();
    /// assert_eq!(values, ["hello", "goodbye"]);
    /// ```
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the map's key type, as long as the
    /// comparator can order it.
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
    /// map.put(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.raw.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.put(1, "a");
    /// if let Some(x) = map.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map[&1], "b");
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.raw.get_mut(key)
    }

    /// Returns the stored key and its value for the supplied key.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.put(String::from("a"), 1);
    /// assert_eq!(map.get_key_value("a"), Some((&String::from("a"), &1)));
    /// assert_eq!(map.get_key_value("b"), None);
    /// ```
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.raw.get_key_value(key)
    }

    /// Returns `true` if the map contains a value for the specified key.
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
    /// map.put(1, "a");
    /// assert!(map.contains(&1));
    /// assert!(!map.contains(&2));
    /// ```
    #[doc(alias = "contains_key")]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.raw.contains_key(key)
    }

    /// Removes a key from the map, returning the stored key and value if the
    /// key was present. Removing an absent key leaves the map unchanged.
    ///
    /// A node with two children is not removed itself: its in-order
    /// predecessor takes over its position (Hibbard deletion). No rebalancing
    /// follows, and long runs of deletions tend to leave left subtrees
    /// shallower than right ones.
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
    /// map.put(1, "a");
    /// assert_eq!(map.delete(&1), Some((1, "a")));
    /// assert_eq!(map.delete(&1), None);
    /// ```
    #[doc(alias = "remove_entry")]
    pub fn delete<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.raw.delete(key)
    }

    /// Removes a key from the map, returning its value if the key was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.put(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.delete(key).map(|(_, v)| v)
    }
}

impl<K, V, C: Comparator<K>> BstMap<K, V, C> {
    /// Inserts a key-value pair, or updates the value of an existing key.
    ///
    /// If the map did not have this key present, a new node is attached where
    /// the search for it ended and `None` is returned.
    ///
    /// If the map did have this key present, the value is replaced and the
    /// old value is returned. The stored key is not replaced; this matters
    /// for keys that compare equal without being identical.
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
    /// assert_eq!(map.put(37, "a"), None);
    /// assert!(!map.is_empty());
    ///
    /// map.put(37, "b");
    /// assert_eq!(map.put(37, "c"), Some("b"));
    /// assert_eq!(map[&37], "c");
    /// ```
    #[doc(alias = "insert_or_update")]
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        self.raw.put(key, value)
    }

    /// Inserts a key-value pair only if the key is absent.
    ///
    /// If the key is already present the map is left untouched and the
    /// rejected key and value are handed back in `Err`.
    ///
    /// # Complexity
    ///
    /// O(h)
    ///
    /// # Errors
    ///
    /// Returns `Err((key, value))` if the map already contains `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// assert_eq!(map.insert(1, "a"), Ok(()));
    /// assert_eq!(map.insert(1, "b"), Err((1, "b")));
    /// assert_eq!(map[&1], "a");
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Result<(), (K, V)> {
        self.raw.insert(key, value)
    }
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            nodes: self.nodes,
            walk: self.walk.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let h = self.walk.next(self.nodes)?;
        self.remaining -= 1;
        Some(self.nodes.get(h).entry())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K: fmt::Debug, V> fmt::Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V: fmt::Debug> fmt::Debug for Values<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<K, V> Clone for Range<'_, K, V> {
    fn clone(&self) -> Self {
        Range {
            nodes: self.nodes,
            walk: self.walk.clone(),
            last: self.last,
        }
    }
}

impl<'a, K, V> Iterator for Range<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let h = self.walk.next(self.nodes)?;
        if Some(h) == self.last {
            self.walk.clear();
        }
        Some(self.nodes.get(h).entry())
    }
}

impl<K, V> FusedIterator for Range<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Range<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for BstMap<K, V, C> {
    /// Maps are equal when they hold equal entries in the same order. The
    /// comparators and the tree shapes are not compared.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, C> Eq for BstMap<K, V, C> {}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for BstMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C: Default> Default for BstMap<K, V, C> {
    fn default() -> Self {
        BstMap::with_comparator(C::default())
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for BstMap<K, V> {
    /// Builds a map with [`put`](BstMap::put) semantics: a later duplicate
    /// key replaces the earlier value.
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = BstMap::new();
        map.extend(iter);
        map
    }
}

impl<K, V, C: Comparator<K>> Extend<(K, V)> for BstMap<K, V, C> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for BstMap<K, V> {
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, K, V, C> IntoIterator for &'a BstMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<K, V, C> IntoIterator for BstMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Gets an owning iterator over the entries of the map, in ascending key
    /// order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let map = BstMap::from([(2, "b"), (1, "a")]);
    /// let mut iter = map.into_iter();
    /// assert_eq!(iter.next(), Some((1, "a")));
    /// assert_eq!(iter.next_back(), Some((2, "b")));
    /// ```
    fn into_iter(mut self) -> IntoIter<K, V> {
        self.drain()
    }
}

impl<K, Q, V, C> Index<&Q> for BstMap<K, V, C>
where
    K: Borrow<Q>,
    Q: ?Sized,
    C: Comparator<Q>,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}
