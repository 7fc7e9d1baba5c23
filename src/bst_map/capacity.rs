use super::BstMap;
use crate::comparator::{Comparator, NaturalOrder};
use crate::error::TryInsertError;
use crate::raw::RawBstMap;

impl<K, V> BstMap<K, V> {
    /// Creates an empty map with room for at least `capacity` entries,
    /// ordered by the keys' [`Ord`] implementation.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let map: BstMap<i32, i32> = BstMap::with_capacity(32);
    /// assert!(map.is_empty());
    /// assert!(map.capacity() >= 32);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, NaturalOrder)
    }
}

impl<K, V, C> BstMap<K, V, C> {
    /// Creates an empty map with room for at least `capacity` entries,
    /// ordered by `cmp`.
    #[must_use]
    pub fn with_capacity_and_comparator(capacity: usize, cmp: C) -> Self {
        BstMap {
            raw: RawBstMap::with_capacity(capacity, cmp),
        }
    }

    /// Returns the number of entries the map can hold without reallocating
    /// its node storage.
    ///
    /// Storage freed by deletions is reused before the map grows.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}

impl<K, V, C: Comparator<K>> BstMap<K, V, C> {
    /// Like [`put`](BstMap::put), but reports allocation failure instead of
    /// aborting.
    ///
    /// Updating an existing key never allocates and always succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`TryInsertError`] if a new node is needed and cannot be
    /// allocated. The map is unchanged and the error carries `key` and
    /// `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// assert_eq!(map.try_put(1, "a").ok(), Some(None));
    /// assert_eq!(map.try_put(1, "b").ok(), Some(Some("a")));
    /// ```
    pub fn try_put(&mut self, key: K, value: V) -> Result<Option<V>, TryInsertError<K, V>> {
        self.raw.try_put(key, value)
    }

    /// Like [`insert`](BstMap::insert), but reports allocation failure
    /// instead of aborting.
    ///
    /// The outer `Result` reports allocation; the inner one is the result of
    /// [`insert`](BstMap::insert): `Err((key, value))` when the key was
    /// already present.
    ///
    /// # Errors
    ///
    /// Returns [`TryInsertError`] if a new node cannot be allocated. The map
    /// is unchanged and the error carries `key` and `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// assert!(matches!(map.try_insert(1, "a"), Ok(Ok(()))));
    /// assert!(matches!(map.try_insert(1, "b"), Ok(Err((1, "b")))));
    /// ```
    #[allow(clippy::type_complexity)]
    pub fn try_insert(&mut self, key: K, value: V) -> Result<Result<(), (K, V)>, TryInsertError<K, V>> {
        self.raw.try_insert(key, value)
    }
}
