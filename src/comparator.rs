use core::cmp::Ordering;

/// A total order over `T`, fixed for the lifetime of a map.
///
/// The map never inspects keys except through its comparator, so any
/// deterministic total order works: reversed orders, case-insensitive string
/// orders, orders over a single field of a record, and so on.
///
/// Closures and function pointers of type `Fn(&T, &T) -> Ordering` implement
/// this trait directly.
///
/// It is a logic error for a comparator to be inconsistent (for example, to
/// report `a < b` and `b < a`), or for its answers to change while keys are in
/// a map. The resulting behavior is unspecified but memory safe: lookups may
/// miss, and [`is_valid_bst`] may report `false`.
///
/// # Examples
///
/// ```
/// use core::cmp::Ordering;
/// use bst_map::{BstMap, Comparator};
///
/// struct ByLength;
///
/// impl Comparator<&str> for ByLength {
///     fn compare(&self, a: &&str, b: &&str) -> Ordering {
///         a.len().cmp(&b.len())
///     }
/// }
///
/// let mut map = BstMap::with_comparator(ByLength);
/// map.put("three", 3);
/// map.put("one", 1);
/// assert_eq!(map.min(), Some(&"one"));
/// assert_eq!(map.get(&"six"), Some(&1)); // same length as "one"
/// ```
///
/// [`is_valid_bst`]: crate::BstMap::is_valid_bst
pub trait Comparator<T: ?Sized> {
    /// Compares `a` with `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// The comparator used by [`BstMap::new`](crate::BstMap::new): the key
/// type's own [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct NaturalOrder;

impl<T: ?Sized + Ord> Comparator<T> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}
