//! An ordered map backed by an unbalanced binary search tree.
//!
//! This crate provides [`BstMap`], a key-value map kept in order by a
//! caller-supplied [`Comparator`], with the classic binary-search-tree
//! operations and order statistics on top of the usual map API:
//!
//! - [`min`](BstMap::min) / [`max`](BstMap::max) and
//!   [`delete_min`](BstMap::delete_min) / [`delete_max`](BstMap::delete_max)
//! - [`floor`](BstMap::floor) / [`ceiling`](BstMap::ceiling) - nearest key at or below / above
//! - [`predecessor`](BstMap::predecessor) / [`successor`](BstMap::successor) - nearest key strictly below / above
//! - [`rank`](BstMap::rank) - number of keys below a given key
//! - [`keys_range`](BstMap::keys_range), [`keys_le`](BstMap::keys_le) and [`range`](BstMap::range)
//! - [`height`](BstMap::height), [`subtree_size`](BstMap::subtree_size),
//!   [`get_with_depth`](BstMap::get_with_depth) and [`is_valid_bst`](BstMap::is_valid_bst)
//!   for inspecting the tree's shape
//!
//! # Example
//!
//! ```
//! use bst_map::BstMap;
//!
//! let mut map = BstMap::new();
//! for key in [5, 3, 8, 1, 4, 7, 9] {
//!     map.insert(key, key * 10).unwrap();
//! }
//!
//! assert_eq!(map.min(), Some(&1));
//! assert_eq!(map.max(), Some(&9));
//! assert_eq!(map.height(), 2);
//! assert_eq!(map.floor(&6), Some(&5));
//! assert_eq!(map.ceiling(&6), Some(&7));
//! assert_eq!(map.rank(&7), 4);
//!
//! assert_eq!(map.delete(&5), Some((5, 50)));
//! assert_eq!(map.get(&5), None);
//! // The in-order predecessor took the deleted root's place.
//! assert_eq!(map.get_with_depth(&4), Some((&4, &40, 0)));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Any total order** - Keys are compared only through a [`Comparator`]; closures work
//! - **No `unsafe`** - Nodes live in an arena and refer to their children by handle
//! - **No recursion** - Every tree walk uses an explicit stack, so degenerate trees cannot
//!   overflow the call stack
//! - **Fallible insertion** - [`try_put`](BstMap::try_put) and [`try_insert`](BstMap::try_insert)
//!   report allocation failure as a [`TryInsertError`]
//!
//! # Implementation
//!
//! The tree is never rebalanced. Its height, and with it the cost of most operations,
//! depends on insertion order: random keys give a height near log<sub>2</sub> n, sorted
//! keys give a chain of height n - 1. Deletion of a node with two children uses Hibbard's
//! method, moving the in-order predecessor into its place. No subtree sizes are cached,
//! so [`rank`](BstMap::rank) is O(n).
//!
//! The map is not internally synchronized. Shared access across threads follows the
//! usual `Send`/`Sync` rules, and the borrow checker rules out mutation during traversal.

#![no_std]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod comparator;
mod error;
mod raw;

pub mod bst_map;

pub use bst_map::BstMap;
pub use comparator::{Comparator, NaturalOrder};
pub use error::TryInsertError;
