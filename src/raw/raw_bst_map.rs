use core::borrow::Borrow;
use core::cmp::Ordering;
use core::ops::Bound;

use alloc::vec::Vec;
use smallvec::SmallVec;

use super::arena::{AllocError, Arena};
use super::handle::Handle;
use super::in_order::{InOrder, STACK_INLINE, Stack};
use super::node::{Link, Node, Side};
use crate::comparator::Comparator;
use crate::error::TryInsertError;

/// The unbalanced binary search tree backing `BstMap`.
///
/// Nodes live in an arena and name their children by handle. No subtree sizes
/// or heights are cached; nothing is ever rotated.
#[derive(Clone)]
pub(crate) struct RawBstMap<K, V, C> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<K, V>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// The key order, fixed at construction.
    cmp: C,
}

impl<K, V, C> RawBstMap<K, V, C> {
    /// Creates a new, empty tree ordered by `cmp`.
    pub(crate) const fn new(cmp: C) -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            cmp,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize, cmp: C) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            cmp,
        }
    }

    /// Returns the number of nodes in the tree.
    pub(crate) const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree has no root.
    pub(crate) const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) const fn comparator(&self) -> &C {
        &self.cmp
    }

    pub(crate) const fn root(&self) -> Option<Handle> {
        self.root
    }

    pub(crate) const fn nodes(&self) -> &Arena<Node<K, V>> {
        &self.nodes
    }

    /// Returns a reference to a node by handle.
    pub(crate) fn node(&self, handle: Handle) -> &Node<K, V> {
        self.nodes.get(handle)
    }

    /// Drops every node along with its key and value. The comparator is kept.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Empties the tree, returning every entry in ascending key order.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<(K, V)> {
        let mut result = Vec::with_capacity(self.len());
        let mut walk = InOrder::new(&self.nodes, self.root.take());

        // `next` reads the right link of the node it returns, so a node may be
        // taken out of the arena as soon as it has been returned.
        while let Some(h) = walk.next(&self.nodes) {
            result.push(self.nodes.take(h).into_entry());
        }

        self.nodes.clear();
        result
    }

    /// Points `link` at `child`.
    fn set_link(&mut self, link: Link, child: Option<Handle>) {
        match link {
            Link::Root => self.root = child,
            Link::Child(parent, side) => self.nodes.get_mut(parent).set_child(side, child),
        }
    }

    /// Follows `side` links from `start` until the link is absent. Returns the
    /// last node reached and the link that points at it.
    fn extreme_from(&self, mut link: Link, mut current: Handle, side: Side) -> (Link, Handle) {
        while let Some(next) = self.nodes.get(current).child(side) {
            link = Link::Child(current, side);
            current = next;
        }
        (link, current)
    }

    /// Handle of the leftmost (minimum) node.
    pub(crate) fn first(&self) -> Option<Handle> {
        let root = self.root?;
        Some(self.extreme_from(Link::Root, root, Side::Left).1)
    }

    /// Handle of the rightmost (maximum) node.
    pub(crate) fn last(&self) -> Option<Handle> {
        let root = self.root?;
        Some(self.extreme_from(Link::Root, root, Side::Right).1)
    }

    /// Unlinks the leftmost node and returns its entry.
    pub(crate) fn delete_first(&mut self) -> Option<(K, V)> {
        self.delete_extreme(Side::Left)
    }

    /// Unlinks the rightmost node and returns its entry.
    pub(crate) fn delete_last(&mut self) -> Option<(K, V)> {
        self.delete_extreme(Side::Right)
    }

    fn delete_extreme(&mut self, side: Side) -> Option<(K, V)> {
        let root = self.root?;
        let (link, target) = self.extreme_from(Link::Root, root, side);
        let node = self.nodes.take(target);
        // The extreme node has no child on `side`; its other child takes its place.
        let other = match side {
            Side::Left => node.right(),
            Side::Right => node.left(),
        };
        self.set_link(link, other);
        Some(node.into_entry())
    }

    /// Removes the node at `target`, which hangs from `link`.
    ///
    /// A node with two children is not unlinked itself: its in-order
    /// predecessor (the maximum of its left subtree) is unlinked instead and
    /// that entry moves into `target` (Hibbard deletion). Repeated deletions
    /// therefore tend to shrink left subtrees relative to right ones.
    fn unlink(&mut self, link: Link, target: Handle) -> (K, V) {
        match self.nodes.get(target).sole_child() {
            Ok(child) => {
                self.set_link(link, child);
                self.nodes.take(target).into_entry()
            }
            Err((left, _)) => {
                let (pred_link, pred) = self.extreme_from(Link::Child(target, Side::Left), left, Side::Right);
                let pred_node = self.nodes.take(pred);
                self.set_link(pred_link, pred_node.left());
                let (key, value) = pred_node.into_entry();
                self.nodes.get_mut(target).replace_entry(key, value)
            }
        }
    }

    /// Calls `f` on every entry in ascending key order, with mutable access to
    /// the values.
    pub(crate) fn for_each_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V),
    {
        let mut walk = InOrder::new(&self.nodes, self.root);
        while let Some(h) = walk.next(&self.nodes) {
            let (key, value) = self.nodes.get_mut(h).entry_mut();
            f(key, value);
        }
    }

    /// Longest root-to-leaf path, in edges. Zero for an empty tree and for a
    /// single node.
    pub(crate) fn height(&self) -> usize {
        let Some(root) = self.root else {
            return 0;
        };

        let mut height = 0;
        let mut stack: SmallVec<[(Handle, usize); STACK_INLINE]> = SmallVec::new();
        stack.push((root, 0));
        while let Some((h, depth)) = stack.pop() {
            let node = self.nodes.get(h);
            height = height.max(depth);
            stack.extend([node.left(), node.right()].into_iter().flatten().map(|c| (c, depth + 1)));
        }
        height
    }

    /// Number of nodes in the subtree rooted at `root`.
    pub(crate) fn count_from(&self, root: Handle) -> usize {
        let mut count = 0;
        let mut stack = Stack::new();
        stack.push(root);
        while let Some(h) = stack.pop() {
            let node = self.nodes.get(h);
            count += 1;
            stack.extend([node.left(), node.right()].into_iter().flatten());
        }
        count
    }

    /// Descends towards `key`. Returns the link where the search ended and the
    /// node found there, if any. When the key is absent the link is the empty
    /// slot a new node for `key` belongs in.
    fn search<Q>(&self, key: &Q) -> (Link, Option<Handle>)
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let mut link = Link::Root;
        let mut current = self.root;
        while let Some(h) = current {
            let node = self.nodes.get(h);
            let side = match self.cmp.compare(key, node.key().borrow()) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return (link, Some(h)),
            };
            link = Link::Child(h, side);
            current = node.child(side);
        }
        (link, None)
    }

    /// Handle of the node whose key equals `key`.
    pub(crate) fn find<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.search(key).1
    }

    /// Handle of the node whose key equals `key`, and its depth in edges.
    pub(crate) fn find_with_depth<Q>(&self, key: &Q) -> Option<(Handle, usize)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let mut depth = 0;
        let mut current = self.root;
        while let Some(h) = current {
            let node = self.nodes.get(h);
            current = match self.cmp.compare(key, node.key().borrow()) {
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
                Ordering::Equal => return Some((h, depth)),
            };
            depth += 1;
        }
        None
    }

    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.find(key).map(|h| self.nodes.get(h).value())
    }

    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let h = self.find(key)?;
        Some(self.nodes.get_mut(h).value_mut())
    }

    pub(crate) fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.find(key).map(|h| self.nodes.get(h).entry())
    }

    pub(crate) fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.find(key).is_some()
    }

    /// Removes the node whose key equals `key`, returning its entry.
    pub(crate) fn delete<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let (link, Some(target)) = self.search(key) else {
            return None;
        };
        Some(self.unlink(link, target))
    }

    /// Largest key `<= key`.
    pub(crate) fn floor<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let mut best = None;
        let mut current = self.root;
        while let Some(h) = current {
            let node = self.nodes.get(h);
            current = match self.cmp.compare(key, node.key().borrow()) {
                Ordering::Equal => return Some(h),
                Ordering::Less => node.left(),
                Ordering::Greater => {
                    best = Some(h);
                    node.right()
                }
            };
        }
        best
    }

    /// Smallest key `>= key`.
    pub(crate) fn ceiling<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let mut best = None;
        let mut current = self.root;
        while let Some(h) = current {
            let node = self.nodes.get(h);
            current = match self.cmp.compare(key, node.key().borrow()) {
                Ordering::Equal => return Some(h),
                Ordering::Greater => node.right(),
                Ordering::Less => {
                    best = Some(h);
                    node.left()
                }
            };
        }
        best
    }

    /// Largest key `< key`. `key` need not be present.
    pub(crate) fn predecessor<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let mut best = None;
        let mut current = self.root;
        while let Some(h) = current {
            let node = self.nodes.get(h);
            current = if self.cmp.compare(key, node.key().borrow()) == Ordering::Greater {
                best = Some(h);
                node.right()
            } else {
                node.left()
            };
        }
        best
    }

    /// Smallest key `> key`. `key` need not be present.
    pub(crate) fn successor<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let mut best = None;
        let mut current = self.root;
        while let Some(h) = current {
            let node = self.nodes.get(h);
            current = if self.cmp.compare(key, node.key().borrow()) == Ordering::Less {
                best = Some(h);
                node.left()
            } else {
                node.right()
            };
        }
        best
    }

    /// Number of keys strictly less than `key`.
    ///
    /// No subtree sizes are stored, so this visits every node smaller than
    /// `key` plus the left spines hanging below larger ones: O(n).
    pub(crate) fn rank<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let mut rank = 0;
        let mut stack = Stack::new();
        stack.extend(self.root);
        while let Some(h) = stack.pop() {
            let node = self.nodes.get(h);
            stack.extend(node.left());
            if self.cmp.compare(node.key().borrow(), key) == Ordering::Less {
                rank += 1;
                stack.extend(node.right());
            }
        }
        rank
    }

    /// Node count of the subtree rooted at `key`'s node; zero when absent.
    pub(crate) fn subtree_size<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.find(key).map_or(0, |h| self.count_from(h))
    }

    fn within_lower<Q>(&self, key: &K, lower: Bound<&Q>) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        match lower {
            Bound::Unbounded => true,
            Bound::Included(lo) => self.cmp.compare(key.borrow(), lo) != Ordering::Less,
            Bound::Excluded(lo) => self.cmp.compare(key.borrow(), lo) == Ordering::Greater,
        }
    }

    fn within_upper<Q>(&self, key: &K, upper: Bound<&Q>) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        match upper {
            Bound::Unbounded => true,
            Bound::Included(hi) => self.cmp.compare(key.borrow(), hi) != Ordering::Greater,
            Bound::Excluded(hi) => self.cmp.compare(key.borrow(), hi) == Ordering::Less,
        }
    }

    /// Prepares an in-order walk positioned at the first key within `lower`,
    /// pushing only the nodes on the search path: O(h).
    fn seek_lower<Q>(&self, lower: Bound<&Q>) -> InOrder
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let mut stack = Stack::new();
        let mut current = self.root;
        while let Some(h) = current {
            let node = self.nodes.get(h);
            if self.within_lower(node.key(), lower) {
                stack.push(h);
                current = node.left();
            } else {
                current = node.right();
            }
        }
        InOrder::from_stack(stack)
    }

    /// Handle of the last key within `upper`.
    fn seek_upper<Q>(&self, upper: Bound<&Q>) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let mut best = None;
        let mut current = self.root;
        while let Some(h) = current {
            let node = self.nodes.get(h);
            if self.within_upper(node.key(), upper) {
                best = Some(h);
                current = node.right();
            } else {
                current = node.left();
            }
        }
        best
    }

    /// An in-order walk over the keys within `lower..upper`, and the handle of
    /// the last key to yield. `None` when no key is within both bounds.
    pub(crate) fn range_walk<Q>(&self, lower: Bound<&Q>, upper: Bound<&Q>) -> Option<(InOrder, Handle)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let walk = self.seek_lower(lower);
        // The first key within `lower` is the smallest candidate; if it already
        // lies past `upper`, nothing does.
        let first = walk.peek()?;
        if !self.within_upper(self.nodes.get(first).key(), upper) {
            return None;
        }
        let last = self.seek_upper(upper)?;
        Some((walk, last))
    }

    /// Checks the ordering invariant of every node against bounds tightened on
    /// the way down. The caller's bounds are applied as given; every bound
    /// taken from a node's key is exclusive, so a key equal to an ancestor's
    /// key fails.
    pub(crate) fn is_valid_within<Q>(&self, lower: Bound<&Q>, upper: Bound<&Q>) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let Some(root) = self.root else {
            return true;
        };

        let mut stack: SmallVec<[(Handle, Bound<&Q>, Bound<&Q>); STACK_INLINE]> = SmallVec::new();
        stack.push((root, lower, upper));
        while let Some((h, lo, hi)) = stack.pop() {
            let node = self.nodes.get(h);
            if !self.within_lower(node.key(), lo) || !self.within_upper(node.key(), hi) {
                return false;
            }
            let key = Bound::Excluded(node.key().borrow());
            if let Some(left) = node.left() {
                stack.push((left, lo, key));
            }
            if let Some(right) = node.right() {
                stack.push((right, key, hi));
            }
        }
        true
    }
}

impl<K, V, C: Comparator<K>> RawBstMap<K, V, C> {
    /// Inserts or updates. Returns the previous value if `key` was present;
    /// the stored key is kept in that case.
    pub(crate) fn put(&mut self, key: K, value: V) -> Option<V> {
        match self.search(&key) {
            (_, Some(h)) => Some(self.nodes.get_mut(h).replace_value(value)),
            (link, None) => {
                let h = self.nodes.alloc(Node::leaf(key, value));
                self.set_link(link, Some(h));
                None
            }
        }
    }

    /// Inserts only if `key` is absent; otherwise hands `key` and `value` back.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Result<(), (K, V)> {
        match self.search(&key) {
            (_, Some(_)) => Err((key, value)),
            (link, None) => {
                let h = self.nodes.alloc(Node::leaf(key, value));
                self.set_link(link, Some(h));
                Ok(())
            }
        }
    }

    pub(crate) fn try_put(&mut self, key: K, value: V) -> Result<Option<V>, TryInsertError<K, V>> {
        match self.search(&key) {
            (_, Some(h)) => Ok(Some(self.nodes.get_mut(h).replace_value(value))),
            (link, None) => self.try_attach(link, key, value).map(|()| None),
        }
    }

    /// Fallible insert-only. `Ok(Err(..))` hands back an entry whose key was
    /// already present.
    #[allow(clippy::type_complexity)]
    pub(crate) fn try_insert(&mut self, key: K, value: V) -> Result<Result<(), (K, V)>, TryInsertError<K, V>> {
        match self.search(&key) {
            (_, Some(_)) => Ok(Err((key, value))),
            (link, None) => self.try_attach(link, key, value).map(Ok),
        }
    }

    fn try_attach(&mut self, link: Link, key: K, value: V) -> Result<(), TryInsertError<K, V>> {
        match self.nodes.try_alloc(Node::leaf(key, value)) {
            Ok(h) => {
                self.set_link(link, Some(h));
                Ok(())
            }
            Err((node, error)) => {
                let (key, value) = node.into_entry();
                Err(match error {
                    AllocError::Reserve(source) => TryInsertError::AllocFailed { key, value, source },
                    AllocError::Full => TryInsertError::CapacityExceeded {
                        key,
                        value,
                        max: Handle::MAX,
                    },
                })
            }
        }
    }
}
