use core::fmt;

use crate::compare::{Less, NaturalOrder};
use crate::error::InvariantError;
use crate::raw::{Handle, RawAvlTree};

mod builder;
mod export;
mod iter;
mod node_ref;
mod order_statistic;

pub use builder::Builder;
pub use export::Graphviz;
pub use iter::Iter;
pub use node_ref::NodeRef;

/// An ordered container based on an AVL tree with order statistics.
///
/// Every node records the height and the weight (node count) of its subtree. Height
/// keeps the tree balanced: the two subtrees of any node differ in height by at most
/// one, so the tree never grows taller than about 1.44 log<sub>2</sub> n. Weight
/// answers rank queries ([`find_by_rank`], [`rank_of`]) in O(log n) without a
/// traversal.
///
/// Keys are ordered by a [`Less`] predicate, [`NaturalOrder`] by default. Equality is
/// never consulted: two keys are *equivalent* when neither is less than the other.
/// This lets a tree hold records ordered by one field, with the rest of the record
/// along for the ride.
///
/// Nodes can also carry a caller-defined aggregate `A` maintained by [hooks]. A hook
/// computes a node's aggregate from its key and its children's aggregates; the tree
/// keeps every aggregate current across insertions, removals and rotations.
///
/// # Duplicates
///
/// [`insert`] treats the tree as a set and ignores a key equivalent to one already
/// present. [`insert_multi`] treats it as a multiset: equivalent keys are kept as
/// separate nodes in insertion order. Lookups by key ([`find`], [`remove`],
/// [`rank_of`]) address the first of a run of equivalent keys.
///
/// # Node references
///
/// [`find`], [`lower_bound`], [`upper_bound`] and friends return a [`NodeRef`], which
/// borrows the tree. It can walk to neighbouring nodes but cannot outlive the next
/// mutation.
///
/// It is a logic error for a key to be modified in such a way that its ordering
/// relative to any other key changes while it is in the tree. The behavior resulting
/// from such a logic error is not specified, but will not result in undefined
/// behavior.
///
/// # Examples
///
/// ```
/// use avl_ostree::AvlTree;
///
/// let mut tree = AvlTree::new();
/// for key in [100, 200, 50, 20, 10, 1, 2, 3] {
///     tree.insert(key);
/// }
///
/// assert_eq!(tree.len(), 8);
/// assert_eq!(tree.find_by_rank(4), Some(&10));
/// assert_eq!(tree.lower_bound(&40).map(|node| *node.key()), Some(50));
/// assert_eq!(tree.upper_bound(&100).map(|node| *node.key()), Some(200));
/// assert!(tree.lower_bound(&1000).is_none());
///
/// assert!(tree.remove(&20));
/// assert_eq!(tree.to_vec(), [&1, &2, &3, &10, &50, &100, &200]);
/// ```
///
/// [`find_by_rank`]: AvlTree::find_by_rank
/// [`rank_of`]: AvlTree::rank_of
/// [hooks]: crate::hook
/// [`insert`]: AvlTree::insert
/// [`insert_multi`]: AvlTree::insert_multi
/// [`find`]: AvlTree::find
/// [`remove`]: AvlTree::remove
/// [`lower_bound`]: AvlTree::lower_bound
/// [`upper_bound`]: AvlTree::upper_bound
pub struct AvlTree<K, A = (), C = NaturalOrder> {
    raw: RawAvlTree<K, A, C>,
}

impl<K> AvlTree<K> {
    /// Makes a new, empty tree ordered by [`Ord`], without hooks.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.insert("a");
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Builder::new().build()
    }

    /// Makes a new, empty tree with room for at least `capacity` nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::AvlTree;
    ///
    /// let tree: AvlTree<i32> = AvlTree::with_capacity(16);
    /// assert!(tree.capacity() >= 16);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Builder::new().capacity(capacity).build()
    }
}

impl<K, A> AvlTree<K, A> {
    /// Starts configuring a tree: capacity, ordering and hooks.
    ///
    /// The aggregate type `A` is inferred from the hooks registered on the builder.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::{AvlTree, Children};
    ///
    /// fn count_even(even: &mut usize, node: Children<'_, u32, usize>) {
    ///     *even = node.left().copied().unwrap_or(0)
    ///         + usize::from(node.key() % 2 == 0)
    ///         + node.right().copied().unwrap_or(0);
    /// }
    ///
    /// let mut tree = AvlTree::builder().capacity(8).hook(count_even).build();
    /// tree.extend(1..=10);
    /// assert_eq!(tree.root().map(|root| *root.aug()), Some(5));
    /// ```
    #[must_use]
    pub fn builder() -> Builder<K, A, NaturalOrder> {
        Builder::new()
    }
}

impl<K, C: Less<K>> AvlTree<K, (), C> {
    /// Makes a new, empty tree ordered by `less`, without hooks.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::AvlTree;
    ///
    /// let mut tree = AvlTree::with_comparator(|a: &(u32, &str), b: &(u32, &str)| a.0 < b.0);
    /// tree.insert((2, "two"));
    /// tree.insert((1, "one"));
    /// // Only the first field orders, so this is a duplicate.
    /// assert!(!tree.insert((2, "deux")));
    /// assert_eq!(tree.find_by_rank(2), Some(&(2, "two")));
    /// ```
    #[must_use]
    pub fn with_comparator(less: C) -> Self {
        Builder::new().comparator(less).build()
    }
}

impl<K, A, C> AvlTree<K, A, C> {
    pub(crate) fn from_raw(raw: RawAvlTree<K, A, C>) -> Self {
        Self { raw }
    }

    /// Returns the number of keys in the tree.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree contains no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.root().is_none()
    }

    /// Returns the height of the tree: 0 when empty, 1 for a single node.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::AvlTree;
    ///
    /// let tree: AvlTree<_> = (0..1000).collect();
    /// assert_eq!(tree.height(), 10);
    /// ```
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Returns how many nodes the tree can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Returns the ordering predicate.
    #[must_use]
    pub fn comparator(&self) -> &C {
        self.raw.comparator()
    }

    /// Returns the number of registered hooks.
    #[must_use]
    pub fn hook_count(&self) -> usize {
        self.raw.hook_count()
    }

    /// Removes every key. Comparator and hooks are kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::AvlTree;
    ///
    /// let mut tree = AvlTree::from([1, 2, 3]);
    /// tree.clear();
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.height(), 0);
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the root node, or `None` if the tree is empty.
    ///
    /// Together with [`NodeRef::left`], [`NodeRef::right`] and [`NodeRef::aug`] this
    /// supports custom descents over hook aggregates.
    #[must_use]
    pub fn root(&self) -> Option<NodeRef<'_, K, A>> {
        self.node_ref(self.raw.root())
    }

    /// Returns the node holding the smallest key.
    #[must_use]
    pub fn first_node(&self) -> Option<NodeRef<'_, K, A>> {
        self.node_ref(self.raw.first())
    }

    /// Returns the node holding the largest key.
    #[must_use]
    pub fn last_node(&self) -> Option<NodeRef<'_, K, A>> {
        self.node_ref(self.raw.last())
    }

    /// Returns the smallest key.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::AvlTree;
    ///
    /// let tree = AvlTree::from([3, 1, 2]);
    /// assert_eq!(tree.first(), Some(&1));
    /// assert_eq!(tree.last(), Some(&3));
    /// ```
    #[must_use]
    pub fn first(&self) -> Option<&K> {
        self.first_node().map(|node| node.key())
    }

    /// Returns the largest key.
    #[must_use]
    pub fn last(&self) -> Option<&K> {
        self.last_node().map(|node| node.key())
    }

    /// Alias for [`first`](AvlTree::first).
    #[must_use]
    pub fn min(&self) -> Option<&K> {
        self.first()
    }

    /// Alias for [`last`](AvlTree::last).
    #[must_use]
    pub fn max(&self) -> Option<&K> {
        self.last()
    }

    /// Returns the node after `node` in key order, or `None` at the end.
    ///
    /// Equivalent to [`NodeRef::next`].
    ///
    /// # Panics
    ///
    /// Panics if `node` belongs to a different tree.
    ///
    /// # Complexity
    ///
    /// O(log n) worst case, O(1) amortized over a full walk.
    #[must_use]
    pub fn successor<'a>(&'a self, node: NodeRef<'a, K, A>) -> Option<NodeRef<'a, K, A>> {
        self.assert_owns(node, "successor");
        node.next()
    }

    /// Returns the node before `node` in key order, or `None` at the start.
    ///
    /// Equivalent to [`NodeRef::prev`].
    ///
    /// # Panics
    ///
    /// Panics if `node` belongs to a different tree.
    #[must_use]
    pub fn predecessor<'a>(&'a self, node: NodeRef<'a, K, A>) -> Option<NodeRef<'a, K, A>> {
        self.assert_owns(node, "predecessor");
        node.prev()
    }

    /// Calls `visit` on every key in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::AvlTree;
    ///
    /// let tree = AvlTree::from([2, 3, 1]);
    /// let mut seen = Vec::new();
    /// tree.for_each(|key| seen.push(*key));
    /// assert_eq!(seen, [1, 2, 3]);
    /// ```
    pub fn for_each(&self, visit: impl FnMut(&K)) {
        self.iter().for_each(visit);
    }

    /// Gets an iterator over the keys in ascending order.
    pub fn iter(&self) -> Iter<'_, K, A> {
        Iter::new(self.raw.nodes(), self.raw.first(), self.raw.last(), self.len())
    }

    /// Collects references to every key in ascending order.
    #[must_use]
    pub fn to_vec(&self) -> alloc::vec::Vec<&K> {
        self.iter().collect()
    }

    fn node_ref(&self, handle: Option<Handle>) -> Option<NodeRef<'_, K, A>> {
        handle.map(|handle| NodeRef::new(self.raw.nodes(), handle))
    }

    fn assert_owns(&self, node: NodeRef<'_, K, A>, operation: &str) {
        assert!(
            node.belongs_to(self.raw.nodes()),
            "`AvlTree::{operation}()` - node belongs to a different tree!"
        );
    }
}

impl<K, A: Default, C: Less<K>> AvlTree<K, A, C> {
    /// Adds `key` to the tree unless an equivalent key is already present.
    ///
    /// Returns whether the key was inserted. A rejected key is dropped; use
    /// [`insert_multi`](AvlTree::insert_multi) to keep duplicates.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// assert!(tree.insert(2));
    /// assert!(!tree.insert(2));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K) -> bool {
        self.raw.insert(key, false).is_ok()
    }

    /// Adds `key` to the tree even if equivalent keys are present.
    ///
    /// The new key is placed after every equivalent key already in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// for key in [1, 2, 1] {
    ///     tree.insert_multi(key);
    /// }
    /// assert_eq!(tree.to_vec(), [&1, &1, &2]);
    /// ```
    pub fn insert_multi(&mut self, key: K) {
        if self.raw.insert(key, true).is_err() {
            unreachable!("`AvlTree::insert_multi()` - multiset insert cannot be rejected!");
        }
    }

    /// Removes the first key equivalent to `key`. Returns whether one was found.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::AvlTree;
    ///
    /// let mut tree = AvlTree::from([1, 2]);
    /// assert!(tree.remove(&1));
    /// assert!(!tree.remove(&1));
    /// ```
    pub fn remove(&mut self, key: &K) -> bool {
        self.take(key).is_some()
    }

    /// Removes the first key equivalent to `key` and returns it.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::AvlTree;
    ///
    /// let mut tree = AvlTree::with_comparator(|a: &(i32, char), b: &(i32, char)| a.0 < b.0);
    /// tree.insert((7, 'x'));
    /// assert_eq!(tree.take(&(7, '?')), Some((7, 'x')));
    /// assert!(tree.is_empty());
    /// ```
    pub fn take(&mut self, key: &K) -> Option<K> {
        let handle = self.raw.find(key)?;
        Some(self.raw.remove(handle))
    }

    /// Returns the node holding the first key equivalent to `key`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn find(&self, key: &K) -> Option<NodeRef<'_, K, A>> {
        self.node_ref(self.raw.find(key))
    }

    /// Returns `true` if the tree holds a key equivalent to `key`.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.raw.find(key).is_some()
    }

    /// Returns the first node whose key is not less than `key`, or `None` if every
    /// key is less.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::AvlTree;
    ///
    /// let tree = AvlTree::from([10, 20, 30]);
    /// assert_eq!(tree.lower_bound(&20).map(|node| *node.key()), Some(20));
    /// assert_eq!(tree.lower_bound(&21).map(|node| *node.key()), Some(30));
    /// assert!(tree.lower_bound(&31).is_none());
    /// ```
    #[must_use]
    pub fn lower_bound(&self, key: &K) -> Option<NodeRef<'_, K, A>> {
        self.node_ref(self.raw.lower_bound(key))
    }

    /// Returns the first node whose key is greater than `key`, or `None` if no key is.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ostree::AvlTree;
    ///
    /// let tree = AvlTree::from([10, 20, 30]);
    /// assert_eq!(tree.upper_bound(&20).map(|node| *node.key()), Some(30));
    /// assert!(tree.upper_bound(&30).is_none());
    /// ```
    #[must_use]
    pub fn upper_bound(&self, key: &K) -> Option<NodeRef<'_, K, A>> {
        self.node_ref(self.raw.upper_bound(key))
    }

    /// Checks every structural invariant: key order, AVL balance, stored heights and
    /// weights, and parent links.
    ///
    /// The tree maintains these itself; this is for tests and for diagnosing a
    /// comparator that is not a strict weak order.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn verify(&self) -> Result<(), InvariantError> {
        self.raw.verify()
    }
}

impl<K, A: Default + PartialEq, C> AvlTree<K, A, C> {
    /// Checks that every node's aggregate equals what the hooks compute from its
    /// children right now.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantError::StaleAggregate`] for the first mismatching node.
    pub fn verify_aggregates(&self) -> Result<(), InvariantError> {
        self.raw.verify_aggregates()
    }
}

impl<K: Clone, A: Clone, C: Clone> Clone for AvlTree<K, A, C> {
    fn clone(&self) -> Self {
        Self { raw: self.raw.clone() }
    }
}

impl<K: fmt::Debug, A, C> fmt::Debug for AvlTree<K, A, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K, A> Default for AvlTree<K, A> {
    fn default() -> Self {
        Builder::new().build()
    }
}

impl<K, A: Default, C: Less<K>> Extend<K> for AvlTree<K, A, C> {
    /// Inserts each key with set semantics.
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord, A: Default> FromIterator<K> for AvlTree<K, A> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::default();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord, const N: usize> From<[K; N]> for AvlTree<K> {
    fn from(keys: [K; N]) -> Self {
        keys.into_iter().collect()
    }
}

impl<'a, K, A, C> IntoIterator for &'a AvlTree<K, A, C> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
