use core::ops::Index;

use super::{AvlTree, NodeRef};
use crate::Rank;
use crate::compare::Less;

impl<K, A, C> AvlTree<K, A, C> {
    /// Returns the key at position `rank` in sorted order.
    ///
    /// The rank is one-based. Returns `None` if `rank` is zero or greater than
    /// [`len`](AvlTree::len).
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
    /// let tree = AvlTree::from([10, 20, 30]);
    /// assert_eq!(tree.find_by_rank(1), Some(&10));
    /// assert_eq!(tree.find_by_rank(3), Some(&30));
    /// assert!(tree.find_by_rank(0).is_none());
    /// assert!(tree.find_by_rank(4).is_none());
    /// ```
    #[must_use]
    pub fn find_by_rank(&self, rank: usize) -> Option<&K> {
        self.node_by_rank(rank).map(|node| node.key())
    }

    /// Returns the node at one-based position `rank`.
    #[must_use]
    pub fn node_by_rank(&self, rank: usize) -> Option<NodeRef<'_, K, A>> {
        self.node_ref(self.raw.by_rank(rank))
    }
}

impl<K, A: Default, C: Less<K>> AvlTree<K, A, C> {
    /// Returns the one-based rank of the first key equivalent to `key`, or `None` if
    /// there is none.
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
    /// for key in [5, 1, 5, 3] {
    ///     tree.insert_multi(key);
    /// }
    ///
    /// assert_eq!(tree.rank_of(&3), Some(2));
    /// assert_eq!(tree.rank_of(&5), Some(3));
    /// assert_eq!(tree.rank_of(&4), None);
    /// ```
    #[must_use]
    pub fn rank_of(&self, key: &K) -> Option<usize> {
        self.raw.find(key).map(|handle| self.raw.rank_of_handle(handle))
    }
}

/// Indexes into the tree by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
impl<K, A, C> Index<Rank> for AvlTree<K, A, C> {
    type Output = K;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.find_by_rank(rank.0).expect("rank out of bounds")
    }
}
