//! Augmentation hooks.
//!
//! A hook derives a per-node aggregate from the node's own key and the aggregates of its
//! two children. The tree re-runs every hook, in registration order, on each node whose
//! subtree changed shape: the path from an inserted or removed node up to the root and
//! both nodes of every rotation. Children are always recomputed before their parent, so a
//! hook never sees a stale child aggregate.
//!
//! Hooks registered on one tree write into a single augmentation value `A`. Each hook
//! starts from `A::default()`, so a hook that owns one field of a struct simply assigns
//! that field.
//!
//! # Examples
//!
//! A subtree sum, used to answer "sum of all keys ≤ x" in O(log n):
//!
//! ```
//! use avl_ostree::{AvlTree, Children};
//!
//! fn subtree_sum(sum: &mut i64, node: Children<'_, i64, i64>) {
//!     *sum = node.left().copied().unwrap_or(0) + *node.key() + node.right().copied().unwrap_or(0);
//! }
//!
//! let mut tree = AvlTree::builder().hook(subtree_sum).build();
//! tree.extend([45, 40, 55, 105, 30, 15, 100]);
//! assert_eq!(tree.root().map(|root| *root.aug()), Some(390));
//! ```

use core::fmt;

/// Read-only view of the node a hook is recomputing.
///
/// Height and weight are already up to date when hooks run.
pub struct Children<'a, K, A> {
    pub(crate) key: &'a K,
    pub(crate) left: Option<&'a A>,
    pub(crate) right: Option<&'a A>,
    pub(crate) weight: usize,
    pub(crate) height: usize,
}

impl<'a, K, A> Children<'a, K, A> {
    /// The node's own key.
    #[must_use]
    pub fn key(&self) -> &'a K {
        self.key
    }

    /// Aggregate of the left subtree, `None` if there is no left child.
    #[must_use]
    pub fn left(&self) -> Option<&'a A> {
        self.left
    }

    /// Aggregate of the right subtree, `None` if there is no right child.
    #[must_use]
    pub fn right(&self) -> Option<&'a A> {
        self.right
    }

    /// Number of nodes in the subtree rooted here, including the node itself.
    #[must_use]
    pub fn weight(&self) -> usize {
        self.weight
    }

    /// Height of the subtree rooted here; a leaf has height 1.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }
}

impl<K, A> Clone for Children<'_, K, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, A> Copy for Children<'_, K, A> {}

impl<K: fmt::Debug, A: fmt::Debug> fmt::Debug for Children<'_, K, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Children")
            .field("key", self.key)
            .field("left", &self.left)
            .field("right", &self.right)
            .field("weight", &self.weight)
            .field("height", &self.height)
            .finish()
    }
}

/// A caller-supplied aggregate function.
///
/// Must be a pure function of `node`: the tree may call it any number of times on the
/// same node and relies on getting the same answer.
pub trait Hook<K, A> {
    /// Writes this hook's share of `aug` for the node described by `node`.
    fn update(&self, aug: &mut A, node: Children<'_, K, A>);
}

impl<K, A, F> Hook<K, A> for F
where
    F: Fn(&mut A, Children<'_, K, A>),
{
    #[inline]
    fn update(&self, aug: &mut A, node: Children<'_, K, A>) {
        self(aug, node);
    }
}
