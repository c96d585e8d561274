use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use super::AvlTree;
use crate::compare::{Less, NaturalOrder};
use crate::hook::{Children, Hook};
use crate::raw::{RawAvlTree, SharedHook};

/// Configures an [`AvlTree`] before it is built: initial capacity, ordering and
/// augmentation hooks.
///
/// Created by [`AvlTree::builder`].
///
/// # Examples
///
/// ```
/// use avl_ostree::{AvlTree, Children};
///
/// #[derive(Default, PartialEq)]
/// struct Stats {
///     min: i32,
///     max: i32,
/// }
///
/// fn min(stats: &mut Stats, node: Children<'_, i32, Stats>) {
///     stats.min = node.left().map_or(*node.key(), |left| left.min);
/// }
///
/// fn max(stats: &mut Stats, node: Children<'_, i32, Stats>) {
///     stats.max = node.right().map_or(*node.key(), |right| right.max);
/// }
///
/// let mut tree = AvlTree::builder()
///     .comparator(|a: &i32, b: &i32| a < b)
///     .hook(min)
///     .hook(max)
///     .build();
/// tree.extend([7, -3, 12, 0]);
///
/// let root = tree.root().unwrap();
/// assert_eq!((root.aug().min, root.aug().max), (-3, 12));
/// ```
pub struct Builder<K, A = (), C = NaturalOrder> {
    capacity: usize,
    less: C,
    hooks: Vec<SharedHook<K, A>>,
}

impl<K, A> Builder<K, A> {
    /// Starts from an empty, [`Ord`]-ordered tree with no hooks.
    #[must_use]
    pub fn new() -> Self {
        Self {
            capacity: 0,
            less: NaturalOrder,
            hooks: Vec::new(),
        }
    }
}

impl<K, A, C> Builder<K, A, C> {
    /// Preallocates room for `capacity` nodes.
    #[must_use]
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Orders keys by `less` instead of the current predicate.
    #[must_use]
    pub fn comparator<D: Less<K>>(self, less: D) -> Builder<K, A, D> {
        Builder {
            capacity: self.capacity,
            less,
            hooks: self.hooks,
        }
    }

    /// Registers an aggregate function. Hooks run in registration order.
    #[must_use]
    pub fn hook<F>(self, hook: F) -> Self
    where
        F: Fn(&mut A, Children<'_, K, A>) + Send + Sync + 'static,
    {
        self.push_hook(hook)
    }

    /// Registers any [`Hook`] implementation.
    #[must_use]
    pub fn push_hook<H>(mut self, hook: H) -> Self
    where
        H: Hook<K, A> + Send + Sync + 'static,
    {
        self.hooks.push(Arc::new(hook));
        self
    }

    /// Builds the empty tree.
    #[must_use]
    pub fn build(self) -> AvlTree<K, A, C> {
        tracing::debug!(capacity = self.capacity, hooks = self.hooks.len(), "building tree");
        AvlTree::from_raw(RawAvlTree::new(self.less, self.hooks, self.capacity))
    }
}

impl<K, A> Default for Builder<K, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, A, C: fmt::Debug> fmt::Debug for Builder<K, A, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("capacity", &self.capacity)
            .field("less", &self.less)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}
