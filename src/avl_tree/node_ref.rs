use core::fmt;
use core::ptr;

use crate::raw::{Arena, Handle, Node, Side, extreme, rank, step};

/// A borrowed view of one node of an [`AvlTree`](super::AvlTree).
///
/// A `NodeRef` borrows the tree, so it stays valid until the tree is next mutated.
/// It can move to its children, parent and in-order neighbours, and read the
/// node's key, aggregate and subtree statistics.
///
/// Two `NodeRef`s are equal when they name the same node of the same tree.
///
/// # Examples
///
/// ```
/// use avl_ostree::AvlTree;
///
/// let tree = AvlTree::from([1, 2, 3, 4, 5]);
/// let mut node = tree.find(&2).unwrap();
/// let mut walked = vec![*node.key()];
/// while let Some(next) = node.next() {
///     walked.push(*next.key());
///     node = next;
/// }
/// assert_eq!(walked, [2, 3, 4, 5]);
/// ```
pub struct NodeRef<'a, K, A = ()> {
    nodes: &'a Arena<Node<K, A>>,
    handle: Handle,
}

impl<'a, K, A> NodeRef<'a, K, A> {
    pub(crate) fn new(nodes: &'a Arena<Node<K, A>>, handle: Handle) -> Self {
        Self { nodes, handle }
    }

    pub(crate) fn belongs_to(&self, nodes: &Arena<Node<K, A>>) -> bool {
        ptr::eq(self.nodes, nodes)
    }

    fn node(&self) -> &'a Node<K, A> {
        self.nodes.get(self.handle)
    }

    fn to(&self, handle: Option<Handle>) -> Option<Self> {
        handle.map(|handle| Self::new(self.nodes, handle))
    }

    /// The key stored in this node.
    #[must_use]
    pub fn key(&self) -> &'a K {
        self.node().key()
    }

    /// The aggregate the tree's hooks computed for this node's subtree.
    #[must_use]
    pub fn aug(&self) -> &'a A {
        self.node().aug()
    }

    #[must_use]
    pub fn left(&self) -> Option<Self> {
        self.to(self.node().left())
    }

    #[must_use]
    pub fn right(&self) -> Option<Self> {
        self.to(self.node().right())
    }

    /// The parent node, or `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.to(self.node().parent())
    }

    /// The in-order successor.
    ///
    /// # Complexity
    ///
    /// O(log n) worst case, O(1) amortized over a full walk.
    #[must_use]
    pub fn next(&self) -> Option<Self> {
        self.to(step(self.nodes, self.handle, Side::Right))
    }

    /// The in-order predecessor.
    #[must_use]
    pub fn prev(&self) -> Option<Self> {
        self.to(step(self.nodes, self.handle, Side::Left))
    }

    /// The leftmost node of this node's subtree.
    #[must_use]
    pub fn first_in_subtree(&self) -> Self {
        Self::new(self.nodes, extreme(self.nodes, self.handle, Side::Left))
    }

    /// The rightmost node of this node's subtree.
    #[must_use]
    pub fn last_in_subtree(&self) -> Self {
        Self::new(self.nodes, extreme(self.nodes, self.handle, Side::Right))
    }

    /// One-based position of this node in the whole tree.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn rank(&self) -> usize {
        rank(self.nodes, self.handle)
    }

    /// Height of this node's subtree; 1 for a leaf.
    #[must_use]
    pub fn height(&self) -> usize {
        self.node().height()
    }

    /// Number of nodes in this node's subtree, itself included.
    #[must_use]
    pub fn weight(&self) -> usize {
        self.node().weight()
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        let node = self.node();
        node.left().is_none() && node.right().is_none()
    }
}

impl<K, A> Clone for NodeRef<'_, K, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, A> Copy for NodeRef<'_, K, A> {}

impl<K, A> PartialEq for NodeRef<'_, K, A> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.nodes, other.nodes) && self.handle == other.handle
    }
}

impl<K, A> Eq for NodeRef<'_, K, A> {}

impl<K: fmt::Debug, A: fmt::Debug> fmt::Debug for NodeRef<'_, K, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("handle", &self.handle)
            .field("key", self.key())
            .field("aug", self.aug())
            .field("height", &self.height())
            .field("weight", &self.weight())
            .finish()
    }
}
