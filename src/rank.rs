/// A one-based position in the sorted order of an [`AvlTree`](crate::AvlTree).
///
/// `Rank(1)` is the smallest key and `Rank(tree.len())` the largest. `Rank(0)` never
/// names a key.
///
/// # Examples
///
/// ```
/// use avl_ostree::{AvlTree, Rank};
///
/// let tree = AvlTree::from(["b", "c", "a"]);
/// assert_eq!(tree[Rank(1)], "a");
/// assert_eq!(tree[Rank(3)], "c");
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);

impl From<usize> for Rank {
    fn from(rank: usize) -> Self {
        Rank(rank)
    }
}
