use thiserror::Error;

/// A structural invariant that [`AvlTree::verify`](crate::AvlTree::verify) found broken.
///
/// Nodes are identified by their arena slot index, which is the same number
/// [`AvlTree::to_graphviz`](crate::AvlTree::to_graphviz) prints.
///
/// The tree maintains every one of these after each public call returns. Seeing one
/// means either a bug in this crate or a comparator that is not a strict weak order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum InvariantError {
    /// In-order traversal stepped backwards at the given one-based rank.
    #[error("keys out of order at rank {rank}")]
    OutOfOrder { rank: usize },

    /// Child heights differ by more than one.
    #[error("node {node} is unbalanced: left height {left_height}, right height {right_height}")]
    Unbalanced {
        node: usize,
        left_height: usize,
        right_height: usize,
    },

    /// Stored height disagrees with the children.
    #[error("node {node} stores height {stored}, children give {computed}")]
    HeightMismatch { node: usize, stored: usize, computed: usize },

    /// Stored weight disagrees with the children.
    #[error("node {node} stores weight {stored}, children give {computed}")]
    WeightMismatch { node: usize, stored: usize, computed: usize },

    /// A parent link does not point at the node owning the child edge.
    #[error("node {node} has parent {found:?}, expected {expected:?}")]
    ParentMismatch {
        node: usize,
        expected: Option<usize>,
        found: Option<usize>,
    },

    /// Live nodes exist that are not reachable from the root.
    #[error("{allocated} nodes allocated but {reachable} reachable from the root")]
    LengthMismatch { reachable: usize, allocated: usize },

    /// A stored augmentation value differs from what the hooks compute now.
    #[error("node {node} holds a stale augmentation value")]
    StaleAggregate { node: usize },
}
