//! Read-only walks over linked nodes.
//!
//! These take the arena rather than the tree so that borrowed node handles can walk
//! without knowing the tree's comparator type.

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Node, Side};

/// Follows `side` links from `handle` until there are none left.
pub(crate) fn extreme<K, A>(nodes: &Arena<Node<K, A>>, mut handle: Handle, side: Side) -> Handle {
    while let Some(child) = nodes.get(handle).child(side) {
        handle = child;
    }
    handle
}

/// The in-order neighbour of `handle` in direction `side`.
///
/// `Side::Right` gives the successor, `Side::Left` the predecessor. Walks down into
/// the subtree on `side` if there is one, and otherwise up the parent links until
/// it arrives from the opposite side.
pub(crate) fn step<K, A>(nodes: &Arena<Node<K, A>>, handle: Handle, side: Side) -> Option<Handle> {
    if let Some(child) = nodes.get(handle).child(side) {
        return Some(extreme(nodes, child, side.opposite()));
    }

    let mut current = handle;
    while let Some(parent) = nodes.get(current).parent() {
        if nodes.get(parent).child(side.opposite()) == Some(current) {
            return Some(parent);
        }
        current = parent;
    }
    None
}

/// Weight of an optional subtree.
#[inline]
pub(crate) fn weight_of<K, A>(nodes: &Arena<Node<K, A>>, handle: Option<Handle>) -> usize {
    handle.map_or(0, |handle| nodes.get(handle).weight())
}

/// Height of an optional subtree.
#[inline]
pub(crate) fn height_of<K, A>(nodes: &Arena<Node<K, A>>, handle: Option<Handle>) -> usize {
    handle.map_or(0, |handle| nodes.get(handle).height())
}

/// One-based position of `handle` in the in-order sequence.
pub(crate) fn rank<K, A>(nodes: &Arena<Node<K, A>>, handle: Handle) -> usize {
    let mut rank = weight_of(nodes, nodes.get(handle).left()) + 1;
    let mut current = handle;
    while let Some(parent) = nodes.get(current).parent() {
        let parent_node = nodes.get(parent);
        if parent_node.right() == Some(current) {
            rank += weight_of(nodes, parent_node.left()) + 1;
        }
        current = parent;
    }
    rank
}
