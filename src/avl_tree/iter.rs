use core::fmt;
use core::iter::FusedIterator;

use crate::raw::{Arena, Handle, Node, Side, step};

/// An iterator over the keys of an [`AvlTree`](super::AvlTree), in ascending order.
///
/// This `struct` is created by [`AvlTree::iter`](super::AvlTree::iter).
pub struct Iter<'a, K, A = ()> {
    nodes: &'a Arena<Node<K, A>>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

impl<'a, K, A> Iter<'a, K, A> {
    pub(crate) fn new(nodes: &'a Arena<Node<K, A>>, front: Option<Handle>, back: Option<Handle>, len: usize) -> Self {
        Self {
            nodes,
            front,
            back,
            remaining: len,
        }
    }
}

impl<'a, K, A> Iterator for Iter<'a, K, A> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.front?;
        self.remaining -= 1;
        self.front = step(self.nodes, handle, Side::Right);
        Some(self.nodes.get(handle).key())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }
}

impl<K, A> DoubleEndedIterator for Iter<'_, K, A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.back?;
        self.remaining -= 1;
        self.back = step(self.nodes, handle, Side::Left);
        Some(self.nodes.get(handle).key())
    }
}

impl<K, A> ExactSizeIterator for Iter<'_, K, A> {}

impl<K, A> FusedIterator for Iter<'_, K, A> {}

impl<K, A> Clone for Iter<'_, K, A> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<K: fmt::Debug, A> fmt::Debug for Iter<'_, K, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
