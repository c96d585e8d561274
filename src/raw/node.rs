use super::handle::Handle;
use super::weight::Weight;

/// Which child link of a node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A single tree node.
///
/// `parent` is a back-reference used only for upward walks; the node is owned by
/// the arena slot its handle names, and reachable through exactly one child link
/// (or the root).
#[derive(Clone)]
pub(crate) struct Node<K, A> {
    pub(super) key: K,
    pub(super) aug: A,
    pub(super) parent: Option<Handle>,
    pub(super) left: Option<Handle>,
    pub(super) right: Option<Handle>,
    // 1 for a leaf. Bounded by ~1.44 * log2(Handle::LAST_SLOT), so a byte is plenty.
    pub(super) height: u8,
    pub(super) weight: Weight,
}

impl<K, A: Default> Node<K, A> {
    /// Creates a detached leaf below `parent`.
    pub(crate) fn leaf(key: K, parent: Option<Handle>) -> Self {
        Self {
            key,
            aug: A::default(),
            parent,
            left: None,
            right: None,
            height: 1,
            weight: Weight::ONE,
        }
    }
}

impl<K, A> Node<K, A> {
    #[inline]
    pub(crate) fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub(crate) fn aug(&self) -> &A {
        &self.aug
    }

    #[inline]
    pub(crate) fn parent(&self) -> Option<Handle> {
        self.parent
    }

    #[inline]
    pub(crate) fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) fn right(&self) -> Option<Handle> {
        self.right
    }

    #[inline]
    pub(crate) fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    pub(crate) fn set_child(&mut self, side: Side, child: Option<Handle>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    /// Which side of this node `child` hangs from.
    ///
    /// # Panics
    ///
    /// Panics if `child` is not a child of this node.
    pub(crate) fn side_of(&self, child: Handle) -> Side {
        if self.left == Some(child) {
            Side::Left
        } else if self.right == Some(child) {
            Side::Right
        } else {
            panic!("`Node::side_of()` - {child:?} is not a child of this node!");
        }
    }

    #[inline]
    pub(crate) fn height(&self) -> usize {
        usize::from(self.height)
    }

    #[inline]
    pub(crate) fn weight(&self) -> usize {
        self.weight.get()
    }
}
