use core::num::NonZero;

/// Number of nodes in a non-empty subtree.
///
/// A live node always weighs at least one, so the zero value is left free for the
/// niche. An absent subtree weighs zero.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
#[repr(transparent)]
pub(crate) struct Weight(NonZero<u32>);

impl Weight {
    pub(crate) const ONE: Self = Self(NonZero::<u32>::MIN);

    /// Weight of a node whose children weigh `left` and `right`.
    #[inline]
    pub(crate) fn of_children(left: usize, right: usize) -> Self {
        let total = left
            .checked_add(right)
            .and_then(|sum| sum.checked_add(1))
            .and_then(|sum| u32::try_from(sum).ok())
            .expect("`Weight::of_children()` - subtree weight overflows `u32`!");
        // `total` is at least one.
        Self(NonZero::<u32>::MIN.saturating_add(total - 1))
    }

    #[inline]
    pub(crate) const fn get(self) -> usize {
        self.0.get() as usize
    }
}
