use core::fmt;
use core::num::NonZero;

// Narrow under test so arena exhaustion is reachable.
#[cfg(test)]
type Repr = u16;
#[cfg(not(test))]
type Repr = u32;

/// Names one arena slot. Stored as `slot + 1`, so every child and parent link
/// is an `Option<Handle>` the size of a bare integer.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<Repr>);

impl Handle {
    /// Highest slot number a handle can name.
    pub(crate) const LAST_SLOT: usize = Repr::MAX as usize - 1;

    #[inline]
    pub(crate) const fn for_slot(slot: usize) -> Self {
        assert!(slot <= Self::LAST_SLOT, "`Handle::for_slot()` - slot is past `Handle::LAST_SLOT`!");
        #[allow(clippy::cast_possible_truncation)]
        let shifted = slot as Repr + 1;
        match NonZero::new(shifted) {
            Some(repr) => Self(repr),
            None => unreachable!(),
        }
    }

    #[inline]
    pub(crate) const fn slot(self) -> usize {
        self.0.get() as usize - 1
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.slot())
    }
}
