/// A strict ordering predicate: `less(a, b)` is true when `a` sorts before `b`.
///
/// Two keys are *equivalent* when neither is less than the other. The predicate must
/// be a strict weak order; anything else is a logic error. The tree stays memory safe
/// but query results are unspecified.
///
/// Implemented for [`NaturalOrder`] and for any `Fn(&K, &K) -> bool`.
///
/// # Examples
///
/// ```
/// use avl_ostree::AvlTree;
///
/// // Descending order.
/// let mut tree = AvlTree::with_comparator(|a: &i32, b: &i32| b < a);
/// tree.extend([1, 3, 2]);
/// assert_eq!(tree.to_vec(), [&3, &2, &1]);
/// ```
pub trait Less<K: ?Sized> {
    /// Returns `true` if `a` sorts strictly before `b`.
    fn less(&self, a: &K, b: &K) -> bool;

    /// Returns `true` if neither key sorts before the other.
    #[inline]
    fn equivalent(&self, a: &K, b: &K) -> bool {
        !self.less(a, b) && !self.less(b, a)
    }
}

/// Orders keys by their [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct NaturalOrder;

impl<K: Ord + ?Sized> Less<K> for NaturalOrder {
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        a < b
    }
}

impl<K: ?Sized, F> Less<K> for F
where
    F: Fn(&K, &K) -> bool,
{
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        self(a, b)
    }
}
