//! Matching of queued items against lookup targets.
//!
//! Lookup operations ([`Queue::remove`](crate::Queue::remove), [`Queue::contains`](crate::Queue::contains),
//! [`PriorityQueue::remove`](crate::PriorityQueue::remove) and
//! [`PriorityQueue::update_priority`](crate::PriorityQueue::update_priority)) search for an item which is
//! the same object as the target first and fall back to value equality only if there is no such item.
//! This allows to address one of several equal items individually when items are shared pointers.

use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;

/// Tells whether two values denote the same object.
///
/// Shared pointers, boxes and references compare addresses. Plain values (including standard containers
/// such as `Vec`, `Option`, arrays and tuples) have no identity, for them the default implementation
/// returns `false` and the lookup relies on `PartialEq` alone:
///
/// ```rust
/// use simcraft_queues::Identity;
///
/// #[derive(PartialEq)]
/// struct Customer {
///     id: u64,
/// }
///
/// impl Identity for Customer {}
/// ```
pub trait Identity {
    /// Returns `true` if `self` and `other` are the same object.
    fn is_same(&self, _other: &Self) -> bool {
        false
    }
}

impl<T: ?Sized> Identity for Rc<T> {
    fn is_same(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

impl<T: ?Sized> Identity for Arc<T> {
    fn is_same(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl<T: ?Sized> Identity for Box<T> {
    fn is_same(&self, other: &Self) -> bool {
        std::ptr::eq(&**self, &**other)
    }
}

impl<T: ?Sized> Identity for &T {
    fn is_same(&self, other: &Self) -> bool {
        std::ptr::eq(*self, *other)
    }
}

macro_rules! impl_value_identity {
    ($($t:ty),*) => {
        $(impl Identity for $t {})*
    };
}

impl_value_identity!(
    (), bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64, String
);

impl<T> Identity for Vec<T> {}

impl<T> Identity for VecDeque<T> {}

impl<T> Identity for Option<T> {}

impl<T, const N: usize> Identity for [T; N] {}

macro_rules! impl_tuple_identity {
    ($($name:ident)+) => {
        impl<$($name),+> Identity for ($($name,)+) {}
    };
}

impl_tuple_identity!(A);
impl_tuple_identity!(A B);
impl_tuple_identity!(A B C);
impl_tuple_identity!(A B C D);
impl_tuple_identity!(A B C D E);
impl_tuple_identity!(A B C D E F);
impl_tuple_identity!(A B C D E F G);
impl_tuple_identity!(A B C D E F G H);

/// Finds the position of the target in a sequence of items.
///
/// Returns the first item which is the same object as the target, otherwise the first item equal to it.
pub(crate) fn find_position<'a, T, I>(mut items: I, target: &T) -> Option<usize>
where
    T: Identity + PartialEq + 'a,
    I: Iterator<Item = &'a T> + Clone,
{
    items
        .clone()
        .position(|item| item.is_same(target))
        .or_else(|| items.position(|item| item == target))
}
