//! A list whose reorganization policy is chosen at runtime.

use std::fmt;
use std::iter::FusedIterator;

use crate::error::{InvariantError, ListError};
use crate::policy::{AccessCounter, PolicyKind};
use crate::{CountList, Iter, MtfList};

/// An adaptive list whose policy is picked from a [`PolicyKind`] when it is
/// constructed, for callers that read the policy from configuration.
///
/// Every operation forwards to the wrapped [`MtfList`] or [`CountList`].
///
/// # Examples
///
/// ```
/// use adaptive_list::{AnyList, PolicyKind};
///
/// let kind: PolicyKind = "count".parse().unwrap();
/// let mut list = AnyList::new(kind);
/// list.add(1);
/// list.add(2);
/// list.get(&2);
/// list.get(&2);
/// assert_eq!(list.front(), Ok(&2));
/// assert_eq!(list.kind(), PolicyKind::AccessCount);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnyList<T> {
    MoveToFront(MtfList<T>),
    AccessCount(CountList<T>),
}

macro_rules! dispatch {
    ($self:expr, $list:ident => $body:expr) => {
        match $self {
            AnyList::MoveToFront($list) => $body,
            AnyList::AccessCount($list) => $body,
        }
    };
}

impl<T> AnyList<T> {
    pub fn new(kind: PolicyKind) -> Self {
        match kind {
            PolicyKind::MoveToFront => AnyList::MoveToFront(MtfList::new()),
            PolicyKind::AccessCount => AnyList::AccessCount(CountList::new()),
        }
    }

    pub fn kind(&self) -> PolicyKind {
        dispatch!(self, list => list.policy_kind())
    }

    pub fn len(&self) -> usize {
        dispatch!(self, list => list.len())
    }

    pub fn is_empty(&self) -> bool {
        dispatch!(self, list => list.is_empty())
    }

    pub fn add(&mut self, value: T) {
        dispatch!(self, list => list.add(value))
    }

    pub fn remove(&mut self, value: &T) -> Result<bool, ListError>
    where
        T: PartialEq,
    {
        dispatch!(self, list => list.remove(value))
    }

    /// Looks up and promotes the first element equal to `value`.
    pub fn get(&mut self, value: &T) -> Option<&T>
    where
        T: PartialEq,
    {
        dispatch!(self, list => list.get(value).map(|entry| entry.value()))
    }

    pub fn contains(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        dispatch!(self, list => list.contains(value))
    }

    /// Looks up the first element equal to `value` without promoting it.
    pub fn peek(&self, value: &T) -> Option<&T>
    where
        T: PartialEq,
    {
        dispatch!(self, list => list.peek(value).map(|entry| entry.value()))
    }

    pub fn clear(&mut self) {
        dispatch!(self, list => list.clear())
    }

    pub fn copy_to(&self, buffer: &mut [T], offset: usize) -> Result<(), ListError>
    where
        T: Clone,
    {
        dispatch!(self, list => list.copy_to(buffer, offset))
    }

    pub fn front(&self) -> Result<&T, ListError> {
        dispatch!(self, list => list.front())
    }

    pub fn back(&self) -> Result<&T, ListError> {
        dispatch!(self, list => list.back())
    }

    /// Provides a forward iterator over the values, front to back.
    pub fn iter(&self) -> AnyIter<'_, T> {
        let inner = match self {
            AnyList::MoveToFront(list) => Inner::MoveToFront(list.iter()),
            AnyList::AccessCount(list) => Inner::AccessCount(list.iter()),
        };
        AnyIter { inner }
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        dispatch!(self, list => list.check_invariants())
    }
}

impl<T> Default for AnyList<T> {
    fn default() -> Self {
        Self::new(PolicyKind::default())
    }
}

impl<T> Extend<T> for AnyList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        dispatch!(self, list => list.extend(iter))
    }
}

/// An iterator over the values of an [`AnyList`], front to back.
///
/// This `struct` is created by [`AnyList::iter`]. It keeps every guarantee of
/// [`Iter`]: double-ended, exact-size and fused.
pub struct AnyIter<'a, T: 'a> {
    inner: Inner<'a, T>,
}

enum Inner<'a, T: 'a> {
    MoveToFront(Iter<'a, T, ()>),
    AccessCount(Iter<'a, T, AccessCounter>),
}

macro_rules! forward {
    ($inner:expr, $iter:ident => $body:expr) => {
        match $inner {
            Inner::MoveToFront($iter) => $body,
            Inner::AccessCount($iter) => $body,
        }
    };
}

impl<'a, T: 'a> Clone for AnyIter<'a, T> {
    fn clone(&self) -> Self {
        let inner = match &self.inner {
            Inner::MoveToFront(iter) => Inner::MoveToFront(iter.clone()),
            Inner::AccessCount(iter) => Inner::AccessCount(iter.clone()),
        };
        Self { inner }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for AnyIter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AnyIter")
            .field(&self.clone().collect::<Vec<_>>())
            .finish()
    }
}

impl<'a, T: 'a> Iterator for AnyIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        forward!(&mut self.inner, iter => iter.next())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        forward!(&self.inner, iter => iter.size_hint())
    }
}

impl<'a, T: 'a> DoubleEndedIterator for AnyIter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        forward!(&mut self.inner, iter => iter.next_back())
    }
}

impl<'a, T: 'a> ExactSizeIterator for AnyIter<'a, T> {}

impl<'a, T: 'a> FusedIterator for AnyIter<'a, T> {}
