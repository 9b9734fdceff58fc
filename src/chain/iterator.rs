use super::{next_of, prev_of, Chain, Node};
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

/// An iterator over the elements of a `Chain`.
///
/// It uses a pair of nodes `start..end` to represent a half-open subrange
/// of the chain, where `start` is inclusive and `end` is not. Initially `end`
/// is the ghost node.
///
/// Though the `Iter` does not hold a reference from the chain, it actually
/// *borrows* (immutably) from the chain, so a phantom marker of `&'a Chain<E>`
/// is added to protect the chain from being relinked.
pub struct Iter<'a, E: 'a> {
    start: NonNull<Node<E>>,
    end: NonNull<Node<E>>,
    len: usize,
    _marker: PhantomData<&'a Chain<E>>,
}

impl<'a, E: 'a> Iter<'a, E> {
    pub(crate) fn new(chain: &'a Chain<E>) -> Self {
        let end = chain.ghost_node();
        // SAFETY: `ghost.next` is always valid.
        let start = unsafe { next_of(end) };
        Self {
            start,
            end,
            len: chain.len(),
            _marker: PhantomData,
        }
    }
}

impl<'a, E: 'a> Clone for Iter<'a, E> {
    fn clone(&self) -> Self {
        Self {
            start: self.start,
            end: self.end,
            len: self.len,
            _marker: PhantomData,
        }
    }
}

impl<'a, E: fmt::Debug + 'a> fmt::Debug for Iter<'a, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, E: 'a> Iterator for Iter<'a, E> {
    type Item = &'a E;

    /// Return `*start` and reset the iterating range to `(start.next)..end`,
    /// or return `None` if `start..end` is already empty.
    fn next(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: `start..end` is always a valid range of the chain,
        // and it is not empty here, so `start` is a live node.
        let current = unsafe { &*self.start.as_ptr() };
        self.start = current.next;
        self.len -= 1;
        Some(&current.element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a, E: 'a> DoubleEndedIterator for Iter<'a, E> {
    /// Reset the iterating range to `start..(end.prev)` and return `*end`,
    /// or return `None` if `start..end` is already empty.
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: `start..end` is not empty, so `end.prev` is a live node.
        self.end = unsafe { prev_of(self.end) };
        let current = unsafe { &*self.end.as_ptr() };
        self.len -= 1;
        Some(&current.element)
    }
}

impl<'a, E: 'a> ExactSizeIterator for Iter<'a, E> {}

impl<'a, E: 'a> FusedIterator for Iter<'a, E> {}

unsafe impl<E: Sync> Send for Iter<'_, E> {}

unsafe impl<E: Sync> Sync for Iter<'_, E> {}

#[cfg(test)]
mod tests {
    use crate::chain::Chain;

    #[test]
    fn chain_iter_both_ends() {
        let mut chain = Chain::new();
        for value in 0..6 {
            chain.push_back(value);
        }
        let mut iter = chain.iter();
        assert_eq!(iter.len(), 6);
        assert_eq!(iter.next(), Some(&0));
        assert_eq!(iter.next_back(), Some(&5));
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.clone().collect::<Vec<_>>(), vec![&1, &2, &3, &4]);
        assert_eq!(iter.next_back(), Some(&4));
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next(), Some(&3));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
        assert_eq!(iter.len(), 0);
    }

    #[test]
    fn chain_iter_empty() {
        let chain = Chain::<u8>::new();
        assert_eq!(chain.iter().next(), None);
        assert_eq!(chain.iter().last(), None);
        assert_eq!(format!("{:?}", chain.iter()), "[]");
    }
}
