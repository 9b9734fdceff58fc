use crate::chain::{self, Chain};
use crate::list::{AdaptiveList, Entry};
use crate::policy::Policy;
use std::fmt;
use std::iter::{FromIterator, FusedIterator};

/// An iterator over the values of an `AdaptiveList`, front to back.
///
/// This `struct` is created by [`AdaptiveList::iter`]. It reads the live
/// order of the list and borrows the list immutably, so no lookup or
/// mutation can reorder the list while it is alive.
pub struct Iter<'a, T: 'a, M: 'a> {
    inner: chain::Iter<'a, Entry<T, M>>,
}

impl<'a, T: 'a, M: 'a> Iter<'a, T, M> {
    pub(crate) fn new(inner: chain::Iter<'a, Entry<T, M>>) -> Self {
        Self { inner }
    }
}

impl<'a, T: 'a, M: 'a> Clone for Iter<'a, T, M> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, T: fmt::Debug + 'a, M: 'a> fmt::Debug for Iter<'a, T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter")
            .field(&self.clone().collect::<Vec<_>>())
            .finish()
    }
}

impl<'a, T: 'a, M: 'a> Iterator for Iter<'a, T, M> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Entry::value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a, T: 'a, M: 'a> DoubleEndedIterator for Iter<'a, T, M> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(Entry::value)
    }
}

impl<'a, T: 'a, M: 'a> ExactSizeIterator for Iter<'a, T, M> {}

impl<'a, T: 'a, M: 'a> FusedIterator for Iter<'a, T, M> {}

/// An iterator over the entries of an `AdaptiveList`, front to back.
///
/// This `struct` is created by [`AdaptiveList::entries`].
pub struct Entries<'a, T: 'a, M: 'a> {
    inner: chain::Iter<'a, Entry<T, M>>,
}

impl<'a, T: 'a, M: 'a> Entries<'a, T, M> {
    pub(crate) fn new(inner: chain::Iter<'a, Entry<T, M>>) -> Self {
        Self { inner }
    }
}

impl<'a, T: 'a, M: 'a> Clone for Entries<'a, T, M> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, T: fmt::Debug + 'a, M: fmt::Debug + 'a> fmt::Debug for Entries<'a, T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Entries").field(&self.inner).finish()
    }
}

impl<'a, T: 'a, M: 'a> Iterator for Entries<'a, T, M> {
    type Item = &'a Entry<T, M>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T: 'a, M: 'a> DoubleEndedIterator for Entries<'a, T, M> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<'a, T: 'a, M: 'a> ExactSizeIterator for Entries<'a, T, M> {}

impl<'a, T: 'a, M: 'a> FusedIterator for Entries<'a, T, M> {}

/// An owning iterator over the values of an `AdaptiveList`, front to back.
///
/// This `struct` is created by the [`into_iter`] method on [`AdaptiveList`]
/// (provided by the `IntoIterator` trait).
///
/// [`into_iter`]: AdaptiveList::into_iter
pub struct IntoIter<T, M> {
    chain: Chain<Entry<T, M>>,
}

impl<T: fmt::Debug, M> fmt::Debug for IntoIter<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter")
            .field(&Iter::new(self.chain.iter()).collect::<Vec<_>>())
            .finish()
    }
}

impl<T, M> Iterator for IntoIter<T, M> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.chain.pop_front().map(|entry| entry.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.chain.len();
        (len, Some(len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<T, M> DoubleEndedIterator for IntoIter<T, M> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.chain.pop_back().map(|entry| entry.value)
    }
}

impl<T, M> ExactSizeIterator for IntoIter<T, M> {}

impl<T, M> FusedIterator for IntoIter<T, M> {}

impl<T, P: Policy> IntoIterator for AdaptiveList<T, P> {
    type Item = T;
    type IntoIter = IntoIter<T, P::Meta>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { chain: self.chain }
    }
}

impl<'a, T, P: Policy> IntoIterator for &'a AdaptiveList<T, P> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, P::Meta>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Collects by calling [`AdaptiveList::add`] for each element, so the
/// resulting order follows the policy's admission end.
impl<T, P: Policy> FromIterator<T> for AdaptiveList<T, P> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = AdaptiveList::new();
        list.extend(iter);
        list
    }
}

impl<T, P: Policy> Extend<T> for AdaptiveList<T, P> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|item| self.add(item));
    }
}

impl<'a, T: 'a + Copy, P: Policy> Extend<&'a T> for AdaptiveList<T, P> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use crate::{CountList, MtfList};
    use std::iter::FromIterator;

    #[test]
    fn iter_follows_live_order() {
        let mut list = CountList::from_iter(0..5);
        list.get(&3);
        let mut iter = list.iter();
        assert_eq!(iter.len(), 5);
        assert_eq!(iter.next(), Some(&3));
        assert_eq!(iter.next_back(), Some(&4));
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.clone().last(), Some(&2));
        assert_eq!(iter.collect::<Vec<_>>(), vec![&0, &1, &2]);

        // restartable
        assert_eq!(list.iter().count(), 5);
        assert_eq!((&list).into_iter().rev().next(), Some(&4));
    }

    #[test]
    fn entries_expose_counts() {
        let mut list = CountList::from_iter(['a', 'b', 'c']);
        list.get(&'c');
        list.get(&'c');
        list.get(&'a');
        let counts: Vec<_> = list
            .entries()
            .map(|entry| (*entry.value(), entry.access_count()))
            .collect();
        assert_eq!(counts, vec![('c', 2), ('a', 1), ('b', 0)]);
        assert_eq!(list.entries().rev().next().map(|entry| entry.access_count()), Some(0));
    }

    #[test]
    fn into_iter_both_ends() {
        let list = MtfList::from_iter(0..4);
        let mut iter = list.into_iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some(3));
        assert_eq!(iter.next_back(), Some(0));
        assert_eq!(iter.collect::<Vec<_>>(), vec![2, 1]);
    }

    #[test]
    fn extend_goes_through_add() {
        let mut mtf = MtfList::<i32>::new();
        mtf.extend(&[1, 2, 3]);
        assert_eq!(Vec::from_iter(mtf), vec![3, 2, 1]);

        let mut count = CountList::<i32>::new();
        count.extend(vec![1, 2, 3]);
        assert_eq!(Vec::from_iter(count), vec![1, 2, 3]);
    }

    #[test]
    fn iter_debug() {
        let list = CountList::from_iter([1, 2]);
        assert_eq!(format!("{:?}", list.iter()), "Iter([1, 2])");
        assert_eq!(format!("{:?}", list), "[1, 2]");
        assert_eq!(format!("{:?}", list.into_iter()), "IntoIter([1, 2])");
    }
}
