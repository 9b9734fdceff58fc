use std::fmt::{Debug, Formatter};

use crate::chain::Chain;
use crate::error::{InvariantError, ListError};
use crate::policy::{AccessCount, AccessCounter, MoveToFront, Policy, PolicyKind};
use crate::{Entries, Iter};

pub mod iterator;

mod algorithms;

/// A list that reorders itself on every successful lookup.
///
/// `get` scans from the front and, on a hit, asks the policy `P` to promote the
/// found node before returning it. Everything else behaves like a plain
/// doubly-linked list with owned nodes.
///
/// Use the aliases [`MtfList`] and [`CountList`] to pick a policy, or
/// [`AnyList`](crate::AnyList) to pick one at runtime.
///
/// # Examples
///
/// ```
/// use adaptive_list::MtfList;
///
/// let mut list = MtfList::new();
/// list.add("a");
/// list.add("b");
/// list.add("c");
/// assert_eq!(list.front(), Ok(&"c"));
///
/// assert!(list.contains(&"a"));
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec!["a", "c", "b"]);
/// ```
pub struct AdaptiveList<T, P: Policy = MoveToFront> {
    chain: Chain<Entry<T, P::Meta>>,
    policy: P,
}

/// A list reorganized by the [`MoveToFront`] policy.
pub type MtfList<T> = AdaptiveList<T, MoveToFront>;

/// A list reorganized by the [`AccessCount`] policy.
pub type CountList<T> = AdaptiveList<T, AccessCount>;

/// A value stored in an [`AdaptiveList`], together with the state its policy
/// keeps for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entry<T, M = ()> {
    pub(crate) value: T,
    pub(crate) meta: M,
}

impl<T, M: Default> Entry<T, M> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            value,
            meta: M::default(),
        }
    }
}

impl<T, M> Entry<T, M> {
    #[inline]
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The policy's state for this value.
    ///
    /// # Examples
    /// ```
    /// use adaptive_list::CountList;
    ///
    /// let mut list = CountList::new();
    /// list.add('x');
    /// list.get(&'x');
    /// let entry = list.get(&'x').unwrap();
    /// assert_eq!(entry.meta().get(), 2);
    /// ```
    #[inline]
    pub fn meta(&self) -> &M {
        &self.meta
    }
}

impl<T> Entry<T, AccessCounter> {
    /// How many times this value has been found by a lookup.
    #[inline]
    pub fn access_count(&self) -> u64 {
        self.meta.get()
    }
}

impl<T, P: Policy> AdaptiveList<T, P> {
    /// Create an empty list.
    ///
    /// # Examples
    /// ```
    /// use adaptive_list::CountList;
    /// let list: CountList<u32> = CountList::new();
    /// assert!(list.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self {
            chain: Chain::new(),
            policy: P::default(),
        }
    }

    /// The policy instance driving this list.
    ///
    /// ```
    /// use adaptive_list::{AccessCount, CountList};
    /// let list: CountList<u8> = CountList::new();
    /// assert_eq!(list.policy(), &AccessCount);
    /// ```
    #[inline]
    pub fn policy(&self) -> &P {
        &self.policy
    }

    #[inline]
    pub fn policy_kind(&self) -> PolicyKind {
        P::KIND
    }

    /// Returns the number of elements.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Adds an element at the policy's admission end: the front for
    /// [`MoveToFront`], the back (with a zero count) for [`AccessCount`].
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use adaptive_list::{CountList, MtfList};
    ///
    /// let mut mtf = MtfList::new();
    /// mtf.add(1);
    /// mtf.add(2);
    /// assert_eq!(mtf.front(), Ok(&2));
    ///
    /// let mut count = CountList::new();
    /// count.add(1);
    /// count.add(2);
    /// assert_eq!(count.front(), Ok(&1));
    /// ```
    pub fn add(&mut self, value: T) {
        self.policy.admit(&mut self.chain, Entry::new(value));
    }

    /// Removes the first element equal to `value`, returning whether one was
    /// found. The order of the other elements is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::Empty`] if the list is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use adaptive_list::error::ListError;
    /// use adaptive_list::CountList;
    ///
    /// let mut list = CountList::new();
    /// assert_eq!(list.remove(&1), Err(ListError::Empty));
    ///
    /// list.add(1);
    /// assert_eq!(list.remove(&2), Ok(false));
    /// assert_eq!(list.remove(&1), Ok(true));
    /// assert!(list.is_empty());
    /// ```
    pub fn remove(&mut self, value: &T) -> Result<bool, ListError>
    where
        T: PartialEq,
    {
        if self.is_empty() {
            return Err(ListError::Empty);
        }
        match self.chain.find(|entry| entry.value == *value) {
            Some(node) => {
                // SAFETY: `node` was just found in `self.chain`.
                drop(unsafe { self.chain.remove(node) });
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Looks up the first element equal to `value`, promotes it according to
    /// the policy and returns its entry, or `None` if no element matches.
    ///
    /// # Complexity
    ///
    /// The scan takes *O*(*n*) time. Promotion takes *O*(1) time for
    /// [`MoveToFront`] and one step per overtaken node for [`AccessCount`].
    ///
    /// # Examples
    ///
    /// ```
    /// use adaptive_list::CountList;
    ///
    /// let mut list = CountList::new();
    /// list.add('x');
    /// list.add('y');
    ///
    /// let entry = list.get(&'y').unwrap();
    /// assert_eq!(entry.value(), &'y');
    /// assert_eq!(entry.access_count(), 1);
    /// assert_eq!(list.front(), Ok(&'y'));
    ///
    /// assert!(list.get(&'z').is_none());
    /// ```
    pub fn get(&mut self, value: &T) -> Option<&Entry<T, P::Meta>>
    where
        T: PartialEq,
    {
        let node = self.chain.find(|entry| entry.value == *value)?;
        // SAFETY: `node` was just found in `self.chain`, and promotion only
        // relinks it, so it is still live afterwards.
        unsafe {
            self.policy.promote(&mut self.chain, node);
            Some(self.chain.element(node))
        }
    }

    /// Returns `true` if an element equal to `value` is found. Like
    /// [`get`](AdaptiveList::get), a hit promotes the element.
    #[inline]
    pub fn contains(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.get(value).is_some()
    }

    /// Looks up the first element equal to `value` without promoting it.
    ///
    /// # Examples
    ///
    /// ```
    /// use adaptive_list::MtfList;
    ///
    /// let mut list = MtfList::new();
    /// list.add(1);
    /// list.add(2);
    /// assert_eq!(list.peek(&1).map(|entry| *entry.value()), Some(1));
    /// assert_eq!(list.front(), Ok(&2));
    /// ```
    pub fn peek(&self, value: &T) -> Option<&Entry<T, P::Meta>>
    where
        T: PartialEq,
    {
        self.entries().find(|entry| entry.value == *value)
    }

    /// Removes all elements.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    #[inline]
    pub fn clear(&mut self) {
        self.chain.clear();
    }

    /// Clones the elements, front to back, into `buffer` starting at `offset`.
    ///
    /// # Errors
    ///
    /// Nothing is written when an error is returned.
    /// - [`ListError::OffsetOutOfRange`] if `offset > buffer.len()`;
    /// - [`ListError::InsufficientCapacity`] if fewer than `len()` slots remain
    ///   after `offset`.
    ///
    /// # Examples
    ///
    /// ```
    /// use adaptive_list::error::ListError;
    /// use adaptive_list::CountList;
    /// use std::iter::FromIterator;
    ///
    /// let list = CountList::from_iter([1, 2, 3]);
    ///
    /// let mut buffer = [0; 4];
    /// assert_eq!(list.copy_to(&mut buffer, 1), Ok(()));
    /// assert_eq!(buffer, [0, 1, 2, 3]);
    ///
    /// let mut small = [0; 2];
    /// assert_eq!(
    ///     list.copy_to(&mut small, 0),
    ///     Err(ListError::InsufficientCapacity { required: 3, available: 2 })
    /// );
    /// assert_eq!(small, [0, 0]);
    /// ```
    pub fn copy_to(&self, buffer: &mut [T], offset: usize) -> Result<(), ListError>
    where
        T: Clone,
    {
        if offset > buffer.len() {
            return Err(ListError::OffsetOutOfRange {
                offset,
                len: buffer.len(),
            });
        }
        let available = buffer.len() - offset;
        if available < self.len() {
            return Err(ListError::InsufficientCapacity {
                required: self.len(),
                available,
            });
        }
        for (slot, value) in buffer[offset..].iter_mut().zip(self.iter()) {
            slot.clone_from(value);
        }
        Ok(())
    }

    /// Provides a reference to the front element.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::Empty`] if the list is empty.
    #[inline]
    pub fn front(&self) -> Result<&T, ListError> {
        self.iter().next().ok_or(ListError::Empty)
    }

    /// Provides a reference to the back element.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::Empty`] if the list is empty.
    #[inline]
    pub fn back(&self) -> Result<&T, ListError> {
        self.iter().next_back().ok_or(ListError::Empty)
    }

    /// Provides a forward iterator over the values, front to back.
    ///
    /// The iterator borrows the list, so the list cannot be changed while it
    /// is alive:
    ///
    /// ```compile_fail
    /// use adaptive_list::MtfList;
    ///
    /// let mut list = MtfList::new();
    /// list.add(1);
    /// let mut iter = list.iter();
    ///
    /// // Won't compile, because list is already borrowed immutably.
    /// list.add(2);
    /// println!("{:?}", iter.next());
    /// ```
    ///
    /// # Examples
    ///
    /// ```
    /// use adaptive_list::CountList;
    ///
    /// let mut list = CountList::new();
    /// list.add(0);
    /// list.add(1);
    /// list.add(2);
    ///
    /// let mut iter = list.iter();
    /// assert_eq!(iter.next(), Some(&0));
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T, P::Meta> {
        Iter::new(self.chain.iter())
    }

    /// Provides a forward iterator over the entries, front to back.
    ///
    /// # Examples
    ///
    /// ```
    /// use adaptive_list::CountList;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = CountList::from_iter(['a', 'b']);
    /// list.get(&'b');
    /// let counts: Vec<_> = list
    ///     .entries()
    ///     .map(|entry| (*entry.value(), entry.access_count()))
    ///     .collect();
    /// assert_eq!(counts, vec![('b', 1), ('a', 0)]);
    /// ```
    #[inline]
    pub fn entries(&self) -> Entries<'_, T, P::Meta> {
        Entries::new(self.chain.iter())
    }

    /// Verifies the link structure, the stored length and the policy's
    /// ordering.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.chain.check_links()?;
        self.policy.check_order(&self.chain)
    }
}

impl<T: Debug, P: Policy> Debug for AdaptiveList<T, P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, P: Policy> Default for AdaptiveList<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ListError;
    use crate::{CountList, MtfList};
    use std::cell::RefCell;
    use std::iter::FromIterator;

    fn values<T: Clone, P: crate::Policy>(list: &crate::AdaptiveList<T, P>) -> Vec<T> {
        list.iter().cloned().collect()
    }

    fn counts(list: &CountList<i32>) -> Vec<(i32, u64)> {
        list.entries()
            .map(|entry| (*entry.value(), entry.access_count()))
            .collect()
    }

    #[test]
    fn mtf_items_move_to_front() {
        let mut list = MtfList::new();
        for value in 1..=5 {
            list.add(value);
        }
        assert_eq!(list.front(), Ok(&5));

        assert!(list.contains(&3));
        assert_eq!(list.front(), Ok(&3));

        assert!(list.contains(&5));
        assert_eq!(list.front(), Ok(&5));

        assert!(list.contains(&5));
        assert_eq!(list.front(), Ok(&5));

        assert_eq!(values(&list), vec![5, 3, 4, 2, 1]);
        list.check_invariants().unwrap();
    }

    #[test]
    fn count_items_ordered_by_accesses() {
        let mut list = CountList::new();
        list.add(1);
        list.add(2);
        assert_eq!(list.front(), Ok(&1));

        assert!(list.contains(&1));
        assert_eq!(list.front(), Ok(&1));
        assert_eq!(counts(&list), vec![(1, 1), (2, 0)]);

        assert!(list.contains(&2));
        assert_eq!(list.front(), Ok(&1));
        assert_eq!(counts(&list), vec![(1, 1), (2, 1)]);

        assert!(list.contains(&2));
        assert_eq!(list.front(), Ok(&2));
        assert_eq!(counts(&list), vec![(2, 2), (1, 1)]);
        list.check_invariants().unwrap();
    }

    #[test]
    fn count_promotion_overtakes_several_nodes() {
        let mut list = CountList::from_iter(0..6);
        for _ in 0..3 {
            list.get(&1);
        }
        list.get(&4);
        list.get(&4);
        assert_eq!(values(&list), vec![1, 4, 0, 2, 3, 5]);

        // the back node climbs past every zero count in one lookup
        assert_eq!(list.get(&5).map(|entry| entry.access_count()), Some(1));
        assert_eq!(values(&list), vec![1, 4, 5, 0, 2, 3]);
        assert_eq!(list.back(), Ok(&3));
        list.check_invariants().unwrap();
    }

    #[test]
    fn remove_on_empty_list_fails() {
        let mut mtf = MtfList::<i32>::new();
        assert_eq!(mtf.remove(&1), Err(ListError::Empty));
        let mut count = CountList::<i32>::new();
        assert_eq!(count.remove(&1), Err(ListError::Empty));
    }

    #[test]
    fn remove_keeps_order() {
        let mut list = CountList::from_iter(0..5);
        list.get(&3);
        list.get(&3);
        list.get(&1);
        assert_eq!(values(&list), vec![3, 1, 0, 2, 4]);

        assert_eq!(list.remove(&1), Ok(true));
        assert_eq!(values(&list), vec![3, 0, 2, 4]);
        assert_eq!(list.remove(&3), Ok(true));
        assert_eq!(list.remove(&4), Ok(true));
        assert_eq!(list.remove(&4), Ok(false));
        assert_eq!(values(&list), vec![0, 2]);
        assert_eq!(list.front(), Ok(&0));
        assert_eq!(list.back(), Ok(&2));
        assert_eq!(list.len(), 2);
        list.check_invariants().unwrap();
    }

    #[test]
    fn remove_first_match_only() {
        let mut list = MtfList::new();
        list.add(1);
        list.add(2);
        list.add(1);
        assert_eq!(list.remove(&1), Ok(true));
        assert_eq!(values(&list), vec![2, 1]);
    }

    #[test]
    fn add_then_remove_round_trip() {
        let mut list = MtfList::from_iter(0..3);
        let before = values(&list);
        list.add(9);
        assert_eq!(list.len(), 4);
        assert_eq!(list.remove(&9), Ok(true));
        assert_eq!(list.len(), 3);
        assert_eq!(values(&list), before);
        assert!(list.peek(&9).is_none());
    }

    #[test]
    fn get_missing_does_not_reorder() {
        let mut list = CountList::from_iter(1..=6);
        for missing in 7..=9 {
            assert!(list.get(&missing).is_none());
            assert!(!list.contains(&missing));
        }
        assert_eq!(values(&list), (1..=6).collect::<Vec<_>>());
        assert!(list.entries().all(|entry| entry.access_count() == 0));
    }

    #[test]
    fn peek_does_not_promote() {
        let mut list = CountList::from_iter(1..=3);
        let entry = list.peek(&3).unwrap();
        assert_eq!(entry.access_count(), 0);
        assert_eq!(values(&list), vec![1, 2, 3]);
        assert!(list.peek(&4).is_none());
        list.get(&3);
        assert_eq!(list.peek(&3).unwrap().access_count(), 1);
    }

    #[test]
    fn front_and_back_on_empty_list_fail() {
        let list = CountList::<u8>::new();
        assert_eq!(list.front(), Err(ListError::Empty));
        assert_eq!(list.back(), Err(ListError::Empty));
        let list = MtfList::<u8>::new();
        assert_eq!(list.front(), Err(ListError::Empty));
        assert_eq!(list.back(), Err(ListError::Empty));
    }

    #[test]
    fn clear_empties_the_list() {
        let mut list = MtfList::from_iter(1..=3);
        list.clear();
        assert_eq!(list.len(), 0);
        assert!(list.is_empty());
        assert_eq!(list.front(), Err(ListError::Empty));
        list.check_invariants().unwrap();

        list.add(4);
        assert_eq!(values(&list), vec![4]);
    }

    #[test]
    fn copy_to_valid_buffer() {
        let list = CountList::from_iter(1..=3);
        let mut buffer = [0; 3];
        list.copy_to(&mut buffer, 0).unwrap();
        assert_eq!(buffer, [1, 2, 3]);

        // MTF admits at the front
        let list = MtfList::from_iter(1..=3);
        list.copy_to(&mut buffer, 0).unwrap();
        assert_eq!(buffer, [3, 2, 1]);

        // an empty list fits at the very end of a buffer
        let empty = CountList::<i32>::new();
        assert_eq!(empty.copy_to(&mut buffer, 3), Ok(()));
        assert_eq!(buffer, [3, 2, 1]);
    }

    #[test]
    fn copy_to_rejects_bad_bounds_without_writing() {
        let list = CountList::from_iter(1..=3);

        let mut small = [0; 2];
        assert_eq!(
            list.copy_to(&mut small, 0),
            Err(ListError::InsufficientCapacity {
                required: 3,
                available: 2
            })
        );
        assert_eq!(small, [0, 0]);

        let mut buffer = [0; 4];
        assert_eq!(
            list.copy_to(&mut buffer, 2),
            Err(ListError::InsufficientCapacity {
                required: 3,
                available: 2
            })
        );
        assert_eq!(
            list.copy_to(&mut buffer, 5),
            Err(ListError::OffsetOutOfRange { offset: 5, len: 4 })
        );
        assert_eq!(buffer, [0; 4]);
    }

    #[test]
    fn list_drop() {
        #[derive(Debug, PartialEq)]
        struct DropChecker<'a> {
            value: i32,
            dropped: &'a RefCell<Vec<i32>>,
        }
        impl<'a> Drop for DropChecker<'a> {
            fn drop(&mut self) {
                self.dropped.borrow_mut().push(self.value);
            }
        }
        let dropped = RefCell::new(Vec::new());
        let mut list = CountList::new();
        for value in 1..=3 {
            list.add(DropChecker {
                value,
                dropped: &dropped,
            });
        }
        let needle = DropChecker {
            value: 2,
            dropped: &dropped,
        };
        assert_eq!(list.remove(&needle), Ok(true));
        assert_eq!(dropped.borrow().as_slice(), &[2]);
        drop(list);
        assert_eq!(dropped.borrow().as_slice(), &[2, 1, 3]);
    }

    #[test]
    fn policy_kind_matches_type() {
        assert_eq!(MtfList::<()>::new().policy_kind(), crate::PolicyKind::MoveToFront);
        assert_eq!(CountList::<()>::new().policy_kind(), crate::PolicyKind::AccessCount);
    }

    #[test]
    fn over_aligned_values() {
        #[repr(align(64))]
        #[derive(Debug, Clone, Copy, PartialEq)]
        struct Wide(u8);

        let mut mtf = MtfList::from_iter(vec![Wide(1), Wide(2), Wide(3)]);
        assert_eq!(mtf.front(), Ok(&Wide(3)));
        assert!(mtf.get(&Wide(1)).is_some());
        assert_eq!(mtf.front(), Ok(&Wide(1)));
        assert_eq!(mtf.remove(&Wide(2)), Ok(true));
        assert_eq!(mtf.back(), Ok(&Wide(3)));
        mtf.check_invariants().unwrap();

        let mut count = CountList::from_iter(vec![Wide(1), Wide(2)]);
        count.get(&Wide(2));
        assert_eq!(count.front(), Ok(&Wide(2)));
        count.check_invariants().unwrap();
        count.clear();
        assert!(count.is_empty());
    }
}
