//! Reorganization policies.
//!
//! A policy decides three things for an [`AdaptiveList`]: the state kept next
//! to every value, the end new values are admitted at, and how a node found by
//! a lookup is promoted toward the front.
//!
//! | policy          | per-node state    | admitted at | promotion                                |
//! |-----------------|-------------------|-------------|------------------------------------------|
//! | [`MoveToFront`] | none              | front       | relink to the front                      |
//! | [`AccessCount`] | [`AccessCounter`] | back        | bump the count, swap past smaller counts |
//!
//! The [`Policy`] trait is sealed: the list relies on each policy keeping the
//! chain well-formed, so only the policies of this crate can implement it.
//!
//! [`AdaptiveList`]: crate::AdaptiveList

use std::fmt;
use std::ptr::NonNull;
use std::str::FromStr;

use crate::chain::{Chain, Node};
use crate::error::{ConfigError, InvariantError};
use crate::list::Entry;

mod private {
    pub trait Sealed {}
}

/// A reorganization policy for an [`AdaptiveList`](crate::AdaptiveList).
pub trait Policy: private::Sealed + Default + Clone {
    /// State stored in every node next to its value.
    type Meta: Default;

    /// The runtime tag of this policy.
    const KIND: PolicyKind;

    /// Allocate a node for a freshly added `entry` at this policy's admission end.
    #[doc(hidden)]
    fn admit<T>(
        &self,
        chain: &mut Chain<Entry<T, Self::Meta>>,
        entry: Entry<T, Self::Meta>,
    ) -> NonNull<Node<Entry<T, Self::Meta>>>;

    /// Relocate `node` after a successful lookup.
    ///
    /// It is unsafe because `node` must be a live node of `chain`.
    #[doc(hidden)]
    unsafe fn promote<T>(
        &self,
        chain: &mut Chain<Entry<T, Self::Meta>>,
        node: NonNull<Node<Entry<T, Self::Meta>>>,
    );

    /// Verify the ordering this policy maintains between operations.
    #[doc(hidden)]
    fn check_order<T>(&self, _chain: &Chain<Entry<T, Self::Meta>>) -> Result<(), InvariantError> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Move-To-Front
// ---------------------------------------------------------------------------

/// Relinks every looked-up node to the front, so the front is always the most
/// recently added or looked-up value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MoveToFront;

impl private::Sealed for MoveToFront {}

impl Policy for MoveToFront {
    type Meta = ();

    const KIND: PolicyKind = PolicyKind::MoveToFront;

    fn admit<T>(
        &self,
        chain: &mut Chain<Entry<T, ()>>,
        entry: Entry<T, ()>,
    ) -> NonNull<Node<Entry<T, ()>>> {
        chain.push_front(entry)
    }

    unsafe fn promote<T>(&self, chain: &mut Chain<Entry<T, ()>>, node: NonNull<Node<Entry<T, ()>>>) {
        if chain.prev_node(node).is_none() {
            return;
        }
        chain.unlink(node);
        chain.link_to_front(node);
    }
}

// ---------------------------------------------------------------------------
// Access-Count
// ---------------------------------------------------------------------------

/// Keeps nodes in non-increasing order of how often they were looked up.
///
/// A lookup bumps the node's [`AccessCounter`] and swaps the node toward the
/// front while its predecessor has a strictly smaller count. Equal counts never
/// swap, so among equally popular values the earlier one stays ahead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AccessCount;

/// Number of successful lookups of a value in a [`CountList`](crate::CountList).
///
/// The counter saturates at `u64::MAX`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccessCounter(u64);

impl AccessCounter {
    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }

    #[inline]
    fn increment(&mut self) {
        self.0 = self.0.saturating_add(1);
    }
}

impl private::Sealed for AccessCount {}

impl Policy for AccessCount {
    type Meta = AccessCounter;

    const KIND: PolicyKind = PolicyKind::AccessCount;

    fn admit<T>(
        &self,
        chain: &mut Chain<Entry<T, AccessCounter>>,
        entry: Entry<T, AccessCounter>,
    ) -> NonNull<Node<Entry<T, AccessCounter>>> {
        // A fresh count of zero is never larger than the back node's count.
        chain.push_back(entry)
    }

    unsafe fn promote<T>(
        &self,
        chain: &mut Chain<Entry<T, AccessCounter>>,
        node: NonNull<Node<Entry<T, AccessCounter>>>,
    ) {
        let counter = {
            let entry = chain.element_mut(node);
            entry.meta.increment();
            entry.meta
        };
        while let Some(prev) = chain.prev_node(node) {
            if chain.element(prev).meta >= counter {
                break;
            }
            chain.swap_toward_front(node);
        }
    }

    fn check_order<T>(
        &self,
        chain: &Chain<Entry<T, AccessCounter>>,
    ) -> Result<(), InvariantError> {
        let mut counts = chain.iter().map(|entry| entry.meta.get());
        let mut prev = match counts.next() {
            Some(count) => count,
            None => return Ok(()),
        };
        for (position, count) in counts.enumerate() {
            if count > prev {
                return Err(InvariantError::new(format!(
                    "access count {} at position {} exceeds its predecessor's count {}",
                    count,
                    position + 1,
                    prev
                )));
            }
            prev = count;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// PolicyKind
// ---------------------------------------------------------------------------

/// Runtime selector of a reorganization policy, used by
/// [`AnyList`](crate::AnyList).
///
/// Parses from `"mtf"`, `"move-to-front"`, `"count"` or `"access-count"`,
/// ignoring ASCII case and surrounding whitespace.
///
/// ```
/// use adaptive_list::PolicyKind;
///
/// assert_eq!("MTF".parse(), Ok(PolicyKind::MoveToFront));
/// assert_eq!(" access-count ".parse(), Ok(PolicyKind::AccessCount));
/// assert_eq!(PolicyKind::AccessCount.to_string(), "access-count");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    #[default]
    MoveToFront,
    AccessCount,
}

impl PolicyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PolicyKind::MoveToFront => "move-to-front",
            PolicyKind::AccessCount => "access-count",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mtf" | "move-to-front" => Ok(PolicyKind::MoveToFront),
            "count" | "access-count" => Ok(PolicyKind::AccessCount),
            _ => Err(ConfigError::unknown_policy(s)),
        }
    }
}
