//! Error types for the adaptive lists.
//!
//! - [`ListError`]: returned by container operations that need a non-empty
//!   list or a large enough destination buffer.
//! - [`InvariantError`]: returned by `check_invariants` when the link
//!   structure or a policy's ordering is broken.
//! - [`ConfigError`]: returned when a policy name cannot be parsed.
//!
//! ```
//! use adaptive_list::error::ListError;
//! use adaptive_list::CountList;
//!
//! let mut list = CountList::<i32>::new();
//! assert_eq!(list.remove(&1), Err(ListError::Empty));
//! ```

use std::fmt;

/// Error returned by container operations.
///
/// Every check happens before the list or the destination buffer is touched,
/// so a failed call leaves both unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListError {
    /// `remove`, `front` or `back` was called on an empty list.
    Empty,
    /// `copy_to` was given an offset past the end of the buffer.
    OffsetOutOfRange { offset: usize, len: usize },
    /// `copy_to` was given a buffer with too few slots after the offset.
    InsufficientCapacity { required: usize, available: usize },
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListError::Empty => f.write_str("the list is empty"),
            ListError::OffsetOutOfRange { offset, len } => write!(
                f,
                "offset {} is out of range for a buffer of length {}",
                offset, len
            ),
            ListError::InsufficientCapacity {
                required,
                available,
            } => write!(
                f,
                "buffer has {} slots after the offset but the list holds {} elements",
                available, required
            ),
        }
    }
}

impl std::error::Error for ListError {}

/// A broken structural or ordering property found by
/// [`AdaptiveList::check_invariants`](crate::AdaptiveList::check_invariants).
///
/// The text names the failing property and where the walk found it, e.g. a
/// node whose `prev` does not mirror its predecessor's `next`, or an access
/// count larger than the one in front of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    #[inline]
    pub(crate) fn new(what: impl Into<String>) -> Self {
        Self(what.into())
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "list invariant violated: {}", self.0)
    }
}

impl std::error::Error for InvariantError {}

/// A policy name that [`PolicyKind`](crate::PolicyKind) does not recognize.
///
/// ```
/// use adaptive_list::PolicyKind;
///
/// let err = "lru".parse::<PolicyKind>().unwrap_err();
/// assert_eq!(err.input(), "lru");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    input: String,
}

impl ConfigError {
    pub(crate) fn unknown_policy(input: &str) -> Self {
        Self {
            input: input.to_owned(),
        }
    }

    /// The rejected policy name, as given.
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown reorganization policy {:?}, expected \"move-to-front\" or \"access-count\"",
            self.input
        )
    }
}

impl std::error::Error for ConfigError {}
