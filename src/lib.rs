//! This crate provides self-organizing lists: doubly-linked lists with owned
//! nodes that reorder themselves on every successful lookup, so that values
//! looked up often or recently drift toward the front and are found sooner by
//! the next linear scan.
//!
//! Two reorganization policies share one list skeleton, [`AdaptiveList`]:
//! - [`MoveToFront`] ([`MtfList`]): a found value is relinked to the front;
//! - [`AccessCount`] ([`CountList`]): a found value's counter is bumped and the
//!   value is swapped toward the front past every value with a smaller count,
//!   keeping counts non-increasing from front to back.
//!
//! [`AnyList`] picks one of the two at runtime from a [`PolicyKind`].
//!
//! Here is a quick example showing how the lists work.
//!
//! ```
//! use adaptive_list::{CountList, MtfList};
//!
//! let mut mtf = MtfList::new();
//! for value in 1..=5 {
//!     mtf.add(value);
//! }
//! assert_eq!(mtf.front(), Ok(&5)); // MTF admits new values at the front
//!
//! assert!(mtf.contains(&3));
//! assert_eq!(mtf.front(), Ok(&3)); // the lookup moved 3 to the front
//!
//! let mut count = CountList::new();
//! count.add(1);
//! count.add(2);
//! count.get(&1);
//! count.get(&2);
//! assert_eq!(count.front(), Ok(&1)); // equal counts do not swap
//! count.get(&2);
//! assert_eq!(count.front(), Ok(&2)); // 2 was found more often than 1
//! ```
//!
//! # Memory Layout
//!
//! The nodes form a cycle closed by a ghost node, like the following graph:
//! ```text
//!          ┌─────────────────────────────────────────────────────────────────────┐
//!          ↓                                                     (Ghost) Node N  │
//!    ╔═══════════╗           ╔═══════════╗                        ┌───────────┐  │
//!    ║   next    ║ ────────→ ║   next    ║ ────────→ ┄┄ ────────→ │   next    │ ─┘
//!    ╟───────────╢           ╟───────────╢     Node 2, 3, ...     ├───────────┤
//! ┌─ ║   prev    ║ ←──────── ║   prev    ║ ←──────── ┄┄ ←──────── │   prev    │
//! │  ╟───────────╢           ╟───────────╢                        ├───────────┤
//! │  ║   value   ║           ║   value   ║                        ┊No payload ┊
//! │  ╟───────────╢           ╟───────────╢                        └╌╌╌╌╌╌╌╌╌╌╌┘
//! │  ║  (count)  ║           ║  (count)  ║                            ↑   ↑
//! │  ╚═══════════╝           ╚═══════════╝                            │   │
//! │      Node 0                  Node 1                               │   │
//! └───────────────────────────────────────────────────────────────────┘   │
//! ╔═══════════╗                                                           │
//! ║   ghost   ║ ──────────────────────────────────────────────────────────┘
//! ╟───────────╢
//! ║    len    ║
//! ╚═══════════╝
//!     List
//! ```
//!
//! Each node is allocated on the heap and owned by the list; `next` and `prev`
//! never manage lifetime. The node carries the value and the policy's state:
//! nothing for [`MoveToFront`], an [`AccessCounter`] for [`AccessCount`]. The
//! ghost node has *NO* payload. Its `next` is the front node and its `prev` is
//! the back node, so the front's predecessor and the back's successor are both
//! the ghost, and an empty list is a ghost linked to itself.
//!
//! Promotion only relinks nodes: moving to the front and swapping with the
//! predecessor are both constant-time.
//!
//! # Errors
//!
//! Operations that need a non-empty list (`remove`, `front`, `back`) or a large
//! enough buffer (`copy_to`) return a [`ListError`](error::ListError) and leave
//! the list untouched.
//!
//! # Iteration
//!
//! [`AdaptiveList::iter`] walks the live order front to back. The iterator
//! borrows the list, so lookups, which reorder the list, cannot happen while
//! it is alive.
//!
//! [`MoveToFront`]: crate::policy::MoveToFront
//! [`AccessCount`]: crate::policy::AccessCount
//! [`AccessCounter`]: crate::policy::AccessCounter

#[doc(inline)]
pub use any::{AnyIter, AnyList};
#[doc(inline)]
pub use list::iterator::{Entries, IntoIter, Iter};
#[doc(inline)]
pub use list::{AdaptiveList, CountList, Entry, MtfList};
#[doc(inline)]
pub use policy::{AccessCount, AccessCounter, MoveToFront, Policy, PolicyKind};

pub mod error;
pub mod list;
pub mod policy;

mod any;
mod chain;
