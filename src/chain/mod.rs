use std::marker::PhantomData;
use std::mem::MaybeUninit;
use std::ptr::NonNull;

use crate::error::InvariantError;

pub use self::iterator::Iter;

mod iterator;

/// The `Chain` is the node storage shared by every reorganization policy: a
/// doubly-linked list with owned nodes, closed into a cycle by a ghost node.
///
/// The `Chain` contains:
/// - a pointer `ghost` to the ghost node, whose `next` is the front node and
///   whose `prev` is the back node (or the ghost itself when the chain is empty);
/// - a length field `len` counting the live nodes.
///
/// The ghost plays the role of "no neighbor": the front node's `prev` and the
/// back node's `next` both point at it. This removes every endpoint special
/// case from the relinking primitives.
///
/// # Relinking primitives
///
/// [`link_to_front`], [`link_to_back`], [`unlink`] and [`swap_toward_front`]
/// only rewrite links. They never allocate, free, or touch `len`; those are the
/// business of [`push_front`], [`push_back`] and [`remove`].
///
/// The primitives are `unsafe` because they do not check that the node belongs
/// to this chain. Passing a node of another chain makes both chains ill-formed.
///
/// [`link_to_front`]: Chain::link_to_front
/// [`link_to_back`]: Chain::link_to_back
/// [`unlink`]: Chain::unlink
/// [`swap_toward_front`]: Chain::swap_toward_front
/// [`push_front`]: Chain::push_front
/// [`push_back`]: Chain::push_back
/// [`remove`]: Chain::remove
pub struct Chain<E> {
    ghost: NonNull<Node<MaybeUninit<E>>>,
    /// the number of live nodes
    len: usize,
    _marker: PhantomData<Box<Node<E>>>,
}

/// A heap-allocated node of a [`Chain`].
///
/// `next` and `prev` are non-owning: a node is owned by the chain that
/// allocated it and released only through [`Chain::remove`] or by dropping the
/// chain. A detached node links to itself.
#[repr(C)]
pub struct Node<E> {
    next: NonNull<Node<E>>,
    prev: NonNull<Node<E>>,
    element: E,
}

// private link accessors
//
// Links are read and written through raw places so that the ghost, which is
// allocated as a `Node<MaybeUninit<E>>`, is never borrowed as a whole `Node<E>`.
// Both types share one layout, so the ghost's links sit where `Node<E>`
// expects them, with `Node<E>`'s alignment.

#[inline]
unsafe fn next_of<E>(node: NonNull<Node<E>>) -> NonNull<Node<E>> {
    (*node.as_ptr()).next
}

#[inline]
unsafe fn prev_of<E>(node: NonNull<Node<E>>) -> NonNull<Node<E>> {
    (*node.as_ptr()).prev
}

#[inline]
unsafe fn connect<E>(prev: NonNull<Node<E>>, next: NonNull<Node<E>>) {
    (*prev.as_ptr()).next = next;
    (*next.as_ptr()).prev = prev;
}

impl<E> Chain<E> {
    /// Create an empty `Chain`.
    pub fn new() -> Self {
        let ghost = new_ghost();
        Self {
            ghost,
            len: 0,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.front_node().is_none()
    }

    #[inline]
    pub(crate) fn ghost_node(&self) -> NonNull<Node<E>> {
        self.ghost.cast()
    }

    /// The first node, or `None` if the chain is empty.
    pub fn front_node(&self) -> Option<NonNull<Node<E>>> {
        // SAFETY: `ghost.next` is always valid (either `ghost` itself, or the first node).
        let front = unsafe { next_of(self.ghost_node()) };
        self.non_ghost(front)
    }

    /// The last node, or `None` if the chain is empty.
    pub fn back_node(&self) -> Option<NonNull<Node<E>>> {
        // SAFETY: `ghost.prev` is always valid (either `ghost` itself, or the last node).
        let back = unsafe { prev_of(self.ghost_node()) };
        self.non_ghost(back)
    }

    /// The predecessor of `node`, or `None` if `node` is the front node.
    ///
    /// It is unsafe because it does not check whether `node` belongs to the chain.
    pub unsafe fn prev_node(&self, node: NonNull<Node<E>>) -> Option<NonNull<Node<E>>> {
        self.non_ghost(prev_of(node))
    }

    #[inline]
    fn non_ghost(&self, node: NonNull<Node<E>>) -> Option<NonNull<Node<E>>> {
        if node == self.ghost_node() {
            None
        } else {
            Some(node)
        }
    }

    /// Attach a detached `node` between the adjacent nodes `prev` and `next`.
    unsafe fn link_between(
        &mut self,
        prev: NonNull<Node<E>>,
        next: NonNull<Node<E>>,
        node: NonNull<Node<E>>,
    ) {
        #[cfg(debug_assertions)]
        assert_adjacent(prev, next);
        connect(prev, node);
        connect(node, next);
        #[cfg(debug_assertions)]
        {
            assert_adjacent(prev, node);
            assert_adjacent(node, next);
        }
    }

    /// Make a detached `node` the new front. On an empty chain it also becomes
    /// the back.
    ///
    /// It is unsafe because `node` must be detached and owned by this chain.
    pub unsafe fn link_to_front(&mut self, node: NonNull<Node<E>>) {
        let ghost = self.ghost_node();
        self.link_between(ghost, next_of(ghost), node);
    }

    /// Make a detached `node` the new back. On an empty chain it also becomes
    /// the front.
    ///
    /// It is unsafe because `node` must be detached and owned by this chain.
    pub unsafe fn link_to_back(&mut self, node: NonNull<Node<E>>) {
        let ghost = self.ghost_node();
        self.link_between(prev_of(ghost), ghost, node);
    }

    /// Take `node` out of its position, reconnecting its neighbors. The node is
    /// left detached (linked to itself) and still allocated.
    ///
    /// It is unsafe because it does not check whether `node` belongs to the chain.
    pub unsafe fn unlink(&mut self, node: NonNull<Node<E>>) {
        debug_assert!(node != self.ghost_node(), "cannot unlink the ghost node");
        connect(prev_of(node), next_of(node));
        (*node.as_ptr()).next = node;
        (*node.as_ptr()).prev = node;
    }

    /// Move `node` one position toward the front by exchanging it with its
    /// predecessor.
    ///
    /// ```text
    ///   before ⇄ prev ⇄ node ⇄ after   ==>   before ⇄ node ⇄ prev ⇄ after
    /// ```
    ///
    /// `before` and `after` may be the ghost, which covers the cases where
    /// `prev` is the front node and `node` is the back node.
    ///
    /// It is unsafe because it does not check whether `node` belongs to the
    /// chain. `node` must not be the front node.
    pub unsafe fn swap_toward_front(&mut self, node: NonNull<Node<E>>) {
        let prev = prev_of(node);
        debug_assert!(
            prev != self.ghost_node(),
            "cannot swap the front node toward the front"
        );
        let before = prev_of(prev);
        self.unlink(node);
        self.link_between(before, prev, node);
    }

    /// Allocate a node for `element` and make it the front. Returns the node.
    pub fn push_front(&mut self, element: E) -> NonNull<Node<E>> {
        let node = Node::new_detached(element);
        // SAFETY: `node` is freshly allocated and detached.
        unsafe { self.link_to_front(node) };
        self.len += 1;
        node
    }

    /// Allocate a node for `element` and make it the back. Returns the node.
    pub fn push_back(&mut self, element: E) -> NonNull<Node<E>> {
        let node = Node::new_detached(element);
        // SAFETY: `node` is freshly allocated and detached.
        unsafe { self.link_to_back(node) };
        self.len += 1;
        node
    }

    /// Unlink `node`, free it and return its element.
    ///
    /// It is unsafe because it does not check whether `node` belongs to the chain.
    pub unsafe fn remove(&mut self, node: NonNull<Node<E>>) -> E {
        self.unlink(node);
        self.len -= 1;
        Box::from_raw(node.as_ptr()).element
    }

    pub fn pop_front(&mut self) -> Option<E> {
        let node = self.front_node()?;
        // SAFETY: `node` is the front node of this chain.
        Some(unsafe { self.remove(node) })
    }

    pub fn pop_back(&mut self) -> Option<E> {
        let node = self.back_node()?;
        // SAFETY: `node` is the back node of this chain.
        Some(unsafe { self.remove(node) })
    }

    /// Free every node.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }

    /// Scan from the front and return the first node whose element satisfies
    /// `pred`.
    pub fn find<F>(&self, mut pred: F) -> Option<NonNull<Node<E>>>
    where
        F: FnMut(&E) -> bool,
    {
        let ghost = self.ghost_node();
        // SAFETY: every node between `ghost.next` and `ghost` is a live node.
        let mut ptr = unsafe { next_of(ghost) };
        while ptr != ghost {
            let node = unsafe { ptr.as_ref() };
            if pred(&node.element) {
                return Some(ptr);
            }
            ptr = node.next;
        }
        None
    }

    /// It is unsafe because it does not check whether `node` belongs to the chain.
    #[inline]
    pub unsafe fn element(&self, node: NonNull<Node<E>>) -> &E {
        &(*node.as_ptr()).element
    }

    /// It is unsafe because it does not check whether `node` belongs to the chain.
    #[inline]
    pub unsafe fn element_mut(&mut self, node: NonNull<Node<E>>) -> &mut E {
        &mut (*node.as_ptr()).element
    }

    /// Provides a forward iterator over the elements.
    #[inline]
    pub fn iter(&self) -> Iter<'_, E> {
        Iter::new(self)
    }

    /// Walk the chain forward and verify that every `prev` link mirrors the
    /// `next` link it came from, that the walk closes at the ghost, and that it
    /// visits exactly `len` nodes.
    pub fn check_links(&self) -> Result<(), InvariantError> {
        let ghost = self.ghost_node();
        let mut visited = 0_usize;
        let mut prev = ghost;
        // SAFETY: each pointer followed is checked against `len` before the next
        // dereference, so a broken cycle is reported instead of walked forever.
        let mut ptr = unsafe { next_of(ghost) };
        while ptr != ghost {
            if unsafe { prev_of(ptr) } != prev {
                return Err(InvariantError::new(format!(
                    "node {} does not link back to its predecessor",
                    visited
                )));
            }
            visited += 1;
            if visited > self.len {
                return Err(InvariantError::new(format!(
                    "forward walk visits more than len = {} nodes",
                    self.len
                )));
            }
            prev = ptr;
            ptr = unsafe { next_of(ptr) };
        }
        if unsafe { prev_of(ghost) } != prev {
            return Err(InvariantError::new(
                "the back node is not the last node of the forward walk",
            ));
        }
        if visited != self.len {
            return Err(InvariantError::new(format!(
                "forward walk visits {} nodes but len = {}",
                visited, self.len
            )));
        }
        Ok(())
    }
}

impl<E> Node<E> {
    /// Allocate a detached node with given element.
    fn new_detached(element: E) -> NonNull<Node<E>> {
        let node = Box::new(Node {
            next: NonNull::dangling(),
            prev: NonNull::dangling(),
            element,
        });
        let ptr = NonNull::from(Box::leak(node));
        // SAFETY: `ptr` was just leaked from a live box.
        unsafe {
            (*ptr.as_ptr()).next = ptr;
            (*ptr.as_ptr()).prev = ptr;
        }
        ptr
    }
}

/// A detached ghost links to itself, which is exactly an empty chain. Its
/// element slot is never initialized nor read.
fn new_ghost<E>() -> NonNull<Node<MaybeUninit<E>>> {
    Node::new_detached(MaybeUninit::uninit())
}

#[cfg(debug_assertions)]
fn assert_adjacent<E>(prev: NonNull<Node<E>>, next: NonNull<Node<E>>) {
    unsafe {
        assert_eq!(next_of(prev), next);
        assert_eq!(prev_of(next), prev);
    }
}

impl<E> Drop for Chain<E> {
    fn drop(&mut self) {
        self.clear();
        // SAFETY: the ghost was allocated by `new_ghost` and is freed exactly once.
        unsafe { drop(Box::from_raw(self.ghost.as_ptr())) };
    }
}

unsafe impl<E: Send> Send for Chain<E> {}

unsafe impl<E: Sync> Sync for Chain<E> {}
