//! Client-side state containers.
//!
//! Each container is a plain value type with the mutation operations that
//! keep its invariants ([`Cart`], [`Wishlist`], [`FilterState`],
//! [`SessionState`]). The root composition ([`crate::app::Storefront`]) owns
//! one [`Shared`] handle per container and hands clones of those handles to
//! whatever needs to read or update them.
//!
//! # Threading
//!
//! The storefront runs a single-threaded, run-to-completion event model.
//! [`Shared`] is built on `Rc<RefCell<_>>` and is `!Send`, so a
//! container cannot be mutated from a background thread.

pub mod cart;
pub mod filters;
pub mod session;
pub mod wishlist;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

pub use cart::{Cart, CartError, CartLineItem};
pub use filters::{FilterCriteria, FilterPatch, FilterState, SortOrder};
pub use session::{Identity, SessionState};
pub use wishlist::Wishlist;

type Listener<T> = Box<dyn Fn(&T)>;

struct SharedInner<T> {
    value: RefCell<T>,
    listeners: RefCell<Vec<Listener<T>>>,
}

/// A shared, mutable-by-contract handle to one state container.
///
/// Cloning the handle shares the container; it never copies the value.
/// Reads always observe the most recent committed update, and every
/// subscribed listener runs synchronously before [`Shared::update`] returns.
///
/// Closures passed to [`Shared::read`], [`Shared::update`] and listeners must
/// not call back into `update` on the same handle.
pub struct Shared<T> {
    inner: Rc<SharedInner<T>>,
}

impl<T> Shared<T> {
    /// Wrap a container value in a new handle.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(SharedInner {
                value: RefCell::new(value),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Read from the container.
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    /// Apply a mutation and notify listeners.
    ///
    /// The closure should go through the container's own operations so its
    /// invariants hold; the fields of every container are private.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = f(&mut self.inner.value.borrow_mut());
        self.notify();
        result
    }

    /// Replace the whole container value and notify listeners.
    pub fn replace(&self, value: T) -> T {
        let previous = self.inner.value.replace(value);
        self.notify();
        previous
    }

    /// Register a listener that observes the container after every update.
    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) {
        self.inner.listeners.borrow_mut().push(Box::new(listener));
    }

    /// Whether two handles point at the same container.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn notify(&self) {
        let value = self.inner.value.borrow();
        for listener in self.inner.listeners.borrow().iter() {
            listener(&value);
        }
    }
}

impl<T: Clone> Shared<T> {
    /// Clone the current value out of the container.
    #[must_use]
    pub fn get(&self) -> T {
        self.read(T::clone)
    }
}

impl<T: Default> Default for Shared<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shared")
            .field("value", &self.inner.value.borrow())
            .field("listeners", &self.inner.listeners.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn test_clones_share_state() {
        let a = Shared::new(1_u32);
        let b = a.clone();

        a.update(|v| *v += 1);

        assert_eq!(b.get(), 2);
        assert!(a.ptr_eq(&b));
    }

    #[test]
    fn test_listener_runs_synchronously() {
        let handle = Shared::new(Vec::<u32>::new());
        let seen = Rc::new(Cell::new(0_usize));

        let seen_in_listener = Rc::clone(&seen);
        handle.subscribe(move |v| seen_in_listener.set(v.len()));

        handle.update(|v| v.push(7));
        assert_eq!(seen.get(), 1);

        handle.replace(vec![1, 2, 3]);
        assert_eq!(seen.get(), 3);
    }

    #[test]
    fn test_independent_handles_are_distinct() {
        let a = Shared::new(0_u8);
        let b = Shared::new(0_u8);
        assert!(!a.ptr_eq(&b));
    }
}
