//! Change listeners.
//!
//! A small observer list: components register closures with
//! [`Listeners::subscribe`] and get a [`SubscriptionId`] back, which is the
//! only handle needed to remove them again.
//!
//! # Examples
//!
//! ```ignore
//! use agentation_ui::Listeners;
//!
//! let mut listeners: Listeners<usize> = Listeners::new();
//! let id = listeners.subscribe(|len| log::debug!("store now holds {}", len));
//! listeners.emit(&3);
//! listeners.unsubscribe(id);
//! ```

use std::fmt;

/// Handle returned by [`Listeners::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// An ordered list of change listeners receiving `&T`.
pub struct Listeners<T> {
    next_id: u64,
    entries: Vec<(SubscriptionId, Box<dyn FnMut(&T)>)>,
}

impl<T> Listeners<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    /// Register a listener. Listeners are called in subscription order.
    pub fn subscribe<F>(&mut self, f: F) -> SubscriptionId
    where
        F: FnMut(&T) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(f)));
        id
    }

    /// Remove a listener. Returns false if the id was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// Call every listener with `value`.
    pub fn emit(&mut self, value: &T) {
        for (_, f) in self.entries.iter_mut() {
            f(value);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Listeners<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_emit_in_subscription_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut listeners: Listeners<u32> = Listeners::new();

        let a = seen.clone();
        listeners.subscribe(move |v| a.borrow_mut().push(("a", *v)));
        let b = seen.clone();
        listeners.subscribe(move |v| b.borrow_mut().push(("b", *v)));

        listeners.emit(&7);
        assert_eq!(*seen.borrow(), vec![("a", 7), ("b", 7)]);
    }

    #[test]
    fn test_unsubscribe() {
        let count = Rc::new(RefCell::new(0));
        let mut listeners: Listeners<()> = Listeners::new();
        let c = count.clone();
        let id = listeners.subscribe(move |_| *c.borrow_mut() += 1);

        listeners.emit(&());
        assert!(listeners.unsubscribe(id));
        assert!(!listeners.unsubscribe(id));
        listeners.emit(&());

        assert_eq!(*count.borrow(), 1);
        assert!(listeners.is_empty());
    }
}
