//! Single-threaded observable values
//!
//! A value cell with a list of change subscribers. Subscribers run
//! synchronously, in subscription order, after the new value is stored, so a
//! subscriber that reads the cell always sees the value it was notified of.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Handle returned by [`Observable::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber<T> = Rc<dyn Fn(&T)>;

pub struct Observable<T> {
    value: RefCell<T>,
    subscribers: RefCell<Vec<(SubscriptionId, Subscriber<T>)>>,
    next_id: Cell<u64>,
}

impl<T: Clone + PartialEq> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: RefCell::new(value),
            subscribers: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    /// Borrows the current value without cloning it
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.borrow())
    }

    /// Stores `value` and notifies subscribers. Setting an equal value is a
    /// no-op and notifies nobody. Returns whether the value changed.
    pub fn set(&self, value: T) -> bool {
        if *self.value.borrow() == value {
            return false;
        }
        self.replace(value);
        true
    }

    /// Stores `value` and notifies subscribers even if it equals the current
    /// value.
    pub fn replace(&self, value: T) {
        *self.value.borrow_mut() = value.clone();

        // Snapshot so subscribers may subscribe or set re-entrantly.
        let subscribers: Vec<Subscriber<T>> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, subscriber)| subscriber.clone())
            .collect();
        for subscriber in subscribers {
            subscriber(&value);
        }
    }

    pub fn subscribe(&self, subscriber: impl Fn(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.subscribers
            .borrow_mut()
            .push((id, Rc::new(subscriber)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(sub_id, _)| *sub_id != id);
        subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }
}

impl<T: Clone + PartialEq + Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &*self.value.borrow())
            .field("subscribers", &self.subscribers.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_notifies_after_store() {
        let cell = Rc::new(Observable::new(String::new()));
        let seen = Rc::new(RefCell::new(Vec::new()));

        let (reader, log) = (cell.clone(), seen.clone());
        cell.subscribe(move |v: &String| {
            assert_eq!(&reader.get(), v);
            log.borrow_mut().push(v.clone());
        });

        assert!(cell.set("Het steen".to_string()));
        assert_eq!(*seen.borrow(), ["Het steen"]);
    }

    #[test]
    fn test_equal_value_does_not_notify() {
        let cell = Observable::new(1);
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        cell.subscribe(move |_| counter.set(counter.get() + 1));

        assert!(cell.set(2));
        assert!(!cell.set(2));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_replace_always_notifies() {
        let cell = Observable::new(String::new());
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        cell.subscribe(move |_| counter.set(counter.get() + 1));

        cell.replace(String::new());
        cell.replace(String::new());
        assert_eq!(count.get(), 2);
        assert_eq!(cell.get(), "");
    }

    #[test]
    fn test_unsubscribe() {
        let cell = Observable::new(0);
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        let id = cell.subscribe(move |_| counter.set(counter.get() + 1));
        assert_eq!(cell.subscriber_count(), 1);

        assert!(cell.unsubscribe(id));
        assert!(!cell.unsubscribe(id));
        cell.set(5);
        assert_eq!(count.get(), 0);
        assert_eq!(cell.get(), 5);
    }

    #[test]
    fn test_subscribers_run_in_order() {
        let cell = Observable::new(0);
        let order = Rc::new(RefCell::new(Vec::new()));
        for tag in ["first", "second"] {
            let order = order.clone();
            cell.subscribe(move |_| order.borrow_mut().push(tag));
        }

        cell.set(1);
        assert_eq!(*order.borrow(), ["first", "second"]);
    }
}
