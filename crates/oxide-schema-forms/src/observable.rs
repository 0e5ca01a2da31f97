//! Observable state cells.

use std::cell::RefCell;
use std::fmt;

type Observer<T> = Box<dyn Fn(&T)>;

/// A mutable value whose writes are reported to subscribers.
///
/// Observers run synchronously after the new value is stored, so a reader
/// called from an observer already sees it. Observers must not subscribe to
/// the same cell they are notified by.
pub struct StateCell<T> {
    value: RefCell<T>,
    observers: RefCell<Vec<Observer<T>>>,
}

impl<T: Clone> StateCell<T> {
    /// Creates a cell holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            value: RefCell::new(value),
            observers: RefCell::new(Vec::new()),
        }
    }

    /// Returns a copy of the current value.
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    /// Runs `f` with a reference to the current value.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.borrow())
    }

    /// Stores `value` and notifies observers.
    pub fn set(&self, value: T) {
        let snapshot = value.clone();
        *self.value.borrow_mut() = value;
        for observer in self.observers.borrow().iter() {
            observer(&snapshot);
        }
    }

    /// Registers an observer called on every write.
    pub fn subscribe(&self, observer: impl Fn(&T) + 'static) {
        self.observers.borrow_mut().push(Box::new(observer));
    }
}

impl<T: Clone + Default> Default for StateCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for StateCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateCell")
            .field("value", &self.value.borrow())
            .field("observers", &self.observers.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_set_notifies_observers() {
        let cell = Rc::new(StateCell::new(String::new()));
        let seen = Rc::new(RefCell::new(Vec::new()));

        let log = Rc::clone(&seen);
        let reader = Rc::clone(&cell);
        cell.subscribe(move |v: &String| {
            // The write is visible before observers run.
            assert_eq!(&reader.get(), v);
            log.borrow_mut().push(v.clone());
        });

        cell.set("a".to_string());
        cell.set("ab".to_string());

        assert_eq!(cell.get(), "ab");
        assert_eq!(*seen.borrow(), vec!["a".to_string(), "ab".to_string()]);
    }

    #[test]
    fn test_with_borrows() {
        let cell = StateCell::new(vec![1, 2, 3]);
        assert_eq!(cell.with(Vec::len), 3);
    }
}
