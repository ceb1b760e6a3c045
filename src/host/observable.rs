use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use smallvec::SmallVec;

type Listener<T> = Rc<dyn Fn(&T)>;

struct ObservableCore<T> {
    value: RefCell<T>,
    listeners: RefCell<SmallVec<[(u64, Listener<T>); 2]>>,
    next_id: Cell<u64>,
}

/// Single-threaded observable value with a subscribe/current-value contract.
///
/// Notifies subscribers only when the value actually changes. Handles are
/// cheap clones sharing one underlying cell, so a host and an adapter can
/// both hold the same flag.
pub struct ObservableValue<T> {
    core: Rc<ObservableCore<T>>,
}

impl<T> Clone for ObservableValue<T> {
    fn clone(&self) -> Self {
        Self {
            core: Rc::clone(&self.core),
        }
    }
}

impl<T: Clone + PartialEq + 'static> ObservableValue<T> {
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self {
            core: Rc::new(ObservableCore {
                value: RefCell::new(initial),
                listeners: RefCell::new(SmallVec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    #[must_use]
    pub fn get(&self) -> T {
        self.core.value.borrow().clone()
    }

    pub fn set(&self, next: T) {
        let changed = {
            let mut value = self.core.value.borrow_mut();
            if *value == next {
                false
            } else {
                *value = next;
                true
            }
        };
        if !changed {
            return;
        }
        // Snapshot listeners so a callback may subscribe or unsubscribe
        // without hitting a live borrow.
        let listeners: SmallVec<[(u64, Listener<T>); 2]> = self.core.listeners.borrow().clone();
        let current = self.get();
        for (_, listener) in listeners {
            listener(&current);
        }
    }

    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        let id = self.core.next_id.get();
        self.core.next_id.set(id + 1);
        self.core
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));

        let weak: Weak<ObservableCore<T>> = Rc::downgrade(&self.core);
        Subscription::new(move || {
            if let Some(core) = weak.upgrade() {
                core.listeners
                    .borrow_mut()
                    .retain(|(listener_id, _)| *listener_id != id);
            }
        })
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.core.listeners.borrow().len()
    }
}

/// Disposer for a subscription; releasing is idempotent and also happens on drop.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    #[must_use]
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn release(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    #[must_use]
    pub fn is_released(&self) -> bool {
        self.cancel.is_none()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}
