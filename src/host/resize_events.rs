use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use super::Subscription;

/// Window-level resize event seam.
pub trait ResizeEventSource {
    fn subscribe(&self, listener: Rc<dyn Fn()>) -> Subscription;
}

#[derive(Default)]
struct ResizeCore {
    listeners: RefCell<Vec<(u64, Rc<dyn Fn()>)>>,
    next_id: Cell<u64>,
}

/// Manually driven resize source for tests and headless hosts.
#[derive(Clone, Default)]
pub struct ManualResizeSource {
    core: Rc<ResizeCore>,
}

impl ManualResizeSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers one resize event to every live listener.
    pub fn emit(&self) {
        let listeners: Vec<Rc<dyn Fn()>> = self
            .core
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener();
        }
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.core.listeners.borrow().len()
    }
}

impl ResizeEventSource for ManualResizeSource {
    fn subscribe(&self, listener: Rc<dyn Fn()>) -> Subscription {
        let id = self.core.next_id.get();
        self.core.next_id.set(id + 1);
        self.core.listeners.borrow_mut().push((id, listener));

        let weak: Weak<ResizeCore> = Rc::downgrade(&self.core);
        Subscription::new(move || {
            if let Some(core) = weak.upgrade() {
                core.listeners
                    .borrow_mut()
                    .retain(|(listener_id, _)| *listener_id != id);
            }
        })
    }
}
