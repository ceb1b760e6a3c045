use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Default)]
struct CompletionCore {
    resolved: Cell<bool>,
    waiters: RefCell<Vec<Box<dyn FnOnce()>>>,
}

/// Deferred completion signal for one option application.
///
/// Resolves once the engine actually received the payload, not merely once
/// the call was made, so hosts can sequence follow-up work after a real
/// render attempt. Stays pending forever when the dispatch was dropped
/// (container never resolved, adapter torn down) — "chart did not render"
/// is observable, never an error.
#[derive(Clone, Default)]
pub struct Completion {
    core: Rc<CompletionCore>,
}

impl Completion {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.core.resolved.get()
    }

    /// Runs `waiter` on resolution; immediately when already resolved.
    pub fn on_resolved(&self, waiter: impl FnOnce() + 'static) {
        if self.core.resolved.get() {
            waiter();
            return;
        }
        self.core.waiters.borrow_mut().push(Box::new(waiter));
    }

    pub(crate) fn resolve(&self) {
        if self.core.resolved.replace(true) {
            return;
        }
        let waiters = self.core.waiters.take();
        for waiter in waiters {
            waiter();
        }
    }

    /// Chains this signal to another: resolves when `other` resolves.
    pub(crate) fn resolve_when(&self, other: &Completion) {
        let target = self.clone();
        other.on_resolved(move || target.resolve());
    }
}
