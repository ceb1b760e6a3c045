use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use super::Scheduler;

/// Trailing-edge debouncer over the injected [`Scheduler`].
///
/// Every `call` arms a fresh generation and schedules the action at the end
/// of the window; only the latest generation actually runs, so a burst of
/// calls inside one window collapses into a single invocation.
#[derive(Clone)]
pub struct Debouncer {
    scheduler: Rc<dyn Scheduler>,
    window: Duration,
    action: Rc<dyn Fn()>,
    generation: Rc<Cell<u64>>,
}

impl Debouncer {
    #[must_use]
    pub fn new(scheduler: Rc<dyn Scheduler>, window: Duration, action: impl Fn() + 'static) -> Self {
        Self {
            scheduler,
            window,
            action: Rc::new(action),
            generation: Rc::new(Cell::new(0)),
        }
    }

    pub fn call(&self) {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        let latest = Rc::clone(&self.generation);
        let action = Rc::clone(&self.action);
        self.scheduler.schedule(
            self.window,
            Box::new(move || {
                if latest.get() == generation {
                    action();
                }
            }),
        );
    }
}
