use std::cell::{Cell, RefCell};
use std::time::Duration;

/// Timer seam: one-shot callbacks after a delay.
///
/// The adapter never cancels a scheduled callback; superseded callbacks are
/// suppressed by generation checks on the adapter side, so implementations
/// only need fire-and-forget semantics.
pub trait Scheduler {
    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>);
}

struct ScheduledTask {
    due_ms: u64,
    seq: u64,
    run: Box<dyn FnOnce()>,
}

/// Virtual-clock scheduler for tests and headless hosts.
///
/// Callbacks fire during `advance`, in due-time order with insertion order
/// breaking ties. Callbacks scheduled while advancing run in the same call
/// when they fall inside the advanced window, which is what makes chained
/// retry timers observable without real sleeps.
#[derive(Default)]
pub struct ManualScheduler {
    now_ms: Cell<u64>,
    next_seq: Cell<u64>,
    queue: RefCell<Vec<ScheduledTask>>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        Duration::from_millis(self.now_ms.get())
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn advance(&self, delta: Duration) {
        let target = self.now_ms.get() + delta.as_millis() as u64;
        loop {
            let next = {
                let queue = self.queue.borrow();
                queue
                    .iter()
                    .enumerate()
                    .filter(|(_, task)| task.due_ms <= target)
                    .min_by_key(|(_, task)| (task.due_ms, task.seq))
                    .map(|(index, _)| index)
            };
            let Some(index) = next else {
                break;
            };
            let task = self.queue.borrow_mut().remove(index);
            if task.due_ms > self.now_ms.get() {
                self.now_ms.set(task.due_ms);
            }
            (task.run)();
        }
        self.now_ms.set(target);
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        self.queue.borrow_mut().push(ScheduledTask {
            due_ms: self.now_ms.get() + delay.as_millis() as u64,
            seq,
            run: callback,
        });
    }
}
