use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use proptest::prelude::*;

use chart_host::host::{Debouncer, ManualScheduler, Scheduler};

const WINDOW_MS: u64 = 200;

struct Counted {
    scheduler: Rc<ManualScheduler>,
    debouncer: Debouncer,
    fired: Rc<Cell<u32>>,
}

fn counted() -> Counted {
    let scheduler = Rc::new(ManualScheduler::new());
    let fired = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&fired);
    let debouncer = Debouncer::new(
        Rc::clone(&scheduler) as Rc<dyn Scheduler>,
        Duration::from_millis(WINDOW_MS),
        move || counter.set(counter.get() + 1),
    );
    Counted {
        scheduler,
        debouncer,
        fired,
    }
}

#[test]
fn burst_collapses_to_a_single_invocation() {
    let harness = counted();
    for _ in 0..8 {
        harness.debouncer.call();
    }
    harness.scheduler.advance(Duration::from_millis(WINDOW_MS * 2));
    assert_eq!(harness.fired.get(), 1);
}

#[test]
fn nothing_fires_before_the_window_elapses() {
    let harness = counted();
    harness.debouncer.call();
    harness
        .scheduler
        .advance(Duration::from_millis(WINDOW_MS - 1));
    assert_eq!(harness.fired.get(), 0);
    harness.scheduler.advance(Duration::from_millis(1));
    assert_eq!(harness.fired.get(), 1);
}

proptest! {
    #[test]
    fn any_burst_inside_the_window_collapses(gaps in proptest::collection::vec(0u64..WINDOW_MS, 1..12)) {
        let harness = counted();
        harness.debouncer.call();
        for gap in gaps {
            harness.scheduler.advance(Duration::from_millis(gap));
            harness.debouncer.call();
        }
        harness.scheduler.advance(Duration::from_millis(WINDOW_MS * 2));
        prop_assert_eq!(harness.fired.get(), 1);
    }

    #[test]
    fn calls_separated_by_full_windows_all_fire(gaps in proptest::collection::vec(WINDOW_MS..WINDOW_MS * 3, 1..8)) {
        let harness = counted();
        harness.debouncer.call();
        let mut expected = 1u32;
        for gap in gaps {
            harness.scheduler.advance(Duration::from_millis(gap));
            harness.debouncer.call();
            expected += 1;
        }
        harness.scheduler.advance(Duration::from_millis(WINDOW_MS * 2));
        prop_assert_eq!(harness.fired.get(), expected);
    }
}
