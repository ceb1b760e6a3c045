//! Host environment seams.
//!
//! Everything the adapter consumes from its surroundings — timers, resize
//! events, container resolution, global flags, viewport breakpoints — is
//! injected through the traits and values in this module, never looked up
//! ambiently. Headless implementations live alongside the traits so hosts
//! and tests can run the full lifecycle with virtual time.

mod breakpoint;
mod container;
mod debounce;
mod observable;
mod resize_events;
mod scheduler;

pub use breakpoint::{Breakpoint, BreakpointClassifier, BreakpointGrid};
pub use container::{
    ContainerElement, ContainerSource, FullscreenHost, HeadlessContainer,
    HeadlessContainerSource, HeadlessFullscreenHost,
};
pub use debounce::Debouncer;
pub use observable::{ObservableValue, Subscription};
pub use resize_events::{ManualResizeSource, ResizeEventSource};
pub use scheduler::{ManualScheduler, Scheduler};

use std::rc::Rc;

/// Bundle of host signals handed to the adapter at construction.
#[derive(Clone)]
pub struct HostEnv {
    pub scheduler: Rc<dyn Scheduler>,
    pub resize_events: Rc<dyn ResizeEventSource>,
    pub dark_mode: ObservableValue<bool>,
    pub sidebar_collapsed: ObservableValue<bool>,
    pub breakpoints: BreakpointClassifier,
}
