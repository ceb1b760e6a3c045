use std::rc::Rc;

use tracing::{trace, warn};

use crate::core::ChartOptions;
use crate::engine::{EngineFactory, EngineInstance};

use super::adapter::AdapterShared;
use super::completion::Completion;
use super::decorate::decorate;

impl<F: EngineFactory + 'static> AdapterShared<F> {
    pub(super) fn apply_options(
        this: &Rc<Self>,
        options: ChartOptions,
        clear_before_set: bool,
    ) -> Completion {
        if this.is_disposed() {
            // Terminal phase: accept the call shape, change nothing.
            return Completion::new();
        }
        this.state.borrow_mut().cached_options = options;
        Self::apply_cached(this, clear_before_set)
    }

    /// Arms the two delay paths of one option application.
    ///
    /// The layout-retry path re-enters this function until the container
    /// reports a nonzero height, chaining the caller's completion down the
    /// retries. The dispatch path initializes the instance when needed and
    /// pushes the decorated payload. Both paths are scheduled independently
    /// per call; once layout settles they may each dispatch once, which
    /// callers of a zero-height container must tolerate.
    pub(super) fn apply_cached(this: &Rc<Self>, clear_before_set: bool) -> Completion {
        let completion = Completion::new();

        if this.measured_height() == Some(0) {
            let chained = completion.clone();
            Self::schedule_guarded(
                this,
                this.config.timings.layout_retry_delay_ms,
                move |shared| {
                    let retried = Self::apply_cached(shared, true);
                    chained.resolve_when(&retried);
                },
            );
        }

        let dispatch = completion.clone();
        Self::schedule_guarded(this, this.config.timings.dispatch_delay_ms, move |shared| {
            Self::dispatch_cached(shared, clear_before_set, &dispatch);
        });

        completion
    }

    fn dispatch_cached(this: &Rc<Self>, clear_before_set: bool, completion: &Completion) {
        if this.live_instance().is_none() {
            Self::init_instance(this, this.resolved_theme());
        }
        let Some(instance) = this.live_instance() else {
            trace!("no engine instance, dropping option dispatch");
            return;
        };
        if this.measured_height() == Some(0) {
            // Unsettled layout: the retry path owns this dispatch.
            trace!("container height still zero, leaving dispatch to the layout retry");
            return;
        }
        if clear_before_set {
            instance.clear();
        }
        let payload = {
            let state = this.state.borrow();
            let toolbox = this.toolbox.borrow();
            decorate(&state.cached_options, this.resolved_theme(), &toolbox)
        };
        if let Err(error) = instance.apply_options(&payload) {
            warn!(%error, "option dispatch failed");
            return;
        }
        completion.resolve();
    }

    /// Live instance accessor, lazily initializing when the container
    /// resolves; the only initialization trigger besides option application.
    pub(super) fn instance(this: &Rc<Self>) -> Option<Rc<F::Instance>> {
        if this.is_disposed() {
            return None;
        }
        if this.live_instance().is_none() {
            Self::init_instance(this, this.resolved_theme());
        }
        this.live_instance()
    }
}
