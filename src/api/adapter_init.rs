use std::rc::Rc;
use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::core::ResolvedTheme;
use crate::engine::{EngineFactory, EngineInstance};
use crate::host::Breakpoint;

use super::adapter::{AdapterShared, LifecyclePhase};

impl<F: EngineFactory + 'static> AdapterShared<F> {
    /// One-shot delayed callback guarded by the generation token and the
    /// terminal phase; superseded callbacks degrade to no-ops instead of
    /// acting on an instance they were not scheduled for.
    pub(super) fn schedule_guarded(
        this: &Rc<Self>,
        delay_ms: u64,
        action: impl FnOnce(&Rc<Self>) + 'static,
    ) {
        let weak = Rc::downgrade(this);
        let epoch = this.epoch.get();
        this.env.scheduler.schedule(
            Duration::from_millis(delay_ms),
            Box::new(move || {
                let Some(shared) = weak.upgrade() else {
                    return;
                };
                if shared.epoch.get() != epoch || shared.is_disposed() {
                    return;
                }
                action(&shared);
            }),
        );
    }

    /// Resolves the container and binds a fresh engine instance to it.
    ///
    /// An absent container and a factory failure both degrade to "no
    /// instance"; a later trigger retries. A fresh instance re-subscribes
    /// the debounced window-resize handler, replacing any previous
    /// subscription. Narrow viewports and unsettled layout get one
    /// corrective resize shortly after creation.
    pub(super) fn init_instance(this: &Rc<Self>, theme: ResolvedTheme) {
        if this.is_disposed() {
            return;
        }
        let Some(element) = this.container.resolve() else {
            trace!("container unresolved, deferring engine init");
            return;
        };
        let instance = match this.factory.init(&element, theme) {
            Ok(instance) => instance,
            Err(error) => {
                warn!(%error, "engine init failed");
                return;
            }
        };

        let resize_watch = {
            let weak = Rc::downgrade(this);
            this.env.resize_events.subscribe(Rc::new(move || {
                if let Some(shared) = weak.upgrade() {
                    shared.debounced_resize();
                }
            }))
        };

        {
            let mut state = this.state.borrow_mut();
            if let Some(mut previous) = state.resize_watch.take() {
                previous.release();
            }
            state.instance = Some(instance);
            state.instance_theme = Some(theme);
            state.resize_watch = Some(resize_watch);
            state.phase = LifecyclePhase::Ready;
        }
        debug!(?theme, "engine instance created");

        if this.env.breakpoints.at_or_below(Breakpoint::Md) || element.measured_height() == 0 {
            Self::schedule_guarded(this, this.config.timings.layout_retry_delay_ms, |shared| {
                shared.debounced_resize();
            });
        }
    }

    /// Theme flip: dispose the live instance, recreate it with the new
    /// theme, replay the cached options through the full apply path.
    pub(super) fn on_dark_mode_changed(this: &Rc<Self>) {
        let resolved = this.resolved_theme();
        let live = {
            let state = this.state.borrow();
            state.instance.clone().zip(state.instance_theme)
        };
        let Some((instance, bound_theme)) = live else {
            return;
        };
        if bound_theme == resolved {
            return;
        }

        this.epoch.set(this.epoch.get() + 1);
        instance.dispose();
        {
            let mut state = this.state.borrow_mut();
            state.instance = None;
            state.instance_theme = None;
            state.phase = LifecyclePhase::Uninitialized;
            if let Some(mut watch) = state.resize_watch.take() {
                watch.release();
            }
        }
        Self::init_instance(this, resolved);
        let _replay = Self::apply_cached(this, true);
        debug!(theme = ?resolved, "instance recreated after theme change");
    }

    /// Sidebar toggles fire exactly one resize after a fixed delay.
    pub(super) fn on_sidebar_toggled(this: &Rc<Self>) {
        Self::schedule_guarded(
            this,
            this.config.timings.collapse_resize_delay_ms,
            |shared| {
                shared.force_resize();
            },
        );
    }
}
