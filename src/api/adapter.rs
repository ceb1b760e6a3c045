use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use tracing::debug;

use crate::core::{ChartOptions, ResolvedTheme};
use crate::engine::{EngineFactory, EngineInstance};
use crate::host::{ContainerSource, Debouncer, HostEnv, Subscription};

use super::completion::Completion;
use super::config::AdapterConfig;
use super::decorate::ToolboxConfig;

/// Externally observable lifecycle phase.
///
/// `Disposed` is terminal; every later call degrades to a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    Uninitialized,
    Ready,
    Disposed,
}

/// Binds one host container to one engine instance lifecycle.
///
/// The adapter owns at most one live instance, keyed to the container
/// element and the currently resolved theme. Instances are created lazily
/// on the first option application or instance request, recreated on theme
/// changes with the cached options replayed, and disposed together with the
/// window-resize subscription at teardown. Teardown also runs on drop, the
/// host-unmount binding.
pub struct ChartLifecycleAdapter<F: EngineFactory + 'static> {
    shared: Rc<AdapterShared<F>>,
    _dark_mode_watch: Subscription,
    _collapse_watch: Subscription,
}

pub(super) struct AdapterShared<F: EngineFactory> {
    pub(super) container: Rc<dyn ContainerSource>,
    pub(super) factory: F,
    pub(super) env: HostEnv,
    pub(super) config: AdapterConfig,
    pub(super) toolbox: RefCell<ToolboxConfig>,
    pub(super) state: RefCell<AdapterState<F::Instance>>,
    /// Generation token; bumping it strands every previously scheduled callback.
    pub(super) epoch: Cell<u64>,
    /// Last requested fullscreen state; never reconciled with platform exits.
    pub(super) fullscreen: Cell<bool>,
    pub(super) resize_debounce: RefCell<Option<Debouncer>>,
}

pub(super) struct AdapterState<I> {
    pub(super) phase: LifecyclePhase,
    pub(super) instance: Option<Rc<I>>,
    pub(super) instance_theme: Option<ResolvedTheme>,
    pub(super) cached_options: ChartOptions,
    pub(super) resize_watch: Option<Subscription>,
}

impl<I> Default for AdapterState<I> {
    fn default() -> Self {
        Self {
            phase: LifecyclePhase::Uninitialized,
            instance: None,
            instance_theme: None,
            cached_options: ChartOptions::new(),
            resize_watch: None,
        }
    }
}

impl<F: EngineFactory + 'static> ChartLifecycleAdapter<F> {
    /// Builds an adapter with the default toolbox; the light tool drives the
    /// adapter's own fullscreen toggle.
    #[must_use]
    pub fn new(
        container: Rc<dyn ContainerSource>,
        factory: F,
        env: HostEnv,
        config: AdapterConfig,
    ) -> Self {
        Self::build(container, factory, env, config, None)
    }

    /// Builds an adapter with caller-supplied toolbox tools and actions.
    #[must_use]
    pub fn with_toolbox(
        container: Rc<dyn ContainerSource>,
        factory: F,
        env: HostEnv,
        config: AdapterConfig,
        toolbox: ToolboxConfig,
    ) -> Self {
        Self::build(container, factory, env, config, Some(toolbox))
    }

    fn build(
        container: Rc<dyn ContainerSource>,
        factory: F,
        env: HostEnv,
        config: AdapterConfig,
        toolbox: Option<ToolboxConfig>,
    ) -> Self {
        let wire_default_action = toolbox.is_none();
        let shared = Rc::new(AdapterShared {
            container,
            factory,
            env,
            config,
            toolbox: RefCell::new(toolbox.unwrap_or_default()),
            state: RefCell::new(AdapterState::default()),
            epoch: Cell::new(0),
            fullscreen: Cell::new(false),
            resize_debounce: RefCell::new(None),
        });

        if wire_default_action {
            let weak = Rc::downgrade(&shared);
            shared.toolbox.borrow_mut().light.action = Some(Rc::new(move || {
                if let Some(shared) = weak.upgrade() {
                    shared.toggle_fullscreen();
                }
            }));
        }

        let debouncer = {
            let weak = Rc::downgrade(&shared);
            Debouncer::new(
                Rc::clone(&shared.env.scheduler),
                Duration::from_millis(shared.config.timings.resize_debounce_ms),
                move || {
                    if let Some(shared) = weak.upgrade() {
                        shared.force_resize();
                    }
                },
            )
        };
        *shared.resize_debounce.borrow_mut() = Some(debouncer);

        let dark_mode_watch = {
            let weak = Rc::downgrade(&shared);
            shared.env.dark_mode.subscribe(move |_| {
                if let Some(shared) = weak.upgrade() {
                    AdapterShared::on_dark_mode_changed(&shared);
                }
            })
        };
        let collapse_watch = {
            let weak = Rc::downgrade(&shared);
            shared.env.sidebar_collapsed.subscribe(move |_| {
                if let Some(shared) = weak.upgrade() {
                    AdapterShared::on_sidebar_toggled(&shared);
                }
            })
        };

        Self {
            shared,
            _dark_mode_watch: dark_mode_watch,
            _collapse_watch: collapse_watch,
        }
    }

    /// Caches `options` as the new baseline payload (full replace) and
    /// schedules dispatch; clears the previous drawing before applying.
    pub fn apply_options(&self, options: ChartOptions) -> Completion {
        AdapterShared::apply_options(&self.shared, options, true)
    }

    /// Like [`Self::apply_options`], with explicit control over the
    /// clear-before-set behavior.
    pub fn apply_options_with(&self, options: ChartOptions, clear_before_set: bool) -> Completion {
        AdapterShared::apply_options(&self.shared, options, clear_before_set)
    }

    /// Tells the engine to re-measure now; no-op without a live instance.
    pub fn force_resize(&self) {
        self.shared.force_resize();
    }

    /// Live instance handle, lazily initializing one when the container
    /// resolves. `None` while the container is unresolved or after teardown.
    #[must_use]
    pub fn instance(&self) -> Option<Rc<F::Instance>> {
        AdapterShared::instance(&self.shared)
    }

    /// Underlying engine entry point, for advanced direct use.
    #[must_use]
    pub fn factory(&self) -> &F {
        &self.shared.factory
    }

    #[must_use]
    pub fn phase(&self) -> LifecyclePhase {
        self.shared.state.borrow().phase
    }

    #[must_use]
    pub fn resolved_theme(&self) -> ResolvedTheme {
        self.shared.resolved_theme()
    }

    #[must_use]
    pub fn cached_options(&self) -> ChartOptions {
        self.shared.state.borrow().cached_options.clone()
    }

    /// Last requested fullscreen state. Platform-side exits (e.g. the user
    /// pressing Escape) are not observed, so this can diverge from reality.
    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.shared.fullscreen.get()
    }

    /// Runs the toolbox action bound to the currently resolved theme.
    pub fn invoke_toolbox_action(&self) {
        self.shared.invoke_toolbox_action();
    }

    /// Toggles platform fullscreen on the container's parent element.
    /// Normally driven by the default light toolbox tool.
    pub fn toggle_fullscreen(&self) {
        self.shared.toggle_fullscreen();
    }

    /// Releases the engine instance and every host subscription. Runs
    /// automatically on drop; safe to call any number of times.
    pub fn teardown(&self) {
        self.shared.teardown();
    }
}

impl<F: EngineFactory + 'static> Drop for ChartLifecycleAdapter<F> {
    fn drop(&mut self) {
        self.shared.teardown();
    }
}

impl<F: EngineFactory + 'static> AdapterShared<F> {
    pub(super) fn resolved_theme(&self) -> ResolvedTheme {
        self.config.theme.resolve(self.env.dark_mode.get())
    }

    pub(super) fn live_instance(&self) -> Option<Rc<F::Instance>> {
        self.state.borrow().instance.clone()
    }

    pub(super) fn measured_height(&self) -> Option<u32> {
        self.container
            .resolve()
            .map(|element| element.measured_height())
    }

    pub(super) fn is_disposed(&self) -> bool {
        self.state.borrow().phase == LifecyclePhase::Disposed
    }

    pub(super) fn force_resize(&self) {
        let Some(instance) = self.live_instance() else {
            return;
        };
        instance.resize(self.config.timings.resize_animation);
    }

    pub(super) fn debounced_resize(&self) {
        if let Some(debouncer) = &*self.resize_debounce.borrow() {
            debouncer.call();
        }
    }

    pub(super) fn toggle_fullscreen(&self) {
        let Some(element) = self.container.resolve() else {
            return;
        };
        let Some(host) = element.fullscreen_host() else {
            return;
        };
        if self.fullscreen.get() {
            let _ = host.exit_fullscreen();
        } else {
            let _ = host.request_fullscreen();
        }
        self.fullscreen.set(!self.fullscreen.get());
    }

    pub(super) fn invoke_toolbox_action(&self) {
        let action = {
            let toolbox = self.toolbox.borrow();
            toolbox.tool_for(self.resolved_theme()).action.clone()
        };
        if let Some(action) = action {
            action();
        }
    }

    pub(super) fn teardown(&self) {
        let instance = {
            let mut state = self.state.borrow_mut();
            if state.phase == LifecyclePhase::Disposed {
                return;
            }
            self.epoch.set(self.epoch.get() + 1);
            if let Some(mut watch) = state.resize_watch.take() {
                watch.release();
            }
            state.instance_theme = None;
            state.phase = LifecyclePhase::Disposed;
            state.instance.take()
        };
        if let Some(instance) = instance {
            instance.dispose();
        }
        debug!("chart adapter torn down");
    }
}
