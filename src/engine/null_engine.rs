use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::core::{ChartOptions, ResolvedTheme};
use crate::error::{HostError, HostResult};
use crate::host::ContainerElement;

use super::{EngineFactory, EngineInstance, ResizeAnimation};

/// No-op engine used by tests and headless hosts.
///
/// It still records every call so suites can assert dispatch order and
/// payload content without a real rendering backend.
#[derive(Debug)]
pub struct NullEngine {
    theme: ResolvedTheme,
    applied: RefCell<Vec<ChartOptions>>,
    resizes: RefCell<Vec<ResizeAnimation>>,
    clear_count: Cell<u32>,
    disposed: Cell<bool>,
}

impl NullEngine {
    #[must_use]
    fn new(theme: ResolvedTheme) -> Self {
        Self {
            theme,
            applied: RefCell::new(Vec::new()),
            resizes: RefCell::new(Vec::new()),
            clear_count: Cell::new(0),
            disposed: Cell::new(false),
        }
    }

    #[must_use]
    pub fn theme(&self) -> ResolvedTheme {
        self.theme
    }

    #[must_use]
    pub fn applied(&self) -> Vec<ChartOptions> {
        self.applied.borrow().clone()
    }

    #[must_use]
    pub fn last_applied(&self) -> Option<ChartOptions> {
        self.applied.borrow().last().cloned()
    }

    #[must_use]
    pub fn apply_count(&self) -> usize {
        self.applied.borrow().len()
    }

    #[must_use]
    pub fn resizes(&self) -> Vec<ResizeAnimation> {
        self.resizes.borrow().clone()
    }

    #[must_use]
    pub fn resize_count(&self) -> usize {
        self.resizes.borrow().len()
    }

    #[must_use]
    pub fn clear_count(&self) -> u32 {
        self.clear_count.get()
    }
}

impl EngineInstance for NullEngine {
    fn apply_options(&self, options: &ChartOptions) -> HostResult<()> {
        if self.disposed.get() {
            return Err(HostError::DisposedInstance);
        }
        self.applied.borrow_mut().push(options.clone());
        Ok(())
    }

    fn resize(&self, animation: ResizeAnimation) {
        if self.disposed.get() {
            return;
        }
        self.resizes.borrow_mut().push(animation);
    }

    fn clear(&self) {
        if self.disposed.get() {
            return;
        }
        self.clear_count.set(self.clear_count.get() + 1);
    }

    fn dispose(&self) {
        self.disposed.set(true);
    }

    fn is_disposed(&self) -> bool {
        self.disposed.get()
    }
}

/// Factory counterpart of [`NullEngine`]; keeps handles to every instance it
/// created so tests can inspect them after the adapter moved on.
#[derive(Debug, Default)]
pub struct NullEngineFactory {
    created: RefCell<Vec<Rc<NullEngine>>>,
    fail_next: Cell<bool>,
}

impl NullEngineFactory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `init` call report a failure, once.
    pub fn fail_next_init(&self) {
        self.fail_next.set(true);
    }

    #[must_use]
    pub fn created(&self) -> Vec<Rc<NullEngine>> {
        self.created.borrow().clone()
    }

    #[must_use]
    pub fn created_count(&self) -> usize {
        self.created.borrow().len()
    }

    #[must_use]
    pub fn latest(&self) -> Option<Rc<NullEngine>> {
        self.created.borrow().last().cloned()
    }
}

impl EngineFactory for NullEngineFactory {
    type Instance = NullEngine;

    fn init(
        &self,
        _element: &Rc<dyn ContainerElement>,
        theme: ResolvedTheme,
    ) -> HostResult<Rc<NullEngine>> {
        if self.fail_next.take() {
            return Err(HostError::EngineInit("injected init failure".to_owned()));
        }
        let instance = Rc::new(NullEngine::new(theme));
        self.created.borrow_mut().push(Rc::clone(&instance));
        Ok(instance)
    }
}
