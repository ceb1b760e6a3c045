use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Resolvable handle to the host container, nullable before mount.
///
/// The adapter re-resolves on every trigger instead of caching the element;
/// a host that unmounts and remounts keeps working without notifying it.
pub trait ContainerSource {
    fn resolve(&self) -> Option<Rc<dyn ContainerElement>>;
}

/// A resolved, layout-attached container element.
pub trait ContainerElement {
    /// Measured height in px; zero means layout has not settled yet.
    fn measured_height(&self) -> u32;

    /// Parent element acting as the fullscreen target, when one exists.
    fn fullscreen_host(&self) -> Option<Rc<dyn FullscreenHost>>;
}

/// Platform fullscreen entry points on a container's parent.
///
/// Returns `false` when the platform does not support the request; callers
/// treat that as "unsupported, silently ignored".
pub trait FullscreenHost {
    fn request_fullscreen(&self) -> bool;
    fn exit_fullscreen(&self) -> bool;
}

/// In-memory container element with a settable measured height.
#[derive(Debug, Default)]
pub struct HeadlessContainer {
    height: Cell<u32>,
    parent: RefCell<Option<Rc<HeadlessFullscreenHost>>>,
}

impl HeadlessContainer {
    #[must_use]
    pub fn with_height(height: u32) -> Rc<Self> {
        let container = Rc::new(Self::default());
        container.height.set(height);
        container
    }

    pub fn set_height(&self, height: u32) {
        self.height.set(height);
    }

    pub fn set_parent(&self, parent: Rc<HeadlessFullscreenHost>) {
        *self.parent.borrow_mut() = Some(parent);
    }
}

impl ContainerElement for HeadlessContainer {
    fn measured_height(&self) -> u32 {
        self.height.get()
    }

    fn fullscreen_host(&self) -> Option<Rc<dyn FullscreenHost>> {
        self.parent
            .borrow()
            .clone()
            .map(|parent| parent as Rc<dyn FullscreenHost>)
    }
}

/// Mountable source backing [`HeadlessContainer`], mirroring a host ref that
/// is null until the component mounts.
#[derive(Debug, Default)]
pub struct HeadlessContainerSource {
    element: RefCell<Option<Rc<HeadlessContainer>>>,
}

impl HeadlessContainerSource {
    #[must_use]
    pub fn detached() -> Rc<Self> {
        Rc::new(Self::default())
    }

    #[must_use]
    pub fn mounted(element: Rc<HeadlessContainer>) -> Rc<Self> {
        let source = Rc::new(Self::default());
        source.mount(element);
        source
    }

    pub fn mount(&self, element: Rc<HeadlessContainer>) {
        *self.element.borrow_mut() = Some(element);
    }

    pub fn unmount(&self) {
        *self.element.borrow_mut() = None;
    }
}

impl ContainerSource for HeadlessContainerSource {
    fn resolve(&self) -> Option<Rc<dyn ContainerElement>> {
        self.element
            .borrow()
            .clone()
            .map(|element| element as Rc<dyn ContainerElement>)
    }
}

/// Records fullscreen requests; `active` tracks what the platform would show.
#[derive(Debug)]
pub struct HeadlessFullscreenHost {
    supported: bool,
    active: Cell<bool>,
    requests: Cell<u32>,
    exits: Cell<u32>,
}

impl HeadlessFullscreenHost {
    #[must_use]
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            supported: true,
            active: Cell::new(false),
            requests: Cell::new(0),
            exits: Cell::new(0),
        })
    }

    /// Host without a fullscreen API; every request reports unsupported.
    #[must_use]
    pub fn unsupported() -> Rc<Self> {
        Rc::new(Self {
            supported: false,
            active: Cell::new(false),
            requests: Cell::new(0),
            exits: Cell::new(0),
        })
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    #[must_use]
    pub fn request_count(&self) -> u32 {
        self.requests.get()
    }

    #[must_use]
    pub fn exit_count(&self) -> u32 {
        self.exits.get()
    }
}

impl FullscreenHost for HeadlessFullscreenHost {
    fn request_fullscreen(&self) -> bool {
        if !self.supported {
            return false;
        }
        self.requests.set(self.requests.get() + 1);
        self.active.set(true);
        true
    }

    fn exit_fullscreen(&self) -> bool {
        if !self.supported {
            return false;
        }
        self.exits.set(self.exits.get() + 1);
        self.active.set(false);
        true
    }
}
