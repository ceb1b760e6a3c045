mod null_engine;

pub use null_engine::{NullEngine, NullEngineFactory};

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::core::{ChartOptions, ResolvedTheme};
use crate::error::HostResult;
use crate::host::ContainerElement;

/// Easing curve applied when the engine animates a layout transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    Linear,
    #[default]
    QuadraticIn,
    QuadraticOut,
    CubicIn,
    CubicOut,
}

/// Animation parameters for an engine re-measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeAnimation {
    pub duration_ms: u64,
    pub easing: Easing,
}

impl Default for ResizeAnimation {
    fn default() -> Self {
        Self {
            duration_ms: 300,
            easing: Easing::QuadraticIn,
        }
    }
}

/// Contract implemented by a live engine instance.
///
/// Instances are opaque handles bound to one container element and one
/// theme. The adapter never reuses an instance across themes; it disposes
/// and recreates instead. All methods must stay safe to call after
/// `dispose` — the adapter relies on disposed instances degrading to no-ops
/// rather than panicking when a stale delayed callback fires.
pub trait EngineInstance {
    fn apply_options(&self, options: &ChartOptions) -> HostResult<()>;
    fn resize(&self, animation: ResizeAnimation);
    fn clear(&self);
    fn dispose(&self);
    fn is_disposed(&self) -> bool;
}

/// Contract implemented by the engine entry point.
///
/// Mirrors an `init(element, theme)` style engine API: binding a fresh
/// instance to a resolved container element.
pub trait EngineFactory {
    type Instance: EngineInstance + 'static;

    fn init(
        &self,
        element: &Rc<dyn ContainerElement>,
        theme: ResolvedTheme,
    ) -> HostResult<Rc<Self::Instance>>;
}
