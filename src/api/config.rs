use serde::{Deserialize, Serialize};

use crate::core::ThemeSelector;
use crate::engine::ResizeAnimation;
use crate::error::{HostError, HostResult};

/// Delay table driving the adapter's scheduled work (all milliseconds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterTimings {
    /// Retry cadence while the container reports zero height.
    pub layout_retry_delay_ms: u64,
    /// Tick delay before an option dispatch attempt.
    pub dispatch_delay_ms: u64,
    /// Window-resize debounce window.
    pub resize_debounce_ms: u64,
    /// Fixed delay between a sidebar toggle and its resize.
    pub collapse_resize_delay_ms: u64,
    /// Animation the engine runs on forced resizes.
    pub resize_animation: ResizeAnimation,
}

impl Default for AdapterTimings {
    fn default() -> Self {
        Self {
            layout_retry_delay_ms: 30,
            dispatch_delay_ms: 30,
            resize_debounce_ms: 200,
            collapse_resize_delay_ms: 300,
            resize_animation: ResizeAnimation::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AdapterConfig {
    pub theme: ThemeSelector,
    pub timings: AdapterTimings,
}

impl AdapterConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_theme(mut self, theme: ThemeSelector) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn with_timings(mut self, timings: AdapterTimings) -> Self {
        self.timings = timings;
        self
    }

    pub fn from_json_str(json: &str) -> HostResult<Self> {
        serde_json::from_str(json).map_err(|err| HostError::InvalidConfig(err.to_string()))
    }
}
