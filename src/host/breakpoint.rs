use serde::{Deserialize, Serialize};

use super::ObservableValue;

/// Named viewport width buckets, smallest to largest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Xs,
    Sm,
    Md,
    Lg,
    Xl,
    Xxl,
}

/// Upper width bound (px, inclusive) per breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakpointGrid {
    pub xs: u32,
    pub sm: u32,
    pub md: u32,
    pub lg: u32,
    pub xl: u32,
    pub xxl: u32,
}

impl Default for BreakpointGrid {
    fn default() -> Self {
        Self {
            xs: 480,
            sm: 576,
            md: 768,
            lg: 992,
            xl: 1200,
            xxl: 1600,
        }
    }
}

impl BreakpointGrid {
    #[must_use]
    pub fn threshold(&self, breakpoint: Breakpoint) -> u32 {
        match breakpoint {
            Breakpoint::Xs => self.xs,
            Breakpoint::Sm => self.sm,
            Breakpoint::Md => self.md,
            Breakpoint::Lg => self.lg,
            Breakpoint::Xl => self.xl,
            Breakpoint::Xxl => self.xxl,
        }
    }

    #[must_use]
    pub fn classify(&self, width: u32) -> Breakpoint {
        if width <= self.xs {
            Breakpoint::Xs
        } else if width <= self.sm {
            Breakpoint::Sm
        } else if width <= self.md {
            Breakpoint::Md
        } else if width <= self.lg {
            Breakpoint::Lg
        } else if width <= self.xl {
            Breakpoint::Xl
        } else {
            Breakpoint::Xxl
        }
    }
}

/// Reports the current viewport width bucket from an observable width.
#[derive(Clone)]
pub struct BreakpointClassifier {
    width: ObservableValue<u32>,
    grid: BreakpointGrid,
}

impl BreakpointClassifier {
    #[must_use]
    pub fn new(width: ObservableValue<u32>, grid: BreakpointGrid) -> Self {
        Self { width, grid }
    }

    #[must_use]
    pub fn current_width(&self) -> u32 {
        self.width.get()
    }

    #[must_use]
    pub fn current(&self) -> Breakpoint {
        self.grid.classify(self.width.get())
    }

    #[must_use]
    pub fn at_or_below(&self, breakpoint: Breakpoint) -> bool {
        self.width.get() <= self.grid.threshold(breakpoint)
    }

    #[must_use]
    pub fn grid(&self) -> BreakpointGrid {
        self.grid
    }
}
