use serde::{Deserialize, Serialize};

/// Theme requested by the host component.
///
/// `Default` defers to the observable dark-mode flag; the explicit variants
/// pin the resolved theme regardless of that flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeSelector {
    Light,
    Dark,
    #[default]
    Default,
}

/// Theme a live engine instance is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolvedTheme {
    Light,
    Dark,
}

impl ThemeSelector {
    #[must_use]
    pub fn resolve(self, dark_mode: bool) -> ResolvedTheme {
        match self {
            Self::Light => ResolvedTheme::Light,
            Self::Dark => ResolvedTheme::Dark,
            Self::Default => {
                if dark_mode {
                    ResolvedTheme::Dark
                } else {
                    ResolvedTheme::Light
                }
            }
        }
    }
}

impl ResolvedTheme {
    #[must_use]
    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}
