mod options;
mod theme;

pub use options::ChartOptions;
pub use theme::{ResolvedTheme, ThemeSelector};
