use std::fmt;
use std::rc::Rc;

use serde_json::{Value, json};

use crate::core::{ChartOptions, ResolvedTheme};

/// Callback run when the host reports a toolbox tool click.
pub type ToolAction = Rc<dyn Fn()>;

/// One custom toolbox tool: cosmetic fields plus an out-of-band action.
///
/// The option payload carries only `show`/`title`/`icon`; closures cannot
/// travel through JSON, so the action stays on the adapter side and runs
/// via `invoke_toolbox_action`.
#[derive(Clone)]
pub struct ToolboxTool {
    pub title: String,
    pub icon: String,
    pub action: Option<ToolAction>,
}

impl ToolboxTool {
    #[must_use]
    pub fn new(title: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            icon: icon.into(),
            action: None,
        }
    }

    #[must_use]
    pub fn with_action(mut self, action: impl Fn() + 'static) -> Self {
        self.action = Some(Rc::new(action));
        self
    }
}

impl fmt::Debug for ToolboxTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolboxTool")
            .field("title", &self.title)
            .field("icon", &self.icon)
            .field("has_action", &self.action.is_some())
            .finish()
    }
}

/// Toolbox tools per resolved theme.
#[derive(Debug, Clone)]
pub struct ToolboxConfig {
    pub light: ToolboxTool,
    pub dark: ToolboxTool,
}

impl ToolboxConfig {
    #[must_use]
    pub fn tool_for(&self, theme: ResolvedTheme) -> &ToolboxTool {
        if theme.is_dark() { &self.dark } else { &self.light }
    }
}

const FULLSCREEN_TOOL_ICON: &str = "path://M128,64L320,64L320,128L192,128L192,256L128,256Z M704,64L896,64L896,256L832,256L832,128L704,128Z M128,768L192,768L192,896L320,896L320,960L128,960Z M832,768L896,768L896,960L704,960L704,896L832,896Z";
const CLEAR_TOOL_ICON: &str = "path://M10,10L90,10L90,90L10,90Z";

impl Default for ToolboxConfig {
    fn default() -> Self {
        Self {
            light: ToolboxTool::new("Toggle fullscreen", FULLSCREEN_TOOL_ICON),
            dark: ToolboxTool::new("Delete", CLEAR_TOOL_ICON),
        }
    }
}

/// Builds the dispatch payload from the cached options and resolved theme.
///
/// Pure: the cache is never mutated, decoration happens per dispatch. Dark
/// themes get a transparent background underneath the caller's fields (a
/// caller-supplied `backgroundColor` wins); both themes get their toolbox
/// block, replacing any caller-supplied one.
#[must_use]
pub fn decorate(
    cached: &ChartOptions,
    theme: ResolvedTheme,
    toolbox: &ToolboxConfig,
) -> ChartOptions {
    let mut payload = ChartOptions::new();
    if theme.is_dark() {
        payload.insert("backgroundColor", json!("transparent"));
    }
    for (key, value) in cached.iter() {
        payload.insert(key.clone(), value.clone());
    }
    payload.insert("toolbox", toolbox_block(toolbox.tool_for(theme)));
    payload
}

fn toolbox_block(tool: &ToolboxTool) -> Value {
    json!({
        "feature": {
            "myTool1": {
                "show": true,
                "title": tool.title,
                "icon": tool.icon
            }
        }
    })
}
