mod adapter;
mod adapter_dispatch;
mod adapter_init;
mod completion;
mod config;
mod decorate;

pub use adapter::{ChartLifecycleAdapter, LifecyclePhase};
pub use completion::Completion;
pub use config::{AdapterConfig, AdapterTimings};
pub use decorate::{ToolAction, ToolboxConfig, ToolboxTool, decorate};
