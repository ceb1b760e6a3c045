//! chart-host: lifecycle binding between reactive hosts and an imperative chart engine.
//!
//! This crate owns the engine instance lifecycle — lazy creation once the
//! host container is attached, option caching and replay across theme
//! changes, debounced resize handling, and idempotent teardown — while the
//! host supplies its environment through narrow, injectable seams.

pub mod api;
pub mod core;
pub mod engine;
pub mod error;
pub mod host;
pub mod telemetry;

pub use api::{AdapterConfig, ChartLifecycleAdapter};
pub use error::{HostError, HostResult};
