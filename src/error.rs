use thiserror::Error;

pub type HostResult<T> = Result<T, HostError>;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("engine init failed: {0}")]
    EngineInit(String),

    #[error("engine instance already disposed")]
    DisposedInstance,

    #[error("invalid options payload: {0}")]
    InvalidOptions(String),

    #[error("invalid adapter config: {0}")]
    InvalidConfig(String),
}
