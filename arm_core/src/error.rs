use thiserror::Error;

/// Why an attempt stopped being active.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    #[error("segment left the failure zone")]
    AngleFailure,
    #[error("connection lost for too long")]
    ConnectionLost,
}

#[derive(Debug, Error, Clone)]
pub enum BuildError {
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
