//! Error types for the control-law engine.

use ll_core::CoreError;
use thiserror::Error;

/// Result type for controller operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors that can occur when configuring or scanning a controller.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// Rejected controller configuration (gains, output limits).
    #[error("Invalid configuration: {what}")]
    InvalidConfig { what: &'static str },

    /// Invalid runtime argument provided to a scan.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Non-finite numeric value at a configuration boundary.
    #[error("Non-finite value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    /// A thread panicked while holding the shared controller lock.
    #[error("Controller lock poisoned")]
    LockPoisoned,
}

impl From<CoreError> for ControlError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NonFinite { what, value } => ControlError::NonFinite { what, value },
            CoreError::DegenerateBounds { .. } => ControlError::InvalidConfig {
                what: "output min must be less than output max",
            },
        }
    }
}
