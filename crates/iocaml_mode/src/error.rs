//! Error types for registration, configuration and notebook metadata.
//!
//! The scanner itself never fails; everything here is about talking to the
//! host or reading its settings.

use thiserror::Error;

/// The host refused a registration call.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("host rejected {operation}: {reason}")]
pub struct HostError {
    /// Name of the host operation, e.g. `define_mode`.
    pub operation: &'static str,
    /// Host-supplied explanation.
    pub reason: String,
}

impl HostError {
    pub fn new(operation: &'static str, reason: impl Into<String>) -> Self {
        Self {
            operation,
            reason: reason.into(),
        }
    }
}

/// Failure while registering the mode with a host.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error(transparent)]
    Host(#[from] HostError),

    #[error("mode `{0}` is already registered")]
    DuplicateMode(String),

    #[error("keyword table is empty")]
    EmptyKeywordSet,
}

/// Invalid configuration override.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid tooltip delay `{value}` in {var}: expected a number of milliseconds")]
    InvalidTooltipDelay { var: &'static str, value: String },

    #[error("unknown pager rendering `{0}`: expected `html` or `pre`")]
    UnknownPagerRendering(String),

    #[error("{var} must not be empty")]
    EmptyValue { var: &'static str },
}

/// Notebook metadata could not be read or written.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("invalid notebook metadata: {0}")]
    Json(#[from] serde_json::Error),
}
