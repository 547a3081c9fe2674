// ── Core error types ──
//
// Two tiers. `CoreError` ends a whole pass (nothing can be reconciled
// without intended state). `DeviceError` is captured per device and
// attached to that device's result; it never escapes the orchestrator.
// The `From<vlandrift_api::Error>` impls translate collaborator failures
// into the tier they belong to.

use serde::Serialize;
use thiserror::Error;

/// Pass-level failures.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Intended-state database unavailable: {message}")]
    DatabaseFetch { message: String },

    #[error("Intended-state database timed out after {timeout_secs}s")]
    DatabaseTimeout { timeout_secs: u64 },

    #[error("Pass cancelled before the intended-state database was fetched")]
    Cancelled,

    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Profile resolution failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("device '{device}' has no assignment in the intended-state database")]
    UnknownDevice { device: String },

    #[error("device '{device}' is assigned unknown VLAN profile '{profile}'")]
    UnknownProfile { device: String, profile: String },
}

/// Failure reported by an observed-output collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RetrievalError {
    #[error("{message}")]
    Failed { message: String },

    #[error("retrieval timed out")]
    TimedOut,
}

/// Per-device failure attached to a device's result.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeviceError {
    #[error("device '{device}' has no assignment in the intended-state database")]
    UnknownDevice { device: String },

    #[error("device '{device}' is assigned unknown VLAN profile '{profile}'")]
    UnknownProfile { device: String, profile: String },

    #[error("retrieval failed: {message}")]
    Retrieval { message: String },

    #[error("retrieval timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("pass cancelled before this device completed")]
    Cancelled,
}

impl DeviceError {
    /// Short machine-readable kind, matching the serialized `kind` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownDevice { .. } => "unknown_device",
            Self::UnknownProfile { .. } => "unknown_profile",
            Self::Retrieval { .. } => "retrieval",
            Self::Timeout { .. } => "timeout",
            Self::Cancelled => "cancelled",
        }
    }
}

impl From<ResolveError> for DeviceError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::UnknownDevice { device } => Self::UnknownDevice { device },
            ResolveError::UnknownProfile { device, profile } => {
                Self::UnknownProfile { device, profile }
            }
        }
    }
}

// ── Conversion from collaborator errors ─────────────────────────────

impl From<vlandrift_api::Error> for RetrievalError {
    fn from(err: vlandrift_api::Error) -> Self {
        match err {
            vlandrift_api::Error::Timeout { .. } => Self::TimedOut,
            vlandrift_api::Error::Transport(ref e) if e.is_timeout() => Self::TimedOut,
            other => Self::Failed {
                message: other.to_string(),
            },
        }
    }
}

impl From<vlandrift_api::Error> for CoreError {
    fn from(err: vlandrift_api::Error) -> Self {
        match err {
            vlandrift_api::Error::InvalidUrl(e) => Self::Config {
                message: format!("Invalid database URL: {e}"),
            },
            vlandrift_api::Error::Tls(message) => Self::Config { message },
            vlandrift_api::Error::Timeout { timeout_secs } => Self::DatabaseTimeout { timeout_secs },
            vlandrift_api::Error::EmptyCommand => Self::Config {
                message: "collector command is empty".into(),
            },
            other => Self::DatabaseFetch {
                message: other.to_string(),
            },
        }
    }
}
