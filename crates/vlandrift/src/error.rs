//! CLI error types with miette diagnostics.
//!
//! Maps core and config errors into user-facing errors with actionable
//! help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use vlandrift_config::ConfigError;
use vlandrift_core::{CoreError, ResolveError};

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const DRIFT: i32 = 10;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Intended state ───────────────────────────────────────────────

    #[error("Intended-state database unavailable")]
    #[diagnostic(
        code(vlandrift::database_unavailable),
        help(
            "{message}\n\
             Check `database.urls` / `database.path`, or try --database-file."
        )
    )]
    DatabaseUnavailable { message: String },

    #[error("No intended-state database configured")]
    #[diagnostic(
        code(vlandrift::no_database),
        help(
            "Set `database.urls` or `database.path` in {path},\n\
             or pass --database-url / --database-file."
        )
    )]
    NoDatabase { path: String },

    #[error("No collector configured")]
    #[diagnostic(
        code(vlandrift::no_collector),
        help(
            "Set `collector.command` or `collector.capture_dir` in {path},\n\
             or pass --capture-dir."
        )
    )]
    NoCollector { path: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(code(vlandrift::not_found))]
    NotFound {
        resource_type: String,
        identifier: String,
    },

    #[error("{message}")]
    #[diagnostic(
        code(vlandrift::unknown_profile),
        help("Add profile '{profile}' to `vlan-profiles` or fix the device's assignment.")
    )]
    UnknownProfile { message: String, profile: String },

    // ── Outcome ──────────────────────────────────────────────────────

    #[error("Drift detected on {devices} device(s)")]
    #[diagnostic(code(vlandrift::drift))]
    DriftDetected { devices: usize },

    #[error("Audit cancelled")]
    #[diagnostic(code(vlandrift::cancelled))]
    Cancelled,

    #[error("Timed out after {seconds}s")]
    #[diagnostic(
        code(vlandrift::timeout),
        help("Increase `database.timeout` or check the endpoint's responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── Validation / configuration ───────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(vlandrift::validation))]
    Validation { field: String, reason: String },

    #[error(transparent)]
    #[diagnostic(code(vlandrift::config))]
    Config(Box<figment::Error>),

    #[error("Internal error: {0}")]
    #[diagnostic(code(vlandrift::internal))]
    Internal(String),

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize config: {0}")]
    #[diagnostic(code(vlandrift::toml))]
    Toml(#[from] toml::ser::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::DatabaseUnavailable { .. } => exit_code::CONNECTION,
            Self::NotFound { .. } | Self::UnknownProfile { .. } => exit_code::NOT_FOUND,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::DriftDetected { .. } => exit_code::DRIFT,
            Self::NoDatabase { .. } | Self::NoCollector { .. } | Self::Validation { .. } => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }
}

// ── Error mapping ────────────────────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::DatabaseFetch { message } => CliError::DatabaseUnavailable { message },
            CoreError::DatabaseTimeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },
            CoreError::Cancelled => CliError::Cancelled,
            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
        }
    }
}

impl From<ResolveError> for CliError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::UnknownDevice { device } => CliError::NotFound {
                resource_type: "device".into(),
                identifier: device,
            },
            ResolveError::UnknownProfile { ref profile, .. } => CliError::UnknownProfile {
                profile: profile.clone(),
                message: err.to_string(),
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        let path = || vlandrift_config::config_path().display().to_string();
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::NoDatabase => CliError::NoDatabase { path: path() },
            ConfigError::NoCollector => CliError::NoCollector { path: path() },
            ConfigError::Serialization(e) => CliError::Toml(e),
            ConfigError::Figment(e) => CliError::Config(e),
            ConfigError::Io(e) => CliError::Io(e),
        }
    }
}
