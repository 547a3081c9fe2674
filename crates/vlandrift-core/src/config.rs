// ── Audit configuration ──
//
// Fully resolved settings for one audit run. Built by `vlandrift-config`
// from file, environment and CLI flags; consumed here to construct the
// collaborators and the orchestrator.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::model::MatchBy;

/// Where the intended-state database comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    /// HTTP(S) endpoints, tried in order.
    Urls(Vec<Url>),
    /// A local JSON file.
    File(PathBuf),
}

/// How raw switch output is obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectorKind {
    /// Run a command template per target (`{target}` is substituted).
    Command(Vec<String>),
    /// Read `<dir>/<target>.txt` captures.
    CaptureDir(PathBuf),
}

/// TLS verification for the database endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    #[default]
    SystemDefaults,
    CustomCa(PathBuf),
    DangerAcceptInvalid,
}

/// Knobs for one reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassOptions {
    /// Maximum number of devices worked on at once.
    pub concurrency: usize,
    /// Upper bound on each device's output retrieval.
    pub device_timeout: Duration,
    pub match_by: MatchBy,
}

impl Default for PassOptions {
    fn default() -> Self {
        Self {
            concurrency: 8,
            device_timeout: Duration::from_secs(20),
            match_by: MatchBy::default(),
        }
    }
}

/// Everything needed to run an audit.
#[derive(Debug, Clone)]
pub struct AuditConfig {
    pub database: DatabaseLocation,
    pub database_timeout: Duration,
    pub tls: TlsVerification,
    pub collector: CollectorKind,
    pub pass: PassOptions,
}
