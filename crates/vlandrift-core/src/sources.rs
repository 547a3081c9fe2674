// ── Collaborators backed by vlandrift-api ──
//
// Adapts the wire-level clients to the orchestrator's source traits and
// builds them from an `AuditConfig`.

use std::path::PathBuf;
use std::time::Duration;

use vlandrift_api::{CaptureDir, CommandCollector, DatabaseClient, TlsMode, TransportConfig};

use crate::config::{AuditConfig, CollectorKind, DatabaseLocation, TlsVerification};
use crate::error::{CoreError, RetrievalError};
use crate::model::IntendedStateDatabase;
use crate::orchestrator::{DatabaseSource, ObservedSource};

// ── Observed output ─────────────────────────────────────────────────

/// Retrieves raw `show vlan brief` output for a target.
#[derive(Debug, Clone)]
pub enum ObservedCollector {
    Command(CommandCollector),
    Captures(CaptureDir),
}

impl ObservedCollector {
    pub fn from_kind(kind: &CollectorKind) -> Result<Self, CoreError> {
        Ok(match kind {
            CollectorKind::Command(template) => {
                Self::Command(CommandCollector::new(template.clone())?)
            }
            CollectorKind::CaptureDir(dir) => Self::Captures(CaptureDir::new(dir.clone())),
        })
    }
}

impl ObservedSource for ObservedCollector {
    async fn fetch_observed(&self, target: &str) -> Result<String, RetrievalError> {
        let raw = match self {
            Self::Command(cmd) => cmd.collect(target).await?,
            Self::Captures(dir) => dir.collect(target).await?,
        };
        Ok(raw)
    }
}

// ── Intended state ──────────────────────────────────────────────────

/// Loads the intended-state database.
pub enum DatabaseLoader {
    Http(DatabaseClient),
    File(PathBuf),
}

impl DatabaseLoader {
    pub fn from_config(config: &AuditConfig) -> Result<Self, CoreError> {
        Self::from_location(&config.database, &config.tls, config.database_timeout)
    }

    /// Build a loader without a collector, as `resolve` needs.
    pub fn from_location(
        location: &DatabaseLocation,
        tls: &TlsVerification,
        timeout: Duration,
    ) -> Result<Self, CoreError> {
        Ok(match location {
            DatabaseLocation::Urls(urls) => {
                let transport = TransportConfig {
                    tls: tls_mode(tls),
                    timeout,
                };
                Self::Http(DatabaseClient::new(urls.clone(), &transport)?)
            }
            DatabaseLocation::File(path) => Self::File(path.clone()),
        })
    }
}

impl DatabaseSource for DatabaseLoader {
    async fn fetch_database(&self) -> Result<IntendedStateDatabase, CoreError> {
        let doc = match self {
            Self::Http(client) => client.fetch().await?,
            Self::File(path) => vlandrift_api::database::load_document(path).await?,
        };
        Ok(IntendedStateDatabase::from(doc))
    }
}

fn tls_mode(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}
