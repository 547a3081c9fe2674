//! Configuration for vlandrift.
//!
//! TOML file + `VLANDRIFT_` environment overrides, validated and
//! translated to `vlandrift_core::AuditConfig`. The CLI layers its own
//! flag overrides on top before translating.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use vlandrift_core::{
    AuditConfig, CollectorKind, DatabaseLocation, MatchBy, PassOptions, TlsVerification,
};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no intended-state database configured")]
    NoDatabase,

    #[error("no collector configured")]
    NoCollector,

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Static device list; empty means every device in the database.
    #[serde(default)]
    pub devices: Vec<String>,

    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default)]
    pub database: DatabaseSection,

    #[serde(default)]
    pub collector: CollectorSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    /// Devices worked on at once.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Per-device retrieval timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default)]
    pub match_by: MatchBy,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            concurrency: default_concurrency(),
            timeout: default_timeout(),
            match_by: MatchBy::default(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_concurrency() -> usize {
    8
}
fn default_timeout() -> u64 {
    20
}

/// Where the intended-state document lives.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DatabaseSection {
    /// HTTP(S) endpoints, tried in order.
    #[serde(default)]
    pub urls: Vec<String>,

    /// Local JSON file (alternative to `urls`).
    pub path: Option<PathBuf>,

    /// HTTP timeout in seconds.
    #[serde(default = "default_database_timeout")]
    pub timeout: u64,

    #[serde(default)]
    pub insecure: bool,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            urls: Vec::new(),
            path: None,
            timeout: default_database_timeout(),
            insecure: false,
            ca_cert: None,
        }
    }
}

fn default_database_timeout() -> u64 {
    10
}

/// How switch output is obtained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CollectorSection {
    /// Command template, `{target}` is replaced per device.
    #[serde(default)]
    pub command: Vec<String>,

    /// Directory of `<target>.txt` captures (alternative to `command`).
    pub capture_dir: Option<PathBuf>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "vlandrift", "vlandrift").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("vlandrift");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the Config from `path` (or the default location) + environment.
///
/// Environment keys use `__` between sections, e.g.
/// `VLANDRIFT_DEFAULTS__CONCURRENCY=4`.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("VLANDRIFT_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`.
pub fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation ─────────────────────────────────────────────────────

impl Config {
    /// Validate and translate into an `AuditConfig`.
    pub fn to_audit_config(&self) -> Result<AuditConfig, ConfigError> {
        if self.defaults.concurrency == 0 {
            return Err(ConfigError::Validation {
                field: "defaults.concurrency".into(),
                reason: "must be at least 1".into(),
            });
        }
        for (field, secs) in [
            ("defaults.timeout", self.defaults.timeout),
            ("database.timeout", self.database.timeout),
        ] {
            if secs == 0 {
                return Err(ConfigError::Validation {
                    field: field.into(),
                    reason: "must be at least 1 second".into(),
                });
            }
        }

        let database = self.database_location()?;
        let collector = self.collector_kind()?;

        Ok(AuditConfig {
            database,
            database_timeout: self.database_timeout(),
            tls: self.tls_verification(),
            collector,
            pass: PassOptions {
                concurrency: self.defaults.concurrency,
                device_timeout: Duration::from_secs(self.defaults.timeout),
                match_by: self.defaults.match_by,
            },
        })
    }

    /// Validate and translate only the database location.
    pub fn database_location(&self) -> Result<DatabaseLocation, ConfigError> {
        match (&self.database.path, self.database.urls.is_empty()) {
            (Some(_), false) => Err(ConfigError::Validation {
                field: "database".into(),
                reason: "set either `urls` or `path`, not both".into(),
            }),
            (Some(path), true) => Ok(DatabaseLocation::File(path.clone())),
            (None, false) => {
                let urls = self
                    .database
                    .urls
                    .iter()
                    .map(|raw| {
                        raw.parse::<url::Url>().map_err(|_| ConfigError::Validation {
                            field: "database.urls".into(),
                            reason: format!("invalid URL: {raw}"),
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(DatabaseLocation::Urls(urls))
            }
            (None, true) => Err(ConfigError::NoDatabase),
        }
    }

    pub fn database_timeout(&self) -> Duration {
        Duration::from_secs(self.database.timeout)
    }

    /// `insecure` wins over `ca_cert`.
    pub fn tls_verification(&self) -> TlsVerification {
        if self.database.insecure {
            TlsVerification::DangerAcceptInvalid
        } else if let Some(ref ca_path) = self.database.ca_cert {
            TlsVerification::CustomCa(ca_path.clone())
        } else {
            TlsVerification::SystemDefaults
        }
    }

    fn collector_kind(&self) -> Result<CollectorKind, ConfigError> {
        match (&self.collector.capture_dir, self.collector.command.is_empty()) {
            (Some(_), false) => Err(ConfigError::Validation {
                field: "collector".into(),
                reason: "set either `command` or `capture_dir`, not both".into(),
            }),
            (Some(dir), true) => Ok(CollectorKind::CaptureDir(dir.clone())),
            (None, false) => Ok(CollectorKind::Command(self.collector.command.clone())),
            (None, true) => Err(ConfigError::NoCollector),
        }
    }

    /// A filled-in example suitable for `config init`.
    pub fn example() -> Self {
        Self {
            devices: Vec::new(),
            defaults: Defaults::default(),
            database: DatabaseSection {
                urls: vec!["http://192.0.2.10:8000/port_info.json".into()],
                ..DatabaseSection::default()
            },
            collector: CollectorSection {
                command: vec![
                    "ssh".into(),
                    "-T".into(),
                    "{target}".into(),
                    "show vlan-switch brief | inc active".into(),
                ],
                capture_dir: None,
            },
        }
    }
}
