// Intended-state database client
//
// The database is a single JSON document published over HTTP (historically
// `http://<host>:8000/port_info.json`). Mirrors are tried in order and the
// first endpoint that answers with a decodable document wins.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

// ── Wire types ───────────────────────────────────────────────────────

/// The intended-state document exactly as published.
///
/// ```json
/// {
///   "accsw": { "R1": { "vlan-profile": "home-1", "override": { "infra": 102 } } },
///   "vlan-profiles": { "home-1": { "infra": 100, "runt": 200 } }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct VlanDatabaseDocument {
    /// Access switch assignments keyed by device name.
    #[serde(default)]
    pub accsw: BTreeMap<String, AccessSwitchEntry>,

    /// Named base profiles: VLAN name → VLAN ID.
    #[serde(rename = "vlan-profiles", default)]
    pub vlan_profiles: BTreeMap<String, BTreeMap<String, i64>>,
}

/// One `accsw` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AccessSwitchEntry {
    #[serde(rename = "vlan-profile", alias = "vlan_profile")]
    pub vlan_profile: String,

    #[serde(rename = "override", default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<BTreeMap<String, i64>>,
}

/// Decode a document body, keeping a preview of the body on failure.
pub fn parse_document(body: &str) -> Result<VlanDatabaseDocument, Error> {
    serde_json::from_str(body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body: body.to_owned(),
        }
    })
}

/// Read and decode a document from a local file.
pub async fn load_document(path: &Path) -> Result<VlanDatabaseDocument, Error> {
    debug!(path = %path.display(), "reading intended-state database");
    let body = tokio::fs::read_to_string(path).await?;
    parse_document(&body)
}

// ── Client ───────────────────────────────────────────────────────────

/// HTTP client for the intended-state database.
pub struct DatabaseClient {
    http: reqwest::Client,
    endpoints: Vec<Url>,
    timeout: Duration,
}

impl DatabaseClient {
    /// Create a client for the given endpoints using a `TransportConfig`.
    pub fn new(endpoints: Vec<Url>, transport: &TransportConfig) -> Result<Self, Error> {
        if endpoints.is_empty() {
            return Err(Error::NoEndpoints);
        }
        let http = transport.build_client()?;
        Ok(Self {
            http,
            endpoints,
            timeout: transport.timeout,
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, endpoints: Vec<Url>) -> Self {
        Self {
            http,
            endpoints,
            timeout: TransportConfig::default().timeout,
        }
    }

    /// Fetch the document from the first endpoint that serves a valid one.
    ///
    /// Returns the last endpoint's error when every endpoint fails.
    pub async fn fetch(&self) -> Result<VlanDatabaseDocument, Error> {
        let mut last_err = Error::NoEndpoints;
        for url in &self.endpoints {
            match self.fetch_from(url).await {
                Ok(doc) => return Ok(doc),
                Err(e) => {
                    warn!(url = %url, error = %e, "database endpoint unavailable, trying next");
                    last_err = e;
                }
            }
        }
        Err(last_err)
    }

    /// Fetch and decode the document from one endpoint.
    pub async fn fetch_from(&self, url: &Url) -> Result<VlanDatabaseDocument, Error> {
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message: String = body.chars().take(200).collect();
            return Err(Error::Http {
                url: url.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        let body = resp.text().await.map_err(|e| self.transport_error(e))?;
        parse_document(&body)
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            Error::Transport(err)
        }
    }
}
