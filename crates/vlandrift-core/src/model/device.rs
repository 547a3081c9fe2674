// ── Devices ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A switch taking part in a reconciliation pass.
///
/// `target` is what collaborators are asked for (an address or a name
/// from the device list); `hostname` is the prompt name read from the
/// switch's own output, when one could be found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub target: String,
    pub hostname: Option<String>,
}

/// Which device identity keys the intended-state lookup.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MatchBy {
    /// The prompt hostname, falling back to the target for unidentified
    /// devices.
    #[default]
    Prompt,
    /// Always the requested target.
    Target,
}

impl Device {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            hostname: None,
        }
    }

    /// Attach an extracted prompt hostname; an empty one leaves the
    /// device unidentified.
    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        let hostname = hostname.into();
        self.hostname = (!hostname.is_empty()).then_some(hostname);
        self
    }

    /// The key used to look this device up in the intended-state database.
    pub fn identity(&self, match_by: MatchBy) -> &str {
        match (match_by, self.hostname.as_deref()) {
            (MatchBy::Prompt, Some(hostname)) => hostname,
            _ => &self.target,
        }
    }
}
