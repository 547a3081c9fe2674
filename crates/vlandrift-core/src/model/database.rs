// ── Intended-state database ──

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::vlan::VlanMap;

/// A device's entry in the intended-state database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Name of the base profile.
    pub profile: String,
    /// Per-device entries that win over the profile's.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<VlanMap>,
}

/// Profiles plus per-device assignments.
///
/// Read-only once built; a pass shares one instance across all device
/// units.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntendedStateDatabase {
    pub assignments: BTreeMap<String, Assignment>,
    pub profiles: BTreeMap<String, VlanMap>,
}

impl IntendedStateDatabase {
    pub fn assignment(&self, device: &str) -> Option<&Assignment> {
        self.assignments.get(device)
    }

    pub fn profile(&self, name: &str) -> Option<&VlanMap> {
        self.profiles.get(name)
    }

    /// Every device with an assignment, in name order.
    pub fn device_names(&self) -> Vec<String> {
        self.assignments.keys().cloned().collect()
    }
}
