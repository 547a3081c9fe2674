// ── Reconciliation findings ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::vlan::VlanId;

/// One discrepancy between a device's live VLANs and its intended set.
///
/// Findings are scoped to a single device and identify their VLAN by
/// name; a name appears in at most one finding per device.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    /// Present on both sides with different IDs.
    Mismatch {
        vlan_name: String,
        configured_id: VlanId,
        expected_id: VlanId,
    },
    /// Expected but not active on the device.
    Missing { vlan_name: String, expected_id: VlanId },
    /// Active on the device but absent from intended state.
    Unauthorized {
        vlan_name: String,
        configured_id: VlanId,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum FindingKind {
    Mismatch,
    Missing,
    Unauthorized,
}

impl Finding {
    pub fn vlan_name(&self) -> &str {
        match self {
            Self::Mismatch { vlan_name, .. }
            | Self::Missing { vlan_name, .. }
            | Self::Unauthorized { vlan_name, .. } => vlan_name,
        }
    }

    pub fn kind(&self) -> FindingKind {
        match self {
            Self::Mismatch { .. } => FindingKind::Mismatch,
            Self::Missing { .. } => FindingKind::Missing,
            Self::Unauthorized { .. } => FindingKind::Unauthorized,
        }
    }

    /// ID configured on the device, if the VLAN is active there.
    pub fn configured_id(&self) -> Option<VlanId> {
        match self {
            Self::Mismatch { configured_id, .. } | Self::Unauthorized { configured_id, .. } => {
                Some(*configured_id)
            }
            Self::Missing { .. } => None,
        }
    }

    /// ID from intended state, if the VLAN is expected.
    pub fn expected_id(&self) -> Option<VlanId> {
        match self {
            Self::Mismatch { expected_id, .. } | Self::Missing { expected_id, .. } => {
                Some(*expected_id)
            }
            Self::Unauthorized { .. } => None,
        }
    }
}

/// Per-kind finding counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindingSummary {
    pub mismatched: usize,
    pub missing: usize,
    pub unauthorized: usize,
}

impl FindingSummary {
    pub fn from_findings<'a>(findings: impl IntoIterator<Item = &'a Finding>) -> Self {
        let mut summary = Self::default();
        for finding in findings {
            summary.record(finding.kind());
        }
        summary
    }

    pub fn record(&mut self, kind: FindingKind) {
        match kind {
            FindingKind::Mismatch => self.mismatched += 1,
            FindingKind::Missing => self.missing += 1,
            FindingKind::Unauthorized => self.unauthorized += 1,
        }
    }

    pub fn merge(&mut self, other: Self) {
        self.mismatched += other.mismatched;
        self.missing += other.missing;
        self.unauthorized += other.unauthorized;
    }

    pub fn total(&self) -> usize {
        self.mismatched + self.missing + self.unauthorized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_strings() {
        assert_eq!(FindingKind::Unauthorized.to_string(), "unauthorized");
        assert_eq!("mismatch".parse::<FindingKind>(), Ok(FindingKind::Mismatch));
        assert!("drift".parse::<FindingKind>().is_err());
    }

    #[test]
    fn finding_serializes_with_kind_tag() {
        let finding = Finding::Mismatch {
            vlan_name: "infra".into(),
            configured_id: 100,
            expected_id: 102,
        };
        insta::assert_json_snapshot!(finding, @r###"
        {
          "kind": "mismatch",
          "vlan_name": "infra",
          "configured_id": 100,
          "expected_id": 102
        }
        "###);
    }

    #[test]
    fn accessors() {
        let missing = Finding::Missing {
            vlan_name: "engineer".into(),
            expected_id: 300,
        };
        assert_eq!(missing.vlan_name(), "engineer");
        assert_eq!(missing.kind(), FindingKind::Missing);
        assert_eq!(missing.configured_id(), None);
        assert_eq!(missing.expected_id(), Some(300));
    }

    #[test]
    fn summary_counts_by_kind() {
        let findings = [
            Finding::Missing {
                vlan_name: "a".into(),
                expected_id: 10,
            },
            Finding::Unauthorized {
                vlan_name: "b".into(),
                configured_id: 20,
            },
            Finding::Unauthorized {
                vlan_name: "c".into(),
                configured_id: 30,
            },
        ];
        let summary = FindingSummary::from_findings(&findings);
        assert_eq!(summary.missing, 1);
        assert_eq!(summary.unauthorized, 2);
        assert_eq!(summary.mismatched, 0);
        assert_eq!(summary.total(), 3);
    }
}
