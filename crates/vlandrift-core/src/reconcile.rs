// ── Reconciler ──
//
// A map diff: every expected name is matched, missing or mismatched;
// every observed name outside the expected set is unauthorized.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::model::{Finding, VlanMap};

/// Diff a device's observed VLANs against its effective intended set.
///
/// Findings for expected names come first, then unauthorized ones, each
/// group in name order. Neither input is modified.
pub fn reconcile(observed: &VlanMap, expected: &VlanMap) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (name, expected_id) in expected.iter() {
        match observed.get(name) {
            None => findings.push(Finding::Missing {
                vlan_name: name.to_owned(),
                expected_id,
            }),
            Some(configured_id) if configured_id != expected_id => {
                findings.push(Finding::Mismatch {
                    vlan_name: name.to_owned(),
                    configured_id,
                    expected_id,
                });
            }
            Some(_) => {}
        }
    }

    findings.extend(
        observed
            .iter()
            .filter(|(name, _)| !expected.contains(name))
            .map(|(name, configured_id)| Finding::Unauthorized {
                vlan_name: name.to_owned(),
                configured_id,
            }),
    );

    findings
}

/// Every VLAN name of both maps, sorted into exactly one category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VlanPartition {
    pub matched: BTreeSet<String>,
    pub missing: BTreeSet<String>,
    pub mismatched: BTreeSet<String>,
    pub unauthorized: BTreeSet<String>,
}

impl VlanPartition {
    /// Number of names that produce a finding.
    pub fn drift_count(&self) -> usize {
        self.missing.len() + self.mismatched.len() + self.unauthorized.len()
    }
}

/// Partition the union of VLAN names by reconciliation outcome.
pub fn partition(observed: &VlanMap, expected: &VlanMap) -> VlanPartition {
    let mut parts = VlanPartition::default();
    for (name, expected_id) in expected.iter() {
        let bucket = match observed.get(name) {
            None => &mut parts.missing,
            Some(id) if id == expected_id => &mut parts.matched,
            Some(_) => &mut parts.mismatched,
        };
        bucket.insert(name.to_owned());
    }
    parts.unauthorized = observed
        .names()
        .filter(|name| !expected.contains(name))
        .map(str::to_owned)
        .collect();
    parts
}
