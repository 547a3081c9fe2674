// ── VLAN identity types ──
//
// VlanMap is the unit of comparison: one device's active VLANs, one
// profile, or one device's effective intended set.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

/// Numeric VLAN identifier.
///
/// Switches use 1–4094, but values outside that range are preserved
/// exactly as found.
pub type VlanId = i64;

/// Built-in VLANs (default, fddi-default, token-ring-default,
/// fddinet-default, trnet-default) that are never reconciled.
pub const RESERVED_VLAN_IDS: [VlanId; 6] = [1, 1001, 1002, 1003, 1004, 1005];

pub fn is_reserved(id: VlanId) -> bool {
    RESERVED_VLAN_IDS.contains(&id)
}

// ── VlanMap ─────────────────────────────────────────────────────────

/// VLAN name → VLAN ID.
///
/// Names are unique keys; inserting an existing name replaces its ID
/// (last write wins). Iteration is ordered by name so reports and
/// findings come out deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VlanMap(BTreeMap<String, VlanId>);

impl VlanMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry, returning the previous ID.
    pub fn insert(&mut self, name: impl Into<String>, id: VlanId) -> Option<VlanId> {
        self.0.insert(name.into(), id)
    }

    pub fn get(&self, name: &str) -> Option<VlanId> {
        self.0.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, VlanId)> {
        self.0.iter().map(|(name, id)| (name.as_str(), *id))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// A new map with every entry of `overrides` applied on top of `self`.
    ///
    /// Neither input is modified.
    pub fn overlay(&self, overrides: &VlanMap) -> VlanMap {
        let mut merged = self.clone();
        for (name, id) in overrides.iter() {
            merged.insert(name, id);
        }
        merged
    }

    /// Render as `show vlan brief | inc active` rows.
    ///
    /// Parsing the result yields this map again, provided names contain
    /// no whitespace and no ID is reserved.
    pub fn render_brief(&self) -> String {
        let mut out = String::new();
        for (name, id) in self.iter() {
            let _ = writeln!(out, "{id:<4} {name:<32} active");
        }
        out
    }
}

impl FromIterator<(String, VlanId)> for VlanMap {
    fn from_iter<I: IntoIterator<Item = (String, VlanId)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<(&'a str, VlanId)> for VlanMap {
    fn from_iter<I: IntoIterator<Item = (&'a str, VlanId)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, id)| (name.to_owned(), id))
                .collect(),
        )
    }
}

impl<const N: usize> From<[(&str, VlanId); N]> for VlanMap {
    fn from(entries: [(&str, VlanId); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl From<BTreeMap<String, VlanId>> for VlanMap {
    fn from(map: BTreeMap<String, VlanId>) -> Self {
        Self(map)
    }
}

impl IntoIterator for VlanMap {
    type Item = (String, VlanId);
    type IntoIter = btree_map::IntoIter<String, VlanId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
