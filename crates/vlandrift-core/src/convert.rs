// ── Wire → domain conversion ──
//
// The published document uses the switch team's vocabulary (`accsw`,
// `vlan-profiles`, `override`); the domain model speaks of assignments,
// profiles and overrides.

use vlandrift_api::{AccessSwitchEntry, VlanDatabaseDocument};

use crate::model::{Assignment, IntendedStateDatabase, VlanMap};

impl From<AccessSwitchEntry> for Assignment {
    fn from(entry: AccessSwitchEntry) -> Self {
        Self {
            profile: entry.vlan_profile,
            overrides: entry.overrides.map(VlanMap::from),
        }
    }
}

impl From<VlanDatabaseDocument> for IntendedStateDatabase {
    fn from(doc: VlanDatabaseDocument) -> Self {
        Self {
            assignments: doc
                .accsw
                .into_iter()
                .map(|(device, entry)| (device, Assignment::from(entry)))
                .collect(),
            profiles: doc
                .vlan_profiles
                .into_iter()
                .map(|(name, vlans)| (name, VlanMap::from(vlans)))
                .collect(),
        }
    }
}
