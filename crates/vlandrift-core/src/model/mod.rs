// ── Domain model ──
//
// Canonical types shared by the parser, resolver, reconciler and
// orchestrator. All of them are plain read-only snapshots once built.

pub mod database;
pub mod device;
pub mod finding;
pub mod vlan;

pub use database::{Assignment, IntendedStateDatabase};
pub use device::{Device, MatchBy};
pub use finding::{Finding, FindingKind, FindingSummary};
pub use vlan::{RESERVED_VLAN_IDS, VlanId, VlanMap, is_reserved};
