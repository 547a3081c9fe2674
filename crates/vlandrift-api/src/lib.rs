// vlandrift-api: Wire-level collaborators for VLAN drift audits.
//
// Fetches the intended-state database document over HTTP (or from disk)
// and retrieves raw `show vlan brief` output from switches, either by
// running an external command per target or by reading saved captures.

pub mod collector;
pub mod database;
pub mod error;
pub mod transport;

pub use collector::{CaptureDir, CommandCollector, TARGET_PLACEHOLDER};
pub use database::{AccessSwitchEntry, DatabaseClient, VlanDatabaseDocument};
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
