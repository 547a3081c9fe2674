//! Reconciliation engine between live switch VLANs and intended state.
//!
//! This crate owns the domain model and the logic of a VLAN drift audit:
//!
//! - **Parser** ([`parse`]): turns raw `show vlan brief | inc active`
//!   output into a prompt hostname and a [`VlanMap`].
//!
//! - **Profile resolver** ([`resolve`]): computes a device's effective
//!   VLAN set from its assigned profile plus per-device overrides in the
//!   [`IntendedStateDatabase`].
//!
//! - **Reconciler** ([`reconcile`]): diffs observed against expected,
//!   yielding [`Finding`]s (mismatch / missing / unauthorized).
//!
//! - **[`Orchestrator`]**: runs one pass over many devices. It fetches the
//!   database once, fans out bounded concurrent retrieval per device with
//!   timeouts and cancellation, and collects a [`ReconciliationPass`].
//!
//! Collaborators (database fetch, output retrieval) are injected through
//! the [`DatabaseSource`] and [`ObservedSource`] traits; [`sources`]
//! provides implementations backed by `vlandrift-api`.

pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod orchestrator;
pub mod parse;
pub mod reconcile;
pub mod resolve;
pub mod sources;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{AuditConfig, CollectorKind, DatabaseLocation, PassOptions, TlsVerification};
pub use error::{CoreError, DeviceError, ResolveError, RetrievalError};
pub use orchestrator::{
    DatabaseSource, DeviceResult, FnDatabaseSource, FnObservedSource, ObservedSource,
    Orchestrator, ReconciliationPass,
};
pub use parse::{ParsedCapture, extract_hostname, parse_capture, parse_vlan_brief};
pub use reconcile::{VlanPartition, partition, reconcile};
pub use resolve::resolve;
pub use sources::{DatabaseLoader, ObservedCollector};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Assignment, Device, Finding, FindingKind, FindingSummary, IntendedStateDatabase, MatchBy,
    RESERVED_VLAN_IDS, VlanId, VlanMap, is_reserved,
};
