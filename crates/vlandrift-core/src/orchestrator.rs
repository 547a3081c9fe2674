// ── Reconciliation pass orchestration ──
//
// One pass: fetch the intended-state database once, then run a
// retrieve → parse → resolve → reconcile unit per device with bounded
// concurrency. Per-device failures are captured in that device's result;
// only a failed database fetch ends the pass.

use std::collections::{BTreeMap, HashSet};
use std::future::Future;

use chrono::{DateTime, Utc};
use futures_util::StreamExt;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::PassOptions;
use crate::error::{CoreError, DeviceError, RetrievalError};
use crate::model::{Device, Finding, FindingSummary, IntendedStateDatabase};
use crate::parse::parse_capture;
use crate::reconcile::reconcile;
use crate::resolve::resolve;

// ── Collaborator seams ──────────────────────────────────────────────

/// Supplies raw command output for a device.
pub trait ObservedSource {
    fn fetch_observed(
        &self,
        target: &str,
    ) -> impl Future<Output = Result<String, RetrievalError>> + Send;
}

/// Supplies the intended-state database for a pass.
pub trait DatabaseSource {
    fn fetch_database(
        &self,
    ) -> impl Future<Output = Result<IntendedStateDatabase, CoreError>> + Send;
}

/// Adapts a closure `Fn(String) -> Future` into an [`ObservedSource`].
pub struct FnObservedSource<F>(pub F);

impl<F, Fut> ObservedSource for FnObservedSource<F>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<String, RetrievalError>> + Send,
{
    fn fetch_observed(
        &self,
        target: &str,
    ) -> impl Future<Output = Result<String, RetrievalError>> + Send {
        (self.0)(target.to_owned())
    }
}

/// Adapts a closure `Fn() -> Future` into a [`DatabaseSource`].
pub struct FnDatabaseSource<F>(pub F);

impl<F, Fut> DatabaseSource for FnDatabaseSource<F>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<IntendedStateDatabase, CoreError>> + Send,
{
    fn fetch_database(
        &self,
    ) -> impl Future<Output = Result<IntendedStateDatabase, CoreError>> + Send {
        (self.0)()
    }
}

// ── Results ─────────────────────────────────────────────────────────

/// Outcome for one requested device: findings, or the error that
/// prevented reconciling it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceResult {
    pub target: String,
    /// Prompt hostname read from the device output.
    pub hostname: Option<String>,
    /// Database key the device was resolved against.
    pub resolved_as: Option<String>,
    pub findings: Vec<Finding>,
    pub error: Option<DeviceError>,
}

impl DeviceResult {
    fn failed(target: &str, hostname: Option<String>, error: DeviceError) -> Self {
        Self {
            target: target.to_owned(),
            hostname,
            resolved_as: None,
            findings: Vec::new(),
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn has_drift(&self) -> bool {
        !self.findings.is_empty()
    }

    pub fn summary(&self) -> FindingSummary {
        FindingSummary::from_findings(&self.findings)
    }
}

/// Results of one reconciliation pass.
///
/// Holds an entry for every requested device. When the pass was
/// cancelled, devices that had not completed carry
/// [`DeviceError::Cancelled`].
#[derive(Debug, Clone, Serialize)]
pub struct ReconciliationPass {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub cancelled: bool,
    pub results: BTreeMap<String, DeviceResult>,
}

impl ReconciliationPass {
    pub fn has_drift(&self) -> bool {
        self.results.values().any(DeviceResult::has_drift)
    }

    pub fn failed_devices(&self) -> impl Iterator<Item = &DeviceResult> {
        self.results.values().filter(|r| !r.is_ok())
    }

    pub fn total_findings(&self) -> usize {
        self.results.values().map(|r| r.findings.len()).sum()
    }

    pub fn summary(&self) -> FindingSummary {
        let mut summary = FindingSummary::default();
        for result in self.results.values() {
            summary.merge(result.summary());
        }
        summary
    }
}

// ── Orchestrator ────────────────────────────────────────────────────

/// Runs reconciliation passes with a fixed set of [`PassOptions`].
#[derive(Debug, Clone, Default)]
pub struct Orchestrator {
    options: PassOptions,
}

impl Orchestrator {
    pub fn new(options: PassOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PassOptions {
        &self.options
    }

    /// Run one pass over `devices`.
    ///
    /// An empty device list means every device assigned in the database.
    /// Cancelling `cancel` stops launching new devices and drops the ones
    /// in flight; everything already collected is returned with
    /// `cancelled` set.
    pub async fn run<O, D>(
        &self,
        devices: &[String],
        observed: &O,
        database: &D,
        cancel: &CancellationToken,
    ) -> Result<ReconciliationPass, CoreError>
    where
        O: ObservedSource,
        D: DatabaseSource,
    {
        let started_at = Utc::now();

        let db = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(CoreError::Cancelled),
            db = database.fetch_database() => db?,
        };

        let targets = if devices.is_empty() {
            db.device_names()
        } else {
            dedup(devices)
        };
        let concurrency = self.options.concurrency.max(1);
        info!(
            devices = targets.len(),
            concurrency,
            profiles = db.profiles.len(),
            "starting reconciliation pass"
        );

        let db = &db;
        let mut results = BTreeMap::new();
        {
            let units = futures_util::stream::iter(&targets)
                .map(|target| self.reconcile_device(target, observed, db))
                .buffer_unordered(concurrency)
                .take_until(cancel.cancelled());
            let mut units = std::pin::pin!(units);

            while let Some(result) = units.next().await {
                results.insert(result.target.clone(), result);
            }
        }

        let cancelled = results.len() < targets.len();
        if cancelled {
            warn!(
                completed = results.len(),
                requested = targets.len(),
                "reconciliation pass cancelled"
            );
            for target in &targets {
                results.entry(target.clone()).or_insert_with(|| {
                    DeviceResult::failed(target, None, DeviceError::Cancelled)
                });
            }
        }

        let pass = ReconciliationPass {
            started_at,
            finished_at: Utc::now(),
            cancelled,
            results,
        };
        info!(
            findings = pass.total_findings(),
            failed = pass.failed_devices().count(),
            "reconciliation pass finished"
        );
        Ok(pass)
    }

    async fn reconcile_device<O: ObservedSource>(
        &self,
        target: &str,
        observed: &O,
        db: &IntendedStateDatabase,
    ) -> DeviceResult {
        let timeout = self.options.device_timeout;
        let raw = match tokio::time::timeout(timeout, observed.fetch_observed(target)).await {
            Ok(Ok(raw)) => raw,
            Ok(Err(RetrievalError::TimedOut)) | Err(_) => {
                warn!(device = %target, timeout_secs = timeout.as_secs(), "retrieval timed out");
                return DeviceResult::failed(
                    target,
                    None,
                    DeviceError::Timeout {
                        timeout_secs: timeout.as_secs(),
                    },
                );
            }
            Ok(Err(RetrievalError::Failed { message })) => {
                warn!(device = %target, error = %message, "retrieval failed");
                return DeviceResult::failed(target, None, DeviceError::Retrieval { message });
            }
        };

        let capture = parse_capture(&raw);
        let device = Device::new(target).with_hostname(capture.hostname.unwrap_or_default());
        let identity = device.identity(self.options.match_by).to_owned();
        debug!(
            device = %target,
            hostname = ?device.hostname,
            vlans = capture.vlans.len(),
            "parsed device output"
        );

        match resolve(db, &identity) {
            Ok(expected) => {
                let findings = reconcile(&capture.vlans, &expected);
                debug!(device = %target, findings = findings.len(), "reconciled");
                DeviceResult {
                    target: device.target,
                    hostname: device.hostname,
                    resolved_as: Some(identity),
                    findings,
                    error: None,
                }
            }
            Err(e) => {
                warn!(device = %target, error = %e, "cannot resolve intended state");
                DeviceResult::failed(target, device.hostname, e.into())
            }
        }
    }
}

/// Drop repeated targets, keeping first-seen order.
fn dedup(devices: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    devices
        .iter()
        .filter(|d| seen.insert(d.as_str()))
        .cloned()
        .collect()
}
