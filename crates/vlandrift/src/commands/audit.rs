//! `audit`: one reconciliation pass over many devices.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Tabled;
use tokio_util::sync::CancellationToken;

use vlandrift_core::{
    DatabaseLoader, DeviceResult, ObservedCollector, Orchestrator, ReconciliationPass, VlanId,
};

use crate::cli::{AuditArgs, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output::{self, Tone};

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct FindingRow {
    #[tabled(rename = "Device")]
    device: String,
    #[tabled(rename = "Finding")]
    kind: String,
    #[tabled(rename = "VLAN")]
    vlan: String,
    #[tabled(rename = "Configured")]
    configured: String,
    #[tabled(rename = "Expected")]
    expected: String,
}

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Device")]
    device: String,
    #[tabled(rename = "Hostname")]
    hostname: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Mismatched")]
    mismatched: usize,
    #[tabled(rename = "Missing")]
    missing: usize,
    #[tabled(rename = "Unauthorized")]
    unauthorized: usize,
}

impl From<&DeviceResult> for DeviceRow {
    fn from(r: &DeviceResult) -> Self {
        let summary = r.summary();
        Self {
            device: r.target.clone(),
            hostname: r.hostname.clone().unwrap_or_else(|| "-".into()),
            status: status(r),
            mismatched: summary.mismatched,
            missing: summary.missing,
            unauthorized: summary.unauthorized,
        }
    }
}

fn status(r: &DeviceResult) -> String {
    match (&r.error, r.has_drift()) {
        (Some(err), _) => err.kind().replace('_', " "),
        (None, true) => "drift".into(),
        (None, false) => "ok".into(),
    }
}

fn id_or_dash(id: Option<VlanId>) -> String {
    id.map_or_else(|| "-".into(), |id| id.to_string())
}

// ── Rendering ───────────────────────────────────────────────────────

fn detail(pass: &ReconciliationPass, color: bool) -> String {
    let mut sections = Vec::new();

    let findings: Vec<FindingRow> = pass
        .results
        .values()
        .flat_map(|r| {
            r.findings.iter().map(|f| FindingRow {
                device: r.target.clone(),
                kind: f.kind().to_string(),
                vlan: f.vlan_name().to_owned(),
                configured: id_or_dash(f.configured_id()),
                expected: id_or_dash(f.expected_id()),
            })
        })
        .collect();
    if !findings.is_empty() {
        sections.push(output::render_table(&findings));
    }

    let devices: Vec<DeviceRow> = pass.results.values().map(DeviceRow::from).collect();
    if !devices.is_empty() {
        sections.push(output::render_table(&devices));
    }

    let errors: Vec<String> = pass
        .failed_devices()
        .filter_map(|r| r.error.as_ref().map(|e| format!("  {}: {e}", r.target)))
        .collect();
    if !errors.is_empty() {
        sections.push(errors.join("\n"));
    }

    sections.push(summary_line(pass, color));
    sections.join("\n\n")
}

fn summary_line(pass: &ReconciliationPass, color: bool) -> String {
    let summary = pass.summary();
    let drifted = pass.results.values().filter(|r| r.has_drift()).count();
    let failed = pass.failed_devices().count();
    let elapsed = (pass.finished_at - pass.started_at).num_milliseconds();

    let line = format!(
        "{} device(s) audited in {elapsed}ms: {drifted} with drift, {failed} failed \
         ({} mismatched, {} missing, {} unauthorized)",
        pass.results.len(),
        summary.mismatched,
        summary.missing,
        summary.unauthorized,
    );
    let tone = if failed > 0 {
        Tone::Bad
    } else if drifted > 0 {
        Tone::Warn
    } else {
        Tone::Good
    };
    output::paint(&line, tone, color)
}

/// `device<TAB>kind<TAB>vlan<TAB>configured<TAB>expected`, one line per
/// finding or failed device.
fn plain(pass: &ReconciliationPass) -> String {
    let mut lines = Vec::new();
    for r in pass.results.values() {
        if let Some(ref err) = r.error {
            lines.push(format!("{}\terror\t{}\t{err}", r.target, err.kind()));
        }
        for f in &r.findings {
            lines.push(format!(
                "{}\t{}\t{}\t{}\t{}",
                r.target,
                f.kind(),
                f.vlan_name(),
                id_or_dash(f.configured_id()),
                id_or_dash(f.expected_id()),
            ));
        }
    }
    lines.join("\n")
}

fn progress(quiet: bool, devices: usize) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg} [{elapsed}]") {
        bar.set_style(style);
    }
    bar.set_message(if devices == 0 {
        "auditing all database devices".to_owned()
    } else {
        format!("auditing {devices} device(s)")
    });
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: AuditArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let mut cfg = config::load(global)?;
    config::apply_audit_overrides(&mut cfg, &args);
    let format = config::output_format(global, &cfg);
    let audit = cfg.to_audit_config()?;

    let mut targets = args.devices.clone();
    if let Some(ref path) = args.devices_file {
        targets.extend(config::read_devices_file(path)?);
    }
    if targets.is_empty() {
        targets.clone_from(&cfg.devices);
    }

    let observed = ObservedCollector::from_kind(&audit.collector)?;
    let database = DatabaseLoader::from_config(&audit)?;
    let orchestrator = Orchestrator::new(audit.pass);

    let cancel = CancellationToken::new();
    let interrupt = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("interrupt received, cancelling audit");
                cancel.cancel();
            }
        }
    });

    let spinner = progress(global.quiet, targets.len());
    let result = orchestrator
        .run(&targets, &observed, &database, &cancel)
        .await;
    spinner.finish_and_clear();
    interrupt.abort();
    let pass = result?;

    let color = output::should_color(global.color);
    let out = output::render_single(format, &pass, |p| detail(p, color), plain)?;
    output::print_output(&out, global.quiet);

    if pass.cancelled {
        return Err(CliError::Cancelled);
    }

    if args.fail_on_drift {
        let devices = pass
            .results
            .values()
            .filter(|r| r.has_drift() || !r.is_ok())
            .count();
        if devices > 0 {
            return Err(CliError::DriftDetected { devices });
        }
    }
    Ok(())
}
