//! Command dispatch: bridges CLI args -> core operations -> output formatting.

pub mod audit;
pub mod config_cmd;
pub mod parse;
pub mod resolve;

use tabled::Tabled;

use vlandrift_core::{VlanId, VlanMap};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a command to the appropriate handler.
pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Audit(args) => audit::handle(args, global).await,
        Command::Parse(args) => parse::handle(args, global).await,
        Command::Resolve(args) => resolve::handle(args, global).await,
        Command::Config(args) => config_cmd::handle(args, global),
        Command::Completions(_) => Err(CliError::Internal(
            "completions are handled before dispatch".into(),
        )),
    }
}

// ── Shared rows ─────────────────────────────────────────────────────

#[derive(Tabled)]
struct VlanRow {
    #[tabled(rename = "ID")]
    id: VlanId,
    #[tabled(rename = "Name")]
    name: String,
}

/// VLAN table ordered by ID.
fn vlan_table(vlans: &VlanMap) -> String {
    let mut rows: Vec<VlanRow> = vlans
        .iter()
        .map(|(name, id)| VlanRow {
            id,
            name: name.to_owned(),
        })
        .collect();
    rows.sort_by(|a, b| a.id.cmp(&b.id).then_with(|| a.name.cmp(&b.name)));
    crate::output::render_table(&rows)
}

/// `id<TAB>name` lines ordered by ID.
fn vlan_lines(vlans: &VlanMap) -> String {
    let mut pairs: Vec<(VlanId, &str)> = vlans.iter().map(|(name, id)| (id, name)).collect();
    pairs.sort_unstable();
    pairs
        .into_iter()
        .map(|(id, name)| format!("{id}\t{name}"))
        .collect::<Vec<_>>()
        .join("\n")
}
