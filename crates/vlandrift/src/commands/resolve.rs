//! `resolve`: a device's effective VLAN set from the database.

use serde::Serialize;

use vlandrift_core::{DatabaseLoader, DatabaseSource, VlanMap};

use crate::cli::{GlobalOpts, ResolveArgs};
use crate::config;
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
struct Resolution {
    device: String,
    profile: String,
    /// VLAN names replaced or added by the device's overrides.
    overridden: Vec<String>,
    vlans: VlanMap,
}

fn detail(r: &Resolution) -> String {
    let overridden = if r.overridden.is_empty() {
        "-".to_owned()
    } else {
        r.overridden.join(", ")
    };
    format!(
        "Device:     {}\nProfile:    {}\nOverridden: {overridden}\n{}",
        r.device,
        r.profile,
        super::vlan_table(&r.vlans)
    )
}

pub async fn handle(args: ResolveArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load(global)?;
    let format = config::output_format(global, &cfg);

    let loader = DatabaseLoader::from_location(
        &cfg.database_location()?,
        &cfg.tls_verification(),
        cfg.database_timeout(),
    )?;
    let db = loader.fetch_database().await?;

    let vlans = vlandrift_core::resolve(&db, &args.device)?;
    let assignment = db.assignment(&args.device);
    let resolution = Resolution {
        device: args.device,
        profile: assignment.map(|a| a.profile.clone()).unwrap_or_default(),
        overridden: assignment
            .and_then(|a| a.overrides.as_ref())
            .map(|o| o.names().map(str::to_owned).collect())
            .unwrap_or_default(),
        vlans,
    };

    let out = output::render_single(format, &resolution, detail, |r| {
        super::vlan_lines(&r.vlans)
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}
