//! `parse`: read a captured `show vlan brief` session.

use std::path::Path;

use tokio::io::AsyncReadExt;

use vlandrift_core::{ParsedCapture, parse_capture};

use crate::cli::{GlobalOpts, ParseArgs};
use crate::config;
use crate::error::CliError;
use crate::output;

fn detail(parsed: &ParsedCapture) -> String {
    let hostname = parsed.hostname.as_deref().unwrap_or("-");
    if parsed.vlans.is_empty() {
        return format!("Hostname: {hostname}\nNo active VLANs found.");
    }
    format!("Hostname: {hostname}\n{}", super::vlan_table(&parsed.vlans))
}

async fn read_capture(path: &Path) -> Result<String, CliError> {
    if path == Path::new("-") {
        let mut raw = String::new();
        tokio::io::stdin().read_to_string(&mut raw).await?;
        return Ok(raw);
    }
    tokio::fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            CliError::NotFound {
                resource_type: "capture file".into(),
                identifier: path.display().to_string(),
            }
        } else {
            CliError::Io(e)
        }
    })
}

pub async fn handle(args: ParseArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load_or_default(global);
    let format = config::output_format(global, &cfg);

    let raw = read_capture(&args.file).await?;
    let parsed = parse_capture(&raw);
    tracing::debug!(
        hostname = parsed.hostname.as_deref().unwrap_or("-"),
        vlans = parsed.vlans.len(),
        "parsed capture"
    );

    let out = output::render_single(format, &parsed, detail, |p| {
        super::vlan_lines(&p.vlans)
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}
