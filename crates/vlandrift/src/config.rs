//! CLI configuration: thin wrapper around `vlandrift_config`.
//!
//! Adds the `--config` path and the flag overrides (`--database-url`,
//! `--capture-dir`, ...) on top of file and environment values.

use std::path::PathBuf;

use clap::ValueEnum;

use crate::cli::{AuditArgs, GlobalOpts, OutputFormat};
use crate::error::CliError;

pub use vlandrift_config::{Config, config_path, load_config, save_config};

/// The config file in effect: `--config` or the platform default.
pub fn config_file(global: &GlobalOpts) -> PathBuf {
    global.config.clone().unwrap_or_else(config_path)
}

/// Load file + env config, then apply the global database flags.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut cfg = load_config(Some(&config_file(global)))?;
    apply_database_overrides(&mut cfg, global);
    Ok(cfg)
}

/// Like [`load`], but falls back to defaults when the file is unreadable.
pub fn load_or_default(global: &GlobalOpts) -> Config {
    load(global).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "using default configuration");
        Config::default()
    })
}

/// `--output` wins, then `defaults.output`, then table.
pub fn output_format(global: &GlobalOpts, cfg: &Config) -> OutputFormat {
    global.output.unwrap_or_else(|| {
        OutputFormat::from_str(&cfg.defaults.output, true).unwrap_or(OutputFormat::Table)
    })
}

fn apply_database_overrides(cfg: &mut Config, global: &GlobalOpts) {
    if !global.database_urls.is_empty() {
        cfg.database.urls.clone_from(&global.database_urls);
        cfg.database.path = None;
    }
    if let Some(ref file) = global.database_file {
        cfg.database.path = Some(file.clone());
        cfg.database.urls.clear();
    }
    if global.insecure {
        cfg.database.insecure = true;
    }
}

/// Apply `audit` flags to a loaded config.
pub fn apply_audit_overrides(cfg: &mut Config, args: &AuditArgs) {
    if let Some(concurrency) = args.concurrency {
        cfg.defaults.concurrency = concurrency;
    }
    if let Some(timeout) = args.timeout {
        cfg.defaults.timeout = timeout;
    }
    if let Some(match_by) = args.match_by {
        cfg.defaults.match_by = match_by.into();
    }
    if let Some(ref dir) = args.capture_dir {
        cfg.collector.capture_dir = Some(dir.clone());
        cfg.collector.command.clear();
    }
}

/// Read a device list file: one device per line, `#` comments.
pub fn read_devices_file(path: &std::path::Path) -> Result<Vec<String>, CliError> {
    let body = std::fs::read_to_string(path)?;
    Ok(body
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_owned)
        .collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::{Cli, Command};

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("vlandrift").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn database_file_flag_replaces_configured_urls() {
        let cli = parse(&["--database-file", "/tmp/intent.json", "audit"]);
        let mut cfg = Config::example();
        apply_database_overrides(&mut cfg, &cli.global);

        assert!(cfg.database.urls.is_empty());
        assert_eq!(cfg.database.path, Some(PathBuf::from("/tmp/intent.json")));
    }

    #[test]
    fn audit_flags_override_defaults() {
        let cli = parse(&[
            "audit",
            "--capture-dir",
            "/tmp/captures",
            "-j",
            "2",
            "--match-by",
            "target",
        ]);
        let Command::Audit(args) = cli.command else {
            panic!("expected audit");
        };
        let mut cfg = Config::example();
        apply_audit_overrides(&mut cfg, &args);

        assert_eq!(cfg.defaults.concurrency, 2);
        assert_eq!(cfg.defaults.match_by, vlandrift_core::MatchBy::Target);
        assert!(cfg.collector.command.is_empty());
        assert!(cfg.to_audit_config().is_ok());
    }

    #[test]
    fn output_flag_beats_config() {
        let mut cfg = Config::default();
        cfg.defaults.output = "yaml".into();

        let cli = parse(&["config", "show"]);
        assert_eq!(output_format(&cli.global, &cfg), OutputFormat::Yaml);

        let cli = parse(&["-o", "json", "config", "show"]);
        assert_eq!(output_format(&cli.global, &cfg), OutputFormat::Json);
    }

    #[test]
    fn devices_file_skips_comments_and_blanks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("devices.txt");
        std::fs::write(&path, "# lab\n10.0.0.11\n\n  10.0.0.12  \n").unwrap();

        assert_eq!(
            read_devices_file(&path).unwrap(),
            vec!["10.0.0.11".to_owned(), "10.0.0.12".to_owned()]
        );
    }
}
