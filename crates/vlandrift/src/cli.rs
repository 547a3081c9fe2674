//! Clap derive structures for the `vlandrift` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use vlandrift_core::MatchBy;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// vlandrift -- VLAN drift auditing for access switches
#[derive(Debug, Parser)]
#[command(
    name = "vlandrift",
    version,
    about = "Audit access-switch VLANs against an intended-state database",
    long_about = "Collects `show vlan brief` output from access switches, resolves each\n\
        device's intended VLAN set from its profile and overrides, and reports\n\
        mismatched, missing and unauthorized VLANs.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "VLANDRIFT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format (overrides `defaults.output`)
    #[arg(long, short = 'o', env = "VLANDRIFT_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Intended-state database URL, repeatable (tried in order)
    #[arg(long = "database-url", value_name = "URL", global = true)]
    pub database_urls: Vec<String>,

    /// Read the intended-state database from a local JSON file
    #[arg(long, value_name = "FILE", global = true, conflicts_with = "database_urls")]
    pub database_file: Option<PathBuf>,

    /// Accept invalid TLS certificates from the database endpoint
    #[arg(long, short = 'k', global = true)]
    pub insecure: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Tab-separated lines (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MatchByArg {
    /// Prompt hostname, falling back to the target
    Prompt,
    /// Requested target
    Target,
}

impl From<MatchByArg> for MatchBy {
    fn from(arg: MatchByArg) -> Self {
        match arg {
            MatchByArg::Prompt => Self::Prompt,
            MatchByArg::Target => Self::Target,
        }
    }
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a reconciliation pass over devices
    #[command(alias = "a")]
    Audit(AuditArgs),

    /// Parse a captured `show vlan brief` output file
    Parse(ParseArgs),

    /// Show a device's effective VLAN set from the database
    Resolve(ResolveArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Audit ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AuditArgs {
    /// Devices to audit (defaults to config `devices`, then the database)
    pub devices: Vec<String>,

    /// Read additional devices from a file, one per line
    #[arg(long, value_name = "FILE")]
    pub devices_file: Option<PathBuf>,

    /// Exit with code 10 when any drift or device failure is found
    #[arg(long)]
    pub fail_on_drift: bool,

    /// Devices worked on at once
    #[arg(long, short = 'j')]
    pub concurrency: Option<usize>,

    /// Per-device retrieval timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Read `<DIR>/<device>.txt` captures instead of running a command
    #[arg(long, value_name = "DIR")]
    pub capture_dir: Option<PathBuf>,

    /// How results are matched to database entries
    #[arg(long)]
    pub match_by: Option<MatchByArg>,
}

// ── Parse / Resolve ──────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Capture file to parse (`-` for stdin)
    pub file: PathBuf,
}

#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Device name as keyed in the database
    pub device: String,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display the effective configuration
    Show,

    /// Print the config file path
    Path,

    /// Write an example configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
