use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the `vlandrift-api` crate.
///
/// Covers every failure mode of the collaborators: HTTP transport for the
/// intended-state document, local file access, and external command
/// execution. `vlandrift-core` maps these into per-device or pass-level
/// errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Non-success HTTP status from the database server.
    #[error("HTTP {status} from {url}: {message}")]
    Http {
        url: String,
        status: u16,
        message: String,
    },

    /// No database endpoint was configured.
    #[error("No database endpoints configured")]
    NoEndpoints,

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── Retrieval ───────────────────────────────────────────────────
    /// The collector command template is empty.
    #[error("Collector command is empty")]
    EmptyCommand,

    /// The collector command could not be started.
    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The collector command exited unsuccessfully.
    #[error("'{program}' exited with {status}: {stderr}")]
    Command {
        program: String,
        status: String,
        stderr: String,
    },

    /// A target name cannot be mapped onto a capture file.
    #[error("Invalid target name for capture lookup: {target:?}")]
    InvalidTarget { target: String },

    /// No saved capture exists for a target.
    #[error("No capture found at {}", .path.display())]
    CaptureNotFound { path: PathBuf },

    /// Filesystem error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
