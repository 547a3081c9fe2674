// Raw switch output retrieval
//
// Two ways to obtain `show vlan brief | inc active` output for a target:
// run an operator-supplied command (typically the system `ssh` client,
// which owns keys, host verification and sessions) or read a capture file
// saved earlier. Neither holds credentials or session state.

use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::error::Error;

/// Placeholder replaced by the target address in command templates.
pub const TARGET_PLACEHOLDER: &str = "{target}";

// ── Command collector ────────────────────────────────────────────────

/// Runs an external command per target and returns its stdout.
///
/// Every argument in the template has [`TARGET_PLACEHOLDER`] substituted,
/// e.g. `["ssh", "-T", "admin@{target}", "show vlan-switch brief | inc active"]`.
#[derive(Debug, Clone)]
pub struct CommandCollector {
    template: Vec<String>,
}

impl CommandCollector {
    pub fn new(template: Vec<String>) -> Result<Self, Error> {
        if template.first().is_none_or(|program| program.trim().is_empty()) {
            return Err(Error::EmptyCommand);
        }
        Ok(Self { template })
    }

    /// Expand the template for one target into program + arguments.
    pub fn render(&self, target: &str) -> (String, Vec<String>) {
        let mut parts = self
            .template
            .iter()
            .map(|part| part.replace(TARGET_PLACEHOLDER, target));
        let program = parts.next().unwrap_or_default();
        (program, parts.collect())
    }

    /// Run the command for `target` and return its stdout as text.
    ///
    /// The child is killed if the returned future is dropped, so callers
    /// can bound it with a timeout or cancel it outright.
    pub async fn collect(&self, target: &str) -> Result<String, Error> {
        let (program, args) = self.render(target);
        debug!(target = %target, program = %program, "running collector command");

        let output = Command::new(&program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| Error::Spawn {
                program: program.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_owned();
            return Err(Error::Command {
                program,
                status: output.status.to_string(),
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

// ── Capture directory ────────────────────────────────────────────────

/// Reads saved captures from `<root>/<target>.txt`.
#[derive(Debug, Clone)]
pub struct CaptureDir {
    root: PathBuf,
}

impl CaptureDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of the capture file for `target`.
    ///
    /// Targets that could escape the capture directory are rejected.
    pub fn capture_path(&self, target: &str) -> Result<PathBuf, Error> {
        let invalid = target.is_empty()
            || target.starts_with('.')
            || target.contains(['/', '\\'])
            || target.contains('\0');
        if invalid {
            return Err(Error::InvalidTarget {
                target: target.to_owned(),
            });
        }
        Ok(self.root.join(format!("{target}.txt")))
    }

    pub async fn collect(&self, target: &str) -> Result<String, Error> {
        let path = self.capture_path(target)?;
        debug!(target = %target, path = %path.display(), "reading capture");
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(Error::CaptureNotFound { path })
            }
            Err(e) => Err(Error::Io(e)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn render_substitutes_every_placeholder() {
        let collector = CommandCollector::new(vec![
            "ssh".into(),
            "admin@{target}".into(),
            "show vlan-switch brief | inc active".into(),
        ])
        .unwrap();

        let (program, args) = collector.render("10.0.0.11");
        assert_eq!(program, "ssh");
        assert_eq!(
            args,
            vec!["admin@10.0.0.11", "show vlan-switch brief | inc active"]
        );
    }

    #[test]
    fn empty_template_is_rejected() {
        assert!(matches!(
            CommandCollector::new(Vec::new()),
            Err(Error::EmptyCommand)
        ));
        assert!(matches!(
            CommandCollector::new(vec!["  ".into()]),
            Err(Error::EmptyCommand)
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn collect_returns_stdout() {
        let collector = CommandCollector::new(vec![
            "sh".into(),
            "-c".into(),
            "printf 'term len 0\\n{target}>show vlan brief\\n'".into(),
        ])
        .unwrap();

        let out = collector.collect("ESW1").await.unwrap();
        assert_eq!(out, "term len 0\nESW1>show vlan brief\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn collect_reports_failed_exit() {
        let collector = CommandCollector::new(vec![
            "sh".into(),
            "-c".into(),
            "echo unreachable >&2; exit 3".into(),
        ])
        .unwrap();

        match collector.collect("10.0.0.1").await {
            Err(Error::Command { stderr, .. }) => assert_eq!(stderr, "unreachable"),
            other => panic!("expected Command error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_program_is_a_spawn_error() {
        let collector =
            CommandCollector::new(vec!["vlandrift-no-such-program-4094".into()]).unwrap();
        let result = collector.collect("10.0.0.1").await;
        assert!(matches!(result, Err(Error::Spawn { .. })), "got: {result:?}");
    }

    #[tokio::test]
    async fn capture_dir_reads_target_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("10.0.0.11.txt"), "ESW1>show\n").unwrap();
        let captures = CaptureDir::new(dir.path());

        assert_eq!(captures.collect("10.0.0.11").await.unwrap(), "ESW1>show\n");
        assert!(matches!(
            captures.collect("10.0.0.12").await,
            Err(Error::CaptureNotFound { .. })
        ));
    }

    #[test]
    fn capture_path_rejects_traversal() {
        let captures = CaptureDir::new("/tmp/captures");
        assert!(captures.capture_path("../etc/passwd").is_err());
        assert!(captures.capture_path("a/b").is_err());
        assert!(captures.capture_path("").is_err());
        assert_eq!(
            captures.capture_path("sw-01").unwrap(),
            PathBuf::from("/tmp/captures/sw-01.txt")
        );
    }
}
