//! Dependency installation after the project has been generated
//!
//! The package manager runs once in the project root. Its output is captured, not
//! streamed, and a non-zero exit is reported to the caller rather than treated as
//! an error: the generated project stays usable either way.

use anyhow::{Context, Result};
use log::debug;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

/// Upper bound for the install command (5 minutes)
pub const INSTALL_TIMEOUT: Duration = Duration::from_secs(300);

/// Command used to install dependencies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageManager {
    pub program: String,
    pub args: Vec<String>,
}

impl PackageManager {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// `bun install`
    pub fn bun() -> Self {
        Self::new("bun", ["install"])
    }

    /// The command as the user would type it
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for PackageManager {
    fn default() -> Self {
        Self::bun()
    }
}

/// Result of a finished install command
#[derive(Debug, Clone)]
pub struct InstallOutcome {
    /// Exit code; `None` when the process was killed or timed out
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub timed_out: bool,
}

impl InstallOutcome {
    pub fn success(&self) -> bool {
        !self.timed_out && self.code == Some(0)
    }
}

/// Run `manager` in `project_dir` and wait for it, at most `limit`.
///
/// Only a failure to start the process is an error.
pub async fn install_dependencies(
    manager: &PackageManager,
    project_dir: &Path,
    limit: Duration,
) -> Result<InstallOutcome> {
    debug!(
        "Running `{}` in {}",
        manager.command_line(),
        project_dir.display()
    );

    let child = TokioCommand::new(&manager.program)
        .args(&manager.args)
        .current_dir(project_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .with_context(|| format!("Failed to start `{}`", manager.command_line()))?;

    match timeout(limit, child.wait_with_output()).await {
        Ok(output) => {
            let output = output
                .with_context(|| format!("Failed to wait for `{}`", manager.command_line()))?;
            Ok(InstallOutcome {
                code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                timed_out: false,
            })
        }
        // The child is dropped with the future and killed
        Err(_) => Ok(InstallOutcome {
            code: None,
            stdout: String::new(),
            stderr: format!(
                "`{}` timed out after {} seconds",
                manager.command_line(),
                limit.as_secs()
            ),
            timed_out: true,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_command_line() {
        assert_eq!(PackageManager::bun().command_line(), "bun install");
        assert_eq!(
            PackageManager::new("npm", ["install", "--silent"]).command_line(),
            "npm install --silent"
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_successful_install_captures_output() {
        let tmp = TempDir::new().unwrap();
        let manager = PackageManager::new("sh", ["-c", "pwd; echo warn >&2"]);

        let outcome = install_dependencies(&manager, tmp.path(), INSTALL_TIMEOUT)
            .await
            .unwrap();

        assert!(outcome.success());
        assert_eq!(outcome.stderr.trim(), "warn");
        let dir_name = tmp.path().file_name().unwrap().to_string_lossy().into_owned();
        assert!(outcome.stdout.trim().ends_with(&dir_name));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_is_not_an_error() {
        let tmp = TempDir::new().unwrap();
        let manager = PackageManager::new("sh", ["-c", "exit 3"]);

        let outcome = install_dependencies(&manager, tmp.path(), INSTALL_TIMEOUT)
            .await
            .unwrap();

        assert!(!outcome.success());
        assert_eq!(outcome.code, Some(3));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_timeout_is_reported() {
        let tmp = TempDir::new().unwrap();
        let manager = PackageManager::new("sh", ["-c", "sleep 5"]);

        let outcome = install_dependencies(&manager, tmp.path(), Duration::from_millis(100))
            .await
            .unwrap();

        assert!(outcome.timed_out);
        assert!(!outcome.success());
    }

    #[tokio::test]
    async fn test_missing_program_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let manager = PackageManager::new("definitely-not-a-real-binary-4f1c", ["install"]);

        assert!(install_dependencies(&manager, tmp.path(), INSTALL_TIMEOUT)
            .await
            .is_err());
    }
}
