//! Process execution utilities
//!
//! Provides a unified interface for running external commands with:
//! - Output capture
//! - An explicit search path for the child process
//! - Streaming output for long-running installs
//! - Automatic affirmative answers for license prompts
//!
//! The provisioning run never mutates its own `PATH`; the caller threads the
//! current search-path value into every invocation so that binaries installed
//! earlier in the same run resolve without re-reading any persisted state.

use crate::error::{Error, Result};
use std::ffi::OsStr;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

/// Result of a command execution
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Whether the command succeeded (exit code 0)
    pub success: bool,
    /// Exit code of the command
    pub exit_code: i32,
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
}

impl CommandResult {
    /// Create from std::process::Output
    pub fn from_output(output: Output) -> Self {
        Self {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// Get combined output (stdout + stderr)
    pub fn combined_output(&self) -> String {
        if self.stderr.is_empty() {
            self.stdout.clone()
        } else if self.stdout.is_empty() {
            self.stderr.clone()
        } else {
            format!("{}\n{}", self.stdout, self.stderr)
        }
    }
}

/// Run a command and capture output
pub fn run_command(program: &str, args: &[&str]) -> Result<CommandResult> {
    tracing::debug!(program, ?args, "running command");
    let output = Command::new(program)
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| Error::process(format!("Failed to execute {}: {}", program, e)))?;

    Ok(CommandResult::from_output(output))
}

/// Run a command with an explicit search path and capture output
pub fn run_command_with_path(
    program: &str,
    args: &[&str],
    search_path: &OsStr,
) -> Result<CommandResult> {
    tracing::debug!(program, ?args, "running command with explicit path");
    let output = Command::new(program)
        .args(args)
        .env("PATH", search_path)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| Error::process(format!("Failed to execute {}: {}", program, e)))?;

    Ok(CommandResult::from_output(output))
}

/// Run a command with extra environment variables and capture output
pub fn run_command_with_env(
    program: &str,
    args: &[&str],
    env: &[(&str, &OsStr)],
) -> Result<CommandResult> {
    let mut cmd = Command::new(program);
    cmd.args(args).stdout(Stdio::piped()).stderr(Stdio::piped());

    for (key, value) in env {
        cmd.env(key, value);
    }

    let output = cmd
        .output()
        .map_err(|e| Error::process(format!("Failed to execute {}: {}", program, e)))?;

    Ok(CommandResult::from_output(output))
}

/// Run a command, streaming output to the terminal (for long installs)
pub fn run_command_streaming(
    program: &str,
    args: &[&str],
    search_path: &OsStr,
) -> Result<i32> {
    tracing::debug!(program, ?args, "running command (streaming)");
    let status = Command::new(program)
        .args(args)
        .env("PATH", search_path)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| Error::process(format!("Failed to execute {}: {}", program, e)))?;

    Ok(status.code().unwrap_or(-1))
}

/// Run a command, answering every stdin prompt with `y`.
///
/// There is no upper bound on the number of prompts: a writer thread feeds
/// affirmative lines until the child stops reading.
pub fn run_command_answering_yes(
    program: &str,
    args: &[&str],
    search_path: &OsStr,
) -> Result<CommandResult> {
    tracing::debug!(program, ?args, "running command (auto-accepting prompts)");
    let mut child = Command::new(program)
        .args(args)
        .env("PATH", search_path)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| Error::process(format!("Failed to execute {}: {}", program, e)))?;

    let stdin = child.stdin.take();
    let writer = std::thread::spawn(move || {
        if let Some(mut stdin) = stdin {
            // Stops on broken pipe once the child exits or closes stdin.
            while stdin.write_all(b"y\n").is_ok() {}
        }
    });

    let output = child
        .wait_with_output()
        .map_err(|e| Error::process(format!("Failed to wait for {}: {}", program, e)))?;
    let _ = writer.join();

    Ok(CommandResult::from_output(output))
}

/// Resolve an executable name against an explicit search path
pub fn resolve_on_path(program: &str, search_path: &OsStr) -> Option<PathBuf> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    which::which_in(program, Some(search_path), cwd).ok()
}

/// Check if a command resolves on an explicit search path
pub fn command_on_path(program: &str, search_path: &OsStr) -> bool {
    resolve_on_path(program, search_path).is_some()
}

/// Check if a command exists on the process's own PATH
pub fn command_exists(program: &str) -> bool {
    which::which(program).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn process_path() -> std::ffi::OsString {
        env::var_os("PATH").unwrap_or_default()
    }

    #[test]
    fn test_command_exists_echo() {
        assert!(command_exists("echo"));
    }

    #[test]
    fn test_command_exists_nonexistent() {
        assert!(!command_exists("nonexistent_command_12345"));
    }

    #[test]
    fn test_command_on_path_empty_path() {
        assert!(!command_on_path("echo", OsStr::new("")));
    }

    #[test]
    fn test_run_command_echo() {
        let result = run_command("echo", &["hello"]).unwrap();
        assert!(result.success);
        assert!(result.stdout.contains("hello"));
    }

    #[test]
    fn test_run_command_with_path_resolves() {
        let result = run_command_with_path("echo", &["hi"], &process_path()).unwrap();
        assert!(result.success);
    }

    #[test]
    fn test_run_command_answering_yes_feeds_stdin() {
        // `head -n 1` reads a single line and exits; the writer thread must
        // terminate on the broken pipe rather than hang.
        let result = run_command_answering_yes("head", &["-n", "1"], &process_path()).unwrap();
        assert!(result.success);
        assert_eq!(result.stdout.trim(), "y");
    }

    #[test]
    fn test_command_result_combined_output() {
        let result = CommandResult {
            success: true,
            exit_code: 0,
            stdout: "out".to_string(),
            stderr: "err".to_string(),
        };
        assert!(result.combined_output().contains("out"));
        assert!(result.combined_output().contains("err"));
    }
}
