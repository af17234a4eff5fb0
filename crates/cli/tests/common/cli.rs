//! CLI command execution helpers with automatic timing
//!
//! Wraps the `filewatch` binary, isolating it from the user's
//! configuration and measuring execution time.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output, Stdio};
use std::time::{Duration, Instant};

/// CLI command builder with timing
pub struct FwCommand {
    binary_path: PathBuf,
    working_dir: PathBuf,
    args: Vec<String>,
    env: HashMap<String, String>,
    stdin_data: Option<String>,
}

impl FwCommand {
    /// Create a new command in the given working directory
    ///
    /// HOME and XDG_CONFIG_HOME point into the working directory so a
    /// config file from the host never leaks into a test.
    pub fn new(working_dir: impl AsRef<Path>) -> Self {
        let working_dir = working_dir.as_ref().to_path_buf();
        let isolated = working_dir.join(".home").display().to_string();

        let mut env = HashMap::new();
        env.insert("HOME".to_string(), isolated.clone());
        env.insert("XDG_CONFIG_HOME".to_string(), isolated);

        Self {
            binary_path: PathBuf::from(env!("CARGO_BIN_EXE_filewatch")),
            working_dir,
            args: Vec::new(),
            env,
            stdin_data: None,
        }
    }

    /// Add command arguments
    pub fn args(&mut self, args: &[&str]) -> &mut Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Provide stdin data
    pub fn stdin(&mut self, data: &str) -> &mut Self {
        self.stdin_data = Some(data.to_string());
        self
    }

    /// Start a long-running command (e.g. `watch`) with piped output
    pub fn spawn(&self) -> Result<Child> {
        self.command()
            .stdin(Stdio::null())
            .spawn()
            .context("Failed to spawn command")
    }

    /// Execute command and return result with timing
    pub fn execute(&self) -> Result<CommandResult> {
        let start = Instant::now();

        let mut command = self.command();
        command.stdin(if self.stdin_data.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        });

        let mut child = command.spawn().context("Failed to spawn command")?;

        if let Some(data) = &self.stdin_data {
            if let Some(mut stdin) = child.stdin.take() {
                stdin.write_all(data.as_bytes())?;
            }
        }

        let output = child
            .wait_with_output()
            .context("Failed to wait for command")?;

        Ok(CommandResult::from_output(&output, start.elapsed()))
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.binary_path);
        command
            .args(&self.args)
            .current_dir(&self.working_dir)
            .env_remove("RUST_LOG")
            .envs(&self.env)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        command
    }

    /// Execute and assert success
    pub fn assert_success(&self) -> Result<CommandResult> {
        let result = self.execute()?;

        if !result.success() {
            anyhow::bail!(
                "Command failed after {:?} (exit code: {}):\nArgs: {:?}\nStdout: {}\nStderr: {}",
                result.duration,
                result.exit_code,
                self.args,
                result.stdout,
                result.stderr
            );
        }

        Ok(result)
    }

    /// Execute and expect failure
    pub fn assert_failure(&self) -> Result<CommandResult> {
        let result = self.execute()?;

        if result.success() {
            anyhow::bail!(
                "Command should have failed but succeeded after {:?}:\nArgs: {:?}\nStdout: {}",
                result.duration,
                self.args,
                result.stdout
            );
        }

        Ok(result)
    }
}

/// Command execution result with timing
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub duration: Duration,
}

impl CommandResult {
    /// Collect a finished process's output
    pub fn from_output(output: &Output, duration: Duration) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
            duration,
        }
    }

    /// Check if command succeeded
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Check if stdout contains text
    pub fn contains_stdout(&self, text: &str) -> bool {
        self.stdout.contains(text)
    }

    /// Check if stderr contains text
    pub fn contains_stderr(&self, text: &str) -> bool {
        self.stderr.contains(text)
    }

    /// Log lines on stderr at the given level name (`WARNING`, `DEBUG`, ...)
    pub fn log_lines(&self, level: &str) -> Vec<&str> {
        let prefix = format!("[{}]", level);
        self.stderr
            .lines()
            .filter(|line| line.starts_with(&prefix))
            .collect()
    }
}

/// Macro for convenient command construction
///
/// Usage:
/// ```ignore
/// fw!(dir, "replay", "--echo").stdin("1 a.txt\n").assert_success()?;
/// ```
#[macro_export]
macro_rules! fw {
    ($dir:expr, $($arg:expr),*) => {{
        let mut cmd = $crate::common::cli::FwCommand::new($dir);
        cmd.args(&[$($arg),*]);
        cmd
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_lines_by_level() {
        let result = CommandResult {
            stdout: String::new(),
            stderr: "[DEBUG] --x - (watcher::dispatch): File event occurred\n\
                     [WARNING] --x - (watcher::dispatch): No handler\n"
                .to_string(),
            exit_code: 0,
            duration: Duration::from_millis(10),
        };

        assert_eq!(result.log_lines("WARNING").len(), 1);
        assert_eq!(result.log_lines("DEBUG").len(), 1);
        assert!(result.log_lines("ERROR").is_empty());
    }
}
