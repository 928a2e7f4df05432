use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use thiserror::Error;

/// Failure of a single `git` subprocess invocation
#[derive(Debug, Error)]
pub enum GitError {
    /// The `git` executable could not be started at all
    #[error("failed to execute `git {command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// `git` ran and exited unsuccessfully
    #[error("`git {command}` {}{}", exit_description(.code), stderr_suffix(.stderr))]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {code}"),
        None => "was terminated by a signal".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

/// The git operations the automator needs, kept behind a trait so the
/// sequence can be checked against a recording runner.
pub trait GitRunner {
    /// Run a read-only command and capture its trimmed standard output
    fn query(&self, args: &[&str]) -> Result<String, GitError>;

    /// Run a command whose output goes straight to the terminal
    fn exec(&self, args: &[&str]) -> Result<(), GitError>;
}

/// Runs the real `git` executable inside a fixed working directory
#[derive(Debug, Clone)]
pub struct SystemGit {
    cwd: PathBuf,
}

impl SystemGit {
    pub fn new<P: AsRef<Path>>(cwd: P) -> Self {
        Self {
            cwd: cwd.as_ref().to_path_buf(),
        }
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new("git");
        cmd.args(args).current_dir(&self.cwd);
        cmd
    }
}

impl GitRunner for SystemGit {
    fn query(&self, args: &[&str]) -> Result<String, GitError> {
        tracing::debug!(cwd = %self.cwd.display(), "git {}", args.join(" "));

        let output = self
            .command(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| GitError::Spawn {
                command: args.join(" "),
                source,
            })?;

        if !output.status.success() {
            return Err(GitError::Failed {
                command: args.join(" "),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn exec(&self, args: &[&str]) -> Result<(), GitError> {
        tracing::debug!(cwd = %self.cwd.display(), "git {}", args.join(" "));

        let status = self
            .command(args)
            .status()
            .map_err(|source| GitError::Spawn {
                command: args.join(" "),
                source,
            })?;

        if !status.success() {
            return Err(GitError::Failed {
                command: args.join(" "),
                code: status.code(),
                stderr: String::new(),
            });
        }

        Ok(())
    }
}
