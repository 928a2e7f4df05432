use std::cell::RefCell;

use chrono::{NaiveDate, NaiveDateTime};

use crate::clock::Clock;
use crate::git::{GitError, GitRunner};

/// A `GitRunner` that records every invocation instead of running git
pub struct RecordingGit {
    branch: Option<String>,
    failing: Vec<&'static str>,
    calls: RefCell<Vec<Vec<String>>>,
}

impl RecordingGit {
    /// `branch --show-current` answers with `branch`
    pub fn on_branch(branch: &str) -> Self {
        Self {
            branch: Some(branch.to_string()),
            failing: Vec::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// `branch --show-current` fails the way git does outside a repository
    pub fn not_a_repository() -> Self {
        Self {
            branch: None,
            failing: Vec::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Make every `git <subcommand>` exit with status 1
    pub fn failing(mut self, subcommand: &'static str) -> Self {
        self.failing.push(subcommand);
        self
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.borrow().clone()
    }

    fn record(&self, args: &[&str]) {
        self.calls
            .borrow_mut()
            .push(args.iter().map(|arg| arg.to_string()).collect());
    }
}

impl GitRunner for RecordingGit {
    fn query(&self, args: &[&str]) -> Result<String, GitError> {
        self.record(args);

        self.branch.clone().ok_or_else(|| GitError::Failed {
            command: args.join(" "),
            code: Some(128),
            stderr: "fatal: not a git repository (or any of the parent directories): .git"
                .to_string(),
        })
    }

    fn exec(&self, args: &[&str]) -> Result<(), GitError> {
        self.record(args);

        match args.first() {
            Some(subcommand) if self.failing.iter().any(|f| f == subcommand) => Err(GitError::Failed {
                command: args.join(" "),
                code: Some(1),
                stderr: String::new(),
            }),
            _ => Ok(()),
        }
    }
}

/// A clock stuck at one instant
pub struct FixedClock(NaiveDateTime);

impl FixedClock {
    pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Self {
        Self(
            NaiveDate::from_ymd_opt(year, month, day)
                .and_then(|date| date.and_hms_opt(hour, minute, second))
                .expect("valid test timestamp"),
        )
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::at(2026, 10, 18, 14, 3, 22)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
