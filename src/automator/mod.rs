//! Commit-and-push automation
//!
//! One linear pass: resolve the branch, build the message, then
//! `git add .`, `git commit -m <message>` and `git push <remote> <branch>`.
//! Under the default policy every step is attempted whatever happened before
//! it; `strict` stops at the first failure.

pub mod report;


use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::config::Settings;
use crate::git::GitRunner;
use crate::message::CommitMessage;

pub use report::{RunReport, SkipReason, Step, StepOutcome, StepRecord};

const BRANCH_QUERY: [&str; 2] = ["branch", "--show-current"];

/// Asked right before pushing; `false` skips the push
pub type PushConfirmation<'a> = Box<dyn Fn(&str, &str) -> bool + 'a>;

pub struct Automator<'a, G: GitRunner, C: Clock> {
    git: &'a G,
    clock: &'a C,
    settings: &'a Settings,
    pending_changes: Option<usize>,
    confirm_push: Option<PushConfirmation<'a>>,
}

impl<'a, G: GitRunner, C: Clock> Automator<'a, G, C> {
    pub fn new(git: &'a G, clock: &'a C, settings: &'a Settings) -> Self {
        Self {
            git,
            clock,
            settings,
            pending_changes: None,
            confirm_push: None,
        }
    }

    /// Pending change count from repository inspection, if it succeeded
    pub fn with_pending_changes(mut self, pending: Option<usize>) -> Self {
        self.pending_changes = pending;
        self
    }

    pub fn with_push_confirmation<F>(mut self, confirm: F) -> Self
    where
        F: Fn(&str, &str) -> bool + 'a,
    {
        self.confirm_push = Some(Box::new(confirm));
        self
    }

    pub fn run(&self) -> RunReport {
        let mut steps = Vec::with_capacity(4);
        let mut halted: Option<SkipReason> = None;

        let (branch, branch_record) = self.resolve_branch();
        if self.settings.strict && matches!(branch_record.outcome, StepOutcome::Failed(_)) {
            halted = Some(SkipReason::Aborted);
        }
        steps.push(branch_record);

        let message = CommitMessage::build(
            self.clock.now(),
            &self.settings.timestamp_format,
            &self.settings.suffix,
        );
        debug!(%message, "Built commit message");

        if halted.is_none() && self.settings.skip_if_clean && self.pending_changes == Some(0) {
            info!("Working tree is clean, skipping add/commit/push");
            halted = Some(SkipReason::Clean);
        }

        steps.push(self.attempt(Step::Stage, &["add", "."], &mut halted));
        steps.push(self.attempt(
            Step::Commit,
            &["commit", "-m", message.as_str()],
            &mut halted,
        ));

        let push_target = push_args(&self.settings.remote, &branch);
        if halted.is_none() && !self.settings.dry_run {
            if let Some(confirm) = &self.confirm_push {
                if !confirm(&self.settings.remote, &branch) {
                    info!("Push declined");
                    halted = Some(SkipReason::Declined);
                }
            }
        }
        let push_argv: Vec<&str> = push_target.iter().map(String::as_str).collect();
        steps.push(self.attempt(Step::Push, &push_argv, &mut halted));

        RunReport {
            branch,
            message,
            steps,
        }
    }

    fn resolve_branch(&self) -> (String, StepRecord) {
        let (branch, outcome) = match self.git.query(&BRANCH_QUERY) {
            Ok(branch) if branch.is_empty() && self.settings.strict => (
                branch,
                StepOutcome::Failed("HEAD is not on a branch".to_string()),
            ),
            Ok(branch) => {
                if branch.is_empty() {
                    warn!("No current branch (detached HEAD?), push target will be empty");
                } else {
                    info!(%branch, "Resolved current branch");
                }
                (branch, StepOutcome::Succeeded)
            }
            Err(e) => {
                warn!("Branch query failed: {e}");
                (String::new(), StepOutcome::Failed(e.to_string()))
            }
        };

        let record = StepRecord {
            step: Step::ResolveBranch,
            args: to_owned_args(&BRANCH_QUERY),
            outcome,
        };
        (branch, record)
    }

    fn attempt(&self, step: Step, args: &[&str], halted: &mut Option<SkipReason>) -> StepRecord {
        let outcome = if let Some(reason) = *halted {
            StepOutcome::Skipped(reason)
        } else if self.settings.dry_run {
            info!("[DRY RUN] git {}", args.join(" "));
            StepOutcome::Skipped(SkipReason::DryRun)
        } else {
            match self.git.exec(args) {
                Ok(()) => {
                    info!("{} succeeded", step.label());
                    StepOutcome::Succeeded
                }
                Err(e) => {
                    if self.settings.strict {
                        *halted = Some(SkipReason::Aborted);
                    } else {
                        warn!("{} failed, continuing: {e}", step.label());
                    }
                    StepOutcome::Failed(e.to_string())
                }
            }
        };

        StepRecord {
            step,
            args: to_owned_args(args),
            outcome,
        }
    }
}

/// An empty branch drops out of the argument list, leaving `git push <remote>`
fn push_args(remote: &str, branch: &str) -> Vec<String> {
    let mut args = vec!["push".to_string(), remote.to_string()];
    if !branch.is_empty() {
        args.push(branch.to_string());
    }
    args
}

fn to_owned_args(args: &[&str]) -> Vec<String> {
    args.iter().map(|arg| arg.to_string()).collect()
}
