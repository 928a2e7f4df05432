use crate::message::CommitMessage;

/// The subprocess steps of a run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    ResolveBranch,
    Stage,
    Commit,
    Push,
}

impl Step {
    pub fn label(&self) -> &'static str {
        match self {
            Step::ResolveBranch => "resolve branch",
            Step::Stage => "stage",
            Step::Commit => "commit",
            Step::Push => "push",
        }
    }
}

/// Why a step was not attempted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// `--dry-run` was given
    DryRun,
    /// An earlier step failed under the strict policy
    Aborted,
    /// The push confirmation prompt was declined
    Declined,
    /// Nothing was pending and `skip_if_clean` is set
    Clean,
}

impl SkipReason {
    pub fn describe(&self) -> &'static str {
        match self {
            SkipReason::DryRun => "dry run",
            SkipReason::Aborted => "aborted after earlier failure",
            SkipReason::Declined => "declined",
            SkipReason::Clean => "nothing to commit",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Succeeded,
    Failed(String),
    Skipped(SkipReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub step: Step,
    pub args: Vec<String>,
    pub outcome: StepOutcome,
}

impl StepRecord {
    /// The invocation as it would be typed, e.g. `git push origin main`
    pub fn command_line(&self) -> String {
        let mut line = String::from("git");
        for arg in &self.args {
            line.push(' ');
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                line.push_str(&format!("\"{arg}\""));
            } else {
                line.push_str(arg);
            }
        }
        line
    }
}

/// Everything one run did, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub branch: String,
    pub message: CommitMessage,
    pub steps: Vec<StepRecord>,
}

impl RunReport {
    pub fn has_failures(&self) -> bool {
        self.steps
            .iter()
            .any(|record| matches!(record.outcome, StepOutcome::Failed(_)))
    }

    #[cfg(test)]
    pub fn step(&self, step: Step) -> Option<&StepRecord> {
        self.steps.iter().find(|record| record.step == step)
    }
}
