use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::warn;

use crate::automator::{Automator, RunReport};
use crate::cli::Cli;
use crate::clock::SystemClock;
use crate::config::{self, Settings};
use crate::git::{GitRepo, SystemGit};
use crate::tui::{
    prompt,
    report::{self, RepoSummary},
};

/// How the process should end once a run is over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    pub exit_code: i32,
    pub pause: bool,
}

impl RunOutcome {
    /// A run that got as far as the git steps. Failed steps only produce a
    /// non-zero code under the strict policy; otherwise the run is best-effort.
    fn completed(settings: &Settings, report: &RunReport) -> Self {
        Self {
            exit_code: exit_code(settings, report),
            pause: settings.pause,
        }
    }

    /// A fatal error before or while resolving settings. Only the flag is
    /// known for sure at that point.
    pub fn failed(cli: &Cli) -> Self {
        Self {
            exit_code: 1,
            pause: cli.pause,
        }
    }
}

/// Stage, commit and push the working tree, then report what happened.
pub fn handle_run(cli: &Cli) -> Result<RunOutcome> {
    let cwd = resolve_cwd(cli.cwd.as_deref())?;
    let settings = resolve_settings(cli, config::user_config_path().as_deref(), &cwd)?;
    tracing::debug!(?settings, cwd = %cwd.display(), "Resolved settings");

    let summary = inspect(&cwd);
    if let Some(summary) = &summary {
        report::display_summary(summary, settings.dry_run);
    }

    let git = SystemGit::new(&cwd);
    let clock = SystemClock;
    let mut automator = Automator::new(&git, &clock, &settings)
        .with_pending_changes(summary.as_ref().map(|s| s.pending_changes));
    if let Some(confirm) = push_confirmation(&settings) {
        automator = automator.with_push_confirmation(confirm);
    }

    let run_report = automator.run();
    report::display_report(&run_report);

    Ok(RunOutcome::completed(&settings, &run_report))
}

/// Config files under `cwd` (or `--config`) with the command line on top
fn resolve_settings(cli: &Cli, user_config: Option<&Path>, cwd: &Path) -> Result<Settings> {
    let layers = config::load_layers(user_config, cwd, cli.config.as_deref())?;
    Settings::resolve(layers.merge(cli.overrides()), cli.dry_run)
}

/// The interactive prompt to ask before pushing, when enabled
fn push_confirmation(settings: &Settings) -> Option<fn(&str, &str) -> bool> {
    if settings.confirm_push {
        Some(prompt::confirm_push)
    } else {
        None
    }
}

fn resolve_cwd(cwd: Option<&Path>) -> Result<PathBuf> {
    let cwd = match cwd {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    if !cwd.is_dir() {
        bail!("'{}' is not a directory", cwd.display());
    }

    Ok(cwd)
}

/// Best-effort look at the repository; git itself stays the authority
fn inspect(cwd: &Path) -> Option<RepoSummary> {
    let summary = GitRepo::discover(cwd).and_then(|repo| {
        tracing::debug!(root = %repo.path().display(), "Inspecting repository");
        Ok(RepoSummary {
            branch: repo.current_branch()?,
            pending_changes: repo.pending_changes()?,
        })
    });

    match summary {
        Ok(summary) => Some(summary),
        Err(e) => {
            warn!("Repository inspection failed: {e:#}");
            None
        }
    }
}

fn exit_code(settings: &Settings, report: &RunReport) -> i32 {
    if settings.strict && report.has_failures() {
        1
    } else {
        0
    }
}
