use std::path::{Path, PathBuf};

use anyhow::{Context, Error};
use git2::{Repository, Status, StatusOptions};

/// Read-only view of a local repository, used to summarize what a run is
/// about to do. All mutations go through the `git` executable instead.
pub struct GitRepo {
    path: PathBuf,
    repo: Repository,
}

impl GitRepo {
    /// Find the repository containing `path`, searching parent directories
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let repo = Repository::discover(path.as_ref()).context(format!(
            "No git repository found at or above '{}'",
            path.as_ref().display()
        ))?;

        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();

        Ok(Self { path, repo })
    }

    /// Root of the working tree (the git dir for bare repositories)
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_bare(&self) -> bool {
        self.repo.is_bare()
    }

    /// Name of the checked-out branch, `None` when HEAD is detached.
    ///
    /// An unborn branch (no commits yet) still reports its name.
    pub fn current_branch(&self) -> Result<Option<String>, Error> {
        let head = self
            .repo
            .find_reference("HEAD")
            .context("Failed to find HEAD reference")?;

        Ok(head
            .symbolic_target()
            .and_then(|target| target.strip_prefix("refs/heads/"))
            .map(str::to_string))
    }

    /// Number of paths that `git add .` would pick up: modified, deleted and
    /// untracked files, ignoring anything matched by `.gitignore`.
    pub fn pending_changes(&self) -> Result<usize, Error> {
        if self.is_bare() {
            return Ok(0);
        }

        let mut options = StatusOptions::new();
        options
            .include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);

        let statuses = self
            .repo
            .statuses(Some(&mut options))
            .context("Failed to read repository status")?;

        Ok(statuses
            .iter()
            .filter(|entry| entry.status() != Status::CURRENT)
            .count())
    }

    /// Get access to the internal git2 Repository
    #[cfg(test)]
    pub(crate) fn repo(&self) -> &Repository {
        &self.repo
    }
}
