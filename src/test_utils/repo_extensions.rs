use std::path::Path;
use std::process::Command;

use anyhow::{Context, Error};
use git2::{Repository, Signature, Sort};

use crate::git::GitRepo;

/// Whether the `git` executable can be run on this machine. Prints a skip
/// notice naming the calling test when it cannot.
pub fn git_available() -> bool {
    let available = Command::new("git")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false);

    if !available {
        eprintln!("{}", skip_notice(std::thread::current().name()));
    }
    available
}

fn skip_notice(test_name: Option<&str>) -> String {
    format!(
        "SKIPPED {}: `git` executable not found on PATH",
        test_name.unwrap_or("<unnamed test>")
    )
}

/// Create a new temporary repository on an unborn `main` branch with user
/// config set up
pub fn create_test_repo() -> (assert_fs::TempDir, GitRepo) {
    let temp_dir = assert_fs::TempDir::new().unwrap();
    let repo = Repository::init(temp_dir.path()).unwrap();
    repo.set_head("refs/heads/main").unwrap();

    let mut config = repo.config().unwrap();
    config.set_str("user.name", "Test User").unwrap();
    config.set_str("user.email", "test@example.com").unwrap();
    config.set_bool("commit.gpgsign", false).unwrap();

    let repo = GitRepo::discover(temp_dir.path()).unwrap();
    (temp_dir, repo)
}

/// Create a new temporary bare repository to push into
pub fn create_test_bare_repo() -> (assert_fs::TempDir, GitRepo) {
    let temp_dir = assert_fs::TempDir::new().unwrap();
    Repository::init_bare(temp_dir.path()).unwrap();
    let repo = GitRepo::discover(temp_dir.path()).unwrap();
    (temp_dir, repo)
}

/// Test-only trait that adds fixture operations to GitRepo
pub trait RepoTestOperations {
    /// Write a file into the working tree (fluent)
    fn add_file(&self, filename: &str, content: &str) -> Result<&Self, Error>;

    /// Write, stage and commit a single file (fluent)
    fn add_file_and_commit(
        &self,
        filename: &str,
        content: &str,
        commit_message: &str,
    ) -> Result<&Self, Error>;

    /// Add a remote pointing to another local GitRepo
    fn add_local_remote(&self, name: &str, other_repo: &GitRepo) -> Result<(), Error>;

    /// Commit messages reachable from HEAD, newest first, trailing newline trimmed
    fn commit_messages(&self) -> Vec<String>;

    /// Commit id a local branch points at
    fn branch_target(&self, branch: &str) -> Option<String>;
}

impl RepoTestOperations for GitRepo {
    fn add_file(&self, filename: &str, content: &str) -> Result<&Self, Error> {
        let file_path = self.path().join(filename);
        std::fs::write(file_path, content)
            .context(format!("Failed to write file '{filename}'"))?;
        Ok(self)
    }

    fn add_file_and_commit(
        &self,
        filename: &str,
        content: &str,
        commit_message: &str,
    ) -> Result<&Self, Error> {
        self.add_file(filename, content)?;

        let repo = self.repo();
        let mut index = repo.index().context("Failed to get repository index")?;
        index
            .add_path(Path::new(filename))
            .context("Failed to add file to index")?;
        index.write().context("Failed to write index")?;
        let tree_id = index.write_tree().context("Failed to write tree")?;
        let tree = repo.find_tree(tree_id).context("Failed to find tree")?;

        let config = repo.config().context("Failed to get repository config")?;
        let signature = Signature::now(
            &config.get_string("user.name")?,
            &config.get_string("user.email")?,
        )?;

        let parent = match repo.head() {
            Ok(head) => Some(head.peel_to_commit().context("Failed to find parent commit")?),
            Err(_) => None,
        };
        let parents: Vec<_> = parent.iter().collect();

        repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            commit_message,
            &tree,
            &parents,
        )
        .context("Failed to create commit")?;

        Ok(self)
    }

    fn add_local_remote(&self, name: &str, other_repo: &GitRepo) -> Result<(), Error> {
        let remote_path = other_repo
            .path()
            .to_str()
            .context("Failed to convert remote repository path to string")?;

        self.repo()
            .remote(name, remote_path)
            .context(format!("Failed to add remote '{name}'"))?;
        Ok(())
    }

    fn commit_messages(&self) -> Vec<String> {
        let repo = self.repo();
        let mut revwalk = repo.revwalk().unwrap();
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME).unwrap();
        if revwalk.push_head().is_err() {
            return Vec::new();
        }

        revwalk
            .map(|oid| {
                let commit = repo.find_commit(oid.unwrap()).unwrap();
                commit.message().unwrap_or("").trim_end().to_string()
            })
            .collect()
    }

    fn branch_target(&self, branch: &str) -> Option<String> {
        self.repo()
            .find_reference(&format!("refs/heads/{branch}"))
            .ok()
            .and_then(|reference| reference.target())
            .map(|oid| oid.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_notice_names_the_test() {
        assert_eq!(
            skip_notice(Some("automator::end_to_end::clean_repository_still_pushes")),
            "SKIPPED automator::end_to_end::clean_repository_still_pushes: `git` executable not found on PATH"
        );
        assert!(skip_notice(None).starts_with("SKIPPED <unnamed test>"));
    }
}
