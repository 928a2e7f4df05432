#[cfg(test)]
pub mod mock_git;

#[cfg(test)]
pub mod repo_extensions;

#[cfg(test)]
pub use mock_git::{FixedClock, RecordingGit};

#[cfg(test)]
pub use repo_extensions::{
    create_test_bare_repo, create_test_repo, git_available, RepoTestOperations,
};
