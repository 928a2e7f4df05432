//! Git access
//!
//! - `runner`: the `git` executable as a subprocess (branch query, add,
//!   commit, push)
//! - `repository`: read-only inspection through libgit2 (current branch,
//!   pending changes)

pub mod repository;
pub mod runner;

pub use repository::GitRepo;
pub use runner::{GitError, GitRunner, SystemGit};
