//! Git access abstraction layer
//!
//! This module provides a trait-based abstraction over the read-only git
//! queries gitflow-release needs: the current branch, the head commit, the
//! tag history and whether git-flow is set up.
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A mock implementation for testing
//!
//! Nothing here writes to the repository. Tagging, pushing and finishing
//! branches belong to the release-execution layer.

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::CommitHashProvider;
use crate::error::Result;

/// Common git query trait
pub trait Repository {
    /// Name of the checked-out branch
    ///
    /// # Returns
    /// * `Ok(String)` - Short branch name (e.g., "feature/login")
    /// * `Err` - If HEAD is detached or unborn, or on a git error
    fn current_branch(&self) -> Result<String>;

    /// Full hash of the commit HEAD points to
    fn head_commit_hash(&self) -> Result<String>;

    /// All tag names in the repository
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Whether `git flow init` has been run
    ///
    /// git-flow records its branch names under `gitflow.branch.*` in the
    /// repository config.
    fn is_gitflow_initialized(&self) -> Result<bool>;
}

/// Commit hash provider backed by a repository's HEAD
pub struct HeadCommit<'a, R: Repository + ?Sized> {
    repo: &'a R,
}

impl<'a, R: Repository + ?Sized> HeadCommit<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        HeadCommit { repo }
    }
}

impl<R: Repository + ?Sized> CommitHashProvider for HeadCommit<'_, R> {
    fn commit_hash(&self) -> Result<String> {
        self.repo.head_commit_hash()
    }
}
