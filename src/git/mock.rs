use crate::error::{ReleaseError, Result};
use crate::git::Repository;

/// Mock repository for testing without actual git operations
#[derive(Debug, Clone, Default)]
pub struct MockRepository {
    branch: Option<String>,
    head_hash: Option<String>,
    tags: Vec<String>,
    gitflow_initialized: bool,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Check out `branch` with HEAD at `hash`
    pub fn with_head(mut self, branch: impl Into<String>, hash: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self.head_hash = Some(hash.into());
        self
    }

    /// Check out `branch` on an unborn HEAD (no commits yet)
    pub fn with_unborn_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self.head_hash = None;
        self
    }

    /// Add a tag
    pub fn with_tag(mut self, name: impl Into<String>) -> Self {
        self.tags.push(name.into());
        self
    }

    /// Mark git-flow as initialised
    pub fn with_gitflow(mut self) -> Self {
        self.gitflow_initialized = true;
        self
    }
}

impl Repository for MockRepository {
    fn current_branch(&self) -> Result<String> {
        self.branch
            .clone()
            .ok_or_else(|| ReleaseError::config("HEAD is detached"))
    }

    fn head_commit_hash(&self) -> Result<String> {
        self.head_hash
            .clone()
            .ok_or_else(|| ReleaseError::commit_hash("HEAD has no commits"))
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        Ok(self.tags.clone())
    }

    fn is_gitflow_initialized(&self) -> Result<bool> {
        Ok(self.gitflow_initialized)
    }
}
