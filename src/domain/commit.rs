//! Commit hash lookup for `%h` prerelease templates

use crate::error::{ReleaseError, Result};
use std::cell::OnceCell;

/// Number of characters kept from a commit hash
pub const SHORT_HASH_LEN: usize = 7;

/// Source of the current commit hash
///
/// Usually backed by a version-control query, so implementations may be
/// slow or fail. The engine calls it lazily and at most once per
/// resolution pass through [`MemoizedHash`].
pub trait CommitHashProvider {
    /// Full or abbreviated hash of the commit being released
    fn commit_hash(&self) -> Result<String>;
}

impl<F> CommitHashProvider for F
where
    F: Fn() -> Result<String>,
{
    fn commit_hash(&self) -> Result<String> {
        self()
    }
}

/// Provider returning a fixed hash
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedHash(pub String);

impl FixedHash {
    pub fn new(hash: impl Into<String>) -> Self {
        FixedHash(hash.into())
    }
}

impl CommitHashProvider for FixedHash {
    fn commit_hash(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// Provider used when no repository is available
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCommitHash;

impl CommitHashProvider for NoCommitHash {
    fn commit_hash(&self) -> Result<String> {
        Err(ReleaseError::commit_hash("no repository available"))
    }
}

/// Truncate a hash to its short form
pub fn short_hash(hash: &str) -> String {
    hash.trim().chars().take(SHORT_HASH_LEN).collect()
}

/// Per-resolution cache around a [`CommitHashProvider`]
///
/// The first call reaches the provider; its outcome, success or failure, is
/// reused for the rest of the pass.
pub struct MemoizedHash<'a> {
    provider: &'a dyn CommitHashProvider,
    cached: OnceCell<std::result::Result<String, String>>,
}

impl<'a> MemoizedHash<'a> {
    pub fn new(provider: &'a dyn CommitHashProvider) -> Self {
        MemoizedHash {
            provider,
            cached: OnceCell::new(),
        }
    }

    /// Short commit hash, looked up on first use
    pub fn get(&self) -> Result<String> {
        let cached = self.cached.get_or_init(|| {
            match self.provider.commit_hash() {
                Ok(hash) => {
                    let short = short_hash(&hash);
                    if short.is_empty() {
                        Err("provider returned an empty hash".to_string())
                    } else {
                        Ok(short)
                    }
                }
                Err(ReleaseError::CommitHashUnavailable(reason)) => Err(reason),
                Err(e) => Err(e.to_string()),
            }
        });

        cached.clone().map_err(ReleaseError::commit_hash)
    }

    /// Whether the provider has been called
    pub fn is_resolved(&self) -> bool {
        self.cached.get().is_some()
    }
}
