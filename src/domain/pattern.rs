//! Glob-style branch name patterns
//!
//! A pattern is literal text with zero or more `*` wildcards. Each `*`
//! matches any run of characters (including none). There are no other
//! metacharacters: `feature/*` matches `feature/login` and `feature/`,
//! `develop` only matches `develop`.

use crate::error::{ReleaseError, Result};
use regex::Regex;
use std::fmt;

/// Wildcard character accepted in branch patterns
pub const WILDCARD: char = '*';

/// A compiled branch pattern
#[derive(Debug, Clone)]
pub struct BranchPattern {
    raw: String,
    prefix_len: usize,
    regex: Option<Regex>,
}

/// Successful match of a branch against a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternMatch {
    /// Bytes of the branch name consumed by the literal text before the first wildcard
    pub prefix_len: usize,
}

impl BranchPattern {
    /// Compile a pattern
    ///
    /// Literal segments are regex-escaped and wildcards become `.*`, so the
    /// match is anchored at both ends and left-to-right like a shell glob.
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let raw = pattern.into();
        if raw.is_empty() {
            return Err(ReleaseError::Pattern {
                pattern: raw,
                reason: "pattern is empty".to_string(),
            });
        }

        let prefix_len = raw.find(WILDCARD).unwrap_or(raw.len());

        let regex = if raw.contains(WILDCARD) {
            let body = raw
                .split(WILDCARD)
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join("(?s:.*)");
            let re = Regex::new(&format!("^{}$", body)).map_err(|e| ReleaseError::Pattern {
                pattern: raw.clone(),
                reason: e.to_string(),
            })?;
            Some(re)
        } else {
            None
        };

        Ok(BranchPattern {
            raw,
            prefix_len,
            regex,
        })
    }

    /// The pattern as written in configuration
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether the pattern contains a wildcard
    pub fn is_glob(&self) -> bool {
        self.regex.is_some()
    }

    /// Test a branch name against this pattern
    ///
    /// Exact patterns match by string equality and consume the whole branch
    /// name, leaving an empty remainder.
    pub fn matches(&self, branch: &str) -> Option<PatternMatch> {
        match &self.regex {
            None if branch == self.raw => Some(PatternMatch {
                prefix_len: branch.len(),
            }),
            None => None,
            Some(re) if re.is_match(branch) => Some(PatternMatch {
                prefix_len: self.prefix_len,
            }),
            Some(_) => None,
        }
    }
}

impl fmt::Display for BranchPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl PartialEq for BranchPattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for BranchPattern {}
