use std::fmt;

/// Non-fatal issues found while resolving or selecting a version.
/// These are reported to the user; the release can still proceed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionWarning {
    /// No configured pattern matches the branch
    NoMatchingPolicy { branch: String },
    /// The matched pattern has no policies
    EmptyPolicyList { pattern: String },
    /// A `%h` policy was skipped because the commit hash could not be read
    CommitHashUnavailable {
        pattern: String,
        template: String,
        reason: String,
    },
    /// git-flow has not been initialised in the repository
    GitflowNotInitialized,
    /// No version tags exist yet
    NoReleaseTags { fallback: String },
    /// A selected version does not sort above the latest version
    VersionNotIncreasing { version: String, latest: String },
}

impl fmt::Display for ResolutionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionWarning::NoMatchingPolicy { branch } => {
                write!(f, "No corresponding release policy found for branch '{}'", branch)
            }
            ResolutionWarning::EmptyPolicyList { pattern } => {
                write!(f, "Pattern '{}' has no release policies", pattern)
            }
            ResolutionWarning::CommitHashUnavailable {
                pattern,
                template,
                reason,
            } => write!(
                f,
                "Skipped prerelease '{}' of '{}': commit hash unavailable ({})",
                template, pattern, reason
            ),
            ResolutionWarning::GitflowNotInitialized => {
                write!(f, "git-flow is not initialised here, run `git flow init`")
            }
            ResolutionWarning::NoReleaseTags { fallback } => {
                write!(f, "No version tags found, starting from {}", fallback)
            }
            ResolutionWarning::VersionNotIncreasing { version, latest } => write!(
                f,
                "Version {} is not greater than the latest version {}",
                version, latest
            ),
        }
    }
}
