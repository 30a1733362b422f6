use crate::domain::Policy;
use crate::warning::ResolutionWarning;
use semver::Version;

/// Label of the manual-entry sentinel
pub const MANUAL_LABEL: &str = "Other, please specify...";

/// A proposed next version
///
/// The manual-entry sentinel has neither version nor policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionCandidate {
    pub label: String,
    pub version: Option<Version>,
    pub source_policy: Option<Policy>,
}

impl VersionCandidate {
    /// Candidate computed from a policy
    pub fn from_policy(policy: &Policy, version: Version) -> Self {
        VersionCandidate {
            label: format!("{} ({})", policy.kind(), version),
            version: Some(version),
            source_policy: Some(policy.clone()),
        }
    }

    /// "Type a version" entry, always last in a list
    pub fn manual() -> Self {
        VersionCandidate {
            label: MANUAL_LABEL.to_string(),
            version: None,
            source_policy: None,
        }
    }

    pub fn is_manual(&self) -> bool {
        self.version.is_none()
    }
}

/// Outcome of one resolution pass
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resolution {
    /// Pattern that matched the branch, if any
    pub matched_pattern: Option<String>,
    /// Candidates in policy order, sentinel last; empty when nothing matched
    pub candidates: Vec<VersionCandidate>,
    pub warnings: Vec<ResolutionWarning>,
}

impl Resolution {
    /// Candidates other than the manual sentinel
    pub fn computed(&self) -> impl Iterator<Item = &VersionCandidate> {
        self.candidates.iter().filter(|c| !c.is_manual())
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}
