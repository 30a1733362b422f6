//! Choosing a version among the computed candidates

use crate::domain::version::{is_increment, parse_version};
use crate::engine::VersionCandidate;
use crate::error::{ReleaseError, Result};
use crate::warning::ResolutionWarning;
use semver::Version;

/// What the operator picked
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Index into the candidate list
    Candidate(usize),
    /// A typed version
    Manual(Version),
    Cancelled,
}

/// Presents candidates and returns the operator's choice
pub trait VersionSelector {
    fn select(&self, candidates: &[VersionCandidate], latest: &Version) -> Result<Selection>;
}

/// Non-interactive selector: the first computed candidate wins
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstCandidateSelector;

impl VersionSelector for FirstCandidateSelector {
    fn select(&self, candidates: &[VersionCandidate], _latest: &Version) -> Result<Selection> {
        candidates
            .iter()
            .position(|c| !c.is_manual())
            .map(Selection::Candidate)
            .ok_or_else(|| ReleaseError::selection("no computed version to pick without prompting"))
    }
}

/// Validate a typed version
///
/// Returns the parsed version and a warning when it does not sort above
/// `latest`. The operator may still go ahead with it.
pub fn parse_manual_version(
    input: &str,
    latest: &Version,
) -> Result<(Version, Option<ResolutionWarning>)> {
    let version = parse_version(input).map_err(|e| {
        ReleaseError::version(format!(
            "'{}' does not follow the semver standard: {}",
            input.trim(),
            e
        ))
    })?;

    let warning = if is_increment(&version, latest) {
        None
    } else {
        Some(ResolutionWarning::VersionNotIncreasing {
            version: version.to_string(),
            latest: latest.to_string(),
        })
    };

    Ok((version, warning))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Policy;

    fn latest() -> Version {
        Version::parse("1.2.0").unwrap()
    }

    #[test]
    fn test_first_candidate_selector() {
        let candidates = vec![
            VersionCandidate::from_policy(&Policy::release(), Version::new(1, 2, 1)),
            VersionCandidate::manual(),
        ];
        assert_eq!(
            FirstCandidateSelector.select(&candidates, &latest()).unwrap(),
            Selection::Candidate(0)
        );
    }

    #[test]
    fn test_first_candidate_selector_only_sentinel() {
        let candidates = vec![VersionCandidate::manual()];
        assert!(FirstCandidateSelector.select(&candidates, &latest()).is_err());
        assert!(FirstCandidateSelector.select(&[], &latest()).is_err());
    }

    #[test]
    fn test_manual_version_valid() {
        let (version, warning) = parse_manual_version("1.3.0-beta.1", &latest()).unwrap();
        assert_eq!(version.to_string(), "1.3.0-beta.1");
        assert!(warning.is_none());
    }

    #[test]
    fn test_manual_version_with_prefix() {
        let (version, _) = parse_manual_version(" v2.0.0 ", &latest()).unwrap();
        assert_eq!(version, Version::new(2, 0, 0));
    }

    #[test]
    fn test_manual_version_not_increasing() {
        let (_, warning) = parse_manual_version("1.1.9", &latest()).unwrap();
        assert!(matches!(
            warning,
            Some(ResolutionWarning::VersionNotIncreasing { .. })
        ));
    }

    #[test]
    fn test_manual_version_invalid() {
        let err = parse_manual_version("1.3", &latest()).unwrap_err();
        assert!(err.to_string().contains("semver"));
    }
}
