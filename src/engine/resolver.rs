use crate::domain::template::{self, TemplateContext};
use crate::domain::{BaseVersion, CommitHashProvider, MemoizedHash, Policy, PolicySet, ResolvedMatch};
use crate::engine::candidate::{Resolution, VersionCandidate};
use crate::error::{ReleaseError, Result};
use crate::warning::ResolutionWarning;
use semver::Version;
use tracing::{debug, warn};

/// Computes next-version candidates for a branch from a policy set
pub struct CandidateEngine {
    policies: PolicySet,
}

impl CandidateEngine {
    /// Create a new engine over a policy set
    pub fn new(policies: PolicySet) -> Self {
        CandidateEngine { policies }
    }

    pub fn policies(&self) -> &PolicySet {
        &self.policies
    }

    /// Resolve the candidates for `branch` starting from `latest_version`
    ///
    /// Candidates follow the declaration order of the matched policies and
    /// end with the manual-entry sentinel. When no pattern matches, the list
    /// is empty and a warning is returned instead.
    ///
    /// # Errors
    /// * `InvalidBaseVersion` - `latest_version` is not a semantic version
    /// * `MalformedPolicy` - a matched prerelease policy has an empty template
    /// * `InvalidPrerelease` - a template expands to an invalid identifier
    ///
    /// A `%h` policy whose commit hash cannot be read is skipped with a
    /// warning; the other policies are still resolved.
    pub fn resolve(
        &self,
        branch: &str,
        latest_version: &str,
        commit_hash: &dyn CommitHashProvider,
    ) -> Result<Resolution> {
        let base = BaseVersion::parse(latest_version)?;

        let Some(matched) = self.policies.resolve(branch) else {
            warn!(branch, "no release policy matches branch");
            return Ok(Resolution {
                warnings: vec![ResolutionWarning::NoMatchingPolicy {
                    branch: branch.to_string(),
                }],
                ..Resolution::default()
            });
        };

        debug!(
            branch,
            pattern = matched.matched_pattern,
            policies = matched.policies.len(),
            "matched release policy"
        );

        let mut resolution = Resolution {
            matched_pattern: Some(matched.matched_pattern.to_string()),
            ..Resolution::default()
        };

        if matched.policies.is_empty() {
            warn!(pattern = matched.matched_pattern, "matched pattern has no policies");
            resolution.warnings.push(ResolutionWarning::EmptyPolicyList {
                pattern: matched.matched_pattern.to_string(),
            });
            return Ok(resolution);
        }

        let hash = MemoizedHash::new(commit_hash);
        let context = TemplateContext {
            branch_remainder: matched.branch_remainder(branch),
            commit_hash: &hash,
        };

        for policy in matched.policies {
            match next_version(&base, policy, &matched, &context) {
                Ok(version) => {
                    debug!(policy = %policy, %version, "computed candidate");
                    resolution
                        .candidates
                        .push(VersionCandidate::from_policy(policy, version));
                }
                Err(ReleaseError::CommitHashUnavailable(reason)) => {
                    let template = match policy {
                        Policy::Prerelease { template, .. } => template.clone(),
                        Policy::Release { .. } => String::new(),
                    };
                    warn!(pattern = matched.matched_pattern, %template, %reason, "skipping policy");
                    resolution
                        .warnings
                        .push(ResolutionWarning::CommitHashUnavailable {
                            pattern: matched.matched_pattern.to_string(),
                            template,
                            reason,
                        });
                }
                Err(e) => return Err(e),
            }
        }

        resolution.candidates.push(VersionCandidate::manual());
        Ok(resolution)
    }
}

fn next_version(
    base: &BaseVersion,
    policy: &Policy,
    matched: &ResolvedMatch<'_>,
    context: &TemplateContext<'_>,
) -> Result<Version> {
    match policy {
        Policy::Release { .. } => base.next_release(),
        Policy::Prerelease { template, .. } => {
            if template.trim().is_empty() {
                return Err(ReleaseError::malformed(
                    matched.matched_pattern,
                    "prerelease identifier is empty",
                ));
            }
            let expanded = template::expand(template, context)?;
            base.next_prerelease(&expanded)
        }
    }
}

/// Resolve candidates without keeping an engine around
pub fn resolve_candidates(
    branch: &str,
    latest_version: &str,
    policies: &PolicySet,
    commit_hash: &dyn CommitHashProvider,
) -> Result<Resolution> {
    CandidateEngine::new(policies.clone()).resolve(branch, latest_version, commit_hash)
}
