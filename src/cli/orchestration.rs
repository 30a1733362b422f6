//! Main workflow orchestration logic
//!
//! Resolves the branch and latest version, computes candidates, lets the
//! injected selector choose and hands the resulting plan to the release
//! strategies. Keeps CLI argument parsing out of the business logic.

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::domain::version::is_increment;
use crate::domain::{BaseVersion, BranchContext, PolicySet, TagPattern};
use crate::engine::{CandidateEngine, VersionCandidate};
use crate::error::{ReleaseError, Result};
use crate::git::{HeadCommit, Repository};
use crate::release::{DistTagStrategy, FinishCommand, FinishStrategy, ReleasePlan};
use crate::selection::{Selection, VersionSelector};
use crate::warning::ResolutionWarning;

/// Version assumed when the repository has no version tags
pub const INITIAL_VERSION: &str = "0.0.0";

/// Arguments for the release workflow
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic.
/// This decoupling allows the workflow to be called programmatically
/// without depending on clap.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReleaseWorkflowArgs {
    /// Branch to release instead of the checked-out one
    pub branch: Option<String>,

    /// Latest released version instead of the highest version tag
    pub latest_version: Option<String>,

    /// Non-interactive mode
    pub ci: bool,
}

impl ReleaseWorkflowArgs {
    /// CI mode from the flag or the `[behavior]` section
    pub fn is_ci(&self, config: &Config) -> bool {
        self.ci || config.behavior.ci
    }
}

/// Result of a completed release workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// The branch the release was computed for
    pub branch: String,

    /// Pattern that matched the branch
    pub matched_pattern: Option<String>,

    pub version: semver::Version,

    /// Tag name for the version
    pub tag: String,

    pub dist_tag: Option<String>,

    /// git-flow finish command, for branches that have one
    pub finish_command: Option<FinishCommand>,

    /// What the finish strategy reported
    pub finish_outcome: Option<String>,

    pub warnings: Vec<ResolutionWarning>,
}

/// Main release workflow
///
/// 1. Determine the branch and the latest version
/// 2. Resolve candidates from the configured policy set
/// 3. Let `selector` pick a version
/// 4. Pick the dist-tag and finish the branch through the strategies
///
/// # Returns
///
/// * `Ok(Some(result))` - A version was chosen
/// * `Ok(None)` - The operator cancelled
/// * `Err` - Malformed configuration, an invalid base version, or no
///   policy for the branch in CI mode
pub fn run_release_workflow<R: Repository + ?Sized>(
    args: &ReleaseWorkflowArgs,
    config: &Config,
    repo: &R,
    selector: &dyn VersionSelector,
    finish: &dyn FinishStrategy,
    dist_tag: &dyn DistTagStrategy,
) -> Result<Option<WorkflowResult>> {
    let mut warnings = Vec::new();

    if !repo.is_gitflow_initialized()? {
        warn!("git-flow is not initialised");
        warnings.push(ResolutionWarning::GitflowNotInitialized);
    }

    let branch = match &args.branch {
        Some(branch) => branch.clone(),
        None => repo.current_branch()?,
    };

    let latest = match &args.latest_version {
        Some(version) => version.clone(),
        None => latest_tagged_version(config, repo, &mut warnings)?,
    };
    let latest_version = BaseVersion::parse(&latest)?.as_semver().clone();

    let engine = CandidateEngine::new(PolicySet::from_config(&config.policyset)?);
    let resolution = engine.resolve(&branch, &latest, &HeadCommit::new(repo))?;
    warnings.extend(resolution.warnings.iter().cloned());

    let candidates = if resolution.is_empty() {
        if args.is_ci(config) {
            return Err(ReleaseError::NoMatchingPolicy { branch });
        }
        vec![VersionCandidate::manual()]
    } else {
        resolution.candidates.clone()
    };

    let (version, policy) = match selector.select(&candidates, &latest_version)? {
        Selection::Candidate(index) => {
            let candidate = candidates
                .get(index)
                .ok_or_else(|| ReleaseError::selection(format!("no candidate #{}", index + 1)))?;
            let version = candidate
                .version
                .clone()
                .ok_or_else(|| ReleaseError::selection("the manual entry has no version"))?;
            (version, candidate.source_policy.clone())
        }
        Selection::Manual(version) => {
            if !is_increment(&version, &latest_version) {
                warnings.push(ResolutionWarning::VersionNotIncreasing {
                    version: version.to_string(),
                    latest: latest_version.to_string(),
                });
            }
            (version, None)
        }
        Selection::Cancelled => {
            info!("release cancelled by operator");
            return Ok(None);
        }
    };
    debug!(%version, "version selected");

    let plan = ReleasePlan::new(
        BranchContext::classify(&branch, &config.gitflow),
        version,
        &TagPattern::new(&config.gitflow.version_tag),
        policy.as_ref(),
    );

    let dist_tag = dist_tag.select(&plan)?;

    let finish_command = FinishCommand::for_plan(&plan, &config.command_args);
    let finish_outcome = match &finish_command {
        Some(command) => Some(finish.finish(&plan, command)?),
        None => None,
    };

    Ok(Some(WorkflowResult {
        branch,
        matched_pattern: resolution.matched_pattern,
        version: plan.version,
        tag: plan.tag,
        dist_tag,
        finish_command,
        finish_outcome,
        warnings,
    }))
}

/// Highest version tag, or the initial version when there is none
fn latest_tagged_version<R: Repository + ?Sized>(
    config: &Config,
    repo: &R,
    warnings: &mut Vec<ResolutionWarning>,
) -> Result<String> {
    let tags = repo.list_tags()?;
    let pattern = TagPattern::new(&config.gitflow.version_tag);

    match pattern.latest_version(&tags) {
        Some(version) => {
            debug!(%version, "latest version from tags");
            Ok(version.to_string())
        }
        None => {
            warnings.push(ResolutionWarning::NoReleaseTags {
                fallback: INITIAL_VERSION.to_string(),
            });
            Ok(INITIAL_VERSION.to_string())
        }
    }
}
