//! Release-execution seam
//!
//! Finishing the git-flow branch and picking the npm dist-tag are injected
//! strategies. The plan handed to them carries the chosen version and the
//! metadata of the policy that produced it.

pub mod dist_tag;
pub mod finish;

pub use dist_tag::{
    default_tag, validate_dist_tag, DistTagStrategy, PolicyDistTag, DEFAULT_NEXT_TAG,
    DEFAULT_RELEASE_TAG,
};
pub use finish::{FinishCommand, FinishStrategy, PreviewFinish};

use crate::domain::{BranchContext, Policy, TagPattern};
use semver::Version;

/// Everything the execution strategies need to know about a release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleasePlan {
    pub branch: BranchContext,
    pub version: Version,
    pub tag: String,
    /// dist-tag hints from the source policy, most preferred first
    pub npm_tags: Vec<String>,
    /// finish flag letters from the source policy
    pub finish_args: Option<String>,
    pub prerelease: bool,
}

impl ReleasePlan {
    /// Build a plan for `version`
    ///
    /// `policy` is the policy the version came from; a manually typed
    /// version has none and carries no metadata.
    pub fn new(
        branch: BranchContext,
        version: Version,
        tag_pattern: &TagPattern,
        policy: Option<&Policy>,
    ) -> Self {
        let (npm_tags, finish_args) = match policy {
            Some(policy) => (
                policy.metadata().npm_tags.clone(),
                policy.metadata().finish_args.clone(),
            ),
            None => (Vec::new(), None),
        };

        ReleasePlan {
            tag: tag_pattern.format(&version),
            prerelease: !version.pre.is_empty(),
            branch,
            version,
            npm_tags,
            finish_args,
        }
    }
}
