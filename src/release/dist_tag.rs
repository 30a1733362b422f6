use crate::error::{ReleaseError, Result};
use crate::release::ReleasePlan;
use semver::VersionReq;

/// Dist-tag for final versions when the policy names none
pub const DEFAULT_RELEASE_TAG: &str = "latest";

/// Dist-tag for prerelease versions when the policy names none
pub const DEFAULT_NEXT_TAG: &str = "next";

/// Picks the npm distribution tag for a release
pub trait DistTagStrategy {
    /// `Ok(None)` means the release is published without choosing a tag
    fn select(&self, plan: &ReleasePlan) -> Result<Option<String>>;
}

/// Non-interactive strategy: first policy tag, else the default for the
/// kind of version
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyDistTag;

impl DistTagStrategy for PolicyDistTag {
    fn select(&self, plan: &ReleasePlan) -> Result<Option<String>> {
        let tag = match plan.npm_tags.first() {
            Some(tag) => tag.clone(),
            None => default_tag(plan).to_string(),
        };
        validate_dist_tag(&tag)?;
        Ok(Some(tag))
    }
}

/// Default tag for a plan when the policy names none
pub fn default_tag(plan: &ReleasePlan) -> &'static str {
    if plan.prerelease {
        DEFAULT_NEXT_TAG
    } else {
        DEFAULT_RELEASE_TAG
    }
}

/// Reject dist-tags npm would read as a version range
pub fn validate_dist_tag(tag: &str) -> Result<()> {
    let tag = tag.trim();
    if tag.is_empty() {
        return Err(ReleaseError::selection("dist-tag must not be empty"));
    }
    if VersionReq::parse(tag).is_ok() {
        return Err(ReleaseError::selection(format!(
            "dist-tag '{}' can be read as a semver range",
            tag
        )));
    }
    Ok(())
}
