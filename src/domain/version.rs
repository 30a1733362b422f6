use crate::domain::prerelease::{PrereleaseSeries, SeriesPosition};
use crate::domain::template::ExpandedIdentifier;
use crate::error::{ReleaseError, Result};
use semver::{BuildMetadata, Version};
use std::fmt;

/// The latest released version that candidates are computed from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseVersion {
    version: Version,
}

impl BaseVersion {
    /// Wrap an already parsed version
    pub fn new(version: Version) -> Self {
        BaseVersion { version }
    }

    /// Parse a version string, accepting a tag-style `v` prefix
    pub fn parse(input: &str) -> Result<Self> {
        parse_version(input)
            .map(BaseVersion::new)
            .map_err(|e| ReleaseError::InvalidBaseVersion {
                input: input.to_string(),
                reason: e.to_string(),
            })
    }

    pub fn as_semver(&self) -> &Version {
        &self.version
    }

    pub fn is_prerelease(&self) -> bool {
        !self.version.pre.is_empty()
    }

    /// Next final release
    ///
    /// A prerelease is promoted to its release (`2.0.0-rc.1` -> `2.0.0`),
    /// a final version gets a patch bump (`1.2.3` -> `1.2.4`).
    pub fn next_release(&self) -> Result<Version> {
        let patch = if self.is_prerelease() {
            self.version.patch
        } else {
            self.next_patch()?
        };
        Ok(Version::new(self.version.major, self.version.minor, patch))
    }

    /// Next prerelease in the series named by `expanded`
    ///
    /// - same series, counted: bump the counter (`1.2.0-alpha.3` -> `1.2.0-alpha.4`)
    /// - other or no series: next patch-level base with `-<identifier>.0`
    /// - hash-tagged: always a fresh `-<identifier>` without counter
    ///
    /// The result always sorts above the base version.
    pub fn next_prerelease(&self, expanded: &ExpandedIdentifier) -> Result<Version> {
        let identifier = expanded.identifier.as_str();

        if !expanded.hash_tagged {
            match SeriesPosition::of(&self.version.pre, identifier) {
                SeriesPosition::Counter(n) => {
                    let series = PrereleaseSeries::after(identifier, n).ok_or_else(|| {
                        ReleaseError::version(format!(
                            "prerelease counter overflow in '{}'",
                            self.version
                        ))
                    })?;
                    return self.with_prerelease(self.version.patch, &series);
                }
                SeriesPosition::Bare => {
                    return self.with_prerelease(self.version.patch, &PrereleaseSeries::first(identifier));
                }
                SeriesPosition::Unrelated => {}
            }
        }

        let series = if expanded.hash_tagged {
            PrereleaseSeries::uncounted(identifier)
        } else {
            PrereleaseSeries::first(identifier)
        };

        let patch = if self.is_prerelease() {
            self.version.patch
        } else {
            self.next_patch()?
        };

        let candidate = self.with_prerelease(patch, &series)?;
        if candidate > self.without_build() {
            Ok(candidate)
        } else {
            self.with_prerelease(self.next_patch()?, &series)
        }
    }

    fn next_patch(&self) -> Result<u64> {
        self.version.patch.checked_add(1).ok_or_else(|| {
            ReleaseError::version(format!("patch overflow in '{}'", self.version))
        })
    }

    fn with_prerelease(&self, patch: u64, series: &PrereleaseSeries) -> Result<Version> {
        let pre = series
            .to_prerelease()
            .map_err(|e| ReleaseError::version(format!("invalid prerelease '{}': {}", series, e)))?;
        Ok(Version {
            major: self.version.major,
            minor: self.version.minor,
            patch,
            pre,
            build: BuildMetadata::EMPTY,
        })
    }

    fn without_build(&self) -> Version {
        Version {
            build: BuildMetadata::EMPTY,
            ..self.version.clone()
        }
    }
}

impl fmt::Display for BaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.version)
    }
}

/// Parse a version string (e.g., "v1.2.3" -> 1.2.3)
pub fn parse_version(input: &str) -> std::result::Result<Version, semver::Error> {
    let trimmed = input.trim();
    let clean = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);
    Version::parse(clean)
}

/// Whether `version` sorts above `latest`, build metadata ignored
pub fn is_increment(version: &Version, latest: &Version) -> bool {
    let strip = |v: &Version| Version {
        build: BuildMetadata::EMPTY,
        ..v.clone()
    };
    strip(version) > strip(latest)
}
