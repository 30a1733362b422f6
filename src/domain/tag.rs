use crate::domain::version::parse_version;
use semver::Version;

/// Tag naming pattern: a fixed prefix followed by the version
///
/// Mirrors git-flow's `versiontag` setting (`v` gives `v1.2.3`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagPattern {
    pub prefix: String,
}

impl TagPattern {
    /// Create a new tag pattern
    pub fn new(prefix: impl Into<String>) -> Self {
        TagPattern {
            prefix: prefix.into(),
        }
    }

    /// Format a version according to pattern
    /// Example: prefix="v", version="1.2.3" -> "v1.2.3"
    pub fn format(&self, version: &Version) -> String {
        format!("{}{}", self.prefix, version)
    }

    /// Extract the version from a tag name, if the tag follows this pattern
    ///
    /// With an empty prefix a leading `v` is still tolerated.
    pub fn version_of(&self, tag: &str) -> Option<Version> {
        let rest = tag.strip_prefix(self.prefix.as_str())?;
        if self.prefix.is_empty() {
            parse_version(rest).ok()
        } else {
            Version::parse(rest).ok()
        }
    }

    /// Highest version among the tags that follow this pattern
    pub fn latest_version<S: AsRef<str>>(&self, tags: &[S]) -> Option<Version> {
        tags.iter()
            .filter_map(|tag| self.version_of(tag.as_ref()))
            .max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_format() {
        let pattern = TagPattern::new("v");
        assert_eq!(pattern.format(&Version::new(1, 2, 3)), "v1.2.3");
    }

    #[test]
    fn test_pattern_format_without_prefix() {
        let pattern = TagPattern::default();
        let version = Version::parse("1.2.3-rc.0").unwrap();
        assert_eq!(pattern.format(&version), "1.2.3-rc.0");
    }

    #[test]
    fn test_version_of() {
        let pattern = TagPattern::new("release-");
        assert_eq!(pattern.version_of("release-1.2.3"), Some(Version::new(1, 2, 3)));
        assert_eq!(pattern.version_of("v1.2.3"), None);
        assert_eq!(pattern.version_of("release-next"), None);
    }

    #[test]
    fn test_latest_version_uses_semver_order() {
        let pattern = TagPattern::new("v");
        let tags = ["v1.9.0", "v1.10.0", "v1.10.0-rc.1", "other", "v2.0.0-alpha.0"];
        assert_eq!(
            pattern.latest_version(&tags),
            Some(Version::parse("2.0.0-alpha.0").unwrap())
        );
    }

    #[test]
    fn test_latest_version_empty() {
        let pattern = TagPattern::new("v");
        let tags: Vec<String> = Vec::new();
        assert_eq!(pattern.latest_version(&tags), None);
    }

    #[test]
    fn test_empty_prefix_tolerates_v() {
        let pattern = TagPattern::default();
        assert_eq!(pattern.version_of("v0.3.0"), Some(Version::new(0, 3, 0)));
        assert_eq!(pattern.version_of("0.3.0"), Some(Version::new(0, 3, 0)));
    }
}
