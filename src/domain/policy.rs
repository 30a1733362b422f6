//! Release policies and the ordered policy set
//!
//! Configuration allows several shapes for a policy (a single entry, a
//! list, a bare prerelease name or a detailed table). They are classified
//! once into [`Policy`] values when the [`PolicySet`] is built; the engine
//! never looks at raw configuration.

use crate::config::{PolicyEntries, PolicyEntry, PolicySetConfig, PrereleaseItem};
use crate::domain::pattern::BranchPattern;
use crate::error::{ReleaseError, Result};
use std::fmt;

/// Pass-through metadata for the release-execution layer
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PolicyMetadata {
    /// npm distribution tag hints, most preferred first
    pub npm_tags: Vec<String>,
    /// git-flow finish flags as letters, e.g. `rFk`
    pub finish_args: Option<String>,
}

/// A release rule for a branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Policy {
    /// Final (non-prerelease) version
    Release { metadata: PolicyMetadata },
    /// Prerelease version built from an identifier template
    Prerelease {
        template: String,
        metadata: PolicyMetadata,
    },
}

impl Policy {
    pub fn release() -> Self {
        Policy::Release {
            metadata: PolicyMetadata::default(),
        }
    }

    pub fn prerelease(template: impl Into<String>) -> Self {
        Policy::Prerelease {
            template: template.into(),
            metadata: PolicyMetadata::default(),
        }
    }

    /// Replace the metadata of this policy
    pub fn with_metadata(self, metadata: PolicyMetadata) -> Self {
        match self {
            Policy::Release { .. } => Policy::Release { metadata },
            Policy::Prerelease { template, .. } => Policy::Prerelease { template, metadata },
        }
    }

    pub fn metadata(&self) -> &PolicyMetadata {
        match self {
            Policy::Release { metadata } | Policy::Prerelease { metadata, .. } => metadata,
        }
    }

    pub fn is_release(&self) -> bool {
        matches!(self, Policy::Release { .. })
    }

    /// Short kind name used in labels
    pub fn kind(&self) -> &'static str {
        match self {
            Policy::Release { .. } => "release",
            Policy::Prerelease { .. } => "prerelease",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Release { .. } => write!(f, "release"),
            Policy::Prerelease { template, .. } => write!(f, "prerelease '{}'", template),
        }
    }
}

/// One pattern with its policies
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyRule {
    pub pattern: BranchPattern,
    pub policies: Vec<Policy>,
}

/// The rule selected for a branch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedMatch<'a> {
    pub matched_pattern: &'a str,
    pub matched_prefix_length: usize,
    pub policies: &'a [Policy],
}

impl<'a> ResolvedMatch<'a> {
    /// Part of the branch name after the literal prefix of the pattern
    pub fn branch_remainder<'b>(&self, branch: &'b str) -> &'b str {
        branch.get(self.matched_prefix_length..).unwrap_or("")
    }
}

/// Ordered branch patterns with their policies
///
/// Lookup is first-match-wins in insertion order. Put specific patterns
/// before catch-alls.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolicySet {
    rules: Vec<PolicyRule>,
}

impl PolicySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pattern with its policies
    pub fn push(&mut self, pattern: &str, policies: Vec<Policy>) -> Result<()> {
        let pattern = BranchPattern::new(pattern)?;
        self.rules.push(PolicyRule { pattern, policies });
        Ok(())
    }

    /// Builder-style [`push`](Self::push)
    pub fn with_rule(mut self, pattern: &str, policies: Vec<Policy>) -> Result<Self> {
        self.push(pattern, policies)?;
        Ok(self)
    }

    /// Classify a configured policy set
    ///
    /// Every pattern is validated up front; the first malformed policy
    /// fails the whole set.
    pub fn from_config(config: &PolicySetConfig) -> Result<Self> {
        let mut set = PolicySet::new();
        for (pattern, entries) in config.iter() {
            let policies = classify_entries(pattern, entries)?;
            set.push(pattern, policies)?;
        }
        Ok(set)
    }

    pub fn rules(&self) -> &[PolicyRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First rule whose pattern matches `branch`
    pub fn resolve(&self, branch: &str) -> Option<ResolvedMatch<'_>> {
        self.rules.iter().find_map(|rule| {
            rule.pattern.matches(branch).map(|m| {
                debug_assert!(m.prefix_len <= branch.len());
                ResolvedMatch {
                    matched_pattern: rule.pattern.as_str(),
                    matched_prefix_length: m.prefix_len,
                    policies: &rule.policies,
                }
            })
        })
    }
}

fn classify_entries(pattern: &str, entries: &PolicyEntries) -> Result<Vec<Policy>> {
    match entries {
        PolicyEntries::One(entry) => classify_entry(pattern, entry),
        PolicyEntries::Many(list) => {
            let mut policies = Vec::new();
            for entry in list {
                policies.extend(classify_entry(pattern, entry)?);
            }
            Ok(policies)
        }
        PolicyEntries::Invalid(value) => Err(ReleaseError::malformed(
            pattern,
            format!("expected a policy table or a list of tables, found {}", value.type_str()),
        )),
    }
}

fn classify_entry(pattern: &str, entry: &PolicyEntry) -> Result<Vec<Policy>> {
    let inherited = PolicyMetadata {
        npm_tags: entry.npm_tags.clone().unwrap_or_default(),
        finish_args: entry.finish_args.clone(),
    };

    let mut policies = Vec::new();
    if entry.release == Some(true) {
        policies.push(Policy::release().with_metadata(inherited.clone()));
    }

    if let Some(prerelease) = &entry.prerelease {
        let items = prerelease.items();
        if items.is_empty() {
            return Err(ReleaseError::malformed(pattern, "prerelease list is empty"));
        }
        for item in items {
            policies.push(classify_item(pattern, item, &inherited)?);
        }
    }

    if policies.is_empty() {
        return Err(ReleaseError::malformed(
            pattern,
            "policy has neither `release = true` nor a `prerelease` identifier",
        ));
    }
    Ok(policies)
}

fn classify_item(pattern: &str, item: &PrereleaseItem, inherited: &PolicyMetadata) -> Result<Policy> {
    let (name, metadata) = match item {
        PrereleaseItem::Name(name) => (Some(name.as_str()), inherited.clone()),
        PrereleaseItem::Detailed(detail) => {
            let metadata = PolicyMetadata {
                npm_tags: detail
                    .npm_tags
                    .clone()
                    .unwrap_or_else(|| inherited.npm_tags.clone()),
                finish_args: detail
                    .finish_args
                    .clone()
                    .or_else(|| inherited.finish_args.clone()),
            };
            (detail.name.as_deref(), metadata)
        }
        PrereleaseItem::Invalid(value) => {
            return Err(ReleaseError::malformed(
                pattern,
                format!("prerelease must be a string or a table, found {}", value.type_str()),
            ));
        }
    };

    match name.map(str::trim) {
        Some(name) if !name.is_empty() => Ok(Policy::prerelease(name).with_metadata(metadata)),
        _ => Err(ReleaseError::malformed(pattern, "prerelease identifier is missing or empty")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{parse_config, Config, PrereleaseDetail};

    fn set_from(toml: &str) -> Result<PolicySet> {
        let config = parse_config(toml).unwrap();
        PolicySet::from_config(&config.policyset)
    }

    #[test]
    fn test_first_match_wins() {
        let set = PolicySet::new()
            .with_rule("feature/*", vec![Policy::prerelease("%r")])
            .unwrap()
            .with_rule("*", vec![Policy::prerelease("%h")])
            .unwrap();

        let resolved = set.resolve("feature/login").unwrap();
        assert_eq!(resolved.matched_pattern, "feature/*");
        assert_eq!(resolved.matched_prefix_length, 8);
        assert_eq!(resolved.branch_remainder("feature/login"), "login");

        let resolved = set.resolve("bugfix/x").unwrap();
        assert_eq!(resolved.matched_pattern, "*");
    }

    #[test]
    fn test_declaration_order_beats_specificity() {
        let set = PolicySet::new()
            .with_rule("*", vec![Policy::prerelease("%h")])
            .unwrap()
            .with_rule("feature/*", vec![Policy::prerelease("%r")])
            .unwrap();
        assert_eq!(set.resolve("feature/login").unwrap().matched_pattern, "*");
    }

    #[test]
    fn test_no_match() {
        let set = PolicySet::new()
            .with_rule("develop", vec![Policy::prerelease("alpha")])
            .unwrap();
        assert!(set.resolve("main").is_none());
    }

    #[test]
    fn test_exact_match_has_empty_remainder() {
        let set = PolicySet::new()
            .with_rule("develop", vec![Policy::prerelease("%r")])
            .unwrap();
        let resolved = set.resolve("develop").unwrap();
        assert_eq!(resolved.branch_remainder("develop"), "");
    }

    #[test]
    fn test_default_config_classifies() {
        let set = PolicySet::from_config(&Config::default().policyset).unwrap();
        let develop = set.resolve("develop").unwrap();
        assert_eq!(develop.policies.len(), 2);
        assert_eq!(
            develop.policies[0].metadata().npm_tags,
            vec!["alpha".to_string(), "next".to_string()]
        );
        assert!(develop.policies[1].metadata().npm_tags.is_empty());

        let feature = set.resolve("feature/x").unwrap();
        assert_eq!(feature.policies.len(), 2);
        assert_eq!(feature.policies[0].metadata().finish_args.as_deref(), Some("rFk"));

        assert!(set.resolve("master").unwrap().policies[0].is_release());
    }

    #[test]
    fn test_item_metadata_overrides_entry() {
        let set = set_from(
            r#"
[policyset."feature/*"]
prerelease = ["%r", { name = "exp-%h", npmTags = ["canary"], finishArgs = "F" }]
npmTags = ["next"]
finishArgs = "rk"
"#,
        )
        .unwrap();
        let policies = set.resolve("feature/a").unwrap().policies;
        assert_eq!(policies[0].metadata().npm_tags, vec!["next".to_string()]);
        assert_eq!(policies[0].metadata().finish_args.as_deref(), Some("rk"));
        assert_eq!(policies[1].metadata().npm_tags, vec!["canary".to_string()]);
        assert_eq!(policies[1].metadata().finish_args.as_deref(), Some("F"));
    }

    #[test]
    fn test_release_and_prerelease_in_one_entry() {
        let set = set_from(
            r#"
[policyset."support/*"]
release = true
prerelease = "rc"
"#,
        )
        .unwrap();
        let policies = set.resolve("support/1.x").unwrap().policies;
        assert_eq!(policies, &[Policy::release(), Policy::prerelease("rc")]);
    }

    #[test]
    fn test_malformed_entry_without_policy() {
        let err = set_from("[policyset.develop]\nnpmTags = [\"next\"]\n").unwrap_err();
        match err {
            ReleaseError::MalformedPolicy { pattern, .. } => assert_eq!(pattern, "develop"),
            other => panic!("expected MalformedPolicy, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_release_false() {
        assert!(matches!(
            set_from("[policyset.main]\nrelease = false\n"),
            Err(ReleaseError::MalformedPolicy { .. })
        ));
    }

    #[test]
    fn test_malformed_bare_string_entry() {
        assert!(matches!(
            set_from("[policyset]\ndevelop = \"alpha\"\n"),
            Err(ReleaseError::MalformedPolicy { .. })
        ));
    }

    #[test]
    fn test_malformed_prerelease_shapes() {
        assert!(matches!(
            set_from("[policyset.develop]\nprerelease = 3\n"),
            Err(ReleaseError::MalformedPolicy { .. })
        ));
        assert!(matches!(
            set_from("[policyset.develop]\nprerelease = \"\"\n"),
            Err(ReleaseError::MalformedPolicy { .. })
        ));
        assert!(matches!(
            set_from("[policyset.develop]\nprerelease = []\n"),
            Err(ReleaseError::MalformedPolicy { .. })
        ));
    }

    #[test]
    fn test_malformed_detail_without_name() {
        let mut config = PolicySetConfig::new();
        config.push(
            "develop",
            PolicyEntry {
                prerelease: Some(crate::config::PrereleaseField::One(PrereleaseItem::Detailed(
                    PrereleaseDetail::default(),
                ))),
                ..Default::default()
            }
            .into(),
        );
        assert!(matches!(
            PolicySet::from_config(&config),
            Err(ReleaseError::MalformedPolicy { .. })
        ));
    }
}
