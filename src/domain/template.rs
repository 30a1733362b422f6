//! Prerelease identifier templates
//!
//! Two placeholders are recognised:
//! - `%r`: the branch remainder, i.e. the branch name after the literal
//!   prefix of the matched pattern (`feature/*` on `feature/login-fix`
//!   gives `login-fix`)
//! - `%h`: the short commit hash
//!
//! A template containing `%h` is hash-tagged: the commit already identifies
//! the build, so no `.N` counter is attached to it.

use crate::domain::commit::MemoizedHash;
use crate::error::{ReleaseError, Result};

/// Placeholder for the branch remainder
pub const BRANCH_REMAINDER: &str = "%r";

/// Placeholder for the short commit hash
pub const COMMIT_HASH: &str = "%h";

/// Values available while expanding a template
pub struct TemplateContext<'a> {
    pub branch_remainder: &'a str,
    pub commit_hash: &'a MemoizedHash<'a>,
}

/// Letters-only hash used to check a template independently of the commit
const HASH_STAND_IN: &str = "abcdef0";

/// A fully substituted prerelease identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandedIdentifier {
    pub identifier: String,
    pub hash_tagged: bool,
}

/// Whether a template references the commit hash
pub fn is_hash_tagged(template: &str) -> bool {
    template.contains(COMMIT_HASH)
}

/// Make a branch remainder usable inside a semver prerelease identifier
///
/// Anything other than ASCII alphanumerics and `-` becomes `-`, so
/// `feature/ui/login` contributes `ui-login`.
pub fn sanitize_remainder(remainder: &str) -> String {
    remainder
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// Substitute `%r` then `%h` in a template
///
/// The commit hash is only requested when the template contains `%h`.
/// The result must be a valid semver prerelease identifier.
pub fn expand(template: &str, context: &TemplateContext<'_>) -> Result<ExpandedIdentifier> {
    let mut identifier = template.to_string();

    if identifier.contains(BRANCH_REMAINDER) {
        identifier = identifier.replace(BRANCH_REMAINDER, &sanitize_remainder(context.branch_remainder));
    }

    let hash_tagged = is_hash_tagged(template);
    if hash_tagged {
        // Template mistakes are fatal; only the hash itself may be unusable.
        validate_identifier(template, &identifier.replace(COMMIT_HASH, HASH_STAND_IN))?;

        let hash = context.commit_hash.get()?;
        identifier = identifier.replace(COMMIT_HASH, &hash);
        if let Err(e) = semver::Prerelease::new(&identifier) {
            return Err(ReleaseError::commit_hash(format!(
                "short hash '{}' gives invalid prerelease identifier '{}': {}",
                hash, identifier, e
            )));
        }
    } else {
        validate_identifier(template, &identifier)?;
    }

    Ok(ExpandedIdentifier {
        identifier,
        hash_tagged,
    })
}

fn validate_identifier(template: &str, identifier: &str) -> Result<()> {
    let invalid = |reason: String| ReleaseError::InvalidPrerelease {
        template: template.to_string(),
        identifier: identifier.to_string(),
        reason,
    };

    if identifier.is_empty() {
        return Err(invalid("identifier is empty".to_string()));
    }

    semver::Prerelease::new(identifier)
        .map(|_| ())
        .map_err(|e| invalid(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commit::{FixedHash, NoCommitHash};
    use std::cell::Cell;

    fn expand_with(template: &str, remainder: &str, hash: &str) -> Result<ExpandedIdentifier> {
        let provider = FixedHash::new(hash);
        let memo = MemoizedHash::new(&provider);
        let context = TemplateContext {
            branch_remainder: remainder,
            commit_hash: &memo,
        };
        expand(template, &context)
    }

    #[test]
    fn test_plain_template() {
        let expanded = expand_with("alpha", "", "abc1234").unwrap();
        assert_eq!(expanded.identifier, "alpha");
        assert!(!expanded.hash_tagged);
    }

    #[test]
    fn test_branch_remainder() {
        let expanded = expand_with("%r", "login-fix", "abc1234").unwrap();
        assert_eq!(expanded.identifier, "login-fix");
        assert!(!expanded.hash_tagged);
    }

    #[test]
    fn test_commit_hash() {
        let expanded = expand_with("experimental-%h", "", "abc1234def").unwrap();
        assert_eq!(expanded.identifier, "experimental-abc1234");
        assert!(expanded.hash_tagged);
    }

    #[test]
    fn test_every_occurrence_replaced() {
        let expanded = expand_with("%r-%h-%r", "ui", "abc1234").unwrap();
        assert_eq!(expanded.identifier, "ui-abc1234-ui");
    }

    #[test]
    fn test_remainder_is_sanitized() {
        let expanded = expand_with("%r", "ui/login_form", "abc1234").unwrap();
        assert_eq!(expanded.identifier, "ui-login-form");
    }

    #[test]
    fn test_hash_not_requested_without_placeholder() {
        let calls = Cell::new(0);
        let provider = || -> Result<String> {
            calls.set(calls.get() + 1);
            Ok("abc1234".to_string())
        };
        let memo = MemoizedHash::new(&provider);
        let context = TemplateContext {
            branch_remainder: "x",
            commit_hash: &memo,
        };
        expand("beta", &context).unwrap();
        expand("%r", &context).unwrap();
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_missing_hash_fails_expansion() {
        let memo = MemoizedHash::new(&NoCommitHash);
        let context = TemplateContext {
            branch_remainder: "",
            commit_hash: &memo,
        };
        let err = expand("%h", &context).unwrap_err();
        assert!(matches!(err, ReleaseError::CommitHashUnavailable(_)));
    }

    #[test]
    fn test_empty_expansion_rejected() {
        let err = expand_with("%r", "", "abc1234").unwrap_err();
        assert!(matches!(err, ReleaseError::InvalidPrerelease { .. }));
    }

    #[test]
    fn test_leading_zero_numeric_identifier_rejected() {
        assert!(expand_with("01", "", "abc1234").is_err());
    }

    #[test]
    fn test_numeric_hash_with_leading_zero_is_unavailable() {
        let err = expand_with("%h", "", "0123456abcdef").unwrap_err();
        match err {
            ReleaseError::CommitHashUnavailable(reason) => assert!(reason.contains("0123456")),
            other => panic!("expected CommitHashUnavailable, got {:?}", other),
        }
    }

    #[test]
    fn test_numeric_hash_inside_word_is_valid() {
        let expanded = expand_with("build-%h", "", "0123456abcdef").unwrap();
        assert_eq!(expanded.identifier, "build-0123456");
    }

    #[test]
    fn test_template_error_beside_hash_stays_fatal() {
        let err = expand_with("%r.%h", "", "abc1234").unwrap_err();
        assert!(matches!(err, ReleaseError::InvalidPrerelease { .. }));
    }
}
