use thiserror::Error;

/// Unified error type for gitflow-release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid branch pattern '{pattern}': {reason}")]
    Pattern { pattern: String, reason: String },

    #[error("Malformed release policy for '{pattern}': {reason}")]
    MalformedPolicy { pattern: String, reason: String },

    #[error("Invalid base version '{input}': {reason}")]
    InvalidBaseVersion { input: String, reason: String },

    #[error("Template '{template}' expanded to invalid prerelease identifier '{identifier}': {reason}")]
    InvalidPrerelease {
        template: String,
        identifier: String,
        reason: String,
    },

    #[error("Commit hash unavailable: {0}")]
    CommitHashUnavailable(String),

    #[error("No release policy matches branch '{branch}'")]
    NoMatchingPolicy { branch: String },

    #[error("Version error: {0}")]
    InvalidVersion(String),

    #[error("Selection error: {0}")]
    Selection(String),
}

/// Convenience type alias for Results in gitflow-release
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a malformed policy error for the given pattern
    pub fn malformed(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        ReleaseError::MalformedPolicy {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ReleaseError::InvalidVersion(msg.into())
    }

    /// Create a commit hash error with context
    pub fn commit_hash(msg: impl Into<String>) -> Self {
        ReleaseError::CommitHashUnavailable(msg.into())
    }

    /// Create a selection error with context
    pub fn selection(msg: impl Into<String>) -> Self {
        ReleaseError::Selection(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReleaseError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ReleaseError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_malformed_policy_names_pattern() {
        let err = ReleaseError::malformed("feature/*", "policy has neither release nor prerelease");
        let msg = err.to_string();
        assert!(msg.contains("feature/*"));
        assert!(msg.contains("neither release nor prerelease"));
    }

    #[test]
    fn test_invalid_base_version_display() {
        let err = ReleaseError::InvalidBaseVersion {
            input: "1.x".to_string(),
            reason: "unexpected character".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid base version '1.x': unexpected character"
        );
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (ReleaseError::config("x"), "Configuration error"),
            (ReleaseError::version("x"), "Version error"),
            (ReleaseError::commit_hash("x"), "Commit hash unavailable"),
            (ReleaseError::selection("x"), "Selection error"),
            (
                ReleaseError::NoMatchingPolicy {
                    branch: "x".to_string(),
                },
                "No release policy matches",
            ),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }

    #[test]
    fn test_config_parse_error_conversion() {
        let parse_err = toml::from_str::<toml::Table>("not = [valid").unwrap_err();
        let err: ReleaseError = parse_err.into();
        assert!(err.to_string().starts_with("Configuration parse error"));
    }
}
