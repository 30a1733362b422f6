//! Prerelease series handling for semantic versioning
//!
//! A series is a prerelease identifier followed by an optional counter,
//! e.g. `alpha`, `alpha.0`, `alpha.3`. See https://semver.org/#spec-item-9

use semver::Prerelease;
use std::fmt;

/// Where an existing prerelease stands relative to an identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesPosition {
    /// The prerelease is the identifier itself, without a counter
    Bare,
    /// The prerelease is the identifier followed by a numeric counter
    Counter(u64),
    /// The prerelease belongs to another series
    Unrelated,
}

impl SeriesPosition {
    /// Locate `pre` within the series named by `identifier`
    ///
    /// # Examples
    /// ```ignore
    /// let pre = Prerelease::new("alpha.3")?;
    /// assert_eq!(SeriesPosition::of(&pre, "alpha"), SeriesPosition::Counter(3));
    /// assert_eq!(SeriesPosition::of(&pre, "beta"), SeriesPosition::Unrelated);
    /// ```
    pub fn of(pre: &Prerelease, identifier: &str) -> Self {
        let pre = pre.as_str();
        if pre.is_empty() || identifier.is_empty() {
            return SeriesPosition::Unrelated;
        }
        if pre == identifier {
            return SeriesPosition::Bare;
        }

        let counter = pre
            .strip_prefix(identifier)
            .and_then(|rest| rest.strip_prefix('.'))
            .filter(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()))
            .and_then(|rest| rest.parse::<u64>().ok());

        match counter {
            Some(n) => SeriesPosition::Counter(n),
            None => SeriesPosition::Unrelated,
        }
    }
}

/// Prerelease identifier with an optional counter
///
/// # Examples
/// - `alpha` -> PrereleaseSeries { identifier: "alpha", counter: None }
/// - `alpha.4` -> PrereleaseSeries { identifier: "alpha", counter: Some(4) }
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrereleaseSeries {
    pub identifier: String,
    pub counter: Option<u64>,
}

impl PrereleaseSeries {
    /// Start a counted series at `.0`
    pub fn first(identifier: impl Into<String>) -> Self {
        PrereleaseSeries {
            identifier: identifier.into(),
            counter: Some(0),
        }
    }

    /// A series without counter, used for hash-tagged identifiers
    pub fn uncounted(identifier: impl Into<String>) -> Self {
        PrereleaseSeries {
            identifier: identifier.into(),
            counter: None,
        }
    }

    /// Next counter after `current`, or `None` on overflow
    pub fn after(identifier: impl Into<String>, current: u64) -> Option<Self> {
        Some(PrereleaseSeries {
            identifier: identifier.into(),
            counter: Some(current.checked_add(1)?),
        })
    }

    /// Convert into a semver prerelease
    ///
    /// The identifier has already been validated during template expansion,
    /// so this only fails for a hand-built series.
    pub fn to_prerelease(&self) -> Result<Prerelease, semver::Error> {
        Prerelease::new(&self.to_string())
    }
}

impl fmt::Display for PrereleaseSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier)?;
        if let Some(counter) = self.counter {
            write!(f, ".{}", counter)?;
        }
        Ok(())
    }
}
