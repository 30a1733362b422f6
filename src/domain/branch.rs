use crate::config::GitflowConfig;
use std::fmt;

/// Git-flow role of a branch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchKind {
    Master,
    Develop,
    Feature,
    Release,
    Hotfix,
    Support,
    Other,
}

impl BranchKind {
    /// Name used by `git flow <kind>` commands, for kinds that have one
    pub fn command(&self) -> Option<&'static str> {
        match self {
            BranchKind::Feature => Some("feature"),
            BranchKind::Release => Some("release"),
            BranchKind::Hotfix => Some("hotfix"),
            BranchKind::Support => Some("support"),
            BranchKind::Master | BranchKind::Develop | BranchKind::Other => None,
        }
    }

    /// Whether `git flow <kind> finish` exists for this kind
    pub fn can_finish(&self) -> bool {
        matches!(
            self,
            BranchKind::Feature | BranchKind::Release | BranchKind::Hotfix
        )
    }
}

impl fmt::Display for BranchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BranchKind::Master => "master",
            BranchKind::Develop => "develop",
            BranchKind::Feature => "feature",
            BranchKind::Release => "release",
            BranchKind::Hotfix => "hotfix",
            BranchKind::Support => "support",
            BranchKind::Other => "other",
        };
        write!(f, "{}", name)
    }
}

/// Represents a git branch with its git-flow context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchContext {
    pub name: String,
    pub kind: BranchKind,
    /// Name without the git-flow prefix (`feature/login` -> `login`)
    pub short_name: String,
}

impl BranchContext {
    /// Classify a branch against the configured git-flow prefixes
    pub fn classify(name: impl Into<String>, gitflow: &GitflowConfig) -> Self {
        let name = name.into();

        let exact = [
            (gitflow.master.as_str(), BranchKind::Master),
            (gitflow.develop.as_str(), BranchKind::Develop),
        ];
        if let Some((_, kind)) = exact.iter().find(|(branch, _)| *branch == name) {
            return BranchContext {
                short_name: name.clone(),
                name,
                kind: *kind,
            };
        }

        let prefixed = [
            (gitflow.feature.as_str(), BranchKind::Feature),
            (gitflow.release.as_str(), BranchKind::Release),
            (gitflow.hotfix.as_str(), BranchKind::Hotfix),
            (gitflow.support.as_str(), BranchKind::Support),
        ];
        for (prefix, kind) in prefixed {
            if prefix.is_empty() {
                continue;
            }
            if let Some(rest) = name.strip_prefix(prefix) {
                if !rest.is_empty() {
                    return BranchContext {
                        short_name: rest.to_string(),
                        name: name.clone(),
                        kind,
                    };
                }
            }
        }

        BranchContext {
            short_name: name.clone(),
            name,
            kind: BranchKind::Other,
        }
    }

    /// Check if this is the production branch
    pub fn is_release_branch(&self) -> bool {
        self.kind == BranchKind::Master
    }
}
