//! Domain logic - pure release rules independent of git and prompts

pub mod branch;
pub mod commit;
pub mod pattern;
pub mod policy;
pub mod prerelease;
pub mod tag;
pub mod template;
pub mod version;

pub use branch::{BranchContext, BranchKind};
pub use commit::{CommitHashProvider, FixedHash, MemoizedHash, NoCommitHash};
pub use pattern::{BranchPattern, PatternMatch};
pub use policy::{Policy, PolicyMetadata, PolicyRule, PolicySet, ResolvedMatch};
pub use prerelease::{PrereleaseSeries, SeriesPosition};
pub use tag::TagPattern;
pub use template::{ExpandedIdentifier, TemplateContext};
pub use version::BaseVersion;
