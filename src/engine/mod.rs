//! Version candidate engine: branch policies to next-version proposals

pub mod candidate;
pub mod resolver;

pub use candidate::{Resolution, VersionCandidate, MANUAL_LABEL};
pub use resolver::{resolve_candidates, CandidateEngine};
