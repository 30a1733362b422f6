pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod git;
pub mod release;
pub mod selection;
pub mod telemetry;
pub mod ui;
pub mod warning;

pub use engine::{resolve_candidates, CandidateEngine, Resolution, VersionCandidate};
pub use error::{ReleaseError, Result};
