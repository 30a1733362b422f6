//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Interactive prompts and user input handling

use std::io::{self, Write};

use semver::Version;

use crate::engine::{VersionCandidate, MANUAL_LABEL};
use crate::error::{ReleaseError, Result};
use crate::release::{default_tag, validate_dist_tag, DistTagStrategy, ReleasePlan};
use crate::selection::{parse_manual_version, Selection, VersionSelector};

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_error, display_policy_set, display_status, display_success, display_warning,
    display_workflow_result,
};

/// Print `prompt` and read one trimmed line from stdin
fn ask(prompt: &str) -> io::Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Interpret a numbered-list answer.
///
/// Empty input selects the first entry. Returns the 0-based index, or
/// `None` when the answer is not a number in `1..=len`.
pub fn parse_choice(input: &str, len: usize) -> Option<usize> {
    let index = if input.trim().is_empty() {
        1
    } else {
        input.trim().parse::<usize>().ok()?
    };

    if index > 0 && index <= len {
        Some(index - 1)
    } else {
        None
    }
}

/// Prompts the operator for a version among the candidates.
///
/// Displays a numbered list with the first entry as default. Picking the
/// manual-entry sentinel asks for a version, which must be valid semver.
/// A version that does not sort above the latest one needs confirmation.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptSelector;

impl PromptSelector {
    fn ask_version(&self, latest: &Version) -> Result<Selection> {
        let input = ask(&format!("Enter a version (latest is {}): ", latest))?;
        let (version, warning) = parse_manual_version(&input, latest)?;

        if let Some(warning) = warning {
            formatter::display_warning(&warning);
            if !confirm(&ask("Use it anyway? (y/N): ")?) {
                return Ok(Selection::Cancelled);
            }
        }

        Ok(Selection::Manual(version))
    }
}

impl VersionSelector for PromptSelector {
    fn select(&self, candidates: &[VersionCandidate], latest: &Version) -> Result<Selection> {
        if candidates.is_empty() {
            return Err(ReleaseError::selection("no versions to choose from"));
        }

        println!("\n{}", console::style("Select or specify a new version:").bold());
        for (i, candidate) in candidates.iter().enumerate() {
            println!("{}", formatter::format_candidate(i, candidate));
        }

        let input = ask(&format!(
            "\nSelect a version (1-{}) [default: 1]: ",
            candidates.len()
        ))?;
        let index = parse_choice(&input, candidates.len())
            .ok_or_else(|| ReleaseError::selection("Invalid selection"))?;

        if candidates[index].is_manual() {
            self.ask_version(latest)
        } else {
            Ok(Selection::Candidate(index))
        }
    }
}

/// Prompts for the npm dist-tag.
///
/// Offers the policy's tags (or the default for the version kind) plus a
/// free-form entry. Tags that read as a semver range are refused.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptDistTag;

impl DistTagStrategy for PromptDistTag {
    fn select(&self, plan: &ReleasePlan) -> Result<Option<String>> {
        let mut options = plan.npm_tags.clone();
        if options.is_empty() {
            options.push(default_tag(plan).to_string());
        }

        println!("\n{}", console::style("Select a dist-tag:").bold());
        for (i, tag) in options.iter().enumerate() {
            println!("  {}. {}", i + 1, tag);
        }
        println!("  {}. {}", options.len() + 1, MANUAL_LABEL);

        let input = ask(&format!(
            "\nSelect a dist-tag (1-{}) [default: 1]: ",
            options.len() + 1
        ))?;
        let index = parse_choice(&input, options.len() + 1)
            .ok_or_else(|| ReleaseError::selection("Invalid dist-tag selection"))?;

        let tag = match options.get(index) {
            Some(tag) => tag.clone(),
            None => ask("Enter a dist-tag: ")?,
        };
        validate_dist_tag(&tag)?;
        Ok(Some(tag.trim().to_string()))
    }
}

fn confirm(response: &str) -> bool {
    let response = response.trim().to_lowercase();
    response == "y" || response == "yes"
}

/// Prompts user to confirm an action with a yes/no prompt.
///
/// Displays the given prompt and accepts "y" or "yes" (case-insensitive) as confirmation.
/// Default is "no" if user presses Enter.
///
/// # Arguments
/// * `prompt` - The prompt message to display (without the "(y/N): " suffix)
///
/// # Returns
/// * `Ok(true)` - If user entered "y" or "yes"
/// * `Ok(false)` - Otherwise (including Enter, or "n"/"no")
/// * `Err` - If input error occurs
pub fn confirm_action(prompt: &str) -> anyhow::Result<bool> {
    let response = ask(&format!("\n{} (y/N): ", prompt))?;
    Ok(confirm(&response))
}
