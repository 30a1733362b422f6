//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from user interaction.
//! Styling goes through `console`, which drops colours when the terminal
//! does not support them.

use console::style;

use crate::cli::WorkflowResult;
use crate::domain::PolicySet;
use crate::engine::VersionCandidate;
use crate::warning::ResolutionWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a resolution warning to the user.
pub fn display_warning(warning: &ResolutionWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Render one candidate line, numbered from 1
pub fn format_candidate(index: usize, candidate: &VersionCandidate) -> String {
    if candidate.is_manual() {
        format!("  {}. {}", index + 1, style(&candidate.label).dim())
    } else {
        format!("  {}. {}", index + 1, candidate.label)
    }
}

/// Display the configured policy set in resolution order.
pub fn display_policy_set(policies: &PolicySet) {
    println!("{}", style("Configured release policies (first match wins):").bold());
    for rule in policies.rules() {
        let names: Vec<String> = rule.policies.iter().map(|p| p.to_string()).collect();
        if names.is_empty() {
            println!("  - {}: {}", rule.pattern, style("(none)").dim());
        } else {
            println!("  - {}: {}", rule.pattern, names.join(", "));
        }
    }
}

/// Warnings of `result` not already in `shown`
pub fn pending_warnings<'a>(
    result: &'a WorkflowResult,
    shown: &[ResolutionWarning],
) -> Vec<&'a ResolutionWarning> {
    result.warnings.iter().filter(|w| !shown.contains(w)).collect()
}

/// Display the outcome of a release workflow.
///
/// Shows the warnings gathered on the way, skipping any listed in `shown`,
/// then the version and tag. The dist-tag and finish outcome follow when known.
pub fn display_workflow_result(result: &WorkflowResult, shown: &[ResolutionWarning]) {
    for warning in pending_warnings(result, shown) {
        display_warning(warning);
    }

    display_success(&format!(
        "Version {} selected for branch {}",
        style(&result.version).green(),
        result.branch
    ));
    if let Some(pattern) = &result.matched_pattern {
        println!("  Policy:   {}", pattern);
    }
    println!("  Tag:      {}", result.tag);
    if let Some(tag) = &result.dist_tag {
        println!("  Dist-tag: {}", tag);
    }
    if let Some(outcome) = &result.finish_outcome {
        display_status(outcome);
    }
}
