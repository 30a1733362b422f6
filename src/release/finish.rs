use crate::config::{CommandArgsConfig, FlagValue};
use crate::domain::BranchKind;
use crate::error::Result;
use crate::release::ReleasePlan;
use std::collections::BTreeMap;
use std::fmt;

/// A `git flow <kind> finish` invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishCommand {
    pub kind: BranchKind,
    /// Branch name without the git-flow prefix
    pub name: String,
    /// Flags in argv form, e.g. `["-F", "-m", "Release 1.2.0"]`
    pub flags: Vec<String>,
}

impl FinishCommand {
    /// Build the finish command for a plan
    ///
    /// Flags come from the configured `finish` arguments of the branch
    /// kind; every letter of the policy's finish args forces `-<letter>`
    /// on. Returns `None` for branches git-flow cannot finish.
    pub fn for_plan(
        plan: &ReleasePlan,
        command_args: &BTreeMap<String, CommandArgsConfig>,
    ) -> Option<Self> {
        let kind = plan.branch.kind;
        if !kind.can_finish() {
            return None;
        }
        let command = kind.command()?;

        let mut finish = command_args
            .get(command)
            .map(|args| args.finish.clone())
            .unwrap_or_default();

        if let Some(letters) = &plan.finish_args {
            for letter in letters.chars().filter(|c| c.is_ascii_alphabetic()) {
                finish.insert(letter.to_string(), FlagValue::Switch(true));
            }
        }

        let mut flags = Vec::new();
        for (name, value) in &finish {
            match value {
                FlagValue::Switch(true) => flags.push(format!("-{}", name)),
                FlagValue::Value(v) if !v.is_empty() => {
                    flags.push(format!("-{}", name));
                    flags.push(v.clone());
                }
                _ => {}
            }
        }

        Some(FinishCommand {
            kind,
            name: plan.branch.short_name.clone(),
            flags,
        })
    }
}

impl fmt::Display for FinishCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "git flow {} finish", self.kind)?;
        for flag in &self.flags {
            if flag.contains(char::is_whitespace) {
                write!(f, " \"{}\"", flag)?;
            } else {
                write!(f, " {}", flag)?;
            }
        }
        write!(f, " {}", self.name)
    }
}

/// Finishes the git-flow branch once a version is chosen
pub trait FinishStrategy {
    /// Returns a short description of what was done
    fn finish(&self, plan: &ReleasePlan, command: &FinishCommand) -> Result<String>;
}

/// Renders the finish command without running it
#[derive(Debug, Clone, Copy, Default)]
pub struct PreviewFinish;

impl FinishStrategy for PreviewFinish {
    fn finish(&self, plan: &ReleasePlan, command: &FinishCommand) -> Result<String> {
        tracing::debug!(version = %plan.version, %command, "previewing finish command");
        Ok(format!("Would run: {}", command))
    }
}
