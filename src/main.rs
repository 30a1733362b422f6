use anyhow::Result;
use clap::Parser;

use gitflow_release::cli::{run_release_workflow, ReleaseWorkflowArgs};
use gitflow_release::config::{self, Config};
use gitflow_release::domain::PolicySet;
use gitflow_release::git::{Git2Repository, Repository};
use gitflow_release::release::{DistTagStrategy, FinishStrategy, PolicyDistTag, PreviewFinish};
use gitflow_release::selection::{FirstCandidateSelector, VersionSelector};
use gitflow_release::warning::ResolutionWarning;
use gitflow_release::{telemetry, ui};

#[derive(clap::Parser)]
#[command(
    name = "gitflow-release",
    about = "Pick the next release version from git-flow branch policies"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Compute versions for this branch instead of HEAD")]
    branch: Option<String>,

    #[arg(short, long, help = "Latest released version instead of the highest tag")]
    latest: Option<String>,

    #[arg(long, help = "Non-interactive: take the first candidate and dist-tag")]
    ci: bool,

    #[arg(long, help = "Show the configured release policies and exit")]
    list: bool,

    #[arg(long, help = "Log resolution details")]
    verbose: bool,

    #[arg(short, long, help = "Print version information")]
    version: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    telemetry::init_tracing(args.verbose);

    if args.version {
        println!("gitflow-release {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    if args.list {
        return list_policies(&config);
    }

    let workflow_args = ReleaseWorkflowArgs {
        branch: args.branch,
        latest_version: args.latest,
        ci: args.ci,
    };
    let ci = workflow_args.is_ci(&config);

    let repo = match Git2Repository::open(".") {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    };

    let mut shown = Vec::new();
    if !ci && !repo.is_gitflow_initialized()? {
        ui::display_warning(&ResolutionWarning::GitflowNotInitialized);
        shown.push(ResolutionWarning::GitflowNotInitialized);
        if !ui::confirm_action("Continue without git-flow?")? {
            println!("Operation cancelled by user.");
            return Ok(());
        }
    }

    let selector: &dyn VersionSelector = if ci {
        &FirstCandidateSelector
    } else {
        &ui::PromptSelector
    };
    let dist_tag: &dyn DistTagStrategy = if ci {
        &PolicyDistTag
    } else {
        &ui::PromptDistTag
    };
    let finish: &dyn FinishStrategy = &PreviewFinish;

    let outcome = run_release_workflow(&workflow_args, &config, &repo, selector, finish, dist_tag);
    let result = match outcome {
        Ok(Some(result)) => result,
        Ok(None) => {
            println!("Operation cancelled by user.");
            return Ok(());
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    ui::display_workflow_result(&result, &shown);

    Ok(())
}

fn list_policies(config: &Config) -> Result<()> {
    let policies = match PolicySet::from_config(&config.policyset) {
        Ok(policies) => policies,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    if policies.is_empty() {
        ui::display_error("No release policies configured in gitflow-release.toml");
        std::process::exit(1);
    }

    ui::display_policy_set(&policies);
    Ok(())
}
