//! Patchbay - issue-driven changeset engine CLI
//!
//! The `patchbay` command reads a trigger event payload, extracts the fenced
//! changeset from the issue or comment body, and applies it to a working
//! tree. The exit code is the contract consumed by the surrounding
//! commit/PR automation: 0 for applied or nothing-to-apply, 1 for a genuine
//! application failure.
//!
//! ## Commands
//!
//! - `run`: Extract the changeset and apply it to the working tree
//! - `plan`: Show the plan directive and suggested branch name

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{warn, Level};

use patchbay_core::{branch_slug, load_trigger_context, plan_for_context, ChangesetKind};

#[derive(Parser)]
#[command(name = "patchbay")]
#[command(author = "Patchbay Maintainers")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Issue-driven changeset engine", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the changeset from the trigger event and apply it
    Run {
        /// Path to the event payload JSON (the invoking environment resolves
        /// this, e.g. from GITHUB_EVENT_PATH)
        #[arg(short, long)]
        event: PathBuf,

        /// Changeset kind to probe for (explicit configuration; never
        /// inferred from the text)
        #[arg(short, long, value_enum)]
        mode: Mode,

        /// Working-tree root to apply against
        #[arg(short, long, default_value = ".")]
        workdir: PathBuf,
    },

    /// Show the plan directive and suggested branch name for the event
    Plan {
        /// Path to the event payload JSON
        #[arg(short, long)]
        event: PathBuf,
    },
}

/// Operating mode: which fenced grammar the run probes for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// ```patches block holding a unified diff
    Patch,

    /// ```files block holding (path, content) records
    Files,
}

impl From<Mode> for ChangesetKind {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Patch => ChangesetKind::Patch,
            Mode::Files => ChangesetKind::Files,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    patchbay_core::init_tracing(cli.json, level);

    let outcome = match cli.command {
        Commands::Run {
            event,
            mode,
            workdir,
        } => cmd_run(&event, mode.into(), &workdir),
        Commands::Plan { event } => cmd_plan(&event),
    };

    match outcome {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

/// Extract the changeset from the trigger event and apply it
fn cmd_run(event: &Path, kind: ChangesetKind, workdir: &Path) -> Result<ExitCode> {
    let workdir = workdir
        .canonicalize()
        .with_context(|| format!("working directory not found: {}", workdir.display()))?;

    // Patch mode needs the git primitive; files mode only needs a writable
    // tree. Warn early so a misconfigured runner is obvious in the logs.
    if kind == ChangesetKind::Patch && !patchbay_core::is_git_repo(&workdir) {
        warn!(
            workdir = %workdir.display(),
            "working directory is not inside a git work tree"
        );
    }

    let ctx = load_trigger_context(event);
    let result = patchbay_core::execute(ctx.as_ref(), kind, &workdir);
    Ok(patchbay_core::report(&result))
}

/// Show the plan directive and suggested branch name for the event
fn cmd_plan(event: &Path) -> Result<ExitCode> {
    let Some(ctx) = load_trigger_context(event) else {
        println!("no trigger context");
        return Ok(ExitCode::SUCCESS);
    };

    let plan = plan_for_context(&ctx);
    println!("issue:  #{} {}", ctx.issue_number, ctx.title);
    println!("mode:   {}", plan.mode);
    println!("branch: {}", branch_slug(&plan.mode));

    Ok(ExitCode::SUCCESS)
}
