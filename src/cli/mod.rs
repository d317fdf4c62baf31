//! Command-line interface for prepush-tidy
//!
//! Git invokes the installed hook as `prepush-tidy run <remote> <url>`; running
//! the binary without a subcommand does the same thing.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod output;

pub use commands::{install::InstallArgs, run::RunArgs, uninstall::UninstallArgs};
pub use output::Output;

/// prepush-tidy - keep an Xcode project tidy on every push
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Run as if started in <DIR> instead of current working directory
    #[arg(short = 'C', long = "directory", value_name = "DIR", global = true)]
    pub directory: Option<PathBuf>,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only show warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run the pre-push workflow (what the installed hook calls)
    Run(RunArgs),
    /// Install the pre-push hook into the current repository
    Install(InstallArgs),
    /// Remove the pre-push hook from the current repository
    Uninstall(UninstallArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn run(self) -> Result<()> {
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)
                .with_context(|| format!("Failed to change directory to {}", dir.display()))?;
        }

        setup_logging(self.verbose, self.quiet);
        let output = Output::new(self.verbose > 0, self.quiet);

        match self.command {
            Some(Commands::Run(args)) => commands::run::execute(args, self.config.as_deref()).await,
            Some(Commands::Install(args)) => commands::install::execute(args, &output).await,
            Some(Commands::Uninstall(args)) => commands::uninstall::execute(args, &output).await,
            None => commands::run::execute(RunArgs::default(), self.config.as_deref()).await,
        }
    }
}

/// Filter directives for a verbosity level; `RUST_LOG` takes precedence
fn log_filter(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "warn";
    }

    // Git's own chatter stays at warn unless everything is requested
    match verbose {
        0 => "info,git=warn",
        1 => "debug,git=warn",
        _ => "trace",
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_filter(verbose, quiet)));

    // Git shows hook stderr to the user; keep stdout free
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
