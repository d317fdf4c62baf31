use anyhow::Result;
use clap::Args;

use super::{HOOK_MARKER, HOOK_NAME, hook_script};
use crate::cli::Output;
use crate::git::GitRepo;

#[derive(Args, Default)]
pub struct InstallArgs {
    /// Overwrite an existing pre-push hook that was not installed by prepush-tidy
    #[arg(short, long)]
    pub force: bool,
}

pub async fn execute(args: InstallArgs, output: &Output) -> Result<()> {
    let repo = GitRepo::discover()?;
    let hook_path = repo.hook_path(HOOK_NAME);

    if hook_path.exists() {
        let existing = std::fs::read_to_string(&hook_path).unwrap_or_default();
        let ours = existing.contains(HOOK_MARKER);

        if !ours && !args.force {
            anyhow::bail!(
                "A {HOOK_NAME} hook already exists at {}. Re-run with --force to replace it.",
                hook_path.display()
            );
        }
        if !ours {
            output.warning(&format!("Replacing existing {HOOK_NAME} hook"));
        }
    }

    output.verbose(&format!("Writing {}", hook_path.display()));
    repo.install_hook(HOOK_NAME, &hook_script())?;

    output.success(&format!("Installed {HOOK_NAME} hook"));
    Ok(())
}
