use anyhow::Result;
use clap::Args;

use super::{HOOK_MARKER, HOOK_NAME};
use crate::cli::Output;
use crate::git::GitRepo;

#[derive(Args, Default)]
pub struct UninstallArgs {}

pub async fn execute(_args: UninstallArgs, output: &Output) -> Result<()> {
    let repo = GitRepo::discover()?;
    let hook_path = repo.hook_path(HOOK_NAME);

    if !hook_path.exists() {
        output.info(&format!("No {HOOK_NAME} hook installed"));
        return Ok(());
    }

    let content = std::fs::read_to_string(&hook_path).unwrap_or_default();
    if !content.contains(HOOK_MARKER) {
        output.warning(&format!(
            "{} was not installed by prepush-tidy, leaving it alone",
            hook_path.display()
        ));
        return Ok(());
    }

    repo.remove_hook(HOOK_NAME)?;
    output.success(&format!("Removed {HOOK_NAME} hook"));
    Ok(())
}
