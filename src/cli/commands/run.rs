use anyhow::Result;
use clap::Args;
use std::path::Path;

use crate::config::HookConfig;
use crate::git::GitRepo;
use crate::hooks::{HookRunner, LOG_PREFIX};
use crate::tools::ProcessToolRunner;

#[derive(Args, Default)]
pub struct RunArgs {
    /// Name of the remote being pushed to (passed by git)
    pub remote: Option<String>,

    /// URL of the remote being pushed to (passed by git)
    pub url: Option<String>,
}

pub async fn execute(args: RunArgs, config_path: Option<&Path>) -> Result<()> {
    let repo = GitRepo::discover()?;
    let config = HookConfig::load(config_path, repo.workdir())?;

    if let (Some(remote), Some(url)) = (&args.remote, &args.url) {
        tracing::debug!("{LOG_PREFIX} Pushing to {remote} ({url})");
    }
    tracing::debug!("{LOG_PREFIX} Using {config:?}");

    let tools = ProcessToolRunner::new(repo.workdir(), config.tool_timeout());
    let report = HookRunner::new(&repo, &tools, config.project).run().await?;

    let failed_tools = report
        .tool_outcomes
        .iter()
        .filter(|outcome| !outcome.succeeded())
        .count();
    tracing::debug!(
        "{LOG_PREFIX} Done (stashed: {}, committed: {}, tool failures: {failed_tools})",
        report.stash.is_some(),
        report.committed
    );

    Ok(())
}
