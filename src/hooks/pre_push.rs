//! Pre-push hook implementation
//!
//! Parks local work in a tagged stash, runs the hygiene tools, commits what they
//! changed and restores the parked work.

use anyhow::Result;
use tracing::{debug, error, info};

use super::{HookError, LOG_PREFIX};
use crate::git::{SourceControl, StashRecord, find_stash_entries};
use crate::tools::{HygieneTool, ToolOutcome, ToolRunner};

/// Message of the commit holding tool changes
pub const COMMIT_MESSAGE: &str = "[pre-push] Run synx and xunique";

/// Summary of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Stash pushed before the tools ran and popped afterwards
    pub stash: Option<StashRecord>,
    /// Whether tool changes were committed
    pub committed: bool,
    /// One outcome per tool, in execution order
    pub tool_outcomes: Vec<ToolOutcome>,
}

/// Runs the pre-push workflow against a repository and a set of tools
pub struct HookRunner<'a, G, T> {
    git: &'a G,
    tools: &'a T,
    project: String,
}

impl<'a, G: SourceControl, T: ToolRunner> HookRunner<'a, G, T> {
    pub fn new(git: &'a G, tools: &'a T, project: impl Into<String>) -> Self {
        Self {
            git,
            tools,
            project: project.into(),
        }
    }

    /// Execute the whole workflow.
    ///
    /// On failure after the stash was pushed, the stash stays in place and its
    /// label is logged so the work can be recovered by hand.
    pub async fn run(&self) -> Result<RunReport> {
        let stash = self.stash_changes()?;

        let result = self.tidy_and_restore(stash.as_ref()).await;
        if let (Err(_), Some(record)) = (&result, &stash) {
            error!(
                "{LOG_PREFIX} Local changes remain in the stash \"{}\"; recover them with `git stash list` and `git stash pop`",
                record.message()
            );
        }
        let (tool_outcomes, committed) = result?;

        Ok(RunReport {
            stash,
            committed,
            tool_outcomes,
        })
    }

    async fn tidy_and_restore(&self, stash: Option<&StashRecord>) -> Result<(Vec<ToolOutcome>, bool)> {
        let tool_outcomes = self.run_tools().await;
        let committed = self.commit_tool_changes()?;

        if let Some(record) = stash {
            self.restore_stash(record)?;
        }

        Ok((tool_outcomes, committed))
    }

    /// Stage everything and stash it if the tree is dirty
    fn stash_changes(&self) -> Result<Option<StashRecord>> {
        self.git.stage_all()?;

        if !self.git.is_dirty()? {
            return Ok(None);
        }

        info!("{LOG_PREFIX} Saving all local changes in a temporary stash");
        let record = StashRecord::new();
        debug!("{LOG_PREFIX} Message for temporary stash: {}", record.message());

        self.git.stash_push(record.message())?;
        Ok(Some(record))
    }

    /// Run every tool in order, regardless of how the previous one went
    async fn run_tools(&self) -> Vec<ToolOutcome> {
        let mut outcomes = Vec::with_capacity(HygieneTool::ALL.len());

        for tool in HygieneTool::ALL {
            info!("{LOG_PREFIX} Running {tool}");
            outcomes.push(self.tools.run(tool, &self.project).await);
        }

        outcomes
    }

    /// Commit whatever the tools changed; returns whether a commit was made
    fn commit_tool_changes(&self) -> Result<bool> {
        if !self.git.is_dirty()? {
            info!("{LOG_PREFIX} No changes were made by hook");
            return Ok(false);
        }

        info!("{LOG_PREFIX} Adding changes made by hook");
        self.git.stage_all()?;

        info!("{LOG_PREFIX} Committing changes made by hook");
        self.git.commit_no_verify(COMMIT_MESSAGE)?;
        Ok(true)
    }

    /// Find the run's own stash by label and pop exactly that entry
    fn restore_stash(&self, record: &StashRecord) -> Result<()> {
        info!("{LOG_PREFIX} Popping temporary stash");

        let stash_list = self.git.stash_list()?;
        debug!("{LOG_PREFIX} All stashes: \n{stash_list}");

        let matching = find_stash_entries(&stash_list, record.message())?;
        debug!("{LOG_PREFIX} Found matching stashes: {matching:?}");

        let entry = match matching.as_slice() {
            [entry] => entry,
            [] => {
                return Err(HookError::StashNotFound {
                    message: record.message().to_string(),
                }
                .into());
            }
            _ => {
                return Err(HookError::AmbiguousStash {
                    message: record.message().to_string(),
                    count: matching.len(),
                }
                .into());
            }
        };

        debug!("{LOG_PREFIX} Popping \"{}\"", entry.reference);
        self.git.stash_pop(&entry.reference)
    }
}
