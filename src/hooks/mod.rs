//! Git hook workflows
//!
//! The pre-push hook tidies the Xcode project before anything leaves the machine:
//!
//! 1. `git add .`, then stash everything under a uniquely tagged label if the tree is dirty
//! 2. `synx --prune <project>` followed by `xunique <project>`
//! 3. commit whatever the tools changed with `--no-verify`
//! 4. find the tagged stash in `git stash list` and pop exactly that entry
//!
//! Tool failures are advisory and only logged. Git failures and a missing or
//! ambiguous stash abort the run and leave the stash in place.

mod error;
mod pre_push;

pub use error::HookError;
pub use pre_push::{COMMIT_MESSAGE, HookRunner, RunReport};

/// Prefix of every message the hook logs
pub(crate) const LOG_PREFIX: &str = "[pre-push] >";
