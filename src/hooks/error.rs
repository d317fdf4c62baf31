use std::process::ExitStatus;
use thiserror::Error;

/// Fatal hook failures that callers need to tell apart.
///
/// External tool failures never appear here; they are recorded in
/// [`crate::tools::ToolOutcome`] instead.
#[derive(Error, Debug)]
pub enum HookError {
    #[error("Stash not found with message \"{message}\"")]
    StashNotFound { message: String },

    #[error("More than one ({count}) stash found with message \"{message}\"")]
    AmbiguousStash { message: String, count: usize },

    #[error("`{command}` failed with {status}: {stderr}")]
    GitCommand {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Failed to run `{command}`")]
    GitSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

impl HookError {
    /// The hook's own stash went missing or became ambiguous
    pub fn is_consistency_violation(&self) -> bool {
        matches!(
            self,
            HookError::StashNotFound { .. } | HookError::AmbiguousStash { .. }
        )
    }
}
