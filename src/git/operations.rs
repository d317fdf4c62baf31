use anyhow::Result;
use std::path::Path;
use std::process::Command;

use crate::hooks::HookError;

/// Run a critical git command in `workdir` and return its stdout.
///
/// A spawn failure or non-zero exit becomes [`HookError::GitSpawn`] or
/// [`HookError::GitCommand`]. Output lines go to the `git` log target.
pub fn run_critical(workdir: &Path, args: &[&str]) -> Result<String> {
    let command_line = format!("git {}", args.join(" "));
    tracing::debug!(" >>> {command_line}");

    let output = Command::new("git")
        .args(args)
        .current_dir(workdir)
        .output()
        .map_err(|source| HookError::GitSpawn {
            command: command_line.clone(),
            source,
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr);

    for line in stdout.lines().chain(stderr.lines()) {
        tracing::debug!(target: "git", "{line}");
    }

    if !output.status.success() {
        return Err(HookError::GitCommand {
            command: command_line,
            status: output.status,
            stderr: stderr.trim().to_string(),
        }
        .into());
    }

    Ok(stdout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_failing_git_command_is_critical() {
        // Not a repository, so `git stash list` must fail
        let temp_dir = TempDir::new().unwrap();
        let err = run_critical(temp_dir.path(), &["stash", "list"]).unwrap_err();

        match err.downcast_ref::<HookError>() {
            Some(HookError::GitCommand { command, .. }) => assert_eq!(command, "git stash list"),
            Some(HookError::GitSpawn { .. }) => {} // git itself is unavailable
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_successful_git_command_returns_stdout() {
        let temp_dir = TempDir::new().unwrap();
        match run_critical(temp_dir.path(), &["--version"]) {
            Ok(stdout) => assert!(stdout.starts_with("git version")),
            Err(err) => assert!(matches!(
                err.downcast_ref::<HookError>(),
                Some(HookError::GitSpawn { .. })
            )),
        }
    }
}
