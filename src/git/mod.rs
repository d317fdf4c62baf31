//! Git integration layer for prepush-tidy
//!
//! Reads go through libgit2 (`git2`), writes go through the `git` CLI so that
//! stash and commit behave exactly as they do for the user at a terminal.
//! [`SourceControl`] is the seam the hook workflow is written against.

pub mod operations;
pub mod stash;

use anyhow::{Context, Result};
use git2::{Repository, StatusOptions};
use std::path::{Path, PathBuf};

pub use stash::{StashEntry, StashRecord, find_stash_entries};

/// Source-control commands the pre-push workflow depends on.
///
/// Every method is a critical operation: an error aborts the run.
pub trait SourceControl {
    /// Stage every path in the working tree (`git add .`)
    fn stage_all(&self) -> Result<()>;

    /// Whether the index or working tree differs from HEAD
    fn is_dirty(&self) -> Result<bool>;

    /// Push a stash that includes untracked files, labelled `message`
    fn stash_push(&self, message: &str) -> Result<()>;

    /// Raw `git stash list` output
    fn stash_list(&self) -> Result<String>;

    /// Pop the stash at `reference` (`stash@{N}`)
    fn stash_pop(&self, reference: &str) -> Result<()>;

    /// Commit the index with `message`, skipping commit hooks
    fn commit_no_verify(&self, message: &str) -> Result<()>;
}

pub struct GitRepo {
    repo: Repository,
    workdir: PathBuf,
}

impl GitRepo {
    /// Open the repository git runs the hook for.
    ///
    /// Honours `GIT_DIR` like the `git` CLI does, otherwise searches upwards
    /// from the current directory.
    pub fn discover() -> Result<Self> {
        let repo = Repository::open_from_env().context("No Git repository found")?;
        Self::from_repository(repo)
    }

    fn from_repository(repo: Repository) -> Result<Self> {
        let workdir = repo
            .workdir()
            .context("Repository has no working directory")?
            .to_path_buf();

        Ok(GitRepo { repo, workdir })
    }

    /// Root of the working tree
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// The `.git` directory
    pub fn git_dir(&self) -> &Path {
        self.repo.path()
    }

    /// Path of a hook script inside `.git/hooks`
    pub fn hook_path(&self, hook_name: &str) -> PathBuf {
        self.git_dir().join("hooks").join(hook_name)
    }

    /// Install a git hook
    pub fn install_hook(&self, hook_name: &str, hook_content: &str) -> Result<()> {
        let hook_path = self.hook_path(hook_name);
        let hooks_dir = hook_path
            .parent()
            .context("Hook path has no parent directory")?;

        std::fs::create_dir_all(hooks_dir).context("Failed to create hooks directory")?;
        std::fs::write(&hook_path, hook_content).context("Failed to write hook file")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&hook_path)
                .context("Failed to get hook file metadata")?
                .permissions();
            perms.set_mode(0o755);
            std::fs::set_permissions(&hook_path, perms)
                .context("Failed to set hook file permissions")?;
        }

        Ok(())
    }

    /// Remove a git hook
    pub fn remove_hook(&self, hook_name: &str) -> Result<()> {
        let hook_path = self.hook_path(hook_name);

        if hook_path.exists() {
            std::fs::remove_file(&hook_path).context("Failed to remove hook file")?;
        }

        Ok(())
    }
}

impl SourceControl for GitRepo {
    fn stage_all(&self) -> Result<()> {
        operations::run_critical(&self.workdir, &["add", "."]).map(drop)
    }

    fn is_dirty(&self) -> Result<bool> {
        // Ignored files never count; untracked ones do, so tool-created files get committed
        let mut opts = StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);

        let statuses = self
            .repo
            .statuses(Some(&mut opts))
            .context("Failed to get repository status")?;

        Ok(!statuses.is_empty())
    }

    fn stash_push(&self, message: &str) -> Result<()> {
        operations::run_critical(&self.workdir, &["stash", "push", "-u", "-m", message]).map(drop)
    }

    fn stash_list(&self) -> Result<String> {
        operations::run_critical(&self.workdir, &["stash", "list"])
    }

    fn stash_pop(&self, reference: &str) -> Result<()> {
        operations::run_critical(&self.workdir, &["stash", "pop", reference]).map(drop)
    }

    fn commit_no_verify(&self, message: &str) -> Result<()> {
        operations::run_critical(&self.workdir, &["commit", "--no-verify", "-m", message]).map(drop)
    }
}
