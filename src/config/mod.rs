//! Configuration management for prepush-tidy
//!
//! Settings are layered with figment: embedded defaults, then the repository's
//! `prepush-tidy.toml` (or an explicit `--config` file), then `PREPUSH_TIDY_*`
//! environment variables. With nothing configured the hook targets
//! `PracticeRoom.xcodeproj` and waits on the tools indefinitely.

use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[cfg(test)]
mod tests;

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

/// Repository-level config file name
pub const REPO_CONFIG_FILE: &str = "prepush-tidy.toml";

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "PREPUSH_TIDY_";

/// Settings for a hook run
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HookConfig {
    /// Xcode project handed to both tools
    pub project: String,

    /// Per-tool timeout in seconds, `0` disables it
    pub tool_timeout_secs: u64,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            project: "PracticeRoom.xcodeproj".to_string(),
            tool_timeout_secs: 0,
        }
    }
}

impl HookConfig {
    /// Load configuration for the repository rooted at `workdir`.
    ///
    /// A `custom_config` replaces the repository file; a missing file at either
    /// location is not an error.
    pub fn load(custom_config: Option<&Path>, workdir: &Path) -> Result<Self> {
        Self::figment(custom_config, workdir)
            .extract()
            .context("Failed to load prepush-tidy configuration")
    }

    /// Build the layered figment without extracting it
    pub fn figment(custom_config: Option<&Path>, workdir: &Path) -> Figment {
        let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG));

        figment = match custom_config {
            Some(path) => figment.merge(Toml::file(path)),
            None => figment.merge(Toml::file(workdir.join(REPO_CONFIG_FILE))),
        };

        // Environment variables always have highest priority
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Timeout applied to each tool, if any
    pub fn tool_timeout(&self) -> Option<Duration> {
        (self.tool_timeout_secs > 0).then(|| Duration::from_secs(self.tool_timeout_secs))
    }
}
