//! # prepush-tidy - Xcode project hygiene on every push
//!
//! A git pre-push hook that keeps an Xcode project file tidy. Before each push it
//! parks any uncommitted work in a tagged stash, runs `synx` and `xunique` against
//! the project, commits whatever those tools changed, and puts the parked work back.
//!
//! ## Quick Start
//!
//! ```bash
//! # Install the hook in the current repository
//! prepush-tidy install
//!
//! # Run the workflow by hand
//! prepush-tidy run -v
//! ```

pub mod cli;
pub mod config;
pub mod git;
pub mod hooks;
pub mod tools;

pub use cli::{Cli, Output};
pub use config::HookConfig;
pub use hooks::{HookError, HookRunner, RunReport};

/// Result type alias for prepush-tidy operations
pub type Result<T> = anyhow::Result<T>;
