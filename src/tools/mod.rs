//! External project-hygiene tools
//!
//! `synx` and `xunique` are advisory: whatever they do, including failing to
//! start, is captured in a [`ToolOutcome`] and logged, never returned as an error.

use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use crate::hooks::LOG_PREFIX;


/// The two tools the hook runs, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HygieneTool {
    /// Reorganizes the project file to mirror the folder structure
    Synx,
    /// Makes object identifiers in the project file deterministic
    Xunique,
}

impl HygieneTool {
    /// Execution order; xunique expects synx to have run first
    pub const ALL: [HygieneTool; 2] = [HygieneTool::Synx, HygieneTool::Xunique];

    /// Executable name looked up on `PATH`
    pub fn program(self) -> &'static str {
        match self {
            HygieneTool::Synx => "synx",
            HygieneTool::Xunique => "xunique",
        }
    }

    pub fn args(self, project: &str) -> Vec<String> {
        match self {
            HygieneTool::Synx => vec!["--prune".to_string(), project.to_string()],
            HygieneTool::Xunique => vec![project.to_string()],
        }
    }

    pub fn command_line(self, project: &str) -> String {
        let mut parts = vec![self.program().to_string()];
        parts.extend(self.args(project));
        parts.join(" ")
    }
}

impl fmt::Display for HygieneTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

/// What happened when a tool was run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutcome {
    pub tool: HygieneTool,
    /// `None` when the process never started, was killed, or timed out
    pub exit_code: Option<i32>,
    /// Captured stdout followed by stderr
    pub output: String,
    pub timed_out: bool,
}

impl ToolOutcome {
    /// Outcome for a tool that exited on its own
    pub fn exited(tool: HygieneTool, exit_code: Option<i32>, output: String) -> Self {
        Self {
            tool,
            exit_code,
            output,
            timed_out: false,
        }
    }

    /// Outcome for a tool that could not be started
    pub fn not_run(tool: HygieneTool, reason: String) -> Self {
        Self::exited(tool, None, reason)
    }

    pub fn succeeded(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs hygiene tools for the hook.
///
/// Implementations must not fail; every problem is folded into the outcome.
pub trait ToolRunner {
    fn run(&self, tool: HygieneTool, project: &str) -> impl Future<Output = ToolOutcome>;
}

/// Runs the real executables as child processes
pub struct ProcessToolRunner {
    workdir: PathBuf,
    timeout: Option<Duration>,
}

impl ProcessToolRunner {
    pub fn new(workdir: impl Into<PathBuf>, timeout: Option<Duration>) -> Self {
        Self {
            workdir: workdir.into(),
            timeout,
        }
    }
}

impl ToolRunner for ProcessToolRunner {
    async fn run(&self, tool: HygieneTool, project: &str) -> ToolOutcome {
        run_advisory(tool, project, &self.workdir, self.timeout).await
    }
}

/// Run `tool` against `project` in `workdir`, never failing.
///
/// Output is logged line by line at debug level; the exit status only
/// influences what gets logged.
pub async fn run_advisory(
    tool: HygieneTool,
    project: &str,
    workdir: &Path,
    timeout: Option<Duration>,
) -> ToolOutcome {
    run_program(tool, tool.program(), &tool.args(project), workdir, timeout).await
}

async fn run_program(
    tool: HygieneTool,
    program: &str,
    args: &[String],
    workdir: &Path,
    timeout: Option<Duration>,
) -> ToolOutcome {
    tracing::debug!(" >>> {program} {}", args.join(" "));

    let program_path = match which::which(program) {
        Ok(path) => path,
        Err(err) => {
            tracing::warn!("{LOG_PREFIX} {program} not found on PATH ({err}), skipping");
            return ToolOutcome::not_run(tool, format!("{program} not found: {err}"));
        }
    };

    let mut command = Command::new(&program_path);
    command
        .args(args)
        .current_dir(workdir)
        .stdin(Stdio::null())
        .kill_on_drop(true);

    let result = match timeout {
        Some(limit) => match tokio::time::timeout(limit, command.output()).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!("{LOG_PREFIX} {tool} timed out after {limit:?}, continuing");
                return ToolOutcome {
                    tool,
                    exit_code: None,
                    output: String::new(),
                    timed_out: true,
                };
            }
        },
        None => command.output().await,
    };

    let output = match result {
        Ok(output) => output,
        Err(err) => {
            tracing::warn!("{LOG_PREFIX} Failed to start {tool} ({err}), continuing");
            return ToolOutcome::not_run(tool, format!("failed to start {tool}: {err}"));
        }
    };

    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));

    for line in text.lines() {
        tracing::debug!("{line}");
    }

    if !output.status.success() {
        tracing::warn!("{LOG_PREFIX} {tool} exited with {}, continuing", output.status);
    }

    ToolOutcome::exited(tool, output.status.code(), text)
}
