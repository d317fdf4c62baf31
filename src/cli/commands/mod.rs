//! Command implementations for the prepush-tidy CLI

pub mod install;
pub mod run;
pub mod uninstall;

/// Hook git calls before pushing
pub const HOOK_NAME: &str = "pre-push";

/// Marker identifying a hook script written by `install`
pub const HOOK_MARKER: &str = "prepush-tidy run";

/// Script installed as `.git/hooks/pre-push`
pub fn hook_script() -> String {
    format!("#!/bin/sh\n# Installed by prepush-tidy\nexec {HOOK_MARKER} \"$@\"\n")
}
