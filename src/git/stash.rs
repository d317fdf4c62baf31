//! Temporary stash bookkeeping
//!
//! A stash is only addressable by `stash@{N}`, and `N` shifts whenever anything
//! else pushes or pops. The hook therefore labels its stash with a random tag
//! and finds it again by searching the raw `git stash list` text for that label.

use anyhow::{Context, Result};
use regex::Regex;
use uuid::Uuid;

/// Label prefix of every stash created by the hook
pub const STASH_MESSAGE_PREFIX: &str = "[pre-push] Temporary stash, do not delete.";

/// The stash pushed by a single hook run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StashRecord {
    tag_id: String,
    message: String,
}

impl StashRecord {
    /// Create a record with a fresh 128-bit tag
    pub fn new() -> Self {
        Self::with_tag(Uuid::new_v4().simple().to_string())
    }

    /// Create a record for a known tag
    pub fn with_tag(tag_id: impl Into<String>) -> Self {
        let tag_id = tag_id.into();
        let message = format!("{STASH_MESSAGE_PREFIX} <id: {tag_id}>");
        Self { tag_id, message }
    }

    pub fn tag_id(&self) -> &str {
        &self.tag_id
    }

    /// Label used for `git stash push -m`
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Default for StashRecord {
    fn default() -> Self {
        Self::new()
    }
}

/// One line of `git stash list` that carries a given label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StashEntry {
    /// `stash@{N}`
    pub reference: String,
    /// The full stash-list line
    pub line: String,
}

/// Find every entry in raw `git stash list` output whose line contains `label`
/// somewhere after its `stash@{N}` reference.
///
/// `label` is matched literally.
pub fn find_stash_entries(stash_list: &str, label: &str) -> Result<Vec<StashEntry>> {
    let pattern = format!(r"(stash@\{{[0-9]+\}}).*{}", regex::escape(label));
    let stash_regex = Regex::new(&pattern).context("Failed to build stash label pattern")?;

    let entries = stash_list
        .lines()
        .filter_map(|line| {
            stash_regex.captures(line).map(|captures| StashEntry {
                reference: captures[1].to_string(),
                line: line.to_string(),
            })
        })
        .collect();

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TAG: &str = "0123456789abcdef0123456789abcdef";

    fn label() -> String {
        StashRecord::with_tag(TAG).message().to_string()
    }

    #[test]
    fn test_record_message_embeds_tag() {
        let record = StashRecord::with_tag(TAG);
        assert_eq!(
            record.message(),
            "[pre-push] Temporary stash, do not delete. <id: 0123456789abcdef0123456789abcdef>"
        );
        assert_eq!(record.tag_id(), TAG);
    }

    #[test]
    fn test_fresh_records_have_unique_hex_tags() {
        let first = StashRecord::new();
        let second = StashRecord::new();

        assert_ne!(first.tag_id(), second.tag_id());
        assert_eq!(first.tag_id().len(), 32);
        assert!(first.tag_id().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_finds_single_entry_among_others() {
        let stash_list = format!(
            "stash@{{0}}: WIP on main: 1a2b3c4 unrelated work\n\
             stash@{{1}}: On main: {}\n\
             stash@{{2}}: On feature: something else\n",
            label()
        );

        let entries = find_stash_entries(&stash_list, &label()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].reference, "stash@{1}");
        assert!(entries[0].line.ends_with(&label()));
    }

    #[test]
    fn test_no_entries_when_label_absent() {
        let stash_list = "stash@{0}: WIP on main: 1a2b3c4 unrelated work\n";
        assert!(find_stash_entries(stash_list, &label()).unwrap().is_empty());
        assert!(find_stash_entries("", &label()).unwrap().is_empty());
    }

    #[test]
    fn test_reports_every_duplicate() {
        let stash_list = format!(
            "stash@{{0}}: On main: {label}\nstash@{{3}}: On main: {label}",
            label = label()
        );

        let references: Vec<_> = find_stash_entries(&stash_list, &label())
            .unwrap()
            .into_iter()
            .map(|entry| entry.reference)
            .collect();
        assert_eq!(references, ["stash@{0}", "stash@{3}"]);
    }

    #[test]
    fn test_label_is_matched_literally() {
        // Regex metacharacters in the label must not act as wildcards
        let stash_list = "stash@{0}: On main: [pre-push] Temporary stash, do not deleteX <id: abc>";
        let label = "[pre-push] Temporary stash, do not delete. <id: abc>";
        assert!(find_stash_entries(stash_list, label).unwrap().is_empty());
    }

    #[test]
    fn test_other_tags_do_not_match() {
        let other = StashRecord::with_tag("ffffffffffffffffffffffffffffffff");
        let stash_list = format!("stash@{{0}}: On main: {}", other.message());
        assert!(find_stash_entries(&stash_list, &label()).unwrap().is_empty());
    }

    #[test]
    fn test_label_without_reference_is_ignored() {
        let stash_list = format!("garbage line: {}", label());
        assert!(find_stash_entries(&stash_list, &label()).unwrap().is_empty());
    }
}
