//! Applies a migration to a file on disk, or previews it as a line diff

use crate::error_helpers;
use crate::migration::{Migration, RewriteOutcome};
use anyhow::Result;
use similar::{ChangeTag, TextDiff};
use std::fs;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub enum ChangeType {
    Unchanged,    // Line not modified
    Added,        // Line present only after the rewrite
    Deleted,      // Line present only before the rewrite
}

#[derive(Debug, Clone)]
pub struct LineChange {
    pub line_number: usize,
    pub change_type: ChangeType,
    pub content: String,
}

#[derive(Debug)]
pub struct FileDiff {
    pub file_path: String,
    pub changes: Vec<LineChange>,
    pub all_lines: Vec<(usize, String, ChangeType)>,  // (line_number, content, change_type)
    pub rewritten_calls: usize,
}

/// Runs a [`Migration`] against files on disk
pub struct Rewriter {
    migration: Migration,
}

impl Rewriter {
    pub fn new(migration: Migration) -> Self {
        Self { migration }
    }

    pub fn migration(&self) -> &Migration {
        &self.migration
    }

    pub fn rewrite_str(&self, text: &str) -> RewriteOutcome {
        self.migration.apply(text)
    }

    /// Compute the rewrite for `file_path` without touching the file
    pub fn preview(&self, file_path: &Path) -> Result<FileDiff> {
        let content = read_target(file_path)?;
        let outcome = self.rewrite_str(&content);

        let all_lines = generate_line_diff(&content, &outcome.content);
        let changes = all_lines
            .iter()
            .filter(|(_, _, change_type)| *change_type != ChangeType::Unchanged)
            .map(|(line_number, content, change_type)| LineChange {
                line_number: *line_number,
                change_type: change_type.clone(),
                content: content.clone(),
            })
            .collect();

        Ok(FileDiff {
            file_path: file_path.display().to_string(),
            changes,
            all_lines,
            rewritten_calls: outcome.calls.len(),
        })
    }

    /// Read, rewrite and overwrite `file_path` in one pass.
    ///
    /// The file is written back even when nothing matched. There is no
    /// backup and no atomic rename.
    pub fn apply_to_file(&self, file_path: &Path) -> Result<RewriteOutcome> {
        let content = read_target(file_path)?;
        let outcome = self.rewrite_str(&content);

        tracing::info!(
            file = %file_path.display(),
            migration = self.migration.name(),
            matches = outcome.calls.len(),
            "rewrite pass complete"
        );
        for call in &outcome.calls {
            tracing::debug!(
                line = call.line_number,
                args = %call.args.join(", "),
                "rewrote drawLine call"
            );
        }

        fs::write(file_path, &outcome.content).map_err(|e| {
            let message = if error_helpers::is_permission_denied(&e) {
                error_helpers::permission_error(file_path, "writing")
            } else {
                format!("Failed to write file: {}", file_path.display())
            };
            anyhow::Error::new(e).context(message)
        })?;

        Ok(outcome)
    }
}

fn read_target(file_path: &Path) -> Result<String> {
    fs::read_to_string(file_path).map_err(|e| read_error(file_path, e))
}

fn read_error(file_path: &Path, err: io::Error) -> anyhow::Error {
    let message = if error_helpers::is_not_found(&err) {
        error_helpers::not_found_error(file_path, "reading the migration target")
    } else if error_helpers::is_permission_denied(&err) {
        error_helpers::permission_error(file_path, "reading")
    } else {
        format!("Failed to read file: {}", file_path.display())
    };
    anyhow::Error::new(err).context(message)
}

/// Line diff between the original and rewritten text.
///
/// Added lines are numbered in the new text, everything else in the old.
fn generate_line_diff(original: &str, modified: &str) -> Vec<(usize, String, ChangeType)> {
    let diff = TextDiff::from_lines(original, modified);

    diff.iter_all_changes()
        .map(|change| {
            let (line_number, change_type) = match change.tag() {
                ChangeTag::Equal => (change.old_index(), ChangeType::Unchanged),
                ChangeTag::Delete => (change.old_index(), ChangeType::Deleted),
                ChangeTag::Insert => (change.new_index(), ChangeType::Added),
            };
            let content = change.value().trim_end_matches(['\r', '\n']).to_string();
            (line_number.map_or(0, |i| i + 1), content, change_type)
        })
        .collect()
}
