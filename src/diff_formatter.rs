use crate::rewriter::{ChangeType, FileDiff};
use colored::*;
use std::io::IsTerminal;

pub struct DiffFormatter;

impl DiffFormatter {
    /// Auto-detect if we should use colors
    fn should_use_color() -> bool {
        // Check NO_COLOR env var (https://no-color.org/)
        if std::env::var("NO_COLOR").is_ok() {
            return false;
        }

        std::io::stdout().is_terminal()
    }

    /// Format file diff with context
    pub fn format_diff_with_context(diff: &FileDiff, context_size: usize) -> String {
        Self::render(diff, context_size, Self::should_use_color())
    }

    fn render(diff: &FileDiff, context_size: usize, use_color: bool) -> String {
        let mut output = String::new();

        if use_color {
            output.push_str(&format!("{}\n", diff.file_path.bold().cyan()));
        } else {
            output.push_str(&format!("{}\n", diff.file_path));
        }

        if diff.changes.is_empty() {
            output.push_str("No changes would be made.\n");
            return output;
        }

        for (line_num, content, change_type) in Self::filter_lines_with_context(&diff.all_lines, context_size) {
            if line_num == 0 && content == "..." {
                if use_color {
                    output.push_str(&format!("{}\n", "...".dimmed()));
                } else {
                    output.push_str("...\n");
                }
                continue;
            }

            let indicator = match change_type {
                ChangeType::Unchanged => "=",
                ChangeType::Added => "+",
                ChangeType::Deleted => "-",
            };

            if use_color {
                let colored_line = match change_type {
                    ChangeType::Unchanged => format!("L{}: {} {}\n", line_num, indicator.dimmed(), content.dimmed()),
                    ChangeType::Added => format!("L{}: {} {}\n", line_num, indicator.green().bold(), content.green().bold()),
                    ChangeType::Deleted => format!("L{}: {} {}\n", line_num, indicator.red().bold(), content.red()),
                };
                output.push_str(&colored_line);
            } else {
                output.push_str(&format!("L{}: {} {}\n", line_num, indicator, content));
            }
        }

        let calls = diff.rewritten_calls;
        let plural = if calls == 1 { "" } else { "s" };
        if use_color {
            output.push_str(&format!(
                "\nTotal: {} call{} rewritten to {}\n",
                calls.to_string().bold().white(),
                plural,
                "drawLineAndOpenModal".yellow()
            ));
        } else {
            output.push_str(&format!("\nTotal: {} call{} rewritten to drawLineAndOpenModal\n", calls, plural));
        }

        output
    }

    /// Filter lines to show only changed lines with context, grouping close changes
    fn filter_lines_with_context(
        lines: &[(usize, String, ChangeType)],
        context_size: usize
    ) -> Vec<(usize, String, ChangeType)> {
        if context_size == 0 {
            return lines.iter()
                .filter(|(_, _, ct)| *ct != ChangeType::Unchanged)
                .cloned()
                .collect();
        }

        let changed_indices: Vec<usize> = lines.iter()
            .enumerate()
            .filter(|(_, (_, _, ct))| *ct != ChangeType::Unchanged)
            .map(|(i, _)| i)
            .collect();

        let Some((&first, rest)) = changed_indices.split_first() else {
            return Vec::new();
        };

        // Two changes share a group if their context windows touch
        let group_threshold = context_size.saturating_mul(2).saturating_add(1);
        let mut groups: Vec<(usize, usize)> = vec![(first, first)];

        for &idx in rest {
            match groups.last_mut() {
                Some((_, end)) if idx - *end <= group_threshold => *end = idx,
                _ => groups.push((idx, idx)),
            }
        }

        let mut result = Vec::new();
        let mut last_included_end = None;

        for (group_start, group_end) in groups {
            let start = group_start.saturating_sub(context_size);
            let end = group_end.saturating_add(context_size).saturating_add(1).min(lines.len());

            if let Some(last_end) = last_included_end {
                if start > last_end {
                    result.push((0, "...".to_string(), ChangeType::Unchanged));
                }
            }

            result.extend(lines[start..end].iter().cloned());

            last_included_end = Some(end);
        }

        result
    }
}
