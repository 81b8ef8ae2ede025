//! The drawLine -> drawLineAndOpenModal migration
//!
//! The pattern and replacement are held as data so the file handling in
//! `rewriter` never has to know what is being rewritten.

use anyhow::{Context, Result};
use regex::{Captures, Regex};

/// Default target of the migration, relative to the project root
pub const DEFAULT_TARGET: &str = "tests/e2e/line-properties-modal.spec.ts";

const INDENT: &str = "      ";
const OLD_COMMENT: &str = "// Draw a line (modal opens automatically)";
const NEW_COMMENT: &str = "// Draw a line and open modal";
const ENABLE_DRAW_TOOL: &str =
    "await page.getByRole('button', { name: 'Enable Draw tool' }).click();";

fn draw_line_pattern() -> String {
    format!(
        r"{indent}{comment}(?P<eol1>\r?\n){indent}{tool}(?P<eol2>\r?\n){indent}await drawLine\(page, (?P<x1>\d+), (?P<y1>\d+), (?P<x2>\d+), (?P<y2>\d+)\);",
        indent = INDENT,
        comment = regex::escape(OLD_COMMENT),
        tool = regex::escape(ENABLE_DRAW_TOOL),
    )
}

/// A single rewritten call site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedCall {
    /// 1-based line of the comment that opens the snippet
    pub line_number: usize,
    /// x1, y1, x2, y2 exactly as written in the source
    pub args: [String; 4],
}

/// Result of running a migration over a piece of text
#[derive(Debug, Clone)]
pub struct RewriteOutcome {
    pub content: String,
    pub calls: Vec<MatchedCall>,
}

impl RewriteOutcome {
    pub fn changed(&self) -> bool {
        !self.calls.is_empty()
    }
}

/// A fixed pattern plus the template that replaces it
#[derive(Debug, Clone)]
pub struct Migration {
    name: &'static str,
    pattern: Regex,
}

impl Migration {
    /// `drawLine(page, ...)` after the auto-open comment becomes
    /// `drawLineAndOpenModal(page, ...)`
    pub fn draw_line_and_open_modal() -> Result<Self> {
        let pattern = draw_line_pattern();
        let pattern = Regex::new(&pattern)
            .with_context(|| format!("Invalid regex pattern: {}", pattern))?;

        Ok(Self {
            name: "draw-line-and-open-modal",
            pattern,
        })
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// Rewrite every non-overlapping occurrence in `text`
    pub fn apply(&self, text: &str) -> RewriteOutcome {
        let mut calls = Vec::new();
        let mut line_number = 1;
        let mut scanned = 0;

        for caps in self.pattern.captures_iter(text) {
            let whole = caps.get(0).map_or(0..0, |m| m.range());
            line_number += text[scanned..whole.start].matches('\n').count();
            scanned = whole.start;

            calls.push(MatchedCall {
                line_number,
                args: [
                    caps["x1"].to_string(),
                    caps["y1"].to_string(),
                    caps["x2"].to_string(),
                    caps["y2"].to_string(),
                ],
            });
        }

        let content = if calls.is_empty() {
            text.to_string()
        } else {
            self.pattern
                .replace_all(text, |caps: &Captures| Self::render(caps))
                .into_owned()
        };

        RewriteOutcome { content, calls }
    }

    fn render(caps: &Captures) -> String {
        format!(
            "{INDENT}{NEW_COMMENT}{eol1}{INDENT}{ENABLE_DRAW_TOOL}{eol2}{INDENT}await drawLineAndOpenModal(page, {x1}, {y1}, {x2}, {y2});",
            eol1 = &caps["eol1"],
            eol2 = &caps["eol2"],
            x1 = &caps["x1"],
            y1 = &caps["y1"],
            x2 = &caps["x2"],
            y2 = &caps["y2"],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snippet(args: &str) -> String {
        format!(
            "      // Draw a line (modal opens automatically)\n      await page.getByRole('button', {{ name: 'Enable Draw tool' }}).click();\n      await drawLine(page, {});\n",
            args
        )
    }

    #[test]
    fn test_rewrites_single_snippet() {
        let migration = Migration::draw_line_and_open_modal().unwrap();
        let outcome = migration.apply(&snippet("100, 200, 300, 400"));

        assert_eq!(
            outcome.content,
            "      // Draw a line and open modal\n      await page.getByRole('button', { name: 'Enable Draw tool' }).click();\n      await drawLineAndOpenModal(page, 100, 200, 300, 400);\n"
        );
        assert_eq!(outcome.calls.len(), 1);
        assert_eq!(outcome.calls[0].args, ["100", "200", "300", "400"].map(String::from));
        assert_eq!(outcome.calls[0].line_number, 1);
    }

    #[test]
    fn test_three_arguments_do_not_match() {
        let migration = Migration::draw_line_and_open_modal().unwrap();
        let input = snippet("100, 200, 300");
        let outcome = migration.apply(&input);
        assert!(!outcome.changed());
        assert_eq!(outcome.content, input);
    }

    #[test]
    fn test_five_arguments_do_not_match() {
        let migration = Migration::draw_line_and_open_modal().unwrap();
        let input = snippet("100, 200, 300, 400, 500");
        let outcome = migration.apply(&input);
        assert!(!outcome.changed());
        assert_eq!(outcome.content, input);
    }

    #[test]
    fn test_non_numeric_argument_does_not_match() {
        let migration = Migration::draw_line_and_open_modal().unwrap();
        let input = snippet("x, 200, 300, 400");
        assert!(!migration.apply(&input).changed());
    }

    #[test]
    fn test_line_numbers_of_multiple_matches() {
        let migration = Migration::draw_line_and_open_modal().unwrap();
        let input = format!(
            "test('a', async () => {{\n{}}});\n\ntest('b', async () => {{\n{}}});\n",
            snippet("1, 2, 3, 4"),
            snippet("5, 6, 7, 8")
        );
        let outcome = migration.apply(&input);

        let lines: Vec<usize> = outcome.calls.iter().map(|c| c.line_number).collect();
        assert_eq!(lines, vec![2, 8]);
        assert_eq!(outcome.content.matches("drawLineAndOpenModal").count(), 2);
        assert!(outcome.content.contains("drawLineAndOpenModal(page, 5, 6, 7, 8);"));
    }

    #[test]
    fn test_crlf_line_endings_preserved() {
        let migration = Migration::draw_line_and_open_modal().unwrap();
        let input = snippet("10, 20, 30, 40").replace('\n', "\r\n");
        let outcome = migration.apply(&input);

        assert!(outcome.changed());
        assert_eq!(outcome.content.matches("\r\n").count(), 3);
        assert!(!outcome.content.replace("\r\n", "").contains('\n'));
    }

    #[test]
    fn test_different_indentation_does_not_match() {
        let migration = Migration::draw_line_and_open_modal().unwrap();
        let input = snippet("1, 2, 3, 4").replace("      ", "    ");
        assert!(!migration.apply(&input).changed());
    }

    #[test]
    fn test_second_pass_is_noop() {
        let migration = Migration::draw_line_and_open_modal().unwrap();
        let once = migration.apply(&snippet("100, 100, 300, 100"));
        let twice = migration.apply(&once.content);
        assert!(!twice.changed());
        assert_eq!(twice.content, once.content);
    }

    #[test]
    fn test_name() {
        assert_eq!(Migration::draw_line_and_open_modal().unwrap().name(), "draw-line-and-open-modal");
    }
}
