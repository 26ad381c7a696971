//! Structured documentation block: generated text ⇄ rendered `/** */` comment.

use crate::tags::LF;

/// Content lines of a doc block, without `*` markers. Line 0 is the summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentationBlock {
    pub lines: Vec<String>,
}

/// Strip a leading `*` and at most one space after it.
fn strip_marker(line: &str) -> &str {
    match line.strip_prefix('*') {
        Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
        None => line,
    }
}

impl DocumentationBlock {
    /// Parse skeleton text as produced by a generator (`* ...` per line).
    pub fn parse_generated(text: &str) -> Self {
        Self {
            lines: text.lines().map(|l| strip_marker(l).to_string()).collect(),
        }
    }

    /// Read a rendered comment (`/** ... */`) back into content lines.
    ///
    /// Text sharing a line with `/**` or `*/` only counts when it is not blank.
    pub fn parse_comment(comment: &str) -> Self {
        let inner = comment.trim();
        let inner = inner.strip_prefix("/**").unwrap_or(inner);
        let inner = inner.strip_suffix("*/").unwrap_or(inner);

        let raw: Vec<&str> = inner.split('\n').collect();
        let last = raw.len().saturating_sub(1);
        let mut lines = Vec::new();
        for (i, line) in raw.iter().copied().enumerate() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            let is_edge = i == 0 || i == last;
            if is_edge && line.trim().is_empty() {
                continue;
            }
            lines.push(strip_marker(line.trim_start()).to_string());
        }
        Self { lines }
    }

    pub fn summary(&self) -> Option<&str> {
        self.lines.first().map(String::as_str)
    }

    /// Back to generator form: `* {line}` per content line.
    pub fn to_generated(&self) -> String {
        self.lines
            .iter()
            .map(|l| format!("* {}", l))
            .collect::<Vec<_>>()
            .join(LF)
    }

    /// Render as a comment whose `/**` sits after `indent`.
    ///
    /// Lines with no content render as a bare `*`; trailing blanks are
    /// stripped the way a reformat pass would.
    pub fn render(&self, indent: &str) -> String {
        let mut out = String::from("/**");
        for line in &self.lines {
            out.push_str(LF);
            out.push_str(indent);
            if line.is_empty() {
                out.push_str(" *");
            } else {
                out.push_str(" * ");
                out.push_str(line);
            }
        }
        out.push_str(LF);
        out.push_str(indent);
        out.push_str(" */");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_generated_strips_markers() {
        let block = DocumentationBlock::parse_generated("* Calculate total\n* @param a\n* @return");
        assert_eq!(block.lines, ["Calculate total", "@param a", "@return"]);
        assert_eq!(block.summary(), Some("Calculate total"));
    }

    #[test]
    fn render_with_indent() {
        let block = DocumentationBlock::parse_generated("* Reset\n* @param force");
        assert_eq!(
            block.render("    "),
            "/**\n     * Reset\n     * @param force\n     */"
        );
    }

    #[test]
    fn render_empty_summary_as_bare_star() {
        let block = DocumentationBlock::parse_generated("* ");
        assert_eq!(block.lines, [""]);
        assert_eq!(block.render(""), "/**\n *\n */");
    }

    #[test]
    fn parse_comment_multiline() {
        let block =
            DocumentationBlock::parse_comment("/**\n     * Get user name\n     * @return\n     */");
        assert_eq!(block.lines, ["Get user name", "@return"]);
    }

    #[test]
    fn parse_comment_single_line() {
        let block = DocumentationBlock::parse_comment("/** Short form */");
        assert_eq!(block.lines, ["Short form "]);
    }

    #[test]
    fn parse_comment_bare_star_line() {
        let block = DocumentationBlock::parse_comment("/**\n *\n */");
        assert_eq!(block.lines, [""]);
        assert_eq!(block.to_generated(), "* ");
    }

    #[test]
    fn rendered_block_reads_back_identically() {
        for generated in [
            "* Calculate total\n* @param a\n* @param b\n* @return",
            "* Mapper\n* @param T\n* @param R",
            "* Trailing ",
            "* User count",
        ] {
            let rendered = DocumentationBlock::parse_generated(generated).render("  ");
            assert_eq!(
                DocumentationBlock::parse_comment(&rendered).to_generated(),
                generated
            );
        }
    }
}
