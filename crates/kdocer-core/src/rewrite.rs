//! Substitution of a generated skeleton for an existing doc comment.

use crate::block::DocumentationBlock;
use crate::buffer::WriteTransaction;
use crate::error::EditError;
use std::ops::Range;

/// Byte range of a doc comment, from the `/` of `/**` to just past `*/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocSpan {
    pub start: usize,
    pub end: usize,
}

impl DocSpan {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Text between the delimiters.
    pub fn body<'t>(&self, text: &'t str) -> &'t str {
        let inner_start = (self.start + 3).min(self.end);
        let inner_end = self.end.saturating_sub(2).max(inner_start);
        &text[inner_start..inner_end]
    }
}

/// Turns generated text into a structured comment and swaps it in.
pub trait DocBlockRewriter {
    /// Replace `span` inside `tx` and return the span of the new comment.
    fn rewrite(
        &self,
        tx: &mut WriteTransaction<'_>,
        span: DocSpan,
        generated: &str,
    ) -> Result<DocSpan, EditError>;
}

/// Renders the block aligned under the column of the replaced `/**`.
#[derive(Debug, Default, Clone, Copy)]
pub struct IndentingRewriter;

/// Leading whitespace of the line holding `offset`, or nothing when the
/// line has code before it.
pub fn indent_at(text: &str, offset: usize) -> &str {
    let line_start = text[..offset].rfind('\n').map_or(0, |i| i + 1);
    let prefix = &text[line_start..offset];
    if prefix.chars().all(|c| c == ' ' || c == '\t') {
        prefix
    } else {
        ""
    }
}

impl DocBlockRewriter for IndentingRewriter {
    fn rewrite(
        &self,
        tx: &mut WriteTransaction<'_>,
        span: DocSpan,
        generated: &str,
    ) -> Result<DocSpan, EditError> {
        if span.end > tx.text().len() {
            return Err(EditError::OutOfBounds {
                offset: span.end,
                len: tx.text().len(),
            });
        }
        let indent = indent_at(tx.text(), span.start).to_string();
        let rendered = DocumentationBlock::parse_generated(generated).render(&indent);
        tx.replace(span.range(), &rendered)?;
        Ok(DocSpan {
            start: span.start,
            end: span.start + rendered.len(),
        })
    }
}
