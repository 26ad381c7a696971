//! Enter-key hook: detect an empty doc comment, generate its skeleton,
//! substitute it, and park the caret on the summary line.
//!
//! ```text
//! Idle ─▶ EmptyDocDetected ─▶ GeneratedPendingInsertion ─▶ CaretRepositioned
//!  ▲            │                        │
//!  └────────────┴───── pass-through ─────┘
//! ```
//!
//! Every pass-through leaves the buffer exactly as it was. All edits of an
//! applied run go through a single [`WriteTransaction`].

use crate::buffer::{TextBuffer, WriteTransaction};
use crate::declaration::{Declaration, Owner};
use crate::error::{EditError, PassThrough};
use crate::generator::SkeletonGenerator;
use crate::rewrite::{DocBlockRewriter, DocSpan, IndentingRewriter};
use tracing::debug;

/// Resolves the declaration a doc comment belongs to.
pub trait DeclarationIntrospector {
    /// `None` when nothing recognizable follows the comment.
    fn owner(&self, text: &str, span: DocSpan) -> Option<Owner>;
}

/// Host settings consulted on every Enter press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnterSettings {
    pub smart_indent_on_enter: bool,
}

impl Default for EnterSettings {
    fn default() -> Self {
        Self {
            smart_indent_on_enter: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    EmptyDocDetected,
    GeneratedPendingInsertion,
    CaretRepositioned,
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub declaration: Declaration,
    /// Skeleton text as produced by the generator
    pub generated: String,
    /// Span of the substituted comment
    pub span: DocSpan,
    pub caret: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied(Applied),
    PassThrough(PassThrough),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }

    pub fn phase(&self) -> Phase {
        match self {
            Outcome::Applied(_) => Phase::CaretRepositioned,
            Outcome::PassThrough(_) => Phase::Idle,
        }
    }
}

/// Find the doc comment enclosing `offset`: the last `/**` at or before it,
/// provided its closing `*/` starts after it.
pub fn find_doc_span(text: &str, offset: usize) -> Option<DocSpan> {
    let mut search_end = (offset + 3).min(text.len());
    while !text.is_char_boundary(search_end) {
        search_end += 1;
    }
    let start = text[..search_end].rfind("/**")?;
    if start > offset {
        return None;
    }
    let close = start + 2 + text[start + 2..].find("*/")?;
    if close <= offset {
        return None;
    }
    Some(DocSpan {
        start,
        end: close + 2,
    })
}

/// Every `/** ... */` comment in `text`, in order.
pub fn doc_spans(text: &str) -> Vec<DocSpan> {
    let mut spans = Vec::new();
    let mut from = 0;
    while let Some(i) = text[from..].find("/**") {
        let start = from + i;
        let Some(j) = text[start + 2..].find("*/") else {
            break;
        };
        let end = start + 2 + j + 2;
        spans.push(DocSpan { start, end });
        from = end;
    }
    spans
}

/// A doc comment holding nothing but the continuation `*`.
pub fn is_empty_doc(text: &str, span: DocSpan) -> bool {
    span.body(text).trim() == "*"
}

fn transition(from: Phase, to: Phase) -> Phase {
    debug!(?from, ?to, "enter handler transition");
    to
}

/// Post-Enter hook, generic over the language-specific introspector and the
/// host's rewrite step.
#[derive(Debug, Clone)]
pub struct EnterHandler<I, R = IndentingRewriter> {
    introspector: I,
    rewriter: R,
}

impl<I: DeclarationIntrospector> EnterHandler<I, IndentingRewriter> {
    pub fn new(introspector: I) -> Self {
        Self {
            introspector,
            rewriter: IndentingRewriter,
        }
    }
}

impl<I: DeclarationIntrospector, R: DocBlockRewriter> EnterHandler<I, R> {
    pub fn with_rewriter(introspector: I, rewriter: R) -> Self {
        Self {
            introspector,
            rewriter,
        }
    }

    /// Handle an Enter press whose newline has already been inserted at the
    /// buffer's caret.
    pub fn post_process_enter(&self, buffer: &mut TextBuffer, settings: &EnterSettings) -> Outcome {
        match self.try_enter(buffer, settings) {
            Ok(applied) => Outcome::Applied(applied),
            Err(reason) => {
                debug!(%reason, "enter passed through");
                Outcome::PassThrough(reason)
            }
        }
    }

    fn try_enter(
        &self,
        buffer: &mut TextBuffer,
        settings: &EnterSettings,
    ) -> Result<Applied, PassThrough> {
        let phase = Phase::Idle;
        if !settings.smart_indent_on_enter {
            return Err(PassThrough::SmartIndentDisabled);
        }

        let span =
            find_doc_span(buffer.text(), buffer.caret()).ok_or(PassThrough::NotInDocBlock)?;
        if !is_empty_doc(buffer.text(), span) {
            return Err(PassThrough::DocBlockNotEmpty);
        }
        let phase = transition(phase, Phase::EmptyDocDetected);

        let declaration = match self.introspector.owner(buffer.text(), span) {
            Some(Owner::Supported(declaration)) => declaration,
            Some(Owner::Unsupported { kind }) => {
                return Err(PassThrough::UnsupportedDeclaration { kind })
            }
            None => return Err(PassThrough::NoDeclaration),
        };
        let generated = declaration.generate();
        debug!(kind = declaration.kind(), name = declaration.name(), "generated skeleton");
        let phase = transition(phase, Phase::GeneratedPendingInsertion);

        let mut tx = buffer.begin_write();
        let span = self.rewriter.rewrite(&mut tx, span, &generated)?;
        let caret = place_caret(&mut tx, span)?;
        tx.commit();
        transition(phase, Phase::CaretRepositioned);

        Ok(Applied {
            declaration,
            generated,
            span,
            caret,
        })
    }

    /// Generate skeletons for every empty doc comment in the buffer, last to
    /// first so earlier spans stay valid. Returns how many were filled.
    pub fn fill_empty_blocks(&self, buffer: &mut TextBuffer, settings: &EnterSettings) -> usize {
        let spans: Vec<DocSpan> = doc_spans(buffer.text())
            .into_iter()
            .filter(|span| is_empty_doc(buffer.text(), *span))
            .collect();

        let mut filled = 0;
        for span in spans.into_iter().rev() {
            if buffer.set_caret(span.start + 3).is_err() {
                continue;
            }
            if self.post_process_enter(buffer, settings).is_applied() {
                filled += 1;
            }
        }
        filled
    }
}

/// Move the caret to the end of the first line after `/**`, first giving a
/// bare `*` line its typing space.
fn place_caret(tx: &mut WriteTransaction<'_>, span: DocSpan) -> Result<usize, EditError> {
    let text = tx.text();
    let Some(nl) = text[span.range()].find('\n') else {
        tx.move_caret(span.end)?;
        return Ok(span.end);
    };
    let line_start = span.start + nl + 1;
    let mut line_end = text[line_start..]
        .find('\n')
        .map_or(text.len(), |i| line_start + i);
    let line = &text[line_start..line_end];

    if line.trim_start() == "*" {
        let star = line_start + line.find('*').unwrap_or(0);
        tx.insert(star + 1, " ")?;
        line_end += 1;
    }
    tx.move_caret(line_end)?;
    Ok(line_end)
}
