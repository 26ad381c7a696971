//! Editable text with a caret, mutated only through a write transaction.
//!
//! [`TextBuffer::begin_write`] hands out a [`WriteTransaction`] that stages
//! edits on a private copy. Nothing reaches the buffer until
//! [`WriteTransaction::commit`]; dropping the transaction on any other path
//! (early return, `?`, unwinding) throws the staged edits away.

use crate::error::EditError;
use std::ops::Range;

/// Document text plus caret byte offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
    caret: usize,
}

impl TextBuffer {
    /// Create a buffer; the caret is clamped to the nearest preceding char
    /// boundary inside the text.
    pub fn new(text: impl Into<String>, caret: usize) -> Self {
        let text = text.into();
        let mut caret = caret.min(text.len());
        while !text.is_char_boundary(caret) {
            caret -= 1;
        }
        Self { text, caret }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn into_text(self) -> String {
        self.text
    }

    /// Move the caret outside of any transaction (host-side navigation).
    pub fn set_caret(&mut self, offset: usize) -> Result<(), EditError> {
        check_offset(&self.text, offset)?;
        self.caret = offset;
        Ok(())
    }

    /// Acquire the single write scope for this buffer.
    pub fn begin_write(&mut self) -> WriteTransaction<'_> {
        WriteTransaction {
            staged_text: self.text.clone(),
            staged_caret: self.caret,
            buffer: self,
            committed: false,
        }
    }
}

fn check_offset(text: &str, offset: usize) -> Result<(), EditError> {
    if offset > text.len() {
        return Err(EditError::OutOfBounds {
            offset,
            len: text.len(),
        });
    }
    if !text.is_char_boundary(offset) {
        return Err(EditError::NotCharBoundary { offset });
    }
    Ok(())
}

/// Staged edits against a [`TextBuffer`].
#[derive(Debug)]
pub struct WriteTransaction<'a> {
    buffer: &'a mut TextBuffer,
    staged_text: String,
    staged_caret: usize,
    committed: bool,
}

impl WriteTransaction<'_> {
    /// Text as it would look if committed now.
    pub fn text(&self) -> &str {
        &self.staged_text
    }

    pub fn caret(&self) -> usize {
        self.staged_caret
    }

    /// Replace `range` with `with`. The caret is shifted when it sits after
    /// the range, and pulled to the range start when it sits inside it.
    pub fn replace(&mut self, range: Range<usize>, with: &str) -> Result<(), EditError> {
        if range.start > range.end {
            return Err(EditError::InvalidRange {
                start: range.start,
                end: range.end,
            });
        }
        check_offset(&self.staged_text, range.start)?;
        check_offset(&self.staged_text, range.end)?;

        self.staged_text.replace_range(range.clone(), with);
        if self.staged_caret >= range.end {
            self.staged_caret = self.staged_caret - (range.end - range.start) + with.len();
        } else if self.staged_caret > range.start {
            self.staged_caret = range.start;
        }
        Ok(())
    }

    pub fn insert(&mut self, offset: usize, text: &str) -> Result<(), EditError> {
        self.replace(offset..offset, text)
    }

    pub fn move_caret(&mut self, offset: usize) -> Result<(), EditError> {
        check_offset(&self.staged_text, offset)?;
        self.staged_caret = offset;
        Ok(())
    }

    /// Publish every staged edit and release the scope.
    pub fn commit(mut self) {
        self.buffer.text = std::mem::take(&mut self.staged_text);
        self.buffer.caret = self.staged_caret;
        self.committed = true;
    }
}

impl Drop for WriteTransaction<'_> {
    fn drop(&mut self) {
        if !self.committed {
            tracing::debug!("write transaction released without commit; edits discarded");
        }
    }
}
