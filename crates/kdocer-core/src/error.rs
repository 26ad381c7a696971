//! Error and pass-through types.

use thiserror::Error;

/// A buffer edit that could not be staged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("offset {offset} is past the end of the text ({len} bytes)")]
    OutOfBounds { offset: usize, len: usize },

    #[error("offset {offset} is not on a character boundary")]
    NotCharBoundary { offset: usize },

    #[error("invalid range {start}..{end}")]
    InvalidRange { start: usize, end: usize },
}

/// Why an Enter press was left to the host's default handling.
///
/// None of these are failures from the user's point of view: the buffer is
/// untouched and a plain newline stays in place.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PassThrough {
    #[error("smart indent on enter is disabled")]
    SmartIndentDisabled,

    #[error("caret is not inside a doc comment")]
    NotInDocBlock,

    #[error("doc comment is not empty")]
    DocBlockNotEmpty,

    #[error("doc comment is not attached to a declaration")]
    NoDeclaration,

    #[error("no skeleton for `{kind}` declarations")]
    UnsupportedDeclaration { kind: String },

    #[error("edit rejected: {0}")]
    EditRejected(#[from] EditError),
}
