//! Error types for edit, query and bundle operations

use thiserror::Error;

/// Errors raised by [`EditableText`](crate::EditableText) and
/// [`Bundle`](crate::Bundle) operations
///
/// Every variant describes a contract violation by the caller. Operations
/// that fail leave the text untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// An offset falls outside the original or current text
    #[error("offset {offset} is out of bounds for a text of length {len}")]
    OutOfBounds { offset: usize, len: usize },

    /// The original range overlaps characters that were already replaced,
    /// removed or trimmed
    #[error("cannot edit original range {start}..{end}: it overlaps content that was already replaced")]
    RangeAlreadyReplaced { start: usize, end: usize },

    /// A slice boundary refers to a character that no longer exists
    #[error("cannot slice original range {start}..{end}: a boundary character was replaced")]
    UnmappableRange { start: usize, end: usize },

    /// An indent exclusion boundary refers to a character that no longer exists
    #[error("cannot use replaced character at offset {offset} as an exclusion boundary")]
    UnmappableExclusionBoundary { offset: usize },

    /// Two indent exclusion ranges intersect
    #[error("exclusion ranges {}..{} and {}..{} overlap", .first.0, .first.1, .second.0, .second.1)]
    OverlappingExclusions {
        first: (usize, usize),
        second: (usize, usize),
    },

    /// A bundle source was described without any content
    #[error("bundle source{} has no content", .filename.as_ref().map(|f| format!(" '{}'", f)).unwrap_or_default())]
    InvalidSource { filename: Option<String> },
}

pub type Result<T> = std::result::Result<T, EditError>;
