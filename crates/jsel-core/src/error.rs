//! Error types for path reads, writes, and path parsing.

use thiserror::Error;

use crate::family::Family;
use crate::path::PathElement;
use crate::value::Value;

/// Errors that can occur while resolving a path against a tree.
///
/// Every variant aborts the whole call; the input tree is never modified and
/// no partially updated tree is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum JselError {
    /// The tree mixes object families, so it has no single encoding to preserve.
    #[error("illegal object: tree uses the {expected} family but contains a {found} object")]
    IllegalObject { expected: Family, found: Family },

    /// A member segment does not exist and creation is disabled.
    #[error("no path: `{segment}` does not exist")]
    NoPath { segment: PathElement },

    /// A selector was applied directly to an object.
    #[error("selector `{segment}` used on an object")]
    SelectorUsedOnObject { segment: PathElement },

    /// A selector was applied to a scalar during a write.
    #[error("selector `{segment}` used on non-array value {value}")]
    SelectorUsedOnNonArray { segment: PathElement, value: Value },

    /// A selector was applied to a scalar during a read.
    #[error("selector `{segment}` read from non-array value {value}")]
    SelectorForNonArray { segment: PathElement, value: Value },

    /// An index (or `new`) was applied to an object or a scalar.
    #[error("index `{segment}` used on non-array value {value}")]
    IndexForNonArray { segment: PathElement, value: Value },

    /// An index points past the end of the array.
    #[error("index `{segment}` out of bounds for array of length {len}")]
    IndexOutOfBounds { segment: PathElement, len: usize },

    /// A final selector segment was given a scalar instead of an object or array.
    #[error("selector `{segment}` cannot replace matched objects with scalar {value}")]
    ReplacingObjectWithValue { segment: PathElement, value: Value },

    /// A write or delete was given an empty path.
    #[error("write path is empty")]
    EmptyPath,

    /// `new` appeared in a read path, a delete path, or before the last segment.
    #[error("`new` is only valid as the last segment of a set path")]
    MisplacedNew,

    /// The textual path form could not be parsed.
    /// `position` is the byte offset where the problem was detected.
    #[error("path parse error at byte {position}: {message}")]
    Parse { position: usize, message: String },
}

/// Fieldless tag for each [`JselError`] variant, for callers that only care
/// about the failure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    IllegalObject,
    NoPath,
    SelectorUsedOnObject,
    SelectorUsedOnNonArray,
    SelectorForNonArray,
    IndexForNonArray,
    IndexOutOfBounds,
    ReplacingObjectWithValue,
    EmptyPath,
    MisplacedNew,
    Parse,
}

impl JselError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            JselError::IllegalObject { .. } => ErrorKind::IllegalObject,
            JselError::NoPath { .. } => ErrorKind::NoPath,
            JselError::SelectorUsedOnObject { .. } => ErrorKind::SelectorUsedOnObject,
            JselError::SelectorUsedOnNonArray { .. } => ErrorKind::SelectorUsedOnNonArray,
            JselError::SelectorForNonArray { .. } => ErrorKind::SelectorForNonArray,
            JselError::IndexForNonArray { .. } => ErrorKind::IndexForNonArray,
            JselError::IndexOutOfBounds { .. } => ErrorKind::IndexOutOfBounds,
            JselError::ReplacingObjectWithValue { .. } => ErrorKind::ReplacingObjectWithValue,
            JselError::EmptyPath => ErrorKind::EmptyPath,
            JselError::MisplacedNew => ErrorKind::MisplacedNew,
            JselError::Parse { .. } => ErrorKind::Parse,
        }
    }

    pub(crate) fn parse(position: usize, message: impl Into<String>) -> Self {
        JselError::Parse {
            position,
            message: message.into(),
        }
    }
}

/// Convenience alias used throughout jsel-core.
pub type Result<T> = std::result::Result<T, JselError>;
