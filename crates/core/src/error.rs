//! Error types for the quire object model and content parser.

use crate::model::objects::ObjGen;
use std::fmt::Display;
use thiserror::Error;

/// Primary error type for object model and content stream operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PdfError {
    /// Operation applied to the wrong kind of object.
    #[error("type error: expected {expected}, got {got}")]
    TypeMismatch {
        expected: &'static str,
        got: &'static str,
    },

    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// Array index outside bounds, after negative-index normalization.
    #[error("index {index} out of range for array of length {len}")]
    IndexOutOfRange { index: i64, len: usize },

    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// Write or delete of a protected key such as a stream's `/Length`.
    #[error("{0} may not be modified")]
    ImmutableField(String),

    #[error("can't hash {0} object")]
    Unhashable(&'static str),

    #[error("malformed content at offset {pos}: {msg}")]
    MalformedContent { pos: usize, msg: String },

    #[error("structure too deep: nesting exceeds {limit} levels")]
    StructureTooDeep { limit: usize },

    /// Stream filter failure, tagged with the owning object's identity.
    #[error("object {objgen}: {msg}")]
    DecodeFailure { objgen: ObjGen, msg: String },

    #[error("foreign object: {0}")]
    ForeignObject(String),
}

impl PdfError {
    pub(crate) fn malformed(pos: usize, msg: impl Into<String>) -> Self {
        PdfError::MalformedContent {
            pos,
            msg: msg.into(),
        }
    }

    pub(crate) fn decode(msg: impl Into<String>) -> Self {
        PdfError::DecodeFailure {
            objgen: ObjGen::DIRECT,
            msg: msg.into(),
        }
    }
}

impl serde::ser::Error for PdfError {
    fn custom<T: Display>(msg: T) -> Self {
        PdfError::InvalidValue(msg.to_string())
    }
}

/// Convenience Result type alias for PdfError.
pub type Result<T> = std::result::Result<T, PdfError>;
