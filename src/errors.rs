//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`GltfError`] covers the two recoverable failure families:
//! - **Format errors**: the document is malformed (missing required field, unknown
//!   enumerated value, unsupported data-URI encoding, dangling index, broken hierarchy)
//! - **I/O errors**: a buffer or document could not be read, or was shorter than declared
//!
//! Contract violations (dereferencing a stale [`Handle`](crate::assets::Handle),
//! indexing an internal table out of range, parenting a node to itself) are not
//! represented here. They panic, since they indicate a broken invariant rather
//! than bad input.
//!
//! # Usage
//!
//! All fallible public APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, GltfError>`.
//!
//! ```rust,ignore
//! use gltf_graph::errors::{ErrorKind, Result};
//!
//! fn open(path: &str) -> Result<()> {
//!     let gltf = gltf_graph::load(path)?;
//!     let _bytes = gltf.get_buffer(0)?;
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Broad classification of a [`GltfError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The document (or an inline payload) is malformed. Fatal to loading.
    Format,
    /// Reading bytes from the file system failed or came up short.
    Io,
}

/// The main error type for loading and reading a glTF asset graph.
#[derive(Error, Debug)]
pub enum GltfError {
    // ========================================================================
    // Format Errors
    // ========================================================================
    /// JSON syntax error, missing required field, or a value of the wrong type.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A field that is only required in some configurations is absent.
    #[error("Missing required field `{field}` in {context}")]
    MissingField {
        /// Where the field was expected
        context: String,
        /// Name of the missing field
        field: &'static str,
    },

    /// An enumerated string or integer code is not recognised.
    #[error("Unknown {kind} value: {value}")]
    UnknownValue {
        /// Which enumeration was being decoded
        kind: &'static str,
        /// The offending value as it appeared in the document
        value: String,
    },

    /// A cross-reference points past the end of its table.
    #[error("Index out of range: {context} (index: {index}, len: {len})")]
    IndexOutOfRange {
        /// Description of the reference
        context: String,
        /// The invalid index
        index: usize,
        /// Length of the referenced table
        len: usize,
    },

    /// The declared node hierarchy is not a forest.
    #[error("Invalid node hierarchy: {0}")]
    InvalidHierarchy(String),

    /// Data URI parsing error.
    #[error("Data URI error: {0}")]
    DataUri(String),

    /// Data URI uses an encoding other than base64.
    #[error("Unsupported data URI encoding: {0}")]
    UnsupportedEncoding(String),

    /// Base64 decoding error.
    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    // ========================================================================
    // Accessor Errors
    // ========================================================================
    /// A buffer view or accessor addresses bytes outside its source.
    #[error("Byte range {start}..{end} exceeds {len} available bytes")]
    AccessorOutOfBounds {
        /// First byte addressed
        start: usize,
        /// One past the last byte addressed
        end: usize,
        /// Bytes available in the source
        len: usize,
    },

    /// Accessor has no buffer view to read from.
    #[error("Accessor has no buffer view")]
    MissingBufferView,

    /// Accessor layout does not match the requested element type.
    #[error("Accessor mismatch: expected {expected}, found {found}")]
    AccessorMismatch {
        /// Layout the caller asked for
        expected: String,
        /// Layout the accessor declares
        found: String,
    },

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Fewer bytes were available than the buffer declares.
    #[error("Short read from {}: expected {expected} bytes, got {actual}", uri.display())]
    ShortRead {
        /// Source that was read
        uri: PathBuf,
        /// Declared `byteLength`
        expected: usize,
        /// Bytes actually obtained
        actual: usize,
    },
}

impl GltfError {
    /// Classifies this error as a format or an I/O failure.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            GltfError::Io(_) | GltfError::ShortRead { .. } => ErrorKind::Io,
            _ => ErrorKind::Format,
        }
    }

    pub(crate) fn unknown(kind: &'static str, value: impl ToString) -> Self {
        GltfError::UnknownValue {
            kind,
            value: value.to_string(),
        }
    }

    /// Byte range whose end does not fit in `usize`.
    pub(crate) fn overflowing_range(start: usize, len: usize) -> Self {
        GltfError::AccessorOutOfBounds {
            start,
            end: usize::MAX,
            len,
        }
    }

    pub(crate) fn missing(context: impl Into<String>, field: &'static str) -> Self {
        GltfError::MissingField {
            context: context.into(),
            field,
        }
    }
}

/// Alias for `Result<T, GltfError>`.
pub type Result<T> = std::result::Result<T, GltfError>;
