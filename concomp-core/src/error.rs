//! Error types for loading and validating CSC binary matrices.

use thiserror::Error;

/// Everything that can go wrong while loading a [`CscBinaryMatrix`](crate::matrix::CscBinaryMatrix).
///
/// Every variant names the operation that failed, so a caller printing
/// `Display` gets a message of the shape `<operation>: <detail>` without
/// having to thread a separate "where did this happen" string through the
/// call stack.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The underlying reader failed (file not found, permission denied, a
    /// read returned an I/O error partway through, ...).
    #[error("{op}: I/O error: {source}")]
    Io {
        /// Name of the loader operation that was reading when this happened.
        op: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// The input was well-formed as bytes but did not parse as the expected
    /// container (bad header, wrong token count, unsupported symmetry or
    /// element type, ...).
    #[error("{op}: malformed input: {detail}")]
    Format {
        /// Name of the loader operation.
        op: &'static str,
        /// Human-readable description of what was wrong.
        detail: String,
    },

    /// The input parsed, but violates a structural invariant of
    /// [`CscBinaryMatrix`](crate::matrix::CscBinaryMatrix): non-square, a
    /// row index out of range, or inconsistent `col_ptr` offsets.
    #[error("{op}: invalid matrix shape: {detail}")]
    Shape {
        /// Name of the loader operation.
        op: &'static str,
        /// Human-readable description of the violated invariant.
        detail: String,
    },

    /// An allocation needed to hold the loaded matrix failed.
    #[error("{op}: allocation failed")]
    Alloc {
        /// Name of the loader operation.
        op: &'static str,
    },
}

impl LoadError {
    pub(crate) fn format(op: &'static str, detail: impl Into<String>) -> Self {
        LoadError::Format {
            op,
            detail: detail.into(),
        }
    }

    pub(crate) fn shape(op: &'static str, detail: impl Into<String>) -> Self {
        LoadError::Shape {
            op,
            detail: detail.into(),
        }
    }
}
