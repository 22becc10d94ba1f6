// In: src/error.rs

//! This module defines the single, unified error type for the entire palung library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PalungError {
    // =========================================================================
    // === High-Level, Semantic Errors (Specific to our library's logic)
    // =========================================================================
    /// The input container or one of its elements is not of the required kind.
    /// Detected eagerly, before any transformation work is done.
    #[error("Unsupported array type for this operation: {0}")]
    UnsupportedType(String),

    /// A specific element of a binary array is not valid UTF-8. `offset` is the
    /// position of the first invalid byte within that element.
    #[error("Invalid UTF-8 sequence in element {index} at byte offset {offset}")]
    Utf8Decode { index: usize, offset: usize },

    /// A text value could not be encoded as UTF-8. Only reachable at the FFI
    /// boundary; arrow text arrays are valid UTF-8 by construction.
    #[error("UTF-8 encoding failed: {0}")]
    Utf8Encode(String),

    /// Structural mismatch between a packed buffer and its expected record
    /// count: truncation, a corrupt length field, or trailing garbage. The
    /// sub-cases are deliberately not distinguished; a reader cannot tell
    /// them apart from the length bytes alone.
    #[error("Packed byte-array data is corrupt: {0}")]
    CorruptData(String),

    /// An element is too long for the 4-byte length prefix. Packing fails
    /// outright rather than truncating the length.
    #[error("Element {index} length {length} exceeds the u32 length prefix")]
    LengthOverflow { index: usize, length: usize },

    #[error("Internal logic error (this is a bug): {0}")]
    InternalError(String),

    // =========================================================================
    // === External Error Wrappers (Using #[from] for automatic conversion)
    // =========================================================================
    /// An error originating from the Arrow library.
    #[error("Arrow operation failed: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// An error for Python FFI (Foreign Function Interface) operations.
    #[error("FFI operation failed: {0}")]
    FfiError(String), // PyErr doesn't impl Error, so we can't use #[from] here.
}

// =============================================================================
// === Python Exception Mapping (feature "python") ===
// =============================================================================

#[cfg(feature = "python")]
impl From<pyo3::PyErr> for PalungError {
    fn from(err: pyo3::PyErr) -> Self {
        PalungError::FfiError(err.to_string())
    }
}

/// Maps each error kind onto the Python exception type callers of the
/// original extension module match on: type violations raise `TypeError`,
/// UTF-8 failures raise `ValueError` (the superclass of the unicode errors),
/// corrupt buffers raise `RuntimeError`, and length overflow raises
/// `OverflowError`.
#[cfg(feature = "python")]
impl From<PalungError> for pyo3::PyErr {
    fn from(err: PalungError) -> pyo3::PyErr {
        use pyo3::exceptions::{
            PyOverflowError, PyRuntimeError, PyTypeError, PyValueError,
        };
        let msg = err.to_string();
        match err {
            PalungError::UnsupportedType(_) => PyTypeError::new_err(msg),
            PalungError::Utf8Decode { .. } | PalungError::Utf8Encode(_) => {
                PyValueError::new_err(msg)
            }
            PalungError::CorruptData(_) => PyRuntimeError::new_err(msg),
            PalungError::LengthOverflow { .. } => PyOverflowError::new_err(msg),
            _ => PyValueError::new_err(msg),
        }
    }
}
