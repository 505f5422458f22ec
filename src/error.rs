// In: src/error.rs

//! This module defines the single, unified error type for the entire cellscope core.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CellscopeError {
    // =========================================================================
    // === High-Level, Semantic Errors (Specific to our library's logic)
    // =========================================================================
    /// A malformed or truncated matrix wire buffer.
    #[error("Matrix wire format error: {0}")]
    FormatError(String),

    /// An element encoding outside the promotion policy's domain.
    #[error("Unsupported data type for this operation: {0}")]
    UnsupportedType(String),

    /// Column/index cardinality disagrees with a dataframe's declared shape.
    #[error("Dataframe shape error: {0}")]
    ShapeError(String),

    /// A row or column key lookup against an absent key.
    #[error("Key not found: {0}")]
    KeyError(String),

    /// Fewer than 2 usable layout columns, or non-floating-point layout data.
    #[error("Unexpected layout data returned from server: {0}")]
    LayoutFormatError(String),

    /// Cross-matrix dimensional mismatch against the declared schema.
    #[error("Universe dimensionality mismatch - failed to load: {0}")]
    DatasetIntegrityError(String),

    /// Non-floating-point data where floating-point is required.
    #[error("Unexpected non-floating point response from server: {0}")]
    UnexpectedType(String),

    #[error("Internal logic error (this is a bug): {0}")]
    InternalError(String),

    // =========================================================================
    // === External Error Wrappers (Using #[from] for automatic conversion)
    // =========================================================================
    /// An error originating from the underlying I/O subsystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error from the Serde JSON library, typically while parsing the
    /// schema/config documents or a JSON-encoded wire column.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// An error from a safe byte-casting operation failing.
    #[error("Byte slice casting error: {0}")]
    PodCast(String), // Manual `From` impl is needed as bytemuck::PodCastError doesn't impl Error
}

// =============================================================================
// === Manual `From` Implementations ===
// =============================================================================

impl From<bytemuck::PodCastError> for CellscopeError {
    fn from(err: bytemuck::PodCastError) -> Self {
        CellscopeError::PodCast(err.to_string())
    }
}
