//! This module defines the core, strongly-typed data representations used
//! throughout the cellscope pipeline.
//!
//! It includes the canonical `MatrixDataType` enum for wire element encodings,
//! the `CellValue` scalar used by JSON columns / schema categories / summaries,
//! and the `Key` type shared by row and column indices.

pub mod cell_value;
pub mod matrix_data_type;

// Re-export the main types for easier access.
pub use cell_value::{CellValue, Key};
pub use matrix_data_type::MatrixDataType;
