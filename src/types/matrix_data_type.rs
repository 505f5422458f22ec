//! This module defines the canonical, type-safe representation of the element
//! encodings carried by the matrix wire format.

use crate::error::CellscopeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The canonical, internal representation of a wire column's element encoding.
///
/// This enum replaces fragile numeric tag handling with compile-time checks:
/// every decoder and promotion path matches exhaustively over it.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatrixDataType {
    Int8,
    Int16,
    Int32,
    UInt8,
    UInt16,
    UInt32,
    Float32,
    Float64,
    /// A variable-length column transmitted as a JSON-encoded array. Used for
    /// string/boolean/heterogeneous annotation data.
    Json,
}

impl MatrixDataType {
    /// Converts a wire type tag into a `MatrixDataType`.
    pub fn from_tag(tag: u8) -> Result<Self, CellscopeError> {
        match tag {
            0 => Ok(Self::Int8),
            1 => Ok(Self::Int16),
            2 => Ok(Self::Int32),
            3 => Ok(Self::UInt8),
            4 => Ok(Self::UInt16),
            5 => Ok(Self::UInt32),
            6 => Ok(Self::Float32),
            7 => Ok(Self::Float64),
            8 => Ok(Self::Json),
            t => Err(CellscopeError::FormatError(format!(
                "unknown column element type tag {}",
                t
            ))),
        }
    }

    /// Converts a `MatrixDataType` back into its wire type tag.
    pub fn to_tag(&self) -> u8 {
        match self {
            Self::Int8 => 0,
            Self::Int16 => 1,
            Self::Int32 => 2,
            Self::UInt8 => 3,
            Self::UInt16 => 4,
            Self::UInt32 => 5,
            Self::Float32 => 6,
            Self::Float64 => 7,
            Self::Json => 8,
        }
    }

    /// The fixed element width in bytes, or `None` for variable-length (Json).
    pub fn element_width(&self) -> Option<usize> {
        match self {
            Self::Int8 | Self::UInt8 => Some(1),
            Self::Int16 | Self::UInt16 => Some(2),
            Self::Int32 | Self::UInt32 | Self::Float32 => Some(4),
            Self::Float64 => Some(8),
            Self::Json => None,
        }
    }

    /// Returns `true` if the data type is a floating-point number.
    pub fn is_float(&self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    /// Returns `true` if the data type is a fixed-width integer.
    pub fn is_int(&self) -> bool {
        matches!(
            self,
            Self::Int8 | Self::Int16 | Self::Int32 | Self::UInt8 | Self::UInt16 | Self::UInt32
        )
    }
}

/// Provides the canonical string representation for a `MatrixDataType`.
impl fmt::Display for MatrixDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // These string representations are part of the public contract.
        write!(f, "{:?}", self)
    }
}
