// In: src/wire/format.rs

//! Defines all constants and structural contracts for the matrix wire format.
//! This is the single source of truth for the binary layout the decoder
//! consumes. The core only reads this format; it is produced by the server.
//!
//! Layout (little-endian throughout):
//!
//! ```text
//! magic      : 4 bytes  = b"MTX1"
//! version    : u16      = 1
//! n_rows     : u32
//! n_cols     : u32
//! col keys   : n_cols entries, each
//!                key tag  : u8   (KEY_TAG_INT | KEY_TAG_STR)
//!                int key  : u32                      (KEY_TAG_INT)
//!                str key  : u32 length + UTF-8 bytes (KEY_TAG_STR)
//! columns    : n_cols entries, each
//!                type tag : u8   (MatrixDataType tag)
//!                payload  : n_rows * element_width bytes, or for Json:
//!                           u32 length + UTF-8 JSON array of n_rows values
//! ```
//!
//! No padding between fields; any deviation (bad magic, unknown tag,
//! truncation, trailing bytes) is a `FormatError`.

use crate::types::Key;

use crate::dataframe::column::Column;

/// The magic number identifying a matrix wire buffer.
pub const MATRIX_MAGIC: &[u8; 4] = b"MTX1";
/// The current version of the matrix wire format.
pub const MATRIX_FORMAT_VERSION: u16 = 1;

/// Column-key tag: a dense `u32` positional key.
pub const KEY_TAG_INT: u8 = 0;
/// Column-key tag: a length-prefixed UTF-8 string key.
pub const KEY_TAG_STR: u8 = 1;

/// A fully decoded matrix wire buffer: structure reconstructed, element
/// values untouched in their native encodings.
#[derive(Debug)]
pub struct DecodedMatrix {
    pub n_rows: usize,
    pub n_cols: usize,
    /// Ordered column keys, length `n_cols`.
    pub col_idx: Vec<Key>,
    /// Ordered columns, length `n_cols`, each of length `n_rows`.
    pub columns: Vec<Column>,
}
