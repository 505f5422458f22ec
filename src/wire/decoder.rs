// In: src/wire/decoder.rs

//! The matrix wire decoder: raw bytes in, `DecodedMatrix` out.
//!
//! The decoder reconstructs structure and element boundaries only; it never
//! reinterprets values. Fixed-width payloads are materialized through
//! `bytemuck::pod_collect_to_vec`, which tolerates the arbitrary alignment
//! a payload lands at inside the buffer. All multi-byte fields are
//! little-endian.

use bytemuck::{AnyBitPattern, NoUninit};
use log::debug;

use crate::dataframe::column::Column;
use crate::error::CellscopeError;
use crate::types::{CellValue, Key, MatrixDataType};
use crate::wire::format::{
    DecodedMatrix, KEY_TAG_INT, KEY_TAG_STR, MATRIX_FORMAT_VERSION, MATRIX_MAGIC,
};

//==================================================================================
// 1. Cursor over the raw buffer
//==================================================================================

struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn take(&mut self, n: usize, what: &str) -> Result<&'a [u8], CellscopeError> {
        let end = self.pos.checked_add(n).ok_or_else(|| {
            CellscopeError::FormatError(format!("length overflow while reading {}", what))
        })?;
        if end > self.buf.len() {
            return Err(CellscopeError::FormatError(format!(
                "truncated buffer: needed {} bytes for {} at offset {}, only {} remain",
                n,
                what,
                self.pos,
                self.buf.len() - self.pos
            )));
        }
        let slice = &self.buf[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn read_u8(&mut self, what: &str) -> Result<u8, CellscopeError> {
        Ok(self.take(1, what)?[0])
    }

    fn read_u16(&mut self, what: &str) -> Result<u16, CellscopeError> {
        let b = self.take(2, what)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    fn read_u32(&mut self, what: &str) -> Result<u32, CellscopeError> {
        let b = self.take(4, what)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }
}

//==================================================================================
// 2. Private decode helpers
//==================================================================================

fn read_key(reader: &mut Reader) -> Result<Key, CellscopeError> {
    match reader.read_u8("column key tag")? {
        KEY_TAG_INT => Ok(Key::Int(reader.read_u32("integer column key")?)),
        KEY_TAG_STR => {
            let len = reader.read_u32("column key length")? as usize;
            let bytes = reader.take(len, "column key bytes")?;
            let s = std::str::from_utf8(bytes).map_err(|e| {
                CellscopeError::FormatError(format!("column key is not valid UTF-8: {}", e))
            })?;
            Ok(Key::Str(s.to_string()))
        }
        t => Err(CellscopeError::FormatError(format!(
            "unknown column key tag {}",
            t
        ))),
    }
}

/// Copies one fixed-width payload into an owned, correctly-aligned Vec.
fn read_fixed_column<T: NoUninit + AnyBitPattern>(
    reader: &mut Reader,
    n_rows: usize,
    width: usize,
) -> Result<Vec<T>, CellscopeError> {
    let n_bytes = n_rows.checked_mul(width).ok_or_else(|| {
        CellscopeError::FormatError(format!(
            "column payload size overflow: {} rows * {} bytes",
            n_rows, width
        ))
    })?;
    let payload = reader.take(n_bytes, "column payload")?;
    Ok(bytemuck::pod_collect_to_vec(payload))
}

fn read_json_column(reader: &mut Reader, n_rows: usize) -> Result<Vec<CellValue>, CellscopeError> {
    let len = reader.read_u32("JSON column length")? as usize;
    let payload = reader.take(len, "JSON column payload")?;
    let values: Vec<serde_json::Value> = serde_json::from_slice(payload)?;
    if values.len() != n_rows {
        return Err(CellscopeError::FormatError(format!(
            "JSON column encodes {} values, expected {} rows",
            values.len(),
            n_rows
        )));
    }
    values.into_iter().map(CellValue::try_from).collect()
}

fn read_column(reader: &mut Reader, n_rows: usize) -> Result<Column, CellscopeError> {
    let dtype = MatrixDataType::from_tag(reader.read_u8("column element type tag")?)?;
    match dtype {
        MatrixDataType::Int8 => Ok(Column::Int8(read_fixed_column(reader, n_rows, 1)?)),
        MatrixDataType::Int16 => Ok(Column::Int16(read_fixed_column(reader, n_rows, 2)?)),
        MatrixDataType::Int32 => Ok(Column::Int32(read_fixed_column(reader, n_rows, 4)?)),
        MatrixDataType::UInt8 => Ok(Column::UInt8(read_fixed_column(reader, n_rows, 1)?)),
        MatrixDataType::UInt16 => Ok(Column::UInt16(read_fixed_column(reader, n_rows, 2)?)),
        MatrixDataType::UInt32 => Ok(Column::UInt32(read_fixed_column(reader, n_rows, 4)?)),
        MatrixDataType::Float32 => Ok(Column::Float32(read_fixed_column(reader, n_rows, 4)?)),
        MatrixDataType::Float64 => Ok(Column::Float64(read_fixed_column(reader, n_rows, 8)?)),
        MatrixDataType::Json => Ok(Column::Json(read_json_column(reader, n_rows)?)),
    }
}

//==================================================================================
// 3. Public API
//==================================================================================

/// Decodes a matrix wire buffer into its structural parts.
///
/// Every column comes back in its native element encoding, exactly as
/// transmitted. Fails with `FormatError` on truncation, unknown tags,
/// inconsistent counts, or trailing bytes.
pub fn decode_matrix(buf: &[u8]) -> Result<DecodedMatrix, CellscopeError> {
    let mut reader = Reader::new(buf);

    let magic = reader.take(4, "magic")?;
    if magic != MATRIX_MAGIC {
        return Err(CellscopeError::FormatError(format!(
            "bad magic {:?}, expected {:?}",
            magic, MATRIX_MAGIC
        )));
    }
    let version = reader.read_u16("format version")?;
    if version != MATRIX_FORMAT_VERSION {
        return Err(CellscopeError::FormatError(format!(
            "unsupported wire format version {}",
            version
        )));
    }

    let n_rows = reader.read_u32("row count")? as usize;
    let n_cols = reader.read_u32("column count")? as usize;

    let mut col_idx = Vec::with_capacity(n_cols);
    for _ in 0..n_cols {
        col_idx.push(read_key(&mut reader)?);
    }

    let mut columns = Vec::with_capacity(n_cols);
    for c in 0..n_cols {
        let column = read_column(&mut reader, n_rows).map_err(|e| match e {
            CellscopeError::FormatError(msg) => {
                CellscopeError::FormatError(format!("column {}: {}", c, msg))
            }
            other => other,
        })?;
        columns.push(column);
    }

    if reader.remaining() != 0 {
        return Err(CellscopeError::FormatError(format!(
            "{} trailing bytes after last column",
            reader.remaining()
        )));
    }

    debug!(
        "decoded matrix: {} rows x {} cols, {} bytes",
        n_rows,
        n_cols,
        buf.len()
    );

    Ok(DecodedMatrix {
        n_rows,
        n_cols,
        col_idx,
        columns,
    })
}

//==================================================================================
// 4. Unit Tests
//==================================================================================
