// In: src/wire/encoder.rs

//! Test-support encoder for the matrix wire format.
//!
//! The core never emits this format in production (the server does); tests
//! need a producer to exercise the decoder and everything above it.

use crate::dataframe::column::Column;
use crate::types::Key;
use crate::wire::format::{KEY_TAG_INT, KEY_TAG_STR, MATRIX_FORMAT_VERSION, MATRIX_MAGIC};

fn write_key(buf: &mut Vec<u8>, key: &Key) {
    match key {
        Key::Int(v) => {
            buf.push(KEY_TAG_INT);
            buf.extend_from_slice(&v.to_le_bytes());
        }
        Key::Str(s) => {
            buf.push(KEY_TAG_STR);
            buf.extend_from_slice(&(s.len() as u32).to_le_bytes());
            buf.extend_from_slice(s.as_bytes());
        }
    }
}

fn write_column(buf: &mut Vec<u8>, column: &Column) {
    buf.push(column.dtype().to_tag());
    match column {
        Column::Int8(v) => buf.extend_from_slice(bytemuck::cast_slice(v)),
        Column::Int16(v) => buf.extend_from_slice(bytemuck::cast_slice(v)),
        Column::Int32(v) => buf.extend_from_slice(bytemuck::cast_slice(v)),
        Column::UInt8(v) => buf.extend_from_slice(v),
        Column::UInt16(v) => buf.extend_from_slice(bytemuck::cast_slice(v)),
        Column::UInt32(v) => buf.extend_from_slice(bytemuck::cast_slice(v)),
        Column::Float32(v) => buf.extend_from_slice(bytemuck::cast_slice(v)),
        Column::Float64(v) => buf.extend_from_slice(bytemuck::cast_slice(v)),
        Column::Json(v) => {
            let body = serde_json::to_vec(v).expect("CellValue serialization cannot fail");
            buf.extend_from_slice(&(body.len() as u32).to_le_bytes());
            buf.extend_from_slice(&body);
        }
    }
}

/// Encodes `(key, column)` pairs into a wire buffer. Panics on length
/// disagreements; this is test scaffolding, not a production surface.
pub(crate) fn encode_matrix(n_rows: usize, cols: &[(Key, Column)]) -> Vec<u8> {
    for (key, column) in cols {
        assert_eq!(
            column.len(),
            n_rows,
            "column {} length disagrees with n_rows",
            key
        );
    }

    let mut buf = Vec::new();
    buf.extend_from_slice(MATRIX_MAGIC);
    buf.extend_from_slice(&MATRIX_FORMAT_VERSION.to_le_bytes());
    buf.extend_from_slice(&(n_rows as u32).to_le_bytes());
    buf.extend_from_slice(&(cols.len() as u32).to_le_bytes());
    for (key, _) in cols {
        write_key(&mut buf, key);
    }
    for (_, column) in cols {
        write_column(&mut buf, column);
    }
    buf
}
