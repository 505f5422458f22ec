// In: src/dataframe/column.rs

//! The typed, immutable column and its lazily-computed summary.
//!
//! A `Column` owns its values in the native encoding the wire decoder
//! produced (or the promotion kernel widened them to). Summaries are computed
//! at most once per column under a fill-once guard, so concurrent readers of
//! a shared dataframe never re-scan a column and never observe a partially
//! built summary.

use std::sync::OnceLock;

use serde::Serialize;

use crate::kernels::ordered_set::OrderedSet;
use crate::types::{CellValue, MatrixDataType};

/// A homogeneous, fixed-length sequence of values.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Int8(Vec<i8>),
    Int16(Vec<i16>),
    Int32(Vec<i32>),
    UInt8(Vec<u8>),
    UInt16(Vec<u16>),
    UInt32(Vec<u32>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
    /// Variable-length/heterogeneous data from a JSON-encoded wire column
    /// (annotation labels, booleans, free text).
    Json(Vec<CellValue>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Int8(v) => v.len(),
            Column::Int16(v) => v.len(),
            Column::Int32(v) => v.len(),
            Column::UInt8(v) => v.len(),
            Column::UInt16(v) => v.len(),
            Column::UInt32(v) => v.len(),
            Column::Float32(v) => v.len(),
            Column::Float64(v) => v.len(),
            Column::Json(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The canonical element encoding of this column.
    pub fn dtype(&self) -> MatrixDataType {
        match self {
            Column::Int8(_) => MatrixDataType::Int8,
            Column::Int16(_) => MatrixDataType::Int16,
            Column::Int32(_) => MatrixDataType::Int32,
            Column::UInt8(_) => MatrixDataType::UInt8,
            Column::UInt16(_) => MatrixDataType::UInt16,
            Column::UInt32(_) => MatrixDataType::UInt32,
            Column::Float32(_) => MatrixDataType::Float32,
            Column::Float64(_) => MatrixDataType::Float64,
            Column::Json(_) => MatrixDataType::Json,
        }
    }

    /// Returns `true` if this column stores floating-point values.
    pub fn is_float(&self) -> bool {
        self.dtype().is_float()
    }

    /// The value at position `i` as a `CellValue`. Callers must bounds-check
    /// via the owning dataframe's indices; `i` is a resolved dense position.
    pub(crate) fn value_at(&self, i: usize) -> CellValue {
        match self {
            Column::Int8(v) => CellValue::Int(v[i] as i64),
            Column::Int16(v) => CellValue::Int(v[i] as i64),
            Column::Int32(v) => CellValue::Int(v[i] as i64),
            Column::UInt8(v) => CellValue::Int(v[i] as i64),
            Column::UInt16(v) => CellValue::Int(v[i] as i64),
            Column::UInt32(v) => CellValue::Int(v[i] as i64),
            Column::Float32(v) => CellValue::Float(v[i] as f64),
            Column::Float64(v) => CellValue::Float(v[i]),
            Column::Json(v) => v[i].clone(),
        }
    }

    /// Borrow the float32 payload, if that is the native encoding.
    pub fn as_f32_slice(&self) -> Option<&[f32]> {
        match self {
            Column::Float32(v) => Some(v),
            _ => None,
        }
    }

    /// Borrow the float64 payload, if that is the native encoding.
    pub fn as_f64_slice(&self) -> Option<&[f64]> {
        match self {
            Column::Float64(v) => Some(v),
            _ => None,
        }
    }
}

/// The per-column summary: distinct observed values in first-occurrence
/// order, plus numeric extrema for float columns. Downstream code uses
/// `categories` to detect and enumerate categorical levels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    /// Distinct observed values, insertion order of first occurrence.
    pub categories: Vec<CellValue>,
    /// Minimum finite value (float columns only).
    pub min: Option<f64>,
    /// Maximum finite value (float columns only).
    pub max: Option<f64>,
    /// Count of NaN elements (float columns only; zero otherwise).
    pub nan_count: usize,
}

/// A column slot inside a dataframe: the column plus its memoized summary.
#[derive(Debug)]
pub struct ColumnHandle {
    column: Column,
    summary: OnceLock<ColumnSummary>,
}

impl ColumnHandle {
    pub(crate) fn new(column: Column) -> Self {
        Self {
            column,
            summary: OnceLock::new(),
        }
    }

    pub fn column(&self) -> &Column {
        &self.column
    }

    /// Compute-once, cache-forever summary. Safe under concurrent first
    /// access: `OnceLock` guarantees a single winner and identical results
    /// for all readers.
    pub fn summarize(&self) -> &ColumnSummary {
        self.summary.get_or_init(|| summarize_column(&self.column))
    }
}

fn summarize_column(column: &Column) -> ColumnSummary {
    let mut categories = OrderedSet::with_capacity(column.len().min(1024));
    let mut min: Option<f64> = None;
    let mut max: Option<f64> = None;
    let mut nan_count = 0usize;

    for i in 0..column.len() {
        let value = column.value_at(i);
        if let CellValue::Float(f) = value {
            if f.is_nan() {
                nan_count += 1;
            } else {
                min = Some(min.map_or(f, |m| m.min(f)));
                max = Some(max.map_or(f, |m| m.max(f)));
            }
        }
        categories.insert(value);
    }

    ColumnSummary {
        categories: categories.into_vec(),
        min,
        max,
        nan_count,
    }
}
