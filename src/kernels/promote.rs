//! This module contains the pure, stateless kernel for numeric type promotion.
//!
//! Downstream numeric operations (percentile clipping, missing-value marking)
//! require a float representation capable of encoding NaN; integer encodings
//! cannot carry that sentinel. Every integer column coming off the wire is
//! therefore widened to a float column here, once, right after decode:
//!
//!   8/16-bit integer (signed or unsigned)  -> Float32
//!   32-bit integer   (signed or unsigned)  -> Float64
//!   Float32 / Float64                      -> unchanged, no copy
//!   Json (variable-length/heterogeneous)   -> unchanged
//!
//! The mapping is deterministic and total over the wire decoder's supported
//! encodings. This module is PURE RUST and panic-free.

use num_traits::AsPrimitive;

use crate::dataframe::column::Column;
use crate::error::CellscopeError;
use crate::types::MatrixDataType;

//==================================================================================
// 1. Private Core Logic
//==================================================================================

/// Value-converts a slice of integers into the wider float type.
fn widen<T, F>(values: &[T]) -> Vec<F>
where
    T: Copy + AsPrimitive<F>,
    F: Copy + 'static,
{
    values.iter().map(|v| v.as_()).collect()
}

//==================================================================================
// 2. Public API
//==================================================================================

/// The storage encoding the policy assigns to a native numeric encoding.
/// Variable-length (Json) columns have no numeric promotion.
pub fn promoted_dtype(dtype: MatrixDataType) -> Result<MatrixDataType, CellscopeError> {
    match dtype {
        MatrixDataType::Int8
        | MatrixDataType::UInt8
        | MatrixDataType::Int16
        | MatrixDataType::UInt16 => Ok(MatrixDataType::Float32),
        MatrixDataType::Int32 | MatrixDataType::UInt32 => Ok(MatrixDataType::Float64),
        MatrixDataType::Float32 => Ok(MatrixDataType::Float32),
        MatrixDataType::Float64 => Ok(MatrixDataType::Float64),
        MatrixDataType::Json => Err(CellscopeError::UnsupportedType(
            "variable-length (Json) columns have no numeric promotion".to_string(),
        )),
    }
}

/// Promotes one decoded column to its canonical storage encoding.
///
/// Float and Json columns pass through untouched (no copy). Integer columns
/// are replaced by a newly allocated float column of equal length.
pub fn promote_column(column: Column) -> Result<Column, CellscopeError> {
    // Float data from the server is left as is; so are variable-length columns.
    if column.is_float() || matches!(column, Column::Json(_)) {
        return Ok(column);
    }

    match column {
        Column::Int8(v) => Ok(Column::Float32(widen(&v))),
        Column::UInt8(v) => Ok(Column::Float32(widen(&v))),
        Column::Int16(v) => Ok(Column::Float32(widen(&v))),
        Column::UInt16(v) => Ok(Column::Float32(widen(&v))),
        Column::Int32(v) => Ok(Column::Float64(widen(&v))),
        Column::UInt32(v) => Ok(Column::Float64(widen(&v))),
        other => Err(CellscopeError::UnsupportedType(format!(
            "unexpected data type returned from server: {}",
            other.dtype()
        ))),
    }
}

//==================================================================================
// 3. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CellValue;

    #[test]
    fn test_narrow_ints_promote_to_f32() {
        for column in [
            Column::Int8(vec![-1, 0, 127]),
            Column::UInt8(vec![0, 128, 255]),
            Column::Int16(vec![-300, 0, 300]),
            Column::UInt16(vec![0, 40_000, 65_535]),
        ] {
            let len = column.len();
            let promoted = promote_column(column).unwrap();
            assert_eq!(promoted.dtype(), MatrixDataType::Float32);
            assert_eq!(promoted.len(), len);
        }
    }

    #[test]
    fn test_wide_ints_promote_to_f64() {
        let promoted = promote_column(Column::Int32(vec![i32::MIN, 0, i32::MAX])).unwrap();
        assert_eq!(promoted.dtype(), MatrixDataType::Float64);
        assert_eq!(
            promoted.as_f64_slice().unwrap(),
            &[i32::MIN as f64, 0.0, i32::MAX as f64]
        );

        let promoted = promote_column(Column::UInt32(vec![0, u32::MAX])).unwrap();
        assert_eq!(promoted.dtype(), MatrixDataType::Float64);
        assert_eq!(promoted.as_f64_slice().unwrap(), &[0.0, u32::MAX as f64]);
    }

    #[test]
    fn test_float_columns_pass_through_unchanged() {
        let original = vec![1.0f32, f32::NAN, -2.5];
        let promoted = promote_column(Column::Float32(original.clone())).unwrap();
        // Same variant, same values; no widening to f64.
        assert_eq!(promoted.dtype(), MatrixDataType::Float32);
        let out = promoted.as_f32_slice().unwrap();
        assert_eq!(out.len(), 3);
        assert!(out[1].is_nan());

        let promoted = promote_column(Column::Float64(vec![4.0, 5.0])).unwrap();
        assert_eq!(promoted.dtype(), MatrixDataType::Float64);
    }

    #[test]
    fn test_json_columns_pass_through_unchanged() {
        let column = Column::Json(vec![CellValue::from("a"), CellValue::from("b")]);
        let promoted = promote_column(column.clone()).unwrap();
        assert_eq!(promoted, column);
    }

    #[test]
    fn test_promoted_dtype_mapping_is_deterministic() {
        assert_eq!(
            promoted_dtype(MatrixDataType::Int8).unwrap(),
            MatrixDataType::Float32
        );
        assert_eq!(
            promoted_dtype(MatrixDataType::UInt16).unwrap(),
            MatrixDataType::Float32
        );
        assert_eq!(
            promoted_dtype(MatrixDataType::Int32).unwrap(),
            MatrixDataType::Float64
        );
        assert_eq!(
            promoted_dtype(MatrixDataType::UInt32).unwrap(),
            MatrixDataType::Float64
        );
        assert_eq!(
            promoted_dtype(MatrixDataType::Float32).unwrap(),
            MatrixDataType::Float32
        );
        assert!(promoted_dtype(MatrixDataType::Json).is_err());
    }
}
