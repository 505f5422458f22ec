// In: src/universe/var_data.rs

//! On-demand variable (expression) data extraction.
//!
//! The `/data/var` endpoint returns a matrix wire buffer whose column keys
//! are positional indices into the variable annotations. This module
//! converts that binary encoding into a name-keyed mapping of numeric
//! columns for visualization consumption.

use hashbrown::HashMap;

use crate::dataframe::Column;
use crate::error::CellscopeError;
use crate::universe::Universe;
use crate::wire::decode_matrix;

/// Decodes an expression buffer into `variable name -> column`.
///
/// Expression data must already be floating-point; no promotion is applied
/// and any other encoding is an `UnexpectedType` error. Each wire column key
/// resolves through `universe.var_annotations.at(position, "name")`.
/// Uniqueness of variable names is assumed, not re-validated here.
pub fn extract_var_data(
    universe: &Universe,
    buf: &[u8],
) -> Result<HashMap<String, Column>, CellscopeError> {
    let decoded = decode_matrix(buf)?;

    for (key, column) in decoded.col_idx.iter().zip(&decoded.columns) {
        if !column.is_float() {
            return Err(CellscopeError::UnexpectedType(format!(
                "expression column '{}' is {}",
                key,
                column.dtype()
            )));
        }
    }

    let mut result = HashMap::with_capacity(decoded.n_cols);
    for (key, column) in decoded.col_idx.into_iter().zip(decoded.columns) {
        let name_cell = universe.var_annotations.at(key.clone(), "name")?;
        let name = name_cell.as_str().ok_or_else(|| {
            CellscopeError::UnexpectedType(format!(
                "var annotation 'name' at row {} is not a string",
                key
            ))
        })?;
        result.insert(name.to_string(), column);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::types::{CellValue, Key};
    use crate::universe::{create_universe_from_response, SchemaDocument};
    use crate::wire::encoder::encode_matrix;

    /// A universe with 3 obs and 8 var rows, var names gene0..gene7.
    fn test_universe() -> Universe {
        let schema: SchemaDocument = serde_json::from_value(serde_json::json!({
            "dataframe": { "nObs": 3, "nVar": 8 },
            "annotations": {
                "obs": [{ "name": "tissue", "type": "string" }],
                "var": [{ "name": "name", "type": "string" }]
            }
        }))
        .unwrap();

        let obs_buf = encode_matrix(
            3,
            &[(
                Key::from("tissue"),
                Column::Json(vec![
                    CellValue::from("lung"),
                    CellValue::from("lung"),
                    CellValue::from("liver"),
                ]),
            )],
        );
        let names: Vec<CellValue> = (0..8)
            .map(|i| CellValue::String(format!("gene{}", i)))
            .collect();
        let var_buf = encode_matrix(8, &[(Key::from("name"), Column::Json(names))]);
        let layout_buf = encode_matrix(
            3,
            &[
                (Key::from("umap_0"), Column::Float32(vec![0.0, 1.0, 2.0])),
                (Key::from("umap_1"), Column::Float32(vec![0.0, 1.0, 2.0])),
            ],
        );

        create_universe_from_response(
            &EngineConfig::default(),
            schema,
            &obs_buf,
            &var_buf,
            &layout_buf,
        )
        .unwrap()
    }

    #[test]
    fn test_positional_keys_resolve_to_variable_names() {
        let universe = test_universe();
        let buf = encode_matrix(
            3,
            &[
                (Key::Int(7), Column::Float32(vec![0.0, 0.5, 1.0])),
                (Key::Int(2), Column::Float64(vec![2.0, 2.5, 3.0])),
            ],
        );

        let result = extract_var_data(&universe, &buf).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(
            result.get("gene7").unwrap(),
            &Column::Float32(vec![0.0, 0.5, 1.0])
        );
        assert_eq!(
            result.get("gene2").unwrap(),
            &Column::Float64(vec![2.0, 2.5, 3.0])
        );
    }

    #[test]
    fn test_non_float_expression_data_is_rejected() {
        let universe = test_universe();
        let buf = encode_matrix(3, &[(Key::Int(0), Column::Int16(vec![1, 2, 3]))]);
        assert!(matches!(
            extract_var_data(&universe, &buf),
            Err(CellscopeError::UnexpectedType(_))
        ));
    }

    #[test]
    fn test_out_of_range_positional_key_is_a_key_error() {
        let universe = test_universe();
        let buf = encode_matrix(3, &[(Key::Int(99), Column::Float32(vec![0.0; 3]))]);
        assert!(matches!(
            extract_var_data(&universe, &buf),
            Err(CellscopeError::KeyError(_))
        ));
    }
}
