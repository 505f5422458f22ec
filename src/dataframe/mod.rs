//! The fixed-shape, column-oriented, key-indexed in-memory table.
//!
//! A `Dataframe` is created fully-formed from decoded data (or as the empty
//! sentinel) and never mutated afterwards; the only interior state is each
//! column's fill-once summary cache. Two threads may read one dataframe and
//! its summaries concurrently.

pub mod column;
pub mod key_index;

pub use column::{Column, ColumnHandle, ColumnSummary};
pub use key_index::KeyIndex;

use crate::error::CellscopeError;
use crate::types::{CellValue, Key};

#[derive(Debug)]
pub struct Dataframe {
    shape: [usize; 2],
    columns: Vec<ColumnHandle>,
    row_index: KeyIndex,
    col_index: KeyIndex,
}

impl Dataframe {
    /// The zero-shape sentinel, used by the template universe before data
    /// arrives.
    pub fn empty() -> Self {
        Self {
            shape: [0, 0],
            columns: Vec::new(),
            row_index: KeyIndex::identity(0),
            col_index: KeyIndex::identity(0),
        }
    }

    /// Constructs a dataframe from decoded columns.
    ///
    /// `None` indices default to the identity over the matching dimension.
    /// Fails with `ShapeError` if any column length disagrees with
    /// `shape[0]`, the column count disagrees with `shape[1]`, or an index
    /// cardinality disagrees with its dimension.
    pub fn new(
        shape: [usize; 2],
        columns: Vec<Column>,
        row_index: Option<KeyIndex>,
        col_index: Option<KeyIndex>,
    ) -> Result<Self, CellscopeError> {
        let [n_rows, n_cols] = shape;

        if columns.len() != n_cols {
            return Err(CellscopeError::ShapeError(format!(
                "{} columns provided, shape declares {}",
                columns.len(),
                n_cols
            )));
        }
        for (i, column) in columns.iter().enumerate() {
            if column.len() != n_rows {
                return Err(CellscopeError::ShapeError(format!(
                    "column {} has {} rows, shape declares {}",
                    i,
                    column.len(),
                    n_rows
                )));
            }
        }

        let row_index = row_index.unwrap_or_else(|| KeyIndex::identity(n_rows));
        let col_index = col_index.unwrap_or_else(|| KeyIndex::identity(n_cols));
        if row_index.len() != n_rows {
            return Err(CellscopeError::ShapeError(format!(
                "row index has {} entries, shape declares {} rows",
                row_index.len(),
                n_rows
            )));
        }
        if col_index.len() != n_cols {
            return Err(CellscopeError::ShapeError(format!(
                "column index has {} entries, shape declares {} columns",
                col_index.len(),
                n_cols
            )));
        }

        Ok(Self {
            shape,
            columns: columns.into_iter().map(ColumnHandle::new).collect(),
            row_index,
            col_index,
        })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.shape[0]
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn shape(&self) -> [usize; 2] {
        self.shape
    }

    pub fn row_index(&self) -> &KeyIndex {
        &self.row_index
    }

    pub fn col_index(&self) -> &KeyIndex {
        &self.col_index
    }

    /// Element lookup through both indices.
    pub fn at(
        &self,
        row_key: impl Into<Key>,
        col_key: impl Into<Key>,
    ) -> Result<CellValue, CellscopeError> {
        let row_key = row_key.into();
        let col_key = col_key.into();
        let row = self
            .row_index
            .position_of(&row_key)
            .ok_or_else(|| CellscopeError::KeyError(format!("row key '{}'", row_key)))?;
        let col = self
            .col_index
            .position_of(&col_key)
            .ok_or_else(|| CellscopeError::KeyError(format!("column key '{}'", col_key)))?;
        Ok(self.columns[col].column().value_at(row))
    }

    /// The column under `col_key`, with access to its memoized summary.
    pub fn col(&self, col_key: impl Into<Key>) -> Result<&ColumnHandle, CellscopeError> {
        let col_key = col_key.into();
        let col = self
            .col_index
            .position_of(&col_key)
            .ok_or_else(|| CellscopeError::KeyError(format!("column key '{}'", col_key)))?;
        Ok(&self.columns[col])
    }

    pub fn has_col(&self, col_key: &Key) -> bool {
        self.col_index.contains(col_key)
    }
}
