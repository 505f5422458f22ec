//! This module implements storage of the "Universe": all of the obs/var
//! annotations, the 2-D layout, and the reconciled schema for one loaded
//! dataset.
//!
//! A Universe is assembled once from already-fetched response buffers and is
//! replaced wholesale (never patched) when a new dataset loads. Consumers own
//! it by value and pass it by reference; there is no module-level singleton.

pub mod schema;
pub mod var_data;

pub use schema::{Schema, SchemaDocument};
pub use var_data::extract_var_data;

use log::{debug, warn};

use crate::config::EngineConfig;
use crate::dataframe::{Dataframe, KeyIndex};
use crate::error::CellscopeError;
use crate::kernels::ordered_set::union_preserving_order;
use crate::kernels::promote::promote_column;
use crate::types::Key;
use crate::wire::decode_matrix;

/// Layout method prefixes searched in priority order when selecting the 2-D
/// coordinate pair. If none match, the first two columns in wire order are
/// used. That fallback is deliberate: it keeps single-layout datasets working
/// without method names, at the cost of silently accepting whatever the
/// server put first.
const LAYOUT_PRIORITY: [&str; 3] = ["umap", "tsne", "pca"];

/// The fully assembled, validated in-memory dataset.
#[derive(Debug)]
pub struct Universe {
    pub n_obs: usize,
    pub n_var: usize,
    pub schema: Schema,
    pub obs_annotations: Dataframe,
    pub var_annotations: Dataframe,
    pub obs_layout: Dataframe,
    /// On-demand expression columns land here in downstream state; starts as
    /// the empty sentinel.
    pub var_data: Dataframe,
}

//==================================================================================
// I. Private assembly steps
//==================================================================================

/// Decodes an annotations buffer into a dataframe, promoting every column to
/// its canonical storage encoding and indexing columns by wire field name.
fn annotations_to_dataframe(buf: &[u8]) -> Result<Dataframe, CellscopeError> {
    let decoded = decode_matrix(buf)?;
    let columns = decoded
        .columns
        .into_iter()
        .map(promote_column)
        .collect::<Result<Vec<_>, _>>()?;
    Dataframe::new(
        [decoded.n_rows, decoded.n_cols],
        columns,
        None,
        Some(KeyIndex::from_keys(decoded.col_idx)?),
    )
}

/// Decodes a layout buffer and selects the 2-D coordinate pair.
///
/// No promotion: layout data must arrive floating-point, and integer layout
/// data is a server contract violation we want surfaced, not widened away.
fn layout_to_dataframe(buf: &[u8]) -> Result<Dataframe, CellscopeError> {
    let decoded = decode_matrix(buf)?;
    if decoded.n_cols < 2 {
        return Err(CellscopeError::LayoutFormatError(format!(
            "layout has {} columns, need at least 2",
            decoded.n_cols
        )));
    }

    let (x, y) = select_layout_pair(&decoded.col_idx);
    debug!(
        "layout columns selected: {} / {}",
        decoded.col_idx[x], decoded.col_idx[y]
    );

    let mut columns = Vec::with_capacity(2);
    for pos in [x, y] {
        let column = &decoded.columns[pos];
        if !column.is_float() {
            return Err(CellscopeError::LayoutFormatError(format!(
                "layout column '{}' is {}, expected floating-point",
                decoded.col_idx[pos],
                column.dtype()
            )));
        }
        columns.push(column.clone());
    }

    Dataframe::new(
        [decoded.n_rows, 2],
        columns,
        None,
        Some(KeyIndex::from_keys(vec![Key::from("X"), Key::from("Y")])?),
    )
}

/// Positional `(x, y)` pair for the highest-priority layout method whose
/// `{prefix}_0`/`{prefix}_1` columns are both present; first two columns in
/// wire order otherwise.
fn select_layout_pair(col_idx: &[Key]) -> (usize, usize) {
    let position_of = |name: String| {
        col_idx
            .iter()
            .position(|k| matches!(k, Key::Str(s) if *s == name))
    };
    for prefix in LAYOUT_PRIORITY {
        if let (Some(x), Some(y)) = (
            position_of(format!("{}_0", prefix)),
            position_of(format!("{}_1", prefix)),
        ) {
            return (x, y);
        }
    }
    warn!("no known layout method among column keys; defaulting to first two columns");
    (0, 1)
}

/// Where fields are treated as (essentially) categorical metadata, update the
/// schema with data-derived categories in addition to those declared.
///
/// Boolean and string fields typically arrive without explicit category
/// declarations; after this step every category-capable observation field
/// exposes a populated, first-seen-ordered `categories` list.
fn reconcile_schema_categories(
    document: &mut SchemaDocument,
    obs_annotations: &Dataframe,
) -> Result<(), CellscopeError> {
    for field in document
        .annotations
        .obs
        .iter_mut()
        .filter(|f| f.field_type.is_category_capable())
    {
        let summary = obs_annotations.col(field.name.as_str())?.summarize();
        let declared = field.categories.take().unwrap_or_default();
        field.categories = Some(union_preserving_order(&declared, &summary.categories));
    }
    Ok(())
}

//==================================================================================
// II. Public API
//==================================================================================

/// Builds and returns a Universe from the `/config`, `/schema`,
/// `/annotations/obs`, `/annotations/var` and `/layout/obs` responses.
///
/// Either every invariant holds and a fully valid Universe is returned, or
/// the first violation is surfaced and nothing is kept. Partial datasets are
/// never accepted.
pub fn create_universe_from_response(
    config: &EngineConfig,
    schema_document: SchemaDocument,
    obs_annotations_buf: &[u8],
    var_annotations_buf: &[u8],
    layout_buf: &[u8],
) -> Result<Universe, CellscopeError> {
    let mut document = schema_document;
    let n_obs = document.dataframe.n_obs;
    let n_var = document.dataframe.n_var;
    debug!(
        "assembling universe '{}': declared {} obs x {} var",
        config.dataset_title(),
        n_obs,
        n_var
    );

    let obs_annotations = annotations_to_dataframe(obs_annotations_buf)?;
    let var_annotations = annotations_to_dataframe(var_annotations_buf)?;
    let obs_layout = layout_to_dataframe(layout_buf)?;

    // Dimensional invariants, enforced once, never re-checked.
    if n_obs != obs_annotations.len() {
        return Err(CellscopeError::DatasetIntegrityError(format!(
            "schema declares {} obs, annotations have {} rows",
            n_obs,
            obs_annotations.len()
        )));
    }
    if n_obs != obs_layout.len() {
        return Err(CellscopeError::DatasetIntegrityError(format!(
            "schema declares {} obs, layout has {} rows",
            n_obs,
            obs_layout.len()
        )));
    }
    if n_var != var_annotations.len() {
        return Err(CellscopeError::DatasetIntegrityError(format!(
            "schema declares {} var, annotations have {} rows",
            n_var,
            var_annotations.len()
        )));
    }

    reconcile_schema_categories(&mut document, &obs_annotations)?;

    Ok(Universe {
        n_obs,
        n_var,
        schema: Schema::index(document),
        obs_annotations,
        var_annotations,
        obs_layout,
        var_data: Dataframe::empty(),
    })
}

//==================================================================================
// III. Unit Tests
//==================================================================================
