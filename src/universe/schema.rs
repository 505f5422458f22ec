// In: src/universe/schema.rs

//! The dataset schema document and its name-indexed form.
//!
//! The raw `SchemaDocument` mirrors the `/schema` collaborator response.
//! After assembly reconciles categories against observed data, the document
//! is frozen into a `Schema`, which adds the two name→field lookup maps
//! downstream consumers rely on for O(1) field access.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::types::CellValue;

/// Declared dataset dimensions.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DataframeSchema {
    pub n_obs: usize,
    pub n_var: usize,

    /// Declared element type of the expression matrix, if the server reports
    /// one (e.g. "float32"). Informational.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub dtype: Option<String>,
}

/// The declared type of an annotation field.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Boolean,
    Categorical,
    Int32,
    Float32,
    Float64,
}

impl FieldType {
    /// Fields treated as (essentially) categorical metadata: their category
    /// sets are reconciled against observed data at assembly time.
    pub fn is_category_capable(&self) -> bool {
        matches!(self, Self::String | Self::Boolean | Self::Categorical)
    }
}

/// One annotation field descriptor.
///
/// `categories` may be omitted by the schema author (boolean and free-text
/// fields usually omit it); assembly fills it in from data so consumers see
/// one uniform contract.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,

    #[serde(rename = "type")]
    pub field_type: FieldType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<CellValue>>,
}

/// The declared annotation fields for both axes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AnnotationsSchema {
    pub obs: Vec<FieldDescriptor>,
    pub var: Vec<FieldDescriptor>,
}

/// The raw `/schema` response document.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SchemaDocument {
    pub dataframe: DataframeSchema,
    pub annotations: AnnotationsSchema,
}

/// The assembled schema: the (reconciled) document plus name-indexed lookup
/// maps built once for O(1) field access.
#[derive(Debug, Clone)]
pub struct Schema {
    pub dataframe: DataframeSchema,
    pub obs: Vec<FieldDescriptor>,
    pub var: Vec<FieldDescriptor>,
    obs_by_name: HashMap<String, usize>,
    var_by_name: HashMap<String, usize>,
}

impl Schema {
    /// Freezes a (post-reconciliation) document, building the lookup maps.
    pub fn index(document: SchemaDocument) -> Self {
        let obs_by_name = document
            .annotations
            .obs
            .iter()
            .enumerate()
            .map(|(i, f)| (f.name.clone(), i))
            .collect();
        let var_by_name = document
            .annotations
            .var
            .iter()
            .enumerate()
            .map(|(i, f)| (f.name.clone(), i))
            .collect();
        Self {
            dataframe: document.dataframe,
            obs: document.annotations.obs,
            var: document.annotations.var,
            obs_by_name,
            var_by_name,
        }
    }

    /// O(1) observation-field lookup by name.
    pub fn obs_field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.obs_by_name.get(name).map(|&i| &self.obs[i])
    }

    /// O(1) variable-field lookup by name.
    pub fn var_field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.var_by_name.get(name).map(|&i| &self.var[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> SchemaDocument {
        serde_json::from_value(serde_json::json!({
            "dataframe": { "nObs": 4, "nVar": 2, "type": "float32" },
            "annotations": {
                "obs": [
                    { "name": "name", "type": "string" },
                    { "name": "tissue", "type": "categorical",
                      "categories": ["lung", "liver"] },
                    { "name": "is_control", "type": "boolean" },
                    { "name": "n_genes", "type": "int32" }
                ],
                "var": [
                    { "name": "name", "type": "string" }
                ]
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_document_parses_rest_shape() {
        let doc = sample_document();
        assert_eq!(doc.dataframe.n_obs, 4);
        assert_eq!(doc.dataframe.n_var, 2);
        assert_eq!(doc.annotations.obs.len(), 4);
        assert_eq!(
            doc.annotations.obs[1].categories,
            Some(vec![CellValue::from("lung"), CellValue::from("liver")])
        );
        assert_eq!(doc.annotations.obs[2].categories, None);
        assert!(doc.annotations.obs[2].field_type.is_category_capable());
        assert!(!doc.annotations.obs[3].field_type.is_category_capable());
    }

    #[test]
    fn test_indexed_schema_lookups() {
        let schema = Schema::index(sample_document());
        assert_eq!(
            schema.obs_field("tissue").unwrap().field_type,
            FieldType::Categorical
        );
        assert_eq!(
            schema.var_field("name").unwrap().field_type,
            FieldType::String
        );
        assert!(schema.obs_field("nonexistent").is_none());
    }
}
