// In: src/config.rs

//! The single source of truth for the engine configuration document.
//!
//! This module models the `/config` collaborator response. It is parsed once
//! at the application boundary and passed by reference into dataset assembly;
//! it never alters decoding, but travels with the dataset for REST-contract
//! parity (display names, feature availability flags).

use serde::{Deserialize, Serialize};

/// Human-readable names reported by the serving engine.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DisplayNames {
    /// Name of the backend engine serving the dataset.
    #[serde(default)]
    pub engine: Option<String>,

    /// Human-readable dataset title.
    #[serde(default)]
    pub dataset: Option<String>,
}

/// Availability flag for one optional server capability.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FeatureFlag {
    /// HTTP method of the capability's endpoint (e.g. "POST").
    pub method: String,

    /// Endpoint path (e.g. "/cluster/").
    pub path: String,

    /// Whether the server advertises the capability for this dataset.
    #[serde(default)]
    pub available: bool,
}

/// The parsed `/config` response.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    #[serde(default)]
    pub display_names: DisplayNames,

    #[serde(default)]
    pub features: Vec<FeatureFlag>,
}

impl EngineConfig {
    /// The dataset title to log during assembly, falling back to a stable
    /// placeholder when the server omits one.
    pub fn dataset_title(&self) -> &str {
        self.display_names.dataset.as_deref().unwrap_or("untitled")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_parses_with_defaults() {
        let config: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.dataset_title(), "untitled");
        assert!(config.features.is_empty());
    }

    #[test]
    fn test_config_parses_rest_response_shape() {
        let doc = r#"{
            "displayNames": { "engine": "cellscope", "dataset": "pbmc3k" },
            "features": [
                { "method": "POST", "path": "/cluster/", "available": false }
            ]
        }"#;
        let config: EngineConfig = serde_json::from_str(doc).unwrap();
        assert_eq!(config.dataset_title(), "pbmc3k");
        assert_eq!(config.features.len(), 1);
        assert!(!config.features[0].available);
    }
}
