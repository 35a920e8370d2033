use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

const FEATURE_COLLECTION: &str = "FeatureCollection";

#[derive(Debug, Error)]
pub enum GeoJsonError {
    #[error("invalid GeoJSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("expected a FeatureCollection, found {0:?}")]
    NotFeatureCollection(String),
}

/// County boundary document. Only the feature properties are inspected;
/// geometry and any other members pass through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: String,
    pub features: Vec<BoundaryFeature>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FeatureCollection {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, GeoJsonError> {
        let collection: Self = serde_json::from_slice(bytes)?;
        if collection.kind != FEATURE_COLLECTION {
            return Err(GeoJsonError::NotFeatureCollection(collection.kind));
        }
        Ok(collection)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryFeature {
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl BoundaryFeature {
    /// String value of `property`, if present.
    pub fn name(&self, property: &str) -> Option<&str> {
        self.properties.as_ref()?.get(property)?.as_str()
    }
}
