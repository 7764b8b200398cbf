//! Feature record and collection envelope types.
//!
//! Records are GeoJSON-like: only `id` and the `type` tag are typed, the
//! nested `geometry` and `properties` structures stay opaque JSON so the
//! store round-trips whatever the upstream data pipeline produced.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Properties key carrying the forest classification (e.g. `"C3A09"`).
pub const FOREST_TYPE_KEY: &str = "forest_type";

/// A single geospatial feature record.
///
/// `id` is unique within the collection and doubles as the partition/lookup
/// key. Everything else is carried verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Unique record id (e.g. `"item5"`).
    pub id: String,
    /// GeoJSON type tag, normally `"Feature"`.
    #[serde(rename = "type", default = "feature_kind")]
    pub kind: String,
    /// Opaque nested coordinate structure; may be `null`.
    #[serde(default)]
    pub geometry: Value,
    /// Opaque property map, including the forest classification key.
    #[serde(default)]
    pub properties: Map<String, Value>,
}

fn feature_kind() -> String {
    "Feature".to_string()
}

impl Feature {
    /// Create an empty feature with the given id (`null` geometry, no
    /// properties).
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: feature_kind(),
            geometry: Value::Null,
            properties: Map::new(),
        }
    }

    /// Read the forest classification from the property map, if present.
    pub fn forest_type(&self) -> Option<&str> {
        self.properties.get(FOREST_TYPE_KEY).and_then(Value::as_str)
    }
}

/// The `FeatureCollection` envelope wrapped around every feature listing.
///
/// This is a presentation-layer shape built per response, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    /// Always `"FeatureCollection"`.
    #[serde(rename = "type", default = "collection_kind")]
    pub kind: String,
    /// Zero or more wrapped features.
    #[serde(default)]
    pub features: Vec<Feature>,
}

fn collection_kind() -> String {
    "FeatureCollection".to_string()
}

impl FeatureCollection {
    /// Wrap a list of features in the envelope.
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            kind: collection_kind(),
            features,
        }
    }
}

impl From<Vec<Feature>> for FeatureCollection {
    fn from(features: Vec<Feature>) -> Self {
        Self::new(features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_feature_serializes_with_type_tag() {
        let mut feature = Feature::new("item1");
        feature.geometry = json!({"type": "Polygon", "coordinates": []});
        feature
            .properties
            .insert(FOREST_TYPE_KEY.to_string(), json!("C3A09"));

        let value = serde_json::to_value(&feature).unwrap();
        assert_eq!(value["id"], "item1");
        assert_eq!(value["type"], "Feature");
        assert_eq!(value["geometry"]["type"], "Polygon");
        assert_eq!(value["properties"]["forest_type"], "C3A09");
    }

    #[test]
    fn test_feature_deserializes_sparse_record() {
        // Records seeded by the insert tooling carry no geometry or type tag.
        let feature: Feature = serde_json::from_value(json!({
            "id": "item5",
            "properties": {"productName": "Widget", "productModel": "Model 5"}
        }))
        .unwrap();

        assert_eq!(feature.id, "item5");
        assert_eq!(feature.kind, "Feature");
        assert_eq!(feature.geometry, Value::Null);
        assert_eq!(feature.properties["productModel"], "Model 5");
        assert_eq!(feature.forest_type(), None);
    }

    #[test]
    fn test_forest_type_accessor() {
        let mut feature = Feature::new("item1");
        assert_eq!(feature.forest_type(), None);

        feature
            .properties
            .insert(FOREST_TYPE_KEY.to_string(), json!("C3A09"));
        assert_eq!(feature.forest_type(), Some("C3A09"));

        // Non-string classification values are ignored rather than coerced.
        feature
            .properties
            .insert(FOREST_TYPE_KEY.to_string(), json!(42));
        assert_eq!(feature.forest_type(), None);
    }

    #[test]
    fn test_collection_envelope_shape() {
        let collection = FeatureCollection::new(vec![Feature::new("item1")]);
        let value = serde_json::to_value(&collection).unwrap();

        assert_eq!(value["type"], "FeatureCollection");
        assert_eq!(value["features"].as_array().unwrap().len(), 1);

        let empty = FeatureCollection::new(Vec::new());
        let value = serde_json::to_value(&empty).unwrap();
        assert_eq!(value["features"].as_array().unwrap().len(), 0);
    }
}
