//! Point features and their geometry.
//!
//! Features are owned by the caller. Displacement only reads their coordinates
//! and hands back clones with a new geometry, so the originals are never touched.
//!
//! The serialized layout follows GeoJSON closely enough that a map client can
//! pass its features through without a conversion step:
//!
//! ```json
//! { "id": 7, "geometry": { "type": "Point", "coordinates": [12.5, 41.9] }, "properties": { "name": "a" } }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::InputError;

/// A position in map units.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Offset this coordinate by `(dx, dy)`.
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }

    pub fn distance(&self, other: &Coordinate) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(c: Coordinate) -> Self {
        [c.x, c.y]
    }
}

/// Geometry of a feature. Only points take part in displacement; the other
/// variants exist so connector lines can be expressed and so foreign input
/// can be rejected with a proper error instead of a parse failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Point(Coordinate),
    LineString(Vec<Coordinate>),
    Polygon(Vec<Vec<Coordinate>>),
}

impl Geometry {
    /// GeoJSON type name.
    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::LineString(_) => "LineString",
            Geometry::Polygon(_) => "Polygon",
        }
    }
}

/// Feature identity as it appears in GeoJSON: either a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureId {
    Number(i64),
    Text(String),
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureId::Number(n) => write!(f, "{n}"),
            FeatureId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for FeatureId {
    fn from(n: i64) -> Self {
        FeatureId::Number(n)
    }
}

impl From<&str> for FeatureId {
    fn from(s: &str) -> Self {
        FeatureId::Text(s.to_string())
    }
}

/// An identity-bearing feature with an open attribute map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FeatureId>,
    pub geometry: Geometry,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub properties: Map<String, Value>,
}

impl Feature {
    /// Create a point feature without attributes.
    pub fn point(id: impl Into<FeatureId>, coordinate: Coordinate) -> Self {
        Self {
            id: Some(id.into()),
            geometry: Geometry::Point(coordinate),
            properties: Map::new(),
        }
    }

    /// Create an anonymous feature (used for derived artifacts like ring markers).
    pub fn anonymous(geometry: Geometry) -> Self {
        Self { id: None, geometry, properties: Map::new() }
    }

    pub fn with_property(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// The point coordinate of this feature.
    ///
    /// Fails for non-point geometries and for NaN/infinite coordinates.
    pub fn coordinate(&self) -> Result<Coordinate, InputError> {
        match &self.geometry {
            Geometry::Point(c) if c.is_finite() => Ok(*c),
            Geometry::Point(_) => Err(InputError::NonFiniteCoordinate { id: self.describe_id() }),
            other => Err(InputError::NonPointGeometry {
                id: self.describe_id(),
                kind: other.kind(),
            }),
        }
    }

    /// Clone this feature with its geometry replaced by a point at `coordinate`.
    /// Id and attributes are carried over unchanged.
    pub fn moved_to(&self, coordinate: Coordinate) -> Self {
        Self {
            id: self.id.clone(),
            geometry: Geometry::Point(coordinate),
            properties: self.properties.clone(),
        }
    }

    fn describe_id(&self) -> String {
        self.id.as_ref().map_or_else(|| "<anonymous>".to_string(), ToString::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_geojson_point() {
        let f: Feature = serde_json::from_value(json!({
            "id": "a",
            "geometry": { "type": "Point", "coordinates": [1.5, -2.0] },
            "properties": { "name": "cafe" }
        }))
        .unwrap();

        assert_eq!(f.id, Some(FeatureId::Text("a".to_string())));
        assert_eq!(f.coordinate().unwrap(), Coordinate::new(1.5, -2.0));
        assert_eq!(f.property("name"), Some(&json!("cafe")));
    }

    #[test]
    fn test_numeric_id_and_missing_properties() {
        let f: Feature = serde_json::from_value(json!({
            "id": 3,
            "geometry": { "type": "Point", "coordinates": [0.0, 0.0] }
        }))
        .unwrap();

        assert_eq!(f.id, Some(FeatureId::Number(3)));
        assert!(f.properties.is_empty());
    }

    #[test]
    fn test_polygon_is_rejected() {
        let f = Feature {
            id: Some(FeatureId::from(9_i64)),
            geometry: Geometry::Polygon(vec![vec![Coordinate::new(0.0, 0.0)]]),
            properties: Map::new(),
        };

        match f.coordinate() {
            Err(InputError::NonPointGeometry { id, kind }) => {
                assert_eq!(id, "9");
                assert_eq!(kind, "Polygon");
            }
            other => panic!("expected NonPointGeometry, got {:?}", other),
        }
    }

    #[test]
    fn test_nan_coordinate_is_rejected() {
        let f = Feature::point("x", Coordinate::new(f64::NAN, 1.0));
        assert!(matches!(f.coordinate(), Err(InputError::NonFiniteCoordinate { .. })));
    }

    #[test]
    fn test_moved_to_keeps_identity_and_attributes() {
        let original = Feature::point(1_i64, Coordinate::new(5.0, 5.0)).with_property("kind", "tree");
        let moved = original.moved_to(Coordinate::new(6.0, 7.0));

        assert_eq!(moved.id, original.id);
        assert_eq!(moved.properties, original.properties);
        assert_eq!(moved.coordinate().unwrap(), Coordinate::new(6.0, 7.0));
        // Original untouched
        assert_eq!(original.coordinate().unwrap(), Coordinate::new(5.0, 5.0));
    }

    #[test]
    fn test_serialize_skips_empty_fields() {
        let f = Feature::anonymous(Geometry::Point(Coordinate::new(1.0, 2.0)));
        let v = serde_json::to_value(&f).unwrap();
        assert_eq!(v, json!({ "geometry": { "type": "Point", "coordinates": [1.0, 2.0] } }));
    }
}
