//! Output types for map client consumption.
//!
//! A [`Snapshot`] holds everything one refresh produced. The JSON structs at
//! the bottom are what the WASM bindings hand back to JavaScript.

use serde::Serialize;
use serde_json::{Value, json};

use crate::error::DisplaceError;
use crate::feature::{Coordinate, Feature, Geometry};

/// Attribute key carrying ring marker data (`{ "radius": px, "members": n }`).
pub const RING_PROPERTY: &str = "ring";
/// Attribute key carrying connector data (`{ "member": id }`).
pub const CONNECTOR_PROPERTY: &str = "connector";

/// Everything produced by one refresh. Replaced wholesale, never patched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    /// Centroid → displaced member lines.
    pub connectors: Vec<Feature>,
    /// One marker per displaced group, at its centroid.
    pub rings: Vec<Feature>,
    /// Members of single-feature groups, unmoved.
    pub singles: Vec<Feature>,
    /// Clones of group members moved onto their ring.
    pub displaced: Vec<Feature>,
}

impl Snapshot {
    /// All features in draw order, bottom to top:
    /// connectors, ring markers, single features, displaced features.
    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.connectors
            .iter()
            .chain(&self.rings)
            .chain(&self.singles)
            .chain(&self.displaced)
    }

    pub fn all_features(&self) -> Vec<Feature> {
        self.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.connectors.len() + self.rings.len() + self.singles.len() + self.displaced.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Ring marker for a displaced group. `radius` is in pixels.
pub fn ring_marker(centroid: Coordinate, radius: f64, members: usize) -> Feature {
    Feature::anonymous(Geometry::Point(centroid))
        .with_property(RING_PROPERTY, json!({ "radius": radius, "members": members }))
}

/// Line from a group's centroid to one displaced member.
pub fn connector(centroid: Coordinate, member: &Feature, position: Coordinate) -> Feature {
    let member_id = member
        .id
        .as_ref()
        .and_then(|id| serde_json::to_value(id).ok())
        .unwrap_or(Value::Null);
    Feature::anonymous(Geometry::LineString(vec![centroid, position]))
        .with_property(CONNECTOR_PROPERTY, json!({ "member": member_id }))
}

/// Error information for the map client
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    /// "configuration", "input" or "json"
    pub kind: &'static str,
    pub message: String,
}

impl From<&DisplaceError> for ErrorInfo {
    fn from(e: &DisplaceError) -> Self {
        let kind = match e {
            DisplaceError::Configuration(_) => "configuration",
            DisplaceError::Input(_) => "input",
            DisplaceError::Json(_) => "json",
        };
        Self { kind, message: e.to_string() }
    }
}

/// The combined output sent to the map client
#[derive(Debug, Clone, Serialize)]
pub struct LayerOutput {
    pub features: Vec<Feature>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl LayerOutput {
    pub fn from_result(result: Result<Vec<Feature>, DisplaceError>) -> Self {
        match result {
            Ok(features) => Self { features, error: None },
            Err(e) => Self { features: vec![], error: Some(ErrorInfo::from(&e)) },
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| json_error(&e.to_string()))
    }
}

/// Output for a failure to serialize the output itself.
fn json_error(message: &str) -> String {
    json!({ "features": [], "error": { "kind": "json", "message": message } }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InputError;
    use crate::feature::FeatureId;

    fn p(id: i64) -> Feature {
        Feature::point(id, Coordinate::new(id as f64, 0.0))
    }

    #[test]
    fn test_draw_order() {
        let snap = Snapshot {
            connectors: vec![p(1)],
            rings: vec![p(2)],
            singles: vec![p(3)],
            displaced: vec![p(4), p(5)],
        };
        let ids: Vec<FeatureId> = snap.iter().filter_map(|f| f.id.clone()).collect();
        let expected: Vec<FeatureId> = (1..=5).map(FeatureId::Number).collect();
        assert_eq!(ids, expected);
        assert_eq!(snap.len(), 5);
        assert_eq!(snap.all_features().len(), 5);
    }

    #[test]
    fn test_empty_snapshot() {
        assert!(Snapshot::default().is_empty());
        assert!(Snapshot::default().all_features().is_empty());
    }

    #[test]
    fn test_ring_marker_properties() {
        let m = ring_marker(Coordinate::new(1.0, 2.0), 19.5, 4);
        assert_eq!(m.id, None);
        assert_eq!(m.geometry, Geometry::Point(Coordinate::new(1.0, 2.0)));
        assert_eq!(m.property(RING_PROPERTY), Some(&json!({ "radius": 19.5, "members": 4 })));
    }

    #[test]
    fn test_connector_links_centroid_to_member() {
        let member = Feature::point("cafe", Coordinate::new(0.0, 0.0));
        let c = connector(Coordinate::new(0.0, 0.0), &member, Coordinate::new(0.0, 3.0));
        assert_eq!(
            c.geometry,
            Geometry::LineString(vec![Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 3.0)])
        );
        assert_eq!(c.property(CONNECTOR_PROPERTY), Some(&json!({ "member": "cafe" })));
    }

    #[test]
    fn test_error_output_json() {
        let out = LayerOutput::from_result(Err(InputError::InvalidResolution(-1.0).into()));
        let v: Value = serde_json::from_str(&out.to_json()).unwrap();
        assert_eq!(v["error"]["kind"], "input");
        assert_eq!(v["features"], json!([]));
    }

    #[test]
    fn test_empty_success_still_lists_features() {
        let out = LayerOutput::from_result(Ok(vec![]));
        assert_eq!(out.to_json(), r#"{"features":[]}"#);
    }

    #[test]
    fn test_json_error_escapes_message() {
        let raw = json_error(r#"bad "key" at line 1\n"#);
        let v: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(v["error"]["kind"], "json");
        assert_eq!(v["error"]["message"], r#"bad "key" at line 1\n"#);
        assert_eq!(v["features"], json!([]));
    }
}
