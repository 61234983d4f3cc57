//! Displacement configuration.
//!
//! Validated when built; an instance that exists is always usable. JSON input
//! uses camelCase keys and falls back to defaults for missing ones:
//!
//! ```json
//! { "placementMethod": "ring", "centerMarkerRadius": 6, "displacedMarkerRadius": 6, "distance": 20 }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, DisplaceError};
use crate::placement::{Clearances, PlacementMethod};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "RawConfig")]
pub struct DisplacementConfig {
    /// Layout used for groups with two or more members.
    pub placement_method: PlacementMethod,
    /// Radius of the marker drawn at a group's centroid (pixels).
    pub center_marker_radius: f64,
    /// Radius of each displaced marker (pixels).
    pub displaced_marker_radius: f64,
    /// Grouping tolerance (pixels). Points closer than this share a group.
    pub distance: f64,
    /// Emit a centroid → member line for every displaced feature.
    pub connectors: bool,
}

impl Default for DisplacementConfig {
    fn default() -> Self {
        Self {
            placement_method: PlacementMethod::Ring,
            center_marker_radius: 6.0,
            displaced_marker_radius: 6.0,
            distance: 20.0,
            connectors: false,
        }
    }
}

impl DisplacementConfig {
    /// Build a configuration, resolving the method name and checking every value.
    pub fn new(
        placement_method: &str,
        center_marker_radius: f64,
        displaced_marker_radius: f64,
    ) -> Result<Self, ConfigurationError> {
        let cfg = Self {
            placement_method: placement_method.parse()?,
            center_marker_radius,
            displaced_marker_radius,
            ..Self::default()
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, DisplaceError> {
        let raw: RawConfig = serde_json::from_str(json)?;
        Ok(Self::try_from(raw)?)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        check_radius("centerMarkerRadius", self.center_marker_radius)?;
        check_radius("displacedMarkerRadius", self.displaced_marker_radius)?;
        if !(self.distance.is_finite() && self.distance >= 0.0) {
            return Err(ConfigurationError::InvalidDistance(self.distance));
        }
        Ok(())
    }

    pub fn with_distance(mut self, distance: f64) -> Result<Self, ConfigurationError> {
        self.distance = distance;
        self.validate()?;
        Ok(self)
    }

    pub fn with_connectors(mut self, connectors: bool) -> Self {
        self.connectors = connectors;
        self
    }

    pub fn clearances(&self) -> Clearances {
        Clearances {
            center: self.center_marker_radius,
            displaced: self.displaced_marker_radius,
        }
    }
}

fn check_radius(field: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::NonPositiveRadius { field, value })
    }
}

/// Unvalidated configuration as it arrives over JSON.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawConfig {
    placement_method: String,
    center_marker_radius: f64,
    displaced_marker_radius: f64,
    distance: f64,
    connectors: bool,
}

impl Default for RawConfig {
    fn default() -> Self {
        let d = DisplacementConfig::default();
        Self {
            placement_method: d.placement_method.as_str().to_string(),
            center_marker_radius: d.center_marker_radius,
            displaced_marker_radius: d.displaced_marker_radius,
            distance: d.distance,
            connectors: d.connectors,
        }
    }
}

impl TryFrom<RawConfig> for DisplacementConfig {
    type Error = ConfigurationError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        let cfg = Self {
            placement_method: raw.placement_method.parse()?,
            center_marker_radius: raw.center_marker_radius,
            displaced_marker_radius: raw.displaced_marker_radius,
            distance: raw.distance,
            connectors: raw.connectors,
        };
        cfg.validate()?;
        Ok(cfg)
    }
}
