//! Placement strategies.
//!
//! A strategy takes one group of co-located features and decides where each
//! member is drawn. Strategies are selected through [`PlacementMethod`], a
//! closed enum, so an unknown method name is a configuration error rather than
//! a failed lookup at render time.
//!
//! Currently available:
//! - `ring`: members evenly spaced on one circle around the centroid

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, InputError};
use crate::feature::{Coordinate, Feature};
use crate::viewport::Resolution;

pub mod radius;
mod ring;

pub use radius::{Circle, radius_for};
pub use ring::{MARGIN_FACTOR, RingPlacement};

/// Marker radii (pixels) that displaced markers must keep clear of.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clearances {
    /// Radius of the marker drawn at the centroid.
    pub center: f64,
    /// Radius of each displaced marker.
    pub displaced: f64,
}

impl Default for Clearances {
    fn default() -> Self {
        Self { center: 6.0, displaced: 6.0 }
    }
}

/// Where a group's artifacts go.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// Ring radius in pixels. Stored on the ring marker for styling.
    pub ring_radius: f64,
    /// Ring radius in map units at the resolution used for placement.
    pub scaled_radius: f64,
    /// Where the ring marker sits (the centroid).
    pub ring_coordinate: Coordinate,
    /// One position per member, in member order.
    pub displaced: Vec<Coordinate>,
}

/// Strategy for laying out one group of co-located features.
///
/// Implementations must be deterministic: the same arguments always produce
/// the same placement.
pub trait PlacementStrategy: fmt::Debug {
    /// Name the strategy is registered under.
    fn name(&self) -> &'static str;

    /// Lay out `members` around `centroid`. Groups of fewer than two members
    /// are never displaced and are rejected here.
    fn place(
        &self,
        centroid: Coordinate,
        clearances: Clearances,
        members: &[&Feature],
        resolution: Resolution,
    ) -> Result<Placement, InputError>;
}

/// Registered placement methods.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum PlacementMethod {
    #[default]
    Ring,
}

impl PlacementMethod {
    /// Names of all registered methods.
    pub const NAMES: &'static [&'static str] = &["ring"];

    pub fn as_str(self) -> &'static str {
        match self {
            PlacementMethod::Ring => "ring",
        }
    }

    /// Strategy implementing this method.
    pub fn strategy(self) -> Box<dyn PlacementStrategy> {
        match self {
            PlacementMethod::Ring => Box::new(RingPlacement),
        }
    }
}

impl FromStr for PlacementMethod {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ring" => Ok(PlacementMethod::Ring),
            other => Err(ConfigurationError::UnknownPlacementMethod(other.to_string())),
        }
    }
}

impl fmt::Display for PlacementMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PlacementMethod {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Look up the strategy registered under `name`.
pub fn resolve(name: &str) -> Result<Box<dyn PlacementStrategy>, ConfigurationError> {
    Ok(name.parse::<PlacementMethod>()?.strategy())
}
