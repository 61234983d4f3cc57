//! Point displacement for map layers.
//!
//! When several point features share (or nearly share) a location they hide
//! each other. This crate groups such features and spreads every group on a
//! ring around its centroid, so each one stays visible and selectable. The
//! grouping decision itself is left alone.
//!
//! ```
//! use displace_core::{Coordinate, DisplacedPoints, DisplacementConfig, Feature};
//!
//! let features = vec![
//!     Feature::point(1_i64, Coordinate::new(0.0, 0.0)),
//!     Feature::point(2_i64, Coordinate::new(0.0, 0.0)),
//! ];
//! let mut layer = DisplacedPoints::new(DisplacementConfig::default()).unwrap();
//! let snapshot = layer.refresh(&features, &1.0).unwrap();
//! assert_eq!(snapshot.displaced.len(), 2);
//! assert_eq!(snapshot.rings.len(), 1);
//! ```
//!
//! Modules:
//! - `placement`: ring sizing and placement strategies
//! - `grouping`: default distance-based grouping
//! - `displacement`: refresh/clear lifecycle and output assembly
//! - `wasm`: JavaScript bindings

pub mod config;
pub mod diagnostics;
pub mod displacement;
pub mod error;
pub mod feature;
pub mod grouping;
pub mod output;
pub mod placement;
pub mod viewport;
mod wasm;

pub use config::DisplacementConfig;
pub use diagnostics::{DiagnosticEvent, DiagnosticHook, LogHook};
pub use displacement::{DisplacedPoints, build_snapshot, displace};
pub use error::{ConfigurationError, DisplaceError, InputError};
pub use feature::{Coordinate, Feature, FeatureId, Geometry};
pub use grouping::{DistanceGrouper, Group, Grouper};
pub use output::Snapshot;
pub use placement::{Clearances, Placement, PlacementMethod, PlacementStrategy, RingPlacement};
pub use viewport::{Resolution, Viewport};
