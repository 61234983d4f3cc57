// Ring placement
//
// Spreads the members of a group evenly on a circle around the group's
// centroid, with the circle sized so that:
// - neighbouring displaced markers do not overlap each other
// - no displaced marker overlaps the marker drawn at the centroid
//
// Sizing is closed-form (no iterative packing), so the result is a pure
// function of (centroid, clearances, member count, resolution).
//
// Units:
// - clearances and `Placement::ring_radius` are in pixels (style units)
// - `Placement::scaled_radius` and all coordinates are in map units

use std::f64::consts::{SQRT_2, TAU};

use super::radius::Circle;
use super::{Clearances, Placement, PlacementStrategy};
use crate::error::InputError;
use crate::feature::{Coordinate, Feature};
use crate::viewport::Resolution;

/// Safety margin applied to clearance sums.
///
/// Treats the clearance as one leg of a right isosceles triangle and uses the
/// hypotenuse. Heuristic, not a packing bound; tune here.
pub const MARGIN_FACTOR: f64 = SQRT_2;

/// Places group members at equal angular steps on a single ring.
#[derive(Debug, Default, Clone, Copy)]
pub struct RingPlacement;

impl RingPlacement {
    /// Ring radius in pixels for `n` members under `clearances`.
    pub fn ring_radius(clearances: Clearances, n: usize) -> f64 {
        let pair_clearance = clearances.center + clearances.displaced;
        let margined_pair = pair_clearance * MARGIN_FACTOR;
        let margined_center = clearances.center * MARGIN_FACTOR;

        // Enough arc for every member, but never closer than half a margined pair
        let min_ring = Circle::from_circumference(n as f64 * margined_pair).radius;
        let displacement = (margined_pair / 2.0).max(min_ring);

        displacement + margined_center
    }
}

impl PlacementStrategy for RingPlacement {
    fn name(&self) -> &'static str {
        "ring"
    }

    fn place(
        &self,
        centroid: Coordinate,
        clearances: Clearances,
        members: &[&Feature],
        resolution: Resolution,
    ) -> Result<Placement, InputError> {
        let n = members.len();
        if n < 2 {
            return Err(InputError::UndersizedGroup(n));
        }

        let ring_radius = Self::ring_radius(clearances, n);
        let scaled_radius = resolution.to_map_units(ring_radius);
        let angle_step = TAU / n as f64;

        // Compass convention: angle 0 points up (+y), angles grow clockwise.
        let displaced: Vec<Coordinate> = (0..n)
            .map(|i| {
                let angle = angle_step * i as f64;
                centroid.offset(scaled_radius * angle.sin(), scaled_radius * angle.cos())
            })
            .collect();

        if !scaled_radius.is_finite() || !displaced.iter().all(Coordinate::is_finite) {
            return Err(InputError::InvalidResolution(resolution.get()));
        }

        Ok(Placement {
            ring_radius,
            scaled_radius,
            ring_coordinate: centroid,
            displaced,
        })
    }
}
