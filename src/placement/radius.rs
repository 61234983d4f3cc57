//! Circle sizing.
//!
//! Turns a required arc length into the radius of the circle whose
//! circumference equals it. This is a continuous relaxation: it guarantees
//! enough arc length for `n` evenly spaced markers, not an exact packing.

use std::f64::consts::TAU;

/// Radius of the circle whose circumference is `total_spacing`.
pub fn radius_for(total_spacing: f64) -> f64 {
    total_spacing / TAU
}

/// A circle described by its radius.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Circle {
    pub radius: f64,
}

impl Circle {
    /// Smallest circle able to hold `circumference` worth of arc.
    pub fn from_circumference(circumference: f64) -> Self {
        Self { radius: radius_for(circumference) }
    }
}
