//! View scale.
//!
//! Marker radii are configured in pixels, coordinates live in map units.
//! The resolution (map units per pixel) converts between the two so a ring
//! keeps the same on-screen size at every zoom level.

use serde::Serialize;

use crate::error::InputError;

/// Map units represented by one pixel. Always positive and finite.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Serialize)]
pub struct Resolution(f64);

impl Resolution {
    pub fn new(value: f64) -> Result<Self, InputError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(InputError::InvalidResolution(value))
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }

    /// Pixels → map units.
    pub fn to_map_units(self, pixels: f64) -> f64 {
        pixels * self.0
    }
}

/// Source of the current view resolution.
///
/// Read once at the start of every refresh, so a viewport that changes while
/// a refresh is running cannot mix two scales into one ring.
pub trait Viewport {
    fn resolution(&self) -> f64;
}

impl Viewport for f64 {
    fn resolution(&self) -> f64 {
        *self
    }
}

impl Viewport for Resolution {
    fn resolution(&self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_negative_and_non_finite() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(Resolution::new(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_unit_conversion() {
        let res = Resolution::new(2.5).unwrap();
        assert_eq!(res.to_map_units(4.0), 10.0);
    }
}
