//! Error types.
//!
//! Configuration problems are reported when a configuration is built or
//! replaced, never deferred to the first refresh. Input problems are reported
//! by the call that received the bad input.

use thiserror::Error;

/// Invalid displacement configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("unknown placement method '{0}' (known: {known})", known = crate::placement::PlacementMethod::NAMES.join(", "))]
    UnknownPlacementMethod(String),

    #[error("{field} must be a positive finite number, got {value}")]
    NonPositiveRadius { field: &'static str, value: f64 },

    #[error("grouping distance must be a non-negative finite number, got {0}")]
    InvalidDistance(f64),
}

/// Invalid input handed to the core at refresh or placement time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("feature {id} has a {kind} geometry, only points can be displaced")]
    NonPointGeometry { id: String, kind: &'static str },

    #[error("feature {id} has a non-finite coordinate")]
    NonFiniteCoordinate { id: String },

    #[error("group centroid is not finite: ({x}, {y})")]
    NonFiniteCentroid { x: f64, y: f64 },

    #[error("resolution must be a positive finite number that keeps placement in range, got {0}")]
    InvalidResolution(f64),

    #[error("ring placement needs at least 2 members, got {0}")]
    UndersizedGroup(usize),
}

/// Any error raised by the displacement API.
#[derive(Debug, Error)]
pub enum DisplaceError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_method_lists_known_names() {
        let err = ConfigurationError::UnknownPlacementMethod("grid".to_string());
        assert_eq!(err.to_string(), "unknown placement method 'grid' (known: ring)");
    }

    #[test]
    fn test_wrapped_errors_are_transparent() {
        let err: DisplaceError = InputError::InvalidResolution(0.0).into();
        assert_eq!(
            err.to_string(),
            "resolution must be a positive finite number that keeps placement in range, got 0"
        );
    }
}
