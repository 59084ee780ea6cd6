//! Yantra: construction geometry for masonry astronomical instruments
//!
//! This crate computes the geometry needed to lay out Samrat, Rama and Jai
//! Prakash yantras at an arbitrary site: solar positions, shadow rays traced
//! onto dial faces, and the local surface coordinates used for engraving.
//!
//! Everything here is a pure transform of its inputs. Geometric non-events
//! (a ray parallel to a surface, the sun below the horizon, a shadow missing a
//! finite wall) are reported as `None` and skipped by the generators. Only
//! malformed inputs such as a non-positive radius or a latitude outside
//! [-90, 90] produce a [`YantraError`].
//!
//! ```rust
//! use yantra::astronomy::solar_position;
//!
//! // Ujjain at the equinox, three hours from solar noon
//! let sun = solar_position(23.1765, 0.0, 45.0);
//! assert!((sun.altitude - 40.5447).abs() < 1e-3);
//! assert!((sun.azimuth - 111.4829).abs() < 1e-3);
//! ```

use thiserror::Error;

pub mod astronomy;
pub mod constants;
pub mod coordinates;
pub mod engine;
pub mod geometry;
pub mod intersection;
pub mod surface;

// Re-export commonly used types
pub use astronomy::SunPosition;
pub use coordinates::{Coordinates, Vector3D};
pub use engine::{EngineConfig, YantraGeometry, YantraGeometryEngine, YantraKind, YantraPoint};
pub use geometry::{Cylinder, Plane, Ray};

/// Main error type for the yantra library
#[derive(Debug, Error)]
pub enum YantraError {
    #[error("Latitude {0} is outside [-90, 90] degrees")]
    InvalidLatitude(f64),

    #[error("Longitude {0} is outside [-180, 180] degrees")]
    InvalidLongitude(f64),

    #[error("Invalid {name}: {value} (must be finite and positive)")]
    InvalidDimension { name: &'static str, value: f64 },

    #[error("Invalid vector: {0}")]
    InvalidVector(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for yantra operations
pub type Result<T> = std::result::Result<T, YantraError>;

/// Checks that a length is finite and strictly positive
pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(YantraError::InvalidDimension { name, value })
    }
}

/// Checks that a latitude is a finite angle within [-90, 90]
pub(crate) fn require_latitude(latitude_deg: f64) -> Result<f64> {
    if latitude_deg.is_finite() && (-90.0..=90.0).contains(&latitude_deg) {
        Ok(latitude_deg)
    } else {
        Err(YantraError::InvalidLatitude(latitude_deg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_positive() {
        assert_eq!(require_positive("radius", 2.5).unwrap(), 2.5);
        assert!(require_positive("radius", 0.0).is_err());
        assert!(require_positive("radius", -1.0).is_err());
        assert!(require_positive("radius", f64::NAN).is_err());
        assert!(require_positive("radius", f64::INFINITY).is_err());
    }

    #[test]
    fn test_require_latitude() {
        assert!(require_latitude(90.0).is_ok());
        assert!(require_latitude(-90.0).is_ok());
        assert!(require_latitude(23.1765).is_ok());
        assert!(matches!(
            require_latitude(90.5),
            Err(YantraError::InvalidLatitude(_))
        ));
        assert!(require_latitude(f64::NAN).is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = YantraError::InvalidDimension {
            name: "base_length",
            value: -2.0,
        };
        assert_eq!(
            err.to_string(),
            "Invalid base_length: -2 (must be finite and positive)"
        );
        assert_eq!(
            YantraError::InvalidLatitude(91.0).to_string(),
            "Latitude 91 is outside [-90, 90] degrees"
        );
    }
}
