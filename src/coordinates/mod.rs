//! Coordinates module: vector algebra and the observing site
//!
//! [`Vector3D`] is the common currency of the geometry code. Positions are in
//! meters, directions are dimensionless. The local frame used everywhere is
//! East-North-Up (x = East, y = North, z = Up).

pub mod vector;

pub use vector::Vector3D;

use crate::{require_latitude, Result, YantraError};
use serde::{Deserialize, Serialize};

/// Geographic location of the instrument site
///
/// This is the one site type accepted by the engine. Latitude drives all of
/// the geometry; longitude and elevation are carried through to the output
/// and used by the date-driven sun position helpers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees, positive north
    pub latitude: f64,
    /// Longitude in degrees, positive east
    pub longitude: f64,
    /// Elevation above sea level in meters
    pub elevation: f64,
}

impl Coordinates {
    /// Creates a validated site location
    ///
    /// Fails when latitude is outside [-90, 90], longitude outside
    /// [-180, 180], or any component is not finite.
    pub fn new(latitude: f64, longitude: f64, elevation: f64) -> Result<Self> {
        require_latitude(latitude)?;
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(YantraError::InvalidLongitude(longitude));
        }
        if !elevation.is_finite() {
            return Err(YantraError::InvalidDimension {
                name: "elevation",
                value: elevation,
            });
        }
        Ok(Self {
            latitude,
            longitude,
            elevation,
        })
    }

    /// Site at sea level
    pub fn from_lat_lon(latitude: f64, longitude: f64) -> Result<Self> {
        Self::new(latitude, longitude, 0.0)
    }

    /// True for sites south of the equator
    pub fn is_southern(&self) -> bool {
        self.latitude < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_coordinates() {
        let ujjain = Coordinates::new(23.1765, 75.7885, 492.0).unwrap();
        assert_eq!(ujjain.latitude, 23.1765);
        assert_eq!(ujjain.longitude, 75.7885);
        assert_eq!(ujjain.elevation, 492.0);
        assert!(!ujjain.is_southern());

        let sydney = Coordinates::from_lat_lon(-33.87, 151.21).unwrap();
        assert_eq!(sydney.elevation, 0.0);
        assert!(sydney.is_southern());
    }

    #[test]
    fn test_invalid_coordinates() {
        assert!(matches!(
            Coordinates::new(91.0, 0.0, 0.0),
            Err(YantraError::InvalidLatitude(_))
        ));
        assert!(matches!(
            Coordinates::new(0.0, 181.0, 0.0),
            Err(YantraError::InvalidLongitude(_))
        ));
        assert!(Coordinates::new(0.0, f64::NAN, 0.0).is_err());
        assert!(Coordinates::new(0.0, 0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_poles_are_valid() {
        assert!(Coordinates::new(90.0, 180.0, 0.0).is_ok());
        assert!(Coordinates::new(-90.0, -180.0, 0.0).is_ok());
    }
}
