//! Jai Prakash yantra: hemispherical bowl mirroring the sky
//!
//! A sun at altitude `a` and azimuth `A` is marked where the shadow of the
//! central gnomon lands inside a bowl of radius `R` centered on the rim plane:
//!
//! ```text
//! (R cos a sin A, R cos a cos A, −R sin a)
//! ```
//!
//! so the zenith maps to the bottom of the bowl and the horizon to the rim.

use log::{debug, warn};

use super::types::{
    BowlDimensions, CelestialFrame, DeclinationCircle, HourCircle, JaiPrakashAccuracy,
    JaiPrakashConstruction, JaiPrakashGeometry, RodGnomon, YantraPoint,
};
use super::YantraGeometryEngine;
use crate::astronomy::{hour_angle_for_hour, solar_position, SunPosition};
use crate::constants::{
    JAI_PRAKASH_BASE_DIAMETER_RATIO, JAI_PRAKASH_COORDINATE_PRECISION_DEG,
    JAI_PRAKASH_GNOMON_DIAMETER, JAI_PRAKASH_GNOMON_HEIGHT, JAI_PRAKASH_RIM_THICKNESS,
    JAI_PRAKASH_TIME_PRECISION_MIN,
};
use crate::coordinates::Vector3D;
use crate::surface::hemisphere_coordinates;
use crate::{require_latitude, require_positive, Result};

/// Bowl point for a sun position, or `None` when the sun is not up
pub fn bowl_point(radius: f64, sun: &SunPosition) -> Option<YantraPoint> {
    if !sun.is_above_horizon() {
        return None;
    }
    let s = sun.unit_vector;
    let position_3d = Vector3D::new(s.x, s.y, -s.z) * radius;
    let point = YantraPoint {
        position_3d,
        surface_coords: hemisphere_coordinates(&position_3d, &Vector3D::ZERO),
        hour_angle: sun.hour_angle,
        declination: sun.declination,
        shadow_length: 0.0,
    };
    if point.is_finite() {
        Some(point)
    } else {
        warn!("Dropping non-finite Jai Prakash point: {:?}", point);
        None
    }
}

impl YantraGeometryEngine {
    /// Generates the Jai Prakash declination and hour circles
    ///
    /// Declination circles cover −24° to +24° in 6° steps, sampled every 10° of
    /// hour angle from −90° to +90°. Hour circles cover the configured hours,
    /// sampled every 3° of declination over the same range. Samples with the
    /// sun on or below the horizon are skipped, and circles left with no
    /// samples are omitted.
    pub fn generate_jai_prakash(&self, latitude_deg: f64, radius: f64) -> Result<JaiPrakashGeometry> {
        require_latitude(latitude_deg)?;
        require_positive("radius", radius)?;

        let declination_circles: Vec<DeclinationCircle> = (-24..=24)
            .step_by(6)
            .filter_map(|declination| {
                let declination = declination as f64;
                let points: Vec<YantraPoint> = (-90..=90)
                    .step_by(10)
                    .filter_map(|hour_angle| {
                        let sun = solar_position(latitude_deg, declination, hour_angle as f64);
                        bowl_point(radius, &sun)
                    })
                    .collect();
                (!points.is_empty()).then_some(DeclinationCircle {
                    declination,
                    points,
                })
            })
            .collect();

        let hour_circles: Vec<HourCircle> = (self.config.first_hour..=self.config.last_hour)
            .filter_map(|hour| {
                let hour_angle = hour_angle_for_hour(hour);
                let points: Vec<YantraPoint> = (-24..=24)
                    .step_by(3)
                    .filter_map(|declination| {
                        let sun = solar_position(latitude_deg, declination as f64, hour_angle);
                        bowl_point(radius, &sun)
                    })
                    .collect();
                (!points.is_empty()).then_some(HourCircle { hour, points })
            })
            .collect();

        debug!(
            "Jai Prakash at {:.4}°: {} declination circles, {} hour circles",
            latitude_deg,
            declination_circles.len(),
            hour_circles.len()
        );

        Ok(JaiPrakashGeometry {
            latitude: latitude_deg,
            construction: JaiPrakashConstruction {
                bowl: BowlDimensions {
                    radius,
                    depth: radius,
                    rim_thickness: JAI_PRAKASH_RIM_THICKNESS,
                    base_diameter: radius * JAI_PRAKASH_BASE_DIAMETER_RATIO,
                },
                gnomon: RodGnomon {
                    position: Vector3D::ZERO,
                    direction: Vector3D::UP,
                    height: JAI_PRAKASH_GNOMON_HEIGHT,
                    diameter: JAI_PRAKASH_GNOMON_DIAMETER,
                },
                coordinate_system: CelestialFrame {
                    tilt_angle: latitude_deg,
                    celestial_equator_angle: 90.0 - latitude_deg,
                },
            },
            declination_circles,
            hour_circles,
            accuracy: JaiPrakashAccuracy {
                time_precision_minutes: JAI_PRAKASH_TIME_PRECISION_MIN,
                coordinate_precision_degrees: JAI_PRAKASH_COORDINATE_PRECISION_DEG,
            },
        })
    }
}
