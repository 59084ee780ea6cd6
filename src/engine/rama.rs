//! Rama yantra: open cylinder read in altitude and azimuth
//!
//! The wall is laid out directly in closed form. Altitude maps linearly to
//! height (0° at the floor, 90° at the rim) and azimuth to the angle around the
//! axis, measured from +x toward +y.

use std::collections::BTreeMap;

use log::{debug, warn};

use super::types::{
    AltitudeCircle, AzimuthLine, CylinderDimensions, MeasurementAccuracy, Pillar,
    RamaConstruction, RamaGeometry, Sectors, YantraPoint,
};
use super::YantraGeometryEngine;
use crate::astronomy::{hour_angle_for_hour, solar_position};
use crate::constants::{
    DEG2RAD, FULL_TURN_DEG, RAMA_ALTITUDE_PRECISION_DEG, RAMA_AZIMUTH_LINE_SAMPLES,
    RAMA_AZIMUTH_PRECISION_DEG, RAMA_BASE_THICKNESS, RAMA_PILLAR_RADIUS, RAMA_SECTOR_COUNT,
    RAMA_TRACK_HOURS, RAMA_WALL_THICKNESS,
};
use crate::coordinates::Vector3D;
use crate::geometry::Cylinder;
use crate::surface::cylinder_coordinates;
use crate::{require_latitude, Result};

/// Wall height for an altitude, scaled so 90° reaches the rim
fn altitude_height(cylinder: &Cylinder, altitude_deg: f64) -> f64 {
    cylinder.height() * altitude_deg / 90.0
}

/// Point on the wall at an azimuth and a height above the floor
fn wall_point(
    cylinder: &Cylinder,
    azimuth_deg: f64,
    height: f64,
    hour_angle: f64,
    declination: f64,
) -> YantraPoint {
    let angle = azimuth_deg * DEG2RAD;
    let position_3d = cylinder.center()
        + Vector3D::new(
            cylinder.radius() * angle.cos(),
            cylinder.radius() * angle.sin(),
            height,
        );
    YantraPoint {
        position_3d,
        surface_coords: cylinder_coordinates(&position_3d, cylinder),
        hour_angle,
        declination,
        shadow_length: 0.0,
    }
}

impl YantraGeometryEngine {
    /// Generates the Rama altitude/azimuth grid and equinox solar track
    ///
    /// Altitude circles run from 10° to 90° in 10° steps, each sampled every 5°
    /// of azimuth. Azimuth lines stand every 30° with evenly spaced samples from
    /// floor to rim. The solar track marks the equinox sun at 6, 9, 12, 15 and
    /// 18 h whenever it is above the horizon.
    pub fn generate_rama(&self, latitude_deg: f64, radius: f64) -> Result<RamaGeometry> {
        require_latitude(latitude_deg)?;
        let cylinder = Cylinder::new(Vector3D::ZERO, radius, self.config.rama_wall_height)?;
        let height = cylinder.height();

        let altitude_circles: Vec<AltitudeCircle> = (10..=90)
            .step_by(10)
            .map(|altitude| {
                let altitude = altitude as f64;
                let z = altitude_height(&cylinder, altitude);
                let points = (0..360)
                    .step_by(5)
                    .map(|azimuth| wall_point(&cylinder, azimuth as f64, z, 0.0, 0.0))
                    .collect();
                AltitudeCircle { altitude, points }
            })
            .collect();

        let last_sample = (RAMA_AZIMUTH_LINE_SAMPLES - 1) as f64;
        let azimuth_lines: Vec<AzimuthLine> = (0..360)
            .step_by(30)
            .map(|azimuth| {
                let azimuth = azimuth as f64;
                let points = (0..RAMA_AZIMUTH_LINE_SAMPLES)
                    .map(|i| {
                        let z = height * i as f64 / last_sample;
                        wall_point(&cylinder, azimuth, z, 0.0, 0.0)
                    })
                    .collect();
                AzimuthLine { azimuth, points }
            })
            .collect();

        let mut solar_tracks = BTreeMap::new();
        for hour in RAMA_TRACK_HOURS {
            let hour_angle = hour_angle_for_hour(hour);
            let sun = solar_position(latitude_deg, 0.0, hour_angle);
            if !sun.is_above_horizon() {
                continue;
            }
            let point = wall_point(
                &cylinder,
                sun.azimuth,
                altitude_height(&cylinder, sun.altitude),
                hour_angle,
                0.0,
            );
            if point.is_finite() {
                solar_tracks.insert(hour, point);
            } else {
                warn!("Dropping non-finite Rama track point at {:02}h: {:?}", hour, point);
            }
        }

        debug!(
            "Rama at {:.4}°: {} altitude circles, {} azimuth lines, {} track hours",
            latitude_deg,
            altitude_circles.len(),
            azimuth_lines.len(),
            solar_tracks.len()
        );

        Ok(RamaGeometry {
            latitude: latitude_deg,
            construction: RamaConstruction {
                cylinder: CylinderDimensions {
                    radius: cylinder.radius(),
                    height,
                    wall_thickness: RAMA_WALL_THICKNESS,
                    base_thickness: RAMA_BASE_THICKNESS,
                },
                central_pillar: Pillar {
                    position: cylinder.center() + Vector3D::new(0.0, 0.0, height / 2.0),
                    radius: RAMA_PILLAR_RADIUS,
                    height,
                },
                sectors: Sectors {
                    count: RAMA_SECTOR_COUNT,
                    angle_each: FULL_TURN_DEG / RAMA_SECTOR_COUNT as f64,
                    radial_walls: true,
                },
            },
            altitude_circles,
            azimuth_lines,
            solar_tracks,
            measurement_accuracy: MeasurementAccuracy {
                altitude_precision: RAMA_ALTITUDE_PRECISION_DEG,
                azimuth_precision: RAMA_AZIMUTH_PRECISION_DEG,
            },
        })
    }
}
