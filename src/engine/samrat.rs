//! Samrat yantra: equinoctial sundial with two vertical dial faces
//!
//! The gnomon is a North-South wall whose tip stands at `(0, 0, h)`. Shadow
//! rays from the tip are traced onto the dial face that lies on the shadow's
//! side of the gnomon and recorded in that face's local `(u, v)` frame.

use std::collections::BTreeMap;

use log::{debug, trace, warn};

use super::types::{
    BaseDimensions, DialFaces, DialSide, GnomonDimensions, HourMark, SamratConstruction,
    SamratGeometry, Season, SideCurves, YantraPoint,
};
use super::verification::verify_samrat_accuracy;
use super::YantraGeometryEngine;
use crate::astronomy::{hour_angle_for_hour, solar_position};
use crate::constants::{
    DEG2RAD, SAMRAT_BASE_THICKNESS, SAMRAT_BASE_WIDTH_RATIO, SAMRAT_GNOMON_THICKNESS,
};
use crate::coordinates::Vector3D;
use crate::geometry::{Plane, Ray};
use crate::intersection::ray_plane_intersection;
use crate::surface::PlaneBasis;
use crate::{require_latitude, require_positive, Result};

/// A dial face with its engraving frame
struct DialFace {
    plane: Plane,
    basis: PlaneBasis,
}

impl DialFace {
    fn new(point: Vector3D, normal: Vector3D) -> Result<Self> {
        let plane = Plane::new(point, normal)?;
        Ok(Self {
            basis: PlaneBasis::for_plane(&plane),
            plane,
        })
    }
}

/// Face receiving the shadow for a sun azimuth
///
/// Azimuths below 180° put the sun on the +x side of the gnomon, so the shadow
/// falls on the west face; everything else lands on the east face. Near the
/// solstices at high latitudes the sun can cross this split without the hour
/// angle changing sign; that case is accepted as an approximation.
pub fn dial_side_for_azimuth(azimuth_deg: f64) -> DialSide {
    if azimuth_deg < 180.0 {
        DialSide::West
    } else {
        DialSide::East
    }
}

/// Default gnomon height for a base length, `L · tan|φ|`
pub fn default_gnomon_height(latitude_deg: f64, base_length: f64) -> f64 {
    base_length * (latitude_deg.abs() * DEG2RAD).tan()
}

impl YantraGeometryEngine {
    /// Generates Samrat hour lines and seasonal curves
    ///
    /// # Arguments
    ///
    /// * `latitude_deg` - Site latitude in [-90, 90]
    /// * `base_length` - Distance between the two dial faces (meters)
    /// * `gnomon_height` - Height of the gnomon tip; `None` uses `L · tan|φ|`
    ///
    /// For each season and each configured hour the sun is placed with
    /// [`solar_position`], samples with the sun on or below the horizon are
    /// skipped, and the shadow of the gnomon tip is intersected with the dial
    /// face chosen by [`dial_side_for_azimuth`]. Rays that miss (the noon ray
    /// runs parallel to both faces) are skipped. Every curve is ordered by
    /// increasing hour, and the equinox curve doubles as the hour lines.
    ///
    /// # Errors
    ///
    /// Fails for a latitude outside [-90, 90], a non-positive base length or
    /// gnomon height. The default height is validated the same way, so an
    /// equatorial site needs an explicit `gnomon_height`.
    pub fn generate_samrat(
        &self,
        latitude_deg: f64,
        base_length: f64,
        gnomon_height: Option<f64>,
    ) -> Result<SamratGeometry> {
        require_latitude(latitude_deg)?;
        require_positive("base_length", base_length)?;
        let gnomon_height = match gnomon_height {
            Some(height) => require_positive("gnomon_height", height)?,
            // Zero on the equator, where the style lies flat and casts no usable shadow
            None => require_positive(
                "gnomon_height",
                default_gnomon_height(latitude_deg, base_length),
            )?,
        };

        let gnomon_tip = Vector3D::new(0.0, 0.0, gnomon_height);
        let half = base_length / 2.0;
        let east = DialFace::new(Vector3D::new(half, 0.0, 0.0), -Vector3D::EAST)?;
        let west = DialFace::new(Vector3D::new(-half, 0.0, 0.0), Vector3D::EAST)?;

        let mut hour_lines: SideCurves<HourMark> = SideCurves::default();
        let mut seasonal_curves = BTreeMap::new();
        let mut below_horizon = 0usize;
        let mut missed = 0usize;

        for season in Season::ALL {
            let declination = season.declination_with(self.config.solstice_declination);
            let mut curves = SideCurves::default();

            for hour in self.config.first_hour..=self.config.last_hour {
                let hour_angle = hour_angle_for_hour(hour);
                let sun = solar_position(latitude_deg, declination, hour_angle);
                if !sun.is_above_horizon() {
                    trace!("{:?} {:02}h: sun below horizon", season, hour);
                    below_horizon += 1;
                    continue;
                }

                let side = dial_side_for_azimuth(sun.azimuth);
                let face = match side {
                    DialSide::East => &east,
                    DialSide::West => &west,
                };

                let shadow = Ray::new(gnomon_tip, sun.shadow_direction());
                let hit = match ray_plane_intersection(&shadow, &face.plane, self.config.epsilon) {
                    Some(hit) => hit,
                    None => {
                        trace!("{:?} {:02}h: shadow misses the {:?} face", season, hour, side);
                        missed += 1;
                        continue;
                    }
                };

                let point = YantraPoint {
                    position_3d: hit.point,
                    surface_coords: face.basis.project(&hit.point, &face.plane),
                    hour_angle,
                    declination,
                    shadow_length: hit.t,
                };
                if !point.is_finite() {
                    warn!(
                        "Dropping non-finite Samrat point at {:?} {:02}h: {:?}",
                        season, hour, point
                    );
                    continue;
                }

                curves.side_mut(side).push(point);
                if season == Season::Equinox {
                    hour_lines.side_mut(side).push(HourMark { hour, point });
                }
            }

            seasonal_curves.insert(season, curves);
        }

        let mut marks: Vec<HourMark> = hour_lines
            .east
            .iter()
            .chain(hour_lines.west.iter())
            .copied()
            .collect();
        marks.sort_by_key(|mark| mark.hour);
        let accuracy_verification =
            verify_samrat_accuracy(latitude_deg, gnomon_tip, &marks, self.config.epsilon);

        debug!(
            "Samrat at {:.4}°: {} east and {} west hour marks, {} samples below horizon, {} missed",
            latitude_deg,
            hour_lines.east.len(),
            hour_lines.west.len(),
            below_horizon,
            missed
        );

        Ok(SamratGeometry {
            latitude: latitude_deg,
            gnomon_tip,
            construction: SamratConstruction {
                base: BaseDimensions {
                    length: base_length,
                    width: base_length * SAMRAT_BASE_WIDTH_RATIO,
                    thickness: SAMRAT_BASE_THICKNESS,
                },
                gnomon: GnomonDimensions {
                    height: gnomon_height,
                    base_width: base_length,
                    thickness: SAMRAT_GNOMON_THICKNESS,
                    angle_from_horizontal: latitude_deg,
                },
                dial_faces: DialFaces {
                    east_face_position: east.plane.point(),
                    west_face_position: west.plane.point(),
                    east_face_normal: east.plane.normal(),
                    west_face_normal: west.plane.normal(),
                },
            },
            hour_lines,
            seasonal_curves,
            accuracy_verification,
        })
    }
}
