//! Accuracy checks
//!
//! Two independent checks live here. [`verify_samrat_accuracy`] cross-checks
//! ray-traced hour lines against the closed-form horizontal sundial formula,
//! and [`score_observation`] grades a field measurement against the computed
//! sun position.

use serde::{Deserialize, Serialize};

use crate::astronomy::{
    hour_angle_for_solar_time, normalize_degrees, solar_position, wrap_hour_angle, SunPosition,
};
use crate::constants::{
    DEG2RAD, FULL_TURN_DEG, MINUTES_PER_DEG, POSITION_ERROR_SCALE_DEG, RAD2DEG,
    TIME_ERROR_SCALE_MIN,
};
use crate::coordinates::Vector3D;
use crate::geometry::{Plane, Ray};
use crate::intersection::ray_plane_intersection;

use super::types::HourMark;

/// Hour-line cross-check for one engraved mark
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourLineCheck {
    pub hour: u8,
    pub hour_angle: f64,
    pub declination: f64,
    /// `atan(sin φ tan H)` in degrees
    pub analytical_angle: f64,
    /// Hour-line angle from tracing the style shadow, if the trace lands
    pub traced_angle: Option<f64>,
    /// `|traced − analytical|` in degrees
    pub deviation: Option<f64>,
    /// The mark's local coordinates on its Samrat dial face
    pub dial_coords: (f64, f64),
    /// Closed-form direction of the mark on its face, `atan2(Δz, Δy)` in degrees
    pub analytical_face_angle: f64,
    /// Same direction measured from the traced mark and the gnomon tip
    pub face_angle: Option<f64>,
    /// `|face − analytical face|` in degrees
    pub face_deviation: Option<f64>,
}

/// Cross-checks hour marks against the horizontal sundial formula
///
/// For each mark the analytical hour-line angle is `θ = atan(sin φ tan H)`,
/// measured on a horizontal dial from the noon line. The traced angle comes
/// from casting the sun's ray through the tip of a unit polar style (pointing
/// at the elevated celestial pole) onto the ground plane with
/// [`ray_plane_intersection`].
///
/// The Samrat's vertical faces are not a horizontal dial, so this is a sanity
/// bound on the shared solar model. For sun positions the horizontal-dial
/// analogy can represent the two angles agree to rounding error. Marks at
/// `|H| ≥ 90°`, and every mark at the equator where the style lies flat, have
/// no finite trace and report `traced_angle: None`.
///
/// The engraved marks themselves are checked on their faces. Seen from the
/// point of the face level with `gnomon_tip`, a mark lies in the direction
/// `atan2(Δz, Δy)`, which for a shadow cast along `−s` must equal
/// `atan2(−s_up, −s_north)` with
///
/// ```text
/// s_north = cos φ sin δ − sin φ cos δ cos H
/// s_up    = sin φ sin δ + cos φ cos δ cos H
/// ```
///
/// Marks sitting on that level point (the sun on the horizon due east or west)
/// have no direction and report `face_angle: None`.
pub fn verify_samrat_accuracy(
    latitude_deg: f64,
    gnomon_tip: Vector3D,
    hour_marks: &[HourMark],
    epsilon: f64,
) -> Vec<HourLineCheck> {
    let phi = latitude_deg * DEG2RAD;
    // +1 toward the north celestial pole, -1 toward the south
    let pole = if latitude_deg < 0.0 { -1.0 } else { 1.0 };
    let style_tip = Vector3D::new(0.0, pole * phi.cos(), pole * phi.sin());
    let ground = Plane::ground();

    hour_marks
        .iter()
        .map(|mark| {
            let hour_angle = mark.point.hour_angle;
            let declination = mark.point.declination;
            let analytical_angle = (phi.sin() * (hour_angle * DEG2RAD).tan()).atan() * RAD2DEG;

            let sun = solar_position(latitude_deg, declination, hour_angle);
            let shadow = Ray::new(style_tip, sun.shadow_direction());
            let traced_angle = if sun.is_above_horizon() {
                ray_plane_intersection(&shadow, &ground, epsilon)
                    .map(|hit| (-pole * hit.point.x).atan2(pole * hit.point.y) * RAD2DEG)
                    .filter(|angle| angle.is_finite())
            } else {
                None
            };

            let (delta, h) = (declination * DEG2RAD, hour_angle * DEG2RAD);
            let north = phi.cos() * delta.sin() - phi.sin() * delta.cos() * h.cos();
            let up = phi.sin() * delta.sin() + phi.cos() * delta.cos() * h.cos();
            let analytical_face_angle = (-up).atan2(-north) * RAD2DEG;

            let offset = mark.point.position_3d - gnomon_tip;
            let in_face = offset.y.hypot(offset.z);
            let face_angle = (in_face > epsilon * mark.point.shadow_length.max(1.0))
                .then(|| offset.z.atan2(offset.y) * RAD2DEG)
                .filter(|angle| angle.is_finite());

            HourLineCheck {
                hour: mark.hour,
                hour_angle,
                declination,
                analytical_angle,
                traced_angle,
                deviation: traced_angle.map(|traced| (traced - analytical_angle).abs()),
                dial_coords: mark.point.surface_coords,
                analytical_face_angle,
                face_angle,
                face_deviation: face_angle
                    .map(|angle| wrap_hour_angle(angle - analytical_face_angle).abs()),
            }
        })
        .collect()
}

/// Field measurement of the sun taken with a finished instrument
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Observation {
    /// Measured solar altitude (degrees)
    pub altitude: Option<f64>,
    /// Measured solar azimuth (degrees)
    pub azimuth: Option<f64>,
    /// Local apparent solar time read off the dial (hours)
    pub solar_time: Option<f64>,
}

impl Observation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_altitude(mut self, altitude: f64) -> Self {
        self.altitude = Some(altitude);
        self
    }

    pub fn with_azimuth(mut self, azimuth: f64) -> Self {
        self.azimuth = Some(azimuth);
        self
    }

    pub fn with_solar_time(mut self, solar_time: f64) -> Self {
        self.solar_time = Some(solar_time);
        self
    }
}

/// Qualitative accuracy grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccuracyGrade {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl AccuracyGrade {
    /// Grade for a confidence score in [0, 1]
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence > 0.9 {
            AccuracyGrade::Excellent
        } else if confidence > 0.7 {
            AccuracyGrade::Good
        } else if confidence > 0.5 {
            AccuracyGrade::Fair
        } else {
            AccuracyGrade::Poor
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AccuracyGrade::Excellent => "Excellent accuracy, suitable for precise observations",
            AccuracyGrade::Good => "Good accuracy, suitable for educational use",
            AccuracyGrade::Fair => "Fair accuracy, consider calibration adjustments",
            AccuracyGrade::Poor => "Poor accuracy, requires investigation",
        }
    }
}

/// Result of scoring an observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationCheck {
    pub time_error_minutes: f64,
    pub position_error_degrees: f64,
    /// Mean of the time and position scores, in [0, 1]
    pub confidence: f64,
    pub grade: AccuracyGrade,
    pub notes: Vec<String>,
}

/// Smallest angle between two azimuths, in [0, 180]
fn azimuth_difference(a: f64, b: f64) -> f64 {
    let diff = normalize_degrees(a - b);
    diff.min(FULL_TURN_DEG - diff)
}

/// Grades a measurement against the computed sun position
///
/// The position error is the larger of the altitude and azimuth errors; the
/// time error compares the measured solar time with the computed hour angle
/// at 4 minutes per degree. Each maps linearly to a score that reaches zero at
/// 10 minutes and 5 degrees respectively. Missing measurements count as zero
/// error.
pub fn score_observation(computed: &SunPosition, measured: &Observation) -> ObservationCheck {
    let mut notes = Vec::new();

    let time_error_minutes = match measured.solar_time {
        Some(solar_time) => {
            let measured_hour_angle = hour_angle_for_solar_time(solar_time);
            let error = wrap_hour_angle(measured_hour_angle - computed.hour_angle).abs()
                * MINUTES_PER_DEG;
            notes.push(format!("Solar time error: {:.2} min", error));
            error
        }
        None => {
            notes.push("No time measurement provided".to_string());
            0.0
        }
    };

    let mut position_error_degrees: f64 = 0.0;
    if let Some(altitude) = measured.altitude {
        let error = (altitude - computed.altitude).abs();
        notes.push(format!("Solar altitude error: {:.2}°", error));
        position_error_degrees = position_error_degrees.max(error);
    }
    if let Some(azimuth) = measured.azimuth {
        let error = azimuth_difference(azimuth, computed.azimuth);
        notes.push(format!("Solar azimuth error: {:.2}°", error));
        position_error_degrees = position_error_degrees.max(error);
    }

    let time_score = (1.0 - time_error_minutes / TIME_ERROR_SCALE_MIN).max(0.0);
    let position_score = (1.0 - position_error_degrees / POSITION_ERROR_SCALE_DEG).max(0.0);
    let confidence = (time_score + position_score) / 2.0;
    let grade = AccuracyGrade::from_confidence(confidence);
    notes.push(grade.description().to_string());

    ObservationCheck {
        time_error_minutes,
        position_error_degrees,
        confidence,
        grade,
        notes,
    }
}
