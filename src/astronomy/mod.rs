//! Solar position calculations
//!
//! Closed-form solar geometry for a site at latitude φ: altitude and azimuth
//! from declination δ and hour angle H, the seasonal declination and equation
//! of time approximations, and a few derived quantities (sunrise hour angle,
//! day length, solar noon, sunrise and sunset) plus the reading corrections
//! for a yantra.
//!
//! All angles at this boundary are in degrees. Every function is pure and
//! total: domain edge cases (poles, the sun at zenith, polar day) are handled
//! by clamping or convention, never by returning an error.
//!
//! # Hour angle convention
//!
//! `H = 15° · (solar_hour − 12)`. The azimuth is computed from
//! `sin A = cos δ sin H / cos a`, so positive hour angles yield azimuths in
//! (0°, 180°). The Samrat generator selects dial faces from the same sign, so
//! the convention is consistent throughout the crate.

use crate::constants::{
    DAYS_PER_YEAR, DECLINATION_AMPLITUDE_DEG, DEG2RAD, DEG_PER_HOUR, FULL_TURN_DEG, NOON_HOUR,
    RAD2DEG, ZENITH_COS_THRESHOLD,
};
use crate::coordinates::{Coordinates, Vector3D};
use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Position of the sun as seen from the site
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SunPosition {
    /// Degrees above the horizon, [-90, 90]
    pub altitude: f64,
    /// Degrees from North toward East, [0, 360)
    pub azimuth: f64,
    /// Input declination, echoed back (degrees)
    pub declination: f64,
    /// Input hour angle, echoed back (degrees)
    pub hour_angle: f64,
    /// Direction toward the sun in the ENU frame
    pub unit_vector: Vector3D,
}

impl SunPosition {
    /// True when the sun is strictly above the horizon
    pub fn is_above_horizon(&self) -> bool {
        self.altitude > 0.0
    }

    /// Direction in which shadows are cast (away from the sun)
    pub fn shadow_direction(&self) -> Vector3D {
        -self.unit_vector
    }
}

/// Wraps an angle into [0, 360)
pub fn normalize_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(FULL_TURN_DEG);
    // rem_euclid can round tiny negative inputs up to exactly 360
    if wrapped >= FULL_TURN_DEG {
        0.0
    } else {
        wrapped
    }
}

/// Wraps an hour angle into (-180, 180]
pub fn wrap_hour_angle(angle: f64) -> f64 {
    let wrapped = normalize_degrees(angle);
    if wrapped > 180.0 {
        wrapped - FULL_TURN_DEG
    } else {
        wrapped
    }
}

/// Computes the solar altitude, azimuth and ENU unit vector
///
/// # Arguments
///
/// * `latitude_deg` - Site latitude φ, positive north
/// * `declination_deg` - Solar declination δ
/// * `hour_angle_deg` - Hour angle H from solar noon
///
/// # Mathematical Formulas
///
/// ```text
/// sin a = sin φ sin δ + cos φ cos δ cos H          (clamped to [-1, 1])
/// sin A = cos δ sin H / cos a
/// cos A = (sin δ − sin a sin φ) / (cos a cos φ)
/// s     = (cos a sin A, cos a cos A, sin a)          (East, North, Up)
/// ```
///
/// When `|cos a| < 1e-9` the sun is at zenith or nadir and the azimuth is set
/// to 0 by convention.
///
/// # Examples
///
/// ```rust
/// use yantra::astronomy::solar_position;
///
/// let sun = solar_position(23.1765, 0.0, 45.0);
/// assert!((sun.altitude - 40.5447).abs() < 1e-3);
/// assert!((sun.unit_vector.magnitude() - 1.0).abs() < 1e-12);
/// ```
pub fn solar_position(latitude_deg: f64, declination_deg: f64, hour_angle_deg: f64) -> SunPosition {
    let phi = latitude_deg * DEG2RAD;
    let delta = declination_deg * DEG2RAD;
    let h = hour_angle_deg * DEG2RAD;

    let sin_altitude =
        (phi.sin() * delta.sin() + phi.cos() * delta.cos() * h.cos()).clamp(-1.0, 1.0);
    let altitude_rad = sin_altitude.asin();
    let cos_altitude = altitude_rad.cos();

    let azimuth_deg = if cos_altitude.abs() < ZENITH_COS_THRESHOLD {
        0.0
    } else {
        let sin_azimuth = delta.cos() * h.sin() / cos_altitude;
        let cos_azimuth = (delta.sin() - sin_altitude * phi.sin()) / (cos_altitude * phi.cos());
        let azimuth = sin_azimuth.atan2(cos_azimuth) * RAD2DEG;
        if azimuth.is_finite() {
            normalize_degrees(azimuth)
        } else {
            0.0
        }
    };

    let azimuth_rad = azimuth_deg * DEG2RAD;
    let unit_vector = Vector3D::new(
        cos_altitude * azimuth_rad.sin(),
        cos_altitude * azimuth_rad.cos(),
        sin_altitude,
    );

    SunPosition {
        altitude: altitude_rad * RAD2DEG,
        azimuth: azimuth_deg,
        declination: declination_deg,
        hour_angle: hour_angle_deg,
        unit_vector,
    }
}

/// Solar declination in degrees for a day of the year (1-366)
///
/// `δ = 23.45° · sin(360° · (284 + n) / 365)`
pub fn solar_declination(day_of_year: u32) -> f64 {
    let angle = FULL_TURN_DEG * (284.0 + day_of_year as f64) / DAYS_PER_YEAR;
    DECLINATION_AMPLITUDE_DEG * (angle * DEG2RAD).sin()
}

/// Equation of time in minutes for a day of the year (1-366)
///
/// Two-harmonic approximation with `B = 360° · (n − 81) / 365`:
/// `EoT = 9.87 sin 2B − 7.53 cos B − 1.5 sin B`.
pub fn equation_of_time(day_of_year: u32) -> f64 {
    let b = (FULL_TURN_DEG * (day_of_year as f64 - 81.0) / DAYS_PER_YEAR) * DEG2RAD;
    9.87 * (2.0 * b).sin() - 7.53 * b.cos() - 1.5 * b.sin()
}

/// Hour angle in degrees for a whole solar hour (12 = noon)
pub fn hour_angle_for_hour(hour: u8) -> f64 {
    hour_angle_for_solar_time(hour as f64)
}

/// Hour angle in degrees for a fractional local apparent solar time in hours
pub fn hour_angle_for_solar_time(solar_hours: f64) -> f64 {
    (solar_hours - NOON_HOUR) * DEG_PER_HOUR
}

/// Hour angle of sunrise/sunset in degrees, `cos H0 = −tan φ tan δ`
///
/// Returns `None` when the sun never crosses the horizon that day (polar day
/// or polar night).
pub fn sunrise_hour_angle(latitude_deg: f64, declination_deg: f64) -> Option<f64> {
    let cos_h0 = -(latitude_deg * DEG2RAD).tan() * (declination_deg * DEG2RAD).tan();
    if !cos_h0.is_finite() || cos_h0.abs() > 1.0 {
        return None;
    }
    Some(cos_h0.acos() * RAD2DEG)
}

/// Hours of daylight between sunrise and sunset
///
/// 24 for polar day, 0 for polar night.
pub fn day_length_hours(latitude_deg: f64, declination_deg: f64) -> f64 {
    match sunrise_hour_angle(latitude_deg, declination_deg) {
        Some(h0) => 2.0 * h0 / DEG_PER_HOUR,
        // Noon altitude decides between polar day and polar night
        None if solar_position(latitude_deg, declination_deg, 0.0).altitude > 0.0 => 24.0,
        None => 0.0,
    }
}

/// UTC time of solar noon in fractional hours for a longitude (east positive)
pub fn solar_noon_utc(longitude_deg: f64, day_of_year: u32) -> f64 {
    NOON_HOUR - longitude_deg / DEG_PER_HOUR - equation_of_time(day_of_year) / 60.0
}

/// Local apparent solar time in fractional hours for a UTC instant
pub fn local_solar_time(longitude_deg: f64, utc: &NaiveDateTime) -> f64 {
    let utc_hours = utc.hour() as f64
        + utc.minute() as f64 / 60.0
        + (utc.second() as f64 + utc.nanosecond() as f64 * 1e-9) / 3600.0;
    let solar = utc_hours + longitude_deg / DEG_PER_HOUR + equation_of_time(utc.ordinal()) / 60.0;
    solar.rem_euclid(24.0)
}

/// Sun position at a site for a UTC instant
///
/// The day of year sets the declination and equation of time; the longitude
/// and equation of time turn UTC into local apparent solar time, from which the
/// hour angle follows. The result uses the same hour-angle convention as
/// [`solar_position`].
pub fn sun_position_at(site: &Coordinates, utc: &NaiveDateTime) -> SunPosition {
    let declination = solar_declination(utc.ordinal());
    let hour_angle = wrap_hour_angle(hour_angle_for_solar_time(local_solar_time(
        site.longitude,
        utc,
    )));
    solar_position(site.latitude, declination, hour_angle)
}

/// Sunrise and sunset at a site as fractional UTC hours of the given day
///
/// Both events are placed symmetrically about [`solar_noon_utc`], so
/// `sunset − sunrise` equals [`day_length_hours`]. Events that fall on the
/// neighbouring UTC date come out below 0 or above 24. Returns `None` for
/// polar day or polar night.
pub fn sunrise_sunset_utc(site: &Coordinates, day_of_year: u32) -> Option<(f64, f64)> {
    let h0 = sunrise_hour_angle(site.latitude, solar_declination(day_of_year))?;
    let noon = solar_noon_utc(site.longitude, day_of_year);
    let half_day = h0 / DEG_PER_HOUR;
    Some((noon - half_day, noon + half_day))
}

/// Atmospheric refraction in arcminutes for a true altitude in degrees
///
/// Saemundsson's formula `R = 1.02 / tan(a + 10.3 / (a + 5.11))`, clamped at
/// zero near the zenith where it dips slightly negative. `None` when the sun
/// is on or below the horizon.
pub fn atmospheric_refraction_arcmin(altitude_deg: f64) -> Option<f64> {
    if altitude_deg.is_nan() || altitude_deg <= 0.0 {
        return None;
    }
    let angle = (altitude_deg + 10.3 / (altitude_deg + 5.11)) * DEG2RAD;
    Some((1.02 / angle.tan()).max(0.0))
}

/// Corrections to apply when reading a yantra at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Corrections {
    /// Minutes to add to the sundial (apparent solar) reading to get mean solar time
    pub time_correction_minutes: f64,
    /// Solar declination shaping the day's shadow curve (degrees)
    pub declination: f64,
    /// True solar altitude (degrees)
    pub altitude: f64,
    /// Lift of the apparent sun by refraction, while it is above the horizon
    pub atmospheric_refraction_arcmin: Option<f64>,
}

impl Corrections {
    /// Altitude at which the sun is actually seen, refraction included
    pub fn apparent_altitude(&self) -> f64 {
        self.altitude + self.atmospheric_refraction_arcmin.unwrap_or(0.0) / 60.0
    }
}

/// Equation of time, declination and refraction corrections for a UTC instant
pub fn yantra_corrections(site: &Coordinates, utc: &NaiveDateTime) -> Corrections {
    let sun = sun_position_at(site, utc);
    Corrections {
        time_correction_minutes: equation_of_time(utc.ordinal()),
        declination: sun.declination,
        altitude: sun.altitude,
        atmospheric_refraction_arcmin: atmospheric_refraction_arcmin(sun.altitude),
    }
}
