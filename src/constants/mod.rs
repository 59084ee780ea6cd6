//! Constants module for yantra geometry calculations

use std::f64::consts::PI;

// Angles
/// Degrees to radians conversion factor
pub const DEG2RAD: f64 = PI / 180.0;
/// Radians to degrees conversion factor
pub const RAD2DEG: f64 = 180.0 / PI;
/// Degrees in a full turn
pub const FULL_TURN_DEG: f64 = 360.0;
/// Degrees of hour angle per hour of solar time
pub const DEG_PER_HOUR: f64 = 15.0;
/// Minutes of time per degree of hour angle
pub const MINUTES_PER_DEG: f64 = 4.0;

// Solar geometry
/// Obliquity of the ecliptic used for the solstice declinations (degrees)
pub const OBLIQUITY_DEG: f64 = 23.44;
/// Amplitude of the day-of-year declination approximation (degrees)
pub const DECLINATION_AMPLITUDE_DEG: f64 = 23.45;
/// Days in the calendar year used by the seasonal approximations
pub const DAYS_PER_YEAR: f64 = 365.0;

// Numerical tolerances
/// Default tolerance for parallel-ray and root rejection tests
pub const DEFAULT_EPSILON: f64 = 1e-9;
/// Below this magnitude a vector is treated as zero
pub const ZERO_MAGNITUDE: f64 = 1e-9;
/// Below this |cos(altitude)| the sun is at zenith/nadir and azimuth is undefined
pub const ZENITH_COS_THRESHOLD: f64 = 1e-9;
/// Above this |n . hint| the up hint is swapped when building a plane basis
pub const PARALLEL_HINT_THRESHOLD: f64 = 0.99;

// Instrument defaults (meters)
/// Default Samrat base length
pub const DEFAULT_BASE_LENGTH: f64 = 20.0;
/// Default Rama cylinder / Jai Prakash bowl radius
pub const DEFAULT_RADIUS: f64 = 8.0;
/// Rama cylinder wall height
pub const RAMA_WALL_HEIGHT: f64 = 3.0;

// Daylight sampling window (solar hours)
/// First sampled hour of the day
pub const FIRST_HOUR: u8 = 6;
/// Last sampled hour of the day
pub const LAST_HOUR: u8 = 18;
/// Solar noon
pub const NOON_HOUR: f64 = 12.0;

// Samrat construction (meters unless noted)
/// Masonry base width as a fraction of the base length
pub const SAMRAT_BASE_WIDTH_RATIO: f64 = 0.8;
/// Masonry base thickness
pub const SAMRAT_BASE_THICKNESS: f64 = 0.5;
/// Gnomon wall thickness
pub const SAMRAT_GNOMON_THICKNESS: f64 = 0.3;

// Rama construction (meters unless noted)
/// Cylinder wall thickness
pub const RAMA_WALL_THICKNESS: f64 = 0.3;
/// Cylinder floor thickness
pub const RAMA_BASE_THICKNESS: f64 = 0.5;
/// Central sighting pillar radius
pub const RAMA_PILLAR_RADIUS: f64 = 0.2;
/// Number of radial sectors
pub const RAMA_SECTOR_COUNT: u32 = 12;
/// Achievable altitude reading precision (degrees)
pub const RAMA_ALTITUDE_PRECISION_DEG: f64 = 0.5;
/// Achievable azimuth reading precision (degrees)
pub const RAMA_AZIMUTH_PRECISION_DEG: f64 = 1.0;
/// Samples along each azimuth line, rim to floor inclusive
pub const RAMA_AZIMUTH_LINE_SAMPLES: usize = 20;
/// Hours marked on the equinox solar track
pub const RAMA_TRACK_HOURS: [u8; 5] = [6, 9, 12, 15, 18];

// Jai Prakash construction (meters unless noted)
/// Bowl rim thickness
pub const JAI_PRAKASH_RIM_THICKNESS: f64 = 0.4;
/// Foundation diameter as a multiple of the bowl radius
pub const JAI_PRAKASH_BASE_DIAMETER_RATIO: f64 = 2.2;
/// Height of the central rod gnomon
pub const JAI_PRAKASH_GNOMON_HEIGHT: f64 = 0.1;
/// Diameter of the central rod gnomon
pub const JAI_PRAKASH_GNOMON_DIAMETER: f64 = 0.02;
/// Achievable time reading precision (minutes)
pub const JAI_PRAKASH_TIME_PRECISION_MIN: f64 = 1.0;
/// Achievable coordinate reading precision (degrees)
pub const JAI_PRAKASH_COORDINATE_PRECISION_DEG: f64 = 0.5;

// Observation scoring
/// Time error at which the time score reaches zero (minutes)
pub const TIME_ERROR_SCALE_MIN: f64 = 10.0;
/// Position error at which the position score reaches zero (degrees)
pub const POSITION_ERROR_SCALE_DEG: f64 = 5.0;
