//! Records produced by the yantra generators
//!
//! Every generator returns plain data: points tagged with the hour angle and
//! declination that produced them, grouped by typed keys (season, dial side,
//! hour) rather than by string names.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::OBLIQUITY_DEG;
use crate::coordinates::Vector3D;

use super::verification::HourLineCheck;

/// A marked point on an instrument surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YantraPoint {
    /// World-space position in the site ENU frame (meters)
    pub position_3d: Vector3D,
    /// Local surface coordinates; meaning depends on the surface
    ///
    /// - dial faces: `(u, v)` in meters along the plane basis
    /// - Rama cylinder: `(azimuth_deg, height)`
    /// - Jai Prakash bowl: `(theta_deg, phi_deg)`
    pub surface_coords: (f64, f64),
    /// Hour angle that produced the point (degrees), 0 where not applicable
    pub hour_angle: f64,
    /// Declination that produced the point (degrees), 0 where not applicable
    pub declination: f64,
    /// Shadow ray parameter from the gnomon tip, 0 for closed-form surfaces
    pub shadow_length: f64,
}

impl YantraPoint {
    /// True when every numeric field is finite
    pub fn is_finite(&self) -> bool {
        self.position_3d.is_finite()
            && self.surface_coords.0.is_finite()
            && self.surface_coords.1.is_finite()
            && self.hour_angle.is_finite()
            && self.declination.is_finite()
            && self.shadow_length.is_finite()
    }
}

/// Canonical sampling dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Equinox,
    SummerSolstice,
    WinterSolstice,
}

impl Season {
    /// Generation order
    pub const ALL: [Season; 3] = [
        Season::Equinox,
        Season::SummerSolstice,
        Season::WinterSolstice,
    ];

    /// Solar declination for this season with the standard obliquity
    pub fn declination(self) -> f64 {
        self.declination_with(OBLIQUITY_DEG)
    }

    /// Solar declination for this season given the solstice declination
    ///
    /// Seasons are named for the northern hemisphere: the summer solstice is
    /// always the positive declination.
    pub fn declination_with(self, solstice_declination: f64) -> f64 {
        match self {
            Season::Equinox => 0.0,
            Season::SummerSolstice => solstice_declination,
            Season::WinterSolstice => -solstice_declination,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Season::Equinox => "equinox",
            Season::SummerSolstice => "summer_solstice",
            Season::WinterSolstice => "winter_solstice",
        }
    }
}

/// Samrat dial face receiving a shadow
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialSide {
    /// Face at x = +L/2, facing west
    East,
    /// Face at x = −L/2, facing east
    West,
}

/// An engraved hour mark
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourMark {
    /// Local apparent solar hour, 6-18
    pub hour: u8,
    pub point: YantraPoint,
}

/// Items split between the two Samrat dial faces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideCurves<T> {
    pub east: Vec<T>,
    pub west: Vec<T>,
}

impl<T> Default for SideCurves<T> {
    fn default() -> Self {
        Self {
            east: Vec::new(),
            west: Vec::new(),
        }
    }
}

impl<T> SideCurves<T> {
    pub fn side(&self, side: DialSide) -> &[T] {
        match side {
            DialSide::East => &self.east,
            DialSide::West => &self.west,
        }
    }

    pub fn side_mut(&mut self, side: DialSide) -> &mut Vec<T> {
        match side {
            DialSide::East => &mut self.east,
            DialSide::West => &mut self.west,
        }
    }

    /// Total number of items on both faces
    pub fn len(&self) -> usize {
        self.east.len() + self.west.len()
    }

    pub fn is_empty(&self) -> bool {
        self.east.is_empty() && self.west.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Samrat
// ---------------------------------------------------------------------------

/// Masonry base slab
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseDimensions {
    pub length: f64,
    pub width: f64,
    pub thickness: f64,
}

/// Triangular gnomon wall aligned North-South
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GnomonDimensions {
    pub height: f64,
    pub base_width: f64,
    pub thickness: f64,
    /// Slope of the hypotenuse above the horizon (degrees), equal to the latitude
    pub angle_from_horizontal: f64,
}

/// Placement of the two vertical dial faces
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DialFaces {
    pub east_face_position: Vector3D,
    pub west_face_position: Vector3D,
    pub east_face_normal: Vector3D,
    pub west_face_normal: Vector3D,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamratConstruction {
    pub base: BaseDimensions,
    pub gnomon: GnomonDimensions,
    pub dial_faces: DialFaces,
}

/// Samrat (equinoctial sundial) layout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SamratGeometry {
    pub latitude: f64,
    pub gnomon_tip: Vector3D,
    pub construction: SamratConstruction,
    /// Equinox marks, ordered by hour on each face
    pub hour_lines: SideCurves<HourMark>,
    pub seasonal_curves: BTreeMap<Season, SideCurves<YantraPoint>>,
    pub accuracy_verification: Vec<HourLineCheck>,
}

// ---------------------------------------------------------------------------
// Rama
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CylinderDimensions {
    pub radius: f64,
    pub height: f64,
    pub wall_thickness: f64,
    pub base_thickness: f64,
}

/// Central sighting pillar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pillar {
    pub position: Vector3D,
    pub radius: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sectors {
    pub count: u32,
    pub angle_each: f64,
    pub radial_walls: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RamaConstruction {
    pub cylinder: CylinderDimensions,
    pub central_pillar: Pillar,
    pub sectors: Sectors,
}

/// Ring of constant altitude around the wall
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AltitudeCircle {
    pub altitude: f64,
    pub points: Vec<YantraPoint>,
}

/// Vertical line of constant azimuth on the wall
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AzimuthLine {
    pub azimuth: f64,
    pub points: Vec<YantraPoint>,
}

/// Reading precision of a finished instrument
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasurementAccuracy {
    pub altitude_precision: f64,
    pub azimuth_precision: f64,
}

/// Rama (cylindrical altitude-azimuth) layout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RamaGeometry {
    pub latitude: f64,
    pub construction: RamaConstruction,
    pub altitude_circles: Vec<AltitudeCircle>,
    pub azimuth_lines: Vec<AzimuthLine>,
    /// Equinox sun positions on the wall keyed by solar hour
    pub solar_tracks: BTreeMap<u8, YantraPoint>,
    pub measurement_accuracy: MeasurementAccuracy,
}

// ---------------------------------------------------------------------------
// Jai Prakash
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BowlDimensions {
    pub radius: f64,
    pub depth: f64,
    pub rim_thickness: f64,
    pub base_diameter: f64,
}

/// Rod gnomon at the bowl center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RodGnomon {
    pub position: Vector3D,
    pub direction: Vector3D,
    pub height: f64,
    pub diameter: f64,
}

/// Orientation of the celestial grid engraved in the bowl (degrees)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CelestialFrame {
    pub tilt_angle: f64,
    pub celestial_equator_angle: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JaiPrakashConstruction {
    pub bowl: BowlDimensions,
    pub gnomon: RodGnomon,
    pub coordinate_system: CelestialFrame,
}

/// Sun path for one declination across the day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeclinationCircle {
    pub declination: f64,
    pub points: Vec<YantraPoint>,
}

/// Positions at one solar hour across the seasons
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourCircle {
    pub hour: u8,
    pub points: Vec<YantraPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JaiPrakashAccuracy {
    pub time_precision_minutes: f64,
    pub coordinate_precision_degrees: f64,
}

/// Jai Prakash (hemispherical bowl) layout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JaiPrakashGeometry {
    pub latitude: f64,
    pub construction: JaiPrakashConstruction,
    /// Circles with no point above the horizon are omitted
    pub declination_circles: Vec<DeclinationCircle>,
    /// Hours with no point above the horizon are omitted
    pub hour_circles: Vec<HourCircle>,
    pub accuracy: JaiPrakashAccuracy,
}
