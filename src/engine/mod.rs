//! Yantra geometry engine
//!
//! [`YantraGeometryEngine`] turns a site latitude and an instrument size into
//! construction geometry for one of three instruments:
//!
//! - **Samrat**: shadows of the gnomon tip ray-traced onto two vertical dial
//!   faces, for the equinox and both solstices
//! - **Rama**: an altitude/azimuth grid laid out on a cylinder wall
//! - **Jai Prakash**: declination and hour circles mapped into a hemispherical
//!   bowl
//!
//! The engine holds only an immutable [`EngineConfig`]; every call is a pure
//! function of its arguments.
//!
//! # Examples
//!
//! ```rust
//! use yantra::{Coordinates, YantraGeometryEngine, YantraKind};
//!
//! let engine = YantraGeometryEngine::new();
//! let jaipur = Coordinates::new(26.9124, 75.7873, 431.0).unwrap();
//! let geometry = engine.generate(&jaipur, YantraKind::Samrat, None).unwrap();
//! assert_eq!(geometry.kind(), YantraKind::Samrat);
//! assert!(geometry.to_json(false).unwrap().contains("\"yantra_type\":\"samrat\""));
//! ```

use std::fmt;
use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BASE_LENGTH, DEFAULT_EPSILON, DEFAULT_RADIUS, FIRST_HOUR, LAST_HOUR, OBLIQUITY_DEG,
    RAMA_WALL_HEIGHT,
};
use crate::coordinates::Coordinates;
use crate::{require_positive, Result, YantraError};

mod jai_prakash;
mod rama;
mod samrat;
pub mod types;
pub mod verification;

pub use jai_prakash::bowl_point;
pub use samrat::{default_gnomon_height, dial_side_for_azimuth};
pub use types::{
    AltitudeCircle, AzimuthLine, BaseDimensions, BowlDimensions, CelestialFrame,
    CylinderDimensions, DeclinationCircle, DialFaces, DialSide, GnomonDimensions, HourCircle,
    HourMark, JaiPrakashAccuracy, JaiPrakashConstruction, JaiPrakashGeometry,
    MeasurementAccuracy, Pillar, RamaConstruction, RamaGeometry, RodGnomon, SamratConstruction,
    SamratGeometry, Season, Sectors, SideCurves, YantraPoint,
};
pub use verification::{
    score_observation, verify_samrat_accuracy, AccuracyGrade, HourLineCheck, Observation,
    ObservationCheck,
};

/// Configuration for the geometry engine
///
/// Every field has a default, so a JSON file only needs the values it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Tolerance passed to every intersection test
    pub epsilon: f64,
    /// Declination used for the solstice curves (degrees)
    pub solstice_declination: f64,
    /// First sampled solar hour
    pub first_hour: u8,
    /// Last sampled solar hour, inclusive
    pub last_hour: u8,
    /// Height of the Rama cylinder wall (meters)
    pub rama_wall_height: f64,
    /// Samrat base length used when no size is given (meters)
    pub default_base_length: f64,
    /// Rama / Jai Prakash radius used when no size is given (meters)
    pub default_radius: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            solstice_declination: OBLIQUITY_DEG,
            first_hour: FIRST_HOUR,
            last_hour: LAST_HOUR,
            rama_wall_height: RAMA_WALL_HEIGHT,
            default_base_length: DEFAULT_BASE_LENGTH,
            default_radius: DEFAULT_RADIUS,
        }
    }
}

impl EngineConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the intersection tolerance
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the declination used for the solstice curves
    pub fn with_solstice_declination(mut self, declination: f64) -> Self {
        self.solstice_declination = declination;
        self
    }

    /// Set the inclusive range of sampled solar hours
    pub fn with_hours(mut self, first_hour: u8, last_hour: u8) -> Self {
        self.first_hour = first_hour;
        self.last_hour = last_hour;
        self
    }

    /// Set the Rama wall height
    pub fn with_rama_wall_height(mut self, height: f64) -> Self {
        self.rama_wall_height = height;
        self
    }

    /// Set the default instrument sizes
    pub fn with_default_sizes(mut self, base_length: f64, radius: f64) -> Self {
        self.default_base_length = base_length;
        self.default_radius = radius;
        self
    }

    /// Checks every field, returning the first problem found
    pub fn validate(&self) -> Result<()> {
        require_positive("epsilon", self.epsilon)?;
        require_positive("rama_wall_height", self.rama_wall_height)?;
        require_positive("default_base_length", self.default_base_length)?;
        require_positive("default_radius", self.default_radius)?;

        if !self.solstice_declination.is_finite()
            || !(0.0..90.0).contains(&self.solstice_declination)
        {
            return Err(YantraError::Config(format!(
                "solstice_declination {} is outside [0, 90)",
                self.solstice_declination
            )));
        }
        if self.first_hour > self.last_hour || self.last_hour > 23 {
            return Err(YantraError::Config(format!(
                "hour range {}..={} is not within a day",
                self.first_hour, self.last_hour
            )));
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a JSON configuration file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        debug!("Loaded engine configuration from {}", path.as_ref().display());
        Self::from_json_str(&text)
    }
}

/// Instrument to generate
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum YantraKind {
    Samrat,
    Rama,
    JaiPrakash,
}

impl YantraKind {
    pub fn name(self) -> &'static str {
        match self {
            YantraKind::Samrat => "samrat",
            YantraKind::Rama => "rama",
            YantraKind::JaiPrakash => "jai_prakash",
        }
    }
}

impl fmt::Display for YantraKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Generated geometry for any instrument, tagged by `yantra_type` in JSON
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "yantra_type", rename_all = "snake_case")]
pub enum YantraGeometry {
    Samrat {
        site: Coordinates,
        geometry: SamratGeometry,
    },
    Rama {
        site: Coordinates,
        geometry: RamaGeometry,
    },
    JaiPrakash {
        site: Coordinates,
        geometry: JaiPrakashGeometry,
    },
}

impl YantraGeometry {
    pub fn kind(&self) -> YantraKind {
        match self {
            YantraGeometry::Samrat { .. } => YantraKind::Samrat,
            YantraGeometry::Rama { .. } => YantraKind::Rama,
            YantraGeometry::JaiPrakash { .. } => YantraKind::JaiPrakash,
        }
    }

    pub fn site(&self) -> &Coordinates {
        match self {
            YantraGeometry::Samrat { site, .. }
            | YantraGeometry::Rama { site, .. }
            | YantraGeometry::JaiPrakash { site, .. } => site,
        }
    }

    /// Serializes to JSON, optionally pretty-printed
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

/// Construction geometry generator for masonry yantras
#[derive(Debug, Clone, Default)]
pub struct YantraGeometryEngine {
    config: EngineConfig,
}

impl YantraGeometryEngine {
    /// Engine with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with a validated configuration
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Generates geometry for `kind` at `site`
    ///
    /// `size` is the Samrat base length or the Rama/Jai Prakash radius in
    /// meters; `None` uses the configured default. The Samrat gnomon takes its
    /// default height; call [`generate_samrat`](Self::generate_samrat)
    /// directly to set it.
    pub fn generate(
        &self,
        site: &Coordinates,
        kind: YantraKind,
        size: Option<f64>,
    ) -> Result<YantraGeometry> {
        debug!("Generating {} geometry for {:?}", kind, site);
        let site = *site;
        let geometry = match kind {
            YantraKind::Samrat => YantraGeometry::Samrat {
                site,
                geometry: self.generate_samrat(
                    site.latitude,
                    size.unwrap_or(self.config.default_base_length),
                    None,
                )?,
            },
            YantraKind::Rama => YantraGeometry::Rama {
                site,
                geometry: self
                    .generate_rama(site.latitude, size.unwrap_or(self.config.default_radius))?,
            },
            YantraKind::JaiPrakash => YantraGeometry::JaiPrakash {
                site,
                geometry: self.generate_jai_prakash(
                    site.latitude,
                    size.unwrap_or(self.config.default_radius),
                )?,
            },
        };
        Ok(geometry)
    }
}
