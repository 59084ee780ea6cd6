//! # Vector Module
//!
//! This module provides the 3D vector used for every position and direction in
//! the yantra geometry: gnomon tips, dial-face anchor points, surface normals,
//! sun directions and shadow rays.
//!
//! ## Frame Convention
//!
//! Vectors are expressed in the local East-North-Up (ENU) frame of the site:
//! - **X-axis**: East
//! - **Y-axis**: North
//! - **Z-axis**: Up (local zenith)
//!
//! Positions are in meters; unit vectors are dimensionless.
//!
//! ## Value Semantics
//!
//! `Vector3D` is `Copy` and every operation returns a new value. Arithmetic is
//! available through the standard operators (`+`, `-`, unary `-`, `* f64`,
//! `/ f64`).
//!
//! ## Examples
//!
//! ```rust
//! use yantra::coordinates::Vector3D;
//!
//! let east = Vector3D::new(1.0, 0.0, 0.0);
//! let north = Vector3D::new(0.0, 1.0, 0.0);
//!
//! // East x North = Up in a right-handed ENU frame
//! let up = east.cross(&north);
//! assert_eq!(up, Vector3D::new(0.0, 0.0, 1.0));
//! assert_eq!(east.dot(&north), 0.0);
//! ```

use crate::constants::ZERO_MAGNITUDE;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Three-dimensional vector in the site ENU frame
///
/// # Unit Vectors vs Position Vectors
///
/// This type represents both:
/// - **Positions**: points on the instrument, in meters
/// - **Directions**: sun vectors, shadow rays and surface normals
///
/// The interpretation depends on context.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3D {
    /// East component
    pub x: f64,
    /// North component
    pub y: f64,
    /// Up component
    pub z: f64,
}

impl Vector3D {
    /// The zero vector
    pub const ZERO: Vector3D = Vector3D {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    /// Unit vector toward East
    pub const EAST: Vector3D = Vector3D {
        x: 1.0,
        y: 0.0,
        z: 0.0,
    };
    /// Unit vector toward North
    pub const NORTH: Vector3D = Vector3D {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };
    /// Unit vector toward the zenith
    pub const UP: Vector3D = Vector3D {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };

    /// Creates a new vector
    ///
    /// # Examples
    ///
    /// ```rust
    /// use yantra::coordinates::Vector3D;
    ///
    /// let tip = Vector3D::new(0.0, 0.0, 8.56);
    /// assert_eq!(tip.z, 8.56);
    /// ```
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Vector3D { x, y, z }
    }

    /// Calculates the magnitude (length) of the vector
    ///
    /// # Mathematical Formula
    ///
    /// `magnitude = sqrt(x² + y² + z²)`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use yantra::coordinates::Vector3D;
    ///
    /// assert_eq!(Vector3D::new(3.0, 4.0, 0.0).magnitude(), 5.0);
    /// ```
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Returns a unit vector in the same direction
    ///
    /// Vectors shorter than 1e-9 normalize to the zero vector instead of
    /// dividing by a vanishing magnitude, so the result is always either a unit
    /// vector or exactly zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use yantra::coordinates::Vector3D;
    ///
    /// let unit = Vector3D::new(3.0, 4.0, 0.0).normalize();
    /// assert!((unit.magnitude() - 1.0).abs() < 1e-15);
    ///
    /// assert_eq!(Vector3D::new(1e-12, 0.0, 0.0).normalize(), Vector3D::ZERO);
    /// ```
    pub fn normalize(&self) -> Vector3D {
        let mag = self.magnitude();
        if mag > ZERO_MAGNITUDE {
            *self / mag
        } else {
            Vector3D::ZERO
        }
    }

    /// Calculates the dot product with another vector
    ///
    /// `dot = x₁*x₂ + y₁*y₂ + z₁*z₂`
    pub fn dot(&self, other: &Vector3D) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Calculates the cross product with another vector
    ///
    /// ```text
    /// cross = (y₁*z₂ - z₁*y₂, z₁*x₂ - x₁*z₂, x₁*y₂ - y₁*x₂)
    /// ```
    pub fn cross(&self, other: &Vector3D) -> Vector3D {
        Vector3D {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Horizontal distance from the vertical axis through the origin
    pub fn horizontal_magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// True when all three components are finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Vector3D) -> f64 {
        (*self - *other).magnitude()
    }

    /// Components as an `[x, y, z]` array
    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Converts to nalgebra Vector3 for linear algebra operations
    ///
    /// ```rust
    /// use yantra::coordinates::Vector3D;
    ///
    /// let v = Vector3D::new(1.0, 2.0, 3.0).to_vector3();
    /// assert_eq!(v.y, 2.0);
    /// ```
    pub fn to_vector3(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Creates from nalgebra Vector3
    pub fn from_vector3(vec: Vector3<f64>) -> Self {
        Vector3D {
            x: vec.x,
            y: vec.y,
            z: vec.z,
        }
    }
}

impl From<Vector3<f64>> for Vector3D {
    fn from(vec: Vector3<f64>) -> Self {
        Vector3D::from_vector3(vec)
    }
}

impl From<Vector3D> for Vector3<f64> {
    fn from(v: Vector3D) -> Self {
        v.to_vector3()
    }
}

// Arithmetic operations
impl std::ops::Add for Vector3D {
    type Output = Vector3D;

    fn add(self, other: Vector3D) -> Vector3D {
        Vector3D {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl std::ops::Sub for Vector3D {
    type Output = Vector3D;

    fn sub(self, other: Vector3D) -> Vector3D {
        Vector3D {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl std::ops::Neg for Vector3D {
    type Output = Vector3D;

    fn neg(self) -> Vector3D {
        Vector3D {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl std::ops::Mul<f64> for Vector3D {
    type Output = Vector3D;

    fn mul(self, scalar: f64) -> Vector3D {
        Vector3D {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

impl std::ops::Div<f64> for Vector3D {
    type Output = Vector3D;

    fn div(self, scalar: f64) -> Vector3D {
        Vector3D {
            x: self.x / scalar,
            y: self.y / scalar,
            z: self.z / scalar,
        }
    }
}
