//! Geometric primitives: rays, planes and vertical cylinders
//!
//! Planes and cylinders validate their inputs at construction, so every value
//! that reaches the intersection code is well formed. Rays are left
//! unvalidated; the intersection routines report `t` in units of the ray's
//! direction length.

use crate::constants::ZERO_MAGNITUDE;
use crate::coordinates::Vector3D;
use crate::{require_positive, Result, YantraError};
use serde::Serialize;

/// Half-line with an origin and a direction
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ray {
    pub origin: Vector3D,
    /// Not normalized by the ray itself
    pub direction: Vector3D,
}

impl Ray {
    pub fn new(origin: Vector3D, direction: Vector3D) -> Self {
        Self { origin, direction }
    }

    /// Point reached after travelling `t` direction-lengths from the origin
    pub fn point_at(&self, t: f64) -> Vector3D {
        self.origin + self.direction * t
    }
}

/// Infinite plane through `point` with unit `normal`
///
/// Used for the Samrat dial faces and any flat wall segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Plane {
    point: Vector3D,
    normal: Vector3D,
}

impl Plane {
    /// Creates a plane, normalizing `normal`
    ///
    /// Fails when the point is not finite or the normal is zero or not finite.
    pub fn new(point: Vector3D, normal: Vector3D) -> Result<Self> {
        if !point.is_finite() {
            return Err(YantraError::InvalidVector(format!(
                "plane point {:?} is not finite",
                point
            )));
        }
        if !normal.is_finite() || normal.magnitude() <= ZERO_MAGNITUDE {
            return Err(YantraError::InvalidVector(format!(
                "plane normal {:?} has no direction",
                normal
            )));
        }
        Ok(Self {
            point,
            normal: normal.normalize(),
        })
    }

    /// Horizontal plane through the site origin, normal toward the zenith
    pub fn ground() -> Self {
        Self {
            point: Vector3D::ZERO,
            normal: Vector3D::UP,
        }
    }

    /// Any point on the plane
    pub fn point(&self) -> Vector3D {
        self.point
    }

    /// Unit normal
    pub fn normal(&self) -> Vector3D {
        self.normal
    }

    /// Signed distance from the plane, positive on the normal side
    pub fn signed_distance(&self, p: &Vector3D) -> f64 {
        (*p - self.point).dot(&self.normal)
    }
}

/// Vertical cylinder standing on `center` with its axis along +z
///
/// Models the circular wall of the Rama yantra.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cylinder {
    center: Vector3D,
    radius: f64,
    height: f64,
}

impl Cylinder {
    /// Creates a cylinder; radius and height must be finite and positive
    pub fn new(center: Vector3D, radius: f64, height: f64) -> Result<Self> {
        if !center.is_finite() {
            return Err(YantraError::InvalidVector(format!(
                "cylinder center {:?} is not finite",
                center
            )));
        }
        Ok(Self {
            center,
            radius: require_positive("radius", radius)?,
            height: require_positive("height", height)?,
        })
    }

    /// Center of the base circle
    pub fn center(&self) -> Vector3D {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_point_at() {
        let ray = Ray::new(Vector3D::new(1.0, 0.0, 10.0), Vector3D::new(0.0, 2.0, -1.0));
        assert_eq!(ray.point_at(0.0), ray.origin);
        assert_eq!(ray.point_at(1.5), Vector3D::new(1.0, 3.0, 8.5));
        assert_eq!(ray.point_at(-1.0), Vector3D::new(1.0, -2.0, 11.0));
    }

    #[test]
    fn test_plane_normalizes_normal() {
        let plane = Plane::new(Vector3D::ZERO, Vector3D::new(0.0, 0.0, 5.0)).unwrap();
        assert_eq!(plane.normal(), Vector3D::UP);
        assert_eq!(plane.point(), Vector3D::ZERO);
        assert_eq!(plane.signed_distance(&Vector3D::new(3.0, -2.0, 4.0)), 4.0);
        assert_eq!(plane, Plane::ground());
    }

    #[test]
    fn test_plane_rejects_degenerate_normal() {
        assert!(matches!(
            Plane::new(Vector3D::ZERO, Vector3D::ZERO),
            Err(YantraError::InvalidVector(_))
        ));
        assert!(Plane::new(Vector3D::ZERO, Vector3D::new(f64::NAN, 1.0, 0.0)).is_err());
        assert!(Plane::new(Vector3D::new(f64::INFINITY, 0.0, 0.0), Vector3D::UP).is_err());
    }

    #[test]
    fn test_cylinder_validation() {
        let cyl = Cylinder::new(Vector3D::ZERO, 5.0, 3.0).unwrap();
        assert_eq!(cyl.radius(), 5.0);
        assert_eq!(cyl.height(), 3.0);
        assert_eq!(cyl.center(), Vector3D::ZERO);

        assert!(matches!(
            Cylinder::new(Vector3D::ZERO, -1.0, 3.0),
            Err(YantraError::InvalidDimension { name: "radius", .. })
        ));
        assert!(matches!(
            Cylinder::new(Vector3D::ZERO, 1.0, 0.0),
            Err(YantraError::InvalidDimension { name: "height", .. })
        ));
        assert!(Cylinder::new(Vector3D::new(0.0, f64::NAN, 0.0), 1.0, 1.0).is_err());
    }
}
