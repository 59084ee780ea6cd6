//! Surface coordinate systems
//!
//! Maps world-space points onto the 2D frames that masons actually mark out:
//! an in-plane `(u, v)` basis for flat dial faces, `(azimuth, height)` on the
//! Rama cylinder, and `(azimuth, depression)` inside the Jai Prakash bowl.

use crate::astronomy::normalize_degrees;
use crate::constants::{PARALLEL_HINT_THRESHOLD, RAD2DEG, ZERO_MAGNITUDE};
use crate::coordinates::Vector3D;
use crate::geometry::{Cylinder, Plane};
use serde::Serialize;

/// Orthonormal basis spanning a plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlaneBasis {
    pub u: Vector3D,
    pub v: Vector3D,
}

impl PlaneBasis {
    /// Basis for `plane` using the zenith as the up hint
    pub fn for_plane(plane: &Plane) -> Self {
        plane_coordinate_system(plane, Vector3D::UP)
    }

    /// Local `(x, y)` coordinates of `point` relative to `plane.point()`
    pub fn project(&self, point: &Vector3D, plane: &Plane) -> (f64, f64) {
        project_to_plane_coords(point, plane, self)
    }

    /// World-space point `P₀ + x·u + y·v` for local coordinates on `plane`
    pub fn to_world(&self, plane: &Plane, local: (f64, f64)) -> Vector3D {
        plane.point() + self.u * local.0 + self.v * local.1
    }
}

/// Builds an orthonormal in-plane basis
///
/// `u = normalize(n × hint)` and `v = normalize(n × u)`. When the normal is
/// within `|n · hint| > 0.99` of the hint the cross product degenerates, so the
/// hint is swapped for East, or for North when the normal itself points mostly
/// East.
///
/// # Examples
///
/// ```rust
/// use yantra::coordinates::Vector3D;
/// use yantra::geometry::Plane;
/// use yantra::surface::plane_coordinate_system;
///
/// let floor = Plane::new(Vector3D::ZERO, Vector3D::UP).unwrap();
/// let basis = plane_coordinate_system(&floor, Vector3D::UP);
/// assert!(basis.u.dot(&basis.v).abs() < 1e-12);
/// assert!(basis.u.dot(&floor.normal()).abs() < 1e-12);
/// ```
pub fn plane_coordinate_system(plane: &Plane, up_hint: Vector3D) -> PlaneBasis {
    let n = plane.normal();

    let mut hint = up_hint.normalize();
    if hint.magnitude() <= ZERO_MAGNITUDE {
        hint = Vector3D::UP;
    }
    if n.dot(&hint).abs() > PARALLEL_HINT_THRESHOLD {
        hint = if n.x.abs() < 0.9 {
            Vector3D::EAST
        } else {
            Vector3D::NORTH
        };
    }

    let u = n.cross(&hint).normalize();
    let v = n.cross(&u).normalize();
    PlaneBasis { u, v }
}

/// Projects a point onto a plane's local frame
///
/// `(x, y) = ((X − P₀) · u, (X − P₀) · v)`. Points off the plane project
/// along the normal; callers that care about plane adherence pass
/// intersection results.
pub fn project_to_plane_coords(point: &Vector3D, plane: &Plane, basis: &PlaneBasis) -> (f64, f64) {
    let relative = *point - plane.point();
    (relative.dot(&basis.u), relative.dot(&basis.v))
}

/// `(azimuth_deg, height)` of a point relative to a cylinder's base center
///
/// Azimuth is measured from +x toward +y and wrapped to [0, 360). Height is not
/// clipped to the wall.
pub fn cylinder_coordinates(point: &Vector3D, cylinder: &Cylinder) -> (f64, f64) {
    let relative = *point - cylinder.center();
    let azimuth = normalize_degrees(relative.y.atan2(relative.x) * RAD2DEG);
    (azimuth, relative.z)
}

/// `(theta_deg, phi_deg)` of a point inside a bowl centered at `center`
///
/// `theta` is the azimuth from +x toward +y in [0, 360); `phi` is the
/// depression below the rim, `asin(−z / r)`. The center itself maps to
/// `(0, 0)`.
pub fn hemisphere_coordinates(point: &Vector3D, center: &Vector3D) -> (f64, f64) {
    let relative = *point - *center;
    let r = relative.magnitude();
    if r <= ZERO_MAGNITUDE {
        return (0.0, 0.0);
    }
    let phi = (-relative.z / r).clamp(-1.0, 1.0).asin() * RAD2DEG;
    let theta = normalize_degrees(relative.y.atan2(relative.x) * RAD2DEG);
    (theta, phi)
}
