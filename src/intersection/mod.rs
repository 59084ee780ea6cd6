//! Ray-surface intersection
//!
//! Shadow rays leave the gnomon tip in the direction opposite the sun and are
//! intersected with dial faces (planes) or the Rama wall (a finite vertical
//! cylinder). A miss is an ordinary outcome, so both solvers return `Option`.
//!
//! Every solver takes its tolerance explicitly; [`DEFAULT_EPSILON`] is the
//! value the engine uses unless configured otherwise.

pub use crate::constants::DEFAULT_EPSILON;
use crate::coordinates::Vector3D;
use crate::geometry::{Cylinder, Plane, Ray};
use serde::Serialize;

/// Forward hit of a ray on a surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Intersection {
    /// Ray parameter, in units of the ray's direction length
    pub t: f64,
    /// World-space hit point, `origin + direction * t`
    pub point: Vector3D,
}

/// Intersects a ray with a plane
///
/// ```text
/// t = (P₀ − O) · n / (d · n)
/// ```
///
/// Returns `None` when the ray is parallel to the plane (`|d · n| < epsilon`)
/// or when the plane lies behind the origin (`t ≤ 0`).
///
/// # Examples
///
/// ```rust
/// use yantra::coordinates::Vector3D;
/// use yantra::geometry::{Plane, Ray};
/// use yantra::intersection::{ray_plane_intersection, DEFAULT_EPSILON};
///
/// let floor = Plane::new(Vector3D::ZERO, Vector3D::UP).unwrap();
/// let ray = Ray::new(Vector3D::new(0.0, 0.0, 2.0), Vector3D::new(1.0, 0.0, -1.0));
/// let hit = ray_plane_intersection(&ray, &floor, DEFAULT_EPSILON).unwrap();
/// assert_eq!(hit.t, 2.0);
/// assert_eq!(hit.point, Vector3D::new(2.0, 0.0, 0.0));
/// ```
pub fn ray_plane_intersection(ray: &Ray, plane: &Plane, epsilon: f64) -> Option<Intersection> {
    let normal = plane.normal();
    let d_dot_n = ray.direction.dot(&normal);
    if d_dot_n.abs() < epsilon {
        return None;
    }

    let t = (plane.point() - ray.origin).dot(&normal) / d_dot_n;
    if t <= 0.0 || !t.is_finite() {
        return None;
    }

    Some(Intersection {
        t,
        point: ray.point_at(t),
    })
}

/// Intersects a ray with a finite vertical cylinder wall
///
/// Solves the infinite-cylinder quadratic in the horizontal plane,
///
/// ```text
/// a t² + b t + c = 0
/// a = dx² + dy²,  b = 2(ox dx + oy dy),  c = ox² + oy² − R²
/// ```
///
/// with `o` the origin relative to the cylinder's base center. Of the roots
/// strictly beyond `epsilon` the nearer is taken, and the hit is kept only if
/// its height above the base lies within `[0, height]`.
///
/// Returns `None` for rays parallel to the axis (`|a| < epsilon`), rays that
/// miss the circle, hits behind the origin, and hits above or below the wall.
pub fn ray_cylinder_intersection(
    ray: &Ray,
    cylinder: &Cylinder,
    epsilon: f64,
) -> Option<Intersection> {
    let o = ray.origin - cylinder.center();
    let d = ray.direction;
    let radius = cylinder.radius();

    let a = d.x * d.x + d.y * d.y;
    if a.abs() < epsilon {
        return None;
    }
    let b = 2.0 * (o.x * d.x + o.y * d.y);
    let c = o.x * o.x + o.y * o.y - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }
    let sqrt_discriminant = discriminant.sqrt();

    let near = (-b - sqrt_discriminant) / (2.0 * a);
    let far = (-b + sqrt_discriminant) / (2.0 * a);

    // near <= far since a > 0, so the first forward root is the entry point
    let t = [near, far].into_iter().find(|&t| t > epsilon)?;
    let point = ray.point_at(t);

    let z_local = point.z - cylinder.center().z;
    if (0.0..=cylinder.height()).contains(&z_local) {
        Some(Intersection { t, point })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn x_plane(x: f64) -> Plane {
        Plane::new(Vector3D::new(x, 0.0, 0.0), Vector3D::EAST).unwrap()
    }

    fn wall() -> Cylinder {
        Cylinder::new(Vector3D::ZERO, 5.0, 3.0).unwrap()
    }

    #[test]
    fn test_plane_worked_example() {
        let tip = Vector3D::new(1.0, 0.0, 10.0);
        let sun = Vector3D::new(0.70710678, -0.27829240, 0.65004103);
        let ray = Ray::new(tip, -sun);

        let hit = ray_plane_intersection(&ray, &x_plane(0.0), DEFAULT_EPSILON).unwrap();
        assert_relative_eq!(hit.t, 1.41421356, epsilon = 1e-6);

        let expected = Vector3D::new(0.0, 0.39356489, 9.08070316);
        assert!(hit.point.distance_to(&expected) < 0.01);
        assert_relative_eq!(hit.point.x, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_plane_parallel_ray_misses() {
        let ray = Ray::new(Vector3D::new(1.0, 0.0, 0.0), Vector3D::NORTH);
        assert!(ray_plane_intersection(&ray, &x_plane(0.0), DEFAULT_EPSILON).is_none());

        // Grazing within the tolerance counts as parallel
        let grazing = Ray::new(Vector3D::new(1.0, 0.0, 0.0), Vector3D::new(-1e-10, 1.0, 0.0));
        assert!(ray_plane_intersection(&grazing, &x_plane(0.0), DEFAULT_EPSILON).is_none());
        // ...but a coarser tolerance is honoured exactly as given
        assert!(ray_plane_intersection(&grazing, &x_plane(0.0), 1e-12).is_some());
    }

    #[test]
    fn test_plane_behind_origin_misses() {
        let ray = Ray::new(Vector3D::new(1.0, 0.0, 0.0), Vector3D::EAST);
        assert!(ray_plane_intersection(&ray, &x_plane(0.0), DEFAULT_EPSILON).is_none());

        // Origin on the plane gives t = 0, which is not a forward hit
        let on_plane = Ray::new(Vector3D::ZERO, Vector3D::EAST);
        assert!(ray_plane_intersection(&on_plane, &x_plane(0.0), DEFAULT_EPSILON).is_none());
    }

    #[test]
    fn test_plane_t_scales_with_direction_length() {
        let ray = Ray::new(Vector3D::new(4.0, 0.0, 0.0), Vector3D::new(-2.0, 0.0, 0.0));
        let hit = ray_plane_intersection(&ray, &x_plane(0.0), DEFAULT_EPSILON).unwrap();
        assert_eq!(hit.t, 2.0);
        assert_eq!(hit.point, Vector3D::ZERO);
    }

    #[test]
    fn test_cylinder_from_outside_hits_near_wall() {
        let ray = Ray::new(Vector3D::new(7.0, 0.0, 1.5), Vector3D::new(-1.0, 0.0, 0.0));
        let hit = ray_cylinder_intersection(&ray, &wall(), DEFAULT_EPSILON).unwrap();
        assert_relative_eq!(hit.t, 2.0, epsilon = 1e-12);
        assert_relative_eq!(hit.point.x, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_cylinder_from_inside_hits_exit() {
        let ray = Ray::new(Vector3D::new(0.0, 0.0, 1.0), Vector3D::NORTH);
        let hit = ray_cylinder_intersection(&ray, &wall(), DEFAULT_EPSILON).unwrap();
        assert_relative_eq!(hit.t, 5.0, epsilon = 1e-12);
        assert_relative_eq!(hit.point.y, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_cylinder_misses() {
        // Parallel to the axis
        let vertical = Ray::new(Vector3D::new(5.0, 0.0, 5.0), Vector3D::new(0.0, 0.0, -1.0));
        assert!(ray_cylinder_intersection(&vertical, &wall(), DEFAULT_EPSILON).is_none());

        // Passes beside the circle
        let beside = Ray::new(Vector3D::new(7.0, 6.0, 1.0), Vector3D::new(-1.0, 0.0, 0.0));
        assert!(ray_cylinder_intersection(&beside, &wall(), DEFAULT_EPSILON).is_none());

        // Cylinder entirely behind the origin
        let away = Ray::new(Vector3D::new(7.0, 0.0, 1.0), Vector3D::EAST);
        assert!(ray_cylinder_intersection(&away, &wall(), DEFAULT_EPSILON).is_none());

        // Crosses the infinite cylinder above the finite wall
        let high = Ray::new(Vector3D::new(7.0, 0.0, 4.0), Vector3D::new(-1.0, 0.0, 0.0));
        assert!(ray_cylinder_intersection(&high, &wall(), DEFAULT_EPSILON).is_none());

        // ...and below it
        let low = Ray::new(Vector3D::new(7.0, 0.0, 2.0), Vector3D::new(-1.0, 0.0, -1.5));
        assert!(ray_cylinder_intersection(&low, &wall(), DEFAULT_EPSILON).is_none());
    }

    #[test]
    fn test_cylinder_height_clip_is_relative_to_base() {
        let raised = Cylinder::new(Vector3D::new(0.0, 0.0, 10.0), 5.0, 3.0).unwrap();
        let ray = Ray::new(Vector3D::new(7.0, 0.0, 11.0), Vector3D::new(-1.0, 0.0, 0.0));
        assert!(ray_cylinder_intersection(&ray, &raised, DEFAULT_EPSILON).is_some());

        let ray = Ray::new(Vector3D::new(7.0, 0.0, 1.0), Vector3D::new(-1.0, 0.0, 0.0));
        assert!(ray_cylinder_intersection(&ray, &raised, DEFAULT_EPSILON).is_none());
    }

    #[test]
    fn test_cylinder_hits_lie_on_surface() {
        let mut rng = StdRng::seed_from_u64(424242);
        let cylinder = Cylinder::new(Vector3D::new(1.0, -2.0, 0.0), 4.0, 6.0).unwrap();
        let mut hits = 0;

        for _ in 0..500 {
            let origin = Vector3D::new(
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
                rng.gen_range(0.0..6.0),
            );
            let direction = Vector3D::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-0.3..0.3),
            );
            let ray = Ray::new(origin, direction);

            if let Some(hit) = ray_cylinder_intersection(&ray, &cylinder, DEFAULT_EPSILON) {
                hits += 1;
                let rel = hit.point - cylinder.center();
                assert!((rel.horizontal_magnitude() - cylinder.radius()).abs() < 1e-3);
                assert!(hit.t > DEFAULT_EPSILON);
                assert!((0.0..=cylinder.height()).contains(&rel.z));
            }
        }
        assert!(hits > 50, "only {} of 500 random rays hit the wall", hits);
    }
}
