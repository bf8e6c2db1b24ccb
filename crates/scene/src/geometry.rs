//! Local-space node geometry and ray intersection tests.
//!
//! All tests take the ray in the node's local space. The direction is not
//! required to be normalized: the returned value is the ray parameter `t`, so a
//! caller that maps a unit world-space ray into local space with an affine
//! inverse gets world-space distances back unchanged.

use glam::Vec3;
use thiserror::Error;

/// Hits closer than this along the ray are ignored.
pub const RAY_EPSILON: f32 = 1e-6;

/// Shape attached to a drawable node, expressed in the node's local space.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Axis-aligned box centred on the local origin.
    Box {
        /// Half size along each local axis.
        half_extents: Vec3,
    },
    /// Sphere centred on the local origin.
    Sphere {
        /// Sphere radius.
        radius: f32,
    },
    /// Triangle soup, tested double-sided.
    Triangles(Vec<[Vec3; 3]>),
}

/// Reasons a geometry is rejected before it enters a scene graph.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// A coordinate or size is NaN or infinite.
    #[error("geometry contains non-finite values")]
    NonFinite,
    /// A box extent or sphere radius is zero or negative.
    #[error("geometry size must be positive, got {0}")]
    NonPositiveSize(f32),
    /// A triangle list has no triangles.
    #[error("triangle list is empty")]
    EmptyTriangles,
    /// A triangle has (near) zero area.
    #[error("triangle {0} is degenerate")]
    DegenerateTriangle(usize),
}

impl Geometry {
    /// Convenience constructor for a box from its full size.
    pub fn cuboid(size: Vec3) -> Self {
        Self::Box {
            half_extents: size * 0.5,
        }
    }

    /// Check that the geometry can be intersected reliably.
    pub fn validate(&self) -> Result<(), GeometryError> {
        match self {
            Geometry::Box { half_extents } => {
                if !half_extents.is_finite() {
                    return Err(GeometryError::NonFinite);
                }
                let smallest = half_extents.min_element();
                if smallest <= 0.0 {
                    return Err(GeometryError::NonPositiveSize(smallest));
                }
                Ok(())
            }
            Geometry::Sphere { radius } => {
                if !radius.is_finite() {
                    return Err(GeometryError::NonFinite);
                }
                if *radius <= 0.0 {
                    return Err(GeometryError::NonPositiveSize(*radius));
                }
                Ok(())
            }
            Geometry::Triangles(triangles) => {
                if triangles.is_empty() {
                    return Err(GeometryError::EmptyTriangles);
                }
                for (index, [a, b, c]) in triangles.iter().enumerate() {
                    if !(a.is_finite() && b.is_finite() && c.is_finite()) {
                        return Err(GeometryError::NonFinite);
                    }
                    let (ab, ac) = (*b - *a, *c - *a);
                    // Relative to the edge lengths so tiny meshes are not rejected.
                    let area_sq = ab.cross(ac).length_squared();
                    let scale_sq = ab.length_squared() * ac.length_squared();
                    if area_sq <= f32::EPSILON * f32::EPSILON * scale_sq {
                        return Err(GeometryError::DegenerateTriangle(index));
                    }
                }
                Ok(())
            }
        }
    }

    /// Ray parameter of the nearest hit in front of `origin`, if any.
    pub fn intersect_ray(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        match self {
            Geometry::Box { half_extents } => ray_box(origin, direction, *half_extents),
            Geometry::Sphere { radius } => ray_sphere(origin, direction, *radius),
            Geometry::Triangles(triangles) => triangles
                .iter()
                .filter_map(|[a, b, c]| ray_triangle(origin, direction, *a, *b, *c))
                .fold(None, |nearest: Option<f32>, t| match nearest {
                    Some(current) if current <= t => Some(current),
                    _ => Some(t),
                }),
        }
    }
}

/// Slab test against a box centred on the origin.
///
/// A ray starting inside the box reports where it leaves it.
fn ray_box(origin: Vec3, direction: Vec3, half_extents: Vec3) -> Option<f32> {
    let inv_dir = direction.recip();
    let t1 = (-half_extents - origin) * inv_dir;
    let t2 = (half_extents - origin) * inv_dir;

    let tmin = t1.min(t2).max_element();
    let tmax = t1.max(t2).min_element();

    if tmax < RAY_EPSILON || tmin > tmax {
        return None;
    }

    Some(if tmin > RAY_EPSILON { tmin } else { tmax })
}

fn ray_sphere(origin: Vec3, direction: Vec3, radius: f32) -> Option<f32> {
    let a = direction.length_squared();
    if a <= 0.0 || !a.is_finite() {
        return None;
    }
    let b = 2.0 * origin.dot(direction);
    let c = origin.length_squared() - radius * radius;
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let root = discriminant.sqrt();
    let near = (-b - root) / (2.0 * a);
    let far = (-b + root) / (2.0 * a);
    if near > RAY_EPSILON {
        Some(near)
    } else if far > RAY_EPSILON {
        Some(far)
    } else {
        None
    }
}

/// Möller-Trumbore, double-sided.
fn ray_triangle(origin: Vec3, direction: Vec3, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = direction.cross(edge2);
    let det = edge1.dot(h);
    // Parallel when the sine of the ray/plane angle vanishes, whatever the scale.
    let parallel_limit = f32::EPSILON * direction.length() * edge1.length() * edge2.length();
    if det.abs() <= parallel_limit {
        return None;
    }

    let inv_det = 1.0 / det;
    let s = origin - v0;
    let u = inv_det * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = inv_det * direction.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = inv_det * edge2.dot(q);
    (t > RAY_EPSILON).then_some(t)
}
