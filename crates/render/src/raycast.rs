//! Pointer picking: cast a ray from the camera through the pointer and find
//! the nearest pickable node.

use glam::{Vec2, Vec3};
use partpick_camera::CameraPose;
use partpick_core::NodeId;
use partpick_input::PointerState;
use partpick_scene::{SceneGraph, SceneNode, RAY_EPSILON};

/// World-space ray with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Where the ray starts.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray, normalizing `direction`.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at distance `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// The nearest node under the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Node that was hit.
    pub node: NodeId,
    /// Distance from the camera along the ray.
    pub distance: f32,
    /// World-space hit point.
    pub point: Vec3,
}

/// Ray from the camera through a point given in normalized device coordinates.
pub fn ray_from_ndc(ndc: Vec2, camera: &CameraPose) -> Ray {
    let inverse = camera.inverse_view_projection();
    // Depth runs 0..1 for the right-handed perspective projection.
    let near = inverse.project_point3(ndc.extend(0.0));
    let far = inverse.project_point3(ndc.extend(1.0));
    Ray::new(camera.position, far - near)
}

/// Nearest pickable node under the pointer, if any.
///
/// Nodes are tested in depth-first pre-order. When two hits are equally
/// close the node visited first wins.
pub fn pick(pointer: PointerState, camera: &CameraPose, graph: &SceneGraph) -> Option<Intersection> {
    let ray = ray_from_ndc(pointer.ndc(), camera);
    let mut nearest: Option<Intersection> = None;
    for node in graph.traverse() {
        let Some(distance) = intersect_node(&ray, node) else {
            continue;
        };
        if nearest.map_or(true, |best| distance < best.distance) {
            nearest = Some(Intersection {
                node: node.id(),
                distance,
                point: ray.at(distance),
            });
        }
    }
    nearest
}

/// Every pickable node under the pointer, nearest first.
pub fn pick_all(
    pointer: PointerState,
    camera: &CameraPose,
    graph: &SceneGraph,
) -> Vec<Intersection> {
    let ray = ray_from_ndc(pointer.ndc(), camera);
    let mut hits: Vec<Intersection> = graph
        .traverse()
        .filter_map(|node| {
            intersect_node(&ray, node).map(|distance| Intersection {
                node: node.id(),
                distance,
                point: ray.at(distance),
            })
        })
        .collect();
    // Stable sort keeps traversal order between equal distances.
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

/// World distance to `node` along `ray`, if the node is pickable and hit.
pub fn intersect_node(ray: &Ray, node: &SceneNode) -> Option<f32> {
    let geometry = node.pickable_geometry()?;
    let inverse = node.inverse_world_transform()?;

    // Leaving the local direction unnormalized keeps the ray parameter in
    // world units, so distances from different nodes compare directly.
    let origin = inverse.transform_point3(ray.origin);
    let direction = inverse.transform_vector3(ray.direction);

    geometry
        .intersect_ray(origin, direction)
        .filter(|t| t.is_finite() && *t > RAY_EPSILON)
}
