//! Canned scenes and cameras shared by integration tests.

use glam::Vec3;
use partpick_camera::Camera;
use partpick_core::{Color, NodeId};
use partpick_scene::{Geometry, NodeDescriptor, SceneGraph};

/// Original color of the torso fixture.
pub fn torso_color() -> Color {
    Color::from_hex(0x3366cc)
}

/// Original color of the head fixture.
pub fn head_color() -> Color {
    Color::from_hex(0xffcc99)
}

/// Two parts on the viewing axis of [`camera_looking_down_z`].
pub struct TorsoAndHead {
    /// The scene.
    pub graph: SceneGraph,
    /// Box whose front face is 1.5 units from the camera.
    pub torso: NodeId,
    /// Sphere whose front is 3.0 units from the camera, hidden behind the torso.
    pub head: NodeId,
}

/// Camera at `(0, 0, 5)` looking down `-Z` at the origin.
pub fn camera_looking_down_z() -> Camera {
    Camera {
        aspect: 1.0,
        ..Camera::looking_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO)
    }
}

/// Build the torso/head scene.
pub fn torso_and_head() -> TorsoAndHead {
    let mut graph = SceneGraph::new();
    let torso = graph
        .add_node(
            NodeId::ROOT,
            NodeDescriptor::pickable("Torso", Geometry::cuboid(Vec3::new(1.0, 1.0, 0.5)))
                .with_color(torso_color())
                .with_translation(Vec3::new(0.0, 0.0, 3.25)),
        )
        .expect("root exists");
    let head = graph
        .add_node(
            NodeId::ROOT,
            NodeDescriptor::pickable("Head", Geometry::Sphere { radius: 0.25 })
                .with_color(head_color())
                .with_translation(Vec3::new(0.0, 0.0, 1.75)),
        )
        .expect("root exists");
    TorsoAndHead { graph, torso, head }
}

/// Boxes side by side along X at `z = 0`, one per name, one unit apart.
///
/// Neighbouring boxes get different shades of grey.
pub fn row_of_boxes(names: &[&str]) -> (SceneGraph, Vec<NodeId>) {
    let mut graph = SceneGraph::new();
    let offset = (names.len() as f32 - 1.0) / 2.0;
    let ids = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let grey = 0x40 + (i as u32 * 0x20) % 0xa0;
            graph
                .add_node(
                    NodeId::ROOT,
                    NodeDescriptor::pickable(*name, Geometry::cuboid(Vec3::splat(0.5)))
                        .with_color(Color::from_hex(grey * 0x010101))
                        .with_translation(Vec3::new(i as f32 - offset, 0.0, 0.0)),
                )
                .expect("root exists")
        })
        .collect();
    (graph, ids)
}
