//! Serde schema for scene description files.

use partpick_core::Color;
use serde::{Deserialize, Serialize};

/// Top-level scene file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SceneDescription {
    /// Name of the model root node (defaults to "model").
    #[serde(default)]
    pub name: Option<String>,
    /// Background and lights handed to the renderer.
    #[serde(default)]
    pub environment: Environment,
    /// Placement of the whole model in the world.
    #[serde(default)]
    pub model: ModelTransform,
    /// Top-level nodes, placed under the model root.
    pub nodes: Vec<NodeDefinition>,
}

/// Background color and lighting rig.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Environment {
    /// Clear color.
    pub background: Color,
    /// Soft fill light.
    pub ambient: AmbientLight,
    /// Key light.
    pub directional: DirectionalLight,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            background: Color::from_hex(0xdddddd),
            ambient: AmbientLight::default(),
            directional: DirectionalLight::default(),
        }
    }
}

/// Uniform ambient light.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AmbientLight {
    /// Light color.
    pub color: Color,
    /// Scalar intensity.
    pub intensity: f32,
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self {
            color: Color::from_hex(0x404040),
            intensity: 1.0,
        }
    }
}

/// Light shining from a fixed direction.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DirectionalLight {
    /// Light color.
    pub color: Color,
    /// Scalar intensity.
    pub intensity: f32,
    /// Direction the light comes from (normalized on load).
    pub direction: [f32; 3],
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            intensity: 1.0,
            direction: [1.0, 1.0, 1.0],
        }
    }
}

/// Transform applied to the model root.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelTransform {
    /// World position of the model root.
    pub position: [f32; 3],
    /// Per-axis scale of the model root.
    pub scale: [f32; 3],
}

impl Default for ModelTransform {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            scale: [1.0; 3],
        }
    }
}

/// One node of the scene tree.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NodeDefinition {
    /// Display name.
    pub name: String,
    /// Material color; captured as the node's original color.
    #[serde(default)]
    pub color: Color,
    /// Translation relative to the parent.
    #[serde(default)]
    pub translation: [f32; 3],
    /// Rotation quaternion `[x, y, z, w]` relative to the parent.
    #[serde(default = "identity_rotation")]
    pub rotation: [f32; 4],
    /// Scale relative to the parent.
    #[serde(default = "unit_scale")]
    pub scale: [f32; 3],
    /// Geometry; a node without one is a group.
    #[serde(default)]
    pub geometry: Option<GeometryDefinition>,
    /// Whether pointer picking considers this node.
    #[serde(default = "default_pickable")]
    pub pickable: bool,
    /// Child nodes.
    #[serde(default)]
    pub children: Vec<NodeDefinition>,
}

/// Geometry as written in scene files.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GeometryDefinition {
    /// Box of the given full size, centred on the node origin.
    Box {
        /// Full size along x, y, z.
        size: [f32; 3],
    },
    /// Sphere centred on the node origin.
    Sphere {
        /// Radius.
        radius: f32,
    },
    /// Triangle mesh.
    Triangles {
        /// Vertex positions.
        positions: Vec<[f32; 3]>,
        /// Optional index list; consecutive positions form triangles without it.
        #[serde(default)]
        indices: Option<Vec<u32>>,
    },
}

fn identity_rotation() -> [f32; 4] {
    [0.0, 0.0, 0.0, 1.0]
}

fn unit_scale() -> [f32; 3] {
    [1.0; 3]
}

fn default_pickable() -> bool {
    true
}
