//! Scene nodes and the descriptors used to create them.

use glam::{Mat4, Quat, Vec3};
use partpick_core::{Color, NodeId};

use crate::Geometry;

/// What a node contributes to the scene.
///
/// Picking only ever looks at [`NodeKind::Pickable`]; everything else is
/// skipped without inspecting the geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Structural node with no geometry of its own.
    Group,
    /// Drawn and eligible for pointer picking.
    Pickable(Geometry),
    /// Drawn but never picked (helpers, backdrops).
    Decorative(Geometry),
}

impl NodeKind {
    /// Geometry drawn for this node, pickable or not.
    pub fn geometry(&self) -> Option<&Geometry> {
        match self {
            NodeKind::Group => None,
            NodeKind::Pickable(geometry) | NodeKind::Decorative(geometry) => Some(geometry),
        }
    }
}

/// Everything needed to add a node to a [`crate::SceneGraph`].
#[derive(Debug, Clone)]
pub struct NodeDescriptor {
    /// Display name.
    pub name: String,
    /// Node kind.
    pub kind: NodeKind,
    /// Transform relative to the parent node.
    pub local_transform: Mat4,
    /// Color at creation time; becomes the node's original color.
    pub color: Color,
}

impl NodeDescriptor {
    /// A structural node.
    pub fn group(name: impl Into<String>) -> Self {
        Self::with_kind(name, NodeKind::Group)
    }

    /// A pickable node with the given geometry.
    pub fn pickable(name: impl Into<String>, geometry: Geometry) -> Self {
        Self::with_kind(name, NodeKind::Pickable(geometry))
    }

    /// A drawn node that picking ignores.
    pub fn decorative(name: impl Into<String>, geometry: Geometry) -> Self {
        Self::with_kind(name, NodeKind::Decorative(geometry))
    }

    fn with_kind(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            local_transform: Mat4::IDENTITY,
            color: Color::WHITE,
        }
    }

    /// Builder: set the creation color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Builder: set the full local transform.
    pub fn with_transform(mut self, transform: Mat4) -> Self {
        self.local_transform = transform;
        self
    }

    /// Builder: translate relative to the parent.
    pub fn with_translation(self, translation: Vec3) -> Self {
        self.with_transform(Mat4::from_translation(translation))
    }

    /// Builder: compose scale, rotation and translation (applied in that order).
    pub fn with_srt(self, scale: Vec3, rotation: Quat, translation: Vec3) -> Self {
        self.with_transform(Mat4::from_scale_rotation_translation(
            scale,
            rotation,
            translation,
        ))
    }
}

/// A node owned by a [`crate::SceneGraph`].
#[derive(Debug, Clone)]
pub struct SceneNode {
    id: NodeId,
    name: String,
    kind: NodeKind,
    local_transform: Mat4,
    world_transform: Mat4,
    // None when the world transform is singular; such nodes cannot be picked.
    inverse_world: Option<Mat4>,
    color: Color,
    original_color: Color,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl SceneNode {
    pub(crate) fn new(
        id: NodeId,
        parent: Option<NodeId>,
        parent_world: Mat4,
        descriptor: NodeDescriptor,
    ) -> Self {
        let world_transform = parent_world * descriptor.local_transform;
        let determinant = world_transform.determinant();
        let inverse_world = (determinant != 0.0 && determinant.is_finite())
            .then(|| world_transform.inverse())
            .filter(|inverse| inverse.is_finite());
        Self {
            id,
            name: descriptor.name,
            kind: descriptor.kind,
            local_transform: descriptor.local_transform,
            world_transform,
            inverse_world,
            color: descriptor.color,
            original_color: descriptor.color,
            parent,
            children: Vec::new(),
        }
    }

    pub(crate) fn push_child(&mut self, child: NodeId) {
        self.children.push(child);
    }

    /// Stable node id.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Node kind.
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Geometry if this node takes part in picking.
    pub fn pickable_geometry(&self) -> Option<&Geometry> {
        match &self.kind {
            NodeKind::Pickable(geometry) => Some(geometry),
            _ => None,
        }
    }

    /// Whether picking considers this node.
    pub fn is_pickable(&self) -> bool {
        self.pickable_geometry().is_some()
    }

    /// Transform relative to the parent.
    pub fn local_transform(&self) -> Mat4 {
        self.local_transform
    }

    /// Transform from local space to world space.
    pub fn world_transform(&self) -> Mat4 {
        self.world_transform
    }

    /// Transform from world space to local space, if invertible.
    pub fn inverse_world_transform(&self) -> Option<Mat4> {
        self.inverse_world
    }

    /// Live color used for drawing.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Color captured when the node was created. Never changes.
    pub fn original_color(&self) -> Color {
        self.original_color
    }

    /// Whether the live color differs from the original one.
    pub fn is_recolored(&self) -> bool {
        self.color != self.original_color
    }

    /// Override the live color.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Put the live color back to the original color.
    pub fn restore_original_color(&mut self) {
        self.color = self.original_color;
    }

    /// Parent node, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in insertion order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}
