//! Arena-backed scene tree.

use glam::Mat4;
use partpick_core::NodeId;
use thiserror::Error;

use crate::{NodeDescriptor, SceneNode};

/// Name given to the implicit root node.
pub const ROOT_NAME: &str = "root";

/// Errors raised while building a graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    /// The requested parent does not exist.
    #[error("parent node {0} does not exist")]
    UnknownParent(NodeId),
}

/// Tree of nodes rooted at a single group node.
///
/// The graph owns every node. Other components keep [`NodeId`]s and look nodes
/// up when they need them.
#[derive(Debug, Clone)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    /// Create a graph holding only the root node.
    pub fn new() -> Self {
        let root = SceneNode::new(
            NodeId::ROOT,
            None,
            Mat4::IDENTITY,
            NodeDescriptor::group(ROOT_NAME),
        );
        Self { nodes: vec![root] }
    }

    /// The root node.
    pub fn root(&self) -> &SceneNode {
        &self.nodes[0]
    }

    /// Add a node under `parent` and return its id.
    pub fn add_node(
        &mut self,
        parent: NodeId,
        descriptor: NodeDescriptor,
    ) -> Result<NodeId, SceneError> {
        let parent_world = self
            .node(parent)
            .ok_or(SceneError::UnknownParent(parent))?
            .world_transform();
        let id = NodeId(self.nodes.len() as u32);
        self.nodes
            .push(SceneNode::new(id, Some(parent), parent_world, descriptor));
        self.nodes[parent.index()].push_child(id);
        Ok(id)
    }

    /// Look up a node.
    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.index())
    }

    /// Look up a node for mutation.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id.index())
    }

    /// Whether `id` refers to a node of this graph.
    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the graph holds nothing but its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Number of nodes picking will test.
    pub fn pickable_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_pickable()).count()
    }

    /// Iterate nodes in arena (insertion) order.
    pub fn iter(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.iter()
    }

    /// Depth-first, pre-order walk from the root, children in insertion order.
    ///
    /// This order is what picking uses to break distance ties.
    pub fn traverse(&self) -> Traverse<'_> {
        Traverse {
            graph: self,
            stack: vec![NodeId::ROOT],
        }
    }

    /// First node with the given name, in traversal order.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.traverse()
            .find(|node| node.name() == name)
            .map(SceneNode::id)
    }
}

/// Iterator returned by [`SceneGraph::traverse`].
pub struct Traverse<'a> {
    graph: &'a SceneGraph,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Traverse<'a> {
    type Item = &'a SceneNode;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = self.graph.node(id)?;
        self.stack.extend(node.children().iter().rev().copied());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Geometry;
    use glam::Vec3;

    fn sphere(name: &str) -> NodeDescriptor {
        NodeDescriptor::pickable(name, Geometry::Sphere { radius: 0.5 })
    }

    #[test]
    fn new_graph_is_empty_but_has_root() {
        let graph = SceneGraph::new();
        assert!(graph.is_empty());
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.root().name(), ROOT_NAME);
        assert_eq!(graph.pickable_count(), 0);
    }

    #[test]
    fn add_node_links_parent_and_child() {
        let mut graph = SceneGraph::new();
        let body = graph
            .add_node(NodeId::ROOT, NodeDescriptor::group("Body"))
            .unwrap();
        let arm = graph.add_node(body, sphere("Arm")).unwrap();

        assert_eq!(graph.node(arm).unwrap().parent(), Some(body));
        assert_eq!(graph.node(body).unwrap().children(), &[arm]);
        assert!(!graph.is_empty());
        assert_eq!(graph.pickable_count(), 1);
    }

    #[test]
    fn unknown_parent_is_rejected() {
        let mut graph = SceneGraph::new();
        let err = graph.add_node(NodeId(9), sphere("Lost")).unwrap_err();
        assert_eq!(err, SceneError::UnknownParent(NodeId(9)));
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn world_transforms_compose_down_the_tree() {
        let mut graph = SceneGraph::new();
        let body = graph
            .add_node(
                NodeId::ROOT,
                NodeDescriptor::group("Body").with_translation(Vec3::new(0.0, 1.0, 0.0)),
            )
            .unwrap();
        let head = graph
            .add_node(body, sphere("Head").with_translation(Vec3::new(0.0, 0.5, 0.0)))
            .unwrap();

        let origin = graph
            .node(head)
            .unwrap()
            .world_transform()
            .transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(0.0, 1.5, 0.0)).length() < 1e-6);
    }

    #[test]
    fn traversal_is_depth_first_preorder() {
        let mut graph = SceneGraph::new();
        let a = graph.add_node(NodeId::ROOT, sphere("A")).unwrap();
        let b = graph.add_node(NodeId::ROOT, sphere("B")).unwrap();
        let a1 = graph.add_node(a, sphere("A1")).unwrap();
        let b1 = graph.add_node(b, sphere("B1")).unwrap();
        let a2 = graph.add_node(a, sphere("A2")).unwrap();

        let order: Vec<NodeId> = graph.traverse().map(SceneNode::id).collect();
        assert_eq!(order, vec![NodeId::ROOT, a, a1, a2, b, b1]);
    }

    #[test]
    fn find_by_name_returns_first_in_traversal_order() {
        let mut graph = SceneGraph::new();
        let group = graph
            .add_node(NodeId::ROOT, NodeDescriptor::group("Left"))
            .unwrap();
        let nested = graph.add_node(group, sphere("Hand")).unwrap();
        graph.add_node(NodeId::ROOT, sphere("Hand")).unwrap();

        assert_eq!(graph.find_by_name("Hand"), Some(nested));
        assert_eq!(graph.find_by_name("Foot"), None);
    }
}
