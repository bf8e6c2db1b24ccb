#![warn(missing_docs)]
//! Scene graph: the tree of renderable nodes produced by the asset loader.
//!
//! Nodes are created once and never re-parented. Only their live color is
//! mutable, and every node remembers the color it was created with so that
//! highlight overrides can always be undone.

mod geometry;
mod graph;
mod node;

pub use geometry::{Geometry, GeometryError, RAY_EPSILON};
pub use graph::{SceneError, SceneGraph, Traverse, ROOT_NAME};
pub use node::{NodeDescriptor, NodeKind, SceneNode};
pub use partpick_core::{Color, NodeId};
