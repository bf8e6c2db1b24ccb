#![warn(missing_docs)]
//! Scene description schema, validation and background loading.

mod description;
mod loader;

pub use description::{
    AmbientLight, DirectionalLight, Environment, GeometryDefinition, ModelTransform,
    NodeDefinition, SceneDescription,
};
pub use loader::{
    build_scene, load_async, load_scene_from_file, load_scene_from_str, LoadHandle, SceneAsset,
    SceneSource,
};

use partpick_scene::{GeometryError, SceneError};
use thiserror::Error;

/// Errors emitted while loading a scene.
#[derive(Debug, Error)]
pub enum AssetError {
    /// Wrap IO errors when reading scene files.
    #[error("failed to read scene: {0}")]
    Io(#[from] std::io::Error),
    /// Wrap serde parsing issues.
    #[error("failed to parse scene: {0}")]
    Parse(#[from] serde_json::Error),
    /// A node carries geometry picking cannot handle.
    #[error("invalid geometry on node {node:?}: {source}")]
    InvalidGeometry {
        /// Offending node name.
        node: String,
        /// What was wrong with it.
        #[source]
        source: GeometryError,
    },
    /// A node transform is non-finite or collapses space.
    #[error("invalid transform on node {node:?}")]
    InvalidTransform {
        /// Offending node name.
        node: String,
    },
    /// A triangle index points past the position list.
    #[error("triangle index {index} out of range on node {node:?} ({len} positions)")]
    IndexOutOfRange {
        /// Offending node name.
        node: String,
        /// The bad index.
        index: u32,
        /// Number of positions available.
        len: usize,
    },
    /// The scene graph refused a node.
    #[error(transparent)]
    Scene(#[from] SceneError),
    /// The background loader went away without reporting a result.
    #[error("scene loader stopped before reporting a result")]
    Disconnected,
}
