//! Turn scene descriptions into scene graphs, synchronously or off-thread.
//!
//! The render loop cannot wait on disk IO, so [`load_async`] runs the load on
//! a worker thread and hands back a [`LoadHandle`] the loop polls once per
//! frame.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use glam::{Mat4, Quat, Vec3};
use partpick_core::NodeId;
use partpick_scene::{Geometry, NodeDescriptor, SceneGraph};
use tracing::{debug, info};

use crate::description::{Environment, GeometryDefinition, NodeDefinition, SceneDescription};
use crate::AssetError;

const DEFAULT_MODEL_NAME: &str = "model";

/// A fully built scene ready to hand to the render loop.
#[derive(Debug, Clone)]
pub struct SceneAsset {
    /// Node tree with original colors captured.
    pub graph: SceneGraph,
    /// Background and lights.
    pub environment: Environment,
}

/// Where scene data comes from.
#[derive(Debug, Clone)]
pub enum SceneSource {
    /// A JSON file on disk.
    Path(PathBuf),
    /// JSON already in memory.
    Json(String),
}

impl SceneSource {
    fn label(&self) -> String {
        match self {
            SceneSource::Path(path) => path.display().to_string(),
            SceneSource::Json(_) => "<inline scene>".to_string(),
        }
    }

    fn load(self) -> Result<SceneAsset, AssetError> {
        match self {
            SceneSource::Path(path) => load_scene_from_file(&path),
            SceneSource::Json(json) => load_scene_from_str(&json),
        }
    }
}

/// Load a scene from the provided JSON file path.
pub fn load_scene_from_file(path: &Path) -> Result<SceneAsset, AssetError> {
    let data = fs::read_to_string(path)?;
    load_scene_from_str(&data)
}

/// Load a scene from an in-memory JSON string.
pub fn load_scene_from_str(input: &str) -> Result<SceneAsset, AssetError> {
    let description: SceneDescription = serde_json::from_str(input)?;
    build_scene(&description)
}

/// Validate a parsed description and build its scene graph.
pub fn build_scene(description: &SceneDescription) -> Result<SceneAsset, AssetError> {
    let model_name = description
        .name
        .clone()
        .unwrap_or_else(|| DEFAULT_MODEL_NAME.to_string());
    let model_transform = transform_from_parts(
        &model_name,
        Vec3::from(description.model.scale),
        Quat::IDENTITY,
        Vec3::from(description.model.position),
    )?;

    let mut graph = SceneGraph::new();
    let model_root = graph.add_node(
        NodeId::ROOT,
        NodeDescriptor::group(model_name).with_transform(model_transform),
    )?;
    for definition in &description.nodes {
        add_definition(&mut graph, model_root, definition)?;
    }

    let mut environment = description.environment.clone();
    let direction = Vec3::from(environment.directional.direction);
    environment.directional.direction = direction.try_normalize().unwrap_or(Vec3::Y).into();

    debug!(
        nodes = graph.len(),
        pickable = graph.pickable_count(),
        "scene graph built"
    );
    Ok(SceneAsset { graph, environment })
}

fn add_definition(
    graph: &mut SceneGraph,
    parent: NodeId,
    definition: &NodeDefinition,
) -> Result<(), AssetError> {
    let transform = transform_from_parts(
        &definition.name,
        Vec3::from(definition.scale),
        Quat::from_array(definition.rotation),
        Vec3::from(definition.translation),
    )?;

    let descriptor = match &definition.geometry {
        None => NodeDescriptor::group(definition.name.clone()),
        Some(def) => {
            let geometry = geometry_from_definition(&definition.name, def)?;
            geometry
                .validate()
                .map_err(|source| AssetError::InvalidGeometry {
                    node: definition.name.clone(),
                    source,
                })?;
            if definition.pickable {
                NodeDescriptor::pickable(definition.name.clone(), geometry)
            } else {
                NodeDescriptor::decorative(definition.name.clone(), geometry)
            }
        }
    }
    .with_transform(transform)
    .with_color(definition.color);

    let id = graph.add_node(parent, descriptor)?;
    for child in &definition.children {
        add_definition(graph, id, child)?;
    }
    Ok(())
}

fn transform_from_parts(
    node: &str,
    scale: Vec3,
    rotation: Quat,
    translation: Vec3,
) -> Result<Mat4, AssetError> {
    let invalid = || AssetError::InvalidTransform {
        node: node.to_string(),
    };
    if !(scale.is_finite() && rotation.is_finite() && translation.is_finite()) {
        return Err(invalid());
    }
    if scale.abs().min_element() <= f32::EPSILON || rotation.length() <= f32::EPSILON {
        return Err(invalid());
    }
    Ok(Mat4::from_scale_rotation_translation(
        scale,
        rotation.normalize(),
        translation,
    ))
}

fn geometry_from_definition(
    node: &str,
    definition: &GeometryDefinition,
) -> Result<Geometry, AssetError> {
    Ok(match definition {
        GeometryDefinition::Box { size } => Geometry::cuboid(Vec3::from(*size)),
        GeometryDefinition::Sphere { radius } => Geometry::Sphere { radius: *radius },
        GeometryDefinition::Triangles { positions, indices } => {
            let positions: Vec<Vec3> = positions.iter().copied().map(Vec3::from).collect();
            let corners: Vec<Vec3> = match indices {
                Some(indices) => indices
                    .iter()
                    .map(|&index| {
                        positions.get(index as usize).copied().ok_or_else(|| {
                            AssetError::IndexOutOfRange {
                                node: node.to_string(),
                                index,
                                len: positions.len(),
                            }
                        })
                    })
                    .collect::<Result<_, _>>()?,
                None => positions,
            };
            // A trailing partial triangle is dropped, matching indexed draw semantics.
            Geometry::Triangles(
                corners
                    .chunks_exact(3)
                    .map(|tri| [tri[0], tri[1], tri[2]])
                    .collect(),
            )
        }
    })
}

/// Handle to an in-flight background load.
///
/// Poll [`LoadHandle::try_recv`] once per frame; it yields the result exactly
/// once and `None` before and after that.
pub struct LoadHandle {
    label: String,
    receiver: Option<Receiver<Result<SceneAsset, AssetError>>>,
    // Set when the worker could not even be spawned.
    immediate: Option<Result<SceneAsset, AssetError>>,
}

impl LoadHandle {
    /// Human-readable description of what is being loaded.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the result has already been taken.
    pub fn is_finished(&self) -> bool {
        self.receiver.is_none() && self.immediate.is_none()
    }

    /// Non-blocking poll for the load result.
    pub fn try_recv(&mut self) -> Option<Result<SceneAsset, AssetError>> {
        if let Some(result) = self.immediate.take() {
            return Some(result);
        }
        let receiver = self.receiver.as_ref()?;
        let result = match receiver.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(AssetError::Disconnected),
        };
        self.receiver = None;
        Some(result)
    }

    /// Block until the load finishes. Returns `None` if already taken.
    pub fn wait(&mut self) -> Option<Result<SceneAsset, AssetError>> {
        if let Some(result) = self.immediate.take() {
            return Some(result);
        }
        let receiver = self.receiver.take()?;
        Some(receiver.recv().unwrap_or(Err(AssetError::Disconnected)))
    }
}

/// Start loading a scene on a worker thread.
pub fn load_async(source: SceneSource) -> LoadHandle {
    let label = source.label();
    let (sender, receiver) = mpsc::channel();
    let worker_label = label.clone();

    let spawned = thread::Builder::new()
        .name("scene-loader".to_string())
        .spawn(move || {
            let result = source.load();
            if result.is_ok() {
                info!(source = %worker_label, "scene loaded");
            }
            // The handle may already be gone during teardown; nothing to report to.
            let _ = sender.send(result);
        });

    match spawned {
        Ok(_) => LoadHandle {
            label,
            receiver: Some(receiver),
            immediate: None,
        },
        Err(err) => LoadHandle {
            label,
            receiver: None,
            immediate: Some(Err(AssetError::Io(err))),
        },
    }
}
