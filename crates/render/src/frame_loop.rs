//! Per-frame orchestration: input, camera, picking, selection, drawing.

use glam::Vec2;
use partpick_assets::{Environment, LoadHandle, SceneAsset};
use partpick_camera::{CameraControl, CameraPose};
use partpick_core::{Color, FrameIndex};
use partpick_input::{EventQueue, InputEvent, PointerState, Viewport, DEFAULT_QUEUE_CAPACITY};
use partpick_scene::SceneGraph;
use tracing::{error, info, warn};

use crate::{pick, Intersection, RenderSink, SelectionChange, SelectionController, SelectionState};

/// Knobs for [`FrameLoop::new`].
#[derive(Debug, Clone)]
pub struct FrameLoopSettings {
    /// Color painted on the selected node.
    pub highlight: Color,
    /// Raw events buffered between frames before folding.
    pub queue_capacity: usize,
    /// Viewport size before the first resize event.
    pub viewport: Viewport,
}

impl Default for FrameLoopSettings {
    fn default() -> Self {
        Self {
            highlight: Color::RED,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            viewport: Viewport::default(),
        }
    }
}

/// What happened during one [`FrameLoop::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Frame that was produced.
    pub frame: FrameIndex,
    /// Nearest node under the pointer.
    pub hit: Option<Intersection>,
    /// Set when a click selected a node this frame.
    pub selection_change: Option<SelectionChange>,
    /// Camera used for the frame.
    pub camera: CameraPose,
}

/// Everything the viewer needs from one frame to the next.
///
/// Window events are pushed in between frames and only take effect inside
/// [`FrameLoop::tick`].
pub struct FrameLoop<C, S> {
    graph: SceneGraph,
    environment: Option<Environment>,
    pending: Option<LoadHandle>,
    queue: EventQueue,
    pointer: PointerState,
    viewport: Viewport,
    control: C,
    selection: SelectionController,
    sink: S,
    frame: FrameIndex,
}

impl<C: CameraControl, S: RenderSink> FrameLoop<C, S> {
    /// Create a loop with an empty scene.
    pub fn new(mut control: C, sink: S, settings: FrameLoopSettings) -> Self {
        let viewport = settings.viewport;
        control.resize(viewport.width, viewport.height);
        Self {
            graph: SceneGraph::new(),
            environment: None,
            pending: None,
            queue: EventQueue::with_capacity(settings.queue_capacity),
            pointer: PointerState::CENTER,
            viewport,
            control,
            selection: SelectionController::new(settings.highlight),
            sink,
            frame: FrameIndex::ZERO,
        }
    }

    /// Start polling a background load. Replaces any load still in flight.
    pub fn load(&mut self, handle: LoadHandle) {
        if let Some(previous) = self.pending.replace(handle) {
            warn!(scene = previous.label(), "abandoning unfinished scene load");
        }
    }

    /// Swap in a loaded scene, clearing the selection of the old one.
    pub fn install_scene(&mut self, asset: SceneAsset) {
        self.selection.reset(&mut self.graph);
        self.graph = asset.graph;
        self.environment = Some(asset.environment);
        info!(
            nodes = self.graph.len(),
            pickable = self.graph.pickable_count(),
            "scene installed"
        );
    }

    /// Queue a window event for the next frame.
    pub fn push_event(&mut self, event: InputEvent) {
        self.queue.push(event);
    }

    /// The queue window adapters write into.
    pub fn queue_mut(&mut self) -> &mut EventQueue {
        &mut self.queue
    }

    /// Current scene; empty until a load completes.
    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    /// Lights and background of the installed scene.
    pub fn environment(&self) -> Option<&Environment> {
        self.environment.as_ref()
    }

    /// Hover and selection as of the last frame.
    pub fn selection(&self) -> &SelectionState {
        self.selection.state()
    }

    /// Pointer position used by the last frame.
    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    /// Latest viewport size.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Camera control.
    pub fn control(&self) -> &C {
        &self.control
    }

    /// Render sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Index the next call to [`FrameLoop::tick`] will produce.
    pub fn frame(&self) -> FrameIndex {
        self.frame
    }

    /// Whether a background load is still pending.
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Produce one frame, `elapsed` seconds after the previous one.
    pub fn tick(&mut self, elapsed: f32) -> FrameReport {
        self.poll_load();

        let input = self.queue.drain();
        let previous_viewport = self.viewport;
        if let Some(viewport) = input.resized {
            self.viewport = viewport;
            self.control.resize(viewport.width, viewport.height);
        }
        if let Some(sample) = input.pointer {
            self.pointer = sample.to_pointer_state(previous_viewport);
        }
        if input.orbit != Vec2::ZERO {
            self.control.orbit(input.orbit.x, input.orbit.y);
        }
        if input.zoom != 0.0 {
            self.control.zoom(input.zoom);
        }
        let camera = self.control.update(elapsed);

        let hit = pick(self.pointer, &camera, &self.graph);
        self.selection.update_hover(hit.as_ref());
        let selection_change = if input.clicked {
            self.selection.click(&mut self.graph)
        } else {
            None
        };

        if let Err(err) = self
            .sink
            .draw(&self.graph, &camera, self.selection.state())
        {
            warn!(frame = self.frame.0, error = %err, "render sink failed");
        }

        let report = FrameReport {
            frame: self.frame,
            hit,
            selection_change,
            camera,
        };
        self.frame = self.frame.advance(1);
        report
    }

    /// Restore colors, drop the scene and any pending load.
    pub fn teardown(&mut self) {
        self.selection.reset(&mut self.graph);
        self.graph = SceneGraph::new();
        self.environment = None;
        self.pending = None;
        self.queue.drain();
        info!(frames = self.frame.0, "frame loop torn down");
    }

    fn poll_load(&mut self) {
        let Some(handle) = self.pending.as_mut() else {
            return;
        };
        let Some(result) = handle.try_recv() else {
            return;
        };
        let label = handle.label().to_string();
        self.pending = None;

        match result {
            Ok(asset) => self.install_scene(asset),
            Err(err) => error!(scene = %label, error = %err, "failed to load scene"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NullSink, RecordingSink};
    use partpick_camera::FixedCamera;
    use partpick_testkit::{camera_looking_down_z, torso_and_head};

    fn frame_loop<S: RenderSink>(sink: S) -> FrameLoop<FixedCamera, S> {
        FrameLoop::new(
            FixedCamera::new(camera_looking_down_z()),
            sink,
            FrameLoopSettings::default(),
        )
    }

    #[test]
    fn empty_scene_draws_and_picks_nothing() {
        let mut frames = frame_loop(RecordingSink::default());
        let report = frames.tick(1.0 / 60.0);
        assert_eq!(report.frame, FrameIndex::ZERO);
        assert!(report.hit.is_none());
        assert_eq!(frames.sink().records().len(), 1);
        assert_eq!(frames.frame(), FrameIndex(1));
    }

    #[test]
    fn resize_updates_viewport_before_picking() {
        let mut frames = frame_loop(NullSink::default());
        frames.push_event(InputEvent::Resized {
            width: 200,
            height: 100,
        });
        frames.push_event(InputEvent::PointerMoved { x: 150.0, y: 25.0 });
        frames.tick(0.0);

        assert_eq!(frames.viewport(), Viewport::new(200, 100));
        assert_eq!(frames.pointer(), PointerState::new(0.5, 0.5));
        assert!((frames.control().camera.aspect - 2.0).abs() < 1e-6);
    }

    #[test]
    fn pointer_before_resize_uses_the_old_viewport() {
        let mut frames = frame_loop(NullSink::default());
        assert_eq!(frames.viewport(), Viewport::new(1280, 720));
        frames.push_event(InputEvent::PointerMoved { x: 640.0, y: 360.0 });
        frames.push_event(InputEvent::Resized {
            width: 200,
            height: 100,
        });
        frames.tick(0.0);

        assert_eq!(frames.viewport(), Viewport::new(200, 100));
        assert_eq!(frames.pointer(), PointerState::CENTER);
    }

    #[test]
    fn click_is_consumed_by_one_frame() {
        let mut frames = frame_loop(NullSink::default());
        let scene = torso_and_head();
        frames.install_scene(SceneAsset {
            graph: scene.graph,
            environment: Environment::default(),
        });

        frames.push_event(InputEvent::Click);
        frames.push_event(InputEvent::Click);
        let first = frames.tick(0.0);
        let second = frames.tick(0.0);

        assert_eq!(first.selection_change.map(|c| c.current), Some(scene.torso));
        assert!(second.selection_change.is_none());
        assert_eq!(frames.selection().selected, Some(scene.torso));
    }

    #[test]
    fn teardown_restores_colors_and_empties_scene() {
        let mut frames = frame_loop(NullSink::default());
        let scene = torso_and_head();
        frames.install_scene(SceneAsset {
            graph: scene.graph,
            environment: Environment::default(),
        });
        frames.push_event(InputEvent::Click);
        frames.tick(0.0);
        assert!(frames.graph().node(scene.torso).unwrap().is_recolored());

        frames.teardown();
        assert!(frames.graph().is_empty());
        assert!(frames.selection().is_empty());
        assert!(frames.environment().is_none());
    }
}
