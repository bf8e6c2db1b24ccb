use crate::config::ViewerConfig;
use anyhow::Result;
use partpick_assets::{load_async, SceneSource};
use partpick_camera::{CameraPose, OrbitControls};
use partpick_core::NodeId;
use partpick_input::{Viewport, WinitInputAdapter};
use partpick_render::{FrameLoop, FrameLoopSettings, RenderSink, SelectionState};
use partpick_scene::SceneGraph;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;
use winit::dpi::PhysicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

/// Shows the hovered and selected part names in the window title.
pub struct TitleSink {
    window: Arc<Window>,
    base: String,
    current: String,
}

impl TitleSink {
    pub fn new(window: Arc<Window>, base: String) -> Self {
        Self {
            window,
            current: base.clone(),
            base,
        }
    }
}

impl RenderSink for TitleSink {
    fn draw(&mut self, graph: &SceneGraph, _: &CameraPose, selection: &SelectionState) -> Result<()> {
        let title = format_title(&self.base, graph, selection);
        if title != self.current {
            self.window.set_title(&title);
            self.current = title;
        }
        Ok(())
    }
}

pub fn format_title(base: &str, graph: &SceneGraph, selection: &SelectionState) -> String {
    let name = |id: NodeId| {
        graph
            .node(id)
            .map(|node| node.name())
            .unwrap_or("-")
    };
    let hovered = selection.hovered.map_or("-", name);
    let selected = selection.selected.map_or("-", name);
    format!("{base} | hover: {hovered} | selected: {selected}")
}

pub fn run(cfg: ViewerConfig) -> Result<()> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let window = Arc::new(
        WindowBuilder::new()
            .with_title(&cfg.window.title)
            .with_inner_size(PhysicalSize::new(cfg.window.width, cfg.window.height))
            .build(&event_loop)?,
    );
    let size = window.inner_size();

    let control = OrbitControls::new(cfg.camera(), cfg.orbit_config());
    let sink = TitleSink::new(window.clone(), cfg.window.title.clone());
    let settings = FrameLoopSettings {
        highlight: cfg.highlight_color,
        queue_capacity: cfg.event_queue_capacity,
        viewport: Viewport::new(size.width, size.height),
    };
    let mut frames = FrameLoop::new(control, sink, settings);
    frames.load(load_async(SceneSource::Path(cfg.scene_path.clone())));

    let mut adapter = WinitInputAdapter::new();
    let mut last_frame = Instant::now();

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, window_id } if window_id == window.id() => match event {
            WindowEvent::CloseRequested => {
                info!("Window closed");
                frames.teardown();
                elwt.exit();
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let elapsed = (now - last_frame).as_secs_f32();
                last_frame = now;
                frames.tick(elapsed);
            }
            other => {
                adapter.handle_window_event(&other, frames.queue_mut());
            }
        },
        Event::AboutToWait => {
            window.request_redraw();
        }
        _ => {}
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use partpick_testkit::torso_and_head;

    #[test]
    fn title_names_hover_and_selection() {
        let scene = torso_and_head();
        let selection = SelectionState {
            hovered: Some(scene.head),
            selected: Some(scene.torso),
        };
        assert_eq!(
            format_title("partpick", &scene.graph, &selection),
            "partpick | hover: Head | selected: Torso"
        );
        assert_eq!(
            format_title("partpick", &scene.graph, &SelectionState::default()),
            "partpick | hover: - | selected: -"
        );
    }
}
