use crate::config::ViewerConfig;
use crate::scripted_input::PointerScriptPlayer;
use anyhow::{Context, Result};
use partpick_assets::{load_async, SceneSource};
use partpick_camera::OrbitControls;
use partpick_input::Viewport;
use partpick_render::{FrameLogSink, FrameLoop, FrameLoopSettings, NullSink, RenderSink};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Fixed step used instead of wall-clock time.
const FRAME_DT: f32 = 1.0 / 60.0;

/// Upper bound on frames spent waiting for the scene before the script starts.
const MAX_LOAD_FRAMES: u32 = 600;

pub struct HeadlessConfig {
    pub viewer: ViewerConfig,
    pub script: Option<PathBuf>,
    pub frames: Option<u64>,
    pub frame_log: Option<PathBuf>,
    pub width: u32,
    pub height: u32,
}

/// Outcome of a headless run.
#[derive(Debug)]
pub struct HeadlessSummary {
    pub frames: u64,
    pub selected: Option<String>,
}

pub fn run(cfg: HeadlessConfig) -> Result<HeadlessSummary> {
    let script = match &cfg.script {
        Some(path) => Some(
            PointerScriptPlayer::from_path(path)
                .with_context(|| format!("failed to load pointer script {}", path.display()))?,
        ),
        None => None,
    };

    let sink: Box<dyn RenderSink> = match &cfg.frame_log {
        Some(path) => Box::new(
            FrameLogSink::create(path)
                .with_context(|| format!("failed to create frame log {}", path.display()))?,
        ),
        None => Box::new(NullSink::default()),
    };

    let mut viewer = cfg.viewer;
    viewer.window.width = cfg.width;
    viewer.window.height = cfg.height;
    let control = OrbitControls::new(viewer.camera(), viewer.orbit_config());
    let settings = FrameLoopSettings {
        highlight: viewer.highlight_color,
        queue_capacity: viewer.event_queue_capacity,
        viewport: Viewport::new(cfg.width, cfg.height),
    };
    let mut frames = FrameLoop::new(control, sink, settings);

    frames.load(load_async(SceneSource::Path(viewer.scene_path.clone())));
    wait_for_scene(&mut frames)?;

    let mut script = script;
    let mut produced = 0u64;
    loop {
        if cfg.frames.is_some_and(|limit| produced >= limit) {
            break;
        }
        if let Some(player) = script.as_mut() {
            for event in player.advance(FRAME_DT) {
                frames.push_event(event);
            }
        }
        frames.tick(FRAME_DT);
        produced += 1;

        let script_done = script.as_ref().map_or(true, PointerScriptPlayer::is_finished);
        if cfg.frames.is_none() && script_done {
            break;
        }
    }

    let selected = frames
        .selection()
        .selected
        .and_then(|id| frames.graph().node(id))
        .map(|node| node.name().to_string());
    info!(frames = produced, selected = ?selected, "headless run finished");
    frames.teardown();

    Ok(HeadlessSummary {
        frames: produced,
        selected,
    })
}

fn wait_for_scene<S: RenderSink>(frames: &mut FrameLoop<OrbitControls, S>) -> Result<()> {
    for _ in 0..MAX_LOAD_FRAMES {
        if !frames.is_loading() {
            break;
        }
        std::thread::sleep(Duration::from_millis(5));
        frames.tick(0.0);
    }
    if frames.is_loading() {
        anyhow::bail!("scene did not finish loading");
    }
    if frames.graph().is_empty() {
        anyhow::bail!("scene failed to load; see the log for details");
    }
    Ok(())
}
