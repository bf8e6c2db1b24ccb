//! partpick - pointer picking and part selection for 3D model viewers
//!
//! Opens a window on the configured scene, or replays a pointer script
//! headlessly with `--headless`.

mod config;
mod headless;
mod scripted_input;
mod viewer;

use anyhow::Result;
use config::{ViewerConfig, DEFAULT_CONFIG_PATH};
use headless::HeadlessConfig;
use std::{env, path::PathBuf};
use tracing::info;

fn main() -> Result<()> {
    // Initialize tracing with WARN level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    info!("Starting partpick v{}", env!("CARGO_PKG_VERSION"));

    let cli = CliOptions::parse(env::args().skip(1));
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let mut viewer_config = ViewerConfig::load_from_path(&config_path);
    if let Some(scene) = cli.scene.clone() {
        viewer_config.scene_path = scene;
    }

    if let Some(path) = cli.write_config.as_deref() {
        viewer_config.save_to_path(path)?;
        info!(path = %path.display(), "Wrote viewer config");
        return Ok(());
    }

    if cli.headless {
        let (width, height) = cli
            .resolution
            .unwrap_or((viewer_config.window.width, viewer_config.window.height));
        let summary = headless::run(HeadlessConfig {
            viewer: viewer_config,
            script: cli.script,
            frames: cli.frames,
            frame_log: cli.frame_log,
            width,
            height,
        })?;
        println!(
            "frames: {} selected: {}",
            summary.frames,
            summary.selected.as_deref().unwrap_or("-")
        );
        return Ok(());
    }

    if cli.script.is_some() || cli.frames.is_some() || cli.frame_log.is_some() {
        tracing::warn!("--script, --frames and --frame-log have no effect without --headless");
    }
    if let Some((width, height)) = cli.resolution {
        viewer_config.window.width = width;
        viewer_config.window.height = height;
    }

    viewer::run(viewer_config)?;
    info!("partpick shutting down");
    Ok(())
}

#[derive(Debug, Default, PartialEq)]
struct CliOptions {
    config: Option<PathBuf>,
    scene: Option<PathBuf>,
    headless: bool,
    script: Option<PathBuf>,
    frames: Option<u64>,
    frame_log: Option<PathBuf>,
    resolution: Option<(u32, u32)>,
    write_config: Option<PathBuf>,
}

impl CliOptions {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Self {
        let mut opts = CliOptions::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--headless" => opts.headless = true,
                "--config" => opts.config = path_arg(&mut args, "--config"),
                "--scene" => opts.scene = path_arg(&mut args, "--scene"),
                "--script" => opts.script = path_arg(&mut args, "--script"),
                "--frame-log" => opts.frame_log = path_arg(&mut args, "--frame-log"),
                "--write-config" => opts.write_config = path_arg(&mut args, "--write-config"),
                "--frames" => {
                    if let Some(raw) = args.next() {
                        match raw.parse::<u64>() {
                            Ok(value) => opts.frames = Some(value),
                            Err(err) => {
                                tracing::error!(%err, value = %raw, "--frames must be an integer");
                            }
                        }
                    } else {
                        tracing::error!("--frames requires an integer");
                    }
                }
                "--resolution" => {
                    if let Some(raw) = args.next() {
                        match raw.split_once('x') {
                            Some((w, h)) => match (w.parse::<u32>(), h.parse::<u32>()) {
                                (Ok(width), Ok(height)) if width > 0 && height > 0 => {
                                    opts.resolution = Some((width, height));
                                }
                                _ => {
                                    tracing::error!(value = %raw, "--resolution must be like 1280x720");
                                }
                            },
                            None => {
                                tracing::error!(value = %raw, "--resolution must be like 1280x720");
                            }
                        }
                    } else {
                        tracing::error!("--resolution requires a value like 1280x720");
                    }
                }
                other => {
                    tracing::warn!(argument = %other, "Ignoring unknown argument");
                }
            }
        }

        opts
    }
}

fn path_arg<I: Iterator<Item = String>>(args: &mut I, flag: &str) -> Option<PathBuf> {
    match args.next() {
        Some(path) => Some(PathBuf::from(path)),
        None => {
            tracing::error!("{flag} requires a file path");
            None
        }
    }
}
