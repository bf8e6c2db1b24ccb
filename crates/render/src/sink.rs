//! Where finished frames go.

use std::path::Path;

use anyhow::Result;
use partpick_camera::CameraPose;
use partpick_core::{FrameIndex, NodeId};
use partpick_scene::SceneGraph;
use partpick_testkit::{FrameRecord, JsonlSink};

use crate::SelectionState;

/// Consumer of one finished frame.
///
/// Errors are reported by the frame loop and never stop it.
pub trait RenderSink {
    /// Present the scene as seen from `camera`.
    fn draw(
        &mut self,
        graph: &SceneGraph,
        camera: &CameraPose,
        selection: &SelectionState,
    ) -> Result<()>;
}

impl<T: RenderSink + ?Sized> RenderSink for Box<T> {
    fn draw(
        &mut self,
        graph: &SceneGraph,
        camera: &CameraPose,
        selection: &SelectionState,
    ) -> Result<()> {
        (**self).draw(graph, camera, selection)
    }
}

/// Discards frames, counting them.
#[derive(Debug, Default)]
pub struct NullSink {
    frames: u64,
}

impl NullSink {
    /// Number of frames drawn so far.
    pub fn frames_drawn(&self) -> u64 {
        self.frames
    }
}

impl RenderSink for NullSink {
    fn draw(&mut self, _: &SceneGraph, _: &CameraPose, _: &SelectionState) -> Result<()> {
        self.frames += 1;
        Ok(())
    }
}

/// Summarize a frame for logs and assertions.
pub fn frame_record(frame: FrameIndex, graph: &SceneGraph, selection: &SelectionState) -> FrameRecord {
    let name = |id: NodeId| graph.node(id).map(|node| node.name().to_string());
    FrameRecord {
        frame,
        hovered: selection.hovered.and_then(name),
        selected: selection.selected.and_then(name),
        highlighted: graph
            .traverse()
            .filter(|node| node.is_recolored())
            .map(|node| node.name().to_string())
            .collect(),
    }
}

/// Writes one [`FrameRecord`] per frame as JSON lines.
pub struct FrameLogSink {
    sink: JsonlSink,
    frame: FrameIndex,
}

impl FrameLogSink {
    /// Create the log at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            sink: JsonlSink::create(path)?,
            frame: FrameIndex::ZERO,
        })
    }

    /// Flush buffered records to disk.
    pub fn flush(&mut self) -> Result<()> {
        self.sink.flush()
    }
}

impl RenderSink for FrameLogSink {
    fn draw(&mut self, graph: &SceneGraph, _: &CameraPose, selection: &SelectionState) -> Result<()> {
        let record = frame_record(self.frame, graph, selection);
        self.frame = self.frame.advance(1);
        self.sink.write(&record)
    }
}

/// Keeps every frame record in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    records: Vec<FrameRecord>,
}

impl RecordingSink {
    /// Records captured so far, oldest first.
    pub fn records(&self) -> &[FrameRecord] {
        &self.records
    }

    /// Most recent record.
    pub fn last(&self) -> Option<&FrameRecord> {
        self.records.last()
    }
}

impl RenderSink for RecordingSink {
    fn draw(&mut self, graph: &SceneGraph, _: &CameraPose, selection: &SelectionState) -> Result<()> {
        let frame = FrameIndex(self.records.len() as u64);
        self.records.push(frame_record(frame, graph, selection));
        Ok(())
    }
}
