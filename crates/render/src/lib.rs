#![warn(missing_docs)]
//! Picking, selection and the per-frame loop that ties them together.

mod frame_loop;
mod raycast;
mod selection;
mod sink;

pub use frame_loop::{FrameLoop, FrameLoopSettings, FrameReport};
pub use raycast::{intersect_node, pick, pick_all, ray_from_ndc, Intersection, Ray};
pub use selection::{SelectionChange, SelectionController, SelectionState};
pub use sink::{frame_record, FrameLogSink, NullSink, RecordingSink, RenderSink};
