#![warn(missing_docs)]
//! Core primitives shared across the workspace.

pub mod color;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use color::{Color, ColorParseError};

/// Monotonic frame counter driven by the render loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// First frame of any run.
    pub const ZERO: Self = Self(0);

    /// Advance by `delta` frames.
    pub fn advance(self, delta: u64) -> Self {
        Self(self.0 + delta)
    }
}

/// Stable identifier of a node in a scene graph.
///
/// Ids are handed out in insertion order and never reused while the graph
/// lives, so comparing two ids by value is enough to tell nodes apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Id of the scene root.
    pub const ROOT: Self = Self(0);

    /// Index into the owning graph's node arena.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
