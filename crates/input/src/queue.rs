//! Bounded input queue drained once per frame.

use std::collections::VecDeque;

use tracing::debug;

use crate::{FrameInput, InputEvent};

/// Capacity used when none is configured.
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

/// FIFO of raw input events between the windowing layer and the frame loop.
///
/// The queue never drops information that matters to a frame: when it is
/// full, the queued events are folded into a pending [`FrameInput`] before
/// the new event is appended. The last pointer position still wins and
/// clicks are never lost.
#[derive(Debug)]
pub struct EventQueue {
    events: VecDeque<InputEvent>,
    capacity: usize,
    folded: Option<FrameInput>,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_QUEUE_CAPACITY)
    }
}

impl EventQueue {
    /// Create a queue holding at most `capacity` raw events (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
            folded: None,
        }
    }

    /// Maximum number of raw events held before folding.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Raw events currently queued.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing is waiting for the next frame.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.folded.is_none()
    }

    /// Append an event, folding older ones if the queue is full.
    pub fn push(&mut self, event: InputEvent) {
        if self.events.len() >= self.capacity {
            debug!(
                capacity = self.capacity,
                "input queue full; coalescing queued events"
            );
            let folded = self.folded.get_or_insert_with(FrameInput::default);
            for queued in self.events.drain(..) {
                folded.apply(queued);
            }
        }
        self.events.push_back(event);
    }

    /// Take everything queued since the last drain, in arrival order.
    pub fn drain(&mut self) -> FrameInput {
        let mut input = self.folded.take().unwrap_or_default();
        for event in self.events.drain(..) {
            input.apply(event);
        }
        input
    }
}
