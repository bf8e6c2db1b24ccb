//! Hover and click selection with reversible highlighting.

use partpick_core::{Color, NodeId};
use partpick_scene::SceneGraph;
use tracing::{debug, error, info};

use crate::Intersection;

/// Which node is under the pointer and which one was last clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionState {
    /// Node under the pointer this frame.
    pub hovered: Option<NodeId>,
    /// Node that was last clicked. Survives clicks on empty space.
    pub selected: Option<NodeId>,
}

impl SelectionState {
    /// Nothing hovered and nothing selected.
    pub fn is_empty(&self) -> bool {
        self.hovered.is_none() && self.selected.is_none()
    }
}

/// Result of a click that landed on a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionChange {
    /// Selection before the click.
    pub previous: Option<NodeId>,
    /// Selection after the click.
    pub current: NodeId,
}

impl SelectionChange {
    /// Whether the click moved the selection to a different node.
    pub fn is_new(&self) -> bool {
        self.previous != Some(self.current)
    }
}

/// Owns [`SelectionState`] and the node colors it implies.
///
/// Only the selected node ever shows the highlight color. Every other node
/// keeps its original color, so selecting and reselecting is fully
/// reversible.
#[derive(Debug, Clone)]
pub struct SelectionController {
    state: SelectionState,
    highlight: Color,
}

impl Default for SelectionController {
    fn default() -> Self {
        Self::new(Color::RED)
    }
}

impl SelectionController {
    /// Controller painting the selected node with `highlight`.
    pub fn new(highlight: Color) -> Self {
        Self {
            state: SelectionState::default(),
            highlight,
        }
    }

    /// Current hover/selection.
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Color applied to the selected node.
    pub fn highlight_color(&self) -> Color {
        self.highlight
    }

    /// Record what is under the pointer. Never touches colors.
    ///
    /// Returns whether the hovered node changed.
    pub fn update_hover(&mut self, hit: Option<&Intersection>) -> bool {
        let hovered = hit.map(|hit| hit.node);
        if hovered == self.state.hovered {
            return false;
        }
        debug!(from = ?self.state.hovered, to = ?hovered, "hover changed");
        self.state.hovered = hovered;
        true
    }

    /// Select the hovered node.
    ///
    /// Clicking empty space does nothing and keeps the current selection.
    pub fn click(&mut self, graph: &mut SceneGraph) -> Option<SelectionChange> {
        let target = self.state.hovered?;
        debug_assert!(graph.contains(target), "hovered node {target} is not in the scene");
        if !graph.contains(target) {
            error!(node = %target, "hovered node is not in the scene");
            self.state.hovered = None;
            return None;
        }

        let previous = self.state.selected;
        if let Some(previous) = previous.filter(|id| *id != target) {
            restore(graph, previous);
        }

        self.state.selected = Some(target);
        if let Some(node) = graph.node_mut(target) {
            node.set_color(self.highlight);
            info!(part = node.name(), node = %target, "clicked part");
        }

        Some(SelectionChange {
            previous,
            current: target,
        })
    }

    /// Restore the selected node's color and forget everything.
    pub fn reset(&mut self, graph: &mut SceneGraph) {
        if let Some(selected) = self.state.selected.take() {
            restore(graph, selected);
        }
        self.state.hovered = None;
    }
}

fn restore(graph: &mut SceneGraph, id: NodeId) {
    debug_assert!(graph.contains(id), "selected node {id} is not in the scene");
    match graph.node_mut(id) {
        Some(node) => node.restore_original_color(),
        None => error!(node = %id, "selected node is not in the scene"),
    }
}
