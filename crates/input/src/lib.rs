#![warn(missing_docs)]
//! Pointer, click and resize input, coalesced into one snapshot per frame.

mod queue;
mod winit_adapter;

use glam::Vec2;

pub use queue::{EventQueue, DEFAULT_QUEUE_CAPACITY};
pub use winit_adapter::{WinitInputAdapter, CLICK_DRAG_THRESHOLD};

/// Raw input delivered by the windowing layer, in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer moved to `(x, y)`, origin at the top-left corner.
    PointerMoved {
        /// Horizontal pixel position.
        x: f32,
        /// Vertical pixel position.
        y: f32,
    },
    /// Discrete click (press and release without dragging).
    Click,
    /// The viewport changed size.
    Resized {
        /// New width in pixels.
        width: u32,
        /// New height in pixels.
        height: u32,
    },
    /// Pointer dragged by `(dx, dy)` pixels with the orbit button held.
    Orbit {
        /// Horizontal drag.
        dx: f32,
        /// Vertical drag.
        dy: f32,
    },
    /// Zoom step; positive moves closer.
    Zoom {
        /// Number of wheel steps.
        delta: f32,
    },
}

/// Viewport size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Construct a viewport.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether either dimension is zero (e.g. a minimized window).
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

/// Pointer position in normalized device coordinates, `[-1, 1]` per axis,
/// `+y` up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    /// Horizontal NDC.
    pub x: f32,
    /// Vertical NDC.
    pub y: f32,
}

impl PointerState {
    /// Pointer at the centre of the viewport.
    pub const CENTER: Self = Self { x: 0.0, y: 0.0 };

    /// Build from NDC values, clamping into range.
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: x.clamp(-1.0, 1.0),
            y: y.clamp(-1.0, 1.0),
        }
    }

    /// Convert a pixel position using the given viewport.
    pub fn from_pixels(x: f32, y: f32, viewport: Viewport) -> Self {
        let (x, y) = pointer_to_ndc(x, y, viewport);
        Self { x, y }
    }

    /// NDC as a vector.
    pub fn ndc(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Convert viewport pixels to NDC.
///
/// A zero-sized viewport maps every position to the centre.
pub fn pointer_to_ndc(x: f32, y: f32, viewport: Viewport) -> (f32, f32) {
    if viewport.is_degenerate() {
        return (0.0, 0.0);
    }
    let ndc_x = x / viewport.width as f32 * 2.0 - 1.0;
    let ndc_y = 1.0 - y / viewport.height as f32 * 2.0;
    (ndc_x.clamp(-1.0, 1.0), ndc_y.clamp(-1.0, 1.0))
}

/// Latest pointer position in pixels, with the viewport it was measured in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    /// Horizontal pixel position.
    pub x: f32,
    /// Vertical pixel position.
    pub y: f32,
    /// Size from a resize earlier in the same batch. `None` means the
    /// viewport in effect before the batch.
    pub viewport: Option<Viewport>,
}

impl PointerSample {
    /// Pixel position as a pair.
    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    /// Convert to NDC, using `fallback` when no resize preceded the sample.
    pub fn to_pointer_state(&self, fallback: Viewport) -> PointerState {
        PointerState::from_pixels(self.x, self.y, self.viewport.unwrap_or(fallback))
    }
}

/// Everything that happened since the previous frame, folded together.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameInput {
    /// Latest pointer sample, if the pointer moved.
    pub pointer: Option<PointerSample>,
    /// At least one click arrived; consumed by this frame.
    pub clicked: bool,
    /// Latest viewport size, if the viewport was resized.
    pub resized: Option<Viewport>,
    /// Accumulated orbit drag in pixels.
    pub orbit: Vec2,
    /// Accumulated zoom steps.
    pub zoom: f32,
}

impl FrameInput {
    /// Fold one more event in. Later pointer and resize events win.
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMoved { x, y } => {
                self.pointer = Some(PointerSample {
                    x,
                    y,
                    viewport: self.resized,
                })
            }
            InputEvent::Click => self.clicked = true,
            InputEvent::Resized { width, height } => {
                self.resized = Some(Viewport::new(width, height))
            }
            InputEvent::Orbit { dx, dy } => self.orbit += Vec2::new(dx, dy),
            InputEvent::Zoom { delta } => self.zoom += delta,
        }
    }

    /// Fold a later batch on top of this one.
    pub fn merge(&mut self, later: FrameInput) {
        if let Some(mut sample) = later.pointer {
            sample.viewport = sample.viewport.or(self.resized);
            self.pointer = Some(sample);
        }
        if later.resized.is_some() {
            self.resized = later.resized;
        }
        self.clicked |= later.clicked;
        self.orbit += later.orbit;
        self.zoom += later.zoom;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_corners_map_to_ndc_corners() {
        let viewport = Viewport::new(800, 600);
        assert_eq!(pointer_to_ndc(0.0, 0.0, viewport), (-1.0, 1.0));
        assert_eq!(pointer_to_ndc(800.0, 600.0, viewport), (1.0, -1.0));
        assert_eq!(pointer_to_ndc(400.0, 300.0, viewport), (0.0, 0.0));
    }

    #[test]
    fn out_of_window_positions_are_clamped() {
        let viewport = Viewport::new(100, 100);
        assert_eq!(pointer_to_ndc(-50.0, 250.0, viewport), (-1.0, -1.0));
    }

    #[test]
    fn zero_viewport_maps_to_centre() {
        let pointer = PointerState::from_pixels(10.0, 10.0, Viewport::new(0, 480));
        assert_eq!(pointer, PointerState::CENTER);
    }

    #[test]
    fn frame_input_keeps_latest_pointer_and_any_click() {
        let mut input = FrameInput::default();
        input.apply(InputEvent::PointerMoved { x: 1.0, y: 2.0 });
        input.apply(InputEvent::Click);
        input.apply(InputEvent::Click);
        input.apply(InputEvent::PointerMoved { x: 3.0, y: 4.0 });
        input.apply(InputEvent::Orbit { dx: 1.0, dy: 0.0 });
        input.apply(InputEvent::Orbit { dx: 2.0, dy: -1.0 });

        assert_eq!(input.pointer.map(|p| p.position()), Some((3.0, 4.0)));
        assert!(input.clicked);
        assert_eq!(input.orbit, Vec2::new(3.0, -1.0));
        assert_eq!(input.resized, None);
    }

    #[test]
    fn merge_prefers_later_values() {
        let mut early = FrameInput::default();
        early.apply(InputEvent::Resized { width: 10, height: 10 });
        early.apply(InputEvent::Click);

        let mut late = FrameInput::default();
        late.apply(InputEvent::Resized { width: 20, height: 10 });
        late.apply(InputEvent::Zoom { delta: 1.0 });

        early.merge(late);
        assert_eq!(early.resized, Some(Viewport::new(20, 10)));
        assert!(early.clicked);
        assert_eq!(early.zoom, 1.0);
    }

    #[test]
    fn pointer_keeps_the_viewport_it_was_measured_in() {
        let mut input = FrameInput::default();
        input.apply(InputEvent::PointerMoved { x: 100.0, y: 50.0 });
        input.apply(InputEvent::Resized { width: 400, height: 400 });
        let before_resize = input.pointer.expect("pointer moved");
        assert_eq!(before_resize.viewport, None);
        assert_eq!(
            before_resize.to_pointer_state(Viewport::new(200, 100)),
            PointerState::CENTER
        );

        input.apply(InputEvent::PointerMoved { x: 100.0, y: 50.0 });
        let after_resize = input.pointer.expect("pointer moved");
        assert_eq!(after_resize.viewport, Some(Viewport::new(400, 400)));
        assert_eq!(
            after_resize.to_pointer_state(Viewport::new(200, 100)),
            PointerState::new(-0.5, 0.75)
        );
    }

    #[test]
    fn merge_tags_later_pointer_with_earlier_resize() {
        let mut early = FrameInput::default();
        early.apply(InputEvent::Resized { width: 300, height: 300 });

        let mut late = FrameInput::default();
        late.apply(InputEvent::PointerMoved { x: 1.0, y: 1.0 });

        early.merge(late);
        let sample = early.pointer.expect("pointer moved");
        assert_eq!(sample.viewport, Some(Viewport::new(300, 300)));
    }
}
