//! Translate winit window events into [`InputEvent`]s.

use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

use crate::{EventQueue, InputEvent};

/// Pointer travel in pixels beyond which a held left button becomes an
/// orbit drag instead of a click.
pub const CLICK_DRAG_THRESHOLD: f64 = 4.0;

/// Pixels of a precise scroll counted as one wheel step.
const PIXELS_PER_LINE: f64 = 100.0;

/// Turns raw winit events into pointer, click, orbit and zoom events.
///
/// A left press followed by a release without dragging is a click. Dragging
/// further than [`CLICK_DRAG_THRESHOLD`] orbits instead.
#[derive(Debug, Default)]
pub struct WinitInputAdapter {
    cursor: (f64, f64),
    pressed_at: Option<(f64, f64)>,
    dragging: bool,
}

impl WinitInputAdapter {
    /// Create an adapter with the cursor at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one window event; anything relevant lands in `queue`.
    ///
    /// Returns whether the event was consumed.
    pub fn handle_window_event(&mut self, event: &WindowEvent, queue: &mut EventQueue) -> bool {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(position.x, position.y, queue);
                true
            }
            WindowEvent::CursorLeft { .. } => {
                self.cancel_press();
                true
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.left_button(*state == ElementState::Pressed, queue);
                true
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let steps = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y as f64,
                    MouseScrollDelta::PixelDelta(pos) => pos.y / PIXELS_PER_LINE,
                };
                self.wheel(steps, queue);
                true
            }
            WindowEvent::Resized(size) => {
                queue.push(InputEvent::Resized {
                    width: size.width,
                    height: size.height,
                });
                true
            }
            _ => false,
        }
    }

    /// The pointer moved to `(x, y)` pixels.
    pub fn cursor_moved(&mut self, x: f64, y: f64, queue: &mut EventQueue) {
        if let Some((px, py)) = self.pressed_at {
            if !self.dragging {
                let travelled = ((x - px).powi(2) + (y - py).powi(2)).sqrt();
                self.dragging = travelled > CLICK_DRAG_THRESHOLD;
            }
            if self.dragging {
                queue.push(InputEvent::Orbit {
                    dx: (x - self.cursor.0) as f32,
                    dy: (y - self.cursor.1) as f32,
                });
            }
        }
        self.cursor = (x, y);
        queue.push(InputEvent::PointerMoved {
            x: x as f32,
            y: y as f32,
        });
    }

    /// The left button changed state.
    pub fn left_button(&mut self, pressed: bool, queue: &mut EventQueue) {
        if pressed {
            self.pressed_at = Some(self.cursor);
            self.dragging = false;
            return;
        }
        if self.pressed_at.take().is_some() && !self.dragging {
            queue.push(InputEvent::Click);
        }
        self.dragging = false;
    }

    /// The wheel turned by `steps`; positive zooms in.
    pub fn wheel(&mut self, steps: f64, queue: &mut EventQueue) {
        if steps != 0.0 {
            queue.push(InputEvent::Zoom {
                delta: steps as f32,
            });
        }
    }

    /// Forget a press in progress, e.g. when the pointer leaves the window.
    pub fn cancel_press(&mut self) {
        self.pressed_at = None;
        self.dragging = false;
    }
}
