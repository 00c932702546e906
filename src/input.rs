//! Per-frame input snapshot
//!
//! The window shell feeds winit events in; demos read held keys, one-shot
//! presses, and accumulated mouse deltas. One-shot state is cleared after
//! every frame.

use std::collections::HashSet;

use glam::Vec2;
use winit::event::{ElementState, KeyEvent, MouseScrollDelta};
use winit::keyboard::{KeyCode, PhysicalKey};

#[derive(Debug, Default)]
pub struct InputState {
    held: HashSet<KeyCode>,
    pressed: HashSet<KeyCode>,
    mouse_delta: Vec2,
    scroll_delta: f32,
    last_cursor: Option<Vec2>,
}

impl InputState {
    /// Record a keyboard event.
    pub fn key_event(&mut self, event: &KeyEvent) {
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        match event.state {
            ElementState::Pressed => {
                if !event.repeat && self.held.insert(code) {
                    self.pressed.insert(code);
                }
            }
            ElementState::Released => {
                self.held.remove(&code);
            }
        }
    }

    /// Record a cursor position; the first sample only seeds the delta.
    pub fn cursor_moved(&mut self, x: f32, y: f32) {
        let pos = Vec2::new(x, y);
        if let Some(last) = self.last_cursor {
            self.mouse_delta += pos - last;
        }
        self.last_cursor = Some(pos);
    }

    /// Record scroll wheel movement.
    pub fn scroll(&mut self, delta: &MouseScrollDelta) {
        self.scroll_delta += match delta {
            MouseScrollDelta::LineDelta(_, y) => *y,
            MouseScrollDelta::PixelDelta(p) => p.y as f32 / 40.0,
        };
    }

    /// Is the key currently held down?
    pub fn held(&self, code: KeyCode) -> bool {
        self.held.contains(&code)
    }

    /// Was the key freshly pressed this frame?
    pub fn pressed(&self, code: KeyCode) -> bool {
        self.pressed.contains(&code)
    }

    /// Mouse movement accumulated since the last frame.
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    /// Scroll movement accumulated since the last frame.
    pub fn scroll_delta(&self) -> f32 {
        self.scroll_delta
    }

    /// Clear one-shot state after the frame consumed it.
    pub fn end_frame(&mut self) {
        self.pressed.clear();
        self.mouse_delta = Vec2::ZERO;
        self.scroll_delta = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_first_sample_produces_no_delta() {
        let mut input = InputState::default();
        input.cursor_moved(100.0, 100.0);
        assert_eq!(input.mouse_delta(), Vec2::ZERO);

        input.cursor_moved(103.0, 98.0);
        assert_eq!(input.mouse_delta(), Vec2::new(3.0, -2.0));

        input.end_frame();
        assert_eq!(input.mouse_delta(), Vec2::ZERO);
    }

    #[test]
    fn scroll_accumulates_and_clears() {
        let mut input = InputState::default();
        input.scroll(&MouseScrollDelta::LineDelta(0.0, 1.0));
        input.scroll(&MouseScrollDelta::LineDelta(0.0, 0.5));
        assert_eq!(input.scroll_delta(), 1.5);
        input.end_frame();
        assert_eq!(input.scroll_delta(), 0.0);
    }
}
