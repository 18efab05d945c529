//! Held/pressed mask builder for terminal environments.
//!
//! The engine wants, once per frame, the set of buttons currently down and the
//! set that went down during that frame. Terminals report presses, usually
//! auto-repeat as more presses, and often never report releases, so a button
//! that has not been seen for `key_release_timeout_ms` counts as released.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::map::map_key;
use crate::types::{Buttons, FrameInput};

// In terminals without key-release events, a short timeout prevents a single tap
// from turning into a sustained "held" state that triggers auto-repeat.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

const BUTTON_COUNT: usize = Buttons::EACH.len();

/// Tracks which buttons are down between frames.
#[derive(Debug, Clone)]
pub struct InputHandler {
    held: Buttons,
    pressed: Buttons,
    last_seen: [Option<Instant>; BUTTON_COUNT],
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            held: Buttons::NONE,
            pressed: Buttons::NONE,
            last_seen: [None; BUTTON_COUNT],
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    /// Buttons held as of the last event, without expiring anything
    pub fn held(&self) -> Buttons {
        self.held
    }

    /// Feed any key event; returns the button it maps to.
    pub fn handle_key_event(&mut self, key: KeyEvent, now: Instant) -> Buttons {
        match key.kind {
            KeyEventKind::Press => self.handle_key_press(key.code, now),
            KeyEventKind::Repeat => self.handle_key_repeat(key.code, now),
            KeyEventKind::Release => self.handle_key_release(key.code),
        }
    }

    /// A press is an edge only if the button was not already down; terminal
    /// auto-repeat arrives as more presses and just keeps it alive.
    pub fn handle_key_press(&mut self, code: KeyCode, now: Instant) -> Buttons {
        let button = map_key(code);
        if button.is_empty() {
            return button;
        }
        if !self.held.contains(button) {
            self.pressed.insert(button);
        }
        self.held.insert(button);
        self.touch(button, now);
        button
    }

    pub fn handle_key_repeat(&mut self, code: KeyCode, now: Instant) -> Buttons {
        let button = map_key(code);
        if !button.is_empty() {
            self.held.insert(button);
            self.touch(button, now);
        }
        button
    }

    pub fn handle_key_release(&mut self, code: KeyCode) -> Buttons {
        let button = map_key(code);
        self.release(button);
        button
    }

    fn touch(&mut self, button: Buttons, now: Instant) {
        for (slot, single) in self.last_seen.iter_mut().zip(Buttons::EACH) {
            if button.contains(single) {
                *slot = Some(now);
            }
        }
    }

    fn release(&mut self, button: Buttons) {
        self.held.remove(button);
        for (slot, single) in self.last_seen.iter_mut().zip(Buttons::EACH) {
            if button.contains(single) {
                *slot = None;
            }
        }
    }

    /// Masks for the frame starting at `now`.
    ///
    /// Buttons pressed since the last frame are reported as both pressed and
    /// held, even if they were released again in between.
    pub fn frame_at(&mut self, now: Instant) -> FrameInput {
        let timeout = Duration::from_millis(self.key_release_timeout_ms as u64);
        for (i, single) in Buttons::EACH.into_iter().enumerate() {
            if let Some(seen) = self.last_seen[i] {
                if now.saturating_duration_since(seen) > timeout {
                    self.release(single);
                }
            }
        }

        let pressed = std::mem::take(&mut self.pressed);
        FrameInput::new(self.held | pressed, pressed)
    }

    pub fn frame(&mut self) -> FrameInput {
        self.frame_at(Instant::now())
    }

    pub fn reset(&mut self) {
        self.held = Buttons::NONE;
        self.pressed = Buttons::NONE;
        self.last_seen = [None; BUTTON_COUNT];
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(base: Instant, n: u64) -> Instant {
        base + Duration::from_millis(n)
    }

    #[test]
    fn test_press_is_edge_then_held() {
        let t0 = Instant::now();
        let mut ih = InputHandler::new();

        assert_eq!(ih.handle_key_press(KeyCode::Left, t0), Buttons::LEFT);
        let frame = ih.frame_at(ms(t0, 16));
        assert_eq!(frame.pressed, Buttons::LEFT);
        assert_eq!(frame.held, Buttons::LEFT);

        // auto-repeat keeps it held without a new edge
        ih.handle_key_press(KeyCode::Left, ms(t0, 30));
        let frame = ih.frame_at(ms(t0, 32));
        assert_eq!(frame.pressed, Buttons::NONE);
        assert_eq!(frame.held, Buttons::LEFT);
    }

    #[test]
    fn test_release_event_clears_held() {
        let t0 = Instant::now();
        let mut ih = InputHandler::new();
        ih.handle_key_press(KeyCode::Char('x'), t0);
        ih.frame_at(t0);
        ih.handle_key_release(KeyCode::Char('x'));
        assert_eq!(ih.frame_at(ms(t0, 16)), FrameInput::idle());
    }

    #[test]
    fn test_tap_between_frames_still_reported() {
        let t0 = Instant::now();
        let mut ih = InputHandler::new();
        ih.handle_key_press(KeyCode::Char(' '), t0);
        ih.handle_key_release(KeyCode::Char(' '));
        let frame = ih.frame_at(ms(t0, 16));
        assert_eq!(frame, FrameInput::press(Buttons::HARD_DROP));
        assert_eq!(ih.frame_at(ms(t0, 32)), FrameInput::idle());
    }

    #[test]
    fn test_release_timeout_expires_held() {
        let t0 = Instant::now();
        let mut ih = InputHandler::new().with_key_release_timeout_ms(100);
        ih.handle_key_press(KeyCode::Down, t0);
        ih.frame_at(t0);

        assert_eq!(ih.frame_at(ms(t0, 90)).held, Buttons::DOWN);
        assert_eq!(ih.frame_at(ms(t0, 101)).held, Buttons::NONE);

        // a press after expiry is a new edge
        ih.handle_key_press(KeyCode::Down, ms(t0, 120));
        assert_eq!(ih.frame_at(ms(t0, 130)).pressed, Buttons::DOWN);
    }

    #[test]
    fn test_several_buttons_at_once() {
        let t0 = Instant::now();
        let mut ih = InputHandler::new();
        ih.handle_key_press(KeyCode::Char('v'), t0);
        ih.handle_key_press(KeyCode::Char('z'), t0);
        ih.handle_key_press(KeyCode::Char('x'), t0);
        ih.handle_key_press(KeyCode::Char('p'), t0);
        let frame = ih.frame_at(ms(t0, 5));
        assert!(frame.held.is_exit_combo());
    }

    #[test]
    fn test_unmapped_keys_are_ignored() {
        let t0 = Instant::now();
        let mut ih = InputHandler::new();
        assert!(ih.handle_key_press(KeyCode::Char('r'), t0).is_empty());
        assert_eq!(ih.frame_at(t0), FrameInput::idle());
    }

    #[test]
    fn test_reset() {
        let t0 = Instant::now();
        let mut ih = InputHandler::new();
        ih.handle_key_press(KeyCode::Left, t0);
        ih.reset();
        assert_eq!(ih.frame_at(t0), FrameInput::idle());
        assert_eq!(ih.key_release_timeout_ms(), 150);
    }
}
