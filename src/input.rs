//! Keyboard state polled by the game loop.
//!
//! Key events only flip entries in [`KeyTracker`]; the session asks an
//! [`InputSource`] once per frame which controls are held.

use std::collections::HashMap;

use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Anything that can answer whether a key is currently held down.
pub trait InputSource {
    fn is_pressed(&self, key: KeyCode) -> bool;
}

impl<T: InputSource + ?Sized> InputSource for &T {
    fn is_pressed(&self, key: KeyCode) -> bool {
        (**self).is_pressed(key)
    }
}

/// The four steering controls and the keys bound to each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    PitchUp,
    PitchDown,
    RollLeft,
    RollRight,
}

impl Control {
    pub const ALL: [Control; 4] = [
        Control::PitchUp,
        Control::PitchDown,
        Control::RollLeft,
        Control::RollRight,
    ];

    /// Arrow keys and WASD are aliases of each other.
    pub fn keys(self) -> &'static [KeyCode] {
        match self {
            Control::PitchUp => &[KeyCode::ArrowUp, KeyCode::KeyW],
            Control::PitchDown => &[KeyCode::ArrowDown, KeyCode::KeyS],
            Control::RollLeft => &[KeyCode::ArrowLeft, KeyCode::KeyA],
            Control::RollRight => &[KeyCode::ArrowRight, KeyCode::KeyD],
        }
    }

    pub fn is_held(self, input: &impl InputSource) -> bool {
        self.keys().iter().any(|key| input.is_pressed(*key))
    }
}

/// Live key-to-pressed mapping fed by window events.
#[derive(Debug, Default)]
pub struct KeyTracker {
    keys: HashMap<KeyCode, bool>,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: KeyCode, pressed: bool) {
        self.keys.insert(key, pressed);
    }

    /// Process a key event and update the stored state.
    pub fn process_key(&mut self, key: PhysicalKey, state: ElementState) {
        if let PhysicalKey::Code(code) = key {
            self.set(code, state.is_pressed());
        }
    }

    /// Feeds keyboard and focus events; returns true if the event changed key state.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key,
                        state,
                        ..
                    },
                ..
            } => {
                self.process_key(*physical_key, *state);
                true
            }
            // Key-up events are lost while unfocused
            WindowEvent::Focused(false) => {
                self.clear();
                true
            }
            _ => false,
        }
    }

    /// Release every key (e.g., on focus loss).
    pub fn clear(&mut self) {
        self.keys.clear();
    }
}

impl InputSource for KeyTracker {
    fn is_pressed(&self, key: KeyCode) -> bool {
        self.keys.get(&key).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_mapping() {
        let mut tracker = KeyTracker::new();

        tracker.process_key(PhysicalKey::Code(KeyCode::KeyW), ElementState::Pressed);
        assert!(Control::PitchUp.is_held(&tracker));
        assert!(!Control::PitchDown.is_held(&tracker));

        tracker.process_key(PhysicalKey::Code(KeyCode::ArrowLeft), ElementState::Pressed);
        assert!(Control::PitchUp.is_held(&tracker));
        assert!(Control::RollLeft.is_held(&tracker));

        tracker.process_key(PhysicalKey::Code(KeyCode::KeyW), ElementState::Released);
        assert!(!Control::PitchUp.is_held(&tracker));
        assert!(Control::RollLeft.is_held(&tracker));
    }

    #[test]
    fn aliases_count_once() {
        let mut tracker = KeyTracker::new();
        tracker.set(KeyCode::KeyD, true);
        tracker.set(KeyCode::ArrowRight, true);
        assert!(Control::RollRight.is_held(&tracker));

        tracker.set(KeyCode::KeyD, false);
        assert!(Control::RollRight.is_held(&tracker));
    }

    #[test]
    fn unknown_keys_are_never_pressed() {
        let mut tracker = KeyTracker::new();
        assert!(!tracker.is_pressed(KeyCode::KeyQ));
        tracker.process_key(
            PhysicalKey::Unidentified(winit::keyboard::NativeKeyCode::Unidentified),
            ElementState::Pressed,
        );
        assert!(Control::ALL.iter().all(|control| !control.is_held(&tracker)));
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut tracker = KeyTracker::new();
        tracker.set(KeyCode::ArrowUp, true);
        tracker.set(KeyCode::KeyA, true);
        assert!(tracker.handle_window_event(&WindowEvent::Focused(false)));
        assert!(!tracker.is_pressed(KeyCode::ArrowUp));
        assert!(!tracker.is_pressed(KeyCode::KeyA));
        assert!(!tracker.handle_window_event(&WindowEvent::Focused(true)));
    }
}
