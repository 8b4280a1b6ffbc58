use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{InputEvent, Key, KeyState, Modifiers};

/// Current input state for the game window.
///
/// Holds "is down" information; per-frame transitions are recorded into an
/// `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    /// Current modifier state.
    pub modifiers: Modifiers,

    /// Whether the window is focused.
    pub focused: bool,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state and writes deltas to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => {
                self.modifiers = *m;
            }

            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Conservative behavior: on focus loss, clear the "down" set.
                    // Avoids a kart that keeps accelerating when focus changes mid-press.
                    self.keys_down.clear();
                }
            }

            InputEvent::Key {
                key,
                state,
                modifiers,
                ..
            } => {
                self.modifiers = *modifiers;

                match state {
                    KeyState::Pressed => {
                        let inserted = self.keys_down.insert(*key);
                        if inserted {
                            frame.keys_pressed.insert(*key);
                        }
                    }
                    KeyState::Released => {
                        let removed = self.keys_down.remove(key);
                        if removed {
                            frame.keys_released.insert(*key);
                        }
                    }
                }
            }
        }

        frame.push_event(ev);
    }

    /// True while `key` is held.
    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(key: Key) -> InputEvent {
        InputEvent::Key {
            key,
            state: KeyState::Pressed,
            modifiers: Modifiers::default(),
            code: 0,
            repeat: false,
        }
    }

    fn release(key: Key) -> InputEvent {
        InputEvent::Key {
            key,
            state: KeyState::Released,
            modifiers: Modifiers::default(),
            code: 0,
            repeat: false,
        }
    }

    #[test]
    fn press_release_roundtrip() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, press(Key::Space));
        assert!(state.key_down(Key::Space));
        assert!(frame.pressed(Key::Space));

        frame.clear();

        state.apply_event(&mut frame, release(Key::Space));
        assert!(!state.key_down(Key::Space));
        assert!(frame.keys_released.contains(&Key::Space));
    }

    #[test]
    fn repeat_press_records_single_transition() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, press(Key::ArrowUp));
        frame.clear();

        // OS key-repeat delivers Pressed again while the key is already down.
        state.apply_event(&mut frame, press(Key::ArrowUp));
        assert!(state.key_down(Key::ArrowUp));
        assert!(!frame.pressed(Key::ArrowUp));
    }

    #[test]
    fn focus_loss_clears_held_keys() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, press(Key::ArrowUp));
        state.apply_event(&mut frame, InputEvent::Focused(false));

        assert!(!state.key_down(Key::ArrowUp));
        assert!(!state.focused);
    }
}
