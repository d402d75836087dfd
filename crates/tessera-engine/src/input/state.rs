use std::collections::HashSet;

use super::types::{InputEvent, Key, KeyState};

/// Current keyboard state of the session window.
#[derive(Debug, Default)]
pub struct InputState {
    /// Keys currently held.
    keys_down: HashSet<Key>,
}

impl InputState {
    pub fn apply_event(&mut self, ev: InputEvent) {
        match ev {
            // Released keys are not reported to an unfocused window.
            InputEvent::Focused(false) => self.keys_down.clear(),
            InputEvent::Focused(true) => {}

            InputEvent::Key {
                key,
                state: KeyState::Pressed,
            } => {
                self.keys_down.insert(key);
            }
            InputEvent::Key {
                key,
                state: KeyState::Released,
            } => {
                self.keys_down.remove(&key);
            }
        }
    }

    /// Last reported state of `key`; keys never seen read as released.
    pub fn key_state(&self, key: Key) -> KeyState {
        if self.keys_down.contains(&key) {
            KeyState::Pressed
        } else {
            KeyState::Released
        }
    }
}
