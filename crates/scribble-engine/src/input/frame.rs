use std::collections::HashSet;

use super::types::{InputEvent, Key};

/// Input collected since the previous frame.
///
/// Events are kept in arrival order so a consumer can replay them before
/// drawing; `keys_pressed` holds fresh (non-repeat) key presses.
#[derive(Debug, Default)]
pub struct InputFrame {
    pub events: Vec<InputEvent>,
    pub keys_pressed: HashSet<Key>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.keys_pressed.clear();
    }

    pub fn push_event(&mut self, ev: InputEvent) {
        self.events.push(ev);
    }
}
