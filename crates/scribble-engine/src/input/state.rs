use std::collections::HashSet;

use crate::coords::Vec2;

use super::frame::InputFrame;
use super::types::{ButtonState, InputEvent, Key, Modifiers, MouseButton};

/// Held input state for the window.
///
/// The platform layer reads `pointer_pos` and `modifiers` to fill in events
/// that do not carry them natively.
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,
    pub focused: bool,
    /// Last known pointer position in client pixels.
    pub pointer_pos: Option<Vec2>,
    pub keys_down: HashSet<Key>,
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Updates held state from `ev` and records it into `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => self.modifiers = *m,

            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Releases are not delivered after focus moves away.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved { x, y } => self.pointer_pos = Some(Vec2::new(*x, *y)),

            InputEvent::PointerLeft => self.pointer_pos = None,

            InputEvent::Key { key, state, .. } => match state {
                ButtonState::Pressed => {
                    if self.keys_down.insert(*key) {
                        frame.keys_pressed.insert(*key);
                    }
                }
                ButtonState::Released => {
                    self.keys_down.remove(key);
                }
            },

            InputEvent::PointerButton { button, state, x, y } => {
                self.pointer_pos = Some(Vec2::new(*x, *y));
                match state {
                    ButtonState::Pressed => {
                        self.buttons_down.insert(*button);
                    }
                    ButtonState::Released => {
                        self.buttons_down.remove(button);
                    }
                }
            }

            InputEvent::Wheel { .. } => {}
        }

        frame.push_event(ev);
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, state: ButtonState) -> InputEvent {
        InputEvent::Key { key, state, repeat: false }
    }

    #[test]
    fn held_key_is_reported_pressed_once() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        st.apply_event(&mut fr, key(Key::Letter('q'), ButtonState::Pressed));
        st.apply_event(&mut fr, key(Key::Letter('q'), ButtonState::Pressed));
        assert!(st.key_down(Key::Letter('q')));
        assert_eq!(fr.keys_pressed.len(), 1);
        assert_eq!(fr.events.len(), 2);
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        st.apply_event(
            &mut fr,
            InputEvent::PointerButton { button: MouseButton::Left, state: ButtonState::Pressed, x: 1.0, y: 2.0 },
        );
        assert!(st.button_down(MouseButton::Left));
        assert_eq!(st.pointer_pos, Some(Vec2::new(1.0, 2.0)));

        st.apply_event(&mut fr, InputEvent::Focused(false));
        assert!(!st.button_down(MouseButton::Left));
    }

    #[test]
    fn pointer_leave_forgets_position() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        st.apply_event(&mut fr, InputEvent::PointerMoved { x: 5.0, y: 5.0 });
        st.apply_event(&mut fr, InputEvent::PointerLeft);
        assert_eq!(st.pointer_pos, None);
    }
}
