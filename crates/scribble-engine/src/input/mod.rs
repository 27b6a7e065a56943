//! Input subsystem.
//!
//! Public types are platform-agnostic; `platform` translates window-system
//! events into `InputEvent`s.

mod frame;
pub mod platform;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{ButtonState, InputEvent, Key, Modifiers, MouseButton, WheelDelta};
