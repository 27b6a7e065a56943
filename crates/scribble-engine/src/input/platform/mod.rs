//! Window-system event translation.

mod winit;

pub use self::winit::translate_window_event;
