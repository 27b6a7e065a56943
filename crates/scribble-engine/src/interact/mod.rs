//! Gesture interpretation.
//!
//! Turns platform-agnostic input events into calls on a [`Sketch`]:
//! left drag draws, right drag pans, the wheel zooms about the pointer,
//! `Q`/`E` rotate and digit keys pick the background texture.
//!
//! [`Sketch`]: crate::sketch::Sketch

mod config;
mod policy;
mod surface;

pub use config::{ConfigError, InteractionConfig};
pub use policy::{DragState, Gesture, InteractionPolicy};
pub use surface::SurfaceGeometry;
