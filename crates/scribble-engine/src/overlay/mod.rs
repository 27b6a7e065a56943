//! Textured background quad.
//!
//! The quad is zoomed by moving its corners directly instead of composing a
//! matrix; it never needs an inverse mapping. The view's rotation and pan
//! are applied on top when drawing.

mod quad;

pub use quad::{OverlayVertex, TextureOverlay};
