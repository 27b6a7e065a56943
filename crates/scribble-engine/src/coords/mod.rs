//! Coordinate and geometry types.
//!
//! Three frames are in play:
//! - device: client pixels, origin top-left, +Y down
//! - normalized: [-1, 1] on both axes, origin at the surface center, +Y up
//! - model: where shape points are stored, independent of the view transform
//!
//! `Mat4` is column-major and is uploaded to shaders as-is.

mod color;
mod mat4;
mod rect;
mod vec2;
mod viewport;

pub use color::ColorRgba;
pub use mat4::Mat4;
pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::{device_to_normalized, Viewport};
