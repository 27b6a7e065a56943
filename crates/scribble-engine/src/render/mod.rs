//! GPU rendering.
//!
//! Each renderer owns its pipeline and buffers, builds them lazily on first
//! use and rebuilds the pipeline if the surface format changes. Geometry is
//! in model or normalized units; the vertex shaders apply a 4x4 uniform.

mod common;
mod ctx;
mod polyline;
mod texture;

pub use ctx::{RenderCtx, RenderTarget};
pub use polyline::{polyline_vertices, PolylineRenderer, PolylineVertex};
pub use texture::{TextureError, TextureImage, TextureQuadRenderer};
