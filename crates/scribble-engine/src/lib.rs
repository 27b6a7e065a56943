//! Scribble engine.
//!
//! A freehand sketch surface: pointer strokes are stored in model space and
//! drawn through a pan/rotate/zoom view transform over a textured background.
//!
//! The model (`coords`, `transform`, `shapes`, `overlay`, `sketch`,
//! `interact`) is plain data and runs headless. `device`, `window`, `core`
//! and `render` put it on screen with wgpu and winit.

pub mod coords;
pub mod interact;
pub mod overlay;
pub mod shapes;
pub mod sketch;
pub mod transform;

pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod render;
pub mod window;
