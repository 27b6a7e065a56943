//! Window and event loop.
//!
//! Owns the `winit` event loop and the single window, ties the GPU surface
//! to it and feeds translated input to the app.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
