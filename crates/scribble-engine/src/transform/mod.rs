//! View transform pipeline.
//!
//! Pointer input travels backward through the transform (normalized → model)
//! before it is stored; stored geometry travels forward (model → normalized)
//! when drawn. Both directions read the same cached forward matrix.

mod cached;
mod error;
mod view;

pub use cached::Cached;
pub use error::TransformError;
pub use view::ViewTransform;
