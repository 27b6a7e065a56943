//! Shape storage.
//!
//! Points are stored in model space and resubmitted in full every frame.

mod color;
mod polyline;

pub use color::radial_color;
pub use polyline::PolylineStore;
