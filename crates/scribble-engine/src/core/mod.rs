//! Contract between the runtime and the application: callbacks plus the
//! per-frame context.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
