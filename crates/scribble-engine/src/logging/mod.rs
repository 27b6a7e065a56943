//! Logger initialization.
//!
//! Everything else in the crate only talks to the `log` facade; `env_logger`
//! is wired up here, once, from `main`.

mod init;

pub use init::{init_logging, LoggingConfig};
