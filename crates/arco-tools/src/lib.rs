//! Development tools for applications embedding Arco.
//!
//! Arco crates only emit `tracing` events. Call
//! [`enable_logging`](logging::enable_logging) once at startup to see them.

pub mod logging;

pub use logging::{LogFormat, LoggingError, enable_logging};
