//! Observability for fmtrc.
//!
//! Settings loading reports progress through `tracing` events; this crate
//! installs the subscriber that renders them.
//!
//! | Level | Emitted when |
//! |-------|--------------|
//! | `warn` | An unknown key is ignored, or a key is assigned twice |
//! | `info` | A configuration finished loading |
//! | `debug` | A settings file is read or discovered, an env override applies |
//! | `trace` | Each directory visited during discovery |
//!
//! # Example
//!
//! ```rust,ignore
//! use fmtrc_telemetry::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::verbose())?;
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod logging;

pub use error::TelemetryError;
pub use logging::{init_logging, LogConfig, LogFormat};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
