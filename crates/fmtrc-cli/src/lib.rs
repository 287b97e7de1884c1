//! fmtrc command-line interface library.
//!
//! Provides the commands behind the `fmtrc` binary:
//! - `check`: load and validate settings, naming the file used
//! - `show`: print the resolved settings as settings-file text or JSON
//! - `locate`: print the settings file discovery selects
//! - `defaults`: print the built-in defaults
//!
//! # Binary Usage
//!
//! ```bash
//! # Validate the settings that apply to the current directory
//! fmtrc check
//!
//! # Show the effective settings with an environment override
//! FMTRC__LINE_WIDTH=100 fmtrc show --format json
//!
//! # Tolerate keys from newer formatter versions
//! fmtrc check --config .cmake-format.py --unknown-keys warn
//! ```

#![warn(missing_docs)]

pub mod cli;

pub use cli::{run, Cli, Command, OutputFormat, SourceArgs, UnknownKeys};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
