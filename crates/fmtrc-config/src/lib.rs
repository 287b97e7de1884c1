//! Typed loader for code formatter settings files.
//!
//! This crate reads the flat `identifier = literal` settings file consumed by
//! a listfile formatter (`.cmake-format.py` and friends) into an immutable,
//! validated [`FormatConfig`] record:
//! - Key-value and JSON settings files
//! - Upward discovery from the invocation directory
//! - Environment variable overrides
//! - Strict validation (fails on unknown keys unless told otherwise)
//! - Rendering back to settings-file text
//!
//! # Example
//!
//! ```no_run
//! use fmtrc_config::ConfigLoader;
//!
//! # fn main() -> Result<(), fmtrc_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_discovery(".")?
//!     .with_env_prefix("FMTRC")
//!     .load()?;
//!
//! println!("wrapping at {} columns", config.line_width);
//! # Ok(())
//! # }
//! ```
//!
//! # Settings File Format
//!
//! ```python
//! # ---------------------------------------------
//! # Formatting options
//! # ---------------------------------------------
//! line_width = 120             # Adjust line width for readability
//! tab_size = 4                 # Set indentation size
//! use_tabchars = False         # Use spaces instead of tabs
//!
//! keyword_case = 'upper'
//! always_wrap = ['add_library']
//! line_ending = 'unix'
//! ```
//!
//! # Errors
//!
//! Every failure is one of three kinds, see [`ErrorKind`]: the text is not
//! a list of assignments (`MalformedSyntax`), a key is not in the schema
//! (`UnknownKey`), or a value fails its type or domain check
//! (`InvalidValue`). Errors carry the offending line or key. Loading is
//! all-or-nothing.
//!
//! # Environment Variable Overrides
//!
//! With a prefix set, variables named `PREFIX__KEY` override file values:
//!
//! - `FMTRC__LINE_WIDTH=100`
//! - `FMTRC__KEYWORD_CASE=lower`
//! - `FMTRC__ALWAYS_WRAP=add_library,target_sources`

#![warn(missing_docs)]

mod config;
mod discovery;
mod error;
mod loader;
mod render;
mod schema;
pub mod syntax;

pub use config::FormatConfig;
pub use discovery::{discover, find_in, CANDIDATES};
pub use error::{ConfigError, ConfigResult, ErrorKind};
pub use loader::{ConfigLoader, SourceFormat, UnknownKeyPolicy};
pub use schema::{field, CaseStyle, FieldKind, FieldSpec, LineEnding, Section, FIELDS};
