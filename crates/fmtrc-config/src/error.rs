//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading formatter configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found.
    #[error("configuration file not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// Failed to read configuration file.
    #[error("failed to read configuration file: {path}")]
    ReadError {
        /// Path to the file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// No configuration file found between the start directory and the root.
    #[error("no configuration file found in {start} or any parent directory")]
    NotDiscovered {
        /// Directory the upward search started from.
        start: PathBuf,
    },

    /// The source text is not a sequence of key-value assignments.
    #[error("malformed syntax at line {line}: {message}")]
    MalformedSyntax {
        /// 1-based line number of the offending text.
        line: usize,
        /// What the parser expected.
        message: String,
    },

    /// Key that is not part of the schema.
    #[error("unknown configuration key '{key}'{}", at_line(.line))]
    UnknownKey {
        /// The unknown key.
        key: String,
        /// 1-based line number, `None` for JSON members and environment variables.
        line: Option<usize>,
    },

    /// Invalid configuration value.
    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        /// The field with the invalid value.
        field: String,
        /// Explanation of why the value is invalid.
        reason: String,
    },

    /// Environment variable parsing error.
    #[error("failed to parse environment variable {var}: {reason}")]
    EnvParse {
        /// The environment variable name.
        var: String,
        /// Explanation of the parsing error.
        reason: String,
    },
}

/// Coarse classification of a [`ConfigError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The file could not be parsed as assignments.
    MalformedSyntax,
    /// A key is not in the schema.
    UnknownKey,
    /// A value failed its type or domain check.
    InvalidValue,
    /// The file could not be located or read.
    Io,
}

impl ConfigError {
    /// Create a new file not found error.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a new read error.
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Create a new discovery failure.
    pub fn not_discovered(start: impl Into<PathBuf>) -> Self {
        Self::NotDiscovered {
            start: start.into(),
        }
    }

    /// Create a new syntax error.
    pub fn malformed(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedSyntax {
            line,
            message: message.into(),
        }
    }

    /// Create a new unknown key error.
    pub fn unknown_key(key: impl Into<String>, line: Option<usize>) -> Self {
        Self::UnknownKey {
            key: key.into(),
            line,
        }
    }

    /// Create a new invalid value error.
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a new environment variable parse error.
    pub fn env_parse(var: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::EnvParse {
            var: var.into(),
            reason: reason.into(),
        }
    }

    /// Classify this error.
    ///
    /// Environment overrides that fail to parse count as invalid values.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedSyntax { .. } => ErrorKind::MalformedSyntax,
            Self::UnknownKey { .. } => ErrorKind::UnknownKey,
            Self::InvalidValue { .. } | Self::EnvParse { .. } => ErrorKind::InvalidValue,
            Self::FileNotFound { .. } | Self::ReadError { .. } | Self::NotDiscovered { .. } => {
                ErrorKind::Io
            }
        }
    }
}

fn at_line(line: &Option<usize>) -> String {
    line.map(|n| format!(" at line {n}")).unwrap_or_default()
}

/// Result alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
