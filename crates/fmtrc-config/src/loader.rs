//! Configuration loader with layered approach.
//!
//! This module provides the [`ConfigLoader`] for loading configuration from
//! multiple sources: defaults, settings files, and environment variables.

use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::schema::{self, FieldKind};
use crate::syntax::{self, Literal};
use crate::{discover, ConfigError, ConfigResult, FormatConfig};

/// Encoding of a settings source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceFormat {
    /// `identifier = literal` lines.
    #[default]
    KeyValue,
    /// A JSON object with the same keys.
    Json,
}

impl SourceFormat {
    /// Pick the format from a file name: `.json` is JSON, anything else is
    /// key-value text.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::KeyValue,
        }
    }
}

/// What to do with keys that are not in the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownKeyPolicy {
    /// Fail with `ConfigError::UnknownKey`.
    #[default]
    Reject,
    /// Log a warning and skip the assignment.
    Warn,
}

/// Configuration loader with layered approach.
///
/// The loader applies configuration in layers, with later layers overriding
/// earlier ones:
/// 1. Default values (built into the code)
/// 2. Settings file (key-value or JSON)
/// 3. Environment variables
///
/// A failure in any layer discards the whole load; no partially applied
/// record is ever returned.
///
/// # Example
///
/// ```no_run
/// use fmtrc_config::ConfigLoader;
///
/// # fn main() -> Result<(), fmtrc_config::ConfigError> {
/// let config = ConfigLoader::new()
///     .with_discovery(".")?
///     .with_env_prefix("FMTRC")
///     .load()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConfigLoader {
    config: FormatConfig,
    env_prefix: Option<String>,
    unknown_keys: UnknownKeyPolicy,
    source: Option<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new configuration loader.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: FormatConfig::default(),
            env_prefix: None,
            unknown_keys: UnknownKeyPolicy::default(),
            source: None,
        }
    }

    /// Reset to default configuration values.
    ///
    /// This is the state after `new()`, but can be chained for clarity.
    #[must_use]
    pub fn with_defaults(mut self) -> Self {
        self.config = FormatConfig::default();
        self
    }

    /// Set the unknown key policy.
    ///
    /// Applies to sources added after this call and to environment
    /// overrides.
    ///
    /// # Example
    ///
    /// ```
    /// use fmtrc_config::{ConfigLoader, SourceFormat, UnknownKeyPolicy};
    ///
    /// let config = ConfigLoader::new()
    ///     .unknown_keys(UnknownKeyPolicy::Warn)
    ///     .with_string("bullet_char = '*'\ntab_size = 4\n", SourceFormat::KeyValue)
    ///     .unwrap()
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(config.tab_size, 4);
    /// ```
    #[must_use]
    pub fn unknown_keys(mut self, policy: UnknownKeyPolicy) -> Self {
        self.unknown_keys = policy;
        self
    }

    /// Load configuration from a settings file.
    ///
    /// The format is determined by the file extension.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - The file does not exist
    /// - The file cannot be read
    /// - The file is not valid key-value text or JSON
    /// - A key is unknown (under `UnknownKeyPolicy::Reject`)
    /// - A value fails its type or domain check
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> ConfigResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::file_not_found(path));
        }

        let bytes = fs::read(path).map_err(|e| ConfigError::read_error(path, e))?;
        debug!(path = %path.display(), bytes = bytes.len(), "read formatter settings");
        let content = decode(bytes)?;

        self.apply_source(&content, SourceFormat::from_path(path))?;
        self.source = Some(path.to_path_buf());

        Ok(self)
    }

    /// Load configuration from an optional file.
    ///
    /// If the file exists, loads it. If not, silently continues.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but fails to load.
    pub fn with_optional_file<P: AsRef<Path>>(self, path: P) -> ConfigResult<Self> {
        if path.as_ref().exists() {
            self.with_file(path)
        } else {
            Ok(self)
        }
    }

    /// Locate a settings file from `start` upwards and load it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotDiscovered` if no candidate file exists in
    /// `start` or any ancestor, or any error from [`with_file`](Self::with_file).
    pub fn with_discovery<P: AsRef<Path>>(self, start: P) -> ConfigResult<Self> {
        let start = start.as_ref();
        match discover(start) {
            Some(path) => self.with_file(path),
            None => Err(ConfigError::not_discovered(start)),
        }
    }

    /// Load configuration from a string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if parsing or validation of a value fails.
    ///
    /// # Example
    ///
    /// ```
    /// use fmtrc_config::{ConfigLoader, SourceFormat};
    ///
    /// let config = ConfigLoader::new()
    ///     .with_string(r#"{"line_width": 100}"#, SourceFormat::Json)
    ///     .unwrap()
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(config.line_width, 100);
    /// ```
    pub fn with_string(mut self, content: &str, format: SourceFormat) -> ConfigResult<Self> {
        self.apply_source(content, format)?;
        Ok(self)
    }

    /// Set environment variable prefix for overrides.
    ///
    /// Environment variables use the format `PREFIX__KEY`, for example
    /// `FMTRC__LINE_WIDTH=100` or `FMTRC__ALWAYS_WRAP=add_library,set`.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_uppercase());
        self
    }

    /// Path of the settings file that was loaded, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Finalize and return the loaded configuration.
    ///
    /// Applies environment variable overrides (if a prefix was set) and
    /// validates the final configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if an environment override is invalid or the
    /// final record violates a cross-field constraint.
    ///
    /// # Example
    ///
    /// ```
    /// use fmtrc_config::ConfigLoader;
    ///
    /// let config = ConfigLoader::new().load().unwrap();
    /// assert_eq!(config.line_width, 80);
    /// ```
    pub fn load(mut self) -> ConfigResult<FormatConfig> {
        if let Some(prefix) = self.env_prefix.take() {
            self.apply_env_overrides(&prefix)?;
        }

        self.config.validate()?;

        match &self.source {
            Some(path) => info!(path = %path.display(), "formatter configuration loaded"),
            None => info!("formatter configuration loaded without a settings file"),
        }

        Ok(self.config)
    }

    fn apply_source(&mut self, content: &str, format: SourceFormat) -> ConfigResult<()> {
        match format {
            SourceFormat::KeyValue => {
                let mut seen = HashSet::new();
                for assignment in syntax::parse_document(content)? {
                    if !seen.insert(assignment.key.clone()) {
                        warn!(
                            key = %assignment.key,
                            line = assignment.line,
                            "key assigned more than once, last assignment wins"
                        );
                    }
                    self.assign(&assignment.key, &assignment.value, Some(assignment.line))?;
                }
            }
            SourceFormat::Json => {
                let document: serde_json::Value = serde_json::from_str(content)
                    .map_err(|e| ConfigError::malformed(e.line(), e.to_string()))?;
                let serde_json::Value::Object(members) = document else {
                    return Err(ConfigError::malformed(1, "expected a JSON object"));
                };
                for (key, value) in members {
                    if schema::field(&key).is_none() {
                        self.skip_unknown(ConfigError::unknown_key(key, None))?;
                        continue;
                    }
                    self.config.apply_json(&key, value)?;
                }
            }
        }

        Ok(())
    }

    fn assign(&mut self, key: &str, value: &Literal, line: Option<usize>) -> ConfigResult<()> {
        self.config
            .apply(key, value, line)
            .or_else(|e| self.skip_unknown(e))
    }

    // Under the warn policy an unknown key is logged and dropped.
    fn skip_unknown(&self, err: ConfigError) -> ConfigResult<()> {
        match err {
            ConfigError::UnknownKey { key, line }
                if self.unknown_keys == UnknownKeyPolicy::Warn =>
            {
                warn!(%key, ?line, "ignoring unknown configuration key");
                Ok(())
            }
            other => Err(other),
        }
    }

    // Apply environment variable overrides
    fn apply_env_overrides(&mut self, prefix: &str) -> ConfigResult<()> {
        let marker = format!("{prefix}__");
        let mut vars: Vec<(String, String)> = env::vars()
            .filter(|(k, _)| k.starts_with(&marker))
            .collect();
        vars.sort();

        for (key, value) in vars {
            self.apply_env_var(&key, &value, prefix)?;
        }

        Ok(())
    }

    // Apply a single environment variable
    fn apply_env_var(&mut self, var: &str, value: &str, prefix: &str) -> ConfigResult<()> {
        let name = var
            .strip_prefix(prefix)
            .and_then(|k| k.strip_prefix("__"))
            .ok_or_else(|| ConfigError::env_parse(var, "invalid key format"))?;
        let key = name.to_lowercase();

        let Some(spec) = schema::field(&key) else {
            return self.skip_unknown(ConfigError::unknown_key(key, None));
        };

        let literal = env_literal(spec.kind, value)
            .ok_or_else(|| ConfigError::env_parse(var, expected(spec.kind)))?;

        debug!(%var, %key, "applying environment override");
        self.config.apply(&key, &literal, None).map_err(|e| match e {
            ConfigError::InvalidValue { reason, .. } => ConfigError::env_parse(var, reason),
            other => other,
        })
    }
}

// Settings files are UTF-8; undecodable bytes are a syntax error on the
// line where decoding stopped.
fn decode(bytes: Vec<u8>) -> ConfigResult<String> {
    String::from_utf8(bytes).map_err(|e| {
        let valid = &e.as_bytes()[..e.utf8_error().valid_up_to()];
        let line = valid.iter().filter(|b| **b == b'\n').count() + 1;
        ConfigError::malformed(line, format!("invalid UTF-8: {}", e.utf8_error()))
    })
}

fn env_literal(kind: FieldKind, value: &str) -> Option<Literal> {
    let value = value.trim();
    match kind {
        FieldKind::PositiveInt | FieldKind::NonNegativeInt => {
            value.parse().ok().map(Literal::Integer)
        }
        FieldKind::Bool => parse_bool(value).map(Literal::Bool),
        FieldKind::Case | FieldKind::LineEnding => Some(Literal::Str(value.to_string())),
        FieldKind::StringList => Some(Literal::List(
            value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| Literal::Str(s.to_string()))
                .collect(),
        )),
    }
}

fn expected(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::PositiveInt | FieldKind::NonNegativeInt => "expected integer",
        FieldKind::Bool => "expected boolean",
        FieldKind::Case | FieldKind::LineEnding => "expected name",
        FieldKind::StringList => "expected comma-separated list",
    }
}

/// Parse a boolean from a string.
fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
