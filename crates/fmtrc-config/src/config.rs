//! Main configuration type.
//!
//! This module provides the [`FormatConfig`] record and the per-key
//! validation that populates it.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::{self, FieldKind};
use crate::syntax::Literal;
use crate::{CaseStyle, ConfigError, ConfigLoader, ConfigResult, LineEnding};

/// Resolved formatter configuration.
///
/// Every key is optional in the settings file; absent keys keep the default
/// shown on each field. Use [`ConfigLoader`] to populate one from a file, a
/// string, or the environment.
///
/// # Example
///
/// ```
/// use fmtrc_config::{CaseStyle, FormatConfig};
///
/// let config = FormatConfig::default();
/// assert_eq!(config.line_width, 80);
/// assert_eq!(config.keyword_case, CaseStyle::Unchanged);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FormatConfig {
    /// Maximum line width. Default 80.
    #[serde(default = "schema::default_line_width")]
    pub line_width: u32,
    /// Spaces per indent level. Default 2.
    #[serde(default = "schema::default_tab_size")]
    pub tab_size: u32,
    /// Indent with tab characters. Default `false`.
    #[serde(default)]
    pub use_tabchars: bool,
    /// Subgroups allowed before wrapping vertically. Default 2.
    #[serde(default = "schema::default_max_subgroups_hwrap")]
    pub max_subgroups_hwrap: u32,
    /// Space after control statement names. Default `false`.
    #[serde(default)]
    pub separate_ctrl_name_with_space: bool,
    /// Space after function and macro names. Default `false`.
    #[serde(default)]
    pub separate_fn_name_with_space: bool,
    /// Case applied to keywords. Default `unchanged`.
    #[serde(default)]
    pub keyword_case: CaseStyle,
    /// Case applied to command names. Default `unchanged`.
    #[serde(default)]
    pub command_case: CaseStyle,
    /// Commands that always wrap. Default empty.
    #[serde(default)]
    pub always_wrap: Vec<String>,
    /// Sort sortable argument lists. Default `true`.
    #[serde(default = "schema::default_enable_sort")]
    pub enable_sort: bool,
    /// Infer sortability of unannotated lists. Default `false`.
    #[serde(default)]
    pub autosort: bool,
    /// Closing parenthesis on its own line. Default `false`.
    #[serde(default)]
    pub dangle_parens: bool,
    /// Positional arguments before wrapping. Default 6.
    #[serde(default = "schema::default_max_pargs_hwrap")]
    pub max_pargs_hwrap: u32,
    /// Minimum statement name length for nesting. Default 4.
    #[serde(default = "schema::default_min_prefix_chars")]
    pub min_prefix_chars: u32,
    /// Statement name length that forces nesting. Default 10.
    #[serde(default = "schema::default_max_prefix_chars")]
    pub max_prefix_chars: u32,
    /// Lines a horizontal wrap may take. Default 2.
    #[serde(default = "schema::default_max_lines_hwrap")]
    pub max_lines_hwrap: u32,
    /// Output line ending. Default `unix`.
    #[serde(default)]
    pub line_ending: LineEnding,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            line_width: schema::default_line_width(),
            tab_size: schema::default_tab_size(),
            use_tabchars: false,
            max_subgroups_hwrap: schema::default_max_subgroups_hwrap(),
            separate_ctrl_name_with_space: false,
            separate_fn_name_with_space: false,
            keyword_case: CaseStyle::default(),
            command_case: CaseStyle::default(),
            always_wrap: Vec::new(),
            enable_sort: schema::default_enable_sort(),
            autosort: false,
            dangle_parens: false,
            max_pargs_hwrap: schema::default_max_pargs_hwrap(),
            min_prefix_chars: schema::default_min_prefix_chars(),
            max_prefix_chars: schema::default_max_prefix_chars(),
            max_lines_hwrap: schema::default_max_lines_hwrap(),
            line_ending: LineEnding::default(),
        }
    }
}

impl FormatConfig {
    /// Load and validate a settings file.
    ///
    /// Unknown keys are rejected. Use [`ConfigLoader`] for other policies or
    /// environment overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is missing or unreadable, or if its
    /// contents fail to parse or validate.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        ConfigLoader::new().with_file(path)?.load()
    }

    /// Parse and validate settings given as key-value text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the text fails to parse or validate.
    ///
    /// # Example
    ///
    /// ```
    /// use fmtrc_config::FormatConfig;
    ///
    /// let config = FormatConfig::from_source("line_width = 120\ntab_size = 4\n").unwrap();
    /// assert_eq!(config.line_width, 120);
    /// assert_eq!(config.tab_size, 4);
    /// ```
    pub fn from_source(source: &str) -> ConfigResult<Self> {
        ConfigLoader::new()
            .with_string(source, crate::SourceFormat::KeyValue)?
            .load()
    }

    /// Names of every recognised key, in canonical order.
    pub fn keys() -> impl Iterator<Item = &'static str> {
        schema::FIELDS.iter().map(|f| f.key)
    }

    /// Validate and assign a single value.
    ///
    /// `line` is the 1-based source line used in error messages, or `None`
    /// when the value did not come from a file line.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownKey` if `key` is not in the schema and
    /// `ConfigError::InvalidValue` if the literal has the wrong type or is
    /// outside the key's domain.
    pub fn apply(&mut self, key: &str, value: &Literal, line: Option<usize>) -> ConfigResult<()> {
        let spec = schema::field(key).ok_or_else(|| ConfigError::unknown_key(key, line))?;
        let field = Field { key, line };

        let value = match (spec.kind, value) {
            (FieldKind::PositiveInt, Literal::Integer(n)) => Value::from(field.integer(*n, 1)?),
            (FieldKind::NonNegativeInt, Literal::Integer(n)) => Value::from(field.integer(*n, 0)?),
            (_, literal) => field.json(literal)?,
        };

        self.set(&field, value)
    }

    /// Assign a JSON value to a known key.
    pub(crate) fn apply_json(&mut self, key: &str, value: Value) -> ConfigResult<()> {
        self.set(&Field { key, line: None }, value)
    }

    /// Check cross-field constraints.
    ///
    /// Per-key domains are enforced by [`apply`](Self::apply); this repeats
    /// the positivity checks for records built in code or read from JSON and
    /// enforces `max_prefix_chars >= min_prefix_chars`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.line_width == 0 {
            return Err(ConfigError::invalid_value("line_width", "must be greater than 0"));
        }

        if self.tab_size == 0 {
            return Err(ConfigError::invalid_value("tab_size", "must be greater than 0"));
        }

        if self.max_prefix_chars < self.min_prefix_chars {
            return Err(ConfigError::invalid_value(
                "max_prefix_chars",
                format!(
                    "{} is less than min_prefix_chars ({})",
                    self.max_prefix_chars, self.min_prefix_chars
                ),
            ));
        }

        Ok(())
    }

    // Replace one member of the serialized record and deserialize it back.
    fn set(&mut self, field: &Field<'_>, value: Value) -> ConfigResult<()> {
        let mut record = serde_json::to_value(&*self).map_err(|e| field.invalid(e.to_string()))?;
        if let Value::Object(members) = &mut record {
            members.insert(field.key.to_string(), value);
        }
        *self = serde_json::from_value(record).map_err(|e| field.invalid(e.to_string()))?;
        Ok(())
    }
}

// Key and line of the value being checked, for error reporting.
struct Field<'a> {
    key: &'a str,
    line: Option<usize>,
}

impl Field<'_> {
    fn invalid(&self, reason: impl Into<String>) -> ConfigError {
        let reason = reason.into();
        match self.line {
            Some(line) => ConfigError::invalid_value(self.key, format!("{reason} (line {line})")),
            None => ConfigError::invalid_value(self.key, reason),
        }
    }

    fn integer(&self, n: i128, min: i128) -> ConfigResult<u32> {
        if n < min {
            return Err(if min == 0 {
                self.invalid(format!("{n} is negative"))
            } else {
                self.invalid(format!("must be at least {min}, got {n}"))
            });
        }
        u32::try_from(n).map_err(|_| self.invalid(format!("{n} exceeds {}", u32::MAX)))
    }

    fn json(&self, value: &Literal) -> ConfigResult<Value> {
        match value {
            Literal::Integer(n) => i64::try_from(*n)
                .map(Value::from)
                .map_err(|_| self.invalid(format!("{n} is out of range"))),
            Literal::Bool(b) => Ok(Value::Bool(*b)),
            Literal::Str(s) => Ok(Value::String(s.clone())),
            Literal::List(items) => items
                .iter()
                .map(|item| self.json(item))
                .collect::<ConfigResult<Vec<_>>>()
                .map(Value::Array),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn str_lit(s: &str) -> Literal {
        Literal::Str(s.to_string())
    }

    #[test]
    fn test_default_config() {
        let config = FormatConfig::default();
        assert_eq!(config.line_width, 80);
        assert_eq!(config.tab_size, 2);
        assert!(!config.use_tabchars);
        assert_eq!(config.max_subgroups_hwrap, 2);
        assert_eq!(config.keyword_case, CaseStyle::Unchanged);
        assert_eq!(config.command_case, CaseStyle::Unchanged);
        assert!(config.always_wrap.is_empty());
        assert!(config.enable_sort);
        assert!(!config.autosort);
        assert_eq!(config.max_pargs_hwrap, 6);
        assert_eq!(config.min_prefix_chars, 4);
        assert_eq!(config.max_prefix_chars, 10);
        assert_eq!(config.line_ending, LineEnding::Unix);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_apply_each_kind() {
        let mut config = FormatConfig::default();
        config.apply("line_width", &Literal::Integer(120), Some(1)).unwrap();
        config.apply("max_lines_hwrap", &Literal::Integer(0), Some(2)).unwrap();
        config.apply("dangle_parens", &Literal::Bool(true), Some(3)).unwrap();
        config.apply("command_case", &str_lit("lower"), Some(4)).unwrap();
        config.apply("line_ending", &str_lit("windows"), Some(5)).unwrap();
        let wrap = Literal::List(vec![str_lit("set")]);
        config.apply("always_wrap", &wrap, Some(6)).unwrap();

        assert_eq!(config.line_width, 120);
        assert_eq!(config.max_lines_hwrap, 0);
        assert!(config.dangle_parens);
        assert_eq!(config.command_case, CaseStyle::Lower);
        assert_eq!(config.keyword_case, CaseStyle::Unchanged);
        assert_eq!(config.line_ending, LineEnding::Windows);
        assert_eq!(config.always_wrap, vec!["set"]);
    }

    #[test]
    fn test_apply_unknown_key() {
        let mut config = FormatConfig::default();
        let err = config.apply("line_widht", &Literal::Integer(1), Some(9)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownKey);
        assert!(err.to_string().contains("line 9"));
    }

    #[test]
    fn test_apply_zero_positive_int_rejected() {
        let mut config = FormatConfig::default();
        let err = config.apply("tab_size", &Literal::Integer(0), Some(2)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert!(err.to_string().contains("tab_size"));
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_apply_negative_rejected() {
        let mut config = FormatConfig::default();
        let err = config.apply("max_pargs_hwrap", &Literal::Integer(-1), Some(1)).unwrap_err();
        assert!(err.to_string().contains("negative"));
    }

    #[test]
    fn test_apply_overflow_rejected() {
        let mut config = FormatConfig::default();
        let err = config
            .apply("line_width", &Literal::Integer(i128::from(u32::MAX) + 1), Some(1))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert!(err.to_string().contains("exceeds 4294967295"));
    }

    #[test]
    fn test_integer_wider_than_i64_is_invalid_value() {
        let err = FormatConfig::from_source("line_width = 99999999999999999999\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert!(err.to_string().contains("exceeds 4294967295"));
        assert!(err.to_string().contains("line 1"));

        let source = "max_lines_hwrap = -99999999999999999999\n";
        let err = FormatConfig::from_source(source).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert!(err.to_string().contains("negative"));
    }

    #[test]
    fn test_apply_type_mismatch() {
        let mut config = FormatConfig::default();
        let err = config.apply("line_width", &str_lit("120"), Some(1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert!(err.to_string().contains("expected u32"));

        let err = config.apply("use_tabchars", &Literal::Integer(1), Some(1)).unwrap_err();
        assert!(err.to_string().contains("expected a boolean"));

        let err = config.apply("tab_size", &Literal::Bool(true), Some(1)).unwrap_err();
        assert!(err.to_string().contains("boolean"));
        assert_eq!(config, FormatConfig::default());
    }

    #[test]
    fn test_apply_enum_outside_domain() {
        let mut config = FormatConfig::default();
        let err = config.apply("keyword_case", &str_lit("sideways"), Some(3)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert!(err.to_string().contains("sideways"));
        assert!(err.to_string().contains("line 3"));
        assert_eq!(config.keyword_case, CaseStyle::Unchanged);
    }

    #[test]
    fn test_apply_list_with_non_string() {
        let mut config = FormatConfig::default();
        let value = Literal::List(vec![str_lit("a"), Literal::Integer(2)]);
        let err = config.apply("always_wrap", &value, Some(1)).unwrap_err();
        assert!(err.to_string().contains("expected a string"));
        assert!(config.always_wrap.is_empty());
    }

    #[test]
    fn test_validate_prefix_bounds() {
        let equal = FormatConfig {
            min_prefix_chars: 7,
            max_prefix_chars: 7,
            ..Default::default()
        };
        assert!(equal.validate().is_ok());

        let inverted = FormatConfig {
            min_prefix_chars: 8,
            max_prefix_chars: 7,
            ..Default::default()
        };
        let err = inverted.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert!(err.to_string().contains("max_prefix_chars"));
    }

    #[test]
    fn test_validate_zero_width_built_in_code() {
        let config = FormatConfig {
            line_width: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_keys_cover_every_field() {
        let mut config = FormatConfig::default();
        for key in FormatConfig::keys() {
            let value = match schema::field(key).map(|f| f.kind) {
                Some(FieldKind::PositiveInt | FieldKind::NonNegativeInt) => Literal::Integer(10),
                Some(FieldKind::Bool) => Literal::Bool(true),
                Some(FieldKind::Case) => str_lit("upper"),
                Some(FieldKind::LineEnding) => str_lit("auto"),
                Some(FieldKind::StringList) => Literal::List(vec![]),
                None => unreachable!(),
            };
            config.apply(key, &value, None).unwrap();
        }
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_serialization() {
        let json = serde_json::to_value(FormatConfig::default()).unwrap();
        assert_eq!(json["line_width"], 80);
        assert_eq!(json["keyword_case"], "unchanged");
        assert_eq!(json["always_wrap"], serde_json::json!([]));
        assert_eq!(json.as_object().unwrap().len(), FormatConfig::keys().count());
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: FormatConfig =
            serde_json::from_str(r#"{"line_width": 100, "command_case": "lower"}"#).unwrap();
        assert_eq!(
            config,
            FormatConfig {
                line_width: 100,
                command_case: CaseStyle::Lower,
                ..Default::default()
            }
        );

        let empty: FormatConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, FormatConfig::default());
    }

    #[test]
    fn test_deserialize_rejects_unknown_fields() {
        assert!(serde_json::from_str::<FormatConfig>(r#"{"tabsize": 4}"#).is_err());
    }
}
