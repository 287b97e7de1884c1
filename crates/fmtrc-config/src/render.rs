//! Rendering a record back to settings-file text.

use std::fmt;

use serde_json::Value;

use crate::schema::{Section, FIELDS};
use crate::syntax::Literal;
use crate::FormatConfig;

const BANNER: &str = "# ---------------------------------------------";

impl FormatConfig {
    /// Value of `key` as a literal, or `None` for keys outside the schema.
    pub fn literal(&self, key: &str) -> Option<Literal> {
        let record = serde_json::to_value(self).ok()?;
        record.get(key).and_then(literal_from_json)
    }

    /// Render the record as a settings file.
    ///
    /// Keys are grouped under section banners with their description as an
    /// inline comment. Parsing the output yields an equal record.
    ///
    /// # Example
    ///
    /// ```
    /// use fmtrc_config::FormatConfig;
    ///
    /// let config = FormatConfig { line_width: 100, ..Default::default() };
    /// let text = config.to_source();
    /// assert!(text.contains("line_width = 100"));
    /// assert_eq!(FormatConfig::from_source(&text).unwrap(), config);
    /// ```
    pub fn to_source(&self) -> String {
        let record = serde_json::to_value(self).unwrap_or_default();
        let mut out = String::new();

        for (i, section) in Section::ALL.into_iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&format!("{BANNER}\n# {}\n{BANNER}\n", section.title()));

            for spec in FIELDS.iter().filter(|f| f.section == section) {
                if let Some(value) = record.get(spec.key).and_then(literal_from_json) {
                    let assignment = format!("{} = {value}", spec.key);
                    out.push_str(&format!("{assignment:<40} # {}\n", spec.help));
                }
            }
        }

        out
    }
}

impl fmt::Display for FormatConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_source())
    }
}

fn literal_from_json(value: &Value) -> Option<Literal> {
    match value {
        Value::Bool(b) => Some(Literal::Bool(*b)),
        Value::Number(n) => n.as_i64().map(|n| Literal::Integer(n.into())),
        Value::String(s) => Some(Literal::Str(s.clone())),
        Value::Array(items) => items
            .iter()
            .map(literal_from_json)
            .collect::<Option<Vec<_>>>()
            .map(Literal::List),
        Value::Null | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CaseStyle, LineEnding};

    #[test]
    fn test_defaults_render_every_key() {
        let text = FormatConfig::default().to_source();
        for key in FormatConfig::keys() {
            assert!(text.contains(&format!("{key} = ")), "{key} missing");
        }
        assert!(text.contains("use_tabchars = False"));
        assert!(text.contains("keyword_case = 'unchanged'"));
        assert!(text.contains("always_wrap = []"));
        assert!(text.contains("# Argument grouping & wrapping"));
    }

    #[test]
    fn test_render_reparses_to_equal_record() {
        let config = FormatConfig {
            line_width: 120,
            tab_size: 4,
            keyword_case: CaseStyle::Upper,
            command_case: CaseStyle::Lower,
            always_wrap: vec!["add_library".to_string(), "it's # odd".to_string()],
            autosort: true,
            min_prefix_chars: 3,
            max_prefix_chars: 3,
            line_ending: LineEnding::Auto,
            ..Default::default()
        };

        let reparsed = FormatConfig::from_source(&config.to_source()).unwrap();
        assert_eq!(reparsed, config);
    }

    #[test]
    fn test_display_matches_to_source() {
        let config = FormatConfig::default();
        assert_eq!(config.to_string(), config.to_source());
    }

    #[test]
    fn test_literal_lookup() {
        let config = FormatConfig {
            always_wrap: vec!["set".to_string()],
            ..Default::default()
        };
        assert_eq!(config.literal("tab_size"), Some(Literal::Integer(2)));
        assert_eq!(config.literal("enable_sort"), Some(Literal::Bool(true)));
        assert_eq!(
            config.literal("line_ending"),
            Some(Literal::Str("unix".to_string()))
        );
        assert_eq!(
            config.literal("always_wrap"),
            Some(Literal::List(vec![Literal::Str("set".to_string())]))
        );
        assert!(config.literal("nope").is_none());
    }
}
