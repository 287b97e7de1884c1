//! Key-value assignment syntax.
//!
//! Formatter settings files are written as a flat list of
//! `identifier = literal` assignments, one per logical line, with `#`
//! starting a comment. This module turns that text into a list of
//! [`Assignment`]s without looking at what the keys mean; the schema layer
//! decides whether a key exists and whether its value fits.
//!
//! Supported literals:
//!
//! | Literal | Example |
//! |---------|---------|
//! | Integer | `120`, `-1`, `1_000` |
//! | Boolean | `True`, `False` (`true` / `false` also accepted) |
//! | String  | `'upper'`, `"unix"` |
//! | Sequence | `[]`, `['add_library', 'target_sources']` |
//!
//! A bracketed sequence may continue across physical lines; it still forms a
//! single logical line.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use crate::{ConfigError, ConfigResult};

/// A parsed value literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    /// Decimal integer. Magnitudes beyond `i128` saturate.
    Integer(i128),
    /// `True` or `False`.
    Bool(bool),
    /// Quoted string with escapes resolved.
    Str(String),
    /// Bracketed sequence.
    List(Vec<Literal>),
}

impl Literal {
    /// Human-readable name of the literal's type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::Bool(_) => "boolean",
            Self::Str(_) => "string",
            Self::List(_) => "sequence",
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::Str(s) => {
                f.write_str("'")?;
                for c in s.chars() {
                    match c {
                        '\\' => f.write_str("\\\\")?,
                        '\'' => f.write_str("\\'")?,
                        '\n' => f.write_str("\\n")?,
                        '\t' => f.write_str("\\t")?,
                        c => write!(f, "{c}")?,
                    }
                }
                f.write_str("'")
            }
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

/// A single `key = value` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// The assigned identifier.
    pub key: String,
    /// The parsed right-hand side.
    pub value: Literal,
    /// 1-based line the assignment starts on.
    pub line: usize,
}

/// Parse a settings document into its assignments, in source order.
///
/// # Errors
///
/// Returns [`ConfigError::MalformedSyntax`] with the offending line number
/// when the text is not a sequence of assignments.
///
/// # Example
///
/// ```
/// use fmtrc_config::syntax::{parse_document, Literal};
///
/// let assignments = parse_document("tab_size = 4  # indent\n").unwrap();
/// assert_eq!(assignments[0].key, "tab_size");
/// assert_eq!(assignments[0].value, Literal::Integer(4));
/// ```
pub fn parse_document(source: &str) -> ConfigResult<Vec<Assignment>> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    Scanner::new(source).document()
}

struct Scanner<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().peekable(),
            line: 1,
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next();
        if c == Some('\n') {
            self.line += 1;
        }
        c
    }

    fn document(mut self) -> ConfigResult<Vec<Assignment>> {
        let mut assignments = Vec::new();

        loop {
            self.skip_blanks();
            match self.peek() {
                None => break,
                Some('\n') => {
                    self.bump();
                }
                Some('#') => self.skip_comment(),
                Some(c) if is_ident_start(c) => assignments.push(self.assignment()?),
                Some(c) => {
                    return Err(ConfigError::malformed(
                        self.line,
                        format!("expected an identifier, found '{c}'"),
                    ))
                }
            }
        }

        Ok(assignments)
    }

    fn assignment(&mut self) -> ConfigResult<Assignment> {
        let line = self.line;
        let key = self.identifier();

        self.skip_blanks();
        if self.peek() != Some('=') {
            return Err(ConfigError::malformed(line, format!("expected '=' after '{key}'")));
        }
        self.bump();
        self.skip_blanks();

        let value = self.value()?;

        self.skip_blanks();
        match self.peek() {
            None | Some('\n') => {}
            Some('#') => self.skip_comment(),
            Some(c) => {
                return Err(ConfigError::malformed(
                    self.line,
                    format!("unexpected '{c}' after value of '{key}'"),
                ))
            }
        }

        Ok(Assignment { key, value, line })
    }

    fn value(&mut self) -> ConfigResult<Literal> {
        match self.peek() {
            Some(q @ ('\'' | '"')) => self.string(q),
            Some('[') => self.list(),
            Some(c) if c.is_ascii_digit() || c == '-' || c == '+' => self.integer(),
            Some(c) if is_ident_start(c) => {
                let word = self.identifier();
                match word.as_str() {
                    "True" | "true" => Ok(Literal::Bool(true)),
                    "False" | "false" => Ok(Literal::Bool(false)),
                    _ => Err(ConfigError::malformed(
                        self.line,
                        format!("unexpected identifier '{word}', strings must be quoted"),
                    )),
                }
            }
            None | Some('\n' | '#') => Err(ConfigError::malformed(self.line, "expected a value")),
            Some(c) => Err(ConfigError::malformed(
                self.line,
                format!("unexpected character '{c}'"),
            )),
        }
    }

    fn string(&mut self, quote: char) -> ConfigResult<Literal> {
        let line = self.line;
        self.bump();
        let mut out = String::new();

        loop {
            match self.peek() {
                None | Some('\n') => {
                    return Err(ConfigError::malformed(line, "unterminated string"));
                }
                Some(c) if c == quote => {
                    self.bump();
                    return Ok(Literal::Str(out));
                }
                Some('\\') => {
                    self.bump();
                    match self.peek() {
                        None | Some('\n') => {
                            return Err(ConfigError::malformed(line, "unterminated string"));
                        }
                        Some(escaped) => {
                            self.bump();
                            match escaped {
                                'n' => out.push('\n'),
                                't' => out.push('\t'),
                                '\\' | '\'' | '"' => out.push(escaped),
                                other => {
                                    out.push('\\');
                                    out.push(other);
                                }
                            }
                        }
                    }
                }
                Some(c) => {
                    self.bump();
                    out.push(c);
                }
            }
        }
    }

    fn list(&mut self) -> ConfigResult<Literal> {
        let open_line = self.line;
        self.bump();
        let mut items = Vec::new();

        loop {
            self.skip_layout();
            match self.peek() {
                None => return Err(ConfigError::malformed(open_line, "unclosed '['")),
                Some(']') => {
                    self.bump();
                    break;
                }
                Some(_) => {}
            }

            items.push(self.value()?);

            self.skip_layout();
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some(']') => {
                    self.bump();
                    break;
                }
                None => return Err(ConfigError::malformed(open_line, "unclosed '['")),
                Some(c) => {
                    return Err(ConfigError::malformed(
                        self.line,
                        format!("expected ',' or ']' in sequence, found '{c}'"),
                    ))
                }
            }
        }

        Ok(Literal::List(items))
    }

    fn integer(&mut self) -> ConfigResult<Literal> {
        let line = self.line;
        let mut text = String::new();

        if let Some(sign @ ('-' | '+')) = self.peek() {
            self.bump();
            text.push(sign);
        }

        let mut digits = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || c == '_' {
                self.bump();
                digits.push(c);
            } else {
                break;
            }
        }

        if digits.is_empty()
            || digits.starts_with('_')
            || digits.ends_with('_')
            || digits.contains("__")
        {
            return Err(ConfigError::malformed(line, "invalid integer literal"));
        }
        if let Some(c) = self.peek() {
            if c == '.' || is_ident_continue(c) {
                return Err(ConfigError::malformed(
                    line,
                    format!("invalid integer literal '{text}{digits}{c}...'"),
                ));
            }
        }

        text.extend(digits.chars().filter(|c| *c != '_'));
        let n = text.parse::<i128>().unwrap_or(if text.starts_with('-') {
            i128::MIN
        } else {
            i128::MAX
        });
        Ok(Literal::Integer(n))
    }

    fn identifier(&mut self) -> String {
        let mut ident = String::new();
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.bump();
                ident.push(c);
            } else {
                break;
            }
        }
        ident
    }

    // Spaces and tabs only; newlines end a logical line.
    fn skip_blanks(&mut self) {
        while let Some(' ' | '\t' | '\r' | '\x0c') = self.peek() {
            self.bump();
        }
    }

    // Inside brackets newlines and comments are layout.
    fn skip_layout(&mut self) {
        loop {
            match self.peek() {
                Some(' ' | '\t' | '\r' | '\x0c' | '\n') => {
                    self.bump();
                }
                Some('#') => self.skip_comment(),
                _ => break,
            }
        }
    }

    fn skip_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.bump();
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
