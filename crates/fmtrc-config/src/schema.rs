//! Configuration schema types.
//!
//! This module defines the fixed set of recognised keys, their value kinds
//! and the enumerations some of them take.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Letter case applied to keywords or command names.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CaseStyle {
    /// Force upper case.
    Upper,
    /// Force lower case.
    Lower,
    /// Leave as written.
    #[default]
    Unchanged,
}

impl CaseStyle {
    /// Every variant, in the order they are documented.
    pub const ALL: [Self; 3] = [Self::Upper, Self::Lower, Self::Unchanged];

    /// Spelling used in configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upper => "upper",
            Self::Lower => "lower",
            Self::Unchanged => "unchanged",
        }
    }
}

impl fmt::Display for CaseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Line terminator written by the formatter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// `\n`.
    #[default]
    Unix,
    /// `\r\n`.
    Windows,
    /// Detect from the input file.
    Auto,
}

impl LineEnding {
    /// Every variant, in the order they are documented.
    pub const ALL: [Self; 3] = [Self::Unix, Self::Windows, Self::Auto];

    /// Spelling used in configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unix => "unix",
            Self::Windows => "windows",
            Self::Auto => "auto",
        }
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value kind accepted by a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Integer greater than zero.
    PositiveInt,
    /// Integer greater than or equal to zero.
    NonNegativeInt,
    /// `True` / `False`.
    Bool,
    /// One of [`CaseStyle`].
    Case,
    /// One of [`LineEnding`].
    LineEnding,
    /// Sequence of quoted strings.
    StringList,
}

/// Group a key is rendered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// General layout options.
    Formatting,
    /// Case and sorting of commands.
    Commands,
    /// Argument grouping and wrapping.
    Wrapping,
    /// Everything else.
    Misc,
}

impl Section {
    /// Sections in rendering order.
    pub const ALL: [Self; 4] = [Self::Formatting, Self::Commands, Self::Wrapping, Self::Misc];

    /// Banner title.
    pub fn title(self) -> &'static str {
        match self {
            Self::Formatting => "Formatting options",
            Self::Commands => "Command-specific formatting",
            Self::Wrapping => "Argument grouping & wrapping",
            Self::Misc => "Miscellaneous",
        }
    }
}

/// Description of one recognised key.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Key as written in the file.
    pub key: &'static str,
    /// Accepted value kind.
    pub kind: FieldKind,
    /// Rendering group.
    pub section: Section,
    /// One-line description.
    pub help: &'static str,
}

/// All recognised keys in canonical order.
pub const FIELDS: &[FieldSpec] = &[
    FieldSpec {
        key: "line_width",
        kind: FieldKind::PositiveInt,
        section: Section::Formatting,
        help: "How wide to allow formatted listfiles to be",
    },
    FieldSpec {
        key: "tab_size",
        kind: FieldKind::PositiveInt,
        section: Section::Formatting,
        help: "How many spaces to tab for indent",
    },
    FieldSpec {
        key: "use_tabchars",
        kind: FieldKind::Bool,
        section: Section::Formatting,
        help: "Indent with tab characters instead of spaces",
    },
    FieldSpec {
        key: "max_subgroups_hwrap",
        kind: FieldKind::NonNegativeInt,
        section: Section::Formatting,
        help: "Subgroups allowed before a statement is wrapped vertically",
    },
    FieldSpec {
        key: "separate_ctrl_name_with_space",
        kind: FieldKind::Bool,
        section: Section::Formatting,
        help: "Space between control statement names and parentheses",
    },
    FieldSpec {
        key: "separate_fn_name_with_space",
        kind: FieldKind::Bool,
        section: Section::Formatting,
        help: "Space between function or macro names and parentheses",
    },
    FieldSpec {
        key: "keyword_case",
        kind: FieldKind::Case,
        section: Section::Commands,
        help: "Case applied to keywords",
    },
    FieldSpec {
        key: "command_case",
        kind: FieldKind::Case,
        section: Section::Commands,
        help: "Case applied to command names",
    },
    FieldSpec {
        key: "always_wrap",
        kind: FieldKind::StringList,
        section: Section::Commands,
        help: "Commands that are always wrapped vertically",
    },
    FieldSpec {
        key: "enable_sort",
        kind: FieldKind::Bool,
        section: Section::Commands,
        help: "Sort argument lists known to be sortable",
    },
    FieldSpec {
        key: "autosort",
        kind: FieldKind::Bool,
        section: Section::Commands,
        help: "Infer sortability of unannotated argument lists",
    },
    FieldSpec {
        key: "dangle_parens",
        kind: FieldKind::Bool,
        section: Section::Wrapping,
        help: "Put the closing parenthesis of a wrapped statement on its own line",
    },
    FieldSpec {
        key: "max_pargs_hwrap",
        kind: FieldKind::NonNegativeInt,
        section: Section::Wrapping,
        help: "Positional arguments allowed before a group is wrapped vertically",
    },
    FieldSpec {
        key: "min_prefix_chars",
        kind: FieldKind::NonNegativeInt,
        section: Section::Wrapping,
        help: "Statement names this short are never nested",
    },
    FieldSpec {
        key: "max_prefix_chars",
        kind: FieldKind::NonNegativeInt,
        section: Section::Wrapping,
        help: "Statement names this long are always nested",
    },
    FieldSpec {
        key: "max_lines_hwrap",
        kind: FieldKind::NonNegativeInt,
        section: Section::Wrapping,
        help: "Lines a horizontal wrap may take before falling back to vertical",
    },
    FieldSpec {
        key: "line_ending",
        kind: FieldKind::LineEnding,
        section: Section::Misc,
        help: "Line ending style written to output",
    },
];

/// Look up a key in the schema.
pub fn field(key: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|f| f.key == key)
}

pub(crate) fn default_line_width() -> u32 {
    80
}

pub(crate) fn default_tab_size() -> u32 {
    2
}

pub(crate) fn default_max_subgroups_hwrap() -> u32 {
    2
}

pub(crate) fn default_max_pargs_hwrap() -> u32 {
    6
}

pub(crate) fn default_min_prefix_chars() -> u32 {
    4
}

pub(crate) fn default_max_prefix_chars() -> u32 {
    10
}

pub(crate) fn default_max_lines_hwrap() -> u32 {
    2
}

pub(crate) fn default_enable_sort() -> bool {
    true
}
