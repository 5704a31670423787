//! Periodic note filename formats.
//!
//! # Responsibility
//! - Compile moment-style filename formats (`YYYY-MM-DD`, `gggg-[W]ww`) into
//!   anchored matchers.
//! - Extract the represented date from a note's file stem.
//!
//! # Invariants
//! - Matching is anchored: the whole stem must match the format.
//! - Week formats resolve to the Monday of the ISO week.
//! - Each date field may appear at most once per format.

use crate::model::period::Granularity;
use chrono::{NaiveDate, Weekday};
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

const GROUP_YEAR: &str = "year";
const GROUP_MONTH: &str = "month";
const GROUP_DAY: &str = "day";
const GROUP_WEEK: &str = "week";

// Longest tokens first so `YYYY` wins over shorter prefixes.
const TOKENS: &[(&str, &str, &str)] = &[
    ("YYYY", GROUP_YEAR, r"\d{4}"),
    ("GGGG", GROUP_YEAR, r"\d{4}"),
    ("gggg", GROUP_YEAR, r"\d{4}"),
    ("MM", GROUP_MONTH, r"\d{2}"),
    ("DD", GROUP_DAY, r"\d{2}"),
    ("WW", GROUP_WEEK, r"\d{2}"),
    ("ww", GROUP_WEEK, r"\d{2}"),
    ("M", GROUP_MONTH, r"\d{1,2}"),
    ("D", GROUP_DAY, r"\d{1,2}"),
    ("W", GROUP_WEEK, r"\d{1,2}"),
    ("w", GROUP_WEEK, r"\d{1,2}"),
];

/// Format compilation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Format lacks a field required by its granularity.
    MissingField {
        format: String,
        field: &'static str,
    },
    /// A date field appears more than once.
    DuplicateField {
        format: String,
        field: &'static str,
    },
    /// `[` literal section without closing `]`.
    UnclosedLiteral(String),
    /// Generated pattern rejected by the regex engine.
    Pattern(String),
}

impl Display for FormatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { format, field } => {
                write!(f, "note format `{format}` has no {field} field")
            }
            Self::DuplicateField { format, field } => {
                write!(f, "note format `{format}` repeats the {field} field")
            }
            Self::UnclosedLiteral(format) => {
                write!(f, "note format `{format}` has an unclosed `[` literal")
            }
            Self::Pattern(message) => write!(f, "note format pattern is invalid: {message}"),
        }
    }
}

impl Error for FormatError {}

/// Compiled filename format for one periodic note kind.
#[derive(Debug, Clone)]
pub struct NoteFormat {
    matcher: Regex,
    has_week: bool,
}

impl NoteFormat {
    /// Compiles `format` for notes of the given granularity.
    ///
    /// # Errors
    /// - `MissingField` when no year is present, when a day format lacks
    ///   month or day, or when a week format has neither week nor month/day.
    /// - `DuplicateField` when a field repeats.
    pub fn compile(format: &str, granularity: Granularity) -> Result<Self, FormatError> {
        let mut pattern = String::from("^");
        let mut seen: Vec<&'static str> = Vec::new();
        let mut rest = format;

        while let Some(ch) = rest.chars().next() {
            if ch == '[' {
                let close = rest
                    .find(']')
                    .ok_or_else(|| FormatError::UnclosedLiteral(format.to_string()))?;
                pattern.push_str(&regex::escape(&rest[1..close]));
                rest = &rest[close + 1..];
                continue;
            }

            if let Some((token, group, digits)) =
                TOKENS.iter().find(|(token, _, _)| rest.starts_with(token))
            {
                if seen.contains(group) {
                    return Err(FormatError::DuplicateField {
                        format: format.to_string(),
                        field: *group,
                    });
                }
                seen.push(*group);
                pattern.push_str(&format!("(?P<{group}>{digits})"));
                rest = &rest[token.len()..];
                continue;
            }

            pattern.push_str(&regex::escape(ch.encode_utf8(&mut [0; 4])));
            rest = &rest[ch.len_utf8()..];
        }
        pattern.push('$');

        let has = |field: &str| seen.iter().any(|seen_field| *seen_field == field);
        let missing = |field: &'static str| FormatError::MissingField {
            format: format.to_string(),
            field,
        };
        if !has(GROUP_YEAR) {
            return Err(missing(GROUP_YEAR));
        }
        match granularity {
            Granularity::Day => {
                if !has(GROUP_MONTH) {
                    return Err(missing(GROUP_MONTH));
                }
                if !has(GROUP_DAY) {
                    return Err(missing(GROUP_DAY));
                }
            }
            Granularity::Week => {
                if !has(GROUP_WEEK) && !(has(GROUP_MONTH) && has(GROUP_DAY)) {
                    return Err(missing(GROUP_WEEK));
                }
            }
        }

        let matcher = Regex::new(&pattern).map_err(|err| FormatError::Pattern(err.to_string()))?;
        Ok(Self {
            matcher,
            has_week: has(GROUP_WEEK),
        })
    }

    /// Extracts the represented date from a file stem.
    ///
    /// Returns `None` when the stem does not match or names no valid date.
    pub fn parse(&self, stem: &str) -> Option<NaiveDate> {
        let caps = self.matcher.captures(stem)?;
        let field = |name: &str| caps.name(name).and_then(|m| m.as_str().parse::<u32>().ok());
        let year = i32::try_from(field(GROUP_YEAR)?).ok()?;

        if self.has_week {
            return NaiveDate::from_isoywd_opt(year, field(GROUP_WEEK)?, Weekday::Mon);
        }
        NaiveDate::from_ymd_opt(year, field(GROUP_MONTH)?, field(GROUP_DAY)?)
    }
}
