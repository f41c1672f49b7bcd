//! Text constraint primitives: strings, date strings, sized values
//!
//! Copyright (c) 2025 Strukt Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::value::Value;
use chrono::NaiveDate;
use regex::Regex;

/// A pattern constraint, compiled once at construction.
///
/// Matching is anchored to the start of the input, so `[A-Za-z]+$` accepts
/// `"abc"` but rejects `"1abc"`.
#[derive(Debug, Clone)]
pub(crate) struct Pattern {
    pub(crate) source: String,
    regex: Regex,
}

impl Pattern {
    fn compile(source: &str) -> Result<Pattern> {
        let regex = Regex::new(&format!("^(?:{})", source)).map_err(|e| {
            Error::type_error("pattern", format!("invalid regular expression: {}", e))
        })?;
        Ok(Pattern {
            source: source.to_string(),
            regex,
        })
    }

    fn matches(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// A text value with optional length bounds and start-anchored pattern.
#[derive(Debug, Clone, Default)]
pub struct StringField {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub(crate) pattern: Option<Pattern>,
}

pub fn string() -> StringField {
    StringField::default()
}

impl StringField {
    pub fn min_length(mut self, n: usize) -> Self {
        self.min_length = Some(n);
        self
    }

    pub fn max_length(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }

    /// Set the pattern, compiling it immediately. Fails on an invalid
    /// regular expression.
    pub fn pattern(mut self, source: &str) -> Result<Self> {
        self.pattern = Some(Pattern::compile(source)?);
        Ok(self)
    }

    /// The source text of the pattern constraint, if one is set.
    pub fn pattern_source(&self) -> Option<&str> {
        self.pattern.as_ref().map(|p| p.source.as_str())
    }

    pub(crate) fn check(&self, name: &str, text: &str) -> Result<()> {
        let chars = text.chars().count();
        if let Some(max) = self.max_length {
            if chars > max {
                return Err(Error::value_error(
                    name,
                    format!("expected a maximum length of {}", max),
                ));
            }
        }
        if let Some(min) = self.min_length {
            if chars < min {
                return Err(Error::value_error(
                    name,
                    format!("expected a minimum length of {}", min),
                ));
            }
        }
        if let Some(pattern) = &self.pattern {
            if !pattern.matches(text) {
                return Err(Error::value_error(
                    name,
                    format!("does not match regular expression: \"{}\"", pattern.source),
                ));
            }
        }
        Ok(())
    }

    pub(crate) fn validate(&self, name: &str, value: &Value) -> Result<Value> {
        let Value::Str(text) = value else {
            return Err(Error::type_error(name, "expected a string"));
        };
        self.check(name, text)?;
        Ok(value.clone())
    }
}

/// A string holding a `YYYY-MM-DD` calendar date.
#[derive(Debug, Clone, Default)]
pub struct DateStringField;

pub fn date_string() -> DateStringField {
    DateStringField
}

impl DateStringField {
    pub(crate) fn validate(&self, name: &str, value: &Value) -> Result<Value> {
        let Value::Str(text) = value else {
            return Err(Error::type_error(name, "expected a string"));
        };
        NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map_err(|e| Error::value_error(name, e.to_string()))?;
        Ok(value.clone())
    }
}

/// A length bound applicable to any measurable value.
#[derive(Debug, Clone)]
pub struct SizedField {
    pub max_len: usize,
}

pub fn sized(max_len: usize) -> SizedField {
    SizedField { max_len }
}

impl SizedField {
    pub(crate) fn validate(&self, name: &str, value: &Value) -> Result<Value> {
        let Some(len) = value.length() else {
            return Err(Error::type_error(name, "expected a sized value"));
        };
        if len > self.max_len {
            return Err(Error::value_error(name, "too long"));
        }
        Ok(value.clone())
    }
}

/// String constraints combined with a [`SizedField`] length bound.
#[derive(Debug, Clone)]
pub struct SizedStringField {
    pub string: StringField,
    pub max_len: usize,
}

pub fn sized_string(max_len: usize) -> SizedStringField {
    SizedStringField {
        string: StringField::default(),
        max_len,
    }
}

impl SizedStringField {
    pub fn min_length(mut self, n: usize) -> Self {
        self.string = self.string.min_length(n);
        self
    }

    pub fn pattern(mut self, source: &str) -> Result<Self> {
        self.string = self.string.pattern(source)?;
        Ok(self)
    }

    pub(crate) fn validate(&self, name: &str, value: &Value) -> Result<Value> {
        let Value::Str(text) = value else {
            return Err(Error::type_error(name, "expected a string"));
        };
        self.string.check(name, text)?;
        if text.chars().count() > self.max_len {
            return Err(Error::value_error(name, "too long"));
        }
        Ok(value.clone())
    }
}
