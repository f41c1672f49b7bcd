//! Enumerated-value constraints
//!
//! Copyright (c) 2025 Strukt Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::fields::text::StringField;
use crate::value::Value;

/// Membership in a fixed candidate set. Candidates can be of any kind.
#[derive(Debug, Clone)]
pub struct EnumField {
    pub values: Vec<Value>,
}

pub fn enumeration(values: Vec<Value>) -> EnumField {
    EnumField { values }
}

fn candidates(values: &[Value]) -> String {
    let rendered: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("[{}]", rendered.join(", "))
}

impl EnumField {
    pub(crate) fn validate(&self, name: &str, value: &Value) -> Result<Value> {
        if !self.values.contains(value) {
            return Err(Error::value_error(
                name,
                format!("must be one of {}", candidates(&self.values)),
            ));
        }
        Ok(value.clone())
    }
}

/// [`EnumField`] over string candidates, further narrowed by string
/// constraints such as pattern or length bounds.
#[derive(Debug, Clone)]
pub struct EnumStringField {
    pub values: Vec<String>,
    pub string: StringField,
}

pub fn enum_string<I, S>(values: I) -> EnumStringField
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    EnumStringField {
        values: values.into_iter().map(Into::into).collect(),
        string: StringField::default(),
    }
}

impl EnumStringField {
    pub fn min_length(mut self, n: usize) -> Self {
        self.string = self.string.min_length(n);
        self
    }

    pub fn max_length(mut self, n: usize) -> Self {
        self.string = self.string.max_length(n);
        self
    }

    pub fn pattern(mut self, source: &str) -> Result<Self> {
        self.string = self.string.pattern(source)?;
        Ok(self)
    }

    pub(crate) fn validate(&self, name: &str, value: &Value) -> Result<Value> {
        // membership first, then the string constraints
        let matched = matches!(value, Value::Str(s) if self.values.contains(s));
        if !matched {
            let rendered: Vec<Value> = self.values.iter().map(|s| Value::from(s.clone())).collect();
            return Err(Error::value_error(
                name,
                format!("must be one of {}", candidates(&rendered)),
            ));
        }
        self.string.validate(name, value)
    }
}
