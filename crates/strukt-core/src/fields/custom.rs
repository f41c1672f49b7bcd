//! User-defined constraint wrapper
//!
//! Copyright (c) 2025 Strukt Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::fields::{Field, FieldKind};
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

type CheckFn = dyn Fn(&Value) -> Result<()> + Send + Sync;

/// A constraint backed by a caller-supplied validation function, for value
/// kinds the built-in vocabulary does not cover.
#[derive(Clone)]
pub struct CustomField {
    pub type_name: String,
    check: Arc<CheckFn>,
}

/// Wrap a validation function as a constraint. The function sees the
/// proposed value only; the engine stamps the attribute name onto any
/// error it returns.
pub fn custom<N, F>(type_name: N, check: F) -> Field
where
    N: Into<String>,
    F: Fn(&Value) -> Result<()> + Send + Sync + 'static,
{
    Field::new(FieldKind::Custom(CustomField {
        type_name: type_name.into(),
        check: Arc::new(check),
    }))
}

impl CustomField {
    pub(crate) fn validate(&self, name: &str, value: &Value) -> Result<Value> {
        match (self.check)(value) {
            Ok(()) => Ok(value.clone()),
            Err(Error::Type { message, .. }) => Err(Error::type_error(name, message)),
            Err(Error::Value { message, .. }) => Err(Error::value_error(name, message)),
        }
    }
}

impl fmt::Debug for CustomField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomField")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_check_runs_and_gets_renamed() {
        let even = custom("Even", |v| match v {
            Value::Int(i) if i % 2 == 0 => Ok(()),
            Value::Int(_) => Err(Error::value_error("", "expected an even number")),
            _ => Err(Error::type_error("", "expected an integer")),
        });
        assert!(even.validate("n", &Value::from(4)).is_ok());
        assert_eq!(
            even.validate("n", &Value::from(3)).unwrap_err().to_string(),
            "n: expected an even number"
        );
        assert_eq!(
            even.validate("n", &Value::from("x")).unwrap_err().to_string(),
            "n: expected an integer"
        );
    }
}
