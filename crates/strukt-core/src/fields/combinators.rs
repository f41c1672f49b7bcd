//! Logical combinators over member constraints
//!
//! Copyright (c) 2025 Strukt Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::fields::{Field, FieldKind};
use crate::value::Value;

/// Value must pass every member constraint in order. The first failure is
/// authoritative and propagates unmodified. An empty member list trivially
/// accepts everything.
pub fn all_of(members: Vec<Field>) -> Field {
    Field::new(FieldKind::AllOf(members))
}

/// Value must pass at least one member constraint. Member failures are
/// swallowed during the search; the stored value is the first matching
/// member's post-validation output.
pub fn any_of(members: Vec<Field>) -> Field {
    Field::new(FieldKind::AnyOf(members))
}

/// Value must pass exactly one member constraint.
pub fn one_of(members: Vec<Field>) -> Field {
    Field::new(FieldKind::OneOf(members))
}

/// Value must fail every member constraint.
pub fn not_of(members: Vec<Field>) -> Field {
    Field::new(FieldKind::Not(members))
}

pub(crate) fn validate_all_of(members: &[Field], name: &str, value: &Value) -> Result<Value> {
    for member in members {
        member.validate(name, value)?;
    }
    Ok(value.clone())
}

pub(crate) fn validate_any_of(members: &[Field], name: &str, value: &Value) -> Result<Value> {
    for member in members {
        if let Ok(validated) = member.validate(name, value) {
            return Ok(validated);
        }
    }
    Err(Error::value_error(name, "did not match any field option"))
}

pub(crate) fn validate_one_of(members: &[Field], name: &str, value: &Value) -> Result<Value> {
    let mut matched = 0;
    for member in members {
        if member.validate(name, value).is_ok() {
            matched += 1;
        }
    }
    match matched {
        0 => Err(Error::value_error(name, "did not match any field option")),
        1 => Ok(value.clone()),
        _ => Err(Error::value_error(
            name,
            "matched more than one field option",
        )),
    }
}

pub(crate) fn validate_not(members: &[Field], name: &str, value: &Value) -> Result<Value> {
    for member in members {
        if member.validate(name, value).is_ok() {
            return Err(Error::value_error(
                name,
                "expected not to match any field definition",
            ));
        }
    }
    Ok(value.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{integer, number, positive, string};

    #[test]
    fn test_empty_all_of_accepts_anything() {
        let f = all_of(vec![]);
        assert_eq!(f.validate("x", &Value::from("abc")).unwrap(), Value::from("abc"));
        assert_eq!(f.validate("x", &Value::from(5)).unwrap(), Value::from(5));
        assert!(f.validate("x", &Value::Null).is_ok());
    }

    #[test]
    fn test_all_of_propagates_first_member_failure() {
        let f = all_of(vec![
            number().multiples_of(5).maximum(20).minimum(-10).into(),
            integer().into(),
            positive().into(),
        ]);
        assert_eq!(f.validate("a", &Value::from(10)).unwrap(), Value::from(10));
        assert_eq!(
            f.validate("a", &Value::from(-5)).unwrap_err().to_string(),
            "a: must be positive"
        );
        assert_eq!(
            f.validate("a", &Value::from(3)).unwrap_err().to_string(),
            "a: expected a multiple of 5"
        );
    }

    #[test]
    fn test_any_of_matches_any_member() {
        let f = any_of(vec![
            number().maximum(20).minimum(-10).into(),
            integer().into(),
            positive().into(),
            string().into(),
        ]);
        assert!(f.validate("b", &Value::from(-99)).is_ok());
        assert!(f.validate("b", &Value::from("xyz")).is_ok());
        assert!(f.validate("b", &Value::from(999.5)).is_ok());
        assert_eq!(
            f.validate("b", &Value::from(-99.1)).unwrap_err().to_string(),
            "b: did not match any field option"
        );
    }

    #[test]
    fn test_one_of_distinguishes_no_match_from_ambiguous() {
        let f = one_of(vec![
            number().multiples_of(5).maximum(20).minimum(-10).into(),
            integer().into(),
            positive().into(),
            string().into(),
        ]);
        // matches only the string member
        assert!(f.validate("c", &Value::from("xyz")).is_ok());
        // matches integer and positive
        assert_eq!(
            f.validate("c", &Value::from(23)).unwrap_err().to_string(),
            "c: matched more than one field option"
        );
        // matches nothing
        assert_eq!(
            f.validate("c", &Value::from(-99.1)).unwrap_err().to_string(),
            "c: did not match any field option"
        );
    }

    #[test]
    fn test_not_accepts_only_values_failing_every_member() {
        let f = not_of(vec![
            number().multiples_of(5).maximum(20).minimum(-10).into(),
            string().into(),
        ]);
        assert!(f.validate("d", &Value::from(25.7)).is_ok());
        assert_eq!(
            f.validate("d", &Value::from("abc")).unwrap_err().to_string(),
            "d: expected not to match any field definition"
        );
        assert!(f.validate("d", &Value::from(10)).is_err());
    }
}
