//! Numeric constraint primitives
//!
//! Copyright (c) 2025 Strukt Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::value::Value;
use serde_json::Value as JsonValue;
use std::fmt;

/// A numeric constraint parameter that remembers whether it was given as an
/// integer or a float, so schema emission can reproduce it exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    pub fn as_f64(self) -> f64 {
        match self {
            Num::Int(i) => i as f64,
            Num::Float(f) => f,
        }
    }

    pub fn to_json(self) -> JsonValue {
        match self {
            Num::Int(i) => JsonValue::from(i),
            Num::Float(f) => serde_json::Number::from_f64(f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
        }
    }
}

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Num::Int(i) => write!(f, "{}", i),
            Num::Float(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for Num {
    fn from(i: i64) -> Num {
        Num::Int(i)
    }
}

impl From<i32> for Num {
    fn from(i: i32) -> Num {
        Num::Int(i64::from(i))
    }
}

impl From<f64> for Num {
    fn from(f: f64) -> Num {
        Num::Float(f)
    }
}

/// Which numeric representations the constraint accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberDomain {
    #[default]
    Any,
    Integer,
    Float,
}

/// The number constraint family: `number()`, `integer()`, `float()`,
/// `positive()`, and their combinations.
///
/// The checks run in a fixed order: numeric kind, exact representation,
/// positivity, multiple-of, minimum, maximum. The first failing check wins.
#[derive(Debug, Clone, Default)]
pub struct NumberField {
    pub domain: NumberDomain,
    pub positive: bool,
    pub multiples_of: Option<Num>,
    pub minimum: Option<Num>,
    pub maximum: Option<Num>,
    pub exclusive_maximum: bool,
}

/// Any integral or floating value.
pub fn number() -> NumberField {
    NumberField::default()
}

/// A number restricted to integral representation.
pub fn integer() -> NumberField {
    NumberField {
        domain: NumberDomain::Integer,
        ..Default::default()
    }
}

/// A number restricted to floating representation.
pub fn float() -> NumberField {
    NumberField {
        domain: NumberDomain::Float,
        ..Default::default()
    }
}

/// A number strictly greater than zero.
pub fn positive() -> NumberField {
    NumberField {
        positive: true,
        ..Default::default()
    }
}

pub fn positive_int() -> NumberField {
    NumberField {
        domain: NumberDomain::Integer,
        positive: true,
        ..Default::default()
    }
}

pub fn positive_float() -> NumberField {
    NumberField {
        domain: NumberDomain::Float,
        positive: true,
        ..Default::default()
    }
}

impl NumberField {
    pub fn multiples_of<N: Into<Num>>(mut self, n: N) -> Self {
        self.multiples_of = Some(n.into());
        self
    }

    pub fn minimum<N: Into<Num>>(mut self, n: N) -> Self {
        self.minimum = Some(n.into());
        self
    }

    pub fn maximum<N: Into<Num>>(mut self, n: N) -> Self {
        self.maximum = Some(n.into());
        self
    }

    pub fn exclusive_maximum(mut self, exclusive: bool) -> Self {
        self.exclusive_maximum = exclusive;
        self
    }

    pub(crate) fn validate(&self, name: &str, value: &Value) -> Result<Value> {
        let v = match value {
            Value::Int(i) => *i as f64,
            Value::Float(f) => *f,
            _ => return Err(Error::type_error(name, "expected a number")),
        };
        match self.domain {
            NumberDomain::Integer if !matches!(value, Value::Int(_)) => {
                return Err(Error::type_error(name, "expected an integer"));
            }
            NumberDomain::Float if !matches!(value, Value::Float(_)) => {
                return Err(Error::type_error(name, "expected a float"));
            }
            _ => {}
        }
        if self.positive && v <= 0.0 {
            return Err(Error::value_error(name, "must be positive"));
        }
        if let Some(m) = self.multiples_of {
            let divides = match m {
                Num::Int(m) => m != 0 && v % m as f64 == 0.0,
                Num::Float(m) => m != 0.0 && (v / m).fract() == 0.0,
            };
            if !divides {
                return Err(Error::value_error(
                    name,
                    format!("expected a multiple of {}", m),
                ));
            }
        }
        if let Some(min) = self.minimum {
            if min.as_f64() > v {
                return Err(Error::value_error(
                    name,
                    format!("expected a minimum of {}", min),
                ));
            }
        }
        if let Some(max) = self.maximum {
            if self.exclusive_maximum && max.as_f64() == v {
                return Err(Error::value_error(
                    name,
                    format!("expected a maximum of less than {}", max),
                ));
            }
            if max.as_f64() < v {
                return Err(Error::value_error(
                    name,
                    format!("expected a maximum of {}", max),
                ));
            }
        }
        Ok(value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_number_rejects_non_numeric() {
        let err = number().validate("n", &Value::from("abc")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
        assert_eq!(err.to_string(), "n: expected a number");
    }

    #[test]
    fn test_integer_rejects_float_representation() {
        let err = integer().validate("n", &Value::from(1.5)).unwrap_err();
        assert_eq!(err.to_string(), "n: expected an integer");
        assert!(integer().validate("n", &Value::from(1)).is_ok());
        // a whole-valued float is still a float
        let err = integer().validate("n", &Value::from(50.0)).unwrap_err();
        assert_eq!(err.to_string(), "n: expected an integer");
    }

    #[test]
    fn test_float_rejects_integral_representation() {
        let err = float().validate("n", &Value::from(1)).unwrap_err();
        assert_eq!(err.to_string(), "n: expected a float");
        assert!(float().validate("n", &Value::from(1.0)).is_ok());
    }

    #[test]
    fn test_minimum_and_maximum_are_inclusive() {
        let f = number().minimum(-10).maximum(20);
        assert!(f.validate("n", &Value::from(-10)).is_ok());
        assert!(f.validate("n", &Value::from(20)).is_ok());
        let err = f.validate("n", &Value::from(-11)).unwrap_err();
        assert_eq!(err.to_string(), "n: expected a minimum of -10");
        let err = f.validate("n", &Value::from(21)).unwrap_err();
        assert_eq!(err.to_string(), "n: expected a maximum of 20");
    }

    #[test]
    fn test_exclusive_maximum_rejects_the_bound() {
        let f = number().maximum(20).exclusive_maximum(true);
        let err = f.validate("n", &Value::from(20)).unwrap_err();
        assert_eq!(err.to_string(), "n: expected a maximum of less than 20");
        assert!(f.validate("n", &Value::from(19)).is_ok());
    }

    #[test]
    fn test_integral_multiples() {
        let f = number().multiples_of(5);
        assert!(f.validate("n", &Value::from(10)).is_ok());
        assert!(f.validate("n", &Value::from(-15)).is_ok());
        let err = f.validate("n", &Value::from(3)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Value);
        assert_eq!(err.to_string(), "n: expected a multiple of 5");
    }

    #[test]
    fn test_fractional_multiples() {
        let f = number().multiples_of(0.5);
        assert!(f.validate("n", &Value::from(2.5)).is_ok());
        assert!(f.validate("n", &Value::from(3)).is_ok());
        assert!(f.validate("n", &Value::from(2.7)).is_err());
    }

    #[test]
    fn test_positive_rejects_zero_and_negative() {
        assert!(positive().validate("n", &Value::from(1)).is_ok());
        assert_eq!(
            positive().validate("n", &Value::from(0)).unwrap_err().to_string(),
            "n: must be positive"
        );
        assert!(positive_int().validate("n", &Value::from(-5)).is_err());
        assert!(positive_float().validate("n", &Value::from(0.5)).is_ok());
    }
}
