//! Constraint vocabulary for structure attributes
//!
//! A [`Field`] is an immutable description of what values are legal for one
//! attribute. Fields are built with the free builder functions in this
//! module ([`number`], [`string`], [`array`], [`all_of`], ...), are shared
//! by every instance of the declaring structure type, and validate with the
//! attribute name passed as a call parameter so one field can serve many
//! positions (collection elements, combinator members) concurrently.
//!
//! Copyright (c) 2025 Strukt Team
//! Licensed under the Apache-2.0 license

pub mod collections;
pub mod combinators;
pub mod custom;
pub mod enums;
pub mod number;
pub mod reference;
pub mod text;

pub use collections::{array, map, set, tuple, ArrayField, ArrayItems, MapField, SetField, TupleField};
pub use combinators::{all_of, any_of, not_of, one_of};
pub use custom::{custom, CustomField};
pub use enums::{enum_string, enumeration, EnumField, EnumStringField};
pub use number::{
    float, integer, number, positive, positive_float, positive_int, Num, NumberDomain, NumberField,
};
pub use reference::{embedded, embedded_named, reference, EmbeddedBuilder};
pub use text::{
    date_string, sized, sized_string, string, DateStringField, SizedField, SizedStringField,
    StringField,
};

use crate::error::{Error, Result};
use crate::structure::Structure;
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// The concrete constraint behind a [`Field`].
#[derive(Debug, Clone)]
pub enum FieldKind {
    Number(NumberField),
    String(StringField),
    Boolean,
    Enum(EnumField),
    EnumString(EnumStringField),
    DateString(DateStringField),
    Sized(SizedField),
    SizedString(SizedStringField),
    Array(ArrayField),
    Set(SetField),
    Map(MapField),
    Tuple(TupleField),
    AllOf(Vec<Field>),
    AnyOf(Vec<Field>),
    OneOf(Vec<Field>),
    Not(Vec<Field>),
    Reference(Arc<Structure>),
    Embedded(Arc<Structure>),
    Custom(CustomField),
}

/// One attribute's constraint: validation parameters plus an optional
/// per-attribute immutability flag. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct Field {
    kind: FieldKind,
    immutable: bool,
}

/// A boolean-only constraint.
pub fn boolean() -> Field {
    Field::new(FieldKind::Boolean)
}

/// Mark a constraint's attribute as write-once.
pub fn immutable<F: Into<Field>>(field: F) -> Field {
    field.into().immutable()
}

impl Field {
    pub(crate) fn new(kind: FieldKind) -> Self {
        Field {
            kind,
            immutable: false,
        }
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Forbid reassignment once the attribute holds a value.
    pub fn immutable(mut self) -> Self {
        self.immutable = true;
        self
    }

    pub fn is_immutable(&self) -> bool {
        self.immutable
    }

    /// Validate a proposed value for the attribute `name`, returning the
    /// value to store. Collections come back re-built from their validated
    /// elements; embedded mappings come back as structure instances.
    pub fn validate(&self, name: &str, value: &Value) -> Result<Value> {
        match &self.kind {
            FieldKind::Number(f) => f.validate(name, value),
            FieldKind::String(f) => f.validate(name, value),
            FieldKind::Boolean => match value {
                Value::Bool(_) => Ok(value.clone()),
                _ => Err(Error::type_error(name, "expected a boolean")),
            },
            FieldKind::Enum(f) => f.validate(name, value),
            FieldKind::EnumString(f) => f.validate(name, value),
            FieldKind::DateString(f) => f.validate(name, value),
            FieldKind::Sized(f) => f.validate(name, value),
            FieldKind::SizedString(f) => f.validate(name, value),
            FieldKind::Array(f) => f.validate(name, value),
            FieldKind::Set(f) => f.validate(name, value),
            FieldKind::Map(f) => f.validate(name, value),
            FieldKind::Tuple(f) => f.validate(name, value),
            FieldKind::AllOf(members) => combinators::validate_all_of(members, name, value),
            FieldKind::AnyOf(members) => combinators::validate_any_of(members, name, value),
            FieldKind::OneOf(members) => combinators::validate_one_of(members, name, value),
            FieldKind::Not(members) => combinators::validate_not(members, name, value),
            FieldKind::Reference(ty) => reference::validate_reference(ty, name, value),
            FieldKind::Embedded(ty) => reference::validate_embedded(ty, name, value),
            FieldKind::Custom(f) => f.validate(name, value),
        }
    }

    /// Whether the constraint's accepted kind can serve as a set element or
    /// map key. Collection kinds cannot.
    pub(crate) fn hashable_target(&self) -> bool {
        !matches!(
            self.kind,
            FieldKind::Array(_) | FieldKind::Set(_) | FieldKind::Map(_)
        )
    }
}

impl From<NumberField> for Field {
    fn from(f: NumberField) -> Field {
        Field::new(FieldKind::Number(f))
    }
}

impl From<StringField> for Field {
    fn from(f: StringField) -> Field {
        Field::new(FieldKind::String(f))
    }
}

impl From<EnumField> for Field {
    fn from(f: EnumField) -> Field {
        Field::new(FieldKind::Enum(f))
    }
}

impl From<EnumStringField> for Field {
    fn from(f: EnumStringField) -> Field {
        Field::new(FieldKind::EnumString(f))
    }
}

impl From<DateStringField> for Field {
    fn from(f: DateStringField) -> Field {
        Field::new(FieldKind::DateString(f))
    }
}

impl From<SizedField> for Field {
    fn from(f: SizedField) -> Field {
        Field::new(FieldKind::Sized(f))
    }
}

impl From<SizedStringField> for Field {
    fn from(f: SizedStringField) -> Field {
        Field::new(FieldKind::SizedString(f))
    }
}

impl From<ArrayField> for Field {
    fn from(f: ArrayField) -> Field {
        Field::new(FieldKind::Array(f))
    }
}

impl From<SetField> for Field {
    fn from(f: SetField) -> Field {
        Field::new(FieldKind::Set(f))
    }
}

impl From<MapField> for Field {
    fn from(f: MapField) -> Field {
        Field::new(FieldKind::Map(f))
    }
}

impl From<TupleField> for Field {
    fn from(f: TupleField) -> Field {
        Field::new(FieldKind::Tuple(f))
    }
}

impl From<Arc<Structure>> for Field {
    fn from(ty: Arc<Structure>) -> Field {
        Field::new(FieldKind::Reference(ty))
    }
}

impl From<&Arc<Structure>> for Field {
    fn from(ty: &Arc<Structure>) -> Field {
        reference(ty)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn props(f: &mut fmt::Formatter<'_>, pairs: &[(&str, String)]) -> fmt::Result {
            if pairs.is_empty() {
                return Ok(());
            }
            write!(f, ". Properties: ")?;
            for (i, (k, v)) in pairs.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{} = {}", k, v)?;
            }
            Ok(())
        }
        fn members(f: &mut fmt::Formatter<'_>, name: &str, list: &[Field]) -> fmt::Result {
            if list.is_empty() {
                return write!(f, "<{}>", name);
            }
            write!(f, "<{} [", name)?;
            for (i, m) in list.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", m)?;
            }
            write!(f, "]>")
        }

        match &self.kind {
            FieldKind::Number(n) => {
                let name = match (n.domain, n.positive) {
                    (NumberDomain::Any, false) => "Number",
                    (NumberDomain::Any, true) => "Positive",
                    (NumberDomain::Integer, false) => "Integer",
                    (NumberDomain::Integer, true) => "PositiveInt",
                    (NumberDomain::Float, false) => "Float",
                    (NumberDomain::Float, true) => "PositiveFloat",
                };
                let mut pairs: Vec<(&str, String)> = Vec::new();
                if n.exclusive_maximum {
                    pairs.push(("exclusiveMaximum", "true".to_string()));
                }
                if let Some(v) = n.maximum {
                    pairs.push(("maximum", v.to_string()));
                }
                if let Some(v) = n.minimum {
                    pairs.push(("minimum", v.to_string()));
                }
                if let Some(v) = n.multiples_of {
                    pairs.push(("multiplesOf", v.to_string()));
                }
                write!(f, "<{}", name)?;
                props(f, &pairs)?;
                write!(f, ">")
            }
            FieldKind::String(s) => {
                let mut pairs: Vec<(&str, String)> = Vec::new();
                if let Some(v) = s.max_length {
                    pairs.push(("maxLength", v.to_string()));
                }
                if let Some(v) = s.min_length {
                    pairs.push(("minLength", v.to_string()));
                }
                if let Some(p) = &s.pattern {
                    pairs.push(("pattern", format!("'{}'", p.source)));
                }
                write!(f, "<String")?;
                props(f, &pairs)?;
                write!(f, ">")
            }
            FieldKind::Boolean => write!(f, "<Boolean>"),
            FieldKind::Enum(e) => {
                let rendered: Vec<String> = e.values.iter().map(|v| v.to_string()).collect();
                write!(f, "<Enum. Properties: values = [{}]>", rendered.join(", "))
            }
            FieldKind::EnumString(e) => {
                write!(f, "<EnumString. Properties: values = [{}]>", e.values.join(", "))
            }
            FieldKind::DateString(_) => write!(f, "<DateString>"),
            FieldKind::Sized(s) => write!(f, "<Sized. Properties: maxlen = {}>", s.max_len),
            FieldKind::SizedString(s) => {
                write!(f, "<SizedString. Properties: maxlen = {}>", s.max_len)
            }
            FieldKind::Array(_) => write!(f, "<Array>"),
            FieldKind::Set(_) => write!(f, "<Set>"),
            FieldKind::Map(_) => write!(f, "<Map>"),
            FieldKind::Tuple(_) => write!(f, "<Tuple>"),
            FieldKind::AllOf(list) => members(f, "AllOf", list),
            FieldKind::AnyOf(list) => members(f, "AnyOf", list),
            FieldKind::OneOf(list) => members(f, "OneOf", list),
            FieldKind::Not(list) => members(f, "NotField", list),
            FieldKind::Reference(ty) => write!(f, "<Reference: {}>", ty.name()),
            FieldKind::Embedded(ty) => write!(f, "<Structure: {}>", ty.name()),
            FieldKind::Custom(c) => write!(f, "<{}>", c.type_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolean_field() {
        let f = boolean();
        assert!(f.validate("b", &Value::from(true)).is_ok());
        assert_eq!(
            f.validate("b", &Value::from(1)).unwrap_err().to_string(),
            "b: expected a boolean"
        );
    }

    #[test]
    fn test_display_shows_set_parameters_only() {
        let f: Field = number().maximum(20).minimum(-10).multiples_of(5).into();
        assert_eq!(
            f.to_string(),
            "<Number. Properties: maximum = 20, minimum = -10, multiplesOf = 5>"
        );
        let plain: Field = integer().into();
        assert_eq!(plain.to_string(), "<Integer>");
    }

    #[test]
    fn test_display_combinator_members() {
        let f = all_of(vec![number().maximum(20).into(), integer().into()]);
        assert_eq!(
            f.to_string(),
            "<AllOf [<Number. Properties: maximum = 20>, <Integer>]>"
        );
        assert_eq!(all_of(vec![]).to_string(), "<AllOf>");
    }

    #[test]
    fn test_immutable_flag() {
        let f = immutable(integer());
        assert!(f.is_immutable());
        assert!(!Field::from(integer()).is_immutable());
    }
}
