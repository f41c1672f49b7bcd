//! Structure instances: validated, ordered attribute content
//!
//! Copyright (c) 2025 Strukt Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::proxy::{ListProxy, MapProxy};
use crate::structure::Structure;
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// An ordered mapping from attribute name to validated value.
///
/// Every attribute present has passed its constraint at the moment of its
/// most recent write; every later write revalidates through the same
/// constraint. Equality compares the full attribute content.
#[derive(Debug, Clone)]
pub struct Instance {
    ty: Arc<Structure>,
    values: Vec<(String, Value)>,
}

impl Instance {
    pub(crate) fn new(ty: Arc<Structure>) -> Self {
        Instance {
            ty,
            values: Vec::new(),
        }
    }

    pub fn structure(&self) -> &Arc<Structure> {
        &self.ty
    }

    /// Read an attribute's stored value unchanged.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// All set attributes in write order.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Write an attribute: enforce immutability, validate through the
    /// declared constraint, then store the validated value. Free-form
    /// extras are stored without validation when the structure permits
    /// additional attributes.
    pub fn set(&mut self, name: &str, value: Value) -> Result<()> {
        let exists = self.values.iter().any(|(n, _)| n == name);
        if self.ty.is_immutable() && exists {
            return Err(Error::value_error(name, "structure is immutable"));
        }
        let validated = match self.ty.field(name) {
            Some(field) => {
                if field.is_immutable() && exists {
                    return Err(Error::value_error(name, "attribute is immutable"));
                }
                field.validate(name, &value)?
            }
            None if self.ty.additional_properties() => value,
            None => {
                return Err(Error::type_error(
                    name,
                    "unexpected attribute: additional properties are not allowed",
                ));
            }
        };
        match self.values.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = validated,
            None => self.values.push((name.to_string(), validated)),
        }
        Ok(())
    }

    /// Delete an attribute. Required attributes cannot be deleted.
    pub fn remove(&mut self, name: &str) -> Result<Value> {
        if self.ty.is_required(name) {
            return Err(Error::value_error(name, "attribute is mandatory"));
        }
        let pos = self
            .values
            .iter()
            .position(|(n, _)| n == name)
            .ok_or_else(|| Error::value_error(name, "attribute is not set"))?;
        Ok(self.values.remove(pos).1)
    }

    /// Live mutation proxy over an array attribute. Every mutating
    /// operation revalidates the complete collection before committing.
    pub fn array_mut(&mut self, name: &str) -> Result<ListProxy<'_>> {
        match self.get(name) {
            Some(Value::List(_)) => Ok(ListProxy::new(self, name)),
            _ => Err(Error::type_error(name, "expected an array attribute")),
        }
    }

    /// Live mutation proxy over a map attribute.
    pub fn map_mut(&mut self, name: &str) -> Result<MapProxy<'_>> {
        match self.get(name) {
            Some(Value::Map(_)) => Ok(MapProxy::new(self, name)),
            _ => Err(Error::type_error(name, "expected a mapping attribute")),
        }
    }

    fn sorted_attrs(&self) -> Vec<(&String, &Value)> {
        let mut pairs: Vec<(&String, &Value)> =
            self.values.iter().map(|(n, v)| (n, v)).collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));
        pairs
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Instance) -> bool {
        self.sorted_attrs() == other.sorted_attrs()
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Instance of {}. Properties: ", self.ty.name())?;
        for (i, (name, value)) in self.sorted_attrs().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} = {}", name, value)?;
        }
        write!(f, ">")
    }
}
