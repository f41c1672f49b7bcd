//! Embedded and referenced structure constraints
//!
//! Copyright (c) 2025 Strukt Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::fields::{Field, FieldKind};
use crate::names::NameGenerator;
use crate::structure::{Structure, StructureBuilder};
use crate::value::Value;
use std::sync::Arc;

/// A constraint accepting only instances of one specific structure type.
pub fn reference(ty: &Arc<Structure>) -> Field {
    Field::new(FieldKind::Reference(Arc::clone(ty)))
}

/// Start an anonymous embedded structure type, named by the process-wide
/// [`NameGenerator`]. On write it accepts a mapping with string keys and
/// constructs an instance of the anonymous type from it.
pub fn embedded() -> EmbeddedBuilder {
    embedded_named(NameGenerator::global())
}

/// Like [`embedded`], but drawing the anonymous name from the given
/// generator. Useful when deterministic names are needed.
pub fn embedded_named(names: &NameGenerator) -> EmbeddedBuilder {
    EmbeddedBuilder {
        builder: Structure::builder(names.next("EmbeddedStructure")),
    }
}

/// Builder for the anonymous structure type behind an embedded constraint.
#[derive(Debug)]
pub struct EmbeddedBuilder {
    builder: StructureBuilder,
}

impl EmbeddedBuilder {
    pub fn field<N, F>(mut self, name: N, field: F) -> Self
    where
        N: Into<String>,
        F: Into<Field>,
    {
        self.builder = self.builder.field(name, field);
        self
    }

    pub fn required<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.builder = self.builder.required(names);
        self
    }

    pub fn additional_properties(mut self, allowed: bool) -> Self {
        self.builder = self.builder.additional_properties(allowed);
        self
    }

    /// Synthesize the anonymous type once and wrap it as a constraint.
    pub fn build(self) -> Result<Field> {
        let ty = self.builder.build()?;
        Ok(Field::new(FieldKind::Embedded(ty)))
    }
}

pub(crate) fn validate_reference(
    ty: &Arc<Structure>,
    name: &str,
    value: &Value,
) -> Result<Value> {
    match value {
        Value::Struct(inst) if Arc::ptr_eq(inst.structure(), ty) => Ok(value.clone()),
        _ => Err(Error::type_error(
            name,
            format!("expected an instance of {}", ty.name()),
        )),
    }
}

pub(crate) fn validate_embedded(ty: &Arc<Structure>, name: &str, value: &Value) -> Result<Value> {
    let Value::Map(entries) = value else {
        return Err(Error::type_error(name, "expected a mapping"));
    };
    let mut attrs: Vec<(String, Value)> = Vec::with_capacity(entries.len());
    for (key, val) in entries {
        let Value::Str(key) = key else {
            return Err(Error::type_error(name, "expected a mapping with string keys"));
        };
        attrs.push((key.clone(), val.clone()));
    }
    let instance = ty.instantiate(attrs)?;
    Ok(Value::Struct(instance))
}
