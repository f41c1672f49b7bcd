//! Structure types: declared attribute sets with a constructor contract
//!
//! Copyright (c) 2025 Strukt Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::fields::Field;
use crate::instance::Instance;
use crate::value::Value;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// A named, ordered set of constrained attributes, a required subset, and
/// an additional-attributes policy. Built once via [`StructureBuilder`],
/// then shared (behind [`Arc`]) by every instance and reference to it.
#[derive(Debug)]
pub struct Structure {
    name: String,
    fields: Vec<(String, Field)>,
    required: Vec<String>,
    additional_properties: bool,
    immutable: bool,
}

impl Structure {
    pub fn builder<N: Into<String>>(name: N) -> StructureBuilder {
        StructureBuilder {
            name: name.into(),
            parents: Vec::new(),
            fields: Vec::new(),
            required: None,
            additional_properties: None,
            immutable: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared attributes in declaration order, ancestors first.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.fields.iter().map(|(n, f)| (n.as_str(), f))
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, f)| f)
    }

    pub fn required(&self) -> &[String] {
        &self.required
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }

    pub fn additional_properties(&self) -> bool {
        self.additional_properties
    }

    pub fn is_immutable(&self) -> bool {
        self.immutable
    }

    /// Bind constructor arguments against the required/optional contract
    /// and validate every attribute write.
    ///
    /// Required attributes must be present; optional attributes may be
    /// absent; names outside the declared set are rejected unless the
    /// additional-attributes policy permits them, in which case they are
    /// stored without validation.
    pub fn instantiate<I, K>(self: &Arc<Self>, attrs: I) -> Result<Instance>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let provided: Vec<(String, Value)> = attrs
            .into_iter()
            .map(|(name, value)| (name.into(), value))
            .collect();
        for (name, _) in &provided {
            if self.field(name).is_none() && !self.additional_properties {
                return Err(Error::type_error(
                    name.clone(),
                    "unexpected attribute: additional properties are not allowed",
                ));
            }
        }
        for required in &self.required {
            if !provided.iter().any(|(name, _)| name == required) {
                return Err(Error::type_error(
                    required.clone(),
                    "missing a required attribute",
                ));
            }
        }
        let mut instance = Instance::new(Arc::clone(self));
        // declared attributes in declaration order, then free-form extras
        // in the order given
        for (field_name, _) in &self.fields {
            if let Some((_, value)) = provided.iter().find(|(name, _)| name == field_name) {
                instance.set(field_name, value.clone())?;
            }
        }
        for (name, value) in provided {
            if self.field(&name).is_none() {
                instance.set(&name, value)?;
            }
        }
        Ok(instance)
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Structure: {}. Properties: ", self.name)?;
        for (i, (name, field)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} = {}", name, field)?;
        }
        write!(f, ">")
    }
}

/// Builder that synthesizes a structure type's constructor contract:
/// merged attribute set (own declarations plus inherited ones), required
/// subset, and additional-attributes policy.
#[derive(Debug)]
pub struct StructureBuilder {
    name: String,
    parents: Vec<Arc<Structure>>,
    fields: Vec<(String, Field)>,
    required: Option<Vec<String>>,
    additional_properties: Option<bool>,
    immutable: bool,
}

impl StructureBuilder {
    /// Inherit attributes, required-ness, and policies from an ancestor
    /// structure type. May be called multiple times; earlier ancestors win
    /// name conflicts among themselves.
    pub fn extends(mut self, parent: &Arc<Structure>) -> Self {
        self.parents.push(Arc::clone(parent));
        self
    }

    /// Declare an attribute. Re-declaring a name inherited from an
    /// ancestor shadows the ancestor's constraint for that name.
    pub fn field<N, F>(mut self, name: N, field: F) -> Self
    where
        N: Into<String>,
        F: Into<Field>,
    {
        let name = name.into();
        let field = field.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = field,
            None => self.fields.push((name, field)),
        }
        self
    }

    /// Override the required subset. Without this, every declared
    /// attribute (plus everything required by ancestors) is required.
    pub fn required<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn additional_properties(mut self, allowed: bool) -> Self {
        self.additional_properties = Some(allowed);
        self
    }

    /// Forbid reassigning any attribute once it holds a value.
    pub fn immutable(mut self) -> Self {
        self.immutable = true;
        self
    }

    pub fn build(self) -> Result<Arc<Structure>> {
        let mut merged: Vec<(String, Field)> = Vec::new();
        for parent in &self.parents {
            for (name, field) in parent.fields() {
                if !merged.iter().any(|(n, _)| n == name) {
                    merged.push((name.to_string(), field.clone()));
                }
            }
        }
        for (name, field) in self.fields.iter() {
            match merged.iter_mut().find(|(n, _)| n == name) {
                Some(slot) => slot.1 = field.clone(),
                None => merged.push((name.clone(), field.clone())),
            }
        }

        let required = match self.required {
            Some(named) => named,
            None => {
                let mut required: Vec<String> = Vec::new();
                for parent in &self.parents {
                    for name in parent.required() {
                        if !required.contains(name) {
                            required.push(name.clone());
                        }
                    }
                }
                for (name, _) in &self.fields {
                    if !required.contains(name) {
                        required.push(name.clone());
                    }
                }
                required
            }
        };

        let additional_properties = self
            .additional_properties
            .unwrap_or_else(|| self.parents.iter().all(|p| p.additional_properties()));
        let immutable = self.immutable || self.parents.iter().any(|p| p.is_immutable());

        if !additional_properties {
            for name in &required {
                if !merged.iter().any(|(n, _)| n == name) {
                    return Err(Error::type_error(
                        name.clone(),
                        "required attribute is not declared",
                    ));
                }
            }
        }

        debug!(
            structure = %self.name,
            attributes = merged.len(),
            required = required.len(),
            "built structure type"
        );
        Ok(Arc::new(Structure {
            name: self.name,
            fields: merged,
            required,
            additional_properties,
            immutable,
        }))
    }
}
