//! Collection constraint wrappers: Array, Set, Map, Tuple
//!
//! Copyright (c) 2025 Strukt Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::fields::Field;
use crate::value::{map_insert, Value};

fn check_size(
    name: &str,
    len: usize,
    min_items: Option<usize>,
    max_items: Option<usize>,
) -> Result<()> {
    if let Some(min) = min_items {
        if len < min {
            return Err(Error::value_error(
                name,
                format!("expected length of at least {}", min),
            ));
        }
    }
    if let Some(max) = max_items {
        if len > max {
            return Err(Error::value_error(
                name,
                format!("expected length of at most {}", max),
            ));
        }
    }
    Ok(())
}

fn check_unique(name: &str, items: &[Value]) -> Result<()> {
    let mut seen: Vec<&Value> = Vec::new();
    for item in items {
        if seen.contains(&item) {
            return Err(Error::value_error(name, "expected unique items"));
        }
        seen.push(item);
    }
    Ok(())
}

fn require_hashable(field: &Field, what: &str) -> Result<()> {
    if !field.hashable_target() {
        return Err(Error::type_error(
            what,
            "element type is not hashable",
        ));
    }
    Ok(())
}

/// Element constraints of an [`ArrayField`]: none, one applied to every
/// element, or one per position.
#[derive(Debug, Clone, Default)]
pub enum ArrayItems {
    #[default]
    Any,
    Single(Box<Field>),
    Positional(Vec<Field>),
}

/// A list-like collection with size bounds, optional uniqueness, and
/// homogeneous or positional element constraints.
#[derive(Debug, Clone, Default)]
pub struct ArrayField {
    pub min_items: Option<usize>,
    pub max_items: Option<usize>,
    pub unique_items: bool,
    pub additional_items: Option<bool>,
    pub items: ArrayItems,
}

pub fn array() -> ArrayField {
    ArrayField::default()
}

impl ArrayField {
    pub fn min_items(mut self, n: usize) -> Self {
        self.min_items = Some(n);
        self
    }

    pub fn max_items(mut self, n: usize) -> Self {
        self.max_items = Some(n);
        self
    }

    pub fn unique_items(mut self, unique: bool) -> Self {
        self.unique_items = unique;
        self
    }

    /// Whether elements beyond the declared positional constraints are
    /// allowed. Only meaningful with [`ArrayField::items_positional`].
    pub fn additional_items(mut self, allowed: bool) -> Self {
        self.additional_items = Some(allowed);
        self
    }

    /// One constraint applied to every element.
    pub fn items<F: Into<Field>>(mut self, item: F) -> Self {
        self.items = ArrayItems::Single(Box::new(item.into()));
        self
    }

    /// One constraint per position.
    pub fn items_positional(mut self, items: Vec<Field>) -> Self {
        self.items = ArrayItems::Positional(items);
        self
    }

    pub(crate) fn validate(&self, name: &str, value: &Value) -> Result<Value> {
        let Value::List(input) = value else {
            return Err(Error::type_error(name, "expected an array"));
        };
        check_size(name, input.len(), self.min_items, self.max_items)?;
        if self.unique_items {
            check_unique(name, input)?;
        }
        let validated = match &self.items {
            ArrayItems::Any => input.clone(),
            ArrayItems::Single(item) => {
                let mut out = Vec::with_capacity(input.len());
                for (i, element) in input.iter().enumerate() {
                    out.push(item.validate(&format!("{}_{}", name, i), element)?);
                }
                out
            }
            ArrayItems::Positional(items) => {
                if items.len() > input.len() {
                    return Err(Error::value_error(
                        name,
                        format!("expected an array of length {}", items.len()),
                    ));
                }
                if self.additional_items == Some(false) && input.len() > items.len() {
                    return Err(Error::value_error(
                        name,
                        format!("expected an array of length {}", items.len()),
                    ));
                }
                let mut out = Vec::with_capacity(input.len());
                for (i, item) in items.iter().enumerate() {
                    out.push(item.validate(&format!("{}_{}", name, i), &input[i])?);
                }
                // trailing unconstrained elements pass through unvalidated
                out.extend(input[items.len()..].iter().cloned());
                out
            }
        };
        Ok(Value::List(validated))
    }
}

/// A native-set collection with size bounds and an optional element
/// constraint. The element constraint must accept a hashable kind.
#[derive(Debug, Clone, Default)]
pub struct SetField {
    pub min_items: Option<usize>,
    pub max_items: Option<usize>,
    pub items: Option<Box<Field>>,
}

pub fn set() -> SetField {
    SetField::default()
}

impl SetField {
    pub fn min_items(mut self, n: usize) -> Self {
        self.min_items = Some(n);
        self
    }

    pub fn max_items(mut self, n: usize) -> Self {
        self.max_items = Some(n);
        self
    }

    pub fn items<F: Into<Field>>(mut self, item: F) -> Result<Self> {
        let field = item.into();
        require_hashable(&field, "set items")?;
        self.items = Some(Box::new(field));
        Ok(self)
    }

    pub(crate) fn validate(&self, name: &str, value: &Value) -> Result<Value> {
        let Value::Set(input) = value else {
            return Err(Error::type_error(name, "expected a set"));
        };
        check_size(name, input.len(), self.min_items, self.max_items)?;
        match &self.items {
            None => Ok(value.clone()),
            Some(item) => {
                let mut out = Vec::with_capacity(input.len());
                for element in input {
                    let validated = item.validate(name, element)?;
                    if !out.contains(&validated) {
                        out.push(validated);
                    }
                }
                Ok(Value::Set(out))
            }
        }
    }
}

/// A dict-like collection with size bounds and optional key and value
/// constraints. Keys must be of a hashable kind.
#[derive(Debug, Clone, Default)]
pub struct MapField {
    pub min_items: Option<usize>,
    pub max_items: Option<usize>,
    pub entries: Option<Box<(Field, Field)>>,
}

pub fn map() -> MapField {
    MapField::default()
}

impl MapField {
    pub fn min_items(mut self, n: usize) -> Self {
        self.min_items = Some(n);
        self
    }

    pub fn max_items(mut self, n: usize) -> Self {
        self.max_items = Some(n);
        self
    }

    /// Key and value constraints, applied to every entry.
    pub fn entries<K, V>(mut self, key: K, value: V) -> Result<Self>
    where
        K: Into<Field>,
        V: Into<Field>,
    {
        let key = key.into();
        require_hashable(&key, "map keys")?;
        self.entries = Some(Box::new((key, value.into())));
        Ok(self)
    }

    pub(crate) fn validate(&self, name: &str, value: &Value) -> Result<Value> {
        let Value::Map(input) = value else {
            return Err(Error::type_error(name, "expected a mapping"));
        };
        check_size(name, input.len(), self.min_items, self.max_items)?;
        match &self.entries {
            None => Ok(value.clone()),
            Some(pair) => {
                let (key_field, value_field) = pair.as_ref();
                let mut out: Vec<(Value, Value)> = Vec::with_capacity(input.len());
                for (key, val) in input {
                    let key = key_field.validate(&format!("{}_key", name), key)?;
                    let val = value_field.validate(&format!("{}_value", name), val)?;
                    map_insert(&mut out, key, val);
                }
                Ok(Value::Map(out))
            }
        }
    }
}

/// A fixed-arity positional collection: the input length must equal the
/// declared item-constraint count exactly.
#[derive(Debug, Clone)]
pub struct TupleField {
    pub items: Vec<Field>,
    pub unique_items: bool,
}

pub fn tuple(items: Vec<Field>) -> TupleField {
    TupleField {
        items,
        unique_items: false,
    }
}

impl TupleField {
    pub fn unique_items(mut self, unique: bool) -> Self {
        self.unique_items = unique;
        self
    }

    pub(crate) fn validate(&self, name: &str, value: &Value) -> Result<Value> {
        let Value::Tuple(input) = value else {
            return Err(Error::type_error(name, "expected a tuple"));
        };
        if self.unique_items {
            check_unique(name, input)?;
        }
        if self.items.len() != input.len() {
            return Err(Error::value_error(
                name,
                format!("expected a tuple of length {}", self.items.len()),
            ));
        }
        let mut out = Vec::with_capacity(input.len());
        for (i, item) in self.items.iter().enumerate() {
            out.push(item.validate(&format!("{}_{}", name, i), &input[i])?);
        }
        Ok(Value::Tuple(out))
    }
}
