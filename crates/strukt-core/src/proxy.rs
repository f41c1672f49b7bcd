//! Live mutation proxies for collection-backed attributes
//!
//! Each mutating operation copies the stored collection, applies the
//! change to the copy, and routes the complete candidate through
//! [`Instance::set`]. Validation failure leaves the stored collection
//! untouched; there is no partial commit.
//!
//! Copyright (c) 2025 Strukt Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::instance::Instance;
use crate::value::{map_get, map_insert, map_remove, Value};

/// Mutable view over an array attribute.
pub struct ListProxy<'a> {
    instance: &'a mut Instance,
    name: String,
}

impl<'a> ListProxy<'a> {
    pub(crate) fn new(instance: &'a mut Instance, name: &str) -> Self {
        ListProxy {
            instance,
            name: name.to_string(),
        }
    }

    fn snapshot(&self) -> Result<Vec<Value>> {
        match self.instance.get(&self.name) {
            Some(Value::List(items)) => Ok(items.clone()),
            _ => Err(Error::type_error(&self.name, "expected an array attribute")),
        }
    }

    fn commit(&mut self, candidate: Vec<Value>) -> Result<()> {
        self.instance.set(&self.name, Value::List(candidate))
    }

    pub fn len(&self) -> usize {
        match self.instance.get(&self.name) {
            Some(Value::List(items)) => items.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        match self.instance.get(&self.name) {
            Some(Value::List(items)) => items.get(index),
            _ => None,
        }
    }

    pub fn to_vec(&self) -> Vec<Value> {
        self.snapshot().unwrap_or_default()
    }

    /// Replace the element at `index`, revalidating the whole collection.
    pub fn set(&mut self, index: usize, value: Value) -> Result<()> {
        let mut candidate = self.snapshot()?;
        if index >= candidate.len() {
            return Err(Error::value_error(&self.name, "index out of range"));
        }
        candidate[index] = value;
        self.commit(candidate)
    }

    pub fn push(&mut self, value: Value) -> Result<()> {
        let mut candidate = self.snapshot()?;
        candidate.push(value);
        self.commit(candidate)
    }

    pub fn insert(&mut self, index: usize, value: Value) -> Result<()> {
        let mut candidate = self.snapshot()?;
        if index > candidate.len() {
            return Err(Error::value_error(&self.name, "index out of range"));
        }
        candidate.insert(index, value);
        self.commit(candidate)
    }

    pub fn extend<I>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = Value>,
    {
        let mut candidate = self.snapshot()?;
        candidate.extend(values);
        self.commit(candidate)
    }

    /// Remove the first element equal to `value`.
    pub fn remove_value(&mut self, value: &Value) -> Result<()> {
        let mut candidate = self.snapshot()?;
        let pos = candidate
            .iter()
            .position(|item| item == value)
            .ok_or_else(|| Error::value_error(&self.name, "value not found"))?;
        candidate.remove(pos);
        self.commit(candidate)
    }

    /// Remove and return the last element.
    pub fn pop(&mut self) -> Result<Value> {
        let candidate = self.snapshot()?;
        if candidate.is_empty() {
            return Err(Error::value_error(&self.name, "pop from an empty array"));
        }
        self.pop_at(candidate.len() - 1)
    }

    /// Remove and return the element at `index`.
    pub fn pop_at(&mut self, index: usize) -> Result<Value> {
        let mut candidate = self.snapshot()?;
        if index >= candidate.len() {
            return Err(Error::value_error(&self.name, "index out of range"));
        }
        let removed = candidate.remove(index);
        self.commit(candidate)?;
        Ok(removed)
    }
}

/// Mutable view over a map attribute.
pub struct MapProxy<'a> {
    instance: &'a mut Instance,
    name: String,
}

impl<'a> MapProxy<'a> {
    pub(crate) fn new(instance: &'a mut Instance, name: &str) -> Self {
        MapProxy {
            instance,
            name: name.to_string(),
        }
    }

    fn snapshot(&self) -> Result<Vec<(Value, Value)>> {
        match self.instance.get(&self.name) {
            Some(Value::Map(entries)) => Ok(entries.clone()),
            _ => Err(Error::type_error(&self.name, "expected a mapping attribute")),
        }
    }

    fn commit(&mut self, candidate: Vec<(Value, Value)>) -> Result<()> {
        self.instance.set(&self.name, Value::Map(candidate))
    }

    pub fn len(&self) -> usize {
        match self.instance.get(&self.name) {
            Some(Value::Map(entries)) => entries.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        match self.instance.get(&self.name) {
            Some(Value::Map(entries)) => map_get(entries, key),
            _ => None,
        }
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        self.get(key).is_some()
    }

    /// Insert or replace one entry, revalidating the whole collection.
    pub fn insert(&mut self, key: Value, value: Value) -> Result<()> {
        let mut candidate = self.snapshot()?;
        map_insert(&mut candidate, key, value);
        self.commit(candidate)
    }

    /// Remove one entry and return its value.
    pub fn remove(&mut self, key: &Value) -> Result<Value> {
        let mut candidate = self.snapshot()?;
        let removed = map_remove(&mut candidate, key)
            .ok_or_else(|| Error::value_error(&self.name, "key not found"))?;
        self.commit(candidate)?;
        Ok(removed)
    }

    /// Bulk update: insert or replace every given entry in one validated
    /// commit.
    pub fn merge<I>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (Value, Value)>,
    {
        let mut candidate = self.snapshot()?;
        for (key, value) in entries {
            map_insert(&mut candidate, key, value);
        }
        self.commit(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{array, integer, map, string};
    use crate::structure::Structure;
    use std::sync::Arc;

    fn holder() -> Arc<Structure> {
        Structure::builder("Holder")
            .required(["xs"])
            .field("xs", array().items(integer().maximum(10)).max_items(3))
            .field("m", map().entries(string(), integer().minimum(0)).unwrap())
            .build()
            .unwrap()
    }

    fn ints(values: &[i64]) -> Value {
        Value::List(values.iter().map(|&i| Value::Int(i)).collect())
    }

    #[test]
    fn test_push_revalidates_and_rejects_atomically() {
        let ty = holder();
        let mut inst = ty.instantiate([("xs", ints(&[1, 2, 3]))]).unwrap();
        let mut xs = inst.array_mut("xs").unwrap();
        // appending past maxItems fails and leaves the stored value alone
        let err = xs.push(Value::from(4)).unwrap_err();
        assert_eq!(err.to_string(), "xs: expected length of at most 3");
        assert_eq!(inst.get("xs"), Some(&ints(&[1, 2, 3])));
    }

    #[test]
    fn test_index_assignment_revalidates_elements() {
        let ty = holder();
        let mut inst = ty.instantiate([("xs", ints(&[1, 2]))]).unwrap();
        let mut xs = inst.array_mut("xs").unwrap();
        xs.set(0, Value::from(9)).unwrap();
        let err = xs.set(1, Value::from(11)).unwrap_err();
        assert_eq!(err.to_string(), "xs_1: expected a maximum of 10");
        assert_eq!(inst.get("xs"), Some(&ints(&[9, 2])));
    }

    #[test]
    fn test_insert_extend_remove_pop() {
        let ty = holder();
        let mut inst = ty.instantiate([("xs", ints(&[1]))]).unwrap();
        let mut xs = inst.array_mut("xs").unwrap();
        xs.insert(0, Value::from(0)).unwrap();
        xs.extend([Value::from(2)]).unwrap();
        assert_eq!(xs.to_vec(), vec![Value::from(0), Value::from(1), Value::from(2)]);
        xs.remove_value(&Value::from(1)).unwrap();
        assert_eq!(xs.pop().unwrap(), Value::from(2));
        assert_eq!(inst.get("xs"), Some(&ints(&[0])));
        let mut xs = inst.array_mut("xs").unwrap();
        assert!(xs.remove_value(&Value::from(42)).is_err());
    }

    #[test]
    fn test_map_proxy_routes_through_validation() {
        let ty = holder();
        let mut inst = ty
            .instantiate([
                ("xs".to_string(), ints(&[1])),
                (
                    "m".to_string(),
                    Value::Map(vec![(Value::from("a"), Value::from(1))]),
                ),
            ])
            .unwrap();
        let mut m = inst.map_mut("m").unwrap();
        m.insert(Value::from("b"), Value::from(2)).unwrap();
        assert_eq!(m.get(&Value::from("b")), Some(&Value::from(2)));
        // value constraint violated: commit rejected, stored map unchanged
        let err = m.insert(Value::from("c"), Value::from(-1)).unwrap_err();
        assert_eq!(err.to_string(), "m_value: expected a minimum of 0");
        assert_eq!(m.len(), 2);
        // non-string key rejected by the key constraint
        assert!(m.insert(Value::from(1), Value::from(1)).is_err());
    }

    #[test]
    fn test_map_merge_and_remove() {
        let ty = holder();
        let mut inst = ty
            .instantiate([
                ("xs".to_string(), ints(&[1])),
                (
                    "m".to_string(),
                    Value::Map(vec![(Value::from("a"), Value::from(1))]),
                ),
            ])
            .unwrap();
        let mut m = inst.map_mut("m").unwrap();
        m.merge([
            (Value::from("a"), Value::from(9)),
            (Value::from("b"), Value::from(2)),
        ])
        .unwrap();
        assert_eq!(m.get(&Value::from("a")), Some(&Value::from(9)));
        assert_eq!(m.remove(&Value::from("b")).unwrap(), Value::from(2));
        assert!(m.remove(&Value::from("zzz")).is_err());
    }

    #[test]
    fn test_immutable_structure_blocks_proxy_mutation() {
        let ty = Structure::builder("Frozen")
            .immutable()
            .required(["xs"])
            .field("xs", array().items(integer()))
            .build()
            .unwrap();
        let mut inst = ty.instantiate([("xs", ints(&[1, 2]))]).unwrap();
        let mut xs = inst.array_mut("xs").unwrap();
        let err = xs.set(1, Value::from(3)).unwrap_err();
        assert_eq!(err.to_string(), "xs: structure is immutable");
        assert_eq!(inst.get("xs"), Some(&ints(&[1, 2])));
    }
}
