//! Schema document to structure type conversion
//!
//! The inverse of [`structure_to_schema`](crate::structure_to_schema):
//! dispatch is keyed by `$ref`, by a combinator key, or by `type`, and
//! nested object schemas synthesize anonymous embedded types.
//!
//! Copyright (c) 2025 Strukt Team
//! Licensed under the Apache-2.0 license

use crate::error::{Result, SchemaError};
use crate::to_schema::Definitions;
use serde_json::{Map as JsonMap, Value as JsonValue};
use std::collections::HashMap;
use std::sync::Arc;
use strukt_core::fields::NumberField;
use strukt_core::{
    all_of, any_of, array, boolean, embedded, enumeration, float, integer, not_of, number,
    one_of, reference, string, Field, Num, Structure, Value,
};
use tracing::debug;

/// Keys that describe the object itself rather than declare an attribute.
const META_KEYS: [&str; 5] = [
    "type",
    "required",
    "additionalProperties",
    "definitions",
    "description",
];

/// Build a named structure type from its schema document. `$ref` entries
/// resolve against `definitions`; each referenced type is built once and
/// shared.
///
/// Reference graphs must be acyclic. Emission can register a definition
/// placeholder before recursing into it, but a structure type holds its
/// referenced types by value, so a cyclic `$ref` chain has no buildable
/// form and is reported as [`SchemaError::UnresolvedRef`].
pub fn structure_from_schema(
    name: &str,
    schema: &JsonMap<String, JsonValue>,
    definitions: &Definitions,
) -> Result<Arc<Structure>> {
    let mut resolver = Resolver {
        definitions,
        built: HashMap::new(),
        resolving: Vec::new(),
    };
    let ty = resolver.build_structure(name, schema)?;
    debug!(structure = %name, "built structure type from schema");
    Ok(ty)
}

/// Build one constraint from its schema form.
pub fn field_from_schema(schema: &JsonValue, definitions: &Definitions) -> Result<Field> {
    let mut resolver = Resolver {
        definitions,
        built: HashMap::new(),
        resolving: Vec::new(),
    };
    resolver.field(schema)
}

struct Resolver<'a> {
    definitions: &'a Definitions,
    built: HashMap<String, Arc<Structure>>,
    resolving: Vec<String>,
}

impl Resolver<'_> {
    fn structure(&mut self, name: &str) -> Result<Arc<Structure>> {
        if let Some(ty) = self.built.get(name) {
            return Ok(Arc::clone(ty));
        }
        if self.resolving.iter().any(|n| n == name) {
            return Err(SchemaError::UnresolvedRef(format!(
                "circular reference to {}",
                name
            )));
        }
        let Some(JsonValue::Object(schema)) = self.definitions.get(name) else {
            return Err(SchemaError::UnresolvedRef(name.to_string()));
        };
        self.resolving.push(name.to_string());
        let result = self.build_structure(name, schema);
        self.resolving.pop();
        let ty = result?;
        self.built.insert(name.to_string(), Arc::clone(&ty));
        Ok(ty)
    }

    fn build_structure(
        &mut self,
        name: &str,
        schema: &JsonMap<String, JsonValue>,
    ) -> Result<Arc<Structure>> {
        let mut builder = Structure::builder(name);
        if let Some(required) = schema.get("required") {
            builder = builder.required(string_list(required, "required")?);
        }
        if let Some(allowed) = schema.get("additionalProperties") {
            builder = builder.additional_properties(bool_value(allowed, "additionalProperties")?);
        }
        for (key, value) in schema {
            if META_KEYS.contains(&key.as_str()) {
                continue;
            }
            builder = builder.field(key.as_str(), self.field(value)?);
        }
        Ok(builder.build()?)
    }

    fn field(&mut self, schema: &JsonValue) -> Result<Field> {
        let JsonValue::Object(schema) = schema else {
            return Err(SchemaError::Malformed(
                "a constraint schema must be an object".to_string(),
            ));
        };
        if let Some(target) = schema.get("$ref") {
            return self.reference(target);
        }
        for (key, build) in [
            ("allOf", all_of as fn(Vec<Field>) -> Field),
            ("anyOf", any_of),
            ("oneOf", one_of),
            ("not", not_of),
        ] {
            if let Some(members) = schema.get(key) {
                let JsonValue::Array(members) = members else {
                    return Err(SchemaError::Malformed(format!("{} must hold a list", key)));
                };
                let members: Result<Vec<Field>> =
                    members.iter().map(|m| self.field(m)).collect();
                return Ok(build(members?));
            }
        }

        // absent `type` means a nested object, matching emission
        let type_name = match schema.get("type") {
            None => "object",
            Some(JsonValue::String(name)) => name.as_str(),
            Some(_) => {
                return Err(SchemaError::Malformed("type must be a string".to_string()));
            }
        };
        match type_name {
            "object" => self.embedded_field(schema),
            "number" => Ok(number_field(number(), schema)?.into()),
            "integer" => Ok(number_field(integer(), schema)?.into()),
            "float" => Ok(number_field(float(), schema)?.into()),
            "string" => string_field(schema),
            "boolean" => Ok(boolean()),
            "enum" => enum_field(schema),
            "array" => self.array_field(schema),
            other => Err(SchemaError::UnknownType(other.to_string())),
        }
    }

    fn reference(&mut self, target: &JsonValue) -> Result<Field> {
        let JsonValue::String(target) = target else {
            return Err(SchemaError::Malformed("$ref must be a string".to_string()));
        };
        let name = target
            .strip_prefix("#/definitions/")
            .ok_or_else(|| SchemaError::UnresolvedRef(target.clone()))?;
        Ok(reference(&self.structure(name)?))
    }

    fn embedded_field(&mut self, schema: &JsonMap<String, JsonValue>) -> Result<Field> {
        let mut builder = embedded();
        if let Some(required) = schema.get("required") {
            builder = builder.required(string_list(required, "required")?);
        }
        if let Some(allowed) = schema.get("additionalProperties") {
            builder = builder.additional_properties(bool_value(allowed, "additionalProperties")?);
        }
        for (key, value) in schema {
            if META_KEYS.contains(&key.as_str()) {
                continue;
            }
            builder = builder.field(key.as_str(), self.field(value)?);
        }
        Ok(builder.build()?)
    }

    fn array_field(&mut self, schema: &JsonMap<String, JsonValue>) -> Result<Field> {
        let mut field = array();
        if let Some(unique) = schema.get("uniqueItems") {
            field = field.unique_items(bool_value(unique, "uniqueItems")?);
        }
        if let Some(allowed) = schema.get("additionalItems") {
            field = field.additional_items(bool_value(allowed, "additionalItems")?);
        }
        if let Some(n) = schema.get("minItems") {
            field = field.min_items(usize_value(n, "minItems")?);
        }
        if let Some(n) = schema.get("maxItems") {
            field = field.max_items(usize_value(n, "maxItems")?);
        }
        match schema.get("items") {
            None => {}
            Some(JsonValue::Array(items)) => {
                let items: Result<Vec<Field>> = items.iter().map(|i| self.field(i)).collect();
                field = field.items_positional(items?);
            }
            Some(item) => {
                field = field.items(self.field(item)?);
            }
        }
        Ok(field.into())
    }
}

fn number_field(mut field: NumberField, schema: &JsonMap<String, JsonValue>) -> Result<NumberField> {
    if let Some(m) = schema.get("multiplesOf") {
        field = field.multiples_of(num_value(m, "multiplesOf")?);
    }
    if let Some(m) = schema.get("minimum") {
        field = field.minimum(num_value(m, "minimum")?);
    }
    if let Some(m) = schema.get("maximum") {
        field = field.maximum(num_value(m, "maximum")?);
    }
    if let Some(exclusive) = schema.get("exclusiveMaximum") {
        field = field.exclusive_maximum(bool_value(exclusive, "exclusiveMaximum")?);
    }
    Ok(field)
}

fn string_field(schema: &JsonMap<String, JsonValue>) -> Result<Field> {
    let mut field = string();
    if let Some(n) = schema.get("minLength") {
        field = field.min_length(usize_value(n, "minLength")?);
    }
    if let Some(n) = schema.get("maxLength") {
        field = field.max_length(usize_value(n, "maxLength")?);
    }
    if let Some(pattern) = schema.get("pattern") {
        let JsonValue::String(pattern) = pattern else {
            return Err(SchemaError::Malformed("pattern must be a string".to_string()));
        };
        field = field
            .pattern(pattern)
            .map_err(|e| SchemaError::Malformed(e.to_string()))?;
    }
    Ok(field.into())
}

fn enum_field(schema: &JsonMap<String, JsonValue>) -> Result<Field> {
    let Some(JsonValue::Array(values)) = schema.get("values") else {
        return Err(SchemaError::Malformed(
            "an enum schema must hold a values list".to_string(),
        ));
    };
    Ok(enumeration(values.iter().map(Value::from_json).collect()).into())
}

fn num_value(value: &JsonValue, key: &str) -> Result<Num> {
    if let Some(i) = value.as_i64() {
        Ok(Num::Int(i))
    } else if let Some(f) = value.as_f64() {
        Ok(Num::Float(f))
    } else {
        Err(SchemaError::Malformed(format!("{} must be a number", key)))
    }
}

fn usize_value(value: &JsonValue, key: &str) -> Result<usize> {
    value
        .as_u64()
        .map(|n| n as usize)
        .ok_or_else(|| SchemaError::Malformed(format!("{} must be a non-negative integer", key)))
}

fn bool_value(value: &JsonValue, key: &str) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| SchemaError::Malformed(format!("{} must be a boolean", key)))
}

fn string_list(value: &JsonValue, key: &str) -> Result<Vec<String>> {
    let JsonValue::Array(items) = value else {
        return Err(SchemaError::Malformed(format!(
            "{} must be a list of strings",
            key
        )));
    };
    items
        .iter()
        .map(|item| match item {
            JsonValue::String(s) => Ok(s.clone()),
            _ => Err(SchemaError::Malformed(format!(
                "{} must be a list of strings",
                key
            ))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: JsonValue) -> JsonMap<String, JsonValue> {
        match value {
            JsonValue::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_integer_field_round_behavior() {
        let field =
            field_from_schema(&json!({"type": "integer", "minimum": 10}), &Definitions::new())
                .unwrap();
        assert!(field.validate("n", &Value::from(12)).is_ok());
        assert!(field.validate("n", &Value::from(5)).is_err());
        assert!(field.validate("n", &Value::from(12.5)).is_err());
    }

    #[test]
    fn test_missing_type_means_nested_object() {
        let field = field_from_schema(
            &json!({"a": {"type": "string"}, "required": ["a"]}),
            &Definitions::new(),
        )
        .unwrap();
        let ok = Value::Map(vec![(Value::from("a"), Value::from("x"))]);
        assert!(field.validate("f", &ok).is_ok());
        let missing = Value::Map(vec![]);
        assert!(field.validate("f", &missing).is_err());
    }

    #[test]
    fn test_ref_resolves_through_definitions() {
        let definitions = object(json!({
            "Point": {
                "type": "object",
                "x": {"type": "integer"},
                "y": {"type": "integer"},
                "required": ["x", "y"],
                "additionalProperties": true
            }
        }));
        let schema = object(json!({
            "type": "object",
            "origin": {"$ref": "#/definitions/Point"},
            "required": [],
            "additionalProperties": true
        }));
        let ty = structure_from_schema("Shape", &schema, &definitions).unwrap();
        let err = ty
            .instantiate([("origin", Value::from(3))])
            .unwrap_err();
        assert_eq!(err.to_string(), "origin: expected an instance of Point");
    }

    #[test]
    fn test_unknown_ref_is_reported() {
        let schema = object(json!({
            "type": "object",
            "p": {"$ref": "#/definitions/Missing"},
            "required": []
        }));
        let err = structure_from_schema("S", &schema, &Definitions::new()).unwrap_err();
        assert!(matches!(err, SchemaError::UnresolvedRef(_)));
    }

    #[test]
    fn test_circular_ref_is_reported() {
        let definitions = object(json!({
            "Node": {
                "type": "object",
                "next": {"$ref": "#/definitions/Node"},
                "required": []
            }
        }));
        let schema = object(json!({
            "type": "object",
            "root": {"$ref": "#/definitions/Node"},
            "required": []
        }));
        let err = structure_from_schema("Tree", &schema, &definitions).unwrap_err();
        assert!(matches!(err, SchemaError::UnresolvedRef(_)));
        assert!(err.to_string().contains("circular reference to Node"));
    }

    #[test]
    fn test_unknown_type_is_reported() {
        let err =
            field_from_schema(&json!({"type": "quaternion"}), &Definitions::new()).unwrap_err();
        assert!(matches!(err, SchemaError::UnknownType(_)));
    }

    #[test]
    fn test_combinator_schema_builds_combinator() {
        let field = field_from_schema(
            &json!({"anyOf": [{"type": "integer"}, {"type": "string"}]}),
            &Definitions::new(),
        )
        .unwrap();
        assert!(field.validate("v", &Value::from(3)).is_ok());
        assert!(field.validate("v", &Value::from("x")).is_ok());
        assert!(field.validate("v", &Value::from(true)).is_err());
    }
}
