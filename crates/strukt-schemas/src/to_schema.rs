//! Structure type to schema document conversion
//!
//! Every mapped constraint kind has a self-describing encoding, so a
//! document produced here can be fed back through
//! [`structure_from_schema`](crate::structure_from_schema) to obtain a
//! structure type with the same acceptance behavior.
//!
//! Copyright (c) 2025 Strukt Team
//! Licensed under the Apache-2.0 license

use crate::error::{Result, SchemaError};
use serde_json::{json, Map as JsonMap, Value as JsonValue};
use std::sync::Arc;
use strukt_core::fields::{
    ArrayField, ArrayItems, EnumStringField, NumberDomain, NumberField, StringField,
};
use strukt_core::{Field, FieldKind, Structure};
use tracing::debug;

/// The shared `definitions` document: structure-type name to schema.
pub type Definitions = JsonMap<String, JsonValue>;

/// Convert a structure type to its schema document.
///
/// Referenced structure types are emitted once into `definitions` and
/// pointed at with `{"$ref": "#/definitions/<name>"}`; anonymous embedded
/// types are inlined. Declared attributes keep their declaration order,
/// followed by `required` and `additionalProperties`.
pub fn structure_to_schema(
    ty: &Arc<Structure>,
    definitions: &mut Definitions,
) -> Result<JsonMap<String, JsonValue>> {
    let mut schema = JsonMap::new();
    schema.insert("type".to_string(), json!("object"));
    for (name, field) in ty.fields() {
        schema.insert(name.to_string(), field_to_schema(field, definitions)?);
    }
    schema.insert(
        "required".to_string(),
        JsonValue::Array(ty.required().iter().map(|r| json!(r)).collect()),
    );
    schema.insert(
        "additionalProperties".to_string(),
        json!(ty.additional_properties()),
    );
    debug!(structure = %ty.name(), keys = schema.len(), "emitted schema");
    Ok(schema)
}

/// Convert one constraint to its schema form.
pub fn field_to_schema(field: &Field, definitions: &mut Definitions) -> Result<JsonValue> {
    match field.kind() {
        FieldKind::Number(f) => number_schema(f),
        FieldKind::String(f) => Ok(string_schema(f, None)),
        FieldKind::Boolean => Ok(json!({ "type": "boolean" })),
        FieldKind::Enum(f) => {
            let values: Vec<JsonValue> = f.values.iter().map(|v| v.to_json()).collect();
            Ok(json!({ "type": "enum", "values": values }))
        }
        FieldKind::EnumString(f) => enum_string_schema(f),
        FieldKind::SizedString(f) => Ok(string_schema(&f.string, Some(f.max_len))),
        FieldKind::Array(f) => array_schema(f, definitions),
        FieldKind::AllOf(members) => combinator_schema("allOf", members, definitions),
        FieldKind::AnyOf(members) => combinator_schema("anyOf", members, definitions),
        FieldKind::OneOf(members) => combinator_schema("oneOf", members, definitions),
        FieldKind::Not(members) => combinator_schema("not", members, definitions),
        FieldKind::Reference(ty) => reference_schema(ty, definitions),
        FieldKind::Embedded(ty) => {
            let schema = structure_to_schema(ty, definitions)?;
            Ok(JsonValue::Object(schema))
        }
        FieldKind::DateString(_) => Err(SchemaError::Unsupported("date string".to_string())),
        FieldKind::Sized(_) => Err(SchemaError::Unsupported("sized value".to_string())),
        FieldKind::Set(_) => Err(SchemaError::Unsupported("set".to_string())),
        FieldKind::Map(_) => Err(SchemaError::Unsupported("map".to_string())),
        FieldKind::Tuple(_) => Err(SchemaError::Unsupported("tuple".to_string())),
        FieldKind::Custom(f) => Err(SchemaError::Unsupported(f.type_name.clone())),
    }
}

fn number_schema(f: &NumberField) -> Result<JsonValue> {
    if f.positive {
        return Err(SchemaError::Unsupported(
            "positivity constraint".to_string(),
        ));
    }
    let type_name = match f.domain {
        NumberDomain::Any => "number",
        NumberDomain::Integer => "integer",
        NumberDomain::Float => "float",
    };
    let mut schema = JsonMap::new();
    schema.insert("type".to_string(), json!(type_name));
    if let Some(m) = f.multiples_of {
        schema.insert("multiplesOf".to_string(), m.to_json());
    }
    if let Some(m) = f.minimum {
        schema.insert("minimum".to_string(), m.to_json());
    }
    if let Some(m) = f.maximum {
        schema.insert("maximum".to_string(), m.to_json());
    }
    if f.exclusive_maximum {
        schema.insert("exclusiveMaximum".to_string(), json!(true));
    }
    Ok(JsonValue::Object(schema))
}

fn string_schema(f: &StringField, max_len: Option<usize>) -> JsonValue {
    let mut schema = JsonMap::new();
    schema.insert("type".to_string(), json!("string"));
    if let Some(n) = f.min_length {
        schema.insert("minLength".to_string(), json!(n));
    }
    let max = match (f.max_length, max_len) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    };
    if let Some(n) = max {
        schema.insert("maxLength".to_string(), json!(n));
    }
    if let Some(p) = f.pattern_source() {
        schema.insert("pattern".to_string(), json!(p));
    }
    JsonValue::Object(schema)
}

fn enum_string_schema(f: &EnumStringField) -> Result<JsonValue> {
    // extra string constraints over the candidate set have no encoding
    // that keeps acceptance behavior intact
    if f.string.min_length.is_some()
        || f.string.max_length.is_some()
        || f.string.pattern_source().is_some()
    {
        return Err(SchemaError::Unsupported(
            "string constraints on an enum".to_string(),
        ));
    }
    let values: Vec<JsonValue> = f.values.iter().map(|v| json!(v)).collect();
    Ok(json!({ "type": "enum", "values": values }))
}

fn array_schema(f: &ArrayField, definitions: &mut Definitions) -> Result<JsonValue> {
    let mut schema = JsonMap::new();
    schema.insert("type".to_string(), json!("array"));
    if f.unique_items {
        schema.insert("uniqueItems".to_string(), json!(true));
    }
    if let Some(allowed) = f.additional_items {
        schema.insert("additionalItems".to_string(), json!(allowed));
    }
    if let Some(n) = f.max_items {
        schema.insert("maxItems".to_string(), json!(n));
    }
    if let Some(n) = f.min_items {
        schema.insert("minItems".to_string(), json!(n));
    }
    match &f.items {
        ArrayItems::Any => {}
        ArrayItems::Single(item) => {
            schema.insert("items".to_string(), field_to_schema(item, definitions)?);
        }
        ArrayItems::Positional(items) => {
            let schemas: Result<Vec<JsonValue>> = items
                .iter()
                .map(|item| field_to_schema(item, definitions))
                .collect();
            schema.insert("items".to_string(), JsonValue::Array(schemas?));
        }
    }
    Ok(JsonValue::Object(schema))
}

fn combinator_schema(
    key: &str,
    members: &[Field],
    definitions: &mut Definitions,
) -> Result<JsonValue> {
    let schemas: Result<Vec<JsonValue>> = members
        .iter()
        .map(|member| field_to_schema(member, definitions))
        .collect();
    Ok(json!({ key: schemas? }))
}

fn reference_schema(ty: &Arc<Structure>, definitions: &mut Definitions) -> Result<JsonValue> {
    // register each reachable type once, even when it is referenced from
    // several attributes; the placeholder keeps recursion from re-entering
    if !definitions.contains_key(ty.name()) {
        definitions.insert(ty.name().to_string(), JsonValue::Null);
        let schema = structure_to_schema(ty, definitions)?;
        definitions.insert(ty.name().to_string(), JsonValue::Object(schema));
    }
    Ok(json!({ "$ref": format!("#/definitions/{}", ty.name()) }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use strukt_core::{
        array, date_string, enumeration, integer, number, positive, string, Value,
    };

    #[test]
    fn test_number_schema_keeps_parameter_representation() {
        let field: Field = number().multiples_of(0.5).minimum(-10).maximum(20).into();
        let mut defs = Definitions::new();
        let schema = field_to_schema(&field, &mut defs).unwrap();
        assert_eq!(
            schema,
            json!({"type": "number", "multiplesOf": 0.5, "minimum": -10, "maximum": 20})
        );
    }

    #[test]
    fn test_integer_schema_and_exclusive_maximum() {
        let field: Field = integer().maximum(100).exclusive_maximum(true).into();
        let mut defs = Definitions::new();
        assert_eq!(
            field_to_schema(&field, &mut defs).unwrap(),
            json!({"type": "integer", "maximum": 100, "exclusiveMaximum": true})
        );
    }

    #[test]
    fn test_positivity_has_no_schema_form() {
        let field: Field = positive().into();
        let mut defs = Definitions::new();
        let err = field_to_schema(&field, &mut defs).unwrap_err();
        assert!(matches!(err, SchemaError::Unsupported(_)));
    }

    #[test]
    fn test_string_schema_emits_pattern_source() {
        let field: Field = string()
            .min_length(3)
            .max_length(8)
            .pattern("[A-Za-z]+$")
            .unwrap()
            .into();
        let mut defs = Definitions::new();
        assert_eq!(
            field_to_schema(&field, &mut defs).unwrap(),
            json!({"type": "string", "minLength": 3, "maxLength": 8, "pattern": "[A-Za-z]+$"})
        );
    }

    #[test]
    fn test_enum_schema_lists_values() {
        let field: Field = enumeration(vec![Value::from(1), Value::from("x")]).into();
        let mut defs = Definitions::new();
        assert_eq!(
            field_to_schema(&field, &mut defs).unwrap(),
            json!({"type": "enum", "values": [1, "x"]})
        );
    }

    #[test]
    fn test_positional_array_items() {
        let field: Field = array()
            .items_positional(vec![integer().into(), string().into()])
            .additional_items(true)
            .into();
        let mut defs = Definitions::new();
        assert_eq!(
            field_to_schema(&field, &mut defs).unwrap(),
            json!({
                "type": "array",
                "additionalItems": true,
                "items": [{"type": "integer"}, {"type": "string"}]
            })
        );
    }

    #[test]
    fn test_unsupported_kinds_are_reported() {
        let field: Field = date_string().into();
        let mut defs = Definitions::new();
        assert!(matches!(
            field_to_schema(&field, &mut defs),
            Err(SchemaError::Unsupported(_))
        ));
    }
}
