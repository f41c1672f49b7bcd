//! Schema document to structure-definition source text
//!
//! Produces builder-style declaration source for a schema document: a
//! header line naming the type, optional `additional_properties` and
//! `required` directives, then one attribute declaration per schema
//! property in the schema's key order. The output is text to be
//! materialized in a source file, not an executable object.
//!
//! Copyright (c) 2025 Strukt Team
//! Licensed under the Apache-2.0 license

use crate::error::{Result, SchemaError};
use crate::to_schema::Definitions;
use serde_json::{Map as JsonMap, Value as JsonValue};

const META_KEYS: [&str; 5] = [
    "type",
    "required",
    "additionalProperties",
    "definitions",
    "description",
];

/// Render one structure type's declaration source.
///
/// `$ref` attributes render as `reference(&<snake_case_name>)`, assuming
/// the referenced declaration (see [`schema_definitions_to_code`]) is
/// bound to that variable.
pub fn schema_to_struct_code(
    name: &str,
    schema: &JsonMap<String, JsonValue>,
    definitions: &Definitions,
) -> Result<String> {
    let mut lines = Vec::new();
    if let Some(JsonValue::String(description)) = schema.get("description") {
        lines.push(format!("// {}", description));
    }
    lines.push(format!(
        "let {} = Structure::builder(\"{}\")",
        snake_case(name),
        name
    ));
    if let Some(JsonValue::Bool(false)) = schema.get("additionalProperties") {
        lines.push("    .additional_properties(false)".to_string());
    }
    if let Some(JsonValue::Array(required)) = schema.get("required") {
        lines.push(format!("    .required({})", required_code(required)?));
    }
    for (key, value) in schema {
        if META_KEYS.contains(&key.as_str()) {
            continue;
        }
        lines.push(format!(
            "    .field(\"{}\", {})",
            key,
            field_code(value, definitions)?
        ));
    }
    lines.push("    .build()?;".to_string());
    Ok(lines.join("\n"))
}

/// Render a complete module-shaped artifact for a schema document: an
/// import line, one declaration per definition, then the top-level
/// structure's declaration, separated by blank lines.
pub fn schema_to_module_code(
    name: &str,
    schema: &JsonMap<String, JsonValue>,
    definitions: &Definitions,
) -> Result<String> {
    let mut blocks = vec!["use strukt_core::*;".to_string()];
    if !definitions.is_empty() {
        blocks.push(schema_definitions_to_code(definitions)?);
    }
    blocks.push(schema_to_struct_code(name, schema, definitions)?);
    Ok(blocks.join("\n\n"))
}

/// Render a declaration for every definition, in order, separated by
/// blank lines.
pub fn schema_definitions_to_code(definitions: &Definitions) -> Result<String> {
    let mut blocks = Vec::with_capacity(definitions.len());
    for (name, schema) in definitions {
        let JsonValue::Object(schema) = schema else {
            return Err(SchemaError::Malformed(format!(
                "definition {} must be an object",
                name
            )));
        };
        blocks.push(schema_to_struct_code(name, schema, definitions)?);
    }
    Ok(blocks.join("\n\n"))
}

/// Render one constraint's builder expression.
pub fn field_code(schema: &JsonValue, definitions: &Definitions) -> Result<String> {
    let JsonValue::Object(schema) = schema else {
        return Err(SchemaError::Malformed(
            "a constraint schema must be an object".to_string(),
        ));
    };
    if let Some(JsonValue::String(target)) = schema.get("$ref") {
        let name = target
            .strip_prefix("#/definitions/")
            .ok_or_else(|| SchemaError::UnresolvedRef(target.clone()))?;
        return Ok(format!("reference(&{})", snake_case(name)));
    }
    for (key, builder) in [
        ("allOf", "all_of"),
        ("anyOf", "any_of"),
        ("oneOf", "one_of"),
        ("not", "not_of"),
    ] {
        if let Some(members) = schema.get(key) {
            return combinator_code(builder, members, definitions);
        }
    }

    let type_name = match schema.get("type") {
        None => "object",
        Some(JsonValue::String(name)) => name.as_str(),
        Some(_) => return Err(SchemaError::Malformed("type must be a string".to_string())),
    };
    match type_name {
        "object" => embedded_code(schema, definitions),
        "number" => number_code("number()", schema),
        "integer" => number_code("integer()", schema),
        "float" => number_code("float()", schema),
        "string" => string_code(schema),
        "boolean" => Ok("boolean()".to_string()),
        "enum" => enum_code(schema),
        "array" => array_code(schema, definitions),
        other => Err(SchemaError::UnknownType(other.to_string())),
    }
}

fn combinator_code(
    builder: &str,
    members: &JsonValue,
    definitions: &Definitions,
) -> Result<String> {
    let JsonValue::Array(members) = members else {
        return Err(SchemaError::Malformed(format!("{} must hold a list", builder)));
    };
    let rendered: Result<Vec<String>> = members
        .iter()
        .map(|m| Ok(format!("{}.into()", field_code(m, definitions)?)))
        .collect();
    Ok(format!("{}(vec![{}])", builder, rendered?.join(", ")))
}

fn number_code(base: &str, schema: &JsonMap<String, JsonValue>) -> Result<String> {
    let mut code = base.to_string();
    for (key, chain) in [
        ("multiplesOf", "multiples_of"),
        ("minimum", "minimum"),
        ("maximum", "maximum"),
    ] {
        if let Some(value) = schema.get(key) {
            code.push_str(&format!(".{}({})", chain, number_literal(value, key)?));
        }
    }
    if let Some(JsonValue::Bool(true)) = schema.get("exclusiveMaximum") {
        code.push_str(".exclusive_maximum(true)");
    }
    Ok(code)
}

fn string_code(schema: &JsonMap<String, JsonValue>) -> Result<String> {
    let mut code = "string()".to_string();
    for (key, chain) in [("minLength", "min_length"), ("maxLength", "max_length")] {
        if let Some(value) = schema.get(key) {
            let n = value.as_u64().ok_or_else(|| {
                SchemaError::Malformed(format!("{} must be a non-negative integer", key))
            })?;
            code.push_str(&format!(".{}({})", chain, n));
        }
    }
    if let Some(JsonValue::String(pattern)) = schema.get("pattern") {
        code.push_str(&format!(".pattern({:?})?", pattern));
    }
    Ok(code)
}

fn enum_code(schema: &JsonMap<String, JsonValue>) -> Result<String> {
    let Some(JsonValue::Array(values)) = schema.get("values") else {
        return Err(SchemaError::Malformed(
            "an enum schema must hold a values list".to_string(),
        ));
    };
    let rendered: Result<Vec<String>> = values
        .iter()
        .map(|v| Ok(format!("Value::from({})", value_literal(v)?)))
        .collect();
    Ok(format!("enumeration(vec![{}])", rendered?.join(", ")))
}

fn array_code(schema: &JsonMap<String, JsonValue>, definitions: &Definitions) -> Result<String> {
    let mut code = "array()".to_string();
    if let Some(JsonValue::Bool(true)) = schema.get("uniqueItems") {
        code.push_str(".unique_items(true)");
    }
    if let Some(JsonValue::Bool(allowed)) = schema.get("additionalItems") {
        code.push_str(&format!(".additional_items({})", allowed));
    }
    for (key, chain) in [("minItems", "min_items"), ("maxItems", "max_items")] {
        if let Some(value) = schema.get(key) {
            let n = value.as_u64().ok_or_else(|| {
                SchemaError::Malformed(format!("{} must be a non-negative integer", key))
            })?;
            code.push_str(&format!(".{}({})", chain, n));
        }
    }
    match schema.get("items") {
        None => {}
        Some(JsonValue::Array(items)) => {
            let rendered: Result<Vec<String>> = items
                .iter()
                .map(|i| Ok(format!("{}.into()", field_code(i, definitions)?)))
                .collect();
            code.push_str(&format!(".items_positional(vec![{}])", rendered?.join(", ")));
        }
        Some(item) => {
            code.push_str(&format!(".items({})", field_code(item, definitions)?));
        }
    }
    Ok(code)
}

fn embedded_code(schema: &JsonMap<String, JsonValue>, definitions: &Definitions) -> Result<String> {
    let mut code = "embedded()".to_string();
    if let Some(JsonValue::Bool(false)) = schema.get("additionalProperties") {
        code.push_str(".additional_properties(false)");
    }
    if let Some(JsonValue::Array(required)) = schema.get("required") {
        code.push_str(&format!(".required({})", required_code(required)?));
    }
    for (key, value) in schema {
        if META_KEYS.contains(&key.as_str()) {
            continue;
        }
        code.push_str(&format!(
            ".field(\"{}\", {})",
            key,
            field_code(value, definitions)?
        ));
    }
    code.push_str(".build()?");
    Ok(code)
}

fn required_code(required: &[JsonValue]) -> Result<String> {
    if required.is_empty() {
        return Ok("Vec::<String>::new()".to_string());
    }
    let names: Result<Vec<String>> = required
        .iter()
        .map(|name| match name {
            JsonValue::String(s) => Ok(format!("{:?}", s)),
            _ => Err(SchemaError::Malformed(
                "required must be a list of strings".to_string(),
            )),
        })
        .collect();
    Ok(format!("[{}]", names?.join(", ")))
}

fn number_literal(value: &JsonValue, key: &str) -> Result<String> {
    if let Some(i) = value.as_i64() {
        Ok(i.to_string())
    } else if let Some(f) = value.as_f64() {
        Ok(format!("{:?}", f))
    } else {
        Err(SchemaError::Malformed(format!("{} must be a number", key)))
    }
}

fn value_literal(value: &JsonValue) -> Result<String> {
    match value {
        JsonValue::Bool(b) => Ok(b.to_string()),
        JsonValue::String(s) => Ok(format!("{:?}", s)),
        _ => number_literal(value, "values"),
    }
}

fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
