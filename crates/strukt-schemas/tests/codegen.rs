//! Generated declaration source for a full schema document.

use serde_json::{json, Map as JsonMap, Value as JsonValue};
use strukt_schemas::{schema_definitions_to_code, schema_to_struct_code, Definitions};

fn object(value: JsonValue) -> JsonMap<String, JsonValue> {
    match value {
        JsonValue::Object(map) => map,
        _ => panic!("expected an object"),
    }
}

fn definitions() -> Definitions {
    object(json!({
        "SimpleStruct": {
            "type": "object",
            "name": {
                "type": "string",
                "pattern": "[A-Za-z]+$",
                "maxLength": 8
            },
            "required": ["name"],
            "additionalProperties": true
        }
    }))
}

#[test]
fn test_definitions_code() {
    let code = schema_definitions_to_code(&definitions()).unwrap();
    assert_eq!(
        code,
        "let simple_struct = Structure::builder(\"SimpleStruct\")\n\
         \x20   .required([\"name\"])\n\
         \x20   .field(\"name\", string().max_length(8).pattern(\"[A-Za-z]+$\")?)\n\
         \x20   .build()?;"
    );
}

#[test]
fn test_full_document_code() {
    let schema = object(json!({
        "type": "object",
        "description": "This is a test of schema mapping",
        "foo": {
            "type": "object",
            "a2": {"type": "float"},
            "a1": {"type": "integer"},
            "required": ["a2", "a1"],
            "additionalProperties": true
        },
        "ss": {"$ref": "#/definitions/SimpleStruct"},
        "enum": {"type": "enum", "values": [1, 2, 3]},
        "s": {"maxLength": 5, "type": "string"},
        "i": {"type": "integer", "maximum": 10},
        "all": {"allOf": [{"type": "number"}, {"type": "integer"}]},
        "a": {
            "type": "array",
            "items": [
                {"type": "integer", "multiplesOf": 5},
                {"type": "number"}
            ]
        },
        "required": ["foo", "ss", "enum", "s", "i", "all", "a"],
        "additionalProperties": true
    }));
    let code = schema_to_struct_code("Duba", &schema, &definitions()).unwrap();
    let lines: Vec<&str> = code.lines().collect();
    assert_eq!(lines[0], "// This is a test of schema mapping");
    assert_eq!(lines[1], "let duba = Structure::builder(\"Duba\")");
    assert_eq!(
        lines[2],
        "    .required([\"foo\", \"ss\", \"enum\", \"s\", \"i\", \"all\", \"a\"])"
    );
    assert_eq!(
        lines[3],
        "    .field(\"foo\", embedded().required([\"a2\", \"a1\"])\
         .field(\"a2\", float()).field(\"a1\", integer()).build()?)"
    );
    assert_eq!(lines[4], "    .field(\"ss\", reference(&simple_struct))");
    assert_eq!(
        lines[5],
        "    .field(\"enum\", enumeration(vec![Value::from(1), Value::from(2), Value::from(3)]))"
    );
    assert_eq!(lines[6], "    .field(\"s\", string().max_length(5))");
    assert_eq!(lines[7], "    .field(\"i\", integer().maximum(10))");
    assert_eq!(
        lines[8],
        "    .field(\"all\", all_of(vec![number().into(), integer().into()]))"
    );
    assert_eq!(
        lines[9],
        "    .field(\"a\", array().items_positional(vec![integer().multiples_of(5).into(), \
         number().into()]))"
    );
    assert_eq!(lines[10], "    .build()?;");
    assert_eq!(lines.len(), 11);
}

#[test]
fn test_array_without_items() {
    let schema = object(json!({
        "type": "object",
        "arr": {"type": "array", "uniqueItems": true},
        "required": [],
        "additionalProperties": false
    }));
    let code = schema_to_struct_code("Duba", &schema, &Definitions::new()).unwrap();
    assert_eq!(
        code,
        "let duba = Structure::builder(\"Duba\")\n\
         \x20   .additional_properties(false)\n\
         \x20   .required(Vec::<String>::new())\n\
         \x20   .field(\"arr\", array().unique_items(true))\n\
         \x20   .build()?;"
    );
}
