//! Strukt Schemas - schema documents for structure types
//!
//! This crate maps [`strukt_core`] structure types to and from JSON
//! Schema draft-4 style documents:
//! - **Emission**: [`structure_to_schema`] renders a structure type as an
//!   ordered schema document, registering referenced types once under a
//!   shared `definitions` document.
//! - **Construction**: [`structure_from_schema`] builds a working
//!   structure type back from a schema document, resolving `$ref`
//!   entries against `definitions`.
//! - **Code generation**: [`schema_to_struct_code`] renders a schema
//!   document as builder-style declaration source text.
//!
//! ## Quick Start
//!
//! ```rust
//! use strukt_core::{integer, string, Structure, Value};
//! use strukt_schemas::{structure_from_schema, structure_to_schema, Definitions};
//!
//! let person = Structure::builder("Person")
//!     .required(["name"])
//!     .field("name", string().max_length(8))
//!     .field("age", integer().minimum(0))
//!     .build()
//!     .unwrap();
//!
//! let mut definitions = Definitions::new();
//! let schema = structure_to_schema(&person, &mut definitions).unwrap();
//! assert_eq!(schema["name"]["maxLength"], 8);
//!
//! // the rebuilt type accepts and rejects the same values
//! let rebuilt = structure_from_schema("Person", &schema, &definitions).unwrap();
//! assert!(rebuilt.instantiate([("name", Value::from("Joe"))]).is_ok());
//! assert!(rebuilt
//!     .instantiate([("name", Value::from("far too long a name"))])
//!     .is_err());
//! ```
//!
//! The caller owns all I/O: documents come in and go out as in-memory
//! ordered mappings, and generated source text goes wherever the caller
//! writes it.
//!
//! Copyright (c) 2025 Strukt Team
//! Licensed under the Apache-2.0 license

pub mod codegen;
pub mod error;
pub mod from_schema;
pub mod to_schema;

pub use codegen::{
    field_code, schema_definitions_to_code, schema_to_module_code, schema_to_struct_code,
};
pub use error::{Result, SchemaError};
pub use from_schema::{field_from_schema, structure_from_schema};
pub use to_schema::{field_to_schema, structure_to_schema, Definitions};
