//! Error types for the schema mapping layer
//!
//! Copyright (c) 2025 Strukt Team
//! Licensed under the Apache-2.0 license

use thiserror::Error;

/// Errors raised while converting between structure types and schema
/// documents.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The constraint has no schema encoding.
    #[error("unsupported constraint: {0}")]
    Unsupported(String),

    /// The schema names a `type` outside the mapped vocabulary.
    #[error("unknown schema type: {0}")]
    UnknownType(String),

    /// A `$ref` points at a definition that is absent or circular.
    #[error("unresolved reference: {0}")]
    UnresolvedRef(String),

    /// The schema document is structurally invalid.
    #[error("malformed schema: {0}")]
    Malformed(String),

    /// Building the resulting structure type failed.
    #[error(transparent)]
    Structure(#[from] strukt_core::Error),
}

pub type Result<T> = std::result::Result<T, SchemaError>;
