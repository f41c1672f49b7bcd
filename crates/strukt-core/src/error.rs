//! Error types for attribute validation
//!
//! Copyright (c) 2025 Strukt Team
//! Licensed under the Apache-2.0 license

use serde::Serialize;
use thiserror::Error;

/// The two kinds of validation failure.
///
/// A `Type` error means the fundamental kind of the input was wrong (a
/// string where a number was expected, a non-mapping for an embedded
/// structure, an unhashable key type). A `Value` error means the kind was
/// right but a constraint was violated (range, pattern, length, uniqueness,
/// combinator logic, immutability).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    Type,
    Value,
}

/// Validation error, always fatal to the current attribute write.
///
/// Errors carry the attribute name they were raised for, so a failure deep
/// inside a nested collection reads like `"scores_2: expected a number"`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum Error {
    /// The input's fundamental kind is wrong.
    #[error("{field}: {message}")]
    Type { field: String, message: String },

    /// The input has the right kind but violates a constraint.
    #[error("{field}: {message}")]
    Value { field: String, message: String },
}

impl Error {
    pub fn type_error<F, M>(field: F, message: M) -> Self
    where
        F: Into<String>,
        M: Into<String>,
    {
        Self::Type {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn value_error<F, M>(field: F, message: M) -> Self
    where
        F: Into<String>,
        M: Into<String>,
    {
        Self::Value {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Type { .. } => ErrorKind::Type,
            Self::Value { .. } => ErrorKind::Value,
        }
    }

    /// The attribute name the error was raised for.
    pub fn field(&self) -> &str {
        match self {
            Self::Type { field, .. } | Self::Value { field, .. } => field,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Type { message, .. } | Self::Value { message, .. } => message,
        }
    }
}

/// Result type for validation operations
pub type Result<T> = std::result::Result<T, Error>;
