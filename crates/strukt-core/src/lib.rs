//! Strukt Core - runtime-validated structures
//!
//! This crate lets a caller declare a record shape ("structure") whose
//! named attributes are individually validated on every write:
//! - **Constraint primitives**: numbers, strings, booleans, enums, date
//!   strings, sized values
//! - **Collection wrappers**: arrays, sets, maps, tuples, with live
//!   mutation proxies that revalidate on in-place updates
//! - **Logical combinators**: all-of, any-of, one-of, not
//! - **Nesting**: structures referenced by type or embedded anonymously
//!
//! ## Quick Start
//!
//! ```rust
//! use strukt_core::{all_of, integer, number, positive, Structure, Value};
//!
//! let example = Structure::builder("Example")
//!     .required(Vec::<String>::new())
//!     .field(
//!         "a",
//!         all_of(vec![
//!             number().multiples_of(5).maximum(20).minimum(-10).into(),
//!             integer().into(),
//!             positive().into(),
//!         ]),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let instance = example.instantiate([("a", Value::from(10))]).unwrap();
//! assert_eq!(instance.get("a"), Some(&Value::from(10)));
//!
//! // -5 fails the positivity member, 3 fails the multiple-of member
//! assert!(example.instantiate([("a", Value::from(-5))]).is_err());
//! assert!(example.instantiate([("a", Value::from(3))]).is_err());
//! ```
//!
//! ## Validation model
//!
//! A constraint is immutable after construction and shared by every
//! instance of the declaring structure type. The attribute name is passed
//! into each validation call rather than stored, so sharing a constraint
//! across collection slots or combinator members is safe. Errors come in
//! exactly two kinds: [`ErrorKind::Type`] (wrong fundamental kind) and
//! [`ErrorKind::Value`] (right kind, constraint violated); both abort the
//! current attribute write and leave the previous value in place.
//!
//! Copyright (c) 2025 Strukt Team
//! Licensed under the Apache-2.0 license

pub mod error;
pub mod fields;
pub mod instance;
pub mod names;
pub mod proxy;
pub mod structure;
pub mod value;

pub use error::{Error, ErrorKind, Result};
pub use fields::{
    all_of, any_of, array, boolean, custom, date_string, embedded, embedded_named, enum_string,
    enumeration, float, immutable, integer, map, not_of, number, one_of, positive, positive_float,
    positive_int, reference, set, sized, sized_string, string, tuple, Field, FieldKind, Num,
};
pub use instance::Instance;
pub use names::NameGenerator;
pub use proxy::{ListProxy, MapProxy};
pub use structure::{Structure, StructureBuilder};
pub use value::Value;
