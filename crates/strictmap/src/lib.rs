// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema-validated typed mapping
//!
//! A [`StrictMap`] behaves both as a plain string-keyed mapping and as a
//! typed object: fields are declared once per type, unknown keys are
//! rejected at construction, nested maps parse recursively into typed
//! instances, and the whole structure converts back to plain values.
//!
//! # Features
//!
//! - **Schema registry**: per-type field tables, computed once and cached
//!   for the process lifetime
//! - **Recursive parsing**: nested schemas, lists and string-keyed maps of
//!   nested schemas; everything else passes through untouched
//! - **Defaults without materialization**: schema defaults are served on
//!   reads, never stored
//! - **EMPTY sentinel**: absent-without-default reads are distinguishable
//!   from an explicitly stored null
//!
//! # Example
//!
//! ```rust
//! use strictmap::{get_schema, ScalarKind, Schema, SchemaBuilder, SchemaSource,
//!                 StrictMap, ValueMap};
//!
//! struct Point;
//!
//! impl SchemaSource for Point {
//!     fn declare() -> Schema {
//!         SchemaBuilder::new("Point")
//!             .field("x", ScalarKind::Int)
//!             .field("y", ScalarKind::Int)
//!             .build()
//!     }
//! }
//!
//! struct Line;
//!
//! impl SchemaSource for Line {
//!     fn declare() -> Schema {
//!         SchemaBuilder::new("Line")
//!             .nested_field("start", &get_schema::<Point>())
//!             .nested_field("end", &get_schema::<Point>())
//!             .build()
//!     }
//! }
//!
//! let source = ValueMap::new().with("start", ValueMap::new().with("x", 3).with("y", 4));
//! let line = StrictMap::parse::<Line>(source.clone()).unwrap();
//!
//! // Typed access into the parsed nesting
//! let start = line.attr("start").unwrap().as_struct().unwrap();
//! assert_eq!(start.attr("x").unwrap().as_i64(), Some(3));
//!
//! // Absent field reads yield the EMPTY sentinel
//! assert!(line.attr("end").unwrap().is_empty());
//!
//! // And back to a plain structure
//! assert_eq!(line.to_plain(), source);
//! ```

mod builder;
mod map;
mod registry;
mod schema;
mod value;

#[cfg(feature = "json")]
pub mod json;

pub use builder::SchemaBuilder;
pub use map::{StrictMap, StrictMapError};
pub use registry::{get_schema, schema_of, SchemaSource};
pub use schema::{FieldDescriptor, FieldType, ScalarKind, Schema};
pub use value::{Value, ValueMap, EMPTY};
