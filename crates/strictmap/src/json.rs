// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! JSON bridging for plain values and typed instances.
//!
//! Key order survives both directions (`serde_json` with `preserve_order`),
//! so a parse/serialize round trip keeps the document's insertion order.

use crate::map::{StrictMap, StrictMapError};
use crate::registry::{get_schema, SchemaSource};
use crate::schema::Schema;
use crate::value::{Value, ValueMap};
use std::fmt;
use std::sync::Arc;

/// Errors for JSON parsing into typed instances.
#[derive(Debug)]
pub enum JsonParseError {
    /// The text is not valid JSON.
    Syntax(String),
    /// The document root is not a JSON object.
    NotAnObject,
    /// The document parsed but failed schema validation.
    Validation(StrictMapError),
}

impl fmt::Display for JsonParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax(msg) => write!(f, "invalid JSON: {}", msg),
            Self::NotAnObject => write!(f, "document root is not a JSON object"),
            Self::Validation(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for JsonParseError {}

impl From<StrictMapError> for JsonParseError {
    fn from(err: StrictMapError) -> Self {
        Self::Validation(err)
    }
}

/// Convert a value to JSON.
///
/// Typed instances serialize through their plain form; wide strings fold to
/// plain JSON strings. Non-finite floats have no JSON rendering and map to
/// null, as does the never-stored EMPTY sentinel.
pub fn to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null | Value::Empty => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::I64(i) => serde_json::Value::from(*i),
        Value::U64(u) => serde_json::Value::from(*u),
        Value::F64(x) => serde_json::Number::from_f64(*x)
            .map_or(serde_json::Value::Null, serde_json::Value::Number),
        Value::Str(s) | Value::WStr(s) => serde_json::Value::String(s.clone()),
        Value::List(items) => serde_json::Value::Array(items.iter().map(to_json).collect()),
        Value::Map(map) => map_to_json(map),
        Value::Struct(instance) => map_to_json(&instance.to_plain()),
    }
}

/// Convert a plain map to a JSON object.
pub fn map_to_json(map: &ValueMap) -> serde_json::Value {
    serde_json::Value::Object(
        map.iter()
            .map(|(key, value)| (key.to_string(), to_json(value)))
            .collect(),
    )
}

/// Convert JSON to a plain value.
pub fn from_json(value: serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::I64(i)
            } else if let Some(u) = n.as_u64() {
                Value::U64(u)
            } else {
                Value::F64(n.as_f64().unwrap_or(0.0))
            }
        }
        serde_json::Value::String(s) => Value::Str(s),
        serde_json::Value::Array(items) => {
            Value::List(items.into_iter().map(from_json).collect())
        }
        serde_json::Value::Object(fields) => Value::Map(
            fields
                .into_iter()
                .map(|(key, value)| (key, from_json(value)))
                .collect(),
        ),
    }
}

/// Convert a JSON object to a plain map.
pub fn json_to_map(value: serde_json::Value) -> Result<ValueMap, JsonParseError> {
    match from_json(value) {
        Value::Map(map) => Ok(map),
        _ => Err(JsonParseError::NotAnObject),
    }
}

/// Parse JSON text into a validated instance of the given schema.
pub fn from_json_str(schema: &Arc<Schema>, text: &str) -> Result<StrictMap, JsonParseError> {
    let parsed: serde_json::Value =
        serde_json::from_str(text).map_err(|err| JsonParseError::Syntax(err.to_string()))?;
    let map = json_to_map(parsed)?;
    Ok(StrictMap::from_map(schema, map)?)
}

/// Parse JSON text against the registered schema of `T`.
pub fn parse_json<T: SchemaSource>(text: &str) -> Result<StrictMap, JsonParseError> {
    from_json_str(&get_schema::<T>(), text)
}
