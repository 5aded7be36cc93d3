// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! StrictMap container: construction, validation, field access, and the
//! inverse traversal back to plain values.

use crate::registry::{get_schema, SchemaSource};
use crate::schema::{FieldType, Schema};
use crate::value::{Value, ValueMap, EMPTY};
use std::fmt;
use std::sync::Arc;

/// Errors for StrictMap operations.
#[derive(Debug, Clone, PartialEq)]
pub enum StrictMapError {
    /// Direct construction of an abstract-base schema.
    AbstractBase(String),
    /// Construction input carried keys that are not declared fields.
    /// All offending keys are collected, sorted.
    UnsupportedKeys {
        type_name: String,
        keys: Vec<String>,
    },
    /// Attribute access for a name that is neither a declared field nor a
    /// class-level constant.
    FieldNotFound(String),
}

impl fmt::Display for StrictMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AbstractBase(name) => {
                write!(
                    f,
                    "{} is an abstract base class and cannot be instantiated",
                    name
                )
            }
            Self::UnsupportedKeys { type_name, keys } => {
                write!(f, "Unsupported key(s) for {}: {}", type_name, keys.join(", "))
            }
            Self::FieldNotFound(name) => write!(f, "Field not found: {}", name),
        }
    }
}

impl std::error::Error for StrictMapError {}

/// A typed mapping instance.
///
/// Simultaneously a generic string-keyed mapping (present-keys surface:
/// [`get`](Self::get), [`contains_key`](Self::contains_key),
/// [`iter`](Self::iter)) and a typed object (schema-aware surface:
/// [`attr`](Self::attr), [`set`](Self::set)). A key is present iff it was
/// supplied at construction or set afterward with a non-[`EMPTY`] value;
/// schema defaults are served on attribute reads, never materialized.
#[derive(Debug, Clone)]
pub struct StrictMap {
    schema: Arc<Schema>,
    entries: ValueMap,
}

impl StrictMap {
    /// Create an empty instance of the given schema.
    pub fn new(schema: &Arc<Schema>) -> Result<Self, StrictMapError> {
        if schema.is_abstract() {
            return Err(StrictMapError::AbstractBase(schema.name().to_string()));
        }
        Ok(Self {
            schema: schema.clone(),
            entries: ValueMap::new(),
        })
    }

    /// Parse a plain map into an instance of the given schema.
    ///
    /// Every key must name a declared field; values of nested, list, and
    /// map declarations are parsed recursively per the coercion rules.
    pub fn from_map(schema: &Arc<Schema>, source: ValueMap) -> Result<Self, StrictMapError> {
        Self::from_map_with(schema, source, ValueMap::new())
    }

    /// Parse a plain map merged with field overrides. Overrides win on key
    /// collision; a colliding key keeps its source position, new override
    /// keys append after the source keys.
    pub fn from_map_with(
        schema: &Arc<Schema>,
        source: ValueMap,
        overrides: ValueMap,
    ) -> Result<Self, StrictMapError> {
        let mut map = Self::new(schema)?;

        let mut merged = source;
        for (key, value) in overrides {
            merged.insert(key, value);
        }

        let mut unknown: Vec<String> = merged
            .keys()
            .filter(|key| !schema.contains(key))
            .map(String::from)
            .collect();
        if !unknown.is_empty() {
            unknown.sort();
            log::debug!(
                "[StrictMap] rejected {} input: unsupported keys {:?}",
                schema.name(),
                unknown
            );
            return Err(StrictMapError::UnsupportedKeys {
                type_name: schema.name().to_string(),
                keys: unknown,
            });
        }

        for (key, raw) in merged {
            if let Some(field) = schema.field(&key) {
                let value = coerce_value(&field.ty, raw)?;
                map.entries.insert(key, value);
            }
        }
        Ok(map)
    }

    /// Parse a plain map against the registered schema of `T`.
    pub fn parse<T: SchemaSource>(source: ValueMap) -> Result<Self, StrictMapError> {
        Self::from_map(&get_schema::<T>(), source)
    }

    /// Create an empty instance of the registered schema of `T`.
    pub fn empty_of<T: SchemaSource>() -> Result<Self, StrictMapError> {
        Self::new(&get_schema::<T>())
    }

    /// The instance's schema.
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// The schema type name.
    pub fn type_name(&self) -> &str {
        self.schema.name()
    }

    // --- typed surface -----------------------------------------------------

    /// Read a field by name.
    ///
    /// Resolution order: stored entry, then schema default, then the
    /// [`EMPTY`] sentinel for a declared field without either; class-level
    /// constants resolve last. An unknown name is `FieldNotFound`.
    pub fn attr(&self, name: &str) -> Result<&Value, StrictMapError> {
        if let Some(value) = self.entries.get(name) {
            return Ok(value);
        }
        if let Some(field) = self.schema.field(name) {
            return match &field.default {
                Some(default) => Ok(default),
                None => Ok(&EMPTY),
            };
        }
        if let Some(constant) = self.schema.constant(name) {
            return Ok(constant);
        }
        Err(StrictMapError::FieldNotFound(name.to_string()))
    }

    /// Write a field by name.
    ///
    /// The name must be a declared field; the value is stored as supplied,
    /// without re-running coercion. Writing [`EMPTY`] removes the entry.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), StrictMapError> {
        if !self.schema.contains(name) {
            return Err(StrictMapError::FieldNotFound(name.to_string()));
        }
        self.entries.insert(name, value.into());
        Ok(())
    }

    // --- generic mapping surface -------------------------------------------

    /// Get a stored value by key. Present keys only; no defaults.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Get a mutable stored value by key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    /// Check for key presence. Defaults do not count as present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove a stored entry.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    /// Number of present entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no entries are present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over present entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter()
    }

    /// Iterate over present keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys()
    }

    // --- inverse traversal --------------------------------------------------

    /// Convert back to a plain nested structure.
    ///
    /// Typed instances become plain maps, wide strings fold to narrow
    /// strings, lists and maps are rebuilt element-wise. Only present keys
    /// appear, in insertion order; defaults are not materialized.
    pub fn to_plain(&self) -> ValueMap {
        self.entries
            .iter()
            .map(|(key, value)| (key.to_string(), plain_value(value)))
            .collect()
    }
}

impl PartialEq for StrictMap {
    fn eq(&self, other: &Self) -> bool {
        self.schema.name() == other.schema.name() && self.entries == other.entries
    }
}

fn plain_value(value: &Value) -> Value {
    match value {
        Value::Struct(map) => Value::Map(map.to_plain()),
        Value::List(items) => Value::List(items.iter().map(plain_value).collect()),
        Value::Map(map) => map
            .iter()
            .map(|(key, value)| (key.to_string(), plain_value(value)))
            .collect::<ValueMap>()
            .into(),
        Value::WStr(text) => Value::Str(text.clone()),
        other => other.clone(),
    }
}

/// Apply the coercion policy for one field value.
///
/// Nulls are never parsed. Plain maps under a nested declaration are parsed
/// recursively; list and map declarations parse their elements one by one,
/// passing non-map elements through. Everything else, including values of
/// scalar and opaque declarations, is stored unchanged.
fn coerce_value(ty: &FieldType, value: Value) -> Result<Value, StrictMapError> {
    match (ty, value) {
        (_, Value::Null) => Ok(Value::Null),
        (FieldType::Nested(_), already @ Value::Struct(_)) => Ok(already),
        (FieldType::Nested(schema), Value::Map(map)) => {
            Ok(Value::Struct(StrictMap::from_map(schema, map)?))
        }
        (FieldType::ListOf(schema), Value::List(items)) => {
            let elements = items
                .into_iter()
                .map(|item| coerce_element(schema, item))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::List(elements))
        }
        (FieldType::MapOf(schema), Value::Map(map)) => {
            let mut out = ValueMap::new();
            for (key, item) in map {
                out.insert(key, coerce_element(schema, item)?);
            }
            Ok(Value::Map(out))
        }
        (_, other) => Ok(other),
    }
}

fn coerce_element(schema: &Arc<Schema>, value: Value) -> Result<Value, StrictMapError> {
    match value {
        Value::Map(map) => Ok(Value::Struct(StrictMap::from_map(schema, map)?)),
        other => Ok(other),
    }
}
