// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent builder API for Schema.

use crate::schema::{FieldDescriptor, FieldType, ScalarKind, Schema};
use crate::value::Value;
use std::sync::Arc;

/// Builder for creating [`Schema`] instances.
///
/// Base-schema composition replaces inheritance: [`SchemaBuilder::extends`]
/// seeds the field table from a base schema, and a later redeclaration of an
/// inherited name replaces the base entry in place, keeping its position.
#[derive(Debug)]
pub struct SchemaBuilder {
    name: String,
    abstract_base: bool,
    fields: Vec<FieldDescriptor>,
    constants: Vec<(String, Value)>,
}

impl SchemaBuilder {
    /// Create a new builder for a schema type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            abstract_base: false,
            fields: Vec::new(),
            constants: Vec::new(),
        }
    }

    /// Mark the schema as an abstract base. Direct construction of an
    /// instance fails; the schema is only usable through `extends`.
    pub fn abstract_base(mut self) -> Self {
        self.abstract_base = true;
        self
    }

    /// Seed fields and constants from a base schema.
    ///
    /// Call before declaring own fields so that redeclarations override the
    /// inherited entries in place. Chaining several bases composes them in
    /// call order.
    pub fn extends(mut self, base: &Schema) -> Self {
        for field in base.fields() {
            self.push_field(field.clone());
        }
        for (name, value) in base.constants() {
            self.push_constant(name.to_string(), value.clone());
        }
        self
    }

    fn push_field(&mut self, field: FieldDescriptor) {
        match self.fields.iter().position(|f| f.name == field.name) {
            Some(index) => self.fields[index] = field,
            None => self.fields.push(field),
        }
    }

    fn push_constant(&mut self, name: String, value: Value) {
        match self.constants.iter().position(|(k, _)| *k == name) {
            Some(index) => self.constants[index].1 = value,
            None => self.constants.push((name, value)),
        }
    }

    /// Add a scalar field.
    pub fn field(mut self, name: impl Into<String>, kind: ScalarKind) -> Self {
        self.push_field(FieldDescriptor::new(name, FieldType::Scalar(kind)));
        self
    }

    /// Add a string field.
    pub fn string_field(self, name: impl Into<String>) -> Self {
        self.field(name, ScalarKind::Str)
    }

    /// Add a scalar field with a default value.
    pub fn defaulted_field(
        mut self,
        name: impl Into<String>,
        kind: ScalarKind,
        default: impl Into<Value>,
    ) -> Self {
        self.push_field(
            FieldDescriptor::new(name, FieldType::Scalar(kind)).with_default(default),
        );
        self
    }

    /// Add a nested schema field.
    pub fn nested_field(mut self, name: impl Into<String>, schema: &Arc<Schema>) -> Self {
        self.push_field(FieldDescriptor::new(name, FieldType::Nested(schema.clone())));
        self
    }

    /// Add a list-of-nested-schema field.
    pub fn list_field(mut self, name: impl Into<String>, element: &Arc<Schema>) -> Self {
        self.push_field(FieldDescriptor::new(name, FieldType::ListOf(element.clone())));
        self
    }

    /// Add a string-keyed map-of-nested-schema field.
    pub fn map_field(mut self, name: impl Into<String>, element: &Arc<Schema>) -> Self {
        self.push_field(FieldDescriptor::new(name, FieldType::MapOf(element.clone())));
        self
    }

    /// Add a field with an unrecognized declared type. Values of such
    /// fields pass through construction unprocessed.
    pub fn opaque_field(
        mut self,
        name: impl Into<String>,
        declared: impl Into<String>,
    ) -> Self {
        self.push_field(FieldDescriptor::new(name, FieldType::Opaque(declared.into())));
        self
    }

    /// Add a field from a full descriptor.
    pub fn field_with(mut self, descriptor: FieldDescriptor) -> Self {
        self.push_field(descriptor);
        self
    }

    /// Add a class-level constant. Constants never enter the field table
    /// and never become instance state; attribute reads fall back to them.
    pub fn constant(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push_constant(name.into(), value.into());
        self
    }

    /// Build the [`Schema`].
    pub fn build(self) -> Schema {
        Schema::from_parts(self.name, self.abstract_base, self.fields, self.constants)
    }
}
