// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field descriptors and the per-type schema table.

use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// Declared scalar type kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    Int,
    UInt,
    Float,
    Str,
    WStr,
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::UInt => "uint",
            Self::Float => "float",
            Self::Str => "str",
            Self::WStr => "wstr",
        };
        write!(f, "{}", name)
    }
}

/// Declared type of a field.
///
/// This is a closed set of shapes: scalars, a nested schema, a list of
/// nested-schema elements, and a string-keyed map of nested-schema values.
/// Any declaration outside the set is carried as [`FieldType::Opaque`] and
/// its values pass through construction unprocessed.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    /// Scalar type. Values are stored unchanged.
    Scalar(ScalarKind),
    /// Nested schema type. Plain maps are parsed recursively.
    Nested(Arc<Schema>),
    /// List whose elements are parsed against the nested schema.
    ListOf(Arc<Schema>),
    /// String-keyed map whose values are parsed against the nested schema.
    MapOf(Arc<Schema>),
    /// Unrecognized declaration, kept as text. Values pass through.
    Opaque(String),
}

impl FieldType {
    /// Check if this is a scalar declaration.
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    /// Check if this is an opaque (pass-through) declaration.
    pub fn is_opaque(&self) -> bool {
        matches!(self, Self::Opaque(_))
    }

    /// Get the schema wrapped by a nested, list, or map declaration.
    pub fn element_schema(&self) -> Option<&Arc<Schema>> {
        match self {
            Self::Nested(s) | Self::ListOf(s) | Self::MapOf(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => write!(f, "{}", kind),
            Self::Nested(s) => write!(f, "{}", s.name()),
            Self::ListOf(s) => write!(f, "list<{}>", s.name()),
            Self::MapOf(s) => write!(f, "map<str, {}>", s.name()),
            Self::Opaque(text) => write!(f, "{}", text),
        }
    }
}

/// Descriptor for one declared field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Field name.
    pub name: String,
    /// Declared type.
    pub ty: FieldType,
    /// Default value, served on attribute reads when no entry is present.
    pub default: Option<Value>,
}

impl FieldDescriptor {
    /// Create a new field descriptor.
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
            default: None,
        }
    }

    /// Set the default value.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Check whether the field declares a default.
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

/// Ordered field table for one schema type.
///
/// Computed once per type by [`crate::get_schema`] and shared behind an
/// `Arc`. Fields appear in first-declared order with one descriptor per
/// unique name; a derived schema's redeclaration replaces the base entry in
/// place. Class-level constants are kept apart from the field table: they
/// are readable through [`Schema::constant`] and instance attribute reads
/// but are never part of instance state.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    name: String,
    abstract_base: bool,
    fields: Vec<FieldDescriptor>,
    constants: Vec<(String, Value)>,
}

impl Schema {
    pub(crate) fn from_parts(
        name: String,
        abstract_base: bool,
        fields: Vec<FieldDescriptor>,
        constants: Vec<(String, Value)>,
    ) -> Self {
        Self {
            name,
            abstract_base,
            fields,
            constants,
        }
    }

    /// Schema type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check if this schema is an abstract base, refusing direct construction.
    pub fn is_abstract(&self) -> bool {
        self.abstract_base
    }

    /// All field descriptors in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Get field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Get field index by name.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Membership test by field name. Constants are not fields.
    pub fn contains(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the schema declares no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Get a class-level constant by name.
    pub fn constant(&self, name: &str) -> Option<&Value> {
        self.constants
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    /// Iterate over class-level constants in declaration order.
    pub fn constants(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.constants.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::SchemaBuilder;

    #[test]
    fn test_field_lookup() {
        let schema = SchemaBuilder::new("Point")
            .field("x", ScalarKind::Int)
            .field("y", ScalarKind::Int)
            .build();

        assert_eq!(schema.len(), 2);
        assert!(schema.contains("x"));
        assert!(!schema.contains("z"));
        assert_eq!(schema.field("x").map(|f| f.name.as_str()), Some("x"));
        assert_eq!(schema.field_index("y"), Some(1));
        assert!(schema.field("z").is_none());
    }

    #[test]
    fn test_field_type_display() {
        let point = Arc::new(
            SchemaBuilder::new("Point")
                .field("x", ScalarKind::Int)
                .build(),
        );

        assert_eq!(FieldType::Scalar(ScalarKind::Int).to_string(), "int");
        assert_eq!(FieldType::Nested(point.clone()).to_string(), "Point");
        assert_eq!(FieldType::ListOf(point.clone()).to_string(), "list<Point>");
        assert_eq!(FieldType::MapOf(point).to_string(), "map<str, Point>");
        assert_eq!(
            FieldType::Opaque("optional<int>".to_string()).to_string(),
            "optional<int>"
        );
    }

    #[test]
    fn test_element_schema() {
        let point = Arc::new(
            SchemaBuilder::new("Point")
                .field("x", ScalarKind::Int)
                .build(),
        );

        assert!(FieldType::Scalar(ScalarKind::Int).element_schema().is_none());
        let listed = FieldType::ListOf(point.clone());
        assert_eq!(
            listed.element_schema().map(|s| s.name()),
            Some("Point")
        );
        assert!(FieldType::Opaque("seq<int>".into()).element_schema().is_none());
    }

    #[test]
    fn test_descriptor_default() {
        let fd = FieldDescriptor::new("a", FieldType::Scalar(ScalarKind::Int)).with_default(5);
        assert!(fd.has_default());
        assert_eq!(fd.default, Some(Value::I64(5)));

        let bare = FieldDescriptor::new("b", FieldType::Scalar(ScalarKind::Int));
        assert!(!bare.has_default());
    }
}
