// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Process-wide schema cache.

use crate::map::StrictMap;
use crate::schema::Schema;
use dashmap::DashMap;
use std::any::TypeId;
use std::sync::{Arc, OnceLock};

/// A type that declares a schema.
///
/// Implemented by marker types; [`SchemaSource::declare`] runs once per
/// process, on first [`get_schema`] access, and the resulting [`Schema`] is
/// cached for the process lifetime.
///
/// # Example
///
/// ```rust
/// use strictmap::{ScalarKind, Schema, SchemaBuilder, SchemaSource};
///
/// struct Point;
///
/// impl SchemaSource for Point {
///     fn declare() -> Schema {
///         SchemaBuilder::new("Point")
///             .field("x", ScalarKind::Int)
///             .field("y", ScalarKind::Int)
///             .build()
///     }
/// }
/// ```
pub trait SchemaSource: 'static {
    /// Build the schema for this type.
    fn declare() -> Schema;
}

fn cache() -> &'static DashMap<TypeId, Arc<Schema>> {
    static CACHE: OnceLock<DashMap<TypeId, Arc<Schema>>> = OnceLock::new();
    CACHE.get_or_init(DashMap::new)
}

/// Get the cached schema for `T`, computing it on first access.
///
/// Identity-stable: every call returns a clone of the same `Arc`, so
/// `Arc::ptr_eq(&get_schema::<T>(), &get_schema::<T>())` holds. Safe under
/// concurrent first access; racing threads may duplicate the computation
/// but only one result is ever published.
pub fn get_schema<T: SchemaSource>() -> Arc<Schema> {
    let key = TypeId::of::<T>();
    if let Some(existing) = cache().get(&key) {
        return existing.value().clone();
    }

    // Built outside the map lock: declare() recurses into get_schema for
    // nested schema types.
    let schema = Arc::new(T::declare());
    log::debug!(
        "[SchemaRegistry] computed schema for {} ({} fields)",
        schema.name(),
        schema.len()
    );
    cache().entry(key).or_insert(schema).value().clone()
}

/// Get the schema of an instance.
///
/// For instances built through the typed constructors this is the same
/// `Arc` that [`get_schema`] returns for their schema type.
pub fn schema_of(instance: &StrictMap) -> &Arc<Schema> {
    instance.schema()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::SchemaBuilder;
    use crate::schema::ScalarKind;
    use crate::value::ValueMap;

    struct Point;

    impl SchemaSource for Point {
        fn declare() -> Schema {
            SchemaBuilder::new("Point")
                .field("x", ScalarKind::Int)
                .field("y", ScalarKind::Int)
                .build()
        }
    }

    struct Segment;

    impl SchemaSource for Segment {
        fn declare() -> Schema {
            SchemaBuilder::new("Segment")
                .nested_field("start", &get_schema::<Point>())
                .nested_field("end", &get_schema::<Point>())
                .build()
        }
    }

    struct Bare;

    impl SchemaSource for Bare {
        fn declare() -> Schema {
            SchemaBuilder::new("Bare").build()
        }
    }

    #[test]
    fn test_get_schema_is_identity_stable() {
        let a = get_schema::<Point>();
        let b = get_schema::<Point>();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.name(), "Point");
    }

    #[test]
    fn test_schema_of_instance_matches_type() {
        let point = StrictMap::parse::<Point>(ValueMap::new().with("x", 1)).expect("parse");
        assert!(Arc::ptr_eq(&get_schema::<Point>(), schema_of(&point)));
    }

    #[test]
    fn test_nested_declaration_recurses_into_registry() {
        let segment = get_schema::<Segment>();
        let start = segment.field("start").expect("start field");
        let nested = start.ty.element_schema().expect("nested schema");
        assert!(Arc::ptr_eq(nested, &get_schema::<Point>()));
    }

    #[test]
    fn test_no_declarations_yield_empty_schema() {
        let schema = get_schema::<Bare>();
        assert!(schema.is_empty());
        assert!(!schema.is_abstract());
    }

    #[test]
    fn test_concurrent_first_access_publishes_one_schema() {
        struct Contended;

        impl SchemaSource for Contended {
            fn declare() -> Schema {
                SchemaBuilder::new("Contended")
                    .field("n", ScalarKind::Int)
                    .build()
            }
        }

        let schemas: Vec<Arc<Schema>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(get_schema::<Contended>))
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().expect("thread join"))
                .collect()
        });

        for schema in &schemas[1..] {
            assert!(Arc::ptr_eq(&schemas[0], schema));
        }
    }
}
