// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Public-API round-trip tests over a realistic nested document.

use std::sync::Arc;
use strictmap::{
    get_schema, ScalarKind, Schema, SchemaBuilder, SchemaSource, StrictMap, Value, ValueMap,
};

struct Position;

impl SchemaSource for Position {
    fn declare() -> Schema {
        SchemaBuilder::new("Position")
            .field("x", ScalarKind::Float)
            .field("y", ScalarKind::Float)
            .field("z", ScalarKind::Float)
            .build()
    }
}

struct SensorReading;

impl SchemaSource for SensorReading {
    fn declare() -> Schema {
        SchemaBuilder::new("SensorReading")
            .field("sensor_id", ScalarKind::UInt)
            .field("temperature", ScalarKind::Float)
            .defaulted_field("unit", ScalarKind::Str, "celsius")
            .nested_field("position", &get_schema::<Position>())
            .build()
    }
}

struct Frame;

impl SchemaSource for Frame {
    fn declare() -> Schema {
        SchemaBuilder::new("Frame")
            .field("seq", ScalarKind::UInt)
            .list_field("readings", &get_schema::<SensorReading>())
            .map_field("by_label", &get_schema::<SensorReading>())
            .build()
    }
}

fn reading(id: u64, temperature: f64) -> ValueMap {
    ValueMap::new()
        .with("sensor_id", id)
        .with("temperature", temperature)
        .with(
            "position",
            ValueMap::new().with("x", 1.0).with("y", 2.0).with("z", 3.0),
        )
}

#[test]
fn nested_document_round_trips() {
    let source = ValueMap::new()
        .with("seq", 7u64)
        .with("readings", vec![reading(1, 20.5), reading(2, 21.0)])
        .with("by_label", ValueMap::new().with("intake", reading(3, 19.0)));

    let frame = StrictMap::parse::<Frame>(source.clone()).expect("parse");

    // Typed access all the way down.
    let readings = frame.attr("readings").expect("attr").as_list().expect("list");
    let second = readings[1].as_struct().expect("struct");
    assert_eq!(second.attr("temperature").expect("attr"), &Value::F64(21.0));
    assert_eq!(second.attr("unit").expect("attr").as_str(), Some("celsius"));

    let position = second.attr("position").expect("attr").as_struct().expect("struct");
    assert_eq!(position.attr("z").expect("attr"), &Value::F64(3.0));

    // The plain form matches the input exactly; the un-set default never
    // shows up.
    let plain = frame.to_plain();
    assert_eq!(plain, source);
}

#[test]
fn randomized_documents_round_trip() {
    fastrand::seed(42);

    let schema = get_schema::<Frame>();
    for _ in 0..50 {
        let count = fastrand::usize(0..8);
        let mut readings = Vec::new();
        for _ in 0..count {
            readings.push(Value::Map(reading(
                fastrand::u64(0..1000),
                f64::from(fastrand::i32(-400..1200)) / 10.0,
            )));
        }

        let source = ValueMap::new()
            .with("seq", fastrand::u64(..))
            .with("readings", Value::List(readings));

        let frame = StrictMap::from_map(&schema, source.clone()).expect("parse");
        assert_eq!(frame.to_plain(), source);
    }
}

#[cfg(feature = "json")]
#[test]
fn json_document_round_trips() {
    use strictmap::json;

    let text = r#"{"seq":1,"readings":[{"sensor_id":9,"temperature":18.5,"position":{"x":0.5,"y":1.5,"z":2.5}}]}"#;
    let frame = json::parse_json::<Frame>(text).expect("parse");

    let readings = frame.attr("readings").expect("attr").as_list().expect("list");
    let first = readings[0].as_struct().expect("struct");
    // JSON integers land in the signed variant when they fit.
    assert_eq!(first.attr("sensor_id").expect("attr"), &Value::I64(9));

    let rendered = json::map_to_json(&frame.to_plain()).to_string();
    assert_eq!(rendered, text);
}

#[test]
fn schema_identity_is_stable_across_calls() {
    let a = get_schema::<Frame>();
    let b = get_schema::<Frame>();
    assert!(Arc::ptr_eq(&a, &b));
}
