//! Extract -> rebuild without the byte layer.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use serde_json::{json, Map, Value};

use icwire_core::payload::{
    adopt, describe, extract, rebuild, restore, FieldKind, FieldSpec, FieldValue,
    PayloadDescriptor, StructuredPayload, UnknownValues,
};
use icwire_core::registry::TypeRegistry;
use icwire_core::Message;

/// Pipeline-side payload that only exposes a schema and values.
struct StepOutput {
    schema: Value,
    values: Map<String, Value>,
}

impl StructuredPayload for StepOutput {
    fn schema(&self) -> Value {
        self.schema.clone()
    }

    fn values(&self) -> Map<String, Value> {
        self.values.clone()
    }
}

fn obj(v: Value) -> Map<String, Value> {
    v.as_object().unwrap().clone()
}

fn prd_output() -> StepOutput {
    StepOutput {
        schema: json!({
            "title": "prd",
            "type": "object",
            "properties": {
                "Original Requirements": { "title": "Original Requirements", "type": "string" },
                "User Stories": { "title": "User Stories", "type": "array", "items": { "type": "string" } },
                "Competitive Analysis": {
                    "title": "Competitive Analysis",
                    "type": "array",
                    "items": { "type": "array" }
                },
                "Effort": { "title": "Effort", "type": "integer" }
            },
            "required": ["Original Requirements", "User Stories", "Competitive Analysis", "Effort"]
        }),
        values: obj(json!({
            "Original Requirements": "Build a todo app",
            "User Stories": ["As a user I can add a task"],
            "Competitive Analysis": [["Todoist", "Polished"], ["Trello", "Board centric"]],
            "Effort": 3
        })),
    }
}

#[test]
fn scenario_prd_descriptor() {
    let output = StepOutput {
        schema: json!({
            "title": "prd",
            "properties": { "Original Requirements": { "type": "string" } }
        }),
        values: obj(json!({ "Original Requirements": "Build a todo app" })),
    };

    let desc = describe(&output).unwrap();
    assert_eq!(desc.class_name, "prd");
    assert_eq!(desc.field_mapping.len(), 1);
    assert_eq!(
        desc.field_mapping["Original Requirements"],
        FieldSpec::required(FieldKind::String)
    );
    assert_eq!(desc.values, obj(json!({ "Original Requirements": "Build a todo app" })));

    let registry = TypeRegistry::default();
    let record = restore(&desc, &registry, UnknownValues::Reject).unwrap();
    assert_eq!(record.class_name(), "prd");
    assert_eq!(
        record.get("Original Requirements"),
        Some(&FieldValue::Text("Build a todo app".into()))
    );
}

#[test]
fn unsupported_field_dropped_from_descriptor_and_record() {
    let desc = describe(&prd_output()).unwrap();
    assert!(!desc.field_mapping.contains_key("Effort"));
    assert!(!desc.values.contains_key("Effort"));
    assert!(desc.values.keys().all(|k| desc.field_mapping.contains_key(k)));

    let registry = TypeRegistry::default();
    let record = adopt(&prd_output(), &registry).unwrap();
    let names: Vec<&str> = record.field_names().collect();
    assert_eq!(names, ["Original Requirements", "User Stories", "Competitive Analysis"]);
    assert_eq!(
        record.get("Competitive Analysis"),
        Some(&FieldValue::PairList(vec![
            ("Todoist".into(), "Polished".into()),
            ("Trello".into(), "Board centric".into()),
        ]))
    );
}

#[test]
fn message_round_trip_with_payload() {
    let registry = TypeRegistry::default();
    let record = adopt(&prd_output(), &registry).unwrap();
    let msg = Message::new("assistant", "prd ready")
        .with_cause_by("WritePRD")
        .with_sent_from("ProductManager")
        .with_send_to(["Architect"])
        .with_payload(record);

    let wire = extract(&msg).unwrap();
    assert!(wire.payload.is_some());

    let back = rebuild(wire, &registry, UnknownValues::Reject).unwrap();
    assert_eq!(back, msg);

    let (orig, rebuilt) = (msg.payload.unwrap(), back.payload.unwrap());
    assert_eq!(rebuilt.class_name(), orig.class_name());
    assert_eq!(rebuilt.values(), orig.values());
}

#[test]
fn message_without_payload_untouched() {
    let registry = TypeRegistry::default();
    let msg = Message::new("user", "hello").with_send_to(["Alice", "Bob"]);

    let wire = extract(&msg).unwrap();
    assert!(wire.payload.is_none());

    let back = rebuild(wire, &registry, UnknownValues::Reject).unwrap();
    assert_eq!(back, msg);
    assert!(registry.is_empty());
}

#[test]
fn extract_does_not_mutate_original() {
    let registry = TypeRegistry::default();
    let record = adopt(&prd_output(), &registry).unwrap();
    let mut msg = Message::new("assistant", "prd ready").with_payload(record);
    let before = msg.clone();

    let wire = extract(&msg).unwrap();
    assert_eq!(msg, before);

    msg.payload
        .as_mut()
        .unwrap()
        .set("Original Requirements", FieldValue::Text("Build a chat app".into()))
        .unwrap();

    let desc = wire.payload.unwrap();
    assert_eq!(desc.values["Original Requirements"], json!("Build a todo app"));
}

#[test]
fn record_schema_maps_back_to_same_mapping() {
    let registry = TypeRegistry::default();
    let record = adopt(&prd_output(), &registry).unwrap();
    let desc = describe(&record).unwrap();
    assert_eq!(&desc.field_mapping, record.record_type().fields());
    assert_eq!(desc.values, record.values());
}

fn pair_descriptor(value: Value) -> PayloadDescriptor {
    let mut field_mapping = icwire_core::payload::FieldMapping::new();
    field_mapping.insert("Pool".into(), FieldSpec::required(FieldKind::ListOfStringPair));
    PayloadDescriptor {
        class_name: "pool".into(),
        field_mapping,
        values: obj(json!({ "Pool": value })),
    }
}

#[test]
fn malformed_values_rejected() {
    let registry = TypeRegistry::default();
    let bad = [
        json!("P0: login"),
        json!([["P0"]]),
        json!([["P0", "login", "extra"]]),
        json!([["P0", 1]]),
        json!(["P0", "login"]),
        json!(null),
    ];

    for value in bad {
        let e = restore(&pair_descriptor(value.clone()), &registry, UnknownValues::Reject)
            .expect_err("must fail");
        assert_eq!(e.code().as_str(), "VALIDATION_ERROR", "value={value}");
    }

    let ok = pair_descriptor(json!([["P0", "login"]]));
    assert!(restore(&ok, &registry, UnknownValues::Reject).is_ok());
}

#[test]
fn missing_required_value_rejected() {
    let registry = TypeRegistry::default();
    let mut desc = pair_descriptor(json!([]));
    desc.values.clear();
    let e = restore(&desc, &registry, UnknownValues::Reject).expect_err("must fail");
    assert_eq!(e.code().as_str(), "VALIDATION_ERROR");
}

#[test]
fn descriptor_with_non_required_field_refused() {
    let raw = json!({
        "class_name": "pool",
        "field_mapping": {
            "Pool": { "kind": "LIST_OF_STRING_PAIR", "required": true },
            "Notes": { "kind": "STRING", "required": false }
        },
        "values": { "Pool": [] }
    });
    assert!(serde_json::from_value::<PayloadDescriptor>(raw).is_err());
}

#[test]
fn field_spec_wire_form_is_required() {
    let spec = FieldSpec::required(FieldKind::ListOfString);
    let v = serde_json::to_value(spec).unwrap();
    assert_eq!(v, json!({ "kind": "LIST_OF_STRING", "required": true }));

    let implicit: FieldSpec = serde_json::from_value(json!({ "kind": "STRING" })).unwrap();
    assert_eq!(implicit, FieldSpec::required(FieldKind::String));
}

#[test]
fn set_keeps_declaration_order() {
    let registry = TypeRegistry::default();
    let mut record = adopt(&prd_output(), &registry).unwrap();
    record
        .set("Original Requirements", FieldValue::Text("Build a chat app".into()))
        .unwrap();
    let names: Vec<&str> = record.field_names().collect();
    assert_eq!(names, ["Original Requirements", "User Stories", "Competitive Analysis"]);
}

#[test]
fn unknown_values_follow_policy() {
    let registry = TypeRegistry::default();
    let mut desc = pair_descriptor(json!([["P0", "login"]]));
    desc.values.insert("Stray".into(), json!("x"));

    let e = restore(&desc, &registry, UnknownValues::Reject).expect_err("must fail");
    assert_eq!(e.code().as_str(), "VALIDATION_ERROR");

    let record = restore(&desc, &registry, UnknownValues::Ignore).unwrap();
    assert!(record.get("Stray").is_none());
}

#[test]
fn failed_rebuild_returns_no_message() {
    let registry = TypeRegistry::default();
    let msg = Message::new("assistant", "x").with_payload(adopt(&prd_output(), &registry).unwrap());
    let mut wire = extract(&msg).unwrap();
    wire.payload
        .as_mut()
        .unwrap()
        .values
        .insert("User Stories".into(), json!("not a list"));

    let e = rebuild(wire, &registry, UnknownValues::Reject).expect_err("must fail");
    assert_eq!(e.code().as_str(), "VALIDATION_ERROR");
}

#[test]
fn set_checks_kind() {
    let registry = TypeRegistry::default();
    let mut record = adopt(&prd_output(), &registry).unwrap();
    assert!(record
        .set("User Stories", FieldValue::Text("one story".into()))
        .is_err());
    assert!(record.set("Effort", FieldValue::Text("3".into())).is_err());
    assert!(record
        .set("User Stories", FieldValue::TextList(vec!["one story".into()]))
        .is_ok());
}
