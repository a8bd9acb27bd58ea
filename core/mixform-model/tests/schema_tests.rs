use mixform_model::{
    FieldKind, FieldType, FieldValue, IntersectionRule, Mixin, Schema, SchemaField,
    TriggerCondition, TriggerOp, TriggerValue,
};
use pretty_assertions::assert_eq;
use serde_json::json;

// ── SchemaField constructors ─────────────────────────────────────

#[test]
fn text_field_defaults() {
    let f = SchemaField::text("sku");
    assert_eq!(f.name, "sku");
    assert_eq!(f.field_type(), FieldType::Text);
    assert!(!f.required);
    assert!(f.default.is_none());
}

#[test]
fn unit_field_carries_unit() {
    let f = SchemaField::unit("weight", "kg").required();
    assert_eq!(
        f.kind,
        FieldKind::Unit {
            unit: "kg".to_string()
        }
    );
    assert!(f.required);
}

#[test]
fn bool_field_with_default() {
    let f = SchemaField::bool("fragile").with_default(false);
    assert_eq!(f.default, Some(FieldValue::Bool(false)));
}

// ── SchemaField JSON shape ───────────────────────────────────────

#[test]
fn enum_field_serializes_flat() {
    let f = SchemaField::enumeration("color", vec!["red".into(), "blue".into()]);
    let v = serde_json::to_value(&f).unwrap();
    assert_eq!(
        v,
        json!({"name": "color", "type": "enum", "options": ["red", "blue"]})
    );
}

#[test]
fn unit_field_parses_from_flat_json() {
    let f: SchemaField = serde_json::from_value(json!({
        "name": "length",
        "type": "unit",
        "unit": "mm",
        "required": true,
        "default": "10"
    }))
    .unwrap();
    assert_eq!(f, SchemaField::unit("length", "mm").required().with_default("10"));
}

#[test]
fn enum_without_options_is_rejected_at_parse_time() {
    let err = serde_json::from_value::<SchemaField>(json!({"name": "c", "type": "enum"}))
        .unwrap_err();
    assert!(err.to_string().contains("at least one option"));

    let err = serde_json::from_value::<SchemaField>(json!({
        "name": "c", "type": "enum", "options": []
    }))
    .unwrap_err();
    assert!(err.to_string().contains("at least one option"));
}

#[test]
fn unit_without_unit_is_rejected_at_parse_time() {
    let err = serde_json::from_value::<SchemaField>(json!({"name": "w", "type": "unit", "unit": " "}))
        .unwrap_err();
    assert!(err.to_string().contains("non-empty unit"));
}

#[test]
fn mistyped_default_is_rejected_at_parse_time() {
    let err = serde_json::from_value::<SchemaField>(json!({
        "name": "fragile", "type": "bool", "default": "yes"
    }))
    .unwrap_err();
    assert!(err.to_string().contains("boolean"));
}

#[test]
fn unknown_field_type_is_rejected() {
    assert!(serde_json::from_value::<SchemaField>(json!({"name": "x", "type": "color"})).is_err());
}

#[test]
fn options_on_text_field_are_dropped() {
    let f: SchemaField = serde_json::from_value(json!({
        "name": "note", "type": "text", "options": ["a"]
    }))
    .unwrap();
    assert_eq!(f.kind, FieldKind::Text);
    assert_eq!(serde_json::to_value(&f).unwrap(), json!({"name": "note", "type": "text"}));
}

// ── TriggerCondition JSON shape ──────────────────────────────────

#[test]
fn trigger_values_parse_by_shape() {
    let t: TriggerCondition =
        serde_json::from_value(json!({"field": "f", "op": "in", "value": ["a", "b"]})).unwrap();
    assert_eq!(t.value, TriggerValue::List(vec!["a".into(), "b".into()]));

    let t: TriggerCondition =
        serde_json::from_value(json!({"field": "f", "op": "set", "value": false})).unwrap();
    assert_eq!(t.value, TriggerValue::Bool(false));

    let t: TriggerCondition =
        serde_json::from_value(json!({"field": "f", "op": "gt", "value": 4})).unwrap();
    assert_eq!(t.value, TriggerValue::Number(4.0));
}

#[test]
fn and_trigger_parses_nested_conditions_without_field() {
    let t: TriggerCondition = serde_json::from_value(json!({
        "op": "and",
        "value": [
            {"field": "a", "op": "eq", "value": "x"},
            {"field": "b", "op": "set", "value": true}
        ]
    }))
    .unwrap();
    assert_eq!(
        t,
        TriggerCondition::all(vec![
            TriggerCondition::eq("a", "x"),
            TriggerCondition::set("b", true),
        ])
    );
    let v = serde_json::to_value(&t).unwrap();
    assert!(v.get("field").is_none());
}

#[test]
fn unsupported_op_survives_parsing() {
    let t: TriggerCondition =
        serde_json::from_value(json!({"field": "f", "op": "regex", "value": "^a"})).unwrap();
    assert_eq!(t.op, TriggerOp::Other("regex".into()));
}

// ── Schema ───────────────────────────────────────────────────────

fn make_sku_schema() -> Schema {
    Schema::new()
        .with_root("Base")
        .with_mixin(
            Mixin::new("Base")
                .with_field(SchemaField::text("sku").required())
                .with_field(SchemaField::enumeration(
                    "category",
                    vec!["resistor".into(), "capacitor".into()],
                ))
                .with_child("Resistor", TriggerCondition::eq("category", "resistor")),
        )
        .with_mixin(Mixin::new("Resistor").with_field(SchemaField::unit("resistance", "ohm")))
        .with_mixin(Mixin::new("Smd").with_field(SchemaField::text("package")))
        .with_intersection(IntersectionRule::new(
            &["Resistor", "Smd"],
            vec![SchemaField::text("footprint")],
        ))
}

#[test]
fn schema_lookup_and_roots() {
    let s = make_sku_schema();
    assert!(s.mixin("Resistor").is_some());
    assert!(s.mixin("Capacitor").is_none());
    assert!(s.is_root("Base"));
    assert!(!s.is_root("Smd"));
}

#[test]
fn schema_round_trips_through_json() {
    let s = make_sku_schema();
    let text = serde_json::to_string(&s).unwrap();
    let back: Schema = serde_json::from_str(&text).unwrap();
    assert_eq!(back, s);
}

#[test]
fn schema_mixins_serialize_as_object() {
    let v = serde_json::to_value(make_sku_schema()).unwrap();
    assert!(v["mixins"].is_object());
    assert_eq!(v["mixins"]["Resistor"]["fields"][0]["unit"], "ohm");
}

#[test]
fn empty_document_is_an_empty_schema() {
    let s: Schema = serde_json::from_value(json!({})).unwrap();
    assert_eq!(s, Schema::default());
}

#[test]
fn insert_mixin_replaces_by_name() {
    let mut s = make_sku_schema();
    let previous = s.insert_mixin(Mixin::new("Smd"));
    assert_eq!(previous.unwrap().fields.len(), 1);
    assert!(s.mixin("Smd").unwrap().fields.is_empty());
}
