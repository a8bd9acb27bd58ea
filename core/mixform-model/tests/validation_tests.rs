use mixform_model::{
    validate_field, validate_intersection, validate_mixin, validate_trigger, FieldKind,
    IntersectionRule, Mixin, ModelError, Schema, SchemaField, TriggerCondition, TriggerOp,
    TriggerValue,
};

// ── validate_field ───────────────────────────────────────────────

#[test]
fn field_needs_a_name() {
    let err = validate_field(&SchemaField::text(" ")).unwrap_err();
    assert!(matches!(err, ModelError::InvalidField { .. }));
}

#[test]
fn enum_options_must_be_unique() {
    let f = SchemaField::enumeration("c", vec!["a".into(), "a".into()]);
    let err = validate_field(&f).unwrap_err();
    assert!(err.to_string().contains("duplicate enum option"));
}

#[test]
fn enum_kind_built_in_code_is_still_checked() {
    let f = SchemaField {
        name: "c".into(),
        kind: FieldKind::Enum { options: vec![] },
        required: false,
        default: None,
    };
    assert!(validate_field(&f).is_err());
}

#[test]
fn number_default_accepts_numeric_text() {
    assert!(validate_field(&SchemaField::number("qty").with_default("12")).is_ok());
    assert!(validate_field(&SchemaField::number("qty").with_default("dozen")).is_err());
}

#[test]
fn valid_fields_pass() {
    assert!(validate_field(&SchemaField::unit("w", "g").with_default("5")).is_ok());
    assert!(validate_field(&SchemaField::file("datasheet")).is_ok());
    assert!(validate_field(&SchemaField::bool("rohs").with_default(true)).is_ok());
}

// ── validate_trigger ─────────────────────────────────────────────

#[test]
fn trigger_shape_must_match_op() {
    let bad_in = TriggerCondition::new("f", TriggerOp::In, "a");
    assert!(matches!(
        validate_trigger(&bad_in),
        Err(ModelError::InvalidTrigger { .. })
    ));

    let bad_eq = TriggerCondition {
        field: "f".into(),
        op: TriggerOp::Eq,
        value: TriggerValue::List(vec!["a".into()]),
    };
    assert!(validate_trigger(&bad_eq).is_err());
}

#[test]
fn trigger_needs_a_field_unless_and() {
    assert!(validate_trigger(&TriggerCondition::eq("", "x")).is_err());
    assert!(validate_trigger(&TriggerCondition::all(vec![])).is_ok());
}

#[test]
fn nested_and_conditions_are_checked() {
    let t = TriggerCondition::all(vec![
        TriggerCondition::eq("a", "1"),
        TriggerCondition::new("b", TriggerOp::Set, "yes"),
    ]);
    let err = validate_trigger(&t).unwrap_err();
    assert!(err.to_string().contains("'set' expects a boolean"));
}

#[test]
fn unknown_op_fails_validation() {
    let t = TriggerCondition::new("f", TriggerOp::Other("like".into()), "x%");
    let err = validate_trigger(&t).unwrap_err();
    assert!(err.to_string().contains("unsupported operator 'like'"));
}

// ── validate_mixin ───────────────────────────────────────────────

#[test]
fn mixin_field_names_must_be_unique() {
    let m = Mixin::new("A")
        .with_field(SchemaField::text("x"))
        .with_field(SchemaField::number("x"));
    assert_eq!(
        validate_mixin(&m).unwrap_err(),
        ModelError::DuplicateName {
            scope: "mixin 'A'".into(),
            name: "x".into()
        }
    );
}

#[test]
fn mixin_cannot_trigger_itself() {
    let m = Mixin::new("A").with_child("A", TriggerCondition::set("x", true));
    assert!(validate_mixin(&m).unwrap_err().to_string().contains("own child"));
}

#[test]
fn bad_child_trigger_names_the_mixin() {
    let m = Mixin::new("A").with_child("B", TriggerCondition::new("x", TriggerOp::Set, 1.0));
    let err = validate_mixin(&m).unwrap_err();
    assert!(matches!(err, ModelError::InvalidMixin { ref mixin, .. } if mixin == "A"));
}

// ── validate_intersection ────────────────────────────────────────

#[test]
fn intersection_needs_two_distinct_mixins() {
    let one = IntersectionRule::new(&["A"], vec![SchemaField::text("x")]);
    assert!(validate_intersection(0, &one).is_err());

    let repeated = IntersectionRule::new(&["A", "A"], vec![SchemaField::text("x")]);
    assert!(validate_intersection(0, &repeated).is_err());
}

#[test]
fn intersection_must_add_something() {
    let rule = IntersectionRule::new(&["A", "B"], vec![]);
    let err = validate_intersection(3, &rule).unwrap_err();
    assert_eq!(
        err,
        ModelError::InvalidIntersection {
            index: 3,
            reason: "'adds' is empty".into()
        }
    );
}

// ── Schema::validate ─────────────────────────────────────────────

fn two_mixin_schema() -> Schema {
    Schema::new()
        .with_root("A")
        .with_mixin(
            Mixin::new("A")
                .with_field(SchemaField::text("t"))
                .with_child("B", TriggerCondition::eq("t", "yes")),
        )
        .with_mixin(Mixin::new("B").with_field(SchemaField::text("b")))
}

#[test]
fn valid_schema_passes() {
    two_mixin_schema().validate().unwrap();
}

#[test]
fn dangling_child_reference() {
    let mut s = two_mixin_schema();
    s.remove_mixin("B");
    assert_eq!(
        s.validate().unwrap_err(),
        ModelError::DanglingReference {
            from: "mixin 'A'".into(),
            to: "B".into()
        }
    );
}

#[test]
fn dangling_root_reference() {
    let s = two_mixin_schema().with_root("Missing");
    assert!(matches!(
        s.validate(),
        Err(ModelError::DanglingReference { ref to, .. }) if to == "Missing"
    ));
}

#[test]
fn duplicate_root() {
    let s = two_mixin_schema().with_root("A");
    assert!(matches!(s.validate(), Err(ModelError::DuplicateName { .. })));
}

#[test]
fn dangling_intersection_reference() {
    let s = two_mixin_schema().with_intersection(IntersectionRule::new(
        &["A", "C"],
        vec![SchemaField::text("x")],
    ));
    assert_eq!(
        s.validate().unwrap_err(),
        ModelError::DanglingReference {
            from: "intersection #0".into(),
            to: "C".into()
        }
    );
}

#[test]
fn mixin_key_must_match_name() {
    let mut s = two_mixin_schema();
    let b = s.remove_mixin("B").unwrap();
    s.mixins.insert("C".into(), b);
    assert!(matches!(s.validate(), Err(ModelError::InvalidMixin { .. })));
}
