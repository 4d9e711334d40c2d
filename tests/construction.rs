//! End-to-end construction scenarios through the public API.

use floe::{Attribute, FloeError, FreezePolicy, List, Map, Schema, SchemaBuilder, Value};

fn non_negative_int(v: &Value) -> bool {
    matches!(v, Value::Int(n) if *n >= 0)
}

fn is_string(v: &Value) -> bool {
    v.as_str().is_some()
}

#[test]
fn defaults_fill_in_and_required_attributes_are_enforced() {
    let mut builder = Schema::builder();
    builder.declare(Attribute::new("a")).unwrap();
    builder.declare(Attribute::new("b").default_value(7)).unwrap();
    let schema = builder.finish();

    let instance = schema.construct(Map::from_entries([("a", 1)])).unwrap();
    assert_eq!(instance.get("a"), Some(&Value::Int(1)));
    assert_eq!(instance.get("b"), Some(&Value::Int(7)));

    let err = schema.construct(Map::new()).unwrap_err();
    assert!(matches!(err, FloeError::MissingAttribute(name) if name == "a"));
}

#[test]
fn child_override_replaces_parent_rule() {
    let mut builder = Schema::builder();
    builder
        .declare(Attribute::new("x").rule(non_negative_int))
        .unwrap();
    let parent = builder.finish();

    let mut builder = SchemaBuilder::extending(parent.clone());
    builder.declare(Attribute::new("x").rule(is_string)).unwrap();
    let child = builder.finish();

    // The child's rule applies, not the parent's: -1 fails as "not a
    // string", not as "negative".
    let err = child
        .construct(Map::from_entries([("x", -1)]))
        .unwrap_err();
    assert!(matches!(err, FloeError::InvalidValue { ref name, .. } if name == "x"));

    assert!(child.construct(Map::from_entries([("x", "ok")])).is_ok());
    assert!(parent.construct(Map::from_entries([("x", "ok")])).is_err());
    assert!(parent.construct(Map::from_entries([("x", 5)])).is_ok());
}

#[test]
fn deep_policy_freezes_the_whole_input_graph() {
    let nested = Map::new();
    let outer = Map::from_entries([("nested", nested.clone())]);

    let mut builder = Schema::builder();
    builder.declare(Attribute::new("payload")).unwrap();
    let schema = builder.finish();

    schema
        .construct(Map::from_entries([("payload", outer.clone())]))
        .unwrap();

    // Mutation is rejected through the handles the caller kept.
    assert!(outer.insert("k", 1).is_err());
    assert!(nested.insert("k", 1).is_err());
}

#[test]
fn shallow_policy_freezes_only_the_top_level() {
    let nested = List::new();
    let outer = Map::from_entries([("nested", nested.clone())]);

    let mut builder = Schema::builder();
    builder
        .declare(Attribute::new("payload").policy(FreezePolicy::Shallow))
        .unwrap();
    let schema = builder.finish();

    schema
        .construct(Map::from_entries([("payload", outer.clone())]))
        .unwrap();

    assert!(outer.insert("k", 1).is_err());
    assert!(nested.push(1).is_ok());
}

#[test]
fn none_policy_leaves_the_value_alone() {
    let payload = Map::new();

    let mut builder = Schema::builder();
    builder
        .declare(Attribute::new("payload").policy(FreezePolicy::None))
        .unwrap();
    let schema = builder.finish();

    let instance = schema
        .construct(Map::from_entries([("payload", payload.clone())]))
        .unwrap();

    // Still the same shared structure, still mutable.
    payload.insert("k", 1).unwrap();
    let held = instance.get("payload").unwrap().as_map().unwrap();
    assert_eq!(held.get("k"), Some(Value::Int(1)));
}

#[test]
fn to_map_round_trips_into_an_equal_instance() {
    let mut builder = Schema::builder();
    builder.declare(Attribute::new("name").rule(is_string)).unwrap();
    builder.declare(Attribute::new("count").default_value(0)).unwrap();
    let schema = builder.finish();

    let original = schema
        .construct(Map::from_entries([("name", Value::from("job"))]))
        .unwrap();
    let rebuilt = schema.construct(original.to_map()).unwrap();

    assert_eq!(original, rebuilt);
    assert_eq!(rebuilt.to_map().keys(), vec!["name", "count"]);
}

#[test]
fn instances_construct_instances() {
    let mut builder = Schema::builder();
    builder.declare(Attribute::new("a")).unwrap();
    let schema = builder.finish();

    let first = schema.construct(Map::from_entries([("a", 1)])).unwrap();
    let second = schema.construct(Value::from(&first)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn null_default_rejected_by_rule_fails_before_any_construction() {
    let mut builder = Schema::builder();
    let err = builder
        .declare(
            Attribute::new("y")
                .rule(|v: &Value| !v.is_null())
                .default_value(Value::Null),
        )
        .unwrap_err();
    assert!(matches!(err, FloeError::InvalidDefaultValue { ref name, .. } if name == "y"));
}

#[test]
fn all_null_input_satisfies_rule_less_attributes() {
    let mut builder = Schema::builder();
    builder.declare(Attribute::new("a")).unwrap();
    builder.declare(Attribute::new("b")).unwrap();
    let schema = builder.finish();

    let instance = schema
        .construct(Map::from_entries([
            ("a", Value::Null),
            ("b", Value::Null),
        ]))
        .unwrap();
    assert_eq!(instance.get("a"), Some(&Value::Null));
    assert_eq!(instance.get("b"), Some(&Value::Null));
}

#[test]
fn non_map_input_is_rejected_with_its_type_name() {
    let schema = Schema::builder().finish();
    let err = schema.construct(List::new()).unwrap_err();
    assert_eq!(err.to_string(), "construction input must be a map, got: list");
}

#[test]
fn error_messages_name_the_offending_attribute() {
    let mut builder = Schema::builder();
    builder
        .declare(Attribute::new("port").rule(non_negative_int))
        .unwrap();
    let schema = builder.finish();

    let err = schema
        .construct(Map::from_entries([("port", -80)]))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "attribute `port` received invalid value: Int(-80)"
    );

    let err = schema.construct(Map::new()).unwrap_err();
    assert_eq!(err.to_string(), "attribute `port` missing from input");
}
