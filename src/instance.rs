//! # Instances
//!
//! The construction engine and the immutable objects it produces.
//!
//! Construction is all-or-nothing: every attribute of the schema's effective
//! set is resolved (supplied value or default), validated, and frozen per
//! its policy before an [`Instance`] exists. On any failure the error is
//! returned and no instance escapes; there is no partially built state to
//! observe. A finished instance exposes no mutating API at all, which is
//! the whole-object freeze.

use std::ops::Index;

use indexmap::IndexMap;

use crate::attribute::FreezePolicy;
use crate::error::{FloeError, Result};
use crate::freeze::Freezer;
use crate::schema::Schema;
use crate::value::{Map, Value};

/// A fully validated, selectively frozen value object.
///
/// Attribute values are resolved in declaration order and read back in the
/// same order. Equality compares resolved values only.
#[derive(Debug, Clone)]
pub struct Instance {
    values: IndexMap<String, Value>,
}

pub(crate) fn construct(
    schema: &Schema,
    freezer: &dyn Freezer,
    input: Value,
) -> Result<Instance> {
    let input = match input {
        Value::Map(map) => map,
        other => return Err(FloeError::InvalidInput(other.type_name())),
    };

    let attrs = schema.effective();
    let mut values = IndexMap::with_capacity(attrs.len());
    for attr in attrs.iter() {
        let value = attr.extract(&input)?;
        match attr.freeze_policy() {
            FreezePolicy::Deep => freezer.freeze_deep(&value),
            FreezePolicy::Shallow => freezer.freeze_shallow(&value),
            FreezePolicy::None => {}
        }
        values.insert(attr.name().to_string(), value);
    }

    Ok(Instance { values })
}

impl Instance {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Returns the resolved value for `name`, if the schema declares it.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Iterates `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Returns the resolved values as a fresh, unfrozen map in declaration
    /// order. Container values are shared handles, so their frozen state
    /// travels with them; the map itself is new and mutable.
    pub fn to_map(&self) -> Map {
        Map::from_entries(
            self.values
                .iter()
                .map(|(name, value)| (name.clone(), value.clone())),
        )
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl Index<&str> for Instance {
    type Output = Value;

    /// # Panics
    ///
    /// Panics if the schema declares no attribute named `name`.
    fn index(&self, name: &str) -> &Value {
        self.get(name)
            .unwrap_or_else(|| panic!("no attribute named `{name}`"))
    }
}

/// An instance is acceptable construction input for a compatible schema:
/// its resolved values re-enter as a map.
impl From<&Instance> for Value {
    fn from(instance: &Instance) -> Self {
        Value::Map(instance.to_map())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::Attribute;
    use crate::value::List;

    fn is_string(v: &Value) -> bool {
        v.as_str().is_some()
    }

    fn schema() -> std::sync::Arc<Schema> {
        let mut builder = Schema::builder();
        builder.declare(Attribute::new("name").rule(is_string)).unwrap();
        builder.declare(Attribute::new("retries").default_value(3)).unwrap();
        builder.finish()
    }

    #[test]
    fn construct_resolves_supplied_and_defaulted_values() {
        let instance = schema()
            .construct(Map::from_entries([("name", "job")]))
            .unwrap();

        assert_eq!(instance.get("name"), Some(&Value::from("job")));
        assert_eq!(instance.get("retries"), Some(&Value::Int(3)));
        assert_eq!(instance.len(), 2);
    }

    #[test]
    fn construct_rejects_non_map_input() {
        let err = schema().construct(Value::Int(1)).unwrap_err();
        assert!(matches!(err, FloeError::InvalidInput("int")));

        let err = schema().construct(List::new()).unwrap_err();
        assert!(matches!(err, FloeError::InvalidInput("list")));
    }

    #[test]
    fn construct_propagates_missing_attribute() {
        let err = schema().construct(Map::new()).unwrap_err();
        assert!(matches!(err, FloeError::MissingAttribute(name) if name == "name"));
    }

    #[test]
    fn construct_propagates_invalid_value() {
        let err = schema()
            .construct(Map::from_entries([("name", 42)]))
            .unwrap_err();
        assert!(matches!(err, FloeError::InvalidValue { ref name, .. } if name == "name"));
    }

    #[test]
    fn extra_input_keys_are_ignored() {
        let input = Map::from_entries([("name", Value::from("job")), ("junk", Value::Int(0))]);
        let instance = schema().construct(input).unwrap();
        assert_eq!(instance.len(), 2);
        assert!(!instance.contains("junk"));
    }

    #[test]
    fn to_map_reflects_declaration_order() {
        let instance = schema()
            .construct(Map::from_entries([("name", "job")]))
            .unwrap();
        assert_eq!(instance.to_map().keys(), vec!["name", "retries"]);
    }

    #[test]
    fn to_map_is_fresh_and_unfrozen() {
        let instance = schema()
            .construct(Map::from_entries([("name", "job")]))
            .unwrap();
        let map = instance.to_map();
        assert!(!map.is_frozen());
        map.insert("extra", 1).unwrap();
        // The instance itself is untouched.
        assert!(!instance.contains("extra"));
    }

    #[test]
    fn instance_is_valid_construction_input() {
        let schema = schema();
        let first = schema
            .construct(Map::from_entries([("name", "job")]))
            .unwrap();
        let second = schema.construct(Value::from(&first)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn index_sugar_reads_values() {
        let instance = schema()
            .construct(Map::from_entries([("name", "job")]))
            .unwrap();
        assert_eq!(instance["retries"], Value::Int(3));
    }

    #[test]
    #[should_panic(expected = "no attribute named")]
    fn index_sugar_panics_on_unknown_name() {
        let instance = schema()
            .construct(Map::from_entries([("name", "job")]))
            .unwrap();
        let _ = &instance["nope"];
    }
}
