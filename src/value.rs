//! # Value Domain
//!
//! Dynamically typed values that attribute schemas validate and freeze.
//!
//! Scalars (`Null`, `Bool`, `Int`, `Float`, `Str`) are immutable by
//! construction. Containers ([`List`] and [`Map`]) are shared handles:
//! cloning a container clones the handle, not the contents, so every clone
//! observes the same underlying data. Freezing a container is therefore
//! visible through all live handles to it, which is what makes the tiered
//! freeze guarantees of the construction engine observable to callers that
//! kept a handle to their input.
//!
//! Containers carry a frozen flag. Once set, every mutation attempt through
//! any handle fails with [`FrozenError`]. The flag is one-way: there is no
//! unfreeze.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use thiserror::Error;

/// Returned by mutation attempts on a frozen container.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("value is frozen and cannot be modified")]
pub struct FrozenError;

/// A dynamically typed value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(List),
    Map(Map),
}

impl Value {
    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the boolean if this is a `Bool` variant.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the integer if this is an `Int` variant.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the float if this is a `Float` variant.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the string slice if this is a `Str` variant.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(v) => Some(v),
            _ => None,
        }
    }

    /// Returns a handle to the list if this is a `List` variant.
    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(v) => Some(v),
            _ => None,
        }
    }

    /// Returns a handle to the map if this is a `Map` variant.
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(v) => Some(v),
            _ => None,
        }
    }

    /// Whether this value rejects mutation.
    ///
    /// Scalars are always immutable; containers report their frozen flag.
    pub fn is_frozen(&self) -> bool {
        match self {
            Value::List(v) => v.is_frozen(),
            Value::Map(v) => v.is_frozen(),
            _ => true,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<List> for Value {
    fn from(v: List) -> Self {
        Value::List(v)
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Value::Map(v)
    }
}

#[derive(Debug)]
struct ListInner {
    items: Vec<Value>,
    frozen: bool,
}

/// A shared sequence of values.
///
/// `Clone` copies the handle; both handles point at the same sequence.
#[derive(Clone, Default)]
pub struct List {
    inner: Arc<RwLock<ListInner>>,
}

impl Default for ListInner {
    fn default() -> Self {
        ListInner {
            items: Vec::new(),
            frozen: false,
        }
    }
}

impl List {
    /// Creates a new, empty, unfrozen list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an unfrozen list from the given items.
    pub fn from_values<V, I>(items: I) -> Self
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        Self {
            inner: Arc::new(RwLock::new(ListInner {
                items: items.into_iter().map(Into::into).collect(),
                frozen: false,
            })),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().items.is_empty()
    }

    pub fn is_frozen(&self) -> bool {
        self.inner.read().frozen
    }

    /// Returns the item at `index`. Container items come back as handles
    /// sharing structure with this list.
    pub fn get(&self, index: usize) -> Option<Value> {
        self.inner.read().items.get(index).cloned()
    }

    /// Appends an item.
    pub fn push(&self, value: impl Into<Value>) -> Result<(), FrozenError> {
        let mut inner = self.inner.write();
        if inner.frozen {
            return Err(FrozenError);
        }
        inner.items.push(value.into());
        Ok(())
    }

    /// Replaces the item at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn set(&self, index: usize, value: impl Into<Value>) -> Result<(), FrozenError> {
        let mut inner = self.inner.write();
        if inner.frozen {
            return Err(FrozenError);
        }
        inner.items[index] = value.into();
        Ok(())
    }

    /// Snapshot of the items, in order.
    pub fn values(&self) -> Vec<Value> {
        self.inner.read().items.clone()
    }

    pub(crate) fn mark_frozen(&self) {
        self.inner.write().frozen = true;
    }

    pub(crate) fn addr(&self) -> usize {
        Arc::as_ptr(&self.inner) as *const () as usize
    }
}

impl PartialEq for List {
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.inner, &other.inner) {
            return true;
        }
        // Frozen state is not part of value equality.
        self.inner.read().items == other.inner.read().items
    }
}

impl fmt::Debug for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.read().items.iter()).finish()
    }
}

#[derive(Debug)]
struct MapInner {
    entries: IndexMap<String, Value>,
    frozen: bool,
}

/// A shared mapping from string keys to values, preserving insertion order.
///
/// `Clone` copies the handle; both handles point at the same entries.
#[derive(Clone, Default)]
pub struct Map {
    inner: Arc<RwLock<MapInner>>,
}

impl Default for MapInner {
    fn default() -> Self {
        MapInner {
            entries: IndexMap::new(),
            frozen: false,
        }
    }
}

impl Map {
    /// Creates a new, empty, unfrozen map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an unfrozen map from the given entries, in iteration order.
    pub fn from_entries<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            inner: Arc::new(RwLock::new(MapInner {
                entries: entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
                frozen: false,
            })),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().entries.is_empty()
    }

    pub fn is_frozen(&self) -> bool {
        self.inner.read().frozen
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.read().entries.contains_key(key)
    }

    /// Returns the value for `key`. Container values come back as handles
    /// sharing structure with this map.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.inner.read().entries.get(key).cloned()
    }

    /// Inserts an entry, returning the previous value for the key if any.
    /// An existing key keeps its position.
    pub fn insert(
        &self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>, FrozenError> {
        let mut inner = self.inner.write();
        if inner.frozen {
            return Err(FrozenError);
        }
        Ok(inner.entries.insert(key.into(), value.into()))
    }

    /// Removes an entry, preserving the order of the remaining ones.
    pub fn remove(&self, key: &str) -> Result<Option<Value>, FrozenError> {
        let mut inner = self.inner.write();
        if inner.frozen {
            return Err(FrozenError);
        }
        Ok(inner.entries.shift_remove(key))
    }

    /// Snapshot of the keys, in insertion order.
    pub fn keys(&self) -> Vec<String> {
        self.inner.read().entries.keys().cloned().collect()
    }

    /// Snapshot of the entries, in insertion order.
    pub fn entries(&self) -> Vec<(String, Value)> {
        self.inner
            .read()
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub(crate) fn mark_frozen(&self) {
        self.inner.write().frozen = true;
    }

    pub(crate) fn addr(&self) -> usize {
        Arc::as_ptr(&self.inner) as *const () as usize
    }
}

impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.inner, &other.inner) {
            return true;
        }
        self.inner.read().entries == other.inner.read().entries
    }
}

impl fmt::Debug for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.inner.read().entries.iter()).finish()
    }
}
