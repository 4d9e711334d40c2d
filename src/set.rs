//! Attribute collections.
//!
//! An [`AttributeSet`] is an immutable, insertion-ordered collection of
//! attributes keyed by unique name. Every operation returns a new set; the
//! receiver is never touched, so a failed operation leaves existing schemas
//! exactly as they were.

use indexmap::IndexMap;

use crate::attribute::Attribute;
use crate::error::{FloeError, Result};

/// An immutable collection of attributes with unique names.
///
/// Iteration follows declaration order, which is also the order the
/// construction engine resolves attributes in.
#[derive(Debug, Clone, Default)]
pub struct AttributeSet {
    attrs: IndexMap<String, Attribute>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attrs.get(name)
    }

    /// Iterates the attributes in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.attrs.values()
    }

    /// Iterates the attribute names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attrs.keys().map(String::as_str)
    }

    /// Returns a new set with `attr` appended.
    ///
    /// Fails if an attribute with the same name is already in this set.
    pub fn add(&self, attr: Attribute) -> Result<AttributeSet> {
        if self.attrs.contains_key(attr.name()) {
            return Err(FloeError::DuplicateAttribute(attr.name().to_string()));
        }
        let mut attrs = self.attrs.clone();
        attrs.insert(attr.name().to_string(), attr);
        Ok(Self { attrs })
    }

    /// Returns the union of two sets.
    ///
    /// Fails if the sets share any name; the error names the first colliding
    /// key in this set's order. Which of several collisions is reported is
    /// deterministic but not part of the contract.
    pub fn merge(&self, other: &AttributeSet) -> Result<AttributeSet> {
        if let Some(name) = self.attrs.keys().find(|name| other.contains(name.as_str())) {
            return Err(FloeError::DuplicateAttribute(name.clone()));
        }
        let mut attrs = self.attrs.clone();
        for (name, attr) in &other.attrs {
            attrs.insert(name.clone(), attr.clone());
        }
        Ok(Self { attrs })
    }

    /// Returns this set with `other`'s attributes layered on top.
    ///
    /// Shared names are replaced wholesale and keep their position in this
    /// set; new names are appended. This is the inheritance operation:
    /// a descendant re-declaring a name overrides it rather than colliding.
    pub fn overridden_by(&self, other: &AttributeSet) -> AttributeSet {
        let mut attrs = self.attrs.clone();
        for (name, attr) in &other.attrs {
            attrs.insert(name.clone(), attr.clone());
        }
        Self { attrs }
    }
}
