//! # Schemas
//!
//! A [`Schema`] is an immutable description of a value shape: the attributes
//! declared directly on it, plus an optional parent schema it extends. The
//! *effective* attribute set folds the ancestor chain with this schema's own
//! declarations, where a re-declared name overrides the ancestor's attribute
//! wholesale (rule, policy, and default are all replaced).
//!
//! Schemas are built through [`SchemaBuilder`], the only place declarations
//! accumulate. Declaration is eager about validation: a default that fails
//! its own rule or a name declared twice in the same builder is rejected on
//! the spot, before any instance exists. A finished schema is immutable and
//! safe to share across threads.
//!
//! ```
//! use floe::{Attribute, Map, Schema, Value};
//!
//! let mut builder = Schema::builder();
//! builder.declare(Attribute::new("host").rule(|v: &Value| v.as_str().is_some()))?;
//! builder.declare(Attribute::new("port").default_value(80))?;
//! let schema = builder.finish();
//!
//! let conn = schema.construct(Map::from_entries([("host", "localhost")]))?;
//! assert_eq!(conn.get("port"), Some(&Value::Int(80)));
//! # Ok::<(), floe::FloeError>(())
//! ```

use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::attribute::Attribute;
use crate::error::Result;
use crate::freeze::{Freezer, InPlaceFreezer};
use crate::instance::{self, Instance};
use crate::set::AttributeSet;
use crate::value::Value;

/// An immutable attribute schema, optionally extending a parent schema.
#[derive(Debug)]
pub struct Schema {
    parent: Option<Arc<Schema>>,
    own: AttributeSet,
    effective: OnceCell<AttributeSet>,
}

impl Schema {
    /// Starts a builder for a root schema.
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    pub fn parent(&self) -> Option<&Arc<Schema>> {
        self.parent.as_ref()
    }

    /// The attributes declared directly on this schema.
    pub fn own_attributes(&self) -> &AttributeSet {
        &self.own
    }

    /// The fully resolved attribute set: ancestors first, own declarations
    /// layered on top. Computed on first use and cached; safe because the
    /// schema can no longer change.
    pub fn effective(&self) -> &AttributeSet {
        self.effective.get_or_init(|| match &self.parent {
            Some(parent) => parent.effective().overridden_by(&self.own),
            None => self.own.clone(),
        })
    }

    /// Constructs an instance from `input` using the stock freezer.
    ///
    /// `input` must resolve to a [`Value::Map`]; another instance works via
    /// `Value::from(&instance)`. See [`Instance`] for the guarantees.
    pub fn construct(&self, input: impl Into<Value>) -> Result<Instance> {
        self.construct_with(&InPlaceFreezer, input)
    }

    /// Constructs an instance with a caller-supplied freeze capability.
    pub fn construct_with(
        &self,
        freezer: &dyn Freezer,
        input: impl Into<Value>,
    ) -> Result<Instance> {
        instance::construct(self, freezer, input.into())
    }
}

/// Accumulates attribute declarations and finalizes them into a [`Schema`].
///
/// A failed declaration leaves the builder unchanged and usable.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    parent: Option<Arc<Schema>>,
    own: AttributeSet,
}

impl SchemaBuilder {
    /// A builder for a schema with no parent.
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder for a schema extending `parent`.
    ///
    /// Names already declared on the parent may be re-declared here; they
    /// override rather than collide.
    pub fn extending(parent: Arc<Schema>) -> Self {
        Self {
            parent: Some(parent),
            own: AttributeSet::new(),
        }
    }

    /// Declares an attribute on this schema.
    ///
    /// Validates eagerly: a default that fails the attribute's own rule is
    /// rejected here, as is a name already declared on this builder. The
    /// default, if any, is deep-frozen at this point so no later mutation
    /// can corrupt it for instances that fall back to it.
    pub fn declare(&mut self, attr: Attribute) -> Result<&mut Self> {
        attr.validate_default()?;
        if let Some(default) = attr.default_ref() {
            InPlaceFreezer.freeze_deep(default);
        }
        self.own = self.own.add(attr)?;
        Ok(self)
    }

    /// Finalizes the declarations into an immutable schema.
    pub fn finish(self) -> Arc<Schema> {
        Arc::new(Schema {
            parent: self.parent,
            own: self.own,
            effective: OnceCell::new(),
        })
    }
}
