//! # Floe
//!
//! Immutable, schema-validated value objects with tiered freezing.
//!
//! Floe lets you declare a set of named attributes, each with an optional
//! validation rule, an optional default, and a freeze policy, then construct
//! instances from raw input maps. Construction validates every attribute,
//! applies defaults, freezes values per policy, and returns an object that
//! cannot change for the rest of its life.
//!
//! ## The Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Declaration (SchemaBuilder)                                │
//! │  - Accumulates Attributes, rejects duplicates eagerly       │
//! │  - Validates defaults against their own rules               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │ finish()
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Composition (Schema)                                       │
//! │  - Optional parent link; effective set folds the chain      │
//! │  - Child re-declarations override, never collide            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │ construct(input)
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Construction engine                                        │
//! │  - Resolves each attribute: supplied value or default       │
//! │  - Validates against the rule, freezes per policy           │
//! │  - All-or-nothing: an Instance exists only fully built      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Freeze Tiers
//!
//! Each attribute picks how deeply its resolved value is frozen:
//! [`FreezePolicy::Deep`] freezes the whole reachable graph,
//! [`FreezePolicy::Shallow`] only the top-level container, and
//! [`FreezePolicy::None`] leaves the value alone. Containers are shared
//! handles, so freezing is visible through every reference a caller kept.
//!
//! ## Swappable Capabilities
//!
//! Validation and freezing sit behind single-purpose traits. Any closure is
//! a [`Rule`]; [`InPlaceFreezer`] is the stock [`Freezer`] and custom ones
//! plug in through [`Schema::construct_with`].
//!
//! ## Module Overview
//!
//! - [`value`]: the dynamic value domain (`Value`, `List`, `Map`)
//! - [`rule`]: the validation capability
//! - [`freeze`]: the freezing capability
//! - [`attribute`]: single-field declarations and freeze policies
//! - [`set`]: immutable, ordered attribute collections
//! - [`schema`]: builders, composition, and the effective set
//! - [`instance`]: the construction engine and finished objects
//! - [`error`]: error types

pub mod attribute;
pub mod error;
pub mod freeze;
pub mod instance;
pub mod rule;
pub mod schema;
pub mod set;
pub mod value;

pub use attribute::{Attribute, FreezePolicy};
pub use error::{FloeError, Result};
pub use freeze::{Freezer, InPlaceFreezer};
pub use instance::Instance;
pub use rule::Rule;
pub use schema::{Schema, SchemaBuilder};
pub use set::AttributeSet;
pub use value::{FrozenError, List, Map, Value};
