//! Validation rule capability.
//!
//! A rule is any boolean predicate over a [`Value`]. The engine never looks
//! inside a rule; it only asks whether a candidate value satisfies it.
//! Closures implement [`Rule`] directly, so most call sites just pass one:
//!
//! ```
//! use floe::{Attribute, Value};
//!
//! let attr = Attribute::new("count")
//!     .rule(|v: &Value| matches!(v, Value::Int(n) if *n >= 0));
//! ```

use crate::value::Value;

/// A boolean validity check applied to a candidate attribute value.
///
/// Rules are shared across threads once a schema is built, hence the
/// `Send + Sync` bound.
pub trait Rule: Send + Sync {
    fn satisfies(&self, value: &Value) -> bool;
}

impl<F> Rule for F
where
    F: Fn(&Value) -> bool + Send + Sync,
{
    fn satisfies(&self, value: &Value) -> bool {
        self(value)
    }
}
