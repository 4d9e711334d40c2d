//! Freezing capability.
//!
//! Freezing makes container values reject further mutation. The capability
//! is behind a trait so the construction engine is not tied to one
//! implementation; [`InPlaceFreezer`] is the stock one, which flips the
//! frozen flag on the shared handles themselves so the effect is visible
//! through every live reference.

use std::collections::HashSet;

use crate::value::Value;

/// Makes values immutable, either recursively or at the top level only.
///
/// Implementations must be idempotent: freezing an already-frozen value is
/// a no-op. Scalars are immutable to begin with and are left untouched.
pub trait Freezer {
    /// Freezes `value` and every container reachable from it.
    fn freeze_deep(&self, value: &Value);

    /// Freezes only the top level of `value`; nested containers stay
    /// mutable.
    fn freeze_shallow(&self, value: &Value);
}

/// Freezes values in place through their shared handles.
#[derive(Debug, Clone, Copy, Default)]
pub struct InPlaceFreezer;

impl Freezer for InPlaceFreezer {
    fn freeze_deep(&self, value: &Value) {
        let mut visited = HashSet::new();
        freeze_graph(value, &mut visited);
    }

    fn freeze_shallow(&self, value: &Value) {
        match value {
            Value::List(list) => list.mark_frozen(),
            Value::Map(map) => map.mark_frozen(),
            _ => {}
        }
    }
}

// Tracks visited containers by handle address so cyclic graphs terminate
// and no lock is taken twice.
fn freeze_graph(value: &Value, visited: &mut HashSet<usize>) {
    match value {
        Value::List(list) => {
            if !visited.insert(list.addr()) {
                return;
            }
            list.mark_frozen();
            for item in list.values() {
                freeze_graph(&item, visited);
            }
        }
        Value::Map(map) => {
            if !visited.insert(map.addr()) {
                return;
            }
            map.mark_frozen();
            for (_, item) in map.entries() {
                freeze_graph(&item, visited);
            }
        }
        _ => {}
    }
}
