//! Attribute declarations.
//!
//! An [`Attribute`] is one named field of a schema: an optional validation
//! rule, a freeze policy, and an optional default. Attributes are built with
//! chained methods and become immutable once declared into a schema.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{FloeError, Result};
use crate::rule::Rule;
use crate::value::{Map, Value};

/// How deeply an attribute's resolved value is frozen at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FreezePolicy {
    /// Freeze the value and every container reachable from it.
    #[default]
    Deep,

    /// Freeze only the top-level value; nested containers stay mutable.
    Shallow,

    /// Leave the value exactly as supplied.
    None,
}

impl FreezePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            FreezePolicy::Deep => "deep",
            FreezePolicy::Shallow => "shallow",
            FreezePolicy::None => "none",
        }
    }
}

impl fmt::Display for FreezePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FreezePolicy {
    type Err = FloeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "deep" => Ok(FreezePolicy::Deep),
            "shallow" => Ok(FreezePolicy::Shallow),
            "none" => Ok(FreezePolicy::None),
            other => Err(FloeError::InvalidFreezePolicy(other.to_string())),
        }
    }
}

/// One declared field of a schema.
///
/// Built with chained methods; every knob has a default:
///
/// ```
/// use floe::{Attribute, FreezePolicy, Value};
///
/// let plain = Attribute::new("note");
/// let strict = Attribute::new("retries")
///     .rule(|v: &Value| matches!(v, Value::Int(n) if *n >= 0))
///     .policy(FreezePolicy::Shallow)
///     .default_value(0);
/// ```
///
/// Without a rule, any value is accepted. Without a default, the attribute
/// is required at construction time. `Value::Null` is a legitimate default,
/// distinct from having none.
#[derive(Clone)]
pub struct Attribute {
    name: String,
    rule: Option<Arc<dyn Rule>>,
    policy: FreezePolicy,
    default: Option<Value>,
}

impl Attribute {
    /// Starts a declaration with no rule, the `Deep` policy, and no default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rule: None,
            policy: FreezePolicy::Deep,
            default: None,
        }
    }

    /// Sets the validation rule.
    pub fn rule(mut self, rule: impl Rule + 'static) -> Self {
        self.rule = Some(Arc::new(rule));
        self
    }

    /// Sets the freeze policy.
    pub fn policy(mut self, policy: FreezePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the default value.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn freeze_policy(&self) -> FreezePolicy {
        self.policy
    }

    pub fn has_rule(&self) -> bool {
        self.rule.is_some()
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Whether `value` satisfies this attribute's rule. No rule accepts
    /// everything.
    pub fn accepts(&self, value: &Value) -> bool {
        self.rule.as_ref().map_or(true, |rule| rule.satisfies(value))
    }

    /// Resolves this attribute's value from an input map.
    ///
    /// A key that is present wins even when its value is `Null`; the default
    /// applies only when the key is absent.
    pub fn extract(&self, input: &Map) -> Result<Value> {
        if let Some(value) = input.get(&self.name) {
            if !self.accepts(&value) {
                return Err(FloeError::InvalidValue {
                    name: self.name.clone(),
                    value,
                });
            }
            return Ok(value);
        }

        match &self.default {
            Some(value) => Ok(value.clone()),
            None => Err(FloeError::MissingAttribute(self.name.clone())),
        }
    }

    pub(crate) fn validate_default(&self) -> Result<()> {
        if let Some(default) = &self.default {
            if !self.accepts(default) {
                return Err(FloeError::InvalidDefaultValue {
                    name: self.name.clone(),
                    value: default.clone(),
                });
            }
        }
        Ok(())
    }

    pub(crate) fn default_ref(&self) -> Option<&Value> {
        self.default.as_ref()
    }
}

impl fmt::Debug for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attribute")
            .field("name", &self.name)
            .field("policy", &self.policy)
            .field("has_rule", &self.rule.is_some())
            .field("default", &self.default)
            .finish()
    }
}
