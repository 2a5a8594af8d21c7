//! Constraint tables
//!
//! A [`Constraints`] value is the declarative table behind a validable
//! type: field name to [`Constraint`], in declaration order. Each
//! constraint has two independent parts:
//!
//! - a presence rule, interpreted by this layer (the engine never sees
//!   it), deciding what happens when the field is missing, null or
//!   empty;
//! - a JSON Schema fragment for the field's value, delegated to the
//!   [`Engine`](crate::core::engine::Engine).
//!
//! Schema checks only run on present, non-null values. A field that is
//! missing and carries no presence rule is simply fine.

use indexmap::IndexMap;
use serde_json::Value;

use crate::core::engine::{Engine, FormatCheck};
use crate::core::error::TableError;
use crate::core::violations::{Violations, json_type_name};

/// Message reported when a field name is unusable.
pub(crate) const INVALID_FIELD_MESSAGE: &str = "Invalid field";

/// Message reported when a whole-object check receives a non-object.
pub(crate) const NON_OBJECT_MESSAGE: &str = "Cannot validate a non-object value";

/// How a whole-object check treats missing fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Every declared field is checked; presence rules apply.
    #[default]
    Strict,
    /// Fields absent from the object are skipped and presence failures
    /// are suppressed. Meant for partial payloads such as updates.
    Weak,
}

impl Mode {
    /// True for [`Mode::Weak`].
    pub fn is_weak(self) -> bool {
        matches!(self, Mode::Weak)
    }
}

/// A presence rule for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presence {
    /// When true, only missing/null fields fail; empty strings, arrays
    /// and objects are accepted.
    pub allow_empty: bool,
}

impl Presence {
    /// Presence that also rejects empty values.
    pub fn new() -> Self {
        Self { allow_empty: false }
    }

    /// Presence that accepts empty values, rejecting only missing/null.
    pub fn allowing_empty() -> Self {
        Self { allow_empty: true }
    }
}

impl Default for Presence {
    fn default() -> Self {
        Self::new()
    }
}

/// The declared rules for one field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Constraint {
    /// Presence rule, if any.
    pub presence: Option<Presence>,
    /// JSON Schema fragment for the field's value, if any.
    pub schema: Option<Value>,
}

impl Constraint {
    /// A constraint with no rules. Useful as a builder seed.
    pub fn new() -> Self {
        Self::default()
    }

    /// A constraint requiring the field to be present and non-empty.
    pub fn required() -> Self {
        Self {
            presence: Some(Presence::new()),
            ..Self::default()
        }
    }

    /// Relaxes the presence rule to accept empty values.
    pub fn allow_empty(mut self) -> Self {
        self.presence = Some(Presence::allowing_empty());
        self
    }

    /// Attaches a JSON Schema fragment for the field's value.
    pub fn with_schema(mut self, schema: Value) -> Self {
        self.schema = Some(schema);
        self
    }
}

/// An ordered field-to-constraint table with its engine.
///
/// Built once per type (usually inside a `OnceLock` via
/// [`impl_validable!`](crate::impl_validable)) and shared immutably
/// afterwards, so checks can run concurrently without coordination.
#[derive(Debug, Clone, Default)]
pub struct Constraints {
    fields: IndexMap<String, Constraint>,
    engine: Engine,
}

impl Constraints {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            fields: IndexMap::new(),
            engine: Engine::new(),
        }
    }

    /// Declares a field's constraint. Re-declaring a field replaces the
    /// earlier entry but keeps its position.
    pub fn field(mut self, name: impl Into<String>, constraint: Constraint) -> Self {
        self.fields.insert(name.into(), constraint);
        self
    }

    /// Registers a custom string format usable from field schemas.
    pub fn custom_format(mut self, name: impl Into<String>, check: FormatCheck) -> Self {
        self.engine.register_format(name, check);
        self
    }

    /// Looks up one field's constraint.
    pub fn get(&self, field: &str) -> Option<&Constraint> {
        self.fields.get(field)
    }

    /// Declared field names, in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when no field is declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The engine this table checks schemas with.
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Compiles every declared schema, failing fast on the first bad one.
    ///
    /// Checks tolerate bad schemas by folding them into the report; call
    /// this at construction time to surface them as hard errors instead.
    pub fn verify(&self) -> Result<(), TableError> {
        for (field, constraint) in &self.fields {
            if let Some(schema) = &constraint.schema {
                self.engine
                    .compile(schema)
                    .map_err(|reason| TableError::InvalidSchema {
                        field: field.clone(),
                        reason,
                    })?;
            }
        }
        Ok(())
    }

    /// Checks a whole object against the table.
    ///
    /// Non-objects yield a single report under the meta field. Object
    /// keys with no declared constraint are ignored.
    pub fn check_object(&self, target: &Value, mode: Mode) -> Violations {
        let Some(object) = target.as_object() else {
            tracing::debug!(got = json_type_name(target), "rejecting non-object target");
            return Violations::meta(NON_OBJECT_MESSAGE);
        };

        tracing::trace!(
            declared = self.fields.len(),
            weak = mode.is_weak(),
            "checking object against constraint table"
        );

        let mut violations = Violations::new();
        for (field, constraint) in &self.fields {
            let value = object.get(field);
            if mode.is_weak() && value.is_none() {
                continue;
            }
            self.check_one(field, constraint, value, mode, &mut violations);
        }
        violations
    }

    /// Checks a single declared field of an object.
    ///
    /// An empty field name is unusable and reports under the meta field;
    /// an undeclared one passes silently.
    pub fn check_field(&self, target: &Value, field: &str) -> Violations {
        if field.is_empty() {
            return Violations::meta(INVALID_FIELD_MESSAGE);
        }
        let Some(object) = target.as_object() else {
            return Violations::meta(NON_OBJECT_MESSAGE);
        };
        let Some(constraint) = self.fields.get(field) else {
            return Violations::new();
        };

        let mut violations = Violations::new();
        self.check_one(field, constraint, object.get(field), Mode::Strict, &mut violations);
        violations
    }

    /// Checks a candidate value against one field's constraint, with no
    /// surrounding object. A null value counts as absent.
    pub fn check_value(&self, field: &str, value: &Value) -> Violations {
        if field.is_empty() {
            return Violations::meta(INVALID_FIELD_MESSAGE);
        }
        let Some(constraint) = self.fields.get(field) else {
            return Violations::new();
        };

        let mut violations = Violations::new();
        self.check_one(field, constraint, Some(value), Mode::Strict, &mut violations);
        violations
    }

    /// Runs one field's presence rule and schema. `value` is `None` when
    /// the key is missing from the target object.
    fn check_one(
        &self,
        field: &str,
        constraint: &Constraint,
        value: Option<&Value>,
        mode: Mode,
        violations: &mut Violations,
    ) {
        let absent = matches!(value, None | Some(Value::Null));

        if let Some(presence) = &constraint.presence {
            let failed = if presence.allow_empty {
                absent
            } else {
                absent || value.is_some_and(is_empty_value)
            };
            if failed && !mode.is_weak() {
                violations.add(field, format!("Field '{}' is required", field));
            }
        }

        if absent {
            return;
        }
        let (Some(schema), Some(value)) = (&constraint.schema, value) else {
            return;
        };
        match self.engine.check(schema, value) {
            Ok(messages) => violations.add_all(field, messages),
            Err(reason) => {
                tracing::debug!(field, %reason, "field schema failed to compile");
                violations.add(
                    crate::core::violations::META_FIELD,
                    format!("Invalid schema for field '{}': {}", field, reason),
                );
            }
        }
    }
}

/// The emptiness rule used by presence checks: null, blank strings,
/// empty arrays and empty objects are empty. Numbers and booleans
/// never are.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}
