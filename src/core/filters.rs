//! Key-set filters
//!
//! Filters check an object's keys against a reference set of field
//! names, without looking at values:
//!
//! - [`whitelist`] rejects keys outside the set;
//! - [`blacklist`] rejects keys inside it;
//! - [`requirelist`] demands every name in the set appears as a key.
//!
//! Violations come back in the same field-to-messages shape the
//! `validate*` operations use, so the reports compose with
//! [`merge`](crate::core::violations::merge). Calling a filter on a
//! non-object, or with a reference set that is not a collection of
//! field names, is a misuse error rather than a violation.

use serde_json::Value;

use crate::core::constraint::Constraints;
use crate::core::error::UsageError;
use crate::core::violations::{Violations, json_type_name};

/// A reference set of field names for the filters.
///
/// Implemented for string slices and vectors, for [`Constraints`]
/// (the declared field names) and for untyped [`Value`]s holding an
/// array of names or an object (its keys).
pub trait FieldSet {
    /// The field names in the set, or why the set is unusable.
    fn field_names(&self) -> Result<Vec<&str>, UsageError>;
}

impl FieldSet for Value {
    fn field_names(&self) -> Result<Vec<&str>, UsageError> {
        match self {
            Value::Array(items) => {
                let mut names = Vec::with_capacity(items.len());
                for item in items {
                    let Some(name) = item.as_str() else {
                        return Err(UsageError::InvalidReferenceSet {
                            reason: format!(
                                "expected an array of field names, found {}",
                                json_type_name(item)
                            ),
                        });
                    };
                    names.push(name);
                }
                Ok(names)
            }
            Value::Object(map) => Ok(map.keys().map(String::as_str).collect()),
            other => Err(UsageError::InvalidReferenceSet {
                reason: format!(
                    "expected an array of field names or an object, got {}",
                    json_type_name(other)
                ),
            }),
        }
    }
}

impl FieldSet for Constraints {
    fn field_names(&self) -> Result<Vec<&str>, UsageError> {
        Ok(Constraints::field_names(self).collect())
    }
}

impl<S: AsRef<str>> FieldSet for [S] {
    fn field_names(&self) -> Result<Vec<&str>, UsageError> {
        Ok(self.iter().map(AsRef::as_ref).collect())
    }
}

impl<S: AsRef<str>, const N: usize> FieldSet for [S; N] {
    fn field_names(&self) -> Result<Vec<&str>, UsageError> {
        self.as_slice().field_names()
    }
}

impl<S: AsRef<str>> FieldSet for Vec<S> {
    fn field_names(&self) -> Result<Vec<&str>, UsageError> {
        self.as_slice().field_names()
    }
}

/// Rejects every key of `target` that is not in `allowed`.
pub fn whitelist<F>(target: &Value, allowed: &F) -> Result<Option<Violations>, UsageError>
where
    F: FieldSet + ?Sized,
{
    let object = as_object(target)?;
    let allowed = allowed.field_names()?;

    let mut violations = Violations::new();
    for key in object.keys() {
        if !allowed.contains(&key.as_str()) {
            violations.add(key, format!("Field '{}' is not allowed", key));
        }
    }
    Ok(violations.into_option())
}

/// Rejects every key of `target` that is in `forbidden`.
pub fn blacklist<F>(target: &Value, forbidden: &F) -> Result<Option<Violations>, UsageError>
where
    F: FieldSet + ?Sized,
{
    let object = as_object(target)?;
    let forbidden = forbidden.field_names()?;

    let mut violations = Violations::new();
    for key in object.keys() {
        if forbidden.contains(&key.as_str()) {
            violations.add(key, format!("Field '{}' is forbidden", key));
        }
    }
    Ok(violations.into_option())
}

/// Demands that every name in `required` appears as a key of `target`.
///
/// Key presence only: a key holding null still counts as present. Value
/// checks belong to the constraint table.
pub fn requirelist<F>(target: &Value, required: &F) -> Result<Option<Violations>, UsageError>
where
    F: FieldSet + ?Sized,
{
    let object = as_object(target)?;
    let required = required.field_names()?;

    let mut violations = Violations::new();
    for name in required {
        if !object.contains_key(name) {
            violations.add(name, format!("Field '{}' is required", name));
        }
    }
    Ok(violations.into_option())
}

fn as_object(target: &Value) -> Result<&serde_json::Map<String, Value>, UsageError> {
    target.as_object().ok_or(UsageError::NonObjectTarget {
        got: json_type_name(target),
    })
}
