//! Violation reports
//!
//! A [`Violations`] value maps field names to the list of messages the
//! field collected. It is data, not an error type: the `validate*`
//! operations return it (wrapped in `Option`) and callers inspect or
//! serialize it. Field order is insertion order, so reports read in the
//! order constraints were declared.
//!
//! Failures that concern no particular field (a non-object payload, an
//! unusable field name) are folded under the [`META_FIELD`] key instead
//! of escaping as panics or `Err`s.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::core::error::UsageError;

/// Key under which object-level failures are reported.
pub const META_FIELD: &str = "_";

/// A field-to-messages mapping produced by validation.
///
/// Empty reports are normally not observed: the `validate*` family
/// returns `None` instead of `Some(empty)`. [`Violations::into_option`]
/// performs that normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Violations {
    entries: IndexMap<String, Vec<String>>,
}

impl Violations {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Creates a report holding a single object-level message under
    /// [`META_FIELD`].
    pub fn meta(message: impl Into<String>) -> Self {
        let mut violations = Self::new();
        violations.add(META_FIELD, message);
        violations
    }

    /// Appends one message to a field's list, creating the list on first
    /// use.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.entries
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Appends every message to a field's list.
    pub fn add_all<I, M>(&mut self, field: impl Into<String>, messages: I)
    where
        I: IntoIterator<Item = M>,
        M: Into<String>,
    {
        let list = self.entries.entry(field.into()).or_default();
        list.extend(messages.into_iter().map(Into::into));
    }

    /// Folds another report into this one, field by field.
    ///
    /// Messages append in input order; a field first seen here keeps its
    /// position, a new field goes to the back. Duplicate messages are
    /// kept.
    pub fn absorb(&mut self, other: Violations) {
        for (field, messages) in other.entries {
            self.entries.entry(field).or_default().extend(messages);
        }
    }

    /// Messages collected for one field.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.entries.get(field).map(Vec::as_slice)
    }

    /// True when the field collected at least one message.
    pub fn contains_field(&self, field: &str) -> bool {
        self.entries.contains_key(field)
    }

    /// Field names in report order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates `(field, messages)` pairs in report order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }

    /// Number of fields carrying messages.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no field collected a message.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `None` when the report is empty, `Some(self)` otherwise.
    pub fn into_option(self) -> Option<Self> {
        if self.is_empty() { None } else { Some(self) }
    }

    /// Renders the report as a JSON object of message arrays.
    pub fn to_value(&self) -> Value {
        let mut map = serde_json::Map::with_capacity(self.entries.len());
        for (field, messages) in &self.entries {
            let list = messages.iter().cloned().map(Value::String).collect();
            map.insert(field.clone(), Value::Array(list));
        }
        Value::Object(map)
    }

    /// Parses an untyped violation map.
    ///
    /// Accepts a JSON object whose values are arrays of strings. Anything
    /// else (a non-object, or a field holding something other than a list
    /// of strings) is a caller mistake and comes back as [`UsageError`].
    pub fn from_value(value: &Value) -> Result<Self, UsageError> {
        let Some(object) = value.as_object() else {
            return Err(UsageError::MalformedViolations {
                got: json_type_name(value),
            });
        };
        let mut violations = Self::new();
        for (field, messages) in object {
            let Some(list) = messages.as_array() else {
                return Err(UsageError::MalformedMessageList {
                    field: field.clone(),
                });
            };
            let mut parsed = Vec::with_capacity(list.len());
            for message in list {
                let Some(text) = message.as_str() else {
                    return Err(UsageError::MalformedMessageList {
                        field: field.clone(),
                    });
                };
                parsed.push(text.to_string());
            }
            violations.add_all(field.clone(), parsed);
        }
        Ok(violations)
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (field, messages) in &self.entries {
            for message in messages {
                writeln!(f, "  {}: {}", field, message)?;
            }
        }
        Ok(())
    }
}

impl FromIterator<(String, Vec<String>)> for Violations {
    fn from_iter<T: IntoIterator<Item = (String, Vec<String>)>>(iter: T) -> Self {
        let mut violations = Self::new();
        for (field, messages) in iter {
            violations.add_all(field, messages);
        }
        violations
    }
}

impl IntoIterator for Violations {
    type Item = (String, Vec<String>);
    type IntoIter = indexmap::map::IntoIter<String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Combines any number of reports into one.
///
/// Fields appearing in several reports concatenate their message lists in
/// input order; first appearance fixes a field's position. Returns `None`
/// only when there were no reports at all: a single report comes back as
/// is, and reports without messages combine into an empty report. Feed it
/// flattened `Option`s when `None` should mean "all inputs were clean".
pub fn merge<I>(reports: I) -> Option<Violations>
where
    I: IntoIterator<Item = Violations>,
{
    let mut reports = reports.into_iter();
    let mut combined = reports.next()?;
    for report in reports {
        combined.absorb(report);
    }
    Some(combined)
}

/// JSON type name used in diagnostics.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
