//! Constraint document loading
//!
//! Constraint tables can be declared in YAML or JSON documents instead
//! of code. A document is a `fields:` mapping, one entry per field:
//!
//! ```yaml
//! fields:
//!   name:
//!     presence: true
//!     schema: { type: string, minLength: 2 }
//!   nickname:
//!     presence: { allow_empty: true }
//!   age:
//!     schema: { type: integer, minimum: 0 }
//! ```
//!
//! `presence: true` is shorthand for the default rule (empty values
//! rejected); `presence: false` and omitting the key both mean no rule.
//! The `schema` value is passed to the engine untouched. Field order in
//! the document becomes declaration order in the table.
//!
//! [`load_constraints`] verifies every schema eagerly, so a bad document
//! fails at load time instead of polluting reports later.

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::core::constraint::{Constraint, Constraints, Presence};
use crate::core::error::TableError;

/// A presence rule as written in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PresenceSpec {
    /// `presence: true` or `presence: false`.
    Flag(bool),
    /// `presence: { allow_empty: ... }`.
    Options {
        /// Accept empty values, rejecting only missing/null.
        #[serde(default)]
        allow_empty: bool,
    },
}

impl PresenceSpec {
    fn into_presence(self) -> Option<Presence> {
        match self {
            PresenceSpec::Flag(false) => None,
            PresenceSpec::Flag(true) => Some(Presence::new()),
            PresenceSpec::Options { allow_empty } => Some(Presence { allow_empty }),
        }
    }
}

/// One field's entry in a document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSpec {
    /// Presence rule, if any.
    #[serde(default)]
    pub presence: Option<PresenceSpec>,

    /// JSON Schema fragment for the field's value, if any.
    #[serde(default)]
    pub schema: Option<Value>,
}

/// A parsed constraint document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConstraintDocument {
    /// Field entries, in document order.
    #[serde(default)]
    pub fields: IndexMap<String, FieldSpec>,
}

impl ConstraintDocument {
    /// Parses a document from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, TableError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parses a document from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, TableError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a document from a file, picking the format by extension
    /// (`.yaml`/`.yml` for YAML, anything else JSON).
    pub fn from_file(path: &Path) -> Result<Self, TableError> {
        let content = std::fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match ext {
            "yaml" | "yml" => Self::from_yaml_str(&content),
            _ => Self::from_json_str(&content),
        }
    }

    /// Builds the constraint table this document declares.
    ///
    /// Schemas are not compiled here; call
    /// [`Constraints::verify`] (or use [`load_constraints`]) to check
    /// them eagerly. Custom formats cannot be declared in a document and
    /// are registered on the returned table afterwards.
    pub fn into_constraints(self) -> Constraints {
        let mut constraints = Constraints::new();
        for (name, spec) in self.fields {
            let constraint = Constraint {
                presence: spec.presence.and_then(PresenceSpec::into_presence),
                schema: spec.schema,
            };
            constraints = constraints.field(name, constraint);
        }
        constraints
    }
}

/// Loads a constraint table from a YAML or JSON document and verifies
/// every declared schema.
pub fn load_constraints(path: impl AsRef<Path>) -> Result<Constraints, TableError> {
    let path = path.as_ref();
    let constraints = ConstraintDocument::from_file(path)?.into_constraints();
    constraints.verify()?;
    tracing::debug!(
        path = %path.display(),
        fields = constraints.len(),
        "loaded constraint table"
    );
    Ok(constraints)
}
