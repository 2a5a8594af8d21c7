//! # Validable
//!
//! Declarative per-field constraint validation for data entities.
//!
//! ## Features
//!
//! - **Validable capability**: mix validation into any serializable type
//!   with one trait and a static constraint table
//! - **Declarative tables**: field name to presence rule plus JSON Schema
//!   fragment, in declaration order
//! - **JSON Schema engine**: field values checked with Draft 2020-12,
//!   format assertions on, custom formats pluggable
//! - **Key-set filters**: whitelist, blacklist and requirelist checks
//!   over an object's keys
//! - **Mergeable reports**: every check returns the same field-to-messages
//!   shape, combinable with `merge`
//! - **Document-defined tables**: load constraint tables from YAML or
//!   JSON files
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use validable::prelude::*;
//! use serde_json::json;
//!
//! #[derive(Serialize)]
//! struct User {
//!     name: String,
//!     email: String,
//! }
//!
//! impl_validable!(User, {
//!     "name" => Constraint::required()
//!         .with_schema(json!({"type": "string", "minLength": 2})),
//!     "email" => Constraint::required()
//!         .with_schema(json!({"type": "string", "format": "email"})),
//! });
//!
//! let user = User { name: "Jo".into(), email: "jo@example.com".into() };
//! assert!(user.validate().is_none());
//!
//! // Type-level checks need no instance.
//! assert!(User::validate_value("email", &json!("nope")).is_some());
//! assert!(User::validate_object(&json!({"email": "jo@example.com"}), Mode::Weak).is_none());
//!
//! // Filters check keys, not values, and their reports merge.
//! let payload = json!({"name": "Jo", "role": "admin"});
//! let reports = [
//!     whitelist(&payload, User::constraints())?,
//!     User::validate_object(&payload, Mode::Strict),
//! ];
//! let report = merge(reports.into_iter().flatten());
//! ```

pub mod config;
pub mod core;
mod macros;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        constraint::{Constraint, Constraints, Mode, Presence},
        engine::{Engine, FormatCheck},
        error::{TableError, UsageError, ValidableError, ValidableResult},
        filters::{FieldSet, blacklist, requirelist, whitelist},
        validable::Validable,
        violations::{META_FIELD, Violations, merge},
    };

    // === Macros ===
    pub use crate::impl_validable;

    // === Config ===
    pub use crate::config::{ConstraintDocument, FieldSpec, PresenceSpec, load_constraints};

    // === External dependencies ===
    pub use serde::{Deserialize, Serialize};
    pub use serde_json::{Value, json};
}
