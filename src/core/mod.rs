//! Core module containing the validation primitives

pub mod constraint;
pub mod engine;
pub mod error;
pub mod filters;
pub mod validable;
pub mod violations;

pub use constraint::{Constraint, Constraints, Mode, Presence, is_empty_value};
pub use engine::{Engine, FormatCheck};
pub use error::{TableError, UsageError, ValidableError, ValidableResult};
pub use filters::{FieldSet, blacklist, requirelist, whitelist};
pub use validable::Validable;
pub use violations::{META_FIELD, Violations, merge};
