//! The validable capability
//!
//! [`Validable`] turns a serializable type into one that can check
//! itself against its declared [`Constraints`]. Implementors provide
//! the table; every operation comes for free. The
//! [`impl_validable!`](crate::impl_validable) macro writes the
//! implementation, caching the table in a `OnceLock`.
//!
//! All operations are total: whatever goes wrong ends up in the
//! returned report, never in a panic. `None` means "nothing to
//! report".

use serde::Serialize;
use serde_json::Value;

use crate::core::constraint::{Constraints, Mode};
use crate::core::error::ValidableError;
use crate::core::violations::Violations;

/// Capability trait for types with a declared constraint table.
///
/// Usually implemented by the `impl_validable!` macro rather than by
/// hand.
pub trait Validable: Serialize {
    /// The constraint table shared by every instance of this type.
    fn constraints() -> &'static Constraints;

    /// Checks every declared field of this instance.
    ///
    /// The instance is serialized and checked in [`Mode::Strict`].
    /// Serialization failures and non-object shapes report under the
    /// meta field.
    fn validate(&self) -> Option<Violations> {
        let report = match serde_json::to_value(self) {
            Ok(target) => Self::constraints().check_object(&target, Mode::Strict),
            Err(error) => serialization_failure(error),
        };
        report.into_option()
    }

    /// Checks a single declared field of this instance.
    ///
    /// An empty field name reports `Invalid field` under the meta
    /// field; an undeclared one passes silently.
    fn validate_field(&self, field: &str) -> Option<Violations> {
        let report = match serde_json::to_value(self) {
            Ok(target) => Self::constraints().check_field(&target, field),
            Err(error) => serialization_failure(error),
        };
        report.into_option()
    }

    /// Checks a candidate value against one field's constraint, without
    /// an instance. A field with no declared constraint passes silently.
    fn validate_value(field: &str, value: &Value) -> Option<Violations> {
        Self::constraints().check_value(field, value).into_option()
    }

    /// Checks an arbitrary JSON object against this type's table.
    ///
    /// [`Mode::Weak`] skips fields the object does not carry, for
    /// partial payloads. Non-objects report under the meta field.
    fn validate_object(target: &Value, mode: Mode) -> Option<Violations> {
        Self::constraints().check_object(target, mode).into_option()
    }

    /// Like [`validate`](Validable::validate), but as a `Result` for
    /// call sites that bubble with `?`.
    fn check(&self) -> Result<(), ValidableError> {
        match self.validate() {
            None => Ok(()),
            Some(violations) => Err(ValidableError::Invalid(violations)),
        }
    }
}

fn serialization_failure(error: serde_json::Error) -> Violations {
    tracing::debug!(%error, "value failed to serialize for validation");
    Violations::meta(format!("Cannot serialize value for validation: {}", error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constraint::Constraint;
    use serde_json::json;
    use std::sync::OnceLock;

    #[derive(Debug, Serialize)]
    struct Person {
        name: String,
        email: String,
        age: Option<u32>,
    }

    impl Validable for Person {
        fn constraints() -> &'static Constraints {
            static TABLE: OnceLock<Constraints> = OnceLock::new();
            TABLE.get_or_init(|| {
                Constraints::new()
                    .field(
                        "name",
                        Constraint::required()
                            .with_schema(json!({"type": "string", "minLength": 2})),
                    )
                    .field(
                        "email",
                        Constraint::required()
                            .with_schema(json!({"type": "string", "format": "email"})),
                    )
                    .field(
                        "age",
                        Constraint::new()
                            .with_schema(json!({"type": "integer", "minimum": 0})),
                    )
            })
        }
    }

    fn alice() -> Person {
        Person {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            age: Some(30),
        }
    }

    #[test]
    fn test_validate_valid_instance() {
        assert!(alice().validate().is_none());
    }

    #[test]
    fn test_validate_reports_all_failing_fields() {
        let person = Person {
            name: "A".to_string(),
            email: "nope".to_string(),
            age: None,
        };
        let violations = person.validate().unwrap();
        assert!(violations.contains_field("name"));
        assert!(violations.contains_field("email"));
        assert!(!violations.contains_field("age"));
    }

    #[test]
    fn test_validate_treats_option_none_as_absent() {
        // age is None -> serializes to null -> no presence rule, schema skipped.
        let person = Person { age: None, ..alice() };
        assert!(person.validate().is_none());
    }

    #[test]
    fn test_validate_field_checks_only_that_field() {
        let person = Person {
            name: "A".to_string(),
            email: "nope".to_string(),
            age: Some(30),
        };
        let violations = person.validate_field("email").unwrap();
        assert!(violations.contains_field("email"));
        assert!(!violations.contains_field("name"));
    }

    #[test]
    fn test_validate_field_passes_on_valid_field() {
        assert!(alice().validate_field("email").is_none());
    }

    #[test]
    fn test_validate_field_empty_name_reports_meta() {
        let violations = alice().validate_field("").unwrap();
        assert_eq!(
            violations.get("_"),
            Some(&["Invalid field".to_string()][..])
        );
    }

    #[test]
    fn test_validate_field_undeclared_passes() {
        assert!(alice().validate_field("color").is_none());
    }

    #[test]
    fn test_validate_value_without_instance() {
        assert!(Person::validate_value("email", &json!("bob@example.com")).is_none());
        assert!(Person::validate_value("email", &json!("bad")).is_some());
        assert!(Person::validate_value("email", &json!(null)).is_some());
    }

    #[test]
    fn test_validate_value_undeclared_field_passes() {
        assert!(Person::validate_value("color", &json!(42)).is_none());
    }

    #[test]
    fn test_validate_object_strict() {
        let violations = Person::validate_object(&json!({}), Mode::Strict).unwrap();
        assert!(violations.contains_field("name"));
        assert!(violations.contains_field("email"));
    }

    #[test]
    fn test_validate_object_weak_checks_only_given_fields() {
        assert!(Person::validate_object(&json!({"name": "Bob"}), Mode::Weak).is_none());

        let violations =
            Person::validate_object(&json!({"email": "bad"}), Mode::Weak).unwrap();
        assert!(violations.contains_field("email"));
        assert!(!violations.contains_field("name"));
    }

    #[test]
    fn test_validate_object_rejects_non_object() {
        let violations = Person::validate_object(&json!("zap"), Mode::Strict).unwrap();
        assert_eq!(
            violations.get("_"),
            Some(&["Cannot validate a non-object value".to_string()][..])
        );
    }

    #[test]
    fn test_check_maps_to_result() {
        assert!(alice().check().is_ok());

        let person = Person {
            name: String::new(),
            email: String::new(),
            age: None,
        };
        let err = person.check().unwrap_err();
        assert!(err.is_invalid());
        assert!(err.violations().unwrap().contains_field("name"));
    }

    #[test]
    fn test_non_object_instance_reports_meta() {
        #[derive(Serialize)]
        struct Count(u32);

        impl Validable for Count {
            fn constraints() -> &'static Constraints {
                static TABLE: OnceLock<Constraints> = OnceLock::new();
                TABLE.get_or_init(Constraints::new)
            }
        }

        let violations = Count(3).validate().unwrap();
        assert_eq!(
            violations.get("_"),
            Some(&["Cannot validate a non-object value".to_string()][..])
        );
    }
}
