//! Constraint engine
//!
//! Thin adapter over the `jsonschema` crate. Field schemas are JSON
//! Schema fragments (Draft 2020-12) applied to a single field value,
//! never to the whole object; presence rules live one layer up, in
//! [`Constraints`](crate::core::constraint::Constraints).
//!
//! Format assertions are enabled, so `{"format": "email"}` rejects
//! instead of annotating. Custom formats registered on the engine are
//! plain `fn(&str) -> bool` checks.

use std::sync::OnceLock;

use jsonschema::Validator;
use regex::Regex;
use serde_json::Value;

/// A named string-format check, such as the built-in `phone`.
pub type FormatCheck = fn(&str) -> bool;

/// Compiles field schemas and evaluates values against them.
///
/// Compilation failures are reported as plain reason strings; callers
/// decide whether to fold them into a violation report or surface them
/// as a table error.
#[derive(Debug, Clone)]
pub struct Engine {
    formats: Vec<(String, FormatCheck)>,
}

impl Engine {
    /// Creates an engine with the built-in `phone` format registered.
    pub fn new() -> Self {
        Self {
            formats: vec![("phone".to_string(), is_valid_phone as FormatCheck)],
        }
    }

    /// Registers a custom string format under the given name.
    ///
    /// Schemas then assert it with `{"format": "<name>"}`. Re-registering
    /// a name overrides the earlier check.
    pub fn register_format(&mut self, name: impl Into<String>, check: FormatCheck) {
        let name = name.into();
        self.formats.retain(|(existing, _)| *existing != name);
        self.formats.push((name, check));
    }

    /// Names of the registered custom formats, in registration order.
    pub fn format_names(&self) -> impl Iterator<Item = &str> {
        self.formats.iter().map(|(name, _)| name.as_str())
    }

    /// Compiles one field schema.
    pub fn compile(&self, schema: &Value) -> Result<Validator, String> {
        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft202012);
        opts.should_validate_formats(true);
        for (name, check) in &self.formats {
            opts.with_format(name.clone(), *check);
        }
        opts.build(schema).map_err(|e| e.to_string())
    }

    /// Evaluates a value against a field schema.
    ///
    /// Returns the violation messages (empty means the value conforms).
    /// `Err` means the schema itself did not compile.
    pub fn check(&self, schema: &Value, instance: &Value) -> Result<Vec<String>, String> {
        let validator = self.compile(schema)?;
        let messages = validator
            .iter_errors(instance)
            .map(|error| {
                let path = error.instance_path.to_string();
                if path.is_empty() {
                    error.to_string()
                } else {
                    format!("{}: {}", path, error)
                }
            })
            .collect();
        Ok(messages)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// E.164-style phone number: at least 8 digits, max 15.
fn is_valid_phone(phone: &str) -> bool {
    static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = PHONE_REGEX.get_or_init(|| Regex::new(r"^\+?[1-9]\d{7,14}$").unwrap());
    regex.is_match(phone)
}
