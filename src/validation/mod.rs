//! Input validation in front of every mutation.
//!
//! Each content input is a typed struct implementing [`Validate`]. Rules are
//! evaluated in full and every failing field is reported, so a single
//! rejected submission tells the editor everything that needs fixing.

pub mod rules;

pub use rules::{is_site_path, is_valid_email, is_valid_url, Checker};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::LazyLock;
use tracing::warn;

/// One failing field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Every field that failed validation, in rule order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A set holding a single error.
    #[must_use]
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Whether any error names `field`.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{joined}")
    }
}

impl std::error::Error for ValidationErrors {}

/// Typed input that can check its own constraints.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

#[expect(
    clippy::expect_used,
    reason = "Regex literal is compile-time constant and cannot fail"
)]
static SERDE_FIELD_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"(?:missing|unknown) field `([^`]+)`")
        .expect("SERDE_FIELD_REGEX is a valid regex literal")
});

/// Turn a deserialization failure into a field error.
///
/// serde only names the field for missing or unknown keys; type mismatches
/// are reported against `input`.
#[must_use]
pub fn from_serde_error(err: &serde_json::Error) -> ValidationErrors {
    let message = err.to_string();
    let field = SERDE_FIELD_REGEX
        .captures(&message)
        .and_then(|c| c.get(1))
        .map_or("input", |m| m.as_str())
        .to_string();
    ValidationErrors::single(field, message)
}

/// Deserialize raw input into its typed form without running the rules.
pub fn deserialize_input<T>(raw: Value) -> Result<T, ValidationErrors>
where
    T: DeserializeOwned,
{
    serde_json::from_value(raw).map_err(|e| {
        let errors = from_serde_error(&e);
        warn!(errors = %errors, "Rejected malformed input");
        errors
    })
}

/// Deserialize raw input and validate it. Nothing downstream runs on failure.
pub fn parse_input<T>(raw: Value) -> Result<T, ValidationErrors>
where
    T: DeserializeOwned + Validate,
{
    let input: T = deserialize_input(raw)?;
    if let Err(errors) = input.validate() {
        warn!(errors = %errors, "Rejected invalid input");
        return Err(errors);
    }
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct Sample {
        label: String,
        count: u32,
    }

    impl Validate for Sample {
        fn validate(&self) -> Result<(), ValidationErrors> {
            let mut check = Checker::new();
            check.length("label", &self.label, 2, 10);
            if self.count == 0 {
                check.fail("count", "must be positive");
            }
            check.finish()
        }
    }

    #[test]
    fn test_display_joins_fields() {
        let mut errors = ValidationErrors::new();
        errors.add("label", "too short");
        errors.add("value", "must be positive");
        assert_eq!(errors.to_string(), "label: too short; value: must be positive");
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_parse_input_aggregates_rule_failures() {
        let errors = parse_input::<Sample>(json!({"label": "x", "count": 0})).unwrap_err();
        assert!(errors.has_field("label"));
        assert!(errors.has_field("count"));
    }

    #[test]
    fn test_parse_input_names_missing_field() {
        let errors = parse_input::<Sample>(json!({"count": 3})).unwrap_err();
        assert!(errors.has_field("label"), "{errors}");
    }

    #[test]
    fn test_parse_input_names_unknown_field() {
        let errors =
            parse_input::<Sample>(json!({"label": "ok", "count": 1, "extra": true})).unwrap_err();
        assert!(errors.has_field("extra"), "{errors}");
    }

    #[test]
    fn test_parse_input_type_mismatch_reports_input() {
        let errors = parse_input::<Sample>(json!({"label": "ok", "count": -1})).unwrap_err();
        assert!(errors.has_field("input"));
    }

    #[test]
    fn test_parse_input_accepts_valid() {
        let sample = parse_input::<Sample>(json!({"label": "okay", "count": 2})).unwrap();
        assert_eq!(sample.label, "okay");
        assert_eq!(sample.count, 2);
    }
}
