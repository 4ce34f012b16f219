//! Validator builder for fluent validation API.

use std::sync::LazyLock;

use regex::Regex;

use super::result::{FieldError, ValidationResult};
use crate::model::Field;

/// `local@domain.tld`: no whitespace anywhere, exactly one `@`, a dot after it.
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email pattern"));

/// Returns `true` if `value` has the shape of an email address.
pub fn is_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

type Rule = Box<dyn Fn(&str) -> bool>;

struct FieldEntry {
    field: Field,
    value: String,
    rules: Vec<(Rule, String)>,
}

impl FieldEntry {
    /// First failing rule's message.
    fn check(&self) -> Option<String> {
        self.rules
            .iter()
            .find(|(rule, _)| !rule(&self.value))
            .map(|(_, msg)| msg.clone())
    }
}

/// Builder for validating multiple form fields.
///
/// Each field reports only its first failing rule, but every field is
/// checked.
#[derive(Default)]
pub struct Validator {
    fields: Vec<FieldEntry>,
}

impl Validator {
    /// Create a new validator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field to validate.
    pub fn field(self, field: Field, value: impl Into<String>) -> FieldBuilder {
        FieldBuilder {
            validator: self,
            entry: FieldEntry {
                field,
                value: value.into(),
                rules: Vec::new(),
            },
        }
    }

    /// Run all validations.
    pub fn validate(self) -> ValidationResult {
        let errors: Vec<FieldError> = self
            .fields
            .iter()
            .filter_map(|entry| {
                entry.check().map(|message| FieldError {
                    field: entry.field,
                    message,
                })
            })
            .collect();

        if errors.is_empty() {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid(errors)
        }
    }
}

/// Builder for adding validation rules to a single field.
pub struct FieldBuilder {
    validator: Validator,
    entry: FieldEntry,
}

impl FieldBuilder {
    /// Add a custom validation rule. `f` returns `true` when the value is valid.
    pub fn rule<F>(mut self, f: F, msg: impl Into<String>) -> Self
    where
        F: Fn(&str) -> bool + 'static,
    {
        self.entry.rules.push((Box::new(f), msg.into()));
        self
    }

    /// Require the field to be non-empty after trimming.
    pub fn required(self, msg: impl Into<String>) -> Self {
        self.rule(|v| !v.trim().is_empty(), msg)
    }

    /// Require a `local@domain.tld` shaped value.
    ///
    /// The raw value is matched, so surrounding whitespace fails.
    pub fn email(self, msg: impl Into<String>) -> Self {
        // Empty is valid; use required() for non-empty
        self.rule(|v| v.is_empty() || is_email(v), msg)
    }

    /// Continue to the next field.
    pub fn field(self, field: Field, value: impl Into<String>) -> FieldBuilder {
        self.finalize().field(field, value)
    }

    /// Finalize and run all validations.
    pub fn validate(self) -> ValidationResult {
        self.finalize().validate()
    }

    fn finalize(self) -> Validator {
        let mut validator = self.validator;
        validator.fields.push(self.entry);
        validator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_failing_rule_wins() {
        let result = Validator::new()
            .field(Field::Email, "")
            .required("required")
            .rule(|_| false, "never reached")
            .validate();
        assert_eq!(result.errors().len(), 1);
        assert_eq!(result.errors()[0].message, "required");
    }

    #[test]
    fn test_email_rule_allows_empty() {
        let result = Validator::new().field(Field::Email, "").email("bad").validate();
        assert!(result.is_valid());
    }

    #[test]
    fn test_fields_are_not_short_circuited() {
        let result = Validator::new()
            .field(Field::FirstName, "")
            .required("a")
            .field(Field::LastName, "")
            .required("b")
            .validate();
        let errors = result.into_errors();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.iter().next().map(|(f, _)| f), Some(Field::FirstName));
    }

    #[test]
    fn test_is_email() {
        assert!(is_email("jane@example.com"));
        assert!(!is_email(" jane@example.com"));
        assert!(!is_email("jane@example"));
    }

    #[test]
    fn test_email_rule_rejects_padding() {
        let result = Validator::new()
            .field(Field::Email, " jane@example.com ")
            .email("bad")
            .validate();
        assert_eq!(result.errors().len(), 1);
    }
}
