use std::collections::BTreeMap;

use crate::model::Field;

/// Information about a single field validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// The field that failed.
    pub field: Field,
    /// Error message.
    pub message: String,
}

/// Result of validating one or more fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ValidationResult {
    /// All fields passed validation.
    #[default]
    Valid,
    /// One or more fields failed validation.
    Invalid(Vec<FieldError>),
}

impl ValidationResult {
    /// Check if all fields passed validation.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Get all validation errors.
    pub fn errors(&self) -> &[FieldError] {
        match self {
            Self::Valid => &[],
            Self::Invalid(errors) => errors,
        }
    }

    /// Collects the errors into a per-field map.
    pub fn into_errors(self) -> ValidationErrors {
        match self {
            Self::Valid => ValidationErrors::default(),
            Self::Invalid(errors) => errors.into_iter().collect(),
        }
    }
}

/// Field → message map. A missing key means the field is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, String>,
}

impl ValidationErrors {
    /// The message for a field, if it is invalid.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Removes a field's message. Returns `true` if there was one.
    pub fn clear(&mut self, field: Field) -> bool {
        self.errors.remove(&field).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterates errors in field display order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

impl FromIterator<FieldError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        let mut errors = BTreeMap::new();
        for e in iter {
            errors.entry(e.field).or_insert(e.message);
        }
        Self { errors }
    }
}
