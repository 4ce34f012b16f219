//! Field validation.
//!
//! A small fluent API for checking form values, plus the rule set for the
//! registration form.
//!
//! # Example
//!
//! ```
//! use signup_lib::Field;
//! use signup_lib::validation::Validator;
//!
//! let result = Validator::new()
//!     .field(Field::FirstName, "")
//!         .required("First Name is required")
//!     .field(Field::Email, "jane@example")
//!         .required("Email Address is required")
//!         .email("Please enter a valid email address")
//!     .validate();
//!
//! assert_eq!(result.errors().len(), 2);
//! ```

mod result;
mod validator;

pub use result::{FieldError, ValidationErrors, ValidationResult};
pub use validator::{FieldBuilder, Validator, is_email};

use crate::model::{Field, FormFields};

pub const FIRST_NAME_REQUIRED: &str = "First Name is required";
pub const LAST_NAME_REQUIRED: &str = "Last Name is required";
pub const EMAIL_REQUIRED: &str = "Email Address is required";
pub const EMAIL_INVALID: &str = "Please enter a valid email address";

/// Validates the registration form.
///
/// Every field is checked; each reports at most one message.
pub fn validate_fields(fields: &FormFields) -> ValidationErrors {
    Validator::new()
        .field(Field::FirstName, &fields.first_name)
        .required(FIRST_NAME_REQUIRED)
        .field(Field::LastName, &fields.last_name)
        .required(LAST_NAME_REQUIRED)
        .field(Field::Email, &fields.email)
        .required(EMAIL_REQUIRED)
        .email(EMAIL_INVALID)
        .validate()
        .into_errors()
}
