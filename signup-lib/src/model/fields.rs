//! Form fields and the create-user request body.

use std::fmt;

use serde::Serialize;

/// One of the form's text inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Email,
}

impl Field {
    /// All fields, in display order.
    pub const ALL: [Field; 3] = [Field::FirstName, Field::LastName, Field::Email];

    /// Wire name, as sent in the JSON body.
    pub fn name(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Email => "Email Address",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Current values of the three inputs, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl FormFields {
    /// Creates fields from the given values.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }

    /// Returns the value of a field.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
        }
    }

    /// Returns a mutable reference to a field's value.
    pub fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::Email => &mut self.email,
        }
    }

    /// Replaces a field's value.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.get_mut(field) = value.into();
    }

    /// Resets every field to the empty string.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Builds the request body from the trimmed values.
    pub fn to_new_user(&self) -> NewUser {
        NewUser {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
        }
    }
}

/// JSON body of the create-user request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}
