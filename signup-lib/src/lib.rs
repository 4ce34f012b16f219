//! User registration form core.
//!
//! Field validation, the create-user HTTP client and the form state machine
//! that ties them together. Rendering lives in `signup-tui`.

pub mod config;
pub mod error;
pub mod form;
pub mod model;
pub mod validation;

mod client;

pub use client::*;
pub use config::Config;
pub use form::{FormController, FormEvent, FormView, SubmissionStatus};
pub use model::{Field, FormFields, NewUser, UserRecord};
