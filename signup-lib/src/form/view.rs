use crate::model::FormFields;
use crate::validation::ValidationErrors;

use super::SubmissionStatus;

/// Read-only snapshot of everything the presentation layer draws.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormView {
    pub fields: FormFields,
    pub errors: ValidationErrors,
    pub status: SubmissionStatus,
    pub error_banner: Option<String>,
    pub success_banner: Option<String>,
}

impl FormView {
    /// Inputs and the submit control are disabled unless idle.
    pub fn is_disabled(&self) -> bool {
        !self.status.accepts_input()
    }
}
