/// Where the form is in its submission lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    /// Editable; Submit is accepted.
    #[default]
    Idle,
    /// A create-user request is outstanding.
    Pending,
    /// The user was created. Terminal.
    Succeeded,
}

impl SubmissionStatus {
    /// Fields and the submit control are enabled only while idle.
    pub fn accepts_input(self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }
}
