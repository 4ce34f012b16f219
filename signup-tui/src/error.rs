use std::io;

use signup_lib::error::Error as SignupError;

/// Errors that stop the terminal app.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Terminal setup, drawing or input failed.
    #[error("Terminal error: {0}")]
    Terminal(#[from] io::Error),

    /// Configuration or client construction failed.
    #[error(transparent)]
    Signup(#[from] SignupError),
}

impl From<signup_lib::error::ConfigError> for AppError {
    fn from(err: signup_lib::error::ConfigError) -> Self {
        Self::Signup(err.into())
    }
}
