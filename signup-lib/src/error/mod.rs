//! Error types

mod api;
mod config;

pub use api::*;
pub use config::*;

/// Top-level error for the signup library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The create-user call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
