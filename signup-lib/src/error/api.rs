//! API error types

/// Fallback message when a failed response carries no usable `message`.
pub const HTTP_ERROR_MESSAGE: &str = "HTTP error";

/// Errors that can occur while calling the create-user endpoint.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Non-success HTTP response.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Server-supplied message, or [`HTTP_ERROR_MESSAGE`].
        message: String,
    },

    /// No response was received.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Invalid endpoint URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A success response whose body was not JSON.
    #[error("Response parse error: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },
}

impl ApiError {
    /// Creates a new HTTP error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Creates an HTTP error from a raw response body.
    ///
    /// Uses the body's JSON `message` field when there is one, otherwise
    /// [`HTTP_ERROR_MESSAGE`].
    pub fn from_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|json| {
                json.get("message")
                    .and_then(|m| m.as_str())
                    .filter(|m| !m.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| HTTP_ERROR_MESSAGE.to_string());
        Self::http(status, message)
    }

    /// Creates a new parse error with the raw response body.
    pub fn parse_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if no response reached the client.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}
