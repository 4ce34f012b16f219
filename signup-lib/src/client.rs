//! Create-user HTTP client

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::config::Config;
use crate::error::ApiError;
use crate::error::Error;
use crate::form::UserGateway;
use crate::model::{NewUser, UserRecord};

/// Client for the create-user endpoint.
///
/// Cheap to clone (uses `Arc` internally). Sends exactly one request per
/// call: no retries and no request timeout.
///
/// # Example
///
/// ```ignore
/// let client = SignupClient::builder()
///     .url("http://localhost:3001/api/users")
///     .build()?;
///
/// let record = client.create_user(&fields.to_new_user()).await?;
/// ```
#[derive(Clone)]
pub struct SignupClient {
    inner: Arc<SignupClientInner>,
}

struct SignupClientInner {
    url: Url,
    http_client: Client,
}

impl SignupClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> SignupClientBuilder<Missing> {
        SignupClientBuilder::new()
    }

    /// Creates a client for the endpoint in `config`.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        Self::builder().url(config.api_url.as_str()).build()
    }

    /// POSTs `user` as JSON and returns the response body unmodified.
    ///
    /// Non-2xx responses become [`ApiError::Http`] carrying the body's
    /// `message` field when there is one.
    pub async fn create_user(&self, user: &NewUser) -> Result<UserRecord, Error> {
        log::debug!("POST {}", self.inner.url);

        let response = self
            .inner
            .http_client
            .post(self.inner.url.clone())
            .json(user)
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        let body = response.text().await.map_err(ApiError::from)?;

        if !status.is_success() {
            return Err(ApiError::from_body(status.as_u16(), &body).into());
        }

        let json: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| ApiError::parse_with_body(e.to_string(), body.as_str()))?;
        Ok(UserRecord::new(json))
    }

    /// Returns the endpoint URL.
    pub fn url(&self) -> &Url {
        &self.inner.url
    }
}

#[async_trait]
impl UserGateway for SignupClient {
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, Error> {
        SignupClient::create_user(self, &user).await
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`SignupClient`].
///
/// `url` is required before `build` becomes available.
pub struct SignupClientBuilder<U> {
    url: U,
}

impl SignupClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self { url: Missing }
    }

    /// Sets the endpoint URL.
    pub fn url(self, url: impl Into<String>) -> SignupClientBuilder<Set<String>> {
        SignupClientBuilder {
            url: Set(url.into()),
        }
    }
}

impl Default for SignupClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl SignupClientBuilder<Set<String>> {
    /// Builds the [`SignupClient`].
    pub fn build(self) -> Result<SignupClient, Error> {
        let url = Url::parse(&self.url.0)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", self.url.0, e)))?;

        let http_client = Client::builder().build().map_err(ApiError::from)?;

        Ok(SignupClient {
            inner: Arc::new(SignupClientInner { url, http_client }),
        })
    }
}
