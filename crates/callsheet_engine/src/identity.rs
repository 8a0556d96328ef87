use std::time::Duration;

use callsheet_core::Identity;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("invalid identity configuration: {0}")]
    InvalidConfig(String),
    #[error("identity request failed: {0}")]
    Network(String),
    #[error("identity service returned http status {0}")]
    HttpStatus(u16),
    #[error("account profile could not be decoded: {0}")]
    Decode(String),
}

/// Supplies the current authenticated actor. `Ok(None)` means nobody is
/// signed in; callers treat that as a hard precondition failure, not as a
/// retryable condition.
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn current_user(&self) -> Result<Option<Identity>, IdentityError>;
}

#[derive(Debug, Deserialize)]
struct AccountProfile {
    id: String,
    #[serde(default)]
    handle: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

/// Reads the account profile from the backend (`{base}/account/me`) and
/// derives the username from the handle or the email local part.
#[derive(Debug, Clone)]
pub struct HttpIdentityProvider {
    endpoint: Url,
    token: Option<String>,
    client: reqwest::Client,
}

impl HttpIdentityProvider {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, IdentityError> {
        let base =
            Url::parse(base_url).map_err(|err| IdentityError::InvalidConfig(err.to_string()))?;
        let endpoint = base
            .join("account/me")
            .map_err(|err| IdentityError::InvalidConfig(err.to_string()))?;
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|err| IdentityError::Network(err.to_string()))?;
        Ok(Self {
            endpoint,
            token,
            client,
        })
    }
}

#[async_trait::async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn current_user(&self) -> Result<Option<Identity>, IdentityError> {
        let mut request = self.client.get(self.endpoint.clone());
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request
            .send()
            .await
            .map_err(|err| IdentityError::Network(err.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(IdentityError::HttpStatus(status.as_u16()));
        }

        let profile: AccountProfile = response
            .json()
            .await
            .map_err(|err| IdentityError::Decode(err.to_string()))?;
        let username =
            Identity::derive_username(profile.handle.as_deref(), profile.email.as_deref())
                .ok_or_else(|| {
                    IdentityError::Decode("account profile has no usable username".to_string())
                })?;
        Ok(Some(Identity::new(profile.id, username)))
    }
}
