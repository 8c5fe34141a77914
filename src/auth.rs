//! Client-credentials token exchange.

use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;
use zeroize::Zeroizing;

use crate::config::Credentials;
use crate::model::TokenResponse;

/// Short-lived bearer credential. Obtained once per run and never refreshed.
#[derive(Clone)]
pub struct AccessToken(Zeroizing<String>);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Zeroizing::new(token.into()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Client id and secret are both required")]
    MissingCredentials,
    #[error("Token endpoint {url} rejected the credentials with HTTP {status}")]
    Rejected { status: u16, url: String },
    #[error("Token response from {url} has no access_token")]
    MissingToken { url: String },
    #[error("Transport error calling token endpoint {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Exchanges the application credentials for a bearer token.
///
/// Sends one `POST` with HTTP Basic authentication (`id:secret`, base64) and
/// the form body `grant_type=client_credentials`.
#[instrument(skip(http, credentials), fields(token_url = %token_url))]
pub async fn request_token(
    http: &reqwest::Client,
    credentials: &Credentials,
    token_url: &Url,
) -> Result<AccessToken, AuthError> {
    if !credentials.is_complete() {
        return Err(AuthError::MissingCredentials);
    }

    let url = token_url.to_string();
    let resp = http
        .post(token_url.clone())
        .basic_auth(
            credentials.client_id.as_str(),
            Some(credentials.client_secret.as_str()),
        )
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await
        .map_err(|e| AuthError::Transport {
            url: url.clone(),
            source: e,
        })?;

    if !resp.status().is_success() {
        return Err(AuthError::Rejected {
            status: resp.status().as_u16(),
            url,
        });
    }

    // A body that is not JSON is treated like one without a token.
    let body: Option<TokenResponse> = resp.json().await.ok();
    let token = body
        .and_then(|b| {
            debug!(token_type = ?b.token_type, expires_in = ?b.expires_in, "Token issued");
            b.access_token
        })
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::MissingToken { url })?;

    Ok(AccessToken::new(token))
}
