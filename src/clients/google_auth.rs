//! Google service-account authentication
//!
//! Mints a short-lived bearer token from service-account credentials: an
//! RS256-signed JWT exchanged at the token endpoint. Drive and Sheets
//! clients share this; tokens are requested per call, matching the
//! single-shot collaborator model.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("service-account credentials are not configured")]
    MissingCredentials,
    #[error("failed to sign service-account JWT: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
    #[error("token exchange failed: {0}")]
    Exchange(#[from] reqwest::Error),
    #[error("token endpoint returned no access_token")]
    NoToken,
}

#[derive(Debug, Serialize)]
struct Claims {
    iss: String,
    scope: String,
    aud: String,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

/// Service-account token source
#[derive(Clone)]
pub struct GoogleAuth {
    client_email: String,
    private_key_pem: String,
    token_uri: String,
    http: reqwest::Client,
}

impl GoogleAuth {
    pub fn new(config: &Config) -> Self {
        Self {
            client_email: config.google_client_email.clone(),
            private_key_pem: config.google_private_key_pem.clone(),
            token_uri: config.google_token_uri.clone(),
            http: reqwest::Client::new(),
        }
    }

    /// Exchange a freshly signed JWT for a bearer token with the given scope
    pub async fn access_token(&self, scope: &str) -> Result<String, AuthError> {
        if self.client_email.is_empty() || self.private_key_pem.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            iss: self.client_email.clone(),
            scope: scope.to_string(),
            aud: self.token_uri.clone(),
            iat: now,
            exp: now + 3600,
        };

        let header = jsonwebtoken::Header::new(jsonwebtoken::Algorithm::RS256);
        let key = jsonwebtoken::EncodingKey::from_rsa_pem(self.private_key_pem.as_bytes())?;
        let assertion = jsonwebtoken::encode(&header, &claims, &key)?;

        debug!("exchanging service-account JWT for scope {}", scope);

        let response: TokenResponse = self
            .http
            .post(&self.token_uri)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await?
            .json()
            .await?;

        response.access_token.ok_or(AuthError::NoToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_credentials_fail_before_any_request() {
        let auth = GoogleAuth::new(&Config::default());
        let err = auth
            .access_token("https://www.googleapis.com/auth/drive")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::MissingCredentials));
    }
}
