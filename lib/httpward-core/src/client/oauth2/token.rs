//! Client-credentials grant inputs and token response.

use std::fmt;
use std::time::Duration;

use http::Method;
use reqwest::Response;
use serde::Deserialize;

use crate::client::auth::SecureString;
use crate::client::body::{FormContent, RequestBody};
use crate::client::call::RequestSpec;
use crate::client::error::{HttpHelperError, ensure_not_blank};

const GRANT_TYPE: &str = "grant_type";
const CLIENT_CREDENTIALS: &str = "client_credentials";
const CLIENT_ID: &str = "client_id";
const CLIENT_SECRET: &str = "client_secret";

/// Validated inputs of the client-credentials grant.
#[derive(Clone)]
pub struct ClientCredentials {
    client_id: String,
    client_secret: SecureString,
    auth_url: String,
}

impl ClientCredentials {
    /// Creates the grant inputs.
    ///
    /// # Errors
    ///
    /// Returns [`HttpHelperError::InvalidArgument`] naming the first blank argument,
    /// checked in order `client_id`, `client_secret`, `auth_url`.
    pub fn new(
        client_id: &str,
        client_secret: &str,
        auth_url: &str,
    ) -> Result<Self, HttpHelperError> {
        ensure_not_blank("client_id", client_id)?;
        ensure_not_blank("client_secret", client_secret)?;
        ensure_not_blank("auth_url", auth_url)?;

        Ok(Self {
            client_id: client_id.to_string(),
            client_secret: client_secret.into(),
            auth_url: auth_url.to_string(),
        })
    }

    /// The OAuth2 client id.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// The token endpoint URL.
    pub fn auth_url(&self) -> &str {
        &self.auth_url
    }

    /// `grant_type=client_credentials&client_id=<id>&client_secret=<secret>`
    pub fn to_form(&self) -> FormContent {
        FormContent::new()
            .add_field(GRANT_TYPE, CLIENT_CREDENTIALS)
            .add_field(CLIENT_ID, &self.client_id)
            .add_field(CLIENT_SECRET, self.client_secret.as_str())
    }

    /// The token request: a form POST to the token endpoint that fails on non-`2xx` status.
    pub(in crate::client) fn to_request(&self) -> Result<RequestSpec, HttpHelperError> {
        let request = RequestSpec::new(
            Method::POST,
            self.auth_url.clone(),
            RequestBody::Form(self.to_form()),
        )?
        .with_throw_on_bad_status(true);
        Ok(request)
    }
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("auth_url", &self.auth_url)
            .finish()
    }
}

/// Token document returned by the token endpoint.
///
/// ```json
/// { "access_token": "...", "token_type": "Bearer", "expires_in": 7199 }
/// ```
#[derive(Clone, Deserialize)]
pub struct ClientCredentialsToken {
    access_token: SecureString,
    token_type: String,
    expires_in: i64,
}

impl ClientCredentialsToken {
    /// Creates a token.
    pub fn new(
        access_token: impl Into<String>,
        token_type: impl Into<String>,
        expires_in: i64,
    ) -> Self {
        Self {
            access_token: SecureString::new(access_token.into()),
            token_type: token_type.into(),
            expires_in,
        }
    }

    /// Returns the access token value.
    pub fn access_token(&self) -> &str {
        self.access_token.as_str()
    }

    /// Returns the token type, as received.
    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    /// Returns the token lifetime in seconds, as reported by the endpoint.
    pub fn expires_in(&self) -> i64 {
        self.expires_in
    }

    /// Delay before the next refresh: the lifetime minus `margin`, floored at zero.
    pub fn refresh_delay(&self, margin: Duration) -> Duration {
        let lifetime = u64::try_from(self.expires_in).map_or(Duration::ZERO, Duration::from_secs);
        lifetime.saturating_sub(margin)
    }

    /// Decodes the token document from a response body.
    pub(in crate::client) async fn from_response(
        response: Response,
    ) -> Result<Self, HttpHelperError> {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|error| HttpHelperError::TokenResponse { error, body })
    }
}

impl fmt::Debug for ClientCredentialsToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentialsToken")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}
