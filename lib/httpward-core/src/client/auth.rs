use std::fmt;

use base64::Engine;
use http::HeaderValue;
use serde::Deserialize;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::error::{HttpHelperError, ensure_not_blank};
use super::oauth2::TokenRefresher;

const BASIC_SCHEME: &str = "Basic";
const BEARER_SCHEME: &str = "Bearer";

/// Secure wrapper for sensitive string data that automatically zeroes memory on drop.
///
/// This wrapper ensures that sensitive authentication data is securely cleared from memory
/// when it's no longer needed, and never shows up in full in logs.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecureString(String);

impl SecureString {
    /// Creates a new secure string from the provided value.
    pub fn new(value: String) -> Self {
        Self(value)
    }

    /// Returns a reference to the inner string value.
    ///
    /// # Security Note
    /// The returned reference should not be stored for extended periods
    /// to minimize exposure time of sensitive data.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Masks sensitive data for display/logging purposes.
    fn mask_sensitive(value: &str) -> String {
        match (value.get(..4), value.get(value.len().saturating_sub(4)..)) {
            (Some(head), Some(tail)) if value.len() > 8 => format!("{head}...{tail}"),
            _ => "***".to_string(),
        }
    }
}

impl fmt::Debug for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecureString")
            .field("value", &"[REDACTED]")
            .finish()
    }
}

impl fmt::Display for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Self::mask_sensitive(&self.0))
    }
}

impl From<String> for SecureString {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for SecureString {
    fn from(value: &str) -> Self {
        Self::new(value.to_string())
    }
}

impl<'de> Deserialize<'de> for SecureString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::new)
    }
}

/// Basic credentials, encoded once as `base64(username:password)`.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    base64_credentials: SecureString,
}

impl BasicCredentials {
    /// Encodes the credentials.
    ///
    /// # Errors
    ///
    /// Returns [`HttpHelperError::InvalidArgument`] if `username` or `password` is blank.
    pub fn new(username: &str, password: &str) -> Result<Self, HttpHelperError> {
        ensure_not_blank("username", username)?;
        ensure_not_blank("password", password)?;

        let credentials = format!("{username}:{password}");
        let base64_credentials = base64::engine::general_purpose::STANDARD.encode(credentials);

        Ok(Self {
            base64_credentials: base64_credentials.into(),
        })
    }

    /// Returns the encoded credential string.
    pub fn base64_credentials(&self) -> &str {
        self.base64_credentials.as_str()
    }
}

impl fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("base64_credentials", &"[REDACTED]")
            .finish()
    }
}

/// The `Authorization` header attached to outgoing requests, as a scheme and parameter pair.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthorizationHeader {
    scheme: &'static str,
    parameter: SecureString,
}

impl AuthorizationHeader {
    /// `Authorization: Basic <base64(username:password)>`
    pub fn basic(credentials: &BasicCredentials) -> Self {
        Self {
            scheme: BASIC_SCHEME,
            parameter: credentials.base64_credentials.clone(),
        }
    }

    /// `Authorization: Bearer <access_token>`
    pub fn bearer(access_token: &str) -> Self {
        Self {
            scheme: BEARER_SCHEME,
            parameter: access_token.into(),
        }
    }

    /// The authentication scheme (`Basic` or `Bearer`).
    pub fn scheme(&self) -> &str {
        self.scheme
    }

    /// The scheme parameter (encoded credentials or access token).
    pub fn parameter(&self) -> &str {
        self.parameter.as_str()
    }

    /// Converts into a header value flagged as sensitive.
    ///
    /// # Errors
    ///
    /// Returns [`HttpHelperError::InvalidHeaderValue`] if the parameter contains
    /// characters that are not allowed in HTTP headers.
    pub fn to_header_value(&self) -> Result<HeaderValue, HttpHelperError> {
        let mut value = HeaderValue::from_str(&format!("{} {}", self.scheme, self.parameter()))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for AuthorizationHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthorizationHeader")
            .field("scheme", &self.scheme)
            .field("parameter", &"[REDACTED]")
            .finish()
    }
}

impl fmt::Display for AuthorizationHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.scheme, self.parameter)
    }
}

/// Authentication configuration for an [`HttpHelper`](crate::HttpHelper).
///
/// The variant is chosen once, when the helper is built, and never changes afterwards.
///
/// # Examples
///
/// ```rust
/// use httpward_core::Authentication;
///
/// let auth = Authentication::Basic {
///     username: "user".to_string(),
///     password: "pass".into(),
/// };
///
/// let auth = Authentication::ClientCredentials {
///     client_id: "my-service".to_string(),
///     client_secret: "secret".into(),
///     auth_url: "https://auth.example.com/token".to_string(),
/// };
/// ```
#[derive(Clone, Default)]
pub enum Authentication {
    /// No `Authorization` header.
    #[default]
    None,

    /// HTTP Basic authentication (RFC 7617).
    Basic {
        /// The username for Basic authentication.
        username: String,
        /// The password for Basic authentication.
        password: SecureString,
    },

    /// OAuth2 client-credentials grant, refreshed in the background.
    ClientCredentials {
        /// OAuth2 client id.
        client_id: String,
        /// OAuth2 client secret.
        client_secret: SecureString,
        /// Token endpoint URL.
        auth_url: String,
    },
}

impl fmt::Debug for Authentication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"[REDACTED]")
                .finish(),
            Self::ClientCredentials {
                client_id,
                auth_url,
                ..
            } => f
                .debug_struct("ClientCredentials")
                .field("client_id", client_id)
                .field("client_secret", &"[REDACTED]")
                .field("auth_url", auth_url)
                .finish(),
        }
    }
}

impl fmt::Display for Authentication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Basic { username, .. } => write!(f, "Basic (username: {username})"),
            Self::ClientCredentials { client_id, .. } => {
                write!(f, "ClientCredentials (client_id: {client_id})")
            }
        }
    }
}

/// The materialized authentication of a running helper.
#[derive(Debug)]
pub(in crate::client) enum AuthStrategy {
    None,
    Basic(HeaderValue),
    ClientCredentials(TokenRefresher),
}

impl AuthStrategy {
    pub(in crate::client) fn basic(
        username: &str,
        password: &str,
    ) -> Result<Self, HttpHelperError> {
        let credentials = BasicCredentials::new(username, password)?;
        let value = AuthorizationHeader::basic(&credentials).to_header_value()?;
        Ok(Self::Basic(value))
    }

    /// Snapshot of the header to attach right now.
    pub(in crate::client) fn current_header(&self) -> Option<HeaderValue> {
        match self {
            Self::None => None,
            Self::Basic(value) => Some(value.clone()),
            Self::ClientCredentials(refresher) => Some(refresher.current_header()),
        }
    }

    pub(in crate::client) fn scheme(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Basic(_) => BASIC_SCHEME,
            Self::ClientCredentials(_) => BEARER_SCHEME,
        }
    }

    pub(in crate::client) async fn shutdown(&mut self) {
        if let Self::ClientCredentials(refresher) = self {
            refresher.shutdown().await;
        }
    }
}
