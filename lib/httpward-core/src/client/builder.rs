use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, debug_span};

use super::auth::AuthStrategy;
use super::call::RequestInvoker;
use super::oauth2::{ClientCredentials, DEFAULT_REFRESH_MARGIN, TokenRefresher};
use super::{Authentication, HttpHelper, HttpHelperError, SecureString};

/// Builder for [`HttpHelper`] instances.
///
/// # Default Configuration
///
/// - **Transport**: a fresh [`reqwest::Client`] with default settings
/// - **Timeout**: none
/// - **Authentication**: [`Authentication::None`]
/// - **Refresh margin**: 30 seconds before the reported token expiry
/// - **Cancellation**: none besides [`HttpHelper::close`] and drop
///
/// # Example
///
/// ```rust,no_run
/// use std::time::Duration;
///
/// use httpward_core::HttpHelper;
///
/// # async fn example() -> Result<(), httpward_core::HttpHelperError> {
/// let client = HttpHelper::builder()
///     .with_timeout(Duration::from_secs(10))
///     .with_client_credentials("my-service", "secret", "https://auth.example.com/token")
///     .build()
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct HttpHelperBuilder {
    client: Option<reqwest::Client>,
    timeout: Option<Duration>,
    authentication: Authentication,
    refresh_margin: Duration,
    cancellation: Option<CancellationToken>,
}

impl Default for HttpHelperBuilder {
    fn default() -> Self {
        Self {
            client: None,
            timeout: None,
            authentication: Authentication::None,
            refresh_margin: DEFAULT_REFRESH_MARGIN,
            cancellation: None,
        }
    }
}

impl HttpHelperBuilder {
    /// Builds the helper.
    ///
    /// With [`Authentication::ClientCredentials`], a first token is acquired before this
    /// returns and the background refresh is started.
    ///
    /// # Errors
    ///
    /// - [`HttpHelperError::InvalidArgument`] for blank credentials
    /// - [`HttpHelperError::ReqwestError`] if the transport cannot be created
    /// - any error of the first token acquisition
    pub async fn build(self) -> Result<HttpHelper, HttpHelperError> {
        let Self {
            client,
            timeout,
            authentication,
            refresh_margin,
            cancellation,
        } = self;

        let span = debug_span!("http_helper", auth = %authentication);

        let client = match client {
            Some(client) => client,
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(timeout) = timeout {
                    builder = builder.timeout(timeout);
                }
                builder.build()?
            }
        };
        let invoker = RequestInvoker::new(client);

        let auth = match authentication {
            Authentication::None => AuthStrategy::None,
            Authentication::Basic { username, password } => {
                AuthStrategy::basic(&username, password.as_str())?
            }
            Authentication::ClientCredentials {
                client_id,
                client_secret,
                auth_url,
            } => {
                let credentials =
                    ClientCredentials::new(&client_id, client_secret.as_str(), &auth_url)?;
                let cancellation = cancellation
                    .map_or_else(CancellationToken::new, |parent| parent.child_token());
                let refresher = TokenRefresher::start(
                    invoker.clone(),
                    credentials,
                    refresh_margin,
                    cancellation,
                )
                .instrument(span.clone())
                .await?;
                AuthStrategy::ClientCredentials(refresher)
            }
        };
        debug!(parent: &span, scheme = auth.scheme(), "HTTP helper ready");

        Ok(HttpHelper {
            invoker: Some(invoker),
            auth,
            span,
        })
    }

    /// Uses a preconfigured transport.
    ///
    /// [`with_timeout`](Self::with_timeout) is ignored when a client is provided.
    #[must_use]
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Sets a total timeout for every request, token requests included.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the authentication scheme.
    #[must_use]
    pub fn with_authentication(mut self, authentication: Authentication) -> Self {
        self.authentication = authentication;
        self
    }

    /// Shorthand for [`Authentication::Basic`].
    #[must_use]
    pub fn with_basic_auth(
        self,
        username: impl Into<String>,
        password: impl Into<SecureString>,
    ) -> Self {
        self.with_authentication(Authentication::Basic {
            username: username.into(),
            password: password.into(),
        })
    }

    /// Shorthand for [`Authentication::ClientCredentials`].
    #[must_use]
    pub fn with_client_credentials(
        self,
        client_id: impl Into<String>,
        client_secret: impl Into<SecureString>,
        auth_url: impl Into<String>,
    ) -> Self {
        self.with_authentication(Authentication::ClientCredentials {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            auth_url: auth_url.into(),
        })
    }

    /// How long before the reported expiry the token is refreshed.
    ///
    /// A token whose lifetime is shorter than the margin is refreshed right away.
    #[must_use]
    pub fn with_refresh_margin(mut self, refresh_margin: Duration) -> Self {
        self.refresh_margin = refresh_margin;
        self
    }

    /// Stops the background refresh when `token` is cancelled.
    ///
    /// The helper keeps serving requests with the last acquired token.
    #[must_use]
    pub fn with_cancellation_token(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let builder = HttpHelperBuilder::default();

        assert!(builder.client.is_none());
        assert!(builder.timeout.is_none());
        assert!(matches!(builder.authentication, Authentication::None));
        assert_eq!(builder.refresh_margin, Duration::from_secs(30));
        assert!(builder.cancellation.is_none());
    }

    #[test]
    fn test_builder_shorthands() {
        let builder = HttpHelperBuilder::default().with_basic_auth("user", "pass");
        let Authentication::Basic { username, password } = &builder.authentication else {
            panic!("expected basic authentication");
        };
        assert_eq!(username, "user");
        assert_eq!(password.as_str(), "pass");

        let builder = builder.with_client_credentials("id", "secret", "http://localhost/token");
        let Authentication::ClientCredentials {
            client_id,
            auth_url,
            ..
        } = &builder.authentication
        else {
            panic!("expected client credentials");
        };
        assert_eq!(client_id, "id");
        assert_eq!(auth_url, "http://localhost/token");
    }

    #[test]
    fn test_builder_debug_hides_secrets() {
        let builder = HttpHelperBuilder::default()
            .with_client_credentials("id", "hunter2", "http://localhost/token");

        let debug = format!("{builder:?}");
        assert!(debug.contains("ClientCredentials"));
        assert!(!debug.contains("hunter2"));
    }

    #[tokio::test]
    async fn test_build_rejects_blank_basic_credentials() {
        let result = HttpHelperBuilder::default()
            .with_basic_auth(" ", "pass")
            .build()
            .await;
        assert!(matches!(
            result,
            Err(HttpHelperError::InvalidArgument {
                argument: "username"
            })
        ));
    }

    #[tokio::test]
    async fn test_build_rejects_blank_client_credentials() {
        let result = HttpHelperBuilder::default()
            .with_client_credentials("id", "secret", "")
            .build()
            .await;
        assert!(matches!(
            result,
            Err(HttpHelperError::InvalidArgument {
                argument: "auth_url"
            })
        ));
    }
}
