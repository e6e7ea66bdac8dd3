use reqwest::Response;
use tracing::{Instrument, Span, debug, debug_span};

mod api;
pub use self::api::HttpHelperApi;

mod builder;
pub use self::builder::HttpHelperBuilder;

mod call;
use self::call::RequestInvoker;
pub use self::call::{HttpCall, RequestSpec};

mod auth;
use self::auth::AuthStrategy;
pub use self::auth::{Authentication, AuthorizationHeader, BasicCredentials, SecureString};

mod body;
pub use self::body::{FormContent, RequestBody};

mod content_type;
pub use self::content_type::ContentType;

mod headers;
pub use self::headers::RequestHeaders;

mod mock;
pub use self::mock::HttpHelperMock;

pub mod oauth2;
pub use self::oauth2::{ClientCredentials, ClientCredentialsToken};

mod error;
pub use self::error::HttpHelperError;


/// HTTP client that attaches one authentication scheme to every request.
///
/// The scheme is fixed at construction:
/// - **None**: no `Authorization` header
/// - **Basic**: a static `Basic <base64(username:password)>` header
/// - **Client credentials**: a `Bearer` token acquired before the constructor returns,
///   then refreshed in the background ahead of its expiry
///
/// Requests are issued through the verb methods of [`HttpHelperApi`].
///
/// # Example
///
/// ```rust,no_run
/// use httpward_core::{ContentType, HttpHelper, HttpHelperApi};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), httpward_core::HttpHelperError> {
/// let mut client = HttpHelper::client_credentials(
///     "my-service",
///     "secret",
///     "https://auth.example.com/token",
/// )
/// .await?;
///
/// let response = client
///     .post("https://api.example.com/orders", r#"{"item":"book"}"#)
///     .with_content_type(ContentType::ApplicationJson)
///     .throw_on_bad_status()
///     .await?;
///
/// client.close().await;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct HttpHelper {
    invoker: Option<RequestInvoker>,
    auth: AuthStrategy,
    span: Span,
}

impl HttpHelper {
    /// Creates a helper without authentication, on a default transport.
    ///
    /// # Panics
    ///
    /// Panics if the TLS backend cannot be initialized or the system configuration cannot
    /// be loaded, like [`reqwest::Client::new`]. Use [`builder`](Self::builder) to get
    /// that failure as an error instead.
    pub fn new() -> Self {
        let span = debug_span!("http_helper", auth = %Authentication::None);
        Self {
            invoker: Some(RequestInvoker::new(reqwest::Client::new())),
            auth: AuthStrategy::None,
            span,
        }
    }

    /// Creates a helper sending `Authorization: Basic <base64(username:password)>`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpHelperError::InvalidArgument`] if `username` or `password` is blank,
    /// or [`HttpHelperError::InvalidHeaderValue`] if they cannot form a header, or
    /// [`HttpHelperError::ReqwestError`] if the transport cannot be created.
    pub fn basic(username: &str, password: &str) -> Result<Self, HttpHelperError> {
        let auth = AuthStrategy::basic(username, password)?;
        let client = reqwest::Client::builder().build()?;
        let label = format!("Basic (username: {username})");
        let span = debug_span!("http_helper", auth = %label);
        debug!(parent: &span, scheme = auth.scheme(), "HTTP helper ready");

        Ok(Self {
            invoker: Some(RequestInvoker::new(client)),
            auth,
            span,
        })
    }

    /// Creates a helper using the OAuth2 client-credentials grant.
    ///
    /// A first token is acquired before this returns. It is then refreshed in the
    /// background 30 seconds before its reported expiry, until [`close`](Self::close)
    /// is called or the helper is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`HttpHelperError::InvalidArgument`] for a blank argument, then any
    /// error of the first token acquisition.
    pub async fn client_credentials(
        client_id: &str,
        client_secret: &str,
        auth_url: &str,
    ) -> Result<Self, HttpHelperError> {
        Self::builder()
            .with_client_credentials(client_id, client_secret, auth_url)
            .build()
            .await
    }

    /// Creates a builder for custom transport, timeout, refresh margin or cancellation.
    pub fn builder() -> HttpHelperBuilder {
        HttpHelperBuilder::default()
    }

    /// Stops the token refresh and releases the transport.
    ///
    /// Waits for an in-flight refresh to be abandoned. Calling it again is a no-op.
    /// Every later call fails with [`HttpHelperError::Closed`].
    pub async fn close(&mut self) {
        if self.invoker.is_none() {
            return;
        }

        self.auth.shutdown().instrument(self.span.clone()).await;
        self.invoker = None;
        debug!(parent: &self.span, "HTTP helper closed");
        self.span = Span::none();
    }

    /// Returns `true` once [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.invoker.is_none()
    }
}

impl Default for HttpHelper {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpHelperApi for HttpHelper {
    async fn execute(&self, request: RequestSpec) -> Result<Response, HttpHelperError> {
        let Some(invoker) = &self.invoker else {
            return Err(HttpHelperError::Closed);
        };

        // snapshot taken per request, a concurrent refresh does not affect it
        let authorization = self.auth.current_header();
        invoker
            .invoke(request, authorization)
            .instrument(self.span.clone())
            .await
    }
}
