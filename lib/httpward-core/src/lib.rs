//! # Httpward Core
//!
//! Authenticated HTTP requests with background OAuth2 token refresh.
//!
//! An [`HttpHelper`] issues `GET`, `POST`, `PUT`, `PATCH` and `DELETE` requests and attaches
//! one authentication scheme, chosen at construction, to every one of them:
//!
//! - **None**: no `Authorization` header
//! - **Basic**: `Authorization: Basic <base64(username:password)>`
//! - **Client credentials**: `Authorization: Bearer <access_token>`, where the token is
//!   acquired before the helper is returned and then refreshed in the background
//!   before it expires
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use httpward_core::{ContentType, HttpHelper, HttpHelperApi};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), httpward_core::HttpHelperError> {
//! let mut client = HttpHelper::client_credentials(
//!     "my-service",
//!     "secret",
//!     "https://auth.example.com/oauth/token",
//! )
//! .await?;
//!
//! let response = client
//!     .post("https://api.example.com/orders", r#"{"item":"book"}"#)
//!     .with_content_type(ContentType::ApplicationJson)
//!     .with_header("X-Request-ID", "abc-123")
//!     .throw_on_bad_status()
//!     .await?;
//! println!("created: {}", response.status());
//!
//! // stops the background refresh
//! client.close().await;
//! # Ok(())
//! # }
//! ```
//!
//! ## Validation
//!
//! Blank arguments are rejected with [`HttpHelperError::InvalidArgument`] before any I/O,
//! naming the offending parameter: `url` for every verb, `body` for text bodies of
//! `POST`/`PUT`/`PATCH`, `content` for empty forms, and `client_id`, `client_secret`,
//! `auth_url` or `username`, `password` for credentials.
//!
//! ## Status handling
//!
//! Responses are returned as-is by default, whatever their status.
//! With [`throw_on_bad_status`](HttpCall::throw_on_bad_status), any status outside `2xx`
//! becomes [`HttpHelperError::BadStatus`].
//!
//! ## Testing
//!
//! Code written against the [`HttpHelperApi`] trait can use [`HttpHelperMock`] in tests:
//! it validates arguments like the real helper, performs no I/O, and answers with an
//! empty `200 OK` or `400 Bad Request`.
//!
//! ## Logging
//!
//! The crate logs through [`tracing`]. Every helper owns a `http_helper` span; request
//! lifecycles are emitted at `TRACE`, token acquisitions at `DEBUG`, and failed background
//! refreshes at `WARN`. Credentials are never logged.

mod client;

pub use self::client::oauth2;
pub use self::client::{
    Authentication, AuthorizationHeader, BasicCredentials, ClientCredentials,
    ClientCredentialsToken, ContentType, FormContent, HttpCall, HttpHelper, HttpHelperApi,
    HttpHelperBuilder, HttpHelperError, HttpHelperMock, RequestBody, RequestHeaders, RequestSpec,
    SecureString,
};
