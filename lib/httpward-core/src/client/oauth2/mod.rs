//! OAuth2 client-credentials support.
//!
//! A helper built with [`Authentication::ClientCredentials`](crate::Authentication) acquires
//! an access token before it becomes usable, then keeps it fresh with a background task
//! that re-acquires the token shortly before the reported expiry.
//!
//! # Example
//!
//! ```rust,no_run
//! use httpward_core::{HttpHelper, HttpHelperApi};
//!
//! # async fn example() -> Result<(), httpward_core::HttpHelperError> {
//! // Blocks until the first token has been acquired
//! let mut client = HttpHelper::client_credentials(
//!     "client-id",
//!     "client-secret",
//!     "https://auth.example.com/token",
//! )
//! .await?;
//!
//! // `Authorization: Bearer <access_token>` is attached automatically
//! let response = client.get("https://api.example.com/users").await?;
//!
//! client.close().await;
//! # Ok(())
//! # }
//! ```

mod refresh;
mod token;

pub(in crate::client) use self::refresh::{DEFAULT_REFRESH_MARGIN, TokenRefresher};
pub use self::token::{ClientCredentials, ClientCredentialsToken};
