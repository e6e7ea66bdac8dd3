use http::StatusCode;
use reqwest::Response;
use tracing::trace;

use super::HttpHelperError;
use super::api::HttpHelperApi;
use super::call::RequestSpec;
use super::oauth2::{ClientCredentials, ClientCredentialsToken};

/// In-memory stand-in for [`HttpHelper`](crate::HttpHelper).
///
/// Performs no I/O. Every call is validated exactly like the real helper, then answers
/// with an empty `200 OK` or `400 Bad Request` depending on how the mock was created.
///
/// # Example
///
/// ```rust
/// use httpward_core::{HttpHelperApi, HttpHelperError, HttpHelperMock};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), HttpHelperError> {
/// let failing = HttpHelperMock::new(false);
///
/// let response = failing.get("https://api.example.com").await?;
/// assert_eq!(response.status(), 400);
///
/// let result = failing.get("https://api.example.com").throw_on_bad_status().await;
/// assert!(matches!(result, Err(HttpHelperError::BadStatus { status_code: 400 })));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct HttpHelperMock {
    return_success_status_code: bool,
}

impl HttpHelperMock {
    /// Access token of the fixed token.
    pub const ACCESS_TOKEN: &'static str = "access_token";
    /// Token type of the fixed token.
    pub const TOKEN_TYPE: &'static str = "Bearer";
    /// Lifetime in seconds of the fixed token.
    pub const EXPIRES_IN: i64 = 7199;

    /// Creates a mock answering `200 OK` when `return_success_status_code` is set,
    /// `400 Bad Request` otherwise.
    pub fn new(return_success_status_code: bool) -> Self {
        Self {
            return_success_status_code,
        }
    }

    fn status(&self) -> StatusCode {
        if self.return_success_status_code {
            StatusCode::OK
        } else {
            StatusCode::BAD_REQUEST
        }
    }
}

impl HttpHelperApi for HttpHelperMock {
    async fn execute(&self, request: RequestSpec) -> Result<Response, HttpHelperError> {
        let status = self.status();
        trace!(method = %request.method(), url = request.url(), %status, "mocked request");

        let mut response = http::Response::new(String::new());
        *response.status_mut() = status;
        Ok(Response::from(response))
    }

    /// Validates the arguments, then returns a fixed token without any I/O.
    async fn client_credentials_token(
        &self,
        client_id: &str,
        client_secret: &str,
        auth_url: &str,
    ) -> Result<ClientCredentialsToken, HttpHelperError> {
        ClientCredentials::new(client_id, client_secret, auth_url)?;
        let token = ClientCredentialsToken::new(
            Self::ACCESS_TOKEN,
            Self::TOKEN_TYPE,
            Self::EXPIRES_IN,
        );
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ContentType, FormContent};

    #[tokio::test]
    async fn should_return_configured_status() {
        let ok = HttpHelperMock::new(true);
        let response = ok.get("http://localhost/").await.expect("mock answers");
        assert_eq!(response.status(), StatusCode::OK);

        let failing = HttpHelperMock::new(false);
        let response = failing
            .post("http://localhost/", "{}")
            .with_content_type(ContentType::ApplicationJson)
            .await
            .expect("mock answers");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_throw_on_bad_status_when_asked() {
        let failing = HttpHelperMock::new(false);

        let result = failing
            .delete("http://localhost/1")
            .throw_on_bad_status()
            .await;
        assert!(matches!(
            result,
            Err(HttpHelperError::BadStatus { status_code: 400 })
        ));

        let ok = HttpHelperMock::new(true);
        let response = ok
            .patch("http://localhost/1", "patch")
            .throw_on_bad_status()
            .await
            .expect("success is not thrown");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_validate_like_the_real_helper() {
        let mock = HttpHelperMock::new(true);

        let result = mock.get(" ").await;
        assert!(matches!(
            result,
            Err(HttpHelperError::InvalidArgument { argument: "url" })
        ));

        let result = mock.put("http://localhost/", "").await;
        assert!(matches!(
            result,
            Err(HttpHelperError::InvalidArgument { argument: "body" })
        ));

        let result = mock.post_form("http://localhost/", FormContent::new()).await;
        assert!(matches!(
            result,
            Err(HttpHelperError::InvalidArgument {
                argument: "content"
            })
        ));
    }

    #[tokio::test]
    async fn should_return_fixed_token() {
        let mock = HttpHelperMock::new(false);

        let token = mock
            .client_credentials_token("id", "secret", "http://localhost/token")
            .await
            .expect("token");
        assert_eq!(token.access_token(), "access_token");
        assert_eq!(token.token_type(), "Bearer");
        assert_eq!(token.expires_in(), 7199);
    }

    #[tokio::test]
    async fn should_validate_token_arguments() {
        let mock = HttpHelperMock::new(true);

        let cases = [
            ("", "secret", "http://localhost/token", "client_id"),
            ("id", " ", "http://localhost/token", "client_secret"),
            ("id", "secret", "", "auth_url"),
        ];
        for (client_id, client_secret, auth_url, expected) in cases {
            let result = mock
                .client_credentials_token(client_id, client_secret, auth_url)
                .await;
            let Err(HttpHelperError::InvalidArgument { argument }) = result else {
                panic!("expected {expected} to be rejected");
            };
            assert_eq!(argument, expected);
        }
    }
}
