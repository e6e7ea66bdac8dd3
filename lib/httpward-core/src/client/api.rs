use std::future::Future;

use http::Method;
use reqwest::Response;

use super::call::{HttpCall, RequestSpec, check_status};
use super::oauth2::{ClientCredentials, ClientCredentialsToken};
use super::{FormContent, HttpHelperError, RequestBody};

/// The request surface shared by [`HttpHelper`](crate::HttpHelper) and
/// [`HttpHelperMock`](crate::HttpHelperMock).
///
/// Implementors only provide [`execute`](Self::execute). The verb methods shape their
/// arguments into a [`HttpCall`], and argument validation happens when the call is awaited,
/// so every implementor rejects the same inputs with the same errors.
///
/// # Example
///
/// ```rust
/// use httpward_core::{HttpHelperApi, HttpHelperError, HttpHelperMock};
///
/// async fn fetch_status(client: &impl HttpHelperApi, url: &str) -> Result<u16, HttpHelperError> {
///     let response = client.get(url).await?;
///     Ok(response.status().as_u16())
/// }
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), HttpHelperError> {
/// let mock = HttpHelperMock::new(true);
/// assert_eq!(fetch_status(&mock, "https://api.example.com").await?, 200);
/// # Ok(())
/// # }
/// ```
pub trait HttpHelperApi: Sync + Sized {
    /// Dispatches an already validated request.
    ///
    /// The status policy is applied by the caller, not here.
    fn execute(
        &self,
        request: RequestSpec,
    ) -> impl Future<Output = Result<Response, HttpHelperError>> + Send;

    /// Runs one client-credentials grant against `auth_url`.
    ///
    /// The token request is a form `POST` that always fails on a non-success status.
    /// It is dispatched through [`execute`](Self::execute) like any other call, so an
    /// authenticated [`HttpHelper`](crate::HttpHelper) also sends its own `Authorization`
    /// header to the token endpoint. Use an unauthenticated helper to reach a third-party
    /// authorization server.
    ///
    /// # Errors
    ///
    /// Returns [`HttpHelperError::InvalidArgument`] for a blank argument, then any
    /// transport, status or decoding error of the exchange.
    fn client_credentials_token(
        &self,
        client_id: &str,
        client_secret: &str,
        auth_url: &str,
    ) -> impl Future<Output = Result<ClientCredentialsToken, HttpHelperError>> + Send {
        async move {
            let credentials = ClientCredentials::new(client_id, client_secret, auth_url)?;
            let request = credentials.to_request()?;
            let throw_on_bad_status = request.throw_on_bad_status();

            let response = self.execute(request).await?;
            let response = check_status(response, throw_on_bad_status)?;
            ClientCredentialsToken::from_response(response).await
        }
    }

    /// Prepares a `GET` call.
    fn get(&self, url: impl Into<String>) -> HttpCall<'_, Self> {
        HttpCall::new(self, Method::GET, url.into(), RequestBody::Empty)
    }

    /// Prepares a `DELETE` call.
    fn delete(&self, url: impl Into<String>) -> HttpCall<'_, Self> {
        HttpCall::new(self, Method::DELETE, url.into(), RequestBody::Empty)
    }

    /// Prepares a `POST` call with a text body.
    fn post(&self, url: impl Into<String>, body: impl Into<String>) -> HttpCall<'_, Self> {
        let body = RequestBody::Text(body.into());
        HttpCall::new(self, Method::POST, url.into(), body)
    }

    /// Prepares a `POST` call with a form body.
    fn post_form(&self, url: impl Into<String>, content: FormContent) -> HttpCall<'_, Self> {
        HttpCall::new(self, Method::POST, url.into(), RequestBody::Form(content))
    }

    /// Prepares a `PUT` call with a text body.
    fn put(&self, url: impl Into<String>, body: impl Into<String>) -> HttpCall<'_, Self> {
        let body = RequestBody::Text(body.into());
        HttpCall::new(self, Method::PUT, url.into(), body)
    }

    /// Prepares a `PATCH` call with a text body.
    fn patch(&self, url: impl Into<String>, body: impl Into<String>) -> HttpCall<'_, Self> {
        let body = RequestBody::Text(body.into());
        HttpCall::new(self, Method::PATCH, url.into(), body)
    }
}
