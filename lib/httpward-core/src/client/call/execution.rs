use std::future::{Future, IntoFuture};
use std::pin::Pin;

use headers::HeaderMapExt;
use http::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Body, Request, Response};
use tracing::trace;
use url::Url;

use super::{HttpCall, RequestSpec, check_status};
use crate::client::api::HttpHelperApi;
use crate::client::{ContentType, HttpHelperError, RequestBody};

impl<C> HttpCall<'_, C>
where
    C: HttpHelperApi,
{
    /// Validates, sends, then applies the status policy.
    pub async fn exchange(self) -> Result<Response, HttpHelperError> {
        let (client, request) = self.into_request()?;
        let throw_on_bad_status = request.throw_on_bad_status();

        let response = client.execute(request).await?;
        check_status(response, throw_on_bad_status)
    }
}

/// Allows `.await` directly on the call builder:
/// ```rust,no_run
/// # use httpward_core::{HttpHelper, HttpHelperApi};
/// # async fn example() -> Result<(), httpward_core::HttpHelperError> {
/// let client = HttpHelper::new();
/// let response = client.get("https://api.example.com/users").await?;
/// # Ok(())
/// # }
/// ```
impl<'a, C> IntoFuture for HttpCall<'a, C>
where
    C: HttpHelperApi,
{
    type Output = Result<Response, HttpHelperError>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send + 'a>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.exchange())
    }
}

/// Sends validated requests on a shared transport.
///
/// Cloning is cheap: the underlying [`reqwest::Client`] is reference counted.
#[derive(Debug, Clone)]
pub(in crate::client) struct RequestInvoker {
    client: reqwest::Client,
}

impl RequestInvoker {
    pub(in crate::client) fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Dispatches the request with the given `Authorization` snapshot.
    ///
    /// Status codes are not checked here.
    pub(in crate::client) async fn invoke(
        &self,
        request: RequestSpec,
        authorization: Option<HeaderValue>,
    ) -> Result<Response, HttpHelperError> {
        trace!(method = %request.method(), url = request.url(), "preparing request");
        let request = Self::build_request(&request, authorization)?;

        trace!(?request, "sending...");
        let response = self.client.execute(request).await?;
        trace!(?response, "...receiving");

        Ok(response)
    }

    pub(super) fn build_request(
        spec: &RequestSpec,
        authorization: Option<HeaderValue>,
    ) -> Result<Request, HttpHelperError> {
        let url = spec.url().parse::<Url>()?;
        let mut request = Request::new(spec.method().clone(), url);
        let req_headers = request.headers_mut();

        spec.headers().append_to(req_headers)?;

        match spec.body() {
            RequestBody::Empty => {}
            RequestBody::Text(text) => {
                if let Some(content_type) = spec.content_type().to_header() {
                    req_headers.typed_insert(content_type);
                }
                *request.body_mut() = Some(Body::from(text.clone()));
            }
            RequestBody::Form(form) => {
                let encoded = form.encode()?;
                if let Some(content_type) = ContentType::FormUrlEncoded.to_header() {
                    req_headers.typed_insert(content_type);
                }
                *request.body_mut() = Some(Body::from(encoded));
            }
        }

        if let Some(authorization) = authorization {
            request.headers_mut().insert(AUTHORIZATION, authorization);
        }

        Ok(request)
    }
}
