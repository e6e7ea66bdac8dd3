use std::fmt;

use http::Method;
use reqwest::Response;

use super::body::RequestBody;
use super::content_type::ContentType;
use super::error::{HttpHelperError, ensure_not_blank};
use super::headers::RequestHeaders;

mod builder;
mod execution;
#[cfg(test)]
mod tests;

pub(in crate::client) use self::execution::RequestInvoker;

/// A validated request, ready to be dispatched.
///
/// Built fresh for every call and not retained after dispatch.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    method: Method,
    url: String,
    body: RequestBody,
    content_type: ContentType,
    headers: RequestHeaders,
    throw_on_bad_status: bool,
}

impl RequestSpec {
    /// Creates a request with default options: no content type, no extra header,
    /// and non-success status returned as-is.
    ///
    /// # Errors
    ///
    /// Returns [`HttpHelperError::InvalidArgument`] when:
    /// - `url` is blank (`url`)
    /// - the method carries a body (anything but `GET`, `HEAD` and `DELETE`) and the
    ///   text body is blank (`body`) or the form has no field (`content`)
    pub fn new(
        method: Method,
        url: impl Into<String>,
        body: RequestBody,
    ) -> Result<Self, HttpHelperError> {
        let url = url.into();
        ensure_not_blank("url", &url)?;

        if requires_body(&method) && body.is_empty() {
            let argument = match body {
                RequestBody::Form(_) => "content",
                RequestBody::Empty | RequestBody::Text(_) => "body",
            };
            return Err(HttpHelperError::InvalidArgument { argument });
        }

        Ok(Self {
            method,
            url,
            body,
            content_type: ContentType::None,
            headers: RequestHeaders::default(),
            throw_on_bad_status: false,
        })
    }

    /// Sets the media type of a text body.
    #[must_use]
    pub fn with_content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = content_type;
        self
    }

    /// Sets the extra headers.
    #[must_use]
    pub fn with_headers(mut self, headers: RequestHeaders) -> Self {
        self.headers = headers;
        self
    }

    /// Chooses whether a non-success status turns into [`HttpHelperError::BadStatus`].
    #[must_use]
    pub fn with_throw_on_bad_status(mut self, throw_on_bad_status: bool) -> Self {
        self.throw_on_bad_status = throw_on_bad_status;
        self
    }

    /// The HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The target URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The body.
    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    /// The media type of a text body.
    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    /// The extra headers.
    pub fn headers(&self) -> &RequestHeaders {
        &self.headers
    }

    /// Whether a non-success status is turned into an error.
    pub fn throw_on_bad_status(&self) -> bool {
        self.throw_on_bad_status
    }
}

fn requires_body(method: &Method) -> bool {
    !matches!(*method, Method::GET | Method::HEAD | Method::DELETE)
}

/// Applies the throw-on-bad-status policy to a response.
pub(in crate::client) fn check_status(
    response: Response,
    throw_on_bad_status: bool,
) -> Result<Response, HttpHelperError> {
    let status = response.status();
    if throw_on_bad_status && !status.is_success() {
        return Err(HttpHelperError::BadStatus {
            status_code: status.as_u16(),
        });
    }
    Ok(response)
}

/// Builder for a single call, returned by the verb methods of
/// [`HttpHelperApi`](crate::HttpHelperApi).
///
/// Nothing is validated or sent until the call is awaited.
///
/// # Default Behavior
///
/// - **Content-Type**: [`ContentType::None`] (no header for text bodies)
/// - **Headers**: none besides `Authorization`
/// - **Status**: non-success responses are returned, not turned into errors
///
/// # Example
///
/// ```rust,no_run
/// use httpward_core::{ContentType, HttpHelper, HttpHelperApi};
///
/// # async fn example() -> Result<(), httpward_core::HttpHelperError> {
/// let client = HttpHelper::new();
///
/// let response = client
///     .post("https://api.example.com/users", r#"{"name":"Alice"}"#)
///     .with_content_type(ContentType::ApplicationJson)
///     .with_header("X-Request-ID", "abc-123")
///     .throw_on_bad_status()
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct HttpCall<'a, C> {
    client: &'a C,
    method: Method,
    url: String,
    body: RequestBody,
    content_type: ContentType,
    headers: RequestHeaders,
    throw_on_bad_status: bool,
}

impl<'a, C> HttpCall<'a, C> {
    pub(in crate::client) fn new(
        client: &'a C,
        method: Method,
        url: String,
        body: RequestBody,
    ) -> Self {
        Self {
            client,
            method,
            url,
            body,
            content_type: ContentType::None,
            headers: RequestHeaders::default(),
            throw_on_bad_status: false,
        }
    }

    fn into_request(self) -> Result<(&'a C, RequestSpec), HttpHelperError> {
        let Self {
            client,
            method,
            url,
            body,
            content_type,
            headers,
            throw_on_bad_status,
        } = self;

        let request = RequestSpec::new(method, url, body)?
            .with_content_type(content_type)
            .with_headers(headers)
            .with_throw_on_bad_status(throw_on_bad_status);
        Ok((client, request))
    }
}

impl<C> fmt::Debug for HttpCall<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpCall")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("body", &self.body)
            .field("content_type", &self.content_type)
            .field("headers", &self.headers)
            .field("throw_on_bad_status", &self.throw_on_bad_status)
            .finish_non_exhaustive()
    }
}
