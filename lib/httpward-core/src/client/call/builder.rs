use super::HttpCall;
use crate::client::{ContentType, RequestHeaders};

impl<C> HttpCall<'_, C> {
    /// Sets the media type of the text body.
    ///
    /// Ignored for form content, which always carries its own media type.
    #[must_use]
    pub fn with_content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = content_type;
        self
    }

    /// Replaces the extra headers of this call.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use httpward_core::{HttpHelper, HttpHelperApi, RequestHeaders};
    /// # async fn example() -> Result<(), httpward_core::HttpHelperError> {
    /// let client = HttpHelper::new();
    /// let headers = RequestHeaders::new()
    ///     .add_header("Accept", "application/json")
    ///     .add_header("X-Request-ID", "abc-123");
    ///
    /// let response = client
    ///     .get("https://api.example.com/users")
    ///     .with_headers(headers)
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn with_headers(mut self, headers: RequestHeaders) -> Self {
        self.headers = headers;
        self
    }

    /// Adds a single extra header to this call.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers = self.headers.add_header(name, value);
        self
    }

    /// Chooses whether a non-success status turns into
    /// [`HttpHelperError::BadStatus`](crate::HttpHelperError::BadStatus).
    #[must_use]
    pub fn with_throw_on_bad_status(mut self, throw_on_bad_status: bool) -> Self {
        self.throw_on_bad_status = throw_on_bad_status;
        self
    }

    /// Shorthand for `with_throw_on_bad_status(true)`.
    #[must_use]
    pub fn throw_on_bad_status(self) -> Self {
        self.with_throw_on_bad_status(true)
    }
}
