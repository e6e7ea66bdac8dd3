/// Errors that can occur when using the [`HttpHelper`](crate::HttpHelper).
///
/// Argument errors are raised before any I/O happens. Transport and decoding
/// errors are propagated from the underlying libraries untouched.
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum HttpHelperError {
    /// A required string argument was empty or only whitespace.
    ///
    /// The `argument` field names the exact parameter that was rejected.
    #[display("Value cannot be blank (argument '{argument}')")]
    #[from(skip)]
    InvalidArgument {
        /// Name of the rejected argument.
        argument: &'static str,
    },

    /// The endpoint answered with a status outside the `2xx` range
    /// while throw-on-bad-status was requested.
    #[display("Endpoint returned bad status: {status_code}")]
    #[from(skip)]
    BadStatus {
        /// The HTTP status code received.
        status_code: u16,
    },

    /// HTTP client error from the underlying reqwest library.
    ///
    /// Occurs when network requests fail, timeouts occur, or connection issues arise.
    ReqwestError(reqwest::Error),

    /// URL parsing error.
    UrlError(url::ParseError),

    /// Invalid HTTP header name.
    InvalidHeaderName(http::header::InvalidHeaderName),

    /// Invalid HTTP header value.
    ///
    /// Occurs when header values (including credentials) contain invalid characters.
    InvalidHeaderValue(http::header::InvalidHeaderValue),

    /// Form content could not be URL-encoded.
    FormEncodingError(serde_urlencoded::ser::Error),

    /// The token endpoint answered with a body that is not a valid token document.
    #[display("Failed to deserialize token response: {error}\n{body}")]
    #[from(skip)]
    TokenResponse {
        /// The underlying JSON parsing error.
        error: serde_json::Error,
        /// The response body that failed to parse.
        body: String,
    },

    /// The client has already been closed.
    #[display("HTTP helper is closed")]
    #[from(skip)]
    Closed,
}

/// Rejects blank values (empty or whitespace only) for the named argument.
pub(crate) fn ensure_not_blank(argument: &'static str, value: &str) -> Result<(), HttpHelperError> {
    if value.trim().is_empty() {
        return Err(HttpHelperError::InvalidArgument { argument });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_helper_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<HttpHelperError>();
        assert_sync::<HttpHelperError>();
    }

    #[test]
    fn should_reject_blank_values() {
        for blank in ["", " ", "\t\n"] {
            let error = ensure_not_blank("url", blank).expect_err("blank should be rejected");
            assert!(matches!(
                error,
                HttpHelperError::InvalidArgument { argument: "url" }
            ));
        }
        assert!(ensure_not_blank("url", "https://url.com").is_ok());
    }

    #[test]
    fn should_display_errors() {
        let error = HttpHelperError::InvalidArgument {
            argument: "username",
        };
        assert_eq!(
            error.to_string(),
            "Value cannot be blank (argument 'username')"
        );

        let error = HttpHelperError::BadStatus { status_code: 400 };
        assert_eq!(error.to_string(), "Endpoint returned bad status: 400");

        assert_eq!(HttpHelperError::Closed.to_string(), "HTTP helper is closed");
    }
}
