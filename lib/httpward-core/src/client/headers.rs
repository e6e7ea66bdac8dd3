use http::HeaderMap;
use http::header::{HeaderName, HeaderValue};
use indexmap::IndexMap;

use super::error::HttpHelperError;

/// Extra headers for a single call, attached verbatim in insertion order.
///
/// No check is made against headers the transport manages itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestHeaders {
    headers: IndexMap<String, String>,
}

impl RequestHeaders {
    /// Creates a new empty `RequestHeaders` instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a header, replacing a previous value with the same name.
    ///
    /// # Example
    ///
    /// ```rust
    /// use httpward_core::RequestHeaders;
    ///
    /// let headers = RequestHeaders::new()
    ///     .add_header("X-Request-ID", "abc-123-def")
    ///     .add_header("Accept", "application/json");
    /// assert_eq!(headers.len(), 2);
    /// ```
    #[must_use]
    pub fn add_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Checks if the headers collection is empty.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Returns the number of headers.
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// Appends the headers to an outgoing header map.
    pub(in crate::client) fn append_to(
        &self,
        target: &mut HeaderMap,
    ) -> Result<(), HttpHelperError> {
        for (name, value) in &self.headers {
            target.append(
                HeaderName::from_bytes(name.as_bytes())?,
                HeaderValue::from_str(value)?,
            );
        }
        Ok(())
    }
}

impl<K, V> FromIterator<(K, V)> for RequestHeaders
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let headers = iter
            .into_iter()
            .map(|(name, value)| (name.into(), value.into()))
            .collect();
        Self { headers }
    }
}
