use std::fmt;

use super::HttpHelperError;

/// Body of a request: nothing, raw text, or a form.
///
/// Raw text and form content are mutually exclusive by construction.
#[derive(Clone, Default)]
pub enum RequestBody {
    /// No body.
    #[default]
    Empty,
    /// UTF-8 text, tagged with the call's [`ContentType`](super::ContentType).
    Text(String),
    /// Form fields, always sent as `application/x-www-form-urlencoded`.
    Form(FormContent),
}

impl RequestBody {
    /// Returns `true` if there is nothing to send.
    ///
    /// Blank text and a form without fields both count as empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.trim().is_empty(),
            Self::Form(form) => form.is_empty(),
        }
    }
}

impl fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Text(text) => write!(f, "Text({} byte(s))", text.len()),
            Self::Form(form) => f.debug_tuple("Form").field(form).finish(),
        }
    }
}

impl From<String> for RequestBody {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for RequestBody {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<FormContent> for RequestBody {
    fn from(value: FormContent) -> Self {
        Self::Form(value)
    }
}

/// Ordered form fields, URL-encoded when the request is built.
///
/// # Example
///
/// ```rust
/// use httpward_core::FormContent;
///
/// let form = FormContent::new()
///     .add_field("username", "user@example.com")
///     .add_field("remember", "true");
/// assert_eq!(form.encode()?, "username=user%40example.com&remember=true");
/// # Ok::<(), httpward_core::HttpHelperError>(())
/// ```
#[derive(Clone, Default)]
pub struct FormContent {
    fields: Vec<(String, String)>,
}

impl FormContent {
    /// Creates an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field. Repeated names are kept in order.
    #[must_use]
    pub fn add_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Returns `true` if the form has no field.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Encodes the fields as `application/x-www-form-urlencoded`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpHelperError::FormEncodingError`] if the fields cannot be encoded.
    pub fn encode(&self) -> Result<String, HttpHelperError> {
        let encoded = serde_urlencoded::to_string(&self.fields)?;
        Ok(encoded)
    }
}

impl fmt::Debug for FormContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FormContent {{ fields: {} field(s) }}",
            self.fields.len()
        )
    }
}

impl<K, V> FromIterator<(K, V)> for FormContent
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let fields = iter
            .into_iter()
            .map(|(name, value)| (name.into(), value.into()))
            .collect();
        Self { fields }
    }
}
