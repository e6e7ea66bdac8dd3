use std::fmt;

use mime::Mime;

/// Media type attached to a text request body.
///
/// [`ContentType::None`] is a legal marker meaning "do not send a `Content-Type` header".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// No `Content-Type` header.
    #[default]
    None,
    /// `application/json`
    ApplicationJson,
    /// `application/x-www-form-urlencoded`
    FormUrlEncoded,
}

impl ContentType {
    /// Returns the wire media type, or an empty string for [`ContentType::None`].
    pub const fn media_type(self) -> &'static str {
        match self {
            Self::None => "",
            Self::ApplicationJson => "application/json",
            Self::FormUrlEncoded => "application/x-www-form-urlencoded",
        }
    }

    /// Returns the parsed media type, if any.
    pub fn mime(self) -> Option<Mime> {
        match self {
            Self::None => None,
            Self::ApplicationJson => Some(mime::APPLICATION_JSON),
            Self::FormUrlEncoded => Some(mime::APPLICATION_WWW_FORM_URLENCODED),
        }
    }

    pub(in crate::client) fn to_header(self) -> Option<headers::ContentType> {
        self.mime().map(headers::ContentType::from)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.media_type())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_media_types() {
        assert_eq!(ContentType::None.media_type(), "");
        assert_eq!(
            ContentType::ApplicationJson.media_type(),
            "application/json"
        );
        assert_eq!(
            ContentType::FormUrlEncoded.media_type(),
            "application/x-www-form-urlencoded"
        );
    }

    #[test]
    fn should_agree_with_mime_constants() {
        for content_type in [ContentType::ApplicationJson, ContentType::FormUrlEncoded] {
            let mime = content_type.mime().expect("has a mime");
            assert_eq!(mime.essence_str(), content_type.media_type());
        }
        assert!(ContentType::None.mime().is_none());
        assert!(ContentType::None.to_header().is_none());
    }

    #[test]
    fn should_default_to_none() {
        assert_eq!(ContentType::default(), ContentType::None);
        assert_eq!(ContentType::default().to_string(), "");
    }
}
