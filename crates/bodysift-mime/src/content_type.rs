//! Content-type classification for displayable parts.

use crate::error::{Error, Result};
use crate::header::Headers;
use std::fmt;

/// Displayable content kinds recognized by the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ContentKind {
    /// text/plain, or no declared content type.
    Text,
    /// text/html.
    Html,
}

impl ContentKind {
    /// Classifies a part from its header index.
    ///
    /// A part without a `Content-Type` field defaults to [`Self::Text`]
    /// (an unlabelled entity is plain US-ASCII text per RFC 2045).
    /// Matching is by case-insensitive containment, so parameters after
    /// the media type (`; charset=utf-8`) are tolerated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnrecognizedContentType`] for any declared type
    /// other than text/plain or text/html — never a silent default.
    pub fn detect(headers: &Headers) -> Result<Self> {
        let Some(value) = headers.get("content-type") else {
            return Ok(Self::Text);
        };

        let lowered = value.to_ascii_lowercase();
        if lowered.contains("text/plain") {
            Ok(Self::Text)
        } else if lowered.contains("text/html") {
            Ok(Self::Html)
        } else {
            Err(Error::UnrecognizedContentType(value.to_string()))
        }
    }

    /// Returns the canonical lowercase name (`"text"` or `"html"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Html => "html",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_html() {
        let headers = Headers::parse("Content-Type: text/html");
        assert_eq!(ContentKind::detect(&headers).unwrap(), ContentKind::Html);
    }

    #[test]
    fn test_detect_plain() {
        let headers = Headers::parse("Content-Type: text/plain");
        assert_eq!(ContentKind::detect(&headers).unwrap(), ContentKind::Text);
    }

    #[test]
    fn test_detect_defaults_to_text() {
        let headers = Headers::parse("");
        assert_eq!(ContentKind::detect(&headers).unwrap(), ContentKind::Text);
    }

    #[test]
    fn test_detect_tolerates_parameters() {
        let headers = Headers::parse("Content-Type: text/html; charset=utf-8");
        assert_eq!(ContentKind::detect(&headers).unwrap(), ContentKind::Html);
    }

    #[test]
    fn test_detect_is_case_insensitive() {
        let headers = Headers::parse("CONTENT-TYPE: TEXT/HTML");
        assert_eq!(ContentKind::detect(&headers).unwrap(), ContentKind::Html);
    }

    #[test]
    fn test_detect_rejects_unrecognized() {
        let headers = Headers::parse("Content-Type: text/enriched");
        let err = ContentKind::detect(&headers).unwrap_err();
        assert!(matches!(err, Error::UnrecognizedContentType(ref v) if v == "text/enriched"));
    }

    #[test]
    fn test_display() {
        assert_eq!(ContentKind::Text.to_string(), "text");
        assert_eq!(ContentKind::Html.to_string(), "html");
    }
}
