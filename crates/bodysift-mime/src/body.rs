//! Per-part processing and top-level extraction.

use crate::boundary::{scan, split, trim_artifacts};
use crate::content_type::ContentKind;
use crate::encoding::decode_body;
use crate::error::{Error, Result};
use crate::header::{Headers, split_part};

/// Decoded displayable content extracted from one message body.
///
/// One slot per [`ContentKind`]. When several parts declare the same
/// kind, the later part (in boundary order) overwrites the earlier one
/// — a documented limitation of the extraction model, not corrected
/// here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtractedBody {
    /// Decoded text/plain content, if any part carried it.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub text: Option<String>,
    /// Decoded text/html content, if any part carried it.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub html: Option<String>,
}

impl ExtractedBody {
    /// Creates an empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `content` under `kind`, returning the displaced value.
    pub fn insert(&mut self, kind: ContentKind, content: String) -> Option<String> {
        match kind {
            ContentKind::Text => self.text.replace(content),
            ContentKind::Html => self.html.replace(content),
        }
    }

    /// Gets the content stored under `kind`.
    #[must_use]
    pub fn get(&self, kind: ContentKind) -> Option<&str> {
        match kind {
            ContentKind::Text => self.text.as_deref(),
            ContentKind::Html => self.html.as_deref(),
        }
    }

    /// True when no variant was extracted.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.text.is_none() && self.html.is_none()
    }
}

/// Runs one part through the separate → index → classify → decode
/// pipeline.
///
/// A part whose header section is empty (no blank-line separator, or
/// one at the very start) is indexed from its whole text, so a
/// headerless part still classifies and decodes by the fields it
/// carries inline.
fn process_part(part: &str) -> Result<(ContentKind, String)> {
    let (header, body) = split_part(part);
    let headers = if header.is_empty() {
        Headers::parse(part)
    } else {
        Headers::parse(header)
    };

    let kind = ContentKind::detect(&headers)?;
    let content = decode_body(&headers, body)?;
    tracing::trace!(kind = %kind, bytes = content.len(), "part processed");

    Ok((kind, content))
}

/// Extracts displayable text/html content from a raw message body.
///
/// With a non-empty `boundary`, the message is split at each boundary
/// occurrence and every part runs through the pipeline; same-kind parts
/// overwrite in boundary order. With `None` (or an empty boundary), the
/// whole message is processed as a single part.
///
/// The returned [`ExtractedBody`] may be empty — a boundary that never
/// occurs in the message yields no parts.
///
/// # Errors
///
/// Any failing part aborts the whole call: [`Error::MalformedEncoding`]
/// / [`Error::MalformedUtf8`] for undecodable quoted-printable content,
/// [`Error::UnsupportedTransferEncoding`] for a declared encoding other
/// than quoted-printable, and [`Error::UnrecognizedContentType`] for a
/// declared type outside text/plain and text/html. In multipart mode
/// the failure is wrapped in [`Error::Part`] with the zero-based index
/// of the offending part.
pub fn parse(boundary: Option<&str>, message: &str) -> Result<ExtractedBody> {
    let mut extracted = ExtractedBody::new();

    if let Some(boundary) = boundary.filter(|b| !b.is_empty()) {
        let offsets = scan(message, boundary);
        let parts = split(message, boundary, &offsets);
        tracing::debug!(boundary, parts = parts.len(), "multipart body");

        for (index, raw) in parts.into_iter().enumerate() {
            let part = trim_artifacts(raw);
            let (kind, content) = process_part(part).map_err(|source| Error::Part {
                index,
                source: Box::new(source),
            })?;
            if extracted.insert(kind, content).is_some() {
                tracing::debug!(index, kind = %kind, "replaced earlier part of same kind");
            }
        }
    } else {
        tracing::debug!("single-part body");
        let (kind, content) = process_part(message)?;
        extracted.insert(kind, content);
    }

    Ok(extracted)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::redundant_clone,
    clippy::manual_string_new,
    clippy::needless_collect,
    clippy::unreadable_literal,
    clippy::used_underscore_items,
    clippy::similar_names
)]
mod tests {
    use super::*;

    const MULTIPART: &str = concat!(
        "\r\n--simpleboundary\r\n",
        "Content-Type: text/plain\r\n",
        "Content-Transfer-Encoding: quoted-printable\r\n",
        "\r\n",
        "=5BTesting=5D This is a test message.\r\n",
        "--simpleboundary\r\n",
        "Content-Type: text/html\r\n",
        "Content-Transfer-Encoding: quoted-printable\r\n",
        "\r\n",
        "=3Chtml=3E=5BTesting=5D This is a test message.=3C/html=3E\r\n",
        "--simpleboundary--"
    );

    #[test]
    fn test_single_part_without_headers_is_text_unchanged() {
        let message = "=5BTesting=5D This is a test message.";
        let extracted = parse(None, message).unwrap();
        assert_eq!(extracted.text.as_deref(), Some(message));
        assert_eq!(extracted.html, None);
    }

    #[test]
    fn test_single_part_with_headers_decodes() {
        let message = concat!(
            "Content-Type: text/plain\r\n",
            "Content-Transfer-Encoding: quoted-printable\r\n",
            "\r\n",
            "=5BTesting=5D This is a test message."
        );
        let extracted = parse(None, message).unwrap();
        assert_eq!(
            extracted.text.as_deref(),
            Some("[Testing] This is a test message.")
        );
    }

    #[test]
    fn test_empty_boundary_means_single_part() {
        let message = "plain body";
        assert_eq!(parse(Some(""), message).unwrap(), parse(None, message).unwrap());
    }

    #[test]
    fn test_multipart_round_trip() {
        let extracted = parse(Some("simpleboundary"), MULTIPART).unwrap();
        assert_eq!(
            extracted.text.as_deref(),
            Some("[Testing] This is a test message.")
        );
        assert_eq!(
            extracted.html.as_deref(),
            Some("<html>[Testing] This is a test message.</html>")
        );
    }

    #[test]
    fn test_multipart_headerless_parts_default_to_text_undecoded() {
        let message = concat!(
            "\r\n--simpleboundary\r\n",
            "\r\n",
            "=5BTesting=5D This is a test message.\r\n",
            "--simpleboundary\r\n",
            "\r\n",
            "=3Chtml=3E=5BTesting=5D This is a test message.=3C/html=3E\r\n",
            "--simpleboundary--"
        );
        let extracted = parse(Some("simpleboundary"), message).unwrap();
        // Both parts default to text; the later one wins, and neither
        // decodes without a declared transfer encoding.
        assert_eq!(
            extracted.text.as_deref(),
            Some("=3Chtml=3E=5BTesting=5D This is a test message.=3C/html=3E")
        );
        assert_eq!(extracted.html, None);
    }

    #[test]
    fn test_boundary_never_occurs_yields_empty_result() {
        let extracted = parse(Some("absent"), "no delimiters anywhere").unwrap();
        assert!(extracted.is_empty());
    }

    #[test]
    fn test_last_write_wins_in_boundary_order() {
        let message = concat!(
            "\r\n--b\r\n",
            "Content-Type: text/plain\r\n",
            "\r\n",
            "first\r\n",
            "--b\r\n",
            "Content-Type: text/plain\r\n",
            "\r\n",
            "second\r\n",
            "--b--"
        );
        let extracted = parse(Some("b"), message).unwrap();
        assert_eq!(extracted.text.as_deref(), Some("second"));
    }

    #[test]
    fn test_parse_is_idempotent() {
        let first = parse(Some("simpleboundary"), MULTIPART).unwrap();
        let second = parse(Some("simpleboundary"), MULTIPART).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unrecognized_content_type_aborts_with_part_index() {
        let message = concat!(
            "\r\n--b\r\n",
            "Content-Type: text/plain\r\n",
            "\r\n",
            "fine\r\n",
            "--b\r\n",
            "Content-Type: text/enriched\r\n",
            "\r\n",
            "not fine\r\n",
            "--b--"
        );
        let err = parse(Some("b"), message).unwrap_err();
        match err {
            Error::Part { index, source } => {
                assert_eq!(index, 1);
                assert!(matches!(*source, Error::UnrecognizedContentType(_)));
            }
            other => panic!("expected part error, got {other}"),
        }
    }

    #[test]
    fn test_unsupported_encoding_aborts_with_part_index() {
        let message = concat!(
            "\r\n--bdry\r\n",
            "Content-Type: text/plain\r\n",
            "Content-Transfer-Encoding: base64\r\n",
            "\r\n",
            "SGVsbG8=\r\n",
            "--bdry--"
        );
        let err = parse(Some("bdry"), message).unwrap_err();
        match err {
            Error::Part { index, source } => {
                assert_eq!(index, 0);
                assert!(matches!(*source, Error::UnsupportedTransferEncoding(_)));
            }
            other => panic!("expected part error, got {other}"),
        }
    }

    #[test]
    fn test_malformed_escape_aborts() {
        let message = concat!(
            "Content-Type: text/plain\r\n",
            "Content-Transfer-Encoding: quoted-printable\r\n",
            "\r\n",
            "broken =XY escape"
        );
        let err = parse(None, message).unwrap_err();
        assert!(matches!(err, Error::MalformedEncoding(_)));
    }

    #[test]
    fn test_insert_returns_displaced_value() {
        let mut extracted = ExtractedBody::new();
        assert_eq!(extracted.insert(ContentKind::Text, "old".to_string()), None);
        assert_eq!(
            extracted.insert(ContentKind::Text, "new".to_string()),
            Some("old".to_string())
        );
        assert_eq!(extracted.get(ContentKind::Text), Some("new"));
        assert_eq!(extracted.get(ContentKind::Html), None);
    }
}
