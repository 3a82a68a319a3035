//! Transfer decoding for part bodies.
//!
//! Only quoted-printable (RFC 2045) is decoded; a part with no declared
//! transfer encoding passes through unchanged.

use crate::error::{Error, Result};
use crate::header::Headers;

/// Decodes a part body according to its declared transfer encoding.
///
/// No `Content-Transfer-Encoding` field means 7-bit/US-ASCII and the
/// body is returned as-is. A declared quoted-printable body is decoded.
///
/// # Errors
///
/// Returns [`Error::UnsupportedTransferEncoding`] for any other
/// declared encoding (base64, 8bit, binary, ...) — the body is never
/// guessed at — and the [`decode_quoted_printable`] errors for a
/// quoted-printable body that fails to decode.
pub fn decode_body(headers: &Headers, body: &str) -> Result<String> {
    match headers.get("content-transfer-encoding") {
        None => Ok(body.to_string()),
        Some(value) if value.to_ascii_lowercase().contains("quoted-printable") => {
            decode_quoted_printable(body)
        }
        Some(value) => Err(Error::UnsupportedTransferEncoding(value.to_string())),
    }
}

/// Decodes quoted-printable text (RFC 2045).
///
/// `=XX` escapes become raw bytes, soft line breaks (`=` before CRLF,
/// or before a bare LF as some senders emit) are removed, and the
/// resulting bytes are interpreted as UTF-8. The loop walks bytes, not
/// chars, so escaped multi-byte UTF-8 sequences reassemble correctly.
///
/// # Errors
///
/// Returns [`Error::MalformedEncoding`] for an escape with non-hex
/// digits or one truncated by end of input, and [`Error::MalformedUtf8`]
/// when the decoded bytes are not valid UTF-8.
pub fn decode_quoted_printable(text: &str) -> Result<String> {
    let bytes = text.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'=' {
            decoded.push(bytes[i]);
            i += 1;
            continue;
        }

        // Soft line break
        if bytes[i + 1..].starts_with(b"\r\n") {
            i += 3;
            continue;
        }
        if bytes[i + 1..].starts_with(b"\n") {
            i += 2;
            continue;
        }

        match bytes.get(i + 1..i + 3) {
            Some(hex) if hex[0].is_ascii_hexdigit() && hex[1].is_ascii_hexdigit() => {
                decoded.push(nibble(hex[0]) << 4 | nibble(hex[1]));
                i += 3;
            }
            Some(hex) => {
                return Err(Error::MalformedEncoding(format!(
                    "invalid escape ={}",
                    String::from_utf8_lossy(hex)
                )));
            }
            None => {
                return Err(Error::MalformedEncoding(
                    "incomplete escape sequence".to_string(),
                ));
            }
        }
    }

    String::from_utf8(decoded).map_err(Into::into)
}

/// Value of an ASCII hex digit; caller has already validated the byte.
const fn nibble(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        _ => digit - b'A' + 10,
    }
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
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_decode_plain_text() {
        let decoded = decode_quoted_printable("Hello, World!").unwrap();
        assert_eq!(decoded, "Hello, World!");
    }

    #[test]
    fn test_decode_escapes() {
        let decoded = decode_quoted_printable("=5BTesting=5D This is a test message.").unwrap();
        assert_eq!(decoded, "[Testing] This is a test message.");
    }

    #[test]
    fn test_decode_lowercase_hex() {
        let decoded = decode_quoted_printable("H=c3=a9llo").unwrap();
        assert_eq!(decoded, "Héllo");
    }

    #[test]
    fn test_decode_multi_byte_utf8() {
        let decoded = decode_quoted_printable("=E2=82=AC 10").unwrap();
        assert_eq!(decoded, "€ 10");
    }

    #[test]
    fn test_decode_soft_line_break() {
        let decoded = decode_quoted_printable("Hello=\r\nWorld").unwrap();
        assert_eq!(decoded, "HelloWorld");
    }

    #[test]
    fn test_decode_bare_lf_soft_line_break() {
        let decoded = decode_quoted_printable("Hello=\nWorld").unwrap();
        assert_eq!(decoded, "HelloWorld");
    }

    #[test]
    fn test_decode_rejects_non_hex_escape() {
        let err = decode_quoted_printable("bad =ZZ escape").unwrap_err();
        assert!(matches!(err, Error::MalformedEncoding(_)));
    }

    #[test]
    fn test_decode_rejects_truncated_escape() {
        let err = decode_quoted_printable("truncated =5").unwrap_err();
        assert!(matches!(err, Error::MalformedEncoding(_)));

        let err = decode_quoted_printable("truncated =").unwrap_err();
        assert!(matches!(err, Error::MalformedEncoding(_)));
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        let err = decode_quoted_printable("=FF=FE").unwrap_err();
        assert!(matches!(err, Error::MalformedUtf8(_)));
    }

    #[test]
    fn test_decode_body_passthrough_without_declaration() {
        let headers = Headers::parse("Content-Type: text/plain");
        let body = "=5BNot decoded=5D";
        assert_eq!(decode_body(&headers, body).unwrap(), body);
    }

    #[test]
    fn test_decode_body_quoted_printable() {
        let headers = Headers::parse("Content-Transfer-Encoding: quoted-printable");
        let decoded = decode_body(&headers, "=5BTesting=5D This is a test message.").unwrap();
        assert_eq!(decoded, "[Testing] This is a test message.");
    }

    #[test]
    fn test_decode_body_is_case_insensitive() {
        let headers = Headers::parse("Content-Transfer-Encoding: Quoted-Printable");
        let decoded = decode_body(&headers, "=3Chtml=3E").unwrap();
        assert_eq!(decoded, "<html>");
    }

    #[test]
    fn test_decode_body_rejects_unsupported_encoding() {
        let headers = Headers::parse("Content-Transfer-Encoding: base64");
        let err = decode_body(&headers, "SGVsbG8=").unwrap_err();
        assert!(matches!(err, Error::UnsupportedTransferEncoding(ref v) if v == "base64"));
    }

    proptest! {
        #[test]
        fn prop_fully_escaped_round_trips(input in ".*") {
            let encoded: String = input.bytes().map(|b| format!("={b:02X}")).collect();
            let decoded = decode_quoted_printable(&encoded).unwrap();
            prop_assert_eq!(decoded, input);
        }

        // Printable ASCII without '=' decodes to itself
        #[test]
        fn prop_escape_free_text_is_identity(input in "[ -<>-~]*") {
            let decoded = decode_quoted_printable(&input).unwrap();
            prop_assert_eq!(decoded, input);
        }
    }
}
