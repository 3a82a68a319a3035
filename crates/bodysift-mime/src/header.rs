//! Part header indexing.

use std::collections::HashMap;

/// Splits a body part at the first blank line (CRLF CRLF).
///
/// Returns `(header, body)`. A part without a blank line has an empty
/// header and keeps the whole text as its body.
#[must_use]
pub(crate) fn split_part(part: &str) -> (&str, &str) {
    part.find("\r\n\r\n")
        .map_or(("", part), |at| (&part[..at], &part[at + 4..]))
}

/// Case-insensitive index over the header fields of one body part.
///
/// Built in a single pass over the header text; lookups never rescan
/// the part.
#[derive(Debug, Clone, Default)]
pub struct Headers {
    headers: HashMap<String, Vec<String>>,
}

impl Headers {
    /// Creates a new empty header index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a header value.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into().to_lowercase();
        self.headers.entry(name).or_default().push(value.into());
    }

    /// Gets the first value for a header.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|v| v.first().map(String::as_str))
    }

    /// Gets all values for a header.
    #[must_use]
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.headers
            .get(&name.to_lowercase())
            .map(|v| v.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// True when no fields were indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Indexes header fields from raw text.
    ///
    /// Fields are `Name: value` lines; continuation lines (leading
    /// space or tab) are unfolded into the preceding field. Blank lines
    /// before the first field are skipped — boundary splitting leaves a
    /// stray CRLF at the front of a part — while a blank line after at
    /// least one field ends the block. Lines without a colon are
    /// ignored.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut headers = Self::new();
        let mut current_name: Option<String> = None;
        let mut current_value = String::new();

        for line in text.lines() {
            if line.is_empty() {
                if headers.is_empty() && current_name.is_none() {
                    continue;
                }
                break;
            }

            // Continuation line (starts with space or tab)
            if line.starts_with(' ') || line.starts_with('\t') {
                if current_name.is_some() {
                    current_value.push(' ');
                    current_value.push_str(line.trim());
                }
            } else {
                // Save previous field if one is open
                if let Some(name) = current_name.take() {
                    headers.add(name, std::mem::take(&mut current_value));
                }

                if let Some((name, value)) = line.split_once(':') {
                    current_name = Some(name.trim().to_string());
                    current_value = value.trim().to_string();
                }
            }
        }

        // Save the last field if the block did not end in a blank line
        if let Some(name) = current_name {
            headers.add(name, current_value);
        }

        headers
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
    use super::*;

    #[test]
    fn test_split_part_with_separator() {
        let part = "Content-Type: text/plain\r\n\r\nHello";
        let (header, body) = split_part(part);
        assert_eq!(header, "Content-Type: text/plain");
        assert_eq!(body, "Hello");
    }

    #[test]
    fn test_split_part_without_separator() {
        let part = "Hello, no headers here";
        let (header, body) = split_part(part);
        assert_eq!(header, "");
        assert_eq!(body, part);
    }

    #[test]
    fn test_split_part_separator_at_start() {
        let part = "\r\n\r\nbody only";
        let (header, body) = split_part(part);
        assert_eq!(header, "");
        assert_eq!(body, "body only");
    }

    #[test]
    fn test_headers_add_get() {
        let mut headers = Headers::new();
        headers.add("Content-Type", "text/plain");
        assert_eq!(headers.get("Content-Type"), Some("text/plain"));
        assert_eq!(headers.get("content-type"), Some("text/plain")); // Case insensitive
    }

    #[test]
    fn test_headers_get_all() {
        let mut headers = Headers::new();
        headers.add("Received", "by a");
        headers.add("Received", "by b");
        assert_eq!(headers.get_all("received"), vec!["by a", "by b"]);
        assert!(headers.get_all("subject").is_empty());
    }

    #[test]
    fn test_headers_parse() {
        let text = concat!(
            "Content-Type: text/plain;\r\n",
            " charset=utf-8\r\n",
            "Content-Transfer-Encoding: quoted-printable\r\n",
            "\r\n"
        );

        let headers = Headers::parse(text);
        assert_eq!(
            headers.get("Content-Type"),
            Some("text/plain; charset=utf-8")
        );
        assert_eq!(
            headers.get("Content-Transfer-Encoding"),
            Some("quoted-printable")
        );
    }

    #[test]
    fn test_headers_parse_skips_leading_blank_lines() {
        let text = "\r\nContent-Type: text/html\r\nContent-Transfer-Encoding: quoted-printable";
        let headers = Headers::parse(text);
        assert_eq!(headers.get("content-type"), Some("text/html"));
        assert_eq!(
            headers.get("content-transfer-encoding"),
            Some("quoted-printable")
        );
    }

    #[test]
    fn test_headers_parse_stops_at_blank_line_after_fields() {
        let text = "Content-Type: text/plain\r\n\r\nNot-A-Header: in the body";
        let headers = Headers::parse(text);
        assert_eq!(headers.get("content-type"), Some("text/plain"));
        assert_eq!(headers.get("not-a-header"), None);
    }

    #[test]
    fn test_headers_parse_ignores_lines_without_colon() {
        let headers = Headers::parse("=5BTesting=5D This is a test message.");
        assert!(headers.is_empty());
    }
}
