//! Error types for body-content extraction.

use std::string::FromUtf8Error;

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Extraction error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid or truncated quoted-printable escape sequence.
    #[error("malformed quoted-printable data: {0}")]
    MalformedEncoding(String),

    /// Decoded bytes are not valid UTF-8.
    #[error("decoded body is not valid UTF-8: {0}")]
    MalformedUtf8(#[from] FromUtf8Error),

    /// Declared Content-Transfer-Encoding this crate does not decode.
    #[error("unsupported content-transfer-encoding: {0}")]
    UnsupportedTransferEncoding(String),

    /// Declared Content-Type outside text/plain and text/html.
    #[error("unrecognized content-type: {0}")]
    UnrecognizedContentType(String),

    /// Failure while processing one part of a multipart body.
    #[error("body part {index}: {source}")]
    Part {
        /// Zero-based part position, in boundary-occurrence order.
        index: usize,
        /// The underlying per-part failure.
        source: Box<Error>,
    },
}
