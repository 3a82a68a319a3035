//! # bodysift-mime
//!
//! Displayable text/html extraction from raw MIME message bodies.
//!
//! ## Features
//!
//! - **Multipart splitting**: Boundary-delimited segmentation of a raw
//!   body into parts
//! - **Header indexing**: One-pass field:value index per part, folded
//!   lines unfolded
//! - **Classification**: text/plain vs text/html, with typed rejection
//!   of anything else
//! - **Transfer decoding**: Quoted-Printable to UTF-8; other declared
//!   encodings are rejected, never guessed
//!
//! The input is a message *body* already separated from its envelope by
//! the caller; the output maps each recognized kind to its decoded
//! content, later same-kind parts overwriting earlier ones.
//!
//! ## Quick Start
//!
//! ### Single-part bodies
//!
//! ```
//! let body = "Content-Type: text/plain\r\n\r\nHello, World!";
//!
//! let extracted = bodysift_mime::parse(None, body)?;
//! assert_eq!(extracted.text.as_deref(), Some("Hello, World!"));
//! assert_eq!(extracted.html, None);
//! # Ok::<(), bodysift_mime::Error>(())
//! ```
//!
//! ### Multipart bodies
//!
//! ```
//! let body = "\r\n--xyzzy\r\n\
//!             Content-Type: text/html\r\n\
//!             Content-Transfer-Encoding: quoted-printable\r\n\
//!             \r\n\
//!             =3Cp=3EHello=3C/p=3E\r\n\
//!             --xyzzy--";
//!
//! let extracted = bodysift_mime::parse(Some("xyzzy"), body)?;
//! assert_eq!(extracted.html.as_deref(), Some("<p>Hello</p>"));
//! # Ok::<(), bodysift_mime::Error>(())
//! ```
//!
//! ### Decoding on its own
//!
//! ```
//! use bodysift_mime::encoding::decode_quoted_printable;
//!
//! let decoded = decode_quoted_printable("=5BTesting=5D This is a test message.")?;
//! assert_eq!(decoded, "[Testing] This is a test message.");
//! # Ok::<(), bodysift_mime::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod body;
mod boundary;
mod content_type;
mod error;
mod header;

pub mod encoding;

pub use body::{ExtractedBody, parse};
pub use content_type::ContentKind;
pub use error::{Error, Result};
pub use header::Headers;
