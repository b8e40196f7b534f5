//! # fileconv
//!
//! Convert a single local file from one format to another. The heavy lifting
//! is delegated: raster formats go through the `image` crate, document
//! formats through LibreOffice run as an external process, and input files
//! are classified by magic-byte sniffing via [`infer`].
//!
//! What this crate itself owns is deliberately small:
//! - validating that an input file's sniffed media type matches what a
//!   converter accepts,
//! - normalizing a user-supplied extension token and resolving it against a
//!   supported-formats table,
//! - format-specific fixups (flattening transparency before JPEG encoding).
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use fileconv::{FileConverter, ImageConverter};
//!
//! fn main() -> Result<(), fileconv::ConvertError> {
//!     // Sniffs the file and rejects anything that is not image/*.
//!     let converter = ImageConverter::open("photo.png")?;
//!     // Writes photo.jpg next to the source, flattening any alpha channel.
//!     let output = converter.convert("jpg")?;
//!     println!("{}", output.display());
//!     Ok(())
//! }
//! ```
//!
//! A converter instance is bound to the one file validated at `open`; build
//! a new instance to convert a different file. Conversions are synchronous,
//! one file in flight, and each call writes exactly one output file which the
//! caller then owns.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod converter;
pub mod document;
pub mod error;
pub mod formats;
pub mod image;
pub mod sniff;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use crate::converter::{validate_media_type, FileConverter, MediaTypeRule};
pub use crate::document::{DocumentConfig, DocumentConverter};
pub use crate::error::ConvertError;
pub use crate::formats::FormatTable;
pub use crate::image::ImageConverter;
pub use crate::sniff::media_type;
