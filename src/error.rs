//! Error types for the fileconv library.
//!
//! Validation failures (wrong input type, unknown target format, missing
//! external tool) get their own variants with actionable messages; decoder,
//! encoder, and filesystem failures pass through unwrapped so their original
//! diagnostics survive. Nothing here is retried or recovered internally —
//! every error propagates synchronously to the caller.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the fileconv library.
#[derive(Debug, Error)]
pub enum ConvertError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("File not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The sniffer could not classify the file at all.
    #[error("Could not determine the media type of '{path}'")]
    UnknownMediaType { path: PathBuf },

    /// The file's sniffed media type is outside the converter's allow-list.
    #[error("Unsupported input type '{detected}'\nThis converter accepts: {allowed}")]
    UnsupportedMediaType { detected: String, allowed: String },

    // ── Target format errors ──────────────────────────────────────────────
    /// The requested output token is absent from the supported-formats table.
    #[error("Unsupported format: '{requested}'\nSupported formats: {supported}")]
    UnsupportedFormat {
        requested: String,
        supported: String,
    },

    // ── External tool errors ──────────────────────────────────────────────
    /// A required external conversion tool is not installed.
    #[error("{tool} is not available.\n{hint}")]
    ConverterUnavailable { tool: String, hint: String },

    /// The external tool ran but did not produce the expected output.
    #[error("Conversion of '{path}' failed: {detail}")]
    ConversionFailed { path: PathBuf, detail: String },

    // ── Passthrough errors ────────────────────────────────────────────────
    /// Image decode/encode failure, propagated with its original diagnostic.
    #[error(transparent)]
    Image(#[from] image::ImageError),

    /// Filesystem failure, propagated with its original diagnostic.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
