//! The converter contract shared by the image and document converters.
//!
//! Each converter declares, as associated consts, the media types it accepts
//! and the output formats it can produce; the compiler rejects an implementer
//! that omits either. A converter instance is bound to exactly one source
//! file for its whole lifetime, so the media type validated at construction
//! always describes the file a later `convert` call reads. To convert a
//! different file, construct a new instance.

use crate::error::ConvertError;
use crate::formats::FormatTable;
use crate::sniff;
use std::path::{Path, PathBuf};

/// How a converter matches sniffed media types against its allow-list.
#[derive(Debug, Clone, Copy)]
pub enum MediaTypeRule {
    /// Accept any media type in a family, e.g. `image/` — sniffers report a
    /// precise subtype (`image/png`) while the allow-list stores the family.
    Prefix(&'static str),
    /// Accept exactly the enumerated MIME strings. Used for documents, whose
    /// sniffed types share no common prefix.
    OneOf(&'static [&'static str]),
}

impl MediaTypeRule {
    /// Does `mime` satisfy this rule?
    pub fn matches(&self, mime: &str) -> bool {
        match self {
            MediaTypeRule::Prefix(prefix) => mime.starts_with(prefix),
            MediaTypeRule::OneOf(list) => list.contains(&mime),
        }
    }

    /// Human-readable rendering of the allow-list for error messages.
    pub fn describe(&self) -> String {
        match self {
            MediaTypeRule::Prefix(prefix) => format!("{prefix}*"),
            MediaTypeRule::OneOf(list) => list.join(", "),
        }
    }
}

/// A converter bound to a single validated source file.
pub trait FileConverter: Sized {
    /// Media types this converter accepts as input.
    const MEDIA_TYPES: MediaTypeRule;
    /// Output formats this converter can produce.
    const FORMATS: FormatTable;

    /// The source file this converter is bound to.
    fn source(&self) -> &Path;

    /// Convert the bound file to the format named by `target`, returning the
    /// path of the written output. Repeated calls with the same target
    /// overwrite the same output path.
    fn convert(&self, target: &str) -> Result<PathBuf, ConvertError>;
}

/// Sniff `path` and check the result against `rule`.
///
/// Returns the sniffed media type on success so the caller can keep it for
/// logging or converter selection.
///
/// # Errors
/// [`ConvertError::UnsupportedMediaType`] when the sniffed type is outside
/// the allow-list, plus the sniffer's own open/classify failures.
pub fn validate_media_type(path: &Path, rule: MediaTypeRule) -> Result<String, ConvertError> {
    let mime = sniff::media_type(path)?;
    if rule.matches(&mime) {
        Ok(mime)
    } else {
        Err(ConvertError::UnsupportedMediaType {
            detected: mime,
            allowed: rule.describe(),
        })
    }
}
