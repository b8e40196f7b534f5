//! Supported-format tables and extension-token resolution.
//!
//! A [`FormatTable`] maps the token a user types ("jpg", ".PNG") to the
//! canonical output specifier a converter hands to its codec. Keys are
//! lower-case and dot-free; several keys may share one canonical value
//! ("jpeg" and "jpg" both produce a `.jpg` file).

use crate::error::ConvertError;
use std::borrow::Cow;

/// An immutable mapping from normalized extension token to canonical output
/// specifier. Built from a `'static` slice so converters can carry their
/// table as an associated const.
#[derive(Debug, Clone, Copy)]
pub struct FormatTable {
    entries: &'static [(&'static str, &'static str)],
}

impl FormatTable {
    /// Wrap a static token → specifier slice. Keys must be unique,
    /// lower-case, and dot-free.
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    /// The tokens a user may request, in table order.
    pub fn tokens(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(token, _)| *token)
    }

    /// Normalize `raw` and look it up once, returning the matched
    /// `(token, canonical specifier)` entry. The returned token is the
    /// table key, i.e. the normalized form of `raw` — handy where the codec
    /// wants the token rather than the canonical value.
    ///
    /// # Errors
    /// [`ConvertError::UnsupportedFormat`] when the normalized token is not
    /// in the table; the message enumerates every supported token so the
    /// caller can self-correct.
    pub fn resolve_entry(
        &self,
        raw: &str,
    ) -> Result<(&'static str, &'static str), ConvertError> {
        let token = normalize(raw);
        self.entries
            .iter()
            .find(|(key, _)| *key == token.as_ref())
            .copied()
            .ok_or_else(|| ConvertError::UnsupportedFormat {
                requested: raw.to_string(),
                supported: self.tokens().collect::<Vec<_>>().join(", "),
            })
    }

    /// Normalize `raw` and return only the canonical specifier.
    pub fn resolve(&self, raw: &str) -> Result<&'static str, ConvertError> {
        self.resolve_entry(raw).map(|(_, canonical)| canonical)
    }
}

/// Lower-case the token and strip a single leading dot: ".PNG" → "png".
fn normalize(raw: &str) -> Cow<'_, str> {
    let trimmed = raw.strip_prefix('.').unwrap_or(raw);
    if trimmed.chars().all(|c| c.is_ascii_lowercase() || !c.is_ascii_alphabetic()) {
        Cow::Borrowed(trimmed)
    } else {
        Cow::Owned(trimmed.to_lowercase())
    }
}
