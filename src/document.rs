//! Document conversion by delegating to LibreOffice (`soffice --headless`).
//!
//! LibreOffice is an optional capability: the converter constructs fine when
//! `soffice` is missing so validation and introspection keep working, and a
//! later `convert` call fails fast with a clear "unavailable" error instead
//! of a process-spawn failure from deep inside the call.
//!
//! Each conversion runs with an isolated temporary user profile
//! (`-env:UserInstallation=`), so a run never trips over a user's own
//! LibreOffice session holding the profile lock.

use crate::converter::{validate_media_type, FileConverter, MediaTypeRule};
use crate::error::ConvertError;
use crate::formats::FormatTable;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;
use tracing::{debug, info, warn};

/// Exact MIME strings the document converter accepts. Document formats are
/// sniffed to a precise subtype with no common family prefix, so the list is
/// enumerated rather than prefix-matched.
const DOCUMENT_MEDIA_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.oasis.opendocument.text",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.ms-powerpoint",
    "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    "text/plain",
    "application/rtf",
];

/// Output formats, as the bare filter names `soffice --convert-to` takes.
const DOCUMENT_FORMATS: FormatTable = FormatTable::new(&[
    ("pdf", "pdf"),
    ("docx", "docx"),
    ("doc", "doc"),
    ("odt", "odt"),
    ("txt", "txt"),
    ("rtf", "rtf"),
    ("html", "html"),
]);

/// Well-known install locations checked before falling back to PATH lookup.
const SOFFICE_LOCATIONS: &[&str] = &[
    "/usr/bin/soffice",
    "/usr/lib/libreoffice/program/soffice",
    "/opt/libreoffice/program/soffice",
    "/snap/bin/libreoffice.soffice",
    "/Applications/LibreOffice.app/Contents/MacOS/soffice",
];

/// Configuration for the document converter.
#[derive(Debug, Clone, Default)]
pub struct DocumentConfig {
    /// Explicit path to the `soffice` binary. When set, it is used as-is and
    /// no search of well-known locations or PATH happens.
    pub soffice_path: Option<PathBuf>,
}

/// Converts one document file to other document formats via LibreOffice.
#[derive(Debug)]
pub struct DocumentConverter {
    source: PathBuf,
    soffice: Option<PathBuf>,
}

impl DocumentConverter {
    /// Bind a converter to `path` with default configuration.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConvertError> {
        Self::open_with(path, &DocumentConfig::default())
    }

    /// Bind a converter to `path`, sniffing the file and rejecting anything
    /// outside the document allow-list, then probe for `soffice`.
    ///
    /// A failed probe is not an error here: the converter is still usable
    /// for validation, and [`DocumentConverter::convert`] reports the
    /// missing capability.
    pub fn open_with(
        path: impl Into<PathBuf>,
        config: &DocumentConfig,
    ) -> Result<Self, ConvertError> {
        let source = path.into();
        let mime = validate_media_type(&source, Self::MEDIA_TYPES)?;
        debug!("Opened {} ({})", source.display(), mime);

        let soffice = locate_soffice(config);
        if soffice.is_none() {
            warn!("LibreOffice not found; document conversion is unavailable");
        }
        Ok(Self { source, soffice })
    }

    /// Whether the LibreOffice capability was found at construction.
    pub fn is_available(&self) -> bool {
        self.soffice.is_some()
    }
}

impl FileConverter for DocumentConverter {
    const MEDIA_TYPES: MediaTypeRule = MediaTypeRule::OneOf(DOCUMENT_MEDIA_TYPES);
    const FORMATS: FormatTable = DOCUMENT_FORMATS;

    fn source(&self) -> &Path {
        &self.source
    }

    fn convert(&self, target: &str) -> Result<PathBuf, ConvertError> {
        let filter = Self::FORMATS.resolve(target)?;
        let soffice = self
            .soffice
            .as_ref()
            .ok_or_else(|| ConvertError::ConverterUnavailable {
                tool: "LibreOffice".to_string(),
                hint: "Install LibreOffice and ensure 'soffice' is in PATH.".to_string(),
            })?;

        let outdir = self
            .source
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let profile = TempDir::with_prefix("fileconv-lo-")?;

        debug!("Running {} --convert-to {}", soffice.display(), filter);
        let result = Command::new(soffice)
            .arg(format!(
                "-env:UserInstallation=file://{}",
                profile.path().display()
            ))
            .arg("--headless")
            .arg("--convert-to")
            .arg(filter)
            .arg("--outdir")
            .arg(outdir)
            .arg(&self.source)
            .output()?;

        if !result.status.success() {
            return Err(ConvertError::ConversionFailed {
                path: self.source.clone(),
                detail: format!(
                    "soffice exited with {}: {}",
                    result.status,
                    String::from_utf8_lossy(&result.stderr).trim()
                ),
            });
        }

        // soffice exits 0 even for some filter failures; trust the output
        // file, not the exit code.
        let output = self.source.with_extension(filter);
        if !output.exists() {
            return Err(ConvertError::ConversionFailed {
                path: self.source.clone(),
                detail: format!(
                    "soffice produced no output: {}",
                    String::from_utf8_lossy(&result.stderr).trim()
                ),
            });
        }

        info!(
            "Converted {} -> {}",
            self.source.display(),
            output.display()
        );
        Ok(output)
    }
}

/// Find the `soffice` binary: explicit configured path, then well-known
/// install locations, then PATH.
fn locate_soffice(config: &DocumentConfig) -> Option<PathBuf> {
    if let Some(path) = &config.soffice_path {
        if path.exists() {
            return Some(path.clone());
        }
        warn!("Configured soffice path does not exist: {}", path.display());
        return None;
    }

    for location in SOFFICE_LOCATIONS {
        let path = Path::new(location);
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    which::which("soffice")
        .or_else(|_| which::which("libreoffice"))
        .ok()
}
