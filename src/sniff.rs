//! Media-type sniffing: classify a file by its leading bytes, not its name.
//!
//! Detection is delegated to the [`infer`] crate, which matches magic numbers
//! for every format this tool cares about (raster images, PDF, the OOXML and
//! OpenDocument zip containers, legacy OLE documents). Two cases infer cannot
//! see are handled here: RTF (`{\rtf` signature) and plain text, which has no
//! signature at all and is recognised by the header being valid UTF-8.

use crate::error::ConvertError;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// How much of the file the sniffer reads. Every signature infer matches
/// lives inside the first few KiB; the rest of the file is never touched.
const HEADER_LEN: usize = 8192;

/// Sniff the media type of the file at `path`.
///
/// Returns a MIME string such as `image/png` or `application/pdf`.
///
/// # Errors
/// - [`ConvertError::FileNotFound`] / [`ConvertError::PermissionDenied`] when
///   the file cannot be opened.
/// - [`ConvertError::UnknownMediaType`] when the header matches no known
///   signature and is not text.
pub fn media_type(path: &Path) -> Result<String, ConvertError> {
    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConvertError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(ConvertError::PermissionDenied {
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(e.into()),
    };

    let mut header = vec![0u8; HEADER_LEN];
    let mut filled = 0;
    // A single read may return short on pipes or small files; keep going
    // until EOF or the buffer is full.
    loop {
        let n = file.read(&mut header[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
        if filled == header.len() {
            break;
        }
    }
    let truncated = filled == header.len();
    header.truncate(filled);

    let mime = classify(&header, truncated).ok_or_else(|| ConvertError::UnknownMediaType {
        path: path.to_path_buf(),
    })?;
    debug!("Sniffed {} as {}", path.display(), mime);
    Ok(mime)
}

/// Classify a file header, falling back to RTF and plain-text heuristics
/// for the two formats infer has no matcher for. `truncated` means the file
/// continues past the header, so a multi-byte character may be cut mid-way.
fn classify(header: &[u8], truncated: bool) -> Option<String> {
    if let Some(kind) = infer::get(header) {
        return Some(kind.mime_type().to_string());
    }
    if header.starts_with(b"{\\rtf") {
        return Some("application/rtf".to_string());
    }
    if !header.is_empty() && is_text(header, truncated) {
        return Some("text/plain".to_string());
    }
    None
}

/// Is the header valid UTF-8? A truncated header whose only defect is an
/// incomplete trailing sequence (`error_len() == None`) still counts: the
/// cut fell in the middle of a multi-byte character the file completes.
fn is_text(header: &[u8], truncated: bool) -> bool {
    match std::str::from_utf8(header) {
        Ok(_) => true,
        Err(e) => truncated && e.error_len().is_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, bytes: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(bytes).unwrap();
        path
    }

    #[test]
    fn sniffs_png_magic() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "a.png", &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
        assert_eq!(media_type(&path).unwrap(), "image/png");
    }

    #[test]
    fn sniffs_jpeg_magic() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "a.jpg", &[0xFF, 0xD8, 0xFF, 0xE0]);
        assert_eq!(media_type(&path).unwrap(), "image/jpeg");
    }

    #[test]
    fn sniffs_pdf_magic() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "a.pdf", b"%PDF-1.7\n");
        assert_eq!(media_type(&path).unwrap(), "application/pdf");
    }

    #[test]
    fn sniffs_rtf_signature() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "a.rtf", b"{\\rtf1\\ansi hello}");
        assert_eq!(media_type(&path).unwrap(), "application/rtf");
    }

    #[test]
    fn utf8_falls_back_to_text_plain() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "notes.txt", "just some notes\n".as_bytes());
        assert_eq!(media_type(&path).unwrap(), "text/plain");
    }

    #[test]
    fn large_text_file_with_char_straddling_the_header_is_still_text() {
        let dir = TempDir::new().unwrap();
        // 'é' (2 bytes) starts at the last header byte, so the sniffed
        // prefix ends mid-character.
        let mut body = "a".repeat(HEADER_LEN - 1);
        body.push_str("é more text beyond the header");
        let path = write_file(&dir, "big.txt", body.as_bytes());
        assert_eq!(media_type(&path).unwrap(), "text/plain");
    }

    #[test]
    fn invalid_utf8_inside_the_header_is_still_unknown() {
        let dir = TempDir::new().unwrap();
        // The lone lead byte sits well inside the header, so this is a real
        // encoding error, not a sequence cut short by the header boundary.
        let mut body = vec![b'a'; 100];
        body.push(0xC3);
        body.extend_from_slice(&vec![b'a'; HEADER_LEN]);
        let path = write_file(&dir, "broken.txt", &body);
        assert!(matches!(
            media_type(&path),
            Err(ConvertError::UnknownMediaType { .. })
        ));
    }

    #[test]
    fn garbage_is_unknown() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "a.bin", &[0x00, 0xFF, 0xFE, 0x01, 0x80]);
        assert!(matches!(
            media_type(&path),
            Err(ConvertError::UnknownMediaType { .. })
        ));
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.png");
        assert!(matches!(
            media_type(&path),
            Err(ConvertError::FileNotFound { .. })
        ));
    }
}
