//! Integration tests over the public fileconv API.
//!
//! Image fixtures are generated in-test with the `image` crate, so the tests
//! need no checked-in binary files. Document tests run against a converter
//! configured with a bad soffice path, which makes the degraded-capability
//! behaviour deterministic regardless of what is installed on the machine.

use fileconv::{
    media_type, ConvertError, DocumentConfig, DocumentConverter, FileConverter, ImageConverter,
    MediaTypeRule,
};
use image::{Rgb, RgbImage, Rgba, RgbaImage};
use std::path::PathBuf;
use tempfile::TempDir;

fn rgba_png(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    RgbaImage::from_fn(8, 8, |x, y| Rgba([x as u8 * 30, y as u8 * 30, 60, 128]))
        .save(&path)
        .unwrap();
    path
}

// ── End-to-end image conversion ──────────────────────────────────────────────

#[test]
fn every_image_target_gets_its_canonical_suffix() {
    let dir = TempDir::new().unwrap();
    let source = rgba_png(&dir, "photo.png");
    let converter = ImageConverter::open(&source).unwrap();

    for (token, suffix) in [
        ("jpeg", "jpg"),
        ("jpg", "jpg"),
        ("png", "png"),
        ("webp", "webp"),
        ("bmp", "bmp"),
        ("gif", "gif"),
        ("pdf", "pdf"),
    ] {
        let output = converter.convert(token).unwrap();
        assert_eq!(
            output.extension().and_then(|e| e.to_str()),
            Some(suffix),
            "token {token}"
        );
        assert!(output.exists(), "token {token}");
    }
}

#[test]
fn lossless_round_trip_preserves_pixels() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("grid.png");
    let source = RgbImage::from_fn(8, 8, |x, y| Rgb([x as u8 * 31, y as u8 * 31, 7]));
    source.save(&path).unwrap();

    let converter = ImageConverter::open(&path).unwrap();
    let output = converter.convert("bmp").unwrap();
    let decoded = image::open(&output).unwrap().to_rgb8();
    assert_eq!(decoded, source);
}

#[test]
fn jpg_output_sniffs_as_jpeg() {
    let dir = TempDir::new().unwrap();
    let source = rgba_png(&dir, "photo.png");
    let output = ImageConverter::open(&source).unwrap().convert("jpg").unwrap();

    assert_eq!(output, dir.path().join("photo.jpg"));
    assert_eq!(media_type(&output).unwrap(), "image/jpeg");
    assert!(!image::open(&output).unwrap().color().has_alpha());
}

#[test]
fn mislabelled_file_is_rejected_by_content_not_name() {
    let dir = TempDir::new().unwrap();
    // A text file wearing a .png suffix.
    let path = dir.path().join("fake.png");
    std::fs::write(&path, "definitely text\n").unwrap();

    let err = ImageConverter::open(&path).unwrap_err();
    assert!(matches!(err, ConvertError::UnsupportedMediaType { .. }));
}

#[test]
fn unknown_target_reports_the_full_menu() {
    let dir = TempDir::new().unwrap();
    let source = rgba_png(&dir, "photo.png");
    let err = ImageConverter::open(&source)
        .unwrap()
        .convert("tiff")
        .unwrap_err();

    let msg = err.to_string();
    for token in ["jpeg", "jpg", "png", "webp", "bmp", "gif", "pdf"] {
        assert!(msg.contains(token), "missing {token} in: {msg}");
    }
}

#[test]
fn image_to_pdf_round_trips_through_the_document_allow_list() {
    let dir = TempDir::new().unwrap();
    let source = rgba_png(&dir, "feather.png");
    let output = ImageConverter::open(&source)
        .unwrap()
        .convert("pdf")
        .unwrap();

    assert_eq!(output, dir.path().join("feather.pdf"));
    assert_eq!(media_type(&output).unwrap(), "application/pdf");
    // The produced PDF is itself a valid document-converter input.
    let config = DocumentConfig {
        soffice_path: Some(PathBuf::from("/no/such/soffice")),
    };
    assert!(DocumentConverter::open_with(&output, &config).is_ok());
}

#[test]
fn large_plain_text_is_accepted_by_the_document_converter() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("big.txt");
    // Larger than the sniff header, with a multi-byte character straddling
    // the header boundary.
    let mut body = "a".repeat(8191);
    body.push_str("é and plenty more text after the boundary\n");
    std::fs::write(&path, body).unwrap();

    assert_eq!(media_type(&path).unwrap(), "text/plain");
    let config = DocumentConfig {
        soffice_path: Some(PathBuf::from("/no/such/soffice")),
    };
    assert!(DocumentConverter::open_with(&path, &config).is_ok());
}

// ── Document converter, degraded capability ──────────────────────────────────

#[test]
fn document_converter_survives_missing_soffice() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "some notes\n").unwrap();

    let config = DocumentConfig {
        soffice_path: Some(PathBuf::from("/no/such/soffice")),
    };
    let converter = DocumentConverter::open_with(&path, &config).unwrap();
    assert!(!converter.is_available());

    let err = converter.convert("pdf").unwrap_err();
    assert!(matches!(err, ConvertError::ConverterUnavailable { .. }));
    assert!(err.to_string().contains("soffice"));
}

// ── Converter allow-lists ────────────────────────────────────────────────────

#[test]
fn image_allow_list_is_a_family_prefix() {
    match ImageConverter::MEDIA_TYPES {
        MediaTypeRule::Prefix(prefix) => assert_eq!(prefix, "image/"),
        MediaTypeRule::OneOf(_) => panic!("image converter should prefix-match"),
    }
}

#[test]
fn document_allow_list_enumerates_ten_exact_types() {
    match DocumentConverter::MEDIA_TYPES {
        MediaTypeRule::OneOf(list) => {
            assert_eq!(list.len(), 10);
            assert!(list.contains(&"text/plain"));
            assert!(list.contains(&"application/rtf"));
            assert!(list.contains(&"application/pdf"));
        }
        MediaTypeRule::Prefix(_) => panic!("document converter should exact-match"),
    }
}
