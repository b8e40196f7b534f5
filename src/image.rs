//! Image conversion via the `image` crate.
//!
//! The converter decodes the whole source into memory, applies the one fixup
//! this tool owns (JPEG cannot represent an alpha channel, so alpha-carrying
//! sources are flattened to plain RGB before encoding — dropping transparency
//! is the deliberate policy), and re-encodes next to the source with the
//! target extension. The one target the `image` crate cannot encode is PDF;
//! for that the flattened image is embedded as a JPEG stream in a
//! single-page document built with `pdf-writer`.

use crate::converter::{validate_media_type, FileConverter, MediaTypeRule};
use crate::error::ConvertError;
use crate::formats::FormatTable;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Output formats the image converter can produce.
///
/// PIL-style alias pairs map to one canonical extension: "jpeg" and "jpg"
/// both produce a `.jpg` file.
const IMAGE_FORMATS: FormatTable = FormatTable::new(&[
    ("jpeg", ".jpg"),
    ("jpg", ".jpg"),
    ("png", ".png"),
    ("webp", ".webp"),
    ("bmp", ".bmp"),
    ("gif", ".gif"),
    ("pdf", ".pdf"),
]);

/// Converts one image file to other raster formats.
///
/// An instance is bound to the file validated at [`ImageConverter::open`];
/// `convert` may be called repeatedly with different targets.
#[derive(Debug)]
pub struct ImageConverter {
    source: PathBuf,
}

impl ImageConverter {
    /// Bind a converter to `path`, sniffing the file and rejecting anything
    /// whose media type is outside the `image/` family.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConvertError> {
        let source = path.into();
        let mime = validate_media_type(&source, Self::MEDIA_TYPES)?;
        debug!("Opened {} ({})", source.display(), mime);
        Ok(Self { source })
    }

    /// Flatten alpha-carrying color modes to 8-bit RGB. Sources already
    /// without alpha pass through untouched so their pixel values are
    /// preserved exactly.
    fn flatten_alpha(img: DynamicImage) -> DynamicImage {
        if img.color().has_alpha() {
            DynamicImage::ImageRgb8(img.to_rgb8())
        } else {
            img
        }
    }
}

impl FileConverter for ImageConverter {
    const MEDIA_TYPES: MediaTypeRule = MediaTypeRule::Prefix("image/");
    const FORMATS: FormatTable = IMAGE_FORMATS;

    fn source(&self) -> &Path {
        &self.source
    }

    fn convert(&self, target: &str) -> Result<PathBuf, ConvertError> {
        let (token, dot_ext) = Self::FORMATS.resolve_entry(target)?;
        let output = self.source.with_extension(&dot_ext[1..]);
        let img = image::open(&self.source)?;

        if token == "pdf" {
            write_pdf(&img, &output)?;
        } else {
            let format = ImageFormat::from_extension(token).ok_or_else(|| {
                ConvertError::UnsupportedFormat {
                    requested: target.to_string(),
                    supported: Self::FORMATS.tokens().collect::<Vec<_>>().join(", "),
                }
            })?;
            let img = if format == ImageFormat::Jpeg {
                Self::flatten_alpha(img)
            } else {
                img
            };
            img.save_with_format(&output, format)?;
        }

        info!(
            "Converted {} -> {}",
            self.source.display(),
            output.display()
        );
        Ok(output)
    }
}

/// Write `img` as a single-page PDF at `output`, the page sized to the image
/// at 72 dpi. The image is flattened to 8-bit RGB (PDF DeviceRGB, and JPEG
/// cannot carry alpha either) and embedded as a DCT-encoded stream.
fn write_pdf(img: &DynamicImage, output: &Path) -> Result<(), ConvertError> {
    use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect, Ref};

    let flat = DynamicImage::ImageRgb8(img.to_rgb8());
    let mut jpeg = Vec::new();
    flat.write_to(&mut Cursor::new(&mut jpeg), ImageFormat::Jpeg)?;

    let width = flat.width();
    let height = flat.height();

    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let page_id = Ref::new(3);
    let image_id = Ref::new(4);
    let content_id = Ref::new(5);
    let image_name = Name(b"Im0");

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id).kids([page_id]).count(1);

    let mut page = pdf.page(page_id);
    page.media_box(Rect::new(0.0, 0.0, width as f32, height as f32));
    page.parent(page_tree_id);
    page.contents(content_id);
    page.resources().x_objects().pair(image_name, image_id);
    page.finish();

    let mut xobject = pdf.image_xobject(image_id, &jpeg);
    xobject.filter(Filter::DctDecode);
    xobject.width(width as i32);
    xobject.height(height as i32);
    xobject.color_space().device_rgb();
    xobject.bits_per_component(8);
    xobject.finish();

    let mut content = Content::new();
    content.save_state();
    content.transform([width as f32, 0.0, 0.0, height as f32, 0.0, 0.0]);
    content.x_object(image_name);
    content.restore_state();
    pdf.stream(content_id, &content.finish());

    std::fs::write(output, pdf.finish())?;
    Ok(())
}
