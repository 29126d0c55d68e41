//! Media types and the re-encoding policy.
//!
//! Every strip is re-encoded in the format of the upload when the encoder
//! supports it, and as PNG otherwise:
//!
//! | Declared type | Encoded as | Quality | Extension |
//! |---|---|---|---|
//! | `image/jpeg`, `image/jpg` | JPEG | maximum (100) | `jpg` |
//! | `image/png` | PNG | lossless | `png` |
//! | `image/webp` | WebP | lossless | `webp` |
//! | any other `image/*` | PNG | lossless | `png` |
//!
//! The extension is derived from the chosen [`OutputFormat`], never from the
//! declared type directly, so a file name can't disagree with its bytes.

use crate::imaging::Quality;
use serde::Serialize;
use std::path::Path;

/// Extension → declared media type, mirroring what a browser puts in `File.type`.
const EXTENSION_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("webp", "image/webp"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
];

/// Lowercased media type without parameters: `"Image/PNG; q=1"` → `"image/png"`.
pub fn essence(media_type: &str) -> String {
    media_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase()
}

/// Whether a declared media type names an image at all.
pub fn is_image(media_type: &str) -> bool {
    essence(media_type).starts_with("image/")
}

/// Declared media type for a path, from its extension.
///
/// Unknown extensions give an empty string, like a browser does for files it
/// can't classify. An empty type is not an image and will be rejected.
pub fn media_type_for_path(path: &Path) -> &'static str {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return "";
    };
    EXTENSION_TYPES
        .iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(ext))
        .map(|(_, media_type)| *media_type)
        .unwrap_or("")
}

/// Formats a strip can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Jpeg,
    Png,
    WebP,
}

impl OutputFormat {
    /// Format chosen for a declared upload type. Unrecognized types fall back to PNG.
    pub fn for_media_type(media_type: &str) -> Self {
        match essence(media_type).as_str() {
            "image/jpeg" | "image/jpg" => OutputFormat::Jpeg,
            "image/webp" => OutputFormat::WebP,
            _ => OutputFormat::Png,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
            OutputFormat::WebP => "webp",
        }
    }

    pub fn media_type(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
            OutputFormat::WebP => "image/webp",
        }
    }

    pub fn image_format(self) -> image::ImageFormat {
        match self {
            OutputFormat::Jpeg => image::ImageFormat::Jpeg,
            OutputFormat::Png => image::ImageFormat::Png,
            OutputFormat::WebP => image::ImageFormat::WebP,
        }
    }
}

/// How one strip gets encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encoding {
    pub format: OutputFormat,
    /// Only lossy formats carry a quality; PNG and WebP are written lossless.
    pub quality: Option<Quality>,
}

impl Encoding {
    pub fn extension(&self) -> &'static str {
        self.format.extension()
    }

    pub fn media_type(&self) -> &'static str {
        self.format.media_type()
    }
}

/// Pick the encoding for every strip of an upload with this declared type.
pub fn encoding_for(media_type: &str, jpeg_quality: Quality) -> Encoding {
    let format = OutputFormat::for_media_type(media_type);
    let quality = match format {
        OutputFormat::Jpeg => Some(jpeg_quality),
        OutputFormat::Png | OutputFormat::WebP => None,
    };
    Encoding { format, quality }
}

/// File extension used when exporting strips of an upload with this declared type.
pub fn extension_for(media_type: &str) -> &'static str {
    OutputFormat::for_media_type(media_type).extension()
}
