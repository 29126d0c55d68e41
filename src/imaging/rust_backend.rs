//! Pure Rust image processing backend.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, WebP, GIF, BMP, TIFF) | `image::ImageReader` with content sniffing |
//! | Strip cut | `DynamicImage::crop_imm` (1:1 copy, no resampling) |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` at the planned quality |
//! | Encode → PNG | `image::codecs::png::PngEncoder` |
//! | Encode → WebP | `image::codecs::webp::WebPEncoder` (lossless) |
//!
//! Strips are encoded from 8-bit RGBA, the pixel format of a drawing canvas.
//! JPEG has no alpha channel, so JPEG strips drop it.

use super::backend::{BackendError, Bitmap, ImageBackend};
use super::params::SliceParams;
use crate::media::{Encoding, OutputFormat};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{DynamicImage, ImageReader};
use std::io::Cursor;

/// Pure Rust backend using the `image` crate.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a surface into an in-memory buffer.
fn encode(surface: &DynamicImage, encoding: &Encoding) -> Result<Vec<u8>, BackendError> {
    let mut buffer = Vec::new();
    let result = match encoding.format {
        OutputFormat::Jpeg => {
            let quality = encoding.quality.unwrap_or_default().value() as u8;
            let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
            DynamicImage::ImageRgb8(surface.to_rgb8()).write_with_encoder(encoder)
        }
        OutputFormat::Png => DynamicImage::ImageRgba8(surface.to_rgba8())
            .write_with_encoder(PngEncoder::new(&mut buffer)),
        OutputFormat::WebP => DynamicImage::ImageRgba8(surface.to_rgba8())
            .write_with_encoder(WebPEncoder::new_lossless(&mut buffer)),
    };
    result.map_err(|e| {
        BackendError::EncodeFailed(format!(
            "{} encode of {}x{} surface failed: {}",
            encoding.media_type(),
            surface.width(),
            surface.height(),
            e
        ))
    })?;
    Ok(buffer)
}

impl ImageBackend for RustBackend {
    fn decode(&self, bytes: &[u8]) -> Result<Bitmap, BackendError> {
        let image = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(BackendError::Io)?
            .decode()
            .map_err(|e| BackendError::DecodeFailed(e.to_string()))?;
        Ok(Bitmap::new(image))
    }

    fn slice(&self, bitmap: &Bitmap, params: &SliceParams) -> Result<Vec<u8>, BackendError> {
        let strip = bitmap.image().crop_imm(
            0,
            params.geometry.pixel_top(),
            params.width,
            params.geometry.pixel_height(),
        );
        encode(&strip, &params.encoding)
    }
}
