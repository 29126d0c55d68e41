//! Shared test utilities for the simple-split test suite.
//!
//! Provides synthetic images whose pixels encode their own coordinates, so a
//! strip can be checked row-for-row against its source, and ready-made
//! artifact sets for exporter tests.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let image = row_marked_image(16, 40);
//! let png = encode_fixture(&image, ImageFormat::Png);
//!
//! let artifacts = fake_artifacts("image/jpeg");
//! assert_eq!(artifacts[0].file_name(), "split-1.jpg");
//! ```

use crate::artifact::SplitArtifact;
use crate::imaging::STRIP_COUNT;
use crate::media::OutputFormat;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

// =========================================================================
// Fixture images
// =========================================================================

/// An RGBA image where pixel `(x, y)` is `[y, x, 128, 255]` (wrapping at 256).
///
/// Any row of a strip can be traced back to its source row by its red channel.
pub fn row_marked_image(width: u32, height: u32) -> DynamicImage {
    let buffer = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(y % 256) as u8, (x % 256) as u8, 128, 255])
    });
    DynamicImage::ImageRgba8(buffer)
}

/// Encode a fixture image into `format`. JPEG drops the alpha channel first.
pub fn encode_fixture(image: &DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(image.to_rgb8())
            .write_to(&mut buf, format)
            .unwrap(),
        _ => image.write_to(&mut buf, format).unwrap(),
    }
    buf.into_inner()
}

// =========================================================================
// Artifacts
// =========================================================================

/// Four artifacts as a split of a `media_type` upload would produce them.
///
/// Bytes are placeholders; only names, types and order are meaningful.
pub fn fake_artifacts(media_type: &str) -> Vec<SplitArtifact> {
    let format = OutputFormat::for_media_type(media_type);
    (0..STRIP_COUNT)
        .map(|index| SplitArtifact {
            index,
            media_type: format.media_type(),
            extension: format.extension(),
            width: 100,
            height: 25,
            bytes: format!("strip-{index}").into_bytes(),
        })
        .collect()
}

#[test]
fn row_marked_image_encodes_coordinates() {
    let image = row_marked_image(4, 300).to_rgba8();
    assert_eq!(image.get_pixel(3, 2).0, [2, 3, 128, 255]);
    assert_eq!(image.get_pixel(0, 257).0, [1, 0, 128, 255]);
}

#[test]
fn fake_artifacts_are_ordered() {
    let names: Vec<String> = fake_artifacts("image/png")
        .iter()
        .map(SplitArtifact::file_name)
        .collect();
    assert_eq!(
        names,
        vec!["split-1.png", "split-2.png", "split-3.png", "split-4.png"]
    );
}
