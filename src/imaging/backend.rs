//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations every backend must
//! support: decode an upload into a [`Bitmap`], and cut plus encode one strip
//! of that bitmap.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), pure Rust, built on the
//! `image` crate. Tests use the recording `MockBackend` below.

use super::params::SliceParams;
use image::{DynamicImage, GenericImageView};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Decode failed: {0}")]
    DecodeFailed(String),
    #[error("Encode failed: {0}")]
    EncodeFailed(String),
}

/// Pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// A decoded pixel surface.
///
/// Lives for one decode episode: the splitter borrows it while cutting strips
/// and drops it afterwards. It is never stored in the session.
#[derive(Debug, Clone)]
pub struct Bitmap {
    image: DynamicImage,
}

impl Bitmap {
    pub fn new(image: DynamicImage) -> Self {
        Self { image }
    }

    pub fn dimensions(&self) -> Dimensions {
        let (width, height) = self.image.dimensions();
        Dimensions { width, height }
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }
}

/// Trait for image processing backends.
///
/// `Sync` because the four strips of one split are encoded in parallel.
pub trait ImageBackend: Sync {
    /// Decode raw upload bytes. The format is sniffed from the content.
    fn decode(&self, bytes: &[u8]) -> Result<Bitmap, BackendError>;

    /// Copy one strip 1:1 out of `bitmap` and encode it.
    fn slice(&self, bitmap: &Bitmap, params: &SliceParams) -> Result<Vec<u8>, BackendError>;
}
