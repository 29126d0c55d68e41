//! High-level image operations.
//!
//! These functions combine calculations with backend execution: they plan the
//! four strips from the source dimensions, then have the backend cut and
//! encode each one.

use super::backend::{BackendError, Bitmap, Dimensions, ImageBackend};
use super::calculations::{STRIP_COUNT, strip_geometry};
use super::params::SliceParams;
use crate::media::Encoding;
use rayon::prelude::*;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// One encoded strip, straight out of the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedStrip {
    pub index: usize,
    pub width: u32,
    pub height: u32,
    pub encoding: Encoding,
    pub bytes: Vec<u8>,
}

/// Plan the four strips of a source without doing any pixel work.
pub fn plan_split(source: Dimensions, encoding: Encoding) -> [SliceParams; STRIP_COUNT] {
    strip_geometry(source.height).map(|geometry| SliceParams {
        geometry,
        width: source.width,
        encoding,
    })
}

/// Cut `bitmap` into four strips and encode each one.
///
/// Strips are encoded in parallel; the result is always in top-to-bottom
/// order. Degenerate surfaces are not special-cased: if the encoder can't
/// handle a zero-sized strip, its error comes back unchanged.
pub fn split_into_strips(
    backend: &impl ImageBackend,
    bitmap: &Bitmap,
    encoding: Encoding,
) -> Result<[EncodedStrip; STRIP_COUNT]> {
    let plan = plan_split(bitmap.dimensions(), encoding);

    let strips: Vec<EncodedStrip> = plan
        .par_iter()
        .map(|params| -> Result<EncodedStrip> {
            let bytes = backend.slice(bitmap, params)?;
            log::debug!(
                "strip {} encoded: rows {:?}, {} bytes",
                params.index(),
                params.geometry.pixel_rows(),
                bytes.len()
            );
            Ok(EncodedStrip {
                index: params.index(),
                width: params.width,
                height: params.geometry.pixel_height(),
                encoding: params.encoding,
                bytes,
            })
        })
        .collect::<Result<_>>()?;

    strips.try_into().map_err(|strips: Vec<EncodedStrip>| {
        BackendError::EncodeFailed(format!(
            "expected {} strips, got {}",
            STRIP_COUNT,
            strips.len()
        ))
    })
}
