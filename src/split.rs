//! The split pipeline: decode → slice → re-encode.
//!
//! Two stages, each on the blocking pool:
//!
//! ```text
//! UploadFile ──decode (timeout)──▶ Decoded { upload, bitmap }
//!            ──slice + encode───▶ (UploadedImage, SplitSet)
//! ```
//!
//! The bitmap is moved into the second stage and dropped when it ends, so it
//! never outlives one decode episode.

use crate::artifact::SplitSet;
use crate::decode::{UploadFile, UploadedImage, decode_upload};
use crate::imaging::{ImageBackend, Quality, split_into_strips};
use crate::media;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Decode timeout used when nothing else is configured.
pub const DEFAULT_DECODE_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum SplitError {
    #[error("Not an image file (declared type: {media_type:?})")]
    InvalidInputKind { media_type: String },
    #[error("Could not decode image: {0}")]
    DecodeFailure(String),
    #[error("Decoding did not finish within {0:?}")]
    DecodeTimeout(Duration),
    #[error("Could not encode strip: {0}")]
    EncodeFailure(String),
}

/// Tunables for one split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitSettings {
    /// Quality for JPEG strips.
    pub jpeg_quality: Quality,
    pub decode_timeout: Duration,
}

impl Default for SplitSettings {
    fn default() -> Self {
        Self {
            jpeg_quality: Quality::max(),
            decode_timeout: DEFAULT_DECODE_TIMEOUT,
        }
    }
}

/// Run the whole pipeline for one upload.
pub async fn split_upload<B>(
    backend: Arc<B>,
    file: UploadFile,
    settings: &SplitSettings,
) -> Result<(UploadedImage, SplitSet), SplitError>
where
    B: ImageBackend + Send + Sync + 'static,
{
    let decoded = decode_upload(Arc::clone(&backend), file, settings.decode_timeout).await?;
    let encoding = media::encoding_for(&decoded.upload.media_type, settings.jpeg_quality);
    let bitmap = decoded.bitmap;

    let strips = tokio::task::spawn_blocking(move || {
        split_into_strips(backend.as_ref(), &bitmap, encoding)
    })
    .await
    .map_err(|join| SplitError::EncodeFailure(join.to_string()))?
    .map_err(|e| SplitError::EncodeFailure(e.to_string()))?;

    log::info!(
        "split into 4 {} strips of {}x{}",
        encoding.media_type(),
        strips[0].width,
        strips[0].height
    );

    Ok((decoded.upload, SplitSet::from_strips(strips)))
}
