//! Turning an upload into a decoded bitmap.
//!
//! The declared media type is checked before any bytes are touched: anything
//! that doesn't claim to be `image/*` is rejected with
//! [`SplitError::InvalidInputKind`]. Decoding itself runs on the blocking pool
//! and resolves as a unit, or fails with an explicit decode error or timeout.

use crate::imaging::{Bitmap, ImageBackend};
use crate::media;
use crate::split::SplitError;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// A file handed in by the host: a selection, a drop, or a path on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: Option<String>,
    /// Declared media type, as the host reported it.
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: Option<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name,
            media_type: media_type.into(),
            bytes,
        }
    }

    /// Read a file from disk, declaring its type from the extension.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned());
        Ok(Self::new(name, media::media_type_for_path(path), bytes))
    }
}

/// A successfully decoded upload.
///
/// Immutable once created; the session drops it on reset or on the next upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    pub name: Option<String>,
    pub media_type: String,
    pub bytes: Arc<[u8]>,
    pub width: u32,
    pub height: u32,
}

/// Output of the decode stage: the upload record plus its transient bitmap.
#[derive(Debug)]
pub struct Decoded {
    pub upload: UploadedImage,
    pub bitmap: Bitmap,
}

/// Reject uploads whose declared type isn't an image.
pub fn check_input_kind(file: &UploadFile) -> Result<(), SplitError> {
    if media::is_image(&file.media_type) {
        Ok(())
    } else {
        Err(SplitError::InvalidInputKind {
            media_type: file.media_type.clone(),
        })
    }
}

/// Decode an upload off the calling task, bounded by `timeout`.
///
/// A decode that times out keeps running on the blocking pool until it
/// finishes; its result is discarded.
pub async fn decode_upload<B>(
    backend: Arc<B>,
    file: UploadFile,
    timeout: Duration,
) -> Result<Decoded, SplitError>
where
    B: ImageBackend + Send + Sync + 'static,
{
    check_input_kind(&file)?;

    let UploadFile {
        name,
        media_type,
        bytes,
    } = file;
    let bytes: Arc<[u8]> = bytes.into();
    let task_bytes = Arc::clone(&bytes);

    let task = tokio::task::spawn_blocking(move || backend.decode(&task_bytes));
    let bitmap = match tokio::time::timeout(timeout, task).await {
        Err(_) => return Err(SplitError::DecodeTimeout(timeout)),
        Ok(Err(join)) => return Err(SplitError::DecodeFailure(join.to_string())),
        Ok(Ok(result)) => result.map_err(|e| SplitError::DecodeFailure(e.to_string()))?,
    };

    let dims = bitmap.dimensions();
    log::info!(
        "decoded {} ({}, {}x{})",
        name.as_deref().unwrap_or("upload"),
        media_type,
        dims.width,
        dims.height
    );

    Ok(Decoded {
        upload: UploadedImage {
            name,
            media_type,
            bytes,
            width: dims.width,
            height: dims.height,
        },
        bitmap,
    })
}
