//! Session state and its transitions.
//!
//! ```text
//!            upload                 split ok
//! Empty ───────────▶ Uploading ───────────────▶ Split
//!   ▲                  │  ▲                       │
//!   │     failure      │  │       new upload      │
//!   └──(nothing held)──┘  └───────────────────────┤
//!   ▲                                             │
//!   └──────────────────── reset ──────────────────┘
//! ```
//!
//! The upload and its four artifacts are held together in one value, so a
//! session either has both or neither. A new upload replaces the pair with a
//! single assignment when it succeeds; until then the previous split stays
//! visible to the exporter, and a failed upload leaves it untouched.
//! A rejected file type never leaves `Empty`/`Split` at all.

use crate::artifact::{SplitArtifact, SplitSet};
use crate::decode::{UploadFile, UploadedImage, check_input_kind};
use crate::imaging::ImageBackend;
use crate::split::{SplitError, SplitSettings, split_upload};
use std::sync::Arc;

/// Coarse state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Empty,
    Uploading,
    Split,
}

#[derive(Debug, Clone, PartialEq)]
struct Completed {
    upload: UploadedImage,
    artifacts: SplitSet,
}

/// Everything a session holds between user actions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    completed: Option<Completed>,
    uploading: bool,
    drag_active: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        match (self.uploading, &self.completed) {
            (true, _) => Phase::Uploading,
            (false, Some(_)) => Phase::Split,
            (false, None) => Phase::Empty,
        }
    }

    pub fn current_upload(&self) -> Option<&UploadedImage> {
        self.completed.as_ref().map(|c| &c.upload)
    }

    /// The artifacts of the last completed split: empty, or exactly four.
    pub fn artifacts(&self) -> &[SplitArtifact] {
        self.completed
            .as_ref()
            .map(|c| c.artifacts.as_slice())
            .unwrap_or(&[])
    }

    pub fn artifact_set(&self) -> Option<&SplitSet> {
        self.completed.as_ref().map(|c| &c.artifacts)
    }

    pub fn is_drag_active(&self) -> bool {
        self.drag_active
    }

    pub fn set_drag_active(&mut self, active: bool) {
        self.drag_active = active;
    }

    pub fn begin_upload(&mut self) {
        self.uploading = true;
    }

    /// Swap in a finished split, replacing any previous one.
    pub fn commit(&mut self, upload: UploadedImage, artifacts: SplitSet) -> &SplitSet {
        self.uploading = false;
        &self.completed.insert(Completed { upload, artifacts }).artifacts
    }

    /// Give up on an in-flight upload; whatever was committed before stays.
    pub fn abort_upload(&mut self) {
        self.uploading = false;
    }

    /// Drop the upload and its artifacts.
    pub fn reset(&mut self) {
        self.completed = None;
        self.uploading = false;
        self.drag_active = false;
    }
}

/// A session driving uploads through a backend.
pub struct Session<B> {
    backend: Arc<B>,
    settings: SplitSettings,
    state: SessionState,
}

impl<B> Session<B>
where
    B: ImageBackend + Send + Sync + 'static,
{
    pub fn new(backend: Arc<B>, settings: SplitSettings) -> Self {
        Self {
            backend,
            settings,
            state: SessionState::new(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn artifacts(&self) -> &[SplitArtifact] {
        self.state.artifacts()
    }

    pub fn set_drag_active(&mut self, active: bool) {
        self.state.set_drag_active(active);
    }

    /// Decode and split `file`, replacing the current split on success.
    pub async fn upload(&mut self, file: UploadFile) -> Result<&SplitSet, SplitError> {
        check_input_kind(&file)?;
        self.state.set_drag_active(false);
        self.state.begin_upload();

        match split_upload(Arc::clone(&self.backend), file, &self.settings).await {
            Ok((upload, artifacts)) => Ok(self.state.commit(upload, artifacts)),
            Err(e) => {
                log::warn!("upload failed: {}", e);
                self.state.abort_upload();
                Err(e)
            }
        }
    }

    pub fn reset(&mut self) {
        self.state.reset();
    }
}
