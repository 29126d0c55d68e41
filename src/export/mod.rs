//! Getting artifacts out of the session: download or share.
//!
//! | Operation | Behaviour |
//! |---|---|
//! | [`Exporter::save_one`] | Persist one artifact as `split-{n}.{ext}` |
//! | [`Exporter::share_one`] | Share one artifact; fall back to a save when sharing is unavailable or fails |
//! | [`Exporter::save_all`] | `save_one` over every artifact, paced |
//! | [`Exporter::share_all`] | `share_one` over every artifact, paced |
//!
//! For each share the exporter picks an [`ExportStrategy`] from the host's
//! capability checks, evaluated once per call. A cancelled share is not an
//! error and never falls back.

pub mod host;
pub mod queue;

use crate::artifact::SplitArtifact;
pub use host::{DirectoryHost, ExportFile, ExportHost, ShareError};
pub use queue::{DEFAULT_PACING_DELAY, PacedQueue};
use serde::Serialize;
use std::future::ready;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Could not save {name}: {source}")]
    Save {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// How one artifact is going to leave the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStrategy {
    NativeShare,
    DirectDownload,
}

impl ExportStrategy {
    /// Share only when the host has a share surface that takes this file.
    pub fn select(host: &impl ExportHost, file: &ExportFile<'_>) -> Self {
        if host.share_capability() && host.can_share(file) {
            ExportStrategy::NativeShare
        } else {
            ExportStrategy::DirectDownload
        }
    }
}

/// What actually happened to one artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportOutcome {
    Saved,
    Shared,
    /// The user dismissed the share surface; nothing was saved.
    Cancelled,
    /// Sharing failed and the artifact was saved instead.
    FellBack,
}

fn export_file<'a>(artifact: &'a SplitArtifact, name: &'a str) -> ExportFile<'a> {
    ExportFile {
        name,
        media_type: artifact.media_type,
        bytes: &artifact.bytes,
    }
}

/// Exports artifacts into a host, one at a time or as a paced batch.
pub struct Exporter<H> {
    host: H,
    queue: PacedQueue,
}

impl<H: ExportHost> Exporter<H> {
    pub fn new(host: H) -> Self {
        Self::with_queue(host, PacedQueue::default())
    }

    pub fn with_queue(host: H, queue: PacedQueue) -> Self {
        Self { host, queue }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    fn save_file(&self, file: &ExportFile<'_>) -> Result<(), ExportError> {
        self.host.save(file).map_err(|source| ExportError::Save {
            name: file.name.to_string(),
            source,
        })
    }

    pub fn save_one(&self, artifact: &SplitArtifact) -> Result<ExportOutcome, ExportError> {
        let name = artifact.file_name();
        self.save_file(&export_file(artifact, &name))?;
        Ok(ExportOutcome::Saved)
    }

    pub async fn share_one(&self, artifact: &SplitArtifact) -> Result<ExportOutcome, ExportError> {
        let name = artifact.file_name();
        let file = export_file(artifact, &name);

        match ExportStrategy::select(&self.host, &file) {
            ExportStrategy::DirectDownload => {
                log::debug!("no share surface for {}, saving", name);
                self.save_file(&file)?;
                Ok(ExportOutcome::Saved)
            }
            ExportStrategy::NativeShare => {
                match self.host.share(&file, &artifact.share_title()).await {
                    Ok(()) => Ok(ExportOutcome::Shared),
                    Err(ShareError::Cancelled) => {
                        log::debug!("share of {} cancelled", name);
                        Ok(ExportOutcome::Cancelled)
                    }
                    Err(ShareError::Failed(reason)) => {
                        log::warn!("share of {} failed ({}), saving instead", name, reason);
                        self.save_file(&file)?;
                        Ok(ExportOutcome::FellBack)
                    }
                }
            }
        }
    }

    pub async fn save_all(
        &self,
        artifacts: &[SplitArtifact],
    ) -> Result<Vec<ExportOutcome>, ExportError> {
        self.queue
            .run(artifacts, move |artifact| ready(self.save_one(artifact)))
            .await
    }

    pub async fn share_all(
        &self,
        artifacts: &[SplitArtifact],
    ) -> Result<Vec<ExportOutcome>, ExportError> {
        self.queue
            .run(artifacts, move |artifact| self.share_one(artifact))
            .await
    }
}
