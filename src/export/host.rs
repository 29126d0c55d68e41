//! Host environments an artifact can be exported into.
//!
//! A host offers two mechanisms: persisting a file under a name (download),
//! and handing a file to a share surface. The share surface is optional and
//! guarded by capability checks, which is what lets the exporter fall back.

use crate::media;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use thiserror::Error;
use tokio::process::Command;

/// Exit status of a share command that was interrupted by the user.
pub const SHARE_CANCELLED_STATUS: i32 = 130;

/// Environment variable carrying the share title to a share command.
pub const SHARE_TITLE_ENV: &str = "SIMPLE_SPLIT_SHARE_TITLE";

/// Prefix of the per-share staging directories.
const STAGING_PREFIX: &str = "simple-split-share-";

/// A file offered to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportFile<'a> {
    pub name: &'a str,
    pub media_type: &'a str,
    pub bytes: &'a [u8],
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShareError {
    /// The user dismissed the share surface.
    #[error("share cancelled")]
    Cancelled,
    #[error("share failed: {0}")]
    Failed(String),
}

/// What a host environment can do with a file.
pub trait ExportHost {
    /// Persist `file` to local storage under its name.
    fn save(&self, file: &ExportFile<'_>) -> std::io::Result<()>;

    /// Whether a share surface exists at all.
    fn share_capability(&self) -> bool;

    /// Whether the share surface accepts this particular file.
    fn can_share(&self, file: &ExportFile<'_>) -> bool;

    /// Offer `file` through the share surface.
    fn share(
        &self,
        file: &ExportFile<'_>,
        title: &str,
    ) -> impl Future<Output = Result<(), ShareError>>;
}

/// Host that downloads into a directory and optionally shares through a command.
///
/// Sharing writes the file into a fresh private staging directory and runs the
/// configured argv with the staged path appended. The directory is removed once
/// the command exits. Exit status 0 means shared, 130 means the user backed
/// out, anything else is a failure.
#[derive(Debug, Clone)]
pub struct DirectoryHost {
    out_dir: PathBuf,
    staging_root: Option<PathBuf>,
    share_command: Option<Vec<String>>,
}

impl DirectoryHost {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            staging_root: None,
            share_command: None,
        }
    }

    pub fn with_share_command(mut self, command: Vec<String>) -> Self {
        self.share_command = Some(command).filter(|c| !c.is_empty());
        self
    }

    /// Create staging directories under `root` instead of the system temp dir.
    pub fn with_staging_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.staging_root = Some(root.into());
        self
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Where a saved file with this name ends up.
    pub fn saved_path(&self, name: &str) -> PathBuf {
        self.out_dir.join(name)
    }

    fn staging_dir(&self) -> std::io::Result<TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(STAGING_PREFIX);
        match &self.staging_root {
            Some(root) => {
                std::fs::create_dir_all(root)?;
                builder.tempdir_in(root)
            }
            None => builder.tempdir(),
        }
    }
}

impl ExportHost for DirectoryHost {
    fn save(&self, file: &ExportFile<'_>) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.out_dir)?;
        let path = self.saved_path(file.name);
        std::fs::write(&path, file.bytes)?;
        log::info!("saved {} ({} bytes)", path.display(), file.bytes.len());
        Ok(())
    }

    fn share_capability(&self) -> bool {
        self.share_command.is_some()
    }

    fn can_share(&self, file: &ExportFile<'_>) -> bool {
        !file.bytes.is_empty() && media::is_image(file.media_type)
    }

    async fn share(&self, file: &ExportFile<'_>, title: &str) -> Result<(), ShareError> {
        let Some((program, args)) = self.share_command.as_ref().and_then(|c| c.split_first())
        else {
            return Err(ShareError::Failed("no share command configured".into()));
        };

        let staging = self
            .staging_dir()
            .map_err(|e| ShareError::Failed(format!("could not create staging dir: {}", e)))?;
        let staged = staging.path().join(file.name);
        std::fs::write(&staged, file.bytes).map_err(|e| ShareError::Failed(e.to_string()))?;

        let status = Command::new(program)
            .args(args)
            .arg(&staged)
            .env(SHARE_TITLE_ENV, title)
            .status()
            .await
            .map_err(|e| ShareError::Failed(format!("could not run {}: {}", program, e)))?;

        if let Err(e) = staging.close() {
            log::warn!("could not remove staged copy of {}: {}", file.name, e);
        }

        match status.code() {
            Some(0) => Ok(()),
            Some(SHARE_CANCELLED_STATUS) => Err(ShareError::Cancelled),
            _ => Err(ShareError::Failed(format!("{} exited with {}", program, status))),
        }
    }
}
