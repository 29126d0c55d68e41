//! Split artifacts: the encoded strips a session hands to the exporter.

use crate::imaging::{EncodedStrip, STRIP_COUNT};
use serde::Serialize;
use sha2::{Digest, Sha256};

/// One encoded strip, ready for export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitArtifact {
    /// 0-based position, 0 = topmost.
    pub index: usize,
    pub media_type: &'static str,
    pub extension: &'static str,
    pub width: u32,
    pub height: u32,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl SplitArtifact {
    /// Exported file name, `split-{n}.{ext}` with a 1-based `n`.
    pub fn file_name(&self) -> String {
        format!("split-{}.{}", self.index + 1, self.extension)
    }

    /// Human-readable title offered alongside a shared file.
    pub fn share_title(&self) -> String {
        format!("Split image {}", self.index + 1)
    }

    /// SHA-256 of the encoded bytes, as a hex string.
    pub fn digest(&self) -> String {
        Sha256::digest(&self.bytes)
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect()
    }
}

impl From<EncodedStrip> for SplitArtifact {
    fn from(strip: EncodedStrip) -> Self {
        Self {
            index: strip.index,
            media_type: strip.encoding.media_type(),
            extension: strip.encoding.extension(),
            width: strip.width,
            height: strip.height,
            bytes: strip.bytes,
        }
    }
}

/// The four artifacts of one completed split, in ordinal order.
///
/// A set is either complete or absent; there is no way to hold a partial one.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitSet([SplitArtifact; STRIP_COUNT]);

impl SplitSet {
    pub fn from_strips(strips: [EncodedStrip; STRIP_COUNT]) -> Self {
        Self(strips.map(SplitArtifact::from))
    }

    pub fn as_slice(&self) -> &[SplitArtifact] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SplitArtifact> {
        self.0.iter()
    }

    pub fn get(&self, index: usize) -> Option<&SplitArtifact> {
        self.0.get(index)
    }
}

impl<'a> IntoIterator for &'a SplitSet {
    type Item = &'a SplitArtifact;
    type IntoIter = std::slice::Iter<'a, SplitArtifact>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
