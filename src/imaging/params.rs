//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the high-level [`operations`](super::operations) module
//! (which plans the strips) and the [`backend`](super::backend) (which does
//! the pixel work). Keeping them apart lets tests swap in a mock backend
//! without changing the planning logic.
//!
//! ## Types
//!
//! - [`Quality`]: lossy encoding quality (1–100, default 100). Clamped on construction.
//! - [`SliceParams`]: one strip: its geometry, the source width, and how to encode it.

use super::calculations::StripGeometry;
use crate::media::Encoding;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    /// Highest quality the encoder accepts, the equivalent of a `1.0` quality factor.
    pub fn max() -> Self {
        Self(100)
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self::max()
    }
}

/// Parameters for cutting and encoding one strip.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceParams {
    pub geometry: StripGeometry,
    /// Full source width; strips are never narrower than the source.
    pub width: u32,
    pub encoding: Encoding,
}

impl SliceParams {
    pub fn index(&self) -> usize {
        self.geometry.index
    }
}
