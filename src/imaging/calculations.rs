//! Pure calculation functions for strip geometry.
//!
//! All functions here are pure and testable without any I/O or images.
//!
//! The quarter height is an exact real-valued division of the source height.
//! Boundaries are `i * quarter_height` and are never rounded. Turning them into
//! whole pixel rows follows canvas semantics: a surface's height and a source
//! row offset are both truncated toward zero. For a height that isn't a multiple
//! of four this leaves up to three source rows uncovered at the bottom:
//!
//! ```text
//! H = 199, quarter = 49.75
//! strip 0: top  0.00 → rows   0..49
//! strip 1: top 49.75 → rows  49..98
//! strip 2: top 99.50 → rows  99..148
//! strip 3: top 149.25 → rows 149..198   (row 198 not covered)
//! ```

use serde::Serialize;

/// Number of strips every split produces.
pub const STRIP_COUNT: usize = 4;

/// Height of one strip, as an exact real value.
pub fn quarter_height(height: u32) -> f64 {
    height as f64 / STRIP_COUNT as f64
}

/// Where one strip sits in the source image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StripGeometry {
    /// Ordinal position, 0 = topmost.
    pub index: usize,
    /// Vertical offset into the source, `index * quarter_height`.
    pub top: f64,
    /// Drawn height, always the quarter height.
    pub height: f64,
}

impl StripGeometry {
    /// First source row copied into this strip.
    pub fn pixel_top(&self) -> u32 {
        self.top as u32
    }

    /// Height of the strip's surface in whole pixels.
    pub fn pixel_height(&self) -> u32 {
        self.height as u32
    }

    /// Source rows covered, as a half-open range.
    pub fn pixel_rows(&self) -> std::ops::Range<u32> {
        let top = self.pixel_top();
        top..top + self.pixel_height()
    }
}

/// Geometry of the four strips of a source `height` pixels tall, top to bottom.
pub fn strip_geometry(height: u32) -> [StripGeometry; STRIP_COUNT] {
    let quarter = quarter_height(height);
    std::array::from_fn(|index| StripGeometry {
        index,
        top: index as f64 * quarter,
        height: quarter,
    })
}
