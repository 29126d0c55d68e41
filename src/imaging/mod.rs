//! Image processing: pure Rust, no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` (format sniffed from content) |
//! | **Plan strips** | [`calculations::strip_geometry`] (pure math) |
//! | **Cut + encode** | `crop_imm` + JPEG/PNG/WebP encoders |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for strip geometry (unit testable)
//! - **Parameters**: Data structures describing one strip operation
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
pub mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Bitmap, Dimensions, ImageBackend};
pub use calculations::{STRIP_COUNT, StripGeometry, quarter_height, strip_geometry};
pub use operations::{EncodedStrip, plan_split, split_into_strips};
pub use params::{Quality, SliceParams};
pub use rust_backend::RustBackend;
