//! # Simple Split
//!
//! Cuts one image into four equal horizontal strips and gets them out again:
//! saved to disk, or handed to a share surface with a save as fallback.
//!
//! # Architecture: Upload → Split → Export
//!
//! ```text
//! 1. Upload   UploadFile   →  Decoded        (type check, decode with timeout)
//! 2. Split    Bitmap       →  SplitSet       (4 strips, re-encoded in parallel)
//! 3. Export   SplitSet     →  host           (save or share, paced as a batch)
//! ```
//!
//! A [`session::Session`] owns the result of the last successful split. The
//! [`export::Exporter`] reads from it but never changes it, so any number of
//! exports can follow one split.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`session`] | Session state (`Empty` / `Uploading` / `Split`) and its transitions |
//! | [`decode`] | Upload records, input-kind check, decoding off the async runtime |
//! | [`split`] | The decode → slice → encode pipeline and its error type |
//! | [`imaging`] | Strip geometry, the backend trait, and the `image`-crate backend |
//! | [`media`] | Media types, extensions, and which format a strip is written in |
//! | [`artifact`] | Encoded strips as exportable, named artifacts |
//! | [`export`] | Export hosts, strategy selection with fallback, paced batches |
//! | [`config`] | `config.toml` loading, validation, and merging over stock defaults |
//! | [`output`] | CLI output formatting for split and inspect |
//! | [`runtime`] | The CLI's async runtime, shut down without waiting on stalled decodes |
//!
//! # Design Decisions
//!
//! ## Real-Valued Strip Boundaries
//!
//! The quarter height is `H / 4` as a real number and boundaries are never
//! rounded. Pixel rows follow canvas semantics (truncation), which for heights
//! that aren't a multiple of four can leave the bottom rows of the source
//! outside every strip. See [`imaging::calculations`].
//!
//! ## Output Format Follows the Source
//!
//! JPEG sources produce JPEG strips and WebP sources produce lossless WebP
//! strips. Every other image type produces PNG, and the exported extension
//! always matches the bytes that were actually written.
//!
//! ## All-or-Nothing Splits
//!
//! The four artifacts of a split are produced together and committed together.
//! A failed upload never leaves a partial set behind; the previous split, if
//! any, stays as it was.
//!
//! ## Share With Fallback
//!
//! Sharing is best-effort. When the host can't share a file, or the share
//! attempt fails, the file is saved instead. Only a user cancel ends an export
//! without a file.

pub mod artifact;
pub mod config;
pub mod decode;
pub mod export;
pub mod imaging;
pub mod media;
pub mod output;
pub mod runtime;
pub mod session;
pub mod split;

#[cfg(test)]
pub(crate) mod test_helpers;
