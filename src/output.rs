//! CLI output formatting for the split and inspect commands.
//!
//! # Information-First Display
//!
//! Every strip is shown by its position and exported name first, with the
//! source rows it was cut from and what the exporter did with it as indented
//! context lines. The same two-level pattern is used before a split
//! (`inspect`) and after one (`split`), so the plan and the result read alike.
//!
//! # Output Format
//!
//! ## Split
//!
//! ```text
//! Source: tall.jpg (1200x1599, image/jpeg)
//! 001 split-1.jpg (1200x399)
//!     Rows: 0..399
//!     saved
//! 002 split-2.jpg (1200x399)
//!     Rows: 399..798
//!     shared
//! ...
//! Exported 4 strips → out/
//! ```
//!
//! ## Inspect
//!
//! ```text
//! Source: tall.jpg (1200x1599, image/jpeg)
//! Quarter height: 399.75
//! 001 split-1.jpg
//!     Top: 0.00, rows 0..399
//! ...
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects. `--json` output goes through
//! [`SplitReport`] instead.

use crate::artifact::{SplitArtifact, SplitSet};
use crate::decode::UploadedImage;
use crate::export::ExportOutcome;
use crate::imaging::{SliceParams, quarter_height};
use serde::Serialize;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn source_line(upload: &UploadedImage) -> String {
    format!(
        "Source: {} ({}x{}, {})",
        upload.name.as_deref().unwrap_or("(unnamed)"),
        upload.width,
        upload.height,
        upload.media_type
    )
}

fn outcome_label(outcome: ExportOutcome) -> &'static str {
    match outcome {
        ExportOutcome::Saved => "saved",
        ExportOutcome::Shared => "shared",
        ExportOutcome::Cancelled => "share cancelled",
        ExportOutcome::FellBack => "share failed, saved instead",
    }
}

/// Rows of the source a strip was cut from, derived from its position.
fn strip_rows(upload: &UploadedImage, artifact: &SplitArtifact) -> std::ops::Range<u32> {
    let top = (artifact.index as f64 * quarter_height(upload.height)) as u32;
    top..top + artifact.height
}

// ============================================================================
// Split
// ============================================================================

/// Format the result of a split, with export outcomes when there are any.
///
/// `outcomes` is matched to artifacts by position; missing entries are simply
/// not shown.
pub fn format_split_output(
    upload: &UploadedImage,
    artifacts: &SplitSet,
    outcomes: &[ExportOutcome],
    out_dir: &Path,
) -> Vec<String> {
    let mut lines = vec![source_line(upload)];

    for artifact in artifacts {
        lines.push(format!(
            "{} {} ({}x{})",
            format_index(artifact.index + 1),
            artifact.file_name(),
            artifact.width,
            artifact.height
        ));
        let rows = strip_rows(upload, artifact);
        lines.push(format!("{}Rows: {}..{}", indent(1), rows.start, rows.end));
        if let Some(outcome) = outcomes.get(artifact.index) {
            lines.push(format!("{}{}", indent(1), outcome_label(*outcome)));
        }
    }

    let written = outcomes
        .iter()
        .filter(|o| matches!(o, ExportOutcome::Saved | ExportOutcome::FellBack))
        .count();
    if written > 0 {
        lines.push(format!(
            "Exported {} strips → {}",
            written,
            out_dir.display()
        ));
    }
    lines
}

pub fn print_split_output(
    upload: &UploadedImage,
    artifacts: &SplitSet,
    outcomes: &[ExportOutcome],
    out_dir: &Path,
) {
    for line in format_split_output(upload, artifacts, outcomes, out_dir) {
        println!("{}", line);
    }
}

// ============================================================================
// Inspect
// ============================================================================

/// Format the strip plan for a decoded source, without encoding anything.
pub fn format_plan(upload: &UploadedImage, plan: &[SliceParams]) -> Vec<String> {
    let mut lines = vec![
        source_line(upload),
        format!("Quarter height: {:.2}", quarter_height(upload.height)),
    ];

    for params in plan {
        let rows = params.geometry.pixel_rows();
        lines.push(format!(
            "{} split-{}.{}",
            format_index(params.index() + 1),
            params.index() + 1,
            params.encoding.extension()
        ));
        lines.push(format!(
            "{}Top: {:.2}, rows {}..{}",
            indent(1),
            params.geometry.top,
            rows.start,
            rows.end
        ));
    }

    let covered = plan.last().map(|p| p.geometry.pixel_rows().end).unwrap_or(0);
    if covered < upload.height {
        lines.push(format!(
            "Note: bottom {} row(s) fall outside every strip",
            upload.height - covered
        ));
    }
    lines
}

pub fn print_plan(upload: &UploadedImage, plan: &[SliceParams]) {
    for line in format_plan(upload, plan) {
        println!("{}", line);
    }
}

// ============================================================================
// JSON
// ============================================================================

/// Machine-readable summary of one split, printed by `split --json`.
#[derive(Debug, Serialize)]
pub struct SplitReport {
    pub source: SourceReport,
    pub strips: Vec<StripReport>,
}

#[derive(Debug, Serialize)]
pub struct SourceReport {
    pub name: Option<String>,
    pub media_type: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Serialize)]
pub struct StripReport {
    pub file_name: String,
    pub media_type: &'static str,
    pub width: u32,
    pub height: u32,
    pub bytes: usize,
    pub sha256: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<ExportOutcome>,
}

impl SplitReport {
    pub fn new(upload: &UploadedImage, artifacts: &SplitSet, outcomes: &[ExportOutcome]) -> Self {
        Self {
            source: SourceReport {
                name: upload.name.clone(),
                media_type: upload.media_type.clone(),
                width: upload.width,
                height: upload.height,
            },
            strips: artifacts
                .iter()
                .map(|a| StripReport {
                    file_name: a.file_name(),
                    media_type: a.media_type,
                    width: a.width,
                    height: a.height,
                    bytes: a.bytes.len(),
                    sha256: a.digest(),
                    outcome: outcomes.get(a.index).copied(),
                })
                .collect(),
        }
    }
}

pub fn print_split_json(
    upload: &UploadedImage,
    artifacts: &SplitSet,
    outcomes: &[ExportOutcome],
) -> serde_json::Result<()> {
    let report = SplitReport::new(upload, artifacts, outcomes);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
