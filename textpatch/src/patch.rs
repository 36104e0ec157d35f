//! Anchored line patch applied to a single file.

use std::path::Path;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::core::anchor::{LinePatch, patch_lines};
use crate::core::types::AnchorPatch;
use crate::io::files::{read_text, write_atomic};

/// Structured patch outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    /// Anchor found at `line_index` (0-based) and the file patched
    /// (or left alone on a dry run).
    Applied { line_index: usize },
    /// No line equals the anchor; the file was not written.
    AnchorNotFound,
}

/// Apply `patch` to `<root>/<patch.file>`.
///
/// A missing anchor is an outcome, not an error, so callers decide whether to
/// stop. Read and write failures are errors.
pub fn patch_file(root: &Path, patch: &AnchorPatch, dry_run: bool) -> Result<PatchOutcome> {
    patch.validate()?;
    let path = root.join(&patch.file);
    debug!(path = %path.display(), anchor = %patch.anchor.trim_end(), "patching");

    let original = read_text(&path)?;
    let outcome = patch_lines(&original, &patch.anchor, &patch.replace, &patch.insert);
    let (text, line_index) = match outcome {
        LinePatch::Patched { text, line_index } => (text, line_index),
        LinePatch::AnchorNotFound => {
            warn!(path = %path.display(), "anchor line not found");
            return Ok(PatchOutcome::AnchorNotFound);
        }
    };

    if dry_run {
        info!(path = %path.display(), line = line_index + 1, "would patch");
    } else {
        write_atomic(&path, &text)?;
        info!(path = %path.display(), line = line_index + 1, "patched");
    }
    Ok(PatchOutcome::Applied { line_index })
}
