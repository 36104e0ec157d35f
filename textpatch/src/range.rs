//! Range rewrite applied to a single file.

use std::path::Path;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::core::range::{RangeEdit, rewrite_range};
use crate::core::types::RangeRewrite;
use crate::io::files::{read_text, write_atomic};

/// Structured range rewrite outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeOutcome {
    /// Bytes `start..end` of the original file were replaced.
    Applied { start: usize, end: usize },
    /// Either target is missing; the file was not written.
    TargetsNotFound,
}

/// Apply `range` to `<root>/<range.file>`.
pub fn rewrite_file(root: &Path, range: &RangeRewrite, dry_run: bool) -> Result<RangeOutcome> {
    range.validate()?;
    let path = root.join(&range.file);
    debug!(path = %path.display(), "rewriting range");

    let original = read_text(&path)?;
    let outcome = rewrite_range(&original, &range.start, &range.until, &range.replacement);
    let (text, start, end) = match outcome {
        RangeEdit::Rewritten { text, start, end } => (text, start, end),
        RangeEdit::TargetsNotFound => {
            warn!(path = %path.display(), "range targets not found");
            return Ok(RangeOutcome::TargetsNotFound);
        }
    };

    if dry_run {
        info!(path = %path.display(), start, end, "would rewrite range");
    } else {
        write_atomic(&path, &text)?;
        info!(path = %path.display(), start, end, "rewrote range");
    }
    Ok(RangeOutcome::Applied { start, end })
}
