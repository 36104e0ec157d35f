//! Edit job definitions shared by the CLI, the plan file, and the executors.
//!
//! Jobs are plain data: they name target files relative to a project root and
//! carry the literal strings to match and write. They hold no I/O state.

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::lines::line_body;

/// Replace `from` with `to` across an ordered list of files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameRule {
    pub from: String,
    pub to: String,
    pub files: Vec<PathBuf>,
}

impl RenameRule {
    pub fn validate(&self) -> Result<()> {
        if self.from.is_empty() {
            return Err(anyhow!("rename: `from` must be non-empty"));
        }
        if self.files.is_empty() {
            return Err(anyhow!("rename '{}': `files` must list at least one file", self.from));
        }
        Ok(())
    }
}

/// Replace the first line equal to `anchor` and insert `insert` after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorPatch {
    pub file: PathBuf,
    pub anchor: String,
    pub replace: String,
    pub insert: String,
}

impl AnchorPatch {
    pub fn validate(&self) -> Result<()> {
        let body = line_body(&self.anchor);
        if body.is_empty() {
            return Err(anyhow!(
                "patch {}: `anchor` must be non-empty",
                self.file.display()
            ));
        }
        if body.contains('\n') {
            return Err(anyhow!(
                "patch {}: `anchor` must be a single line",
                self.file.display()
            ));
        }
        Ok(())
    }
}

/// Replace the `open`..`close` section enclosing `marker` with `replacement`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSplice {
    pub file: PathBuf,
    pub marker: String,
    pub open: String,
    pub close: String,
    pub replacement: String,
}

impl SectionSplice {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("marker", &self.marker),
            ("open", &self.open),
            ("close", &self.close),
        ] {
            if value.is_empty() {
                return Err(anyhow!(
                    "splice {}: `{name}` must be non-empty",
                    self.file.display()
                ));
            }
        }
        Ok(())
    }
}

/// Replace from `start` up to (not including) the next `until` with `replacement`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeRewrite {
    pub file: PathBuf,
    pub start: String,
    pub until: String,
    pub replacement: String,
}

impl RangeRewrite {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("start", &self.start), ("until", &self.until)] {
            if value.is_empty() {
                return Err(anyhow!(
                    "range {}: `{name}` must be non-empty",
                    self.file.display()
                ));
            }
        }
        Ok(())
    }
}
