//! Bulk literal rename across an ordered list of files.

use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::core::replace::replace_literal;
use crate::core::types::RenameRule;
use crate::io::files::{read_text, write_atomic};

/// Options shared by rename runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenameOptions {
    /// Compute the report without writing any file.
    pub dry_run: bool,
    /// Record per-file failures and continue instead of aborting.
    pub keep_going: bool,
}

/// Per-run report, one entry per distinct file in list order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameReport {
    pub from: String,
    pub to: String,
    pub dry_run: bool,
    pub files: Vec<FileReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub status: FileStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileStatus {
    /// No occurrence; the file was not rewritten.
    Unchanged,
    /// Occurrences replaced (written unless the run is a dry run).
    Renamed { occurrences: usize },
    /// Read or write failed; only recorded with `keep_going`.
    Failed { error: String },
}

impl RenameReport {
    pub fn renamed_files(&self) -> usize {
        self.files
            .iter()
            .filter(|file| matches!(file.status, FileStatus::Renamed { .. }))
            .count()
    }

    pub fn occurrences(&self) -> usize {
        self.files
            .iter()
            .map(|file| match file.status {
                FileStatus::Renamed { occurrences } => occurrences,
                _ => 0,
            })
            .sum()
    }

    pub fn failures(&self) -> usize {
        self.files
            .iter()
            .filter(|file| matches!(file.status, FileStatus::Failed { .. }))
            .count()
    }
}

/// Replace `rule.from` with `rule.to` in every file of `rule.files`.
///
/// Paths resolve against `root`; duplicates are visited once. A file is only
/// written when its content changes. Without `keep_going` the first read or
/// write error aborts the run; files already rewritten stay rewritten.
pub fn rename_files(
    root: &Path,
    rule: &RenameRule,
    options: RenameOptions,
) -> Result<RenameReport> {
    rule.validate()?;
    debug!(from = %rule.from, to = %rule.to, files = rule.files.len(), "renaming");

    let mut seen = HashSet::new();
    let mut files = Vec::with_capacity(rule.files.len());
    for relative in &rule.files {
        let path = root.join(relative);
        if !seen.insert(identity(&path)) {
            debug!(path = %path.display(), "skipping duplicate path");
            continue;
        }

        let status = match rename_one(&path, rule, options.dry_run) {
            Ok(status) => status,
            Err(err) if options.keep_going => {
                let error = format!("{err:#}");
                warn!(path = %path.display(), error = %error, "rename failed, continuing");
                FileStatus::Failed { error }
            }
            Err(err) => return Err(err),
        };
        files.push(FileReport {
            path: relative.clone(),
            status,
        });
    }

    Ok(RenameReport {
        from: rule.from.clone(),
        to: rule.to.clone(),
        dry_run: options.dry_run,
        files,
    })
}

/// Key identifying the file behind `path`: its canonical path when it exists,
/// otherwise the path with `.` components dropped.
fn identity(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| {
        path.components()
            .filter(|component| !matches!(component, Component::CurDir))
            .collect()
    })
}

fn rename_one(path: &Path, rule: &RenameRule, dry_run: bool) -> Result<FileStatus> {
    let original = read_text(path)?;
    let replaced = replace_literal(&original, &rule.from, &rule.to);
    if replaced.text == original {
        debug!(path = %path.display(), "no occurrences");
        return Ok(FileStatus::Unchanged);
    }

    if dry_run {
        info!(path = %path.display(), occurrences = replaced.occurrences, "would rename");
    } else {
        write_atomic(path, &replaced.text)?;
        info!(path = %path.display(), occurrences = replaced.occurrences, "renamed");
    }
    Ok(FileStatus::Renamed {
        occurrences: replaced.occurrences,
    })
}
