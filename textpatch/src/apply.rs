//! Run every job of an edit plan.
//!
//! Jobs run in plan order: renames, anchored patches, splices, then ranges.
//! Without `keep_going` the first failed job stops the run; later jobs are
//! reported as not attempted by their absence. Nothing is rolled back.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::io::plan::EditPlan;
use crate::patch::{PatchOutcome, patch_file};
use crate::range::{RangeOutcome, rewrite_file};
use crate::rename::{RenameOptions, RenameReport, rename_files};
use crate::splice::{SpliceOutcome, splice_file};

/// Options for `apply_plan`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyOptions {
    pub dry_run: bool,
    /// Continue after failures. ORed with the plan's own `keep_going`.
    pub keep_going: bool,
}

/// How a job failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Read, write, or validation error.
    Io,
    /// Anchor, marker, or section bounds missing: the file is not in the
    /// shape the job expects.
    Precondition,
}

/// Outcome of one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobResult {
    Renamed(RenameReport),
    Patched { file: PathBuf, line_index: usize },
    Spliced { file: PathBuf, start: usize, end: usize },
    Rewritten { file: PathBuf, start: usize, end: usize },
    Failed { kind: FailureKind, message: String },
}

/// One executed job, labeled for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobReport {
    pub label: String,
    pub result: JobResult,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplySummary {
    pub dry_run: bool,
    pub jobs: Vec<JobReport>,
    /// True when a failure stopped the run before every job ran.
    pub stopped_early: bool,
}

impl ApplySummary {
    /// Worst failure across all jobs, counting rename files that failed
    /// under `keep_going` as I/O failures.
    pub fn worst_failure(&self) -> Option<FailureKind> {
        let mut worst = None;
        for job in &self.jobs {
            match &job.result {
                JobResult::Failed {
                    kind: FailureKind::Io,
                    ..
                } => return Some(FailureKind::Io),
                JobResult::Renamed(report) if report.failures() > 0 => {
                    return Some(FailureKind::Io);
                }
                JobResult::Failed {
                    kind: FailureKind::Precondition,
                    ..
                } => worst = Some(FailureKind::Precondition),
                _ => {}
            }
        }
        worst
    }
}

impl fmt::Display for JobReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.result {
            JobResult::Renamed(report) => {
                write!(
                    f,
                    "{}: {} occurrence(s) in {} of {} file(s)",
                    self.label,
                    report.occurrences(),
                    report.renamed_files(),
                    report.files.len()
                )?;
                match report.failures() {
                    0 => Ok(()),
                    failed => write!(f, ", {failed} FAILED"),
                }
            }
            JobResult::Patched { file, line_index } => {
                write!(f, "{}: {} line {}", self.label, file.display(), line_index + 1)
            }
            JobResult::Spliced { file, start, end } | JobResult::Rewritten { file, start, end } => {
                write!(f, "{}: {} bytes {start}..{end}", self.label, file.display())
            }
            JobResult::Failed { message, .. } => write!(f, "{}: FAILED {message}", self.label),
        }
    }
}

/// Execute `plan` against files under `root`.
pub fn apply_plan(root: &Path, plan: &EditPlan, options: ApplyOptions) -> ApplySummary {
    let keep_going = options.keep_going || plan.keep_going;
    let mut summary = ApplySummary {
        dry_run: options.dry_run,
        ..ApplySummary::default()
    };

    let rename_options = RenameOptions {
        dry_run: options.dry_run,
        keep_going,
    };
    let renames = plan.rename.iter().map(|rule| {
        let label = format!("rename {} -> {}", rule.from, rule.to);
        let result = match rename_files(root, rule, rename_options) {
            Ok(report) => JobResult::Renamed(report),
            Err(err) => io_failure(err),
        };
        JobReport { label, result }
    });
    let patches = plan.patch.iter().map(|patch| {
        let label = format!("patch {}", patch.file.display());
        let result = match patch_file(root, patch, options.dry_run) {
            Ok(PatchOutcome::Applied { line_index }) => JobResult::Patched {
                file: patch.file.clone(),
                line_index,
            },
            Ok(PatchOutcome::AnchorNotFound) => JobResult::Failed {
                kind: FailureKind::Precondition,
                message: format!("no such line: {}", patch.anchor.trim_end()),
            },
            Err(err) => io_failure(err),
        };
        JobReport { label, result }
    });
    let splices = plan.splice.iter().map(|splice| {
        let label = format!("splice {}", splice.file.display());
        let result = match splice_file(root, splice, options.dry_run) {
            Ok(SpliceOutcome::Applied { start, end }) => JobResult::Spliced {
                file: splice.file.clone(),
                start,
                end,
            },
            Ok(SpliceOutcome::MarkerNotFound) => JobResult::Failed {
                kind: FailureKind::Precondition,
                message: format!("marker not found: {}", splice.marker),
            },
            Ok(SpliceOutcome::BoundsNotFound) => JobResult::Failed {
                kind: FailureKind::Precondition,
                message: format!(
                    "section bounds not found: {} .. {}",
                    splice.open, splice.close
                ),
            },
            Err(err) => io_failure(err),
        };
        JobReport { label, result }
    });

    let ranges = plan.range.iter().map(|range| {
        let label = format!("range {}", range.file.display());
        let result = match rewrite_file(root, range, options.dry_run) {
            Ok(RangeOutcome::Applied { start, end }) => JobResult::Rewritten {
                file: range.file.clone(),
                start,
                end,
            },
            Ok(RangeOutcome::TargetsNotFound) => JobResult::Failed {
                kind: FailureKind::Precondition,
                message: format!("sections not found: {} .. {}", range.start, range.until),
            },
            Err(err) => io_failure(err),
        };
        JobReport { label, result }
    });

    let total = plan.rename.len() + plan.patch.len() + plan.splice.len() + plan.range.len();
    // Lazy iterators: a job only runs when pulled, so breaking stops the rest.
    for job in renames.chain(patches).chain(splices).chain(ranges) {
        let failed = matches!(job.result, JobResult::Failed { .. });
        if failed {
            warn!(job = %job.label, "job failed");
        } else {
            info!(job = %job.label, "job done");
        }
        summary.jobs.push(job);
        if failed && !keep_going {
            summary.stopped_early = summary.jobs.len() < total;
            break;
        }
    }
    summary
}

fn io_failure(err: anyhow::Error) -> JobResult {
    JobResult::Failed {
        kind: FailureKind::Io,
        message: format!("{err:#}"),
    }
}
