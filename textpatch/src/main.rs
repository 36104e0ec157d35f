//! Literal text migrations for source trees.
//!
//! Renames identifiers across files, patches an anchored line, splices
//! delimited sections, and rewrites ranges between two literals, either from
//! flags or from a `textpatch.toml` plan.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use textpatch::apply::{ApplyOptions, FailureKind, apply_plan};
use textpatch::core::types::{AnchorPatch, RangeRewrite, RenameRule, SectionSplice};
use textpatch::exit_codes;
use textpatch::io::plan::{EditPlan, load_plan, plan_path, write_plan};
use textpatch::logging;
use textpatch::patch::{PatchOutcome, patch_file};
use textpatch::range::{RangeOutcome, rewrite_file};
use textpatch::rename::{FileStatus, RenameOptions, RenameReport, rename_files};
use textpatch::splice::{SpliceOutcome, splice_file};
use tracing::error;

#[derive(Parser)]
#[command(
    name = "textpatch",
    version,
    about = "One-shot literal renames and anchored edits for source trees"
)]
struct Cli {
    /// Project root that relative file paths resolve against.
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the built-in edit plan to `textpatch.toml`.
    Init {
        /// Overwrite an existing plan.
        #[arg(short, long)]
        force: bool,
        /// Plan path, relative to the root.
        #[arg(long)]
        plan: Option<PathBuf>,
    },
    /// Replace a literal string in every listed file.
    Rename {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        /// Report what would change without writing.
        #[arg(long)]
        dry_run: bool,
        /// Continue with remaining files after a failure.
        #[arg(long)]
        keep_going: bool,
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Replace the first line equal to an anchor and insert a line after it.
    Patch {
        #[arg(long)]
        file: PathBuf,
        #[arg(long)]
        anchor: String,
        #[arg(long)]
        replace: String,
        #[arg(long)]
        insert: String,
        #[arg(long)]
        dry_run: bool,
    },
    /// Replace the `--open`..`--close` section around a marker.
    Splice {
        #[arg(long)]
        file: PathBuf,
        #[arg(long)]
        marker: String,
        #[arg(long)]
        open: String,
        #[arg(long)]
        close: String,
        #[arg(long)]
        replacement: String,
        #[arg(long)]
        dry_run: bool,
    },
    /// Replace from `--start` up to (not including) the next `--until`.
    Range {
        #[arg(long)]
        file: PathBuf,
        #[arg(long)]
        start: String,
        #[arg(long)]
        until: String,
        #[arg(long)]
        replacement: String,
        #[arg(long)]
        dry_run: bool,
    },
    /// Run every job in an edit plan.
    Apply {
        /// Plan path, relative to the root.
        #[arg(long)]
        plan: Option<PathBuf>,
        #[arg(long)]
        dry_run: bool,
        #[arg(long)]
        keep_going: bool,
    },
}

fn main() {
    logging::init();
    // Usage errors exit FAILED so status 2 stays reserved for PRECONDITION.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() {
                exit_codes::FAILED
            } else {
                exit_codes::OK
            };
            if let Err(print_err) = err.print() {
                error!(error = %print_err, "print usage error");
            }
            std::process::exit(code);
        }
    };
    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::FAILED);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    let root = cli.root.as_path();
    match cli.command {
        Command::Init { force, plan } => cmd_init(root, plan.as_deref(), force),
        Command::Rename {
            from,
            to,
            dry_run,
            keep_going,
            json,
            files,
        } => cmd_rename(
            root,
            &RenameRule { from, to, files },
            RenameOptions {
                dry_run,
                keep_going,
            },
            json,
        ),
        Command::Patch {
            file,
            anchor,
            replace,
            insert,
            dry_run,
        } => cmd_patch(
            root,
            &AnchorPatch {
                file,
                anchor,
                replace,
                insert,
            },
            dry_run,
        ),
        Command::Splice {
            file,
            marker,
            open,
            close,
            replacement,
            dry_run,
        } => cmd_splice(
            root,
            &SectionSplice {
                file,
                marker,
                open,
                close,
                replacement,
            },
            dry_run,
        ),
        Command::Range {
            file,
            start,
            until,
            replacement,
            dry_run,
        } => cmd_range(
            root,
            &RangeRewrite {
                file,
                start,
                until,
                replacement,
            },
            dry_run,
        ),
        Command::Apply {
            plan,
            dry_run,
            keep_going,
        } => cmd_apply(
            root,
            plan.as_deref(),
            ApplyOptions {
                dry_run,
                keep_going,
            },
        ),
    }
}

fn cmd_init(root: &Path, plan: Option<&Path>, force: bool) -> Result<i32> {
    let path = plan_path(root, plan);
    if !force && path.exists() {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    write_plan(&path, &EditPlan::default()).with_context(|| "write default plan")?;
    println!("wrote {}", path.display());
    Ok(exit_codes::OK)
}

fn cmd_rename(root: &Path, rule: &RenameRule, options: RenameOptions, json: bool) -> Result<i32> {
    let report = rename_files(root, rule, options)?;
    if json {
        let mut payload = serde_json::to_string_pretty(&report).context("serialize report")?;
        payload.push('\n');
        print!("{payload}");
    } else {
        print_rename_report(&report);
    }
    if report.failures() > 0 {
        return Ok(exit_codes::FAILED);
    }
    Ok(exit_codes::OK)
}

fn print_rename_report(report: &RenameReport) {
    let verb = if report.dry_run { "would rename" } else { "renamed" };
    for file in &report.files {
        match &file.status {
            FileStatus::Unchanged => println!("unchanged {}", file.path.display()),
            FileStatus::Renamed { occurrences } => {
                println!("{verb} {} ({occurrences} occurrence(s))", file.path.display());
            }
            FileStatus::Failed { error } => println!("failed {}: {error}", file.path.display()),
        }
    }
    println!(
        "{} -> {}: {} occurrence(s) in {} of {} file(s)",
        report.from,
        report.to,
        report.occurrences(),
        report.renamed_files(),
        report.files.len()
    );
}

fn cmd_patch(root: &Path, patch: &AnchorPatch, dry_run: bool) -> Result<i32> {
    match patch_file(root, patch, dry_run)? {
        PatchOutcome::Applied { line_index } => {
            let verb = if dry_run { "would patch" } else { "patched" };
            println!("{verb} {} at line {}", patch.file.display(), line_index + 1);
            Ok(exit_codes::OK)
        }
        PatchOutcome::AnchorNotFound => {
            eprintln!(
                "no such line in {}: {}",
                patch.file.display(),
                patch.anchor.trim_end()
            );
            Ok(exit_codes::PRECONDITION)
        }
    }
}

fn cmd_splice(root: &Path, splice: &SectionSplice, dry_run: bool) -> Result<i32> {
    match splice_file(root, splice, dry_run)? {
        SpliceOutcome::Applied { start, end } => {
            let verb = if dry_run { "would splice" } else { "spliced" };
            println!("{verb} {} bytes {start}..{end}", splice.file.display());
            Ok(exit_codes::OK)
        }
        SpliceOutcome::MarkerNotFound => {
            eprintln!(
                "marker not found in {}: {}",
                splice.file.display(),
                splice.marker
            );
            Ok(exit_codes::PRECONDITION)
        }
        SpliceOutcome::BoundsNotFound => {
            eprintln!(
                "section bounds {} .. {} not found around marker in {}",
                splice.open,
                splice.close,
                splice.file.display()
            );
            Ok(exit_codes::PRECONDITION)
        }
    }
}

fn cmd_range(root: &Path, range: &RangeRewrite, dry_run: bool) -> Result<i32> {
    match rewrite_file(root, range, dry_run)? {
        RangeOutcome::Applied { start, end } => {
            let verb = if dry_run { "would rewrite" } else { "rewrote" };
            println!("{verb} {} bytes {start}..{end}", range.file.display());
            Ok(exit_codes::OK)
        }
        RangeOutcome::TargetsNotFound => {
            eprintln!(
                "sections not found in {}: {} .. {}",
                range.file.display(),
                range.start,
                range.until
            );
            Ok(exit_codes::PRECONDITION)
        }
    }
}

fn cmd_apply(root: &Path, plan: Option<&Path>, options: ApplyOptions) -> Result<i32> {
    let path = plan_path(root, plan);
    let plan = load_plan(&path)?;
    if plan.is_empty() {
        println!("{}: no jobs", path.display());
        return Ok(exit_codes::OK);
    }

    let summary = apply_plan(root, &plan, options);
    for job in &summary.jobs {
        println!("{job}");
    }
    if summary.stopped_early {
        eprintln!("stopped after first failure (use --keep-going to continue)");
    }
    Ok(match summary.worst_failure() {
        None => exit_codes::OK,
        Some(FailureKind::Precondition) => exit_codes::PRECONDITION,
        Some(FailureKind::Io) => exit_codes::FAILED,
    })
}
