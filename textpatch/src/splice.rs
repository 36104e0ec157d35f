//! Section splice applied to a single file.

use std::path::Path;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::core::splice::{Splice, splice_section};
use crate::core::types::SectionSplice;
use crate::io::files::{read_text, write_atomic};

/// Structured splice outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpliceOutcome {
    /// Bytes `start..end` of the original file were replaced.
    Applied { start: usize, end: usize },
    MarkerNotFound,
    BoundsNotFound,
}

/// Apply `splice` to `<root>/<splice.file>`.
///
/// Precondition misses come back as outcomes and leave the file unwritten.
pub fn splice_file(root: &Path, splice: &SectionSplice, dry_run: bool) -> Result<SpliceOutcome> {
    splice.validate()?;
    let path = root.join(&splice.file);
    debug!(path = %path.display(), marker = %splice.marker, "splicing");

    let original = read_text(&path)?;
    let (text, start, end) = match splice_section(
        &original,
        &splice.marker,
        &splice.open,
        &splice.close,
        &splice.replacement,
    ) {
        Splice::Spliced { text, start, end } => (text, start, end),
        Splice::MarkerNotFound => {
            warn!(path = %path.display(), marker = %splice.marker, "marker not found");
            return Ok(SpliceOutcome::MarkerNotFound);
        }
        Splice::BoundsNotFound => {
            warn!(
                path = %path.display(),
                open = %splice.open,
                close = %splice.close,
                "section bounds not found"
            );
            return Ok(SpliceOutcome::BoundsNotFound);
        }
    };

    if dry_run {
        info!(path = %path.display(), start, end, "would splice");
    } else {
        write_atomic(&path, &text)?;
        info!(path = %path.display(), start, end, "spliced");
    }
    Ok(SpliceOutcome::Applied { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestProject;
    use std::path::PathBuf;

    const FILE: &str = "settings/page.tsx";

    fn status_splice() -> SectionSplice {
        SectionSplice {
            file: PathBuf::from(FILE),
            marker: "Local Engine Status".to_string(),
            open: "<section".to_string(),
            close: "</section>".to_string(),
            replacement: "<LocalAvatarEngineStatusPanel />".to_string(),
        }
    }

    #[test]
    fn replaces_section_on_disk() {
        let project = TestProject::new().expect("project");
        project
            .write(
                FILE,
                "<div>\n  <section>\n    <h2>Local Engine Status</h2>\n  </section>\n</div>\n",
            )
            .expect("write");

        let outcome = splice_file(project.root(), &status_splice(), false).expect("splice");
        assert!(matches!(outcome, SpliceOutcome::Applied { .. }));
        assert_eq!(
            project.read(FILE).expect("read"),
            "<div>\n  <LocalAvatarEngineStatusPanel />\n</div>\n"
        );
    }

    #[test]
    fn missing_marker_leaves_file_untouched() {
        let project = TestProject::new().expect("project");
        let original = "<section>other</section>\n";
        project.write(FILE, original).expect("write");

        let outcome = splice_file(project.root(), &status_splice(), false).expect("splice");
        assert_eq!(outcome, SpliceOutcome::MarkerNotFound);
        assert_eq!(project.read(FILE).expect("read"), original);
    }

    #[test]
    fn missing_bounds_leaves_file_untouched() {
        let project = TestProject::new().expect("project");
        let original = "<h2>Local Engine Status</h2>\n</section>\n";
        project.write(FILE, original).expect("write");

        let outcome = splice_file(project.root(), &status_splice(), false).expect("splice");
        assert_eq!(outcome, SpliceOutcome::BoundsNotFound);
        assert_eq!(project.read(FILE).expect("read"), original);
    }

    #[test]
    fn dry_run_writes_nothing() {
        let project = TestProject::new().expect("project");
        let original = "<section>Local Engine Status</section>";
        project.write(FILE, original).expect("write");

        let outcome = splice_file(project.root(), &status_splice(), true).expect("splice");
        assert_eq!(
            outcome,
            SpliceOutcome::Applied {
                start: 0,
                end: original.len()
            }
        );
        assert_eq!(project.read(FILE).expect("read"), original);
    }
}
