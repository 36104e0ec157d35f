//! Edit plan stored in `textpatch.toml` at the project root.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::files::{read_text, write_atomic};
use crate::core::types::{AnchorPatch, RangeRewrite, RenameRule, SectionSplice};

/// Default plan file name, resolved against the project root.
pub const PLAN_FILE: &str = "textpatch.toml";

/// Ordered edit jobs (TOML).
///
/// Jobs run by kind: every `rename`, then `patch`, then `splice`, then
/// `range`, each group in declaration order. Missing tables default to empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EditPlan {
    /// Continue with later jobs and files after a failure.
    pub keep_going: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rename: Vec<RenameRule>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub patch: Vec<AnchorPatch>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub splice: Vec<SectionSplice>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub range: Vec<RangeRewrite>,
}

impl Default for EditPlan {
    /// The `scriptDrafts` -> `scriptEditsByNodeId` migration for the local app.
    fn default() -> Self {
        Self {
            keep_going: false,
            rename: vec![RenameRule {
                from: "scriptDrafts".to_string(),
                to: "scriptEditsByNodeId".to_string(),
                files: [
                    "apps/local/src/app/projects/[id]/ProjectWorkspaceClient.tsx",
                    "apps/local/src/components/Outline/OutlineInspector.tsx",
                    "apps/local/src/components/Outline/OutlineLayout.tsx",
                    "apps/local/src/lib/generation/generationGating.ts",
                    "apps/local/src/lib/storage/projectsStore.ts",
                ]
                .into_iter()
                .map(PathBuf::from)
                .collect(),
            }],
            patch: vec![AnchorPatch {
                file: PathBuf::from("apps/local/src/components/Outline/OutlineInspector.tsx"),
                anchor: "import type { DraftSection } from \"@evb/shared\";\n".to_string(),
                replace: "import ScriptEditor from \"../ScriptEditor\";\n".to_string(),
                insert: "import type { CleanupResult, DraftSection } from \"@evb/shared\";\n"
                    .to_string(),
            }],
            splice: vec![SectionSplice {
                file: PathBuf::from("apps/local/src/app/projects/[id]/settings/page.tsx"),
                marker: "Local Engine Status".to_string(),
                open: "<section".to_string(),
                close: "</section>".to_string(),
                replacement: "      <LocalAvatarEngineStatusPanel />\n".to_string(),
            }],
            range: Vec::new(),
        }
    }
}

impl EditPlan {
    pub fn validate(&self) -> Result<()> {
        for rule in &self.rename {
            rule.validate()?;
        }
        for patch in &self.patch {
            patch.validate()?;
        }
        for splice in &self.splice {
            splice.validate()?;
        }
        for range in &self.range {
            range.validate()?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.rename.is_empty()
            && self.patch.is_empty()
            && self.splice.is_empty()
            && self.range.is_empty()
    }
}

/// Resolve the plan path: explicit override, else `<root>/textpatch.toml`.
pub fn plan_path(root: &Path, explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(path) => root.join(path),
        None => root.join(PLAN_FILE),
    }
}

/// Load and validate a plan from a TOML file.
///
/// Unlike most config, a missing plan is an error: applying a built-in plan
/// nobody asked for would rewrite files unexpectedly.
pub fn load_plan(path: &Path) -> Result<EditPlan> {
    debug!(path = %path.display(), "loading plan");
    let contents = read_text(path)?;
    let plan: EditPlan =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    plan.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    debug!(
        renames = plan.rename.len(),
        patches = plan.patch.len(),
        splices = plan.splice.len(),
        ranges = plan.range.len(),
        "plan loaded"
    );
    Ok(plan)
}

/// Atomically write a plan to disk (temp file + rename).
pub fn write_plan(path: &Path, plan: &EditPlan) -> Result<()> {
    plan.validate()?;
    let mut buf = toml::to_string_pretty(plan).context("serialize plan toml")?;
    if !buf.ends_with('\n') {
        buf.push('\n');
    }
    write_atomic(path, &buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = load_plan(&temp.path().join("missing.toml")).expect_err("missing plan");
        assert!(format!("{err:#}").contains("missing.toml"));
    }

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(PLAN_FILE);
        let plan = EditPlan::default();
        write_plan(&path, &plan).expect("write");
        let loaded = load_plan(&path).expect("load");
        assert_eq!(loaded, plan);
    }

    #[test]
    fn missing_tables_default_to_empty() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(PLAN_FILE);
        std::fs::write(
            &path,
            "[[rename]]\nfrom = \"a\"\nto = \"b\"\nfiles = [\"x.ts\"]\n",
        )
        .expect("seed");

        let plan = load_plan(&path).expect("load");
        assert!(!plan.keep_going);
        assert_eq!(plan.rename.len(), 1);
        assert!(plan.patch.is_empty());
        assert!(plan.splice.is_empty());
        assert!(plan.range.is_empty());
    }

    #[test]
    fn range_table_parses() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(PLAN_FILE);
        std::fs::write(
            &path,
            "[[range]]\nfile = \"page.tsx\"\nstart = \"<a>\"\nuntil = \"<b>\"\nreplacement = \"\"\n",
        )
        .expect("seed");

        let plan = load_plan(&path).expect("load");
        assert_eq!(
            plan.range,
            vec![RangeRewrite {
                file: PathBuf::from("page.tsx"),
                start: "<a>".to_string(),
                until: "<b>".to_string(),
                replacement: String::new(),
            }]
        );
        assert!(!plan.is_empty());
    }

    #[test]
    fn load_rejects_invalid_job() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(PLAN_FILE);
        std::fs::write(&path, "[[rename]]\nfrom = \"\"\nto = \"b\"\nfiles = [\"x.ts\"]\n")
            .expect("seed");

        let err = load_plan(&path).expect_err("invalid plan");
        assert!(format!("{err:#}").contains("`from` must be non-empty"));
    }

    #[test]
    fn plan_path_prefers_explicit_override() {
        let root = Path::new("/project");
        assert_eq!(plan_path(root, None), PathBuf::from("/project/textpatch.toml"));
        assert_eq!(
            plan_path(root, Some(Path::new("plans/rename.toml"))),
            PathBuf::from("/project/plans/rename.toml")
        );
    }
}
