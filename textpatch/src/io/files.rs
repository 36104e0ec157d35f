//! Whole-file text reads and atomic writes.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

/// Read `path` fully as UTF-8 text.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}

/// Atomically replace `path` with `contents` (temp file + rename).
///
/// A symlinked `path` is followed, so the link survives and its target gets
/// the new contents. The temp file sits next to the real target so the rename
/// stays on one filesystem. Permissions of an existing target are carried over.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let target = resolve_symlink(path)?;
    let parent = target
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;

    let tmp_path = temp_sibling(&target)?;
    debug!(
        path = %path.display(),
        target = %target.display(),
        tmp = %tmp_path.display(),
        bytes = contents.len(),
        "writing file"
    );
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp file {}", tmp_path.display()))?;

    if let Ok(metadata) = fs::metadata(&target) {
        fs::set_permissions(&tmp_path, metadata.permissions())
            .with_context(|| format!("copy permissions to {}", tmp_path.display()))?;
    }

    if let Err(err) = fs::rename(&tmp_path, &target) {
        let _ = fs::remove_file(&tmp_path);
        return Err(err).with_context(|| format!("replace {}", target.display()));
    }
    Ok(())
}

/// The file `path` ultimately names: itself, or its target when it is a symlink.
fn resolve_symlink(path: &Path) -> Result<PathBuf> {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.file_type().is_symlink() => {
            fs::canonicalize(path).with_context(|| format!("resolve symlink {}", path.display()))
        }
        _ => Ok(path.to_path_buf()),
    }
}

fn temp_sibling(path: &Path) -> Result<PathBuf> {
    let name = path
        .file_name()
        .with_context(|| format!("path has no file name {}", path.display()))?;
    let mut tmp_name = std::ffi::OsString::from(".");
    tmp_name.push(name);
    tmp_name.push(".textpatch.tmp");
    Ok(path.with_file_name(tmp_name))
}
