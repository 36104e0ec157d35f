//! I/O helpers for textpatch commands.

pub mod files;
pub mod plan;
