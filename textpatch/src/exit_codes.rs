//! Stable exit codes for textpatch CLI commands.

/// Every requested edit succeeded (or would succeed, on a dry run).
pub const OK: i32 = 0;
/// File access, plan, or argument error.
pub const FAILED: i32 = 1;
/// Anchor, marker, or section bounds not found: the target file is not in
/// the shape the edit expects.
pub const PRECONDITION: i32 = 2;
