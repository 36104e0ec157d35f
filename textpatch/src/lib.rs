//! Literal text migrations for source trees.
//!
//! Four one-shot edits, each applied to files named explicitly by the caller:
//!
//! - **rename**: replace every occurrence of a literal across a list of files,
//!   writing only files that change.
//! - **patch**: replace the first line equal to an anchor and insert a line
//!   after it.
//! - **splice**: replace the delimited section that encloses a marker.
//! - **range**: replace the text from one literal up to the next occurrence of
//!   another.
//!
//! The layout keeps a strict split:
//!
//! - **[`core`]**: Pure string transformations and job types. No I/O.
//! - **[`io`]**: Whole-file reads, atomic writes, and the TOML edit plan.
//!
//! Orchestration modules ([`rename`], [`patch`], [`splice`], [`range`],
//! [`apply`]) combine the two to implement CLI commands.

pub mod apply;
pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod patch;
pub mod range;
pub mod rename;
pub mod splice;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
