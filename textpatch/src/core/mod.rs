//! Deterministic, pure text transformations.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! strings and return deterministic outputs suitable for tests.

pub mod anchor;
pub mod lines;
pub mod range;
pub mod replace;
pub mod splice;
pub mod types;
