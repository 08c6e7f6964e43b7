//! Test helpers shared across the sample-harness workspace.
//!
//! Provides sample fixtures, a UTF-8 temporary output tree, text helpers for
//! generated example files and jailed configuration files.

pub mod fixtures;
pub mod fs;
pub mod jail;
pub mod text;
