//! Core utilities and types for the weave module generator.
//!
//! This crate provides the low-level pieces shared by every other weave
//! crate: writing output files and transforming parameter names.

mod file;
mod utils;

// File operations
pub use file::{File, FileRules, Overwrite, WriteResult};
// String utilities
pub use utils::{to_kebab_case, to_pascal_case, to_snake_case};
