//! Artifact merge engine and shared rendering for the weave module generator.
//!
//! This crate provides the language-agnostic half of generation; the
//! target language lives in `weave-codegen-php`.
//!
//! # Module Organization
//!
//! - [`builder`] - Code generation building blocks (CodeBuilder, CodeFragment, etc.)
//! - [`snippet`] - The snippet contract and parameter validation
//! - [`module`] - The module that owns and merges artifacts
//! - [`render`] - Renderer traits and the XML renderer
//! - [`generation`] - Output management (FileRegistry, WriteStats)
//! - [`language`] - The `LanguageCodegen` trait

pub mod builder;
mod diagnostic;
mod error;
pub mod generation;
pub mod language;
pub mod module;
pub mod render;
pub mod snippet;

pub use diagnostic::{Diagnostic, Severity};
pub use error::{Error, Result};
