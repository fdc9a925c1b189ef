mod generator;
mod renderer;
mod scaffold;

pub mod snippets;

pub use generator::Generator;
pub use renderer::PhpRenderer;
pub use weave_codegen::language::{Generated, LanguageCodegen};
