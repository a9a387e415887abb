pub mod config;
pub mod error;
pub mod parse;
pub mod transform;

pub use error::GeneratorError;

/// A generated file with path and content.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// Trait for code generators that produce files from a loaded document.
pub trait CodeGenerator {
    fn generate(
        &self,
        doc: &parse::spec::SpecDocument,
        config: &config::SwadaptConfig,
    ) -> Result<Vec<GeneratedFile>, GeneratorError>;
}
