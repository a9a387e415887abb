pub mod operation;
pub mod parameter;
pub mod spec;

use std::path::Path;

use crate::error::ParseError;
use spec::{RawDocument, SpecDocument};

/// Input document encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// `.json` files are JSON; everything else is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Yaml,
        }
    }
}

/// Parse a spec document from YAML.
pub fn from_yaml(input: &str) -> Result<SpecDocument, ParseError> {
    let raw: RawDocument = serde_yaml_ng::from_str(input)?;
    finish(raw)
}

/// Parse a spec document from JSON.
pub fn from_json(input: &str) -> Result<SpecDocument, ParseError> {
    let raw: RawDocument = serde_json::from_str(input)?;
    finish(raw)
}

/// Parse a spec document from raw bytes in the given format.
pub fn load(source: &[u8], format: Format) -> Result<SpecDocument, ParseError> {
    let raw: RawDocument = match format {
        Format::Json => serde_json::from_slice(source)?,
        Format::Yaml => serde_yaml_ng::from_slice(source)?,
    };
    finish(raw)
}

fn finish(raw: RawDocument) -> Result<SpecDocument, ParseError> {
    let doc = raw.into_document()?;
    log::info!(
        "loaded `{}`: {} paths, {} operations",
        doc.info.title,
        doc.paths.len(),
        doc.operation_count()
    );
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path(Path::new("swagger.json")), Format::Json);
        assert_eq!(Format::from_path(Path::new("api.JSON")), Format::Json);
        assert_eq!(Format::from_path(Path::new("api.yaml")), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("api.yml")), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("api")), Format::Yaml);
    }

    #[test]
    fn test_load_bytes_matches_str() {
        let json = r#"{"info": {"title": "T", "description": "D"}, "paths": {}}"#;
        let from_bytes = load(json.as_bytes(), Format::Json).unwrap();
        let from_str = from_json(json).unwrap();
        assert_eq!(from_bytes, from_str);
    }
}
