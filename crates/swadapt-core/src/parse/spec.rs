use indexmap::IndexMap;
use serde::Deserialize;

use super::operation::{HttpMethod, Operation, PathItem};
use crate::error::ParseError;

/// Info object describing the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Info {
    pub title: String,
    pub description: String,
    pub version: Option<String>,
}

/// A loaded Swagger/OpenAPI document, reduced to what adapter generation
/// reads. Path and method order follow the source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecDocument {
    /// The declared `swagger` or `openapi` version, if any.
    pub spec_version: Option<String>,
    pub info: Info,
    pub paths: IndexMap<String, IndexMap<HttpMethod, Operation>>,
}

impl SpecDocument {
    /// Every operation in document order: paths first, then methods within
    /// each path.
    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.paths.values().flat_map(|methods| methods.values())
    }

    pub fn operation_count(&self) -> usize {
        self.paths.values().map(IndexMap::len).sum()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawInfo {
    title: Option<String>,
    description: Option<String>,
    version: Option<String>,
}

/// The top-level document shape before required fields are checked.
#[derive(Debug, Deserialize)]
pub(crate) struct RawDocument {
    swagger: Option<String>,
    openapi: Option<String>,
    info: Option<RawInfo>,
    paths: Option<IndexMap<String, PathItem>>,
}

impl RawDocument {
    /// Check required fields and attach path/method to every operation.
    pub(crate) fn into_document(self) -> Result<SpecDocument, ParseError> {
        let info = self
            .info
            .ok_or_else(|| ParseError::MissingField("info".to_string()))?;
        let title = info
            .title
            .ok_or_else(|| ParseError::MissingField("info.title".to_string()))?;
        let description = info
            .description
            .ok_or_else(|| ParseError::MissingField("info.description".to_string()))?;
        let raw_paths = self
            .paths
            .ok_or_else(|| ParseError::MissingField("paths".to_string()))?;

        let paths: IndexMap<_, _> = raw_paths
            .into_iter()
            .map(|(path, item)| {
                let methods: IndexMap<HttpMethod, Operation> = item
                    .operations
                    .into_iter()
                    .map(|(method, object)| (method, Operation::new(&path, method, object)))
                    .collect();
                (path, methods)
            })
            .collect();

        Ok(SpecDocument {
            spec_version: self.swagger.or(self.openapi),
            info: Info {
                title,
                description,
                version: info.version,
            },
            paths,
        })
    }
}
