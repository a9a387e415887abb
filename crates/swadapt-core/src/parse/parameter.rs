use serde::Deserialize;

/// An operation parameter.
///
/// Only the keys the adapter needs are read. Location, type and schema keys
/// are accepted and discarded, since generated methods pass values through
/// untyped.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Parameter {
    pub name: String,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub description: Option<String>,
}

impl Parameter {
    /// The description text, or an empty string when the document has none.
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}
