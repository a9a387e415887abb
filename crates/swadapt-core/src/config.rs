use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Project configuration loaded from `.swadapt.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SwadaptConfig {
    /// Name of the generated wrapper class. Derived from `info.title` when unset.
    pub class_name: Option<String>,
    /// Constructor argument and attribute holding the transport client.
    pub transport: String,
    pub call_style: CallStyle,
    /// Emit per-operation docstrings.
    pub docstrings: bool,
    /// Decorator applied to every generated method. `null` disables it.
    pub error_helper: Option<ErrorHelper>,
}

impl Default for SwadaptConfig {
    fn default() -> Self {
        Self {
            class_name: None,
            transport: "client".to_string(),
            call_style: CallStyle::default(),
            docstrings: true,
            error_helper: Some(ErrorHelper::default()),
        }
    }
}

/// How the delegated transport call is named.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallStyle {
    /// `client.Order.getOrders(...)`
    #[default]
    MethodName,
    /// `client.Order.Order_getOrders(...)`, as bravado names operations.
    OperationId,
}

/// The shared helper that turns transport failures into application errors.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ErrorHelper {
    /// Python module the helper is imported from.
    pub module: String,
    pub name: String,
}

impl Default for ErrorHelper {
    fn default() -> Self {
        Self {
            module: "client.errors".to_string(),
            name: "translate_errors".to_string(),
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".swadapt.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<SwadaptConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: SwadaptConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# swadapt configuration
# class_name: BitmexAdapter   # defaults to <Title>Adapter
transport: client             # constructor argument holding the transport
call_style: method_name       # method_name | operation_id
docstrings: true

# Decorator applied to every generated method; set to null to disable.
error_helper:
  module: client.errors
  name: translate_errors
"#
}
