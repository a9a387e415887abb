use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Deserialize;

use super::parameter::Parameter;

/// HTTP method of a path item entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl HttpMethod {
    /// Recognize a path item key as an HTTP method, ignoring case.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "get" => Some(HttpMethod::Get),
            "put" => Some(HttpMethod::Put),
            "post" => Some(HttpMethod::Post),
            "delete" => Some(HttpMethod::Delete),
            "options" => Some(HttpMethod::Options),
            "head" => Some(HttpMethod::Head),
            "patch" => Some(HttpMethod::Patch),
            "trace" => Some(HttpMethod::Trace),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Trace => "TRACE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An operation object as it appears in the document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct OperationObject {
    #[serde(rename = "operationId")]
    pub operation_id: Option<String>,

    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

/// One API operation, located by its path and method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub path: String,
    pub method: HttpMethod,
    pub operation_id: Option<String>,
    pub summary: String,
    pub tags: Vec<String>,
    pub parameters: Vec<Parameter>,
}

impl Operation {
    pub(crate) fn new(path: &str, method: HttpMethod, object: OperationObject) -> Self {
        Self {
            path: path.to_string(),
            method,
            operation_id: object.operation_id,
            summary: object.summary.unwrap_or_default(),
            tags: object.tags,
            parameters: object.parameters,
        }
    }

    /// A human-readable locator for error messages: the operationId when
    /// present, otherwise `METHOD path`.
    pub fn label(&self) -> String {
        match &self.operation_id {
            Some(id) => id.clone(),
            None => format!("{} {}", self.method, self.path),
        }
    }
}

/// The operations declared under one path, in document order.
///
/// Keys that are not HTTP methods (`parameters`, `$ref`, `x-*`, ...) are
/// skipped while decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PathItem {
    pub operations: IndexMap<HttpMethod, OperationObject>,
}

impl<'de> Deserialize<'de> for PathItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PathItemVisitor;

        impl<'de> Visitor<'de> for PathItemVisitor {
            type Value = PathItem;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a path item mapping HTTP methods to operations")
            }

            fn visit_map<A>(self, mut map: A) -> Result<PathItem, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut operations = IndexMap::new();
                while let Some(key) = map.next_key::<String>()? {
                    match HttpMethod::from_key(&key) {
                        Some(method) => {
                            let object = map.next_value::<OperationObject>().map_err(|e| {
                                <A::Error as de::Error>::custom(format!(
                                    "in `{key}` operation: {e}"
                                ))
                            })?;
                            if operations.insert(method, object).is_some() {
                                return Err(<A::Error as de::Error>::custom(format!(
                                    "duplicate `{method}` operation (key `{key}`)"
                                )));
                            }
                        }
                        None => {
                            log::debug!("skipping non-operation path item key `{key}`");
                            map.next_value::<IgnoredAny>()?;
                        }
                    }
                }
                Ok(PathItem { operations })
            }
        }

        deserializer.deserialize_map(PathItemVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_keys_case_insensitive() {
        assert_eq!(HttpMethod::from_key("get"), Some(HttpMethod::Get));
        assert_eq!(HttpMethod::from_key("DELETE"), Some(HttpMethod::Delete));
        assert_eq!(HttpMethod::from_key("Patch"), Some(HttpMethod::Patch));
        assert_eq!(HttpMethod::from_key("parameters"), None);
        assert_eq!(HttpMethod::from_key("x-internal"), None);
    }

    #[test]
    fn test_path_item_skips_non_operation_keys() {
        let json = r#"{
            "parameters": [{"name": "shared", "in": "query"}],
            "post": {"operationId": "Order.new", "tags": ["Order"]},
            "x-vendor": {"anything": true},
            "get": {"operationId": "Order.getOrders", "tags": ["Order"]}
        }"#;
        let item: PathItem = serde_json::from_str(json).unwrap();
        let methods: Vec<_> = item.operations.keys().copied().collect();
        assert_eq!(methods, vec![HttpMethod::Post, HttpMethod::Get]);
    }

    #[test]
    fn test_path_item_rejects_methods_differing_by_case() {
        let json = r#"{
            "get": {"operationId": "Order.getOrders", "tags": ["Order"]},
            "GET": {"operationId": "Order.getAll", "tags": ["Order"]}
        }"#;
        let err = serde_json::from_str::<PathItem>(json).unwrap_err();
        assert!(err.to_string().contains("duplicate `GET` operation (key `GET`)"), "{err}");
    }

    #[test]
    fn test_label_falls_back_to_route() {
        let object = OperationObject {
            operation_id: None,
            summary: None,
            tags: vec![],
            parameters: vec![],
        };
        let op = Operation::new("/order", HttpMethod::Get, object);
        assert_eq!(op.label(), "GET /order");
        assert_eq!(op.summary, "");
    }
}
