use std::fs;
use std::io::Write;
use std::path::Path;

use heck::ToUpperCamelCase;
use indexmap::IndexMap;
use swadapt_core::config::SwadaptConfig;
use swadapt_core::error::NameError;
use swadapt_core::parse::{self, Format, spec::SpecDocument};
use swadapt_core::transform::name_resolver::snake_case;
use swadapt_core::transform::{self, ResolvedOperation};
use swadapt_core::{CodeGenerator, GeneratedFile, GeneratorError};

use crate::emitters::adapter::AdapterEmitter;

/// File name used when the adapter is returned as a `GeneratedFile`.
pub const ADAPTER_FILE_NAME: &str = "adapter.py";

/// Python client adapter generator.
pub struct PythonAdapterGenerator;

impl CodeGenerator for PythonAdapterGenerator {
    fn generate(
        &self,
        doc: &SpecDocument,
        config: &SwadaptConfig,
    ) -> Result<Vec<GeneratedFile>, GeneratorError> {
        Ok(vec![GeneratedFile {
            path: ADAPTER_FILE_NAME.to_string(),
            content: render_adapter(doc, config)?,
        }])
    }
}

/// The wrapper class name: configured, or `<Title>Adapter`.
pub fn class_name(doc: &SpecDocument, config: &SwadaptConfig) -> String {
    if let Some(name) = &config.class_name {
        return name.clone();
    }
    let name = format!("{}Adapter", doc.info.title.to_upper_camel_case());
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{name}")
    } else {
        name
    }
}

/// Write the adapter module for `doc` into `sink`.
///
/// Every operation and parameter name is resolved before the first byte is
/// written, so an invalid operationId or parameter name leaves `sink`
/// untouched.
pub fn emit_adapter<W: Write>(
    doc: &SpecDocument,
    config: &SwadaptConfig,
    sink: W,
) -> Result<W, GeneratorError> {
    let operations = transform::resolve_all(doc)?;
    check_parameter_names(&operations)?;
    warn_duplicate_names(&operations);

    let mut emitter = AdapterEmitter::new(sink, config);
    emitter.emit_header(&doc.info)?;
    emitter.open_class(&class_name(doc, config))?;
    for op in &operations {
        log::debug!(
            "{} {} ({}) -> {}",
            op.operation.method,
            op.operation.path,
            op.operation_id,
            op.name
        );
        emitter.emit_operation(op)?;
    }
    emitter.close_class()?;
    Ok(emitter.finish()?)
}

/// Render the adapter module to a string.
pub fn render_adapter(doc: &SpecDocument, config: &SwadaptConfig) -> Result<String, GeneratorError> {
    let bytes = emit_adapter(doc, config, Vec::new())?;
    String::from_utf8(bytes)
        .map_err(|e| GeneratorError::Other(format!("generated output is not UTF-8: {e}")))
}

/// Load `source`, generate the adapter and write it to `output`.
///
/// The output file is only created once generation has succeeded. Returns
/// the number of generated methods.
pub fn generate_file(
    source: &Path,
    output: &Path,
    config: &SwadaptConfig,
) -> Result<usize, GeneratorError> {
    let bytes = fs::read(source).map_err(|e| GeneratorError::Read {
        path: source.to_path_buf(),
        source: e,
    })?;
    let doc = parse::load(&bytes, Format::from_path(source))?;
    let content = render_adapter(&doc, config)?;
    fs::write(output, content)?;
    Ok(doc.operation_count())
}

const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

/// Why `name` cannot be spelled as a Python identifier, if it cannot.
fn identifier_problem(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();
    match chars.next() {
        None => return Some("name is empty"),
        Some(c) if !(c.is_ascii_alphabetic() || c == '_') => {
            return Some("must start with a letter or underscore");
        }
        _ => {}
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Some("may only contain letters, digits and underscores");
    }
    if PYTHON_KEYWORDS.contains(&name) {
        return Some("is a Python keyword");
    }
    None
}

/// Each parameter appears both as a keyword argument under its declared
/// name and as an argument under its snake-cased name, so both must be
/// valid Python identifiers.
pub fn check_parameter_names(operations: &[ResolvedOperation<'_>]) -> Result<(), NameError> {
    for op in operations {
        for param in &op.operation.parameters {
            let snake = snake_case(&param.name);
            let problem = identifier_problem(&param.name)
                .map(|reason| format!("declared name {reason}"))
                .or_else(|| {
                    identifier_problem(&snake)
                        .map(|reason| format!("argument name `{snake}` {reason}"))
                });
            if let Some(reason) = problem {
                return Err(NameError::InvalidParameterName {
                    operation_id: op.operation_id.to_string(),
                    name: param.name.clone(),
                    reason,
                });
            }
        }
    }
    Ok(())
}

/// Python keeps the last definition of a repeated method name.
fn warn_duplicate_names(operations: &[ResolvedOperation<'_>]) {
    let mut seen: IndexMap<&str, &str> = IndexMap::new();
    for op in operations {
        if let Some(first) = seen.insert(op.name.as_str(), op.operation_id) {
            log::warn!(
                "`{}` and `{}` both resolve to `{}`; the later definition shadows the earlier one",
                first,
                op.operation_id,
                op.name
            );
        }
    }
}
