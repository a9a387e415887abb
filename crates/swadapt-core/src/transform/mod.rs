pub mod name_resolver;
pub mod param_classifier;

use crate::error::NameError;
use crate::parse::operation::Operation;
use crate::parse::spec::SpecDocument;

use name_resolver::{resolve_name, split_operation_id};
use param_classifier::{ParameterGroups, classify};

/// An operation with everything needed to emit its wrapper method.
#[derive(Debug, Clone)]
pub struct ResolvedOperation<'a> {
    pub operation: &'a Operation,
    /// The full `Tag.methodName` identifier.
    pub operation_id: &'a str,
    /// Generated method name.
    pub name: String,
    /// Transport namespace the call is dispatched through (`tags[0]`).
    pub tag: &'a str,
    /// The method half of the operationId, as the transport names it.
    pub method_name: &'a str,
    pub groups: ParameterGroups<'a>,
}

/// Resolve the name and parameter groups of one operation.
pub fn resolve_operation(operation: &Operation) -> Result<ResolvedOperation<'_>, NameError> {
    let Some(operation_id) = operation.operation_id.as_deref() else {
        return Err(NameError::invalid(&operation.label(), "operation has no operationId"));
    };
    let Some(tag) = operation.tags.first() else {
        return Err(NameError::invalid(operation_id, "operation has no tags"));
    };
    let (_, method_name) = split_operation_id(operation_id)?;
    let name = resolve_name(operation_id)?;

    Ok(ResolvedOperation {
        operation,
        operation_id,
        name,
        tag: tag.as_str(),
        method_name,
        groups: classify(&operation.parameters),
    })
}

/// Resolve every operation in document order, failing on the first invalid
/// operationId.
pub fn resolve_all(doc: &SpecDocument) -> Result<Vec<ResolvedOperation<'_>>, NameError> {
    doc.operations().map(resolve_operation).collect()
}
