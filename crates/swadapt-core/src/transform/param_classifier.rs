use crate::parse::parameter::Parameter;

/// An operation's parameters split by requiredness, each group in
/// declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterGroups<'a> {
    /// Required parameters, emitted as positional arguments.
    pub positional: Vec<&'a Parameter>,
    /// Optional parameters, emitted as keyword arguments defaulting to `None`.
    pub keyword: Vec<&'a Parameter>,
}

impl ParameterGroups<'_> {
    pub fn len(&self) -> usize {
        self.positional.len() + self.keyword.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keyword.is_empty()
    }
}

/// Partition parameters into required and optional groups.
pub fn classify(parameters: &[Parameter]) -> ParameterGroups<'_> {
    let (positional, keyword) = parameters.iter().partition(|p| p.required);
    ParameterGroups {
        positional,
        keyword,
    }
}
