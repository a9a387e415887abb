use std::sync::LazyLock;

use regex::Regex;

use crate::error::NameError;

/// One identifier word: a capitalized or lowercase run, or an acronym run.
static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z]?[a-z0-9]+|[A-Z0-9]+").expect("word pattern is valid"));

static CAPITALIZED_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(.)([A-Z][a-z]+)").expect("word boundary pattern is valid"));

static LOWER_UPPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("case boundary pattern is valid"));

/// Split a camelCase or PascalCase identifier into words.
///
/// Acronym runs stay whole: `getL2` → `["get", "L2"]`,
/// `historyUSD` → `["history", "USD"]`. Characters outside `[A-Za-z0-9]`
/// separate words and are dropped.
pub fn tokenize(identifier: &str) -> Vec<&str> {
    WORD.find_iter(identifier).map(|m| m.as_str()).collect()
}

/// Convert an identifier to snake_case.
///
/// A capitalized word preceded by anything gets an underscore in front of
/// it, then every lowercase/digit → uppercase boundary gets one, then the
/// result is lowercased. `apiKeyID` → `api_key_id`, `getOrderBookL2` →
/// `get_order_book_l2`.
pub fn snake_case(identifier: &str) -> String {
    let words = CAPITALIZED_WORD.replace_all(identifier, "${1}_${2}");
    LOWER_UPPER.replace_all(&words, "${1}_${2}").to_lowercase()
}

/// Split `Tag.methodName` into its two halves.
pub fn split_operation_id(operation_id: &str) -> Result<(&str, &str), NameError> {
    let mut parts = operation_id.split('.');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(tag), Some(method), None) if !tag.is_empty() && !method.is_empty() => {
            Ok((tag, method))
        }
        _ => Err(NameError::invalid(
            operation_id,
            "expected exactly one `.` separating tag and method name",
        )),
    }
}

/// Resolve the generated method name for an operationId.
///
/// Tags are spliced in after the leading verb so that operations sharing a
/// bare verb under different tags stay distinct (`Announcement.get` →
/// `get_announcement`). When the second word already names the tag, or the
/// tag with a plain `s` suffix, the method name is used as is
/// (`Order.getOrders` → `get_orders`).
pub fn resolve_name(operation_id: &str) -> Result<String, NameError> {
    let (tag, method) = split_operation_id(operation_id)?;
    let words = tokenize(method);
    let Some((first, rest)) = words.split_first() else {
        return Err(NameError::invalid(
            operation_id,
            "method name contains no identifier characters",
        ));
    };

    let echoes_tag = rest
        .first()
        .is_some_and(|second| *second == tag || second.strip_suffix('s') == Some(tag));

    let joined = if echoes_tag {
        words.concat()
    } else {
        let mut joined = String::with_capacity(method.len() + tag.len());
        joined.push_str(first);
        joined.push_str(tag);
        for word in rest {
            joined.push_str(word);
        }
        joined
    };

    Ok(snake_case(&joined))
}
