use std::io::{self, Write};

use swadapt_core::parse::spec::Info;
use swadapt_core::transform::ResolvedOperation;
use swadapt_core::transform::name_resolver::snake_case;

use crate::writer::IndentWriter;

const QUOTES: &str = "\"\"\"";

/// Escape text for a regular (non-raw) Python docstring.
///
/// Backslashes are doubled first so that sequences like `\x` or `\N` stay
/// literal, then triple quotes are escaped so they cannot close the string.
pub fn escape_docstring(text: &str) -> String {
    text.replace('\\', "\\\\").replace(QUOTES, "\\\"\\\"\\\"")
}

/// Replace paragraph breaks with a single line break at `indent`, so that
/// multi-paragraph text stays inside the docstring's indentation.
pub fn reflow(text: &str, indent: &str) -> String {
    text.replace("\n\n", &format!("\n{indent}"))
}

fn write_docstring<W: Write>(w: &mut IndentWriter<W>, body: &str) -> io::Result<()> {
    w.writeln(QUOTES)?;
    w.writeln(body)?;
    w.writeln(QUOTES)
}

/// Module docstring: title, blank line, description.
pub fn write_file_doc<W: Write>(w: &mut IndentWriter<W>, info: &Info) -> io::Result<()> {
    let body = format!(
        "{}\n\n{}",
        escape_docstring(&info.title),
        escape_docstring(&info.description)
    );
    write_docstring(w, &body)
}

/// Method docstring: summary, blank line, then one `:param:` line per
/// parameter in declaration order.
pub fn write_operation_doc<W: Write>(
    w: &mut IndentWriter<W>,
    op: &ResolvedOperation<'_>,
) -> io::Result<()> {
    let indent = w.current_indent();
    w.writeln(QUOTES)?;
    w.writeln(&reflow(&escape_docstring(&op.operation.summary), &indent))?;
    w.newline()?;
    for param in &op.operation.parameters {
        let description = reflow(&escape_docstring(param.description()), &indent);
        w.writeln(&format!(":param {}: {}", snake_case(&param.name), description))?;
    }
    w.writeln(QUOTES)
}

#[cfg(test)]
mod tests {
    use swadapt_core::parse;
    use swadapt_core::transform::resolve_operation;

    use super::*;

    fn render(f: impl FnOnce(&mut IndentWriter<Vec<u8>>) -> io::Result<()>) -> String {
        let mut w = IndentWriter::new(Vec::new());
        f(&mut w).unwrap();
        let level = w.level();
        for _ in 0..level {
            w.revert_indent().unwrap();
        }
        String::from_utf8(w.finish().unwrap()).unwrap()
    }

    #[test]
    fn test_reflow() {
        assert_eq!(reflow("one\n\ntwo", "        "), "one\n        two");
        assert_eq!(reflow("one\ntwo", "    "), "one\ntwo");
        assert_eq!(reflow("a\n\nb\n\nc", ""), "a\nb\nc");
    }

    #[test]
    fn test_escape_docstring() {
        assert_eq!(escape_docstring(r#"say """hi""""#), r#"say \"\"\"hi\"\"\""#);
        assert_eq!(escape_docstring("plain"), "plain");
    }

    #[test]
    fn test_escape_docstring_backslashes() {
        assert_eq!(
            escape_docstring(r"Match \x or \N here"),
            r"Match \\x or \\N here"
        );
        assert_eq!(escape_docstring(r"C:\path\"), r"C:\\path\\");
        // Backslashes are doubled before quotes are escaped, never after.
        assert_eq!(escape_docstring(r#"\""""#), r#"\\\"\"\""#);
    }

    #[test]
    fn test_file_doc_keeps_paragraphs() {
        let info = Info {
            title: "Exchange API".to_string(),
            description: "First.\n\nSecond.".to_string(),
            version: None,
        };
        let out = render(|w| write_file_doc(w, &info));
        assert_eq!(out, "\"\"\"\nExchange API\n\nFirst.\n\nSecond.\n\"\"\"\n");
    }

    #[test]
    fn test_operation_doc_at_method_depth() {
        let doc = parse::from_json(
            r#"{
                "info": {"title": "X", "description": "Y"},
                "paths": {"/order": {"get": {
                    "operationId": "Order.getOrders",
                    "tags": ["Order"],
                    "summary": "Get your orders.",
                    "parameters": [
                        {"name": "symbol", "required": true, "description": "Symbol.\n\nOr a series."},
                        {"name": "startTime"}
                    ]
                }}}
            }"#,
        )
        .unwrap();
        let op = resolve_operation(doc.operations().next().unwrap()).unwrap();
        let out = render(|w| {
            w.indent()?;
            w.indent()?;
            write_operation_doc(w, &op)
        });
        let expected = concat!(
            "        \"\"\"\n",
            "        Get your orders.\n",
            "        \n",
            "        :param symbol: Symbol.\n",
            "        Or a series.\n",
            "        :param start_time: \n",
            "        \"\"\"\n",
            "        \n\n    \n\n",
        );
        assert_eq!(out, expected);
    }
}
