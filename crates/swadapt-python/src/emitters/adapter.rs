use std::io::{self, Write};

use swadapt_core::config::{CallStyle, SwadaptConfig};
use swadapt_core::parse::spec::Info;
use swadapt_core::transform::ResolvedOperation;
use swadapt_core::transform::name_resolver::snake_case;

use super::docs::{write_file_doc, write_operation_doc};
use crate::writer::IndentWriter;

/// Emission progress. Operations may only be emitted while the class is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    HeaderEmitted,
    ClassOpened,
    OperationEmitted,
    ClassClosed,
    Flushed,
}

/// Writes the adapter module section by section.
pub struct AdapterEmitter<'c, W: Write> {
    writer: IndentWriter<W>,
    config: &'c SwadaptConfig,
    stage: Stage,
}

impl<'c, W: Write> AdapterEmitter<'c, W> {
    pub fn new(sink: W, config: &'c SwadaptConfig) -> Self {
        Self {
            writer: IndentWriter::new(sink),
            config,
            stage: Stage::Start,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn level(&self) -> usize {
        self.writer.level()
    }

    fn advance(&mut self, allowed: &[Stage], next: Stage) {
        debug_assert!(
            allowed.contains(&self.stage),
            "cannot move to {next:?} from {:?}",
            self.stage
        );
        self.stage = next;
    }

    /// Module docstring and the error helper import.
    pub fn emit_header(&mut self, info: &Info) -> io::Result<()> {
        self.advance(&[Stage::Start], Stage::HeaderEmitted);
        let w = &mut self.writer;
        write_file_doc(w, info)?;
        w.newline()?;
        if let Some(helper) = &self.config.error_helper {
            w.writeln(&format!("from {} import {}", helper.module, helper.name))?;
            w.newline()?;
        }
        w.newline()
    }

    /// Class statement and the constructor storing the transport.
    pub fn open_class(&mut self, class_name: &str) -> io::Result<()> {
        self.advance(&[Stage::HeaderEmitted], Stage::ClassOpened);
        let transport = &self.config.transport;
        let w = &mut self.writer;
        w.write(&format!("class {class_name}:\n"))?;
        w.newline()?;
        w.indent()?;
        write_signature(w, "__init__", &[transport.clone()], &[])?;
        w.indent()?;
        w.write(&format!("self.{transport} = {transport}"))?;
        w.revert_indent()
    }

    /// One wrapper method delegating to the transport.
    pub fn emit_operation(&mut self, op: &ResolvedOperation<'_>) -> io::Result<()> {
        self.advance(
            &[Stage::ClassOpened, Stage::OperationEmitted],
            Stage::OperationEmitted,
        );
        let w = &mut self.writer;
        if let Some(helper) = &self.config.error_helper {
            w.writeln(&format!("@{}", helper.name))?;
        }

        let positional: Vec<String> = op
            .groups
            .positional
            .iter()
            .map(|p| snake_case(&p.name))
            .collect();
        let keyword: Vec<String> = op
            .groups
            .keyword
            .iter()
            .map(|p| snake_case(&p.name))
            .collect();
        write_signature(w, &op.name, &positional, &keyword)?;

        w.indent()?;
        if self.config.docstrings {
            write_operation_doc(w, op)?;
        }
        w.write(&delegating_call(op, self.config))?;
        w.revert_indent()
    }

    pub fn close_class(&mut self) -> io::Result<()> {
        self.advance(
            &[Stage::ClassOpened, Stage::OperationEmitted],
            Stage::ClassClosed,
        );
        self.writer.revert_indent()
    }

    /// Flush the output and return the sink.
    pub fn finish(mut self) -> io::Result<W> {
        self.advance(&[Stage::ClassClosed], Stage::Flushed);
        self.writer.finish()
    }
}

/// `def name(self, a, b, c=None):` followed by a newline.
fn write_signature<W: Write>(
    w: &mut IndentWriter<W>,
    name: &str,
    positional: &[String],
    keyword: &[String],
) -> io::Result<()> {
    let mut line = format!("def {name}(self");
    for arg in positional {
        line.push_str(", ");
        line.push_str(arg);
    }
    for arg in keyword {
        line.push_str(", ");
        line.push_str(arg);
        line.push_str("=None");
    }
    line.push_str("):");
    w.write(&line)?;
    w.newline()
}

/// `return self.client.Tag.call(origName=local, ...).result()`
fn delegating_call(op: &ResolvedOperation<'_>, config: &SwadaptConfig) -> String {
    let call = match config.call_style {
        CallStyle::MethodName => op.method_name.to_string(),
        CallStyle::OperationId => op.operation_id.replace('.', "_"),
    };
    let args: Vec<String> = op
        .operation
        .parameters
        .iter()
        .map(|p| format!("{}={}", p.name, snake_case(&p.name)))
        .collect();
    format!(
        "return self.{}.{}.{}({}).result()",
        config.transport,
        op.tag,
        call,
        args.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use swadapt_core::parse;
    use swadapt_core::transform::resolve_all;

    use super::*;

    const DOC: &str = r#"{
        "info": {"title": "X", "description": "Y"},
        "paths": {
            "/order": {
                "get": {"operationId": "Order.getOrders", "tags": ["Order"], "summary": "s",
                        "parameters": [{"name": "symbol"}, {"name": "orderID", "required": true}]},
                "delete": {"operationId": "Order.cancel", "tags": ["Order"], "summary": "c"}
            }
        }
    }"#;

    #[test]
    fn test_level_stays_inside_class_until_close() {
        let doc = parse::from_json(DOC).unwrap();
        let ops = resolve_all(&doc).unwrap();
        let config = SwadaptConfig::default();
        let mut emitter = AdapterEmitter::new(Vec::new(), &config);

        assert_eq!(emitter.level(), 0);
        emitter.emit_header(&doc.info).unwrap();
        assert_eq!(emitter.level(), 0);
        emitter.open_class("XAdapter").unwrap();
        assert_eq!(emitter.level(), 1);
        for op in &ops {
            emitter.emit_operation(op).unwrap();
            assert_eq!(emitter.level(), 1);
            assert_eq!(emitter.stage(), Stage::OperationEmitted);
        }
        emitter.close_class().unwrap();
        assert_eq!(emitter.level(), 0);
        assert_eq!(emitter.stage(), Stage::ClassClosed);
        emitter.finish().unwrap();
    }

    #[test]
    fn test_empty_class_balances() {
        let doc = parse::from_json(r#"{"info": {"title": "X", "description": "Y"}, "paths": {}}"#)
            .unwrap();
        let config = SwadaptConfig::default();
        let mut emitter = AdapterEmitter::new(Vec::new(), &config);
        emitter.emit_header(&doc.info).unwrap();
        emitter.open_class("XAdapter").unwrap();
        emitter.close_class().unwrap();
        let out = String::from_utf8(emitter.finish().unwrap()).unwrap();
        assert!(out.ends_with("        self.client = client\n\n    \n\n"));
    }

    #[test]
    fn test_signature_orders_positional_first() {
        let doc = parse::from_json(DOC).unwrap();
        let ops = resolve_all(&doc).unwrap();
        let config = SwadaptConfig::default();
        let mut w = IndentWriter::new(Vec::new());
        let positional: Vec<String> = ops[0]
            .groups
            .positional
            .iter()
            .map(|p| snake_case(&p.name))
            .collect();
        let keyword: Vec<String> = ops[0]
            .groups
            .keyword
            .iter()
            .map(|p| snake_case(&p.name))
            .collect();
        write_signature(&mut w, &ops[0].name, &positional, &keyword).unwrap();
        let out = String::from_utf8(w.finish().unwrap()).unwrap();
        assert_eq!(out, "def get_orders(self, order_id, symbol=None):\n");
        assert_eq!(
            delegating_call(&ops[0], &config),
            "return self.client.Order.getOrders(symbol=symbol, orderID=order_id).result()"
        );
    }

    #[test]
    fn test_call_styles() {
        let doc = parse::from_json(DOC).unwrap();
        let ops = resolve_all(&doc).unwrap();
        let config = SwadaptConfig {
            call_style: CallStyle::OperationId,
            transport: "raw".to_string(),
            ..SwadaptConfig::default()
        };
        assert_eq!(
            delegating_call(&ops[1], &config),
            "return self.raw.Order.Order_cancel().result()"
        );
    }

    #[test]
    fn test_header_without_helper() {
        let doc = parse::from_json(DOC).unwrap();
        let config = SwadaptConfig {
            error_helper: None,
            ..SwadaptConfig::default()
        };
        let mut emitter = AdapterEmitter::new(Vec::new(), &config);
        emitter.emit_header(&doc.info).unwrap();
        emitter.open_class("XAdapter").unwrap();
        emitter.close_class().unwrap();
        let out = String::from_utf8(emitter.finish().unwrap()).unwrap();
        assert!(out.starts_with("\"\"\"\nX\n\nY\n\"\"\"\n\n\nclass XAdapter:\n"));
        assert!(!out.contains("import"));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "cannot move to OperationEmitted from HeaderEmitted")]
    fn test_operation_before_class_panics() {
        let doc = parse::from_json(DOC).unwrap();
        let ops = resolve_all(&doc).unwrap();
        let config = SwadaptConfig::default();
        let mut emitter = AdapterEmitter::new(Vec::new(), &config);
        emitter.emit_header(&doc.info).unwrap();
        let _ = emitter.emit_operation(&ops[0]);
    }
}
