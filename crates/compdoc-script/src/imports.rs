//! ES import lowering.
//!
//! Inline scripts run inside a function body, where `import` is a syntax error.
//! Each top-level import declaration is rewritten in place to `require` calls,
//! the same shape a CommonJS module transform produces:
//!
//! ```text
//! import Next, { Button as Btn } from '@alifd/next';
//! ```
//!
//! becomes
//!
//! ```text
//! var _import0 = require("@alifd/next"); var Next = _import0 && _import0.__esModule ? _import0["default"] : _import0; var Btn = _import0["Button"];
//! ```

use oxc_allocator::Allocator;
use oxc_ast::ast::{ImportDeclaration, ImportDeclarationSpecifier, Statement};
use oxc_parser::Parser;
use oxc_span::SourceType;

use crate::traits::TranspileError;

/// Rewrite every top-level import declaration in `source` to `require` bindings.
///
/// Everything outside the import declarations is kept byte for byte.
pub fn lower_imports(source: &str) -> Result<String, TranspileError> {
    let allocator = Allocator::default();
    let parsed = Parser::new(&allocator, source, SourceType::jsx()).parse();
    if parsed.panicked || !parsed.errors.is_empty() {
        return Err(TranspileError::parse(parsed.errors));
    }

    let mut names = BindingNames::new(source);
    let mut output = String::with_capacity(source.len());
    let mut cursor = 0;

    for stmt in &parsed.program.body {
        let Statement::ImportDeclaration(decl) = stmt else {
            continue;
        };
        let start = decl.span.start as usize;
        let end = decl.span.end as usize;

        output.push_str(&source[cursor..start]);
        output.push_str(&lower_declaration(decl, &mut names));
        cursor = end;
    }

    output.push_str(&source[cursor..]);
    Ok(output)
}

fn lower_declaration(decl: &ImportDeclaration, names: &mut BindingNames) -> String {
    let module = js_string(decl.source.value.as_str());

    let specifiers = match &decl.specifiers {
        Some(specifiers) if !specifiers.is_empty() => specifiers,
        _ => return format!("require({});", module),
    };

    if let [ImportDeclarationSpecifier::ImportNamespaceSpecifier(ns)] = &specifiers[..] {
        return format!("var {} = require({});", ns.local.name, module);
    }

    let binding = names.fresh();
    let mut lowered = format!("var {} = require({});", binding, module);

    for specifier in specifiers.iter() {
        let line = match specifier {
            ImportDeclarationSpecifier::ImportSpecifier(s) => format!(
                " var {} = {}[{}];",
                s.local.name,
                binding,
                js_string(s.imported.name().as_str())
            ),
            ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => format!(
                " var {local} = {b} && {b}.__esModule ? {b}[\"default\"] : {b};",
                local = s.local.name,
                b = binding
            ),
            ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => {
                format!(" var {} = {};", s.local.name, binding)
            }
        };
        lowered.push_str(&line);
    }

    lowered
}

/// Quote a string as a JavaScript string literal.
fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

/// Generates `_importN` identifiers that do not already occur in the source.
struct BindingNames<'a> {
    source: &'a str,
    next: usize,
}

impl<'a> BindingNames<'a> {
    fn new(source: &'a str) -> Self {
        Self { source, next: 0 }
    }

    fn fresh(&mut self) -> String {
        loop {
            let name = format!("_import{}", self.next);
            self.next += 1;
            if !self.source.contains(&name) {
                return name;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lowers_named_imports() {
        let out = lower_imports("import { Button, Icon as I } from '@alifd/next';\nrender();\n")
            .unwrap();

        assert_eq!(
            out,
            "var _import0 = require(\"@alifd/next\"); var Button = _import0[\"Button\"]; var I = _import0[\"Icon\"];\nrender();\n"
        );
    }

    #[test]
    fn lowers_default_and_named_together() {
        let out = lower_imports("import React, { Component } from 'react';").unwrap();

        assert!(out.starts_with("var _import0 = require(\"react\");"));
        assert!(out.contains(
            "var React = _import0 && _import0.__esModule ? _import0[\"default\"] : _import0;"
        ));
        assert!(out.contains("var Component = _import0[\"Component\"];"));
    }

    #[test]
    fn lowers_namespace_and_bare_imports() {
        let out = lower_imports("import * as moment from 'moment';\nimport './style.css';\n")
            .unwrap();

        assert_eq!(
            out,
            "var moment = require(\"moment\");\nrequire(\"./style.css\");\n"
        );
    }

    #[test]
    fn keeps_source_without_imports() {
        let source = "const a = <div>{1}</div>;\n";

        assert_eq!(lower_imports(source).unwrap(), source);
    }

    #[test]
    fn avoids_existing_binding_names() {
        let out = lower_imports("import { a } from 'm';\nconst _import0 = 1;\n").unwrap();

        assert!(out.starts_with("var _import1 = require(\"m\");"));
    }

    #[test]
    fn reports_syntax_errors() {
        assert!(matches!(
            lower_imports("import {"),
            Err(TranspileError::ParseError(_))
        ));
    }
}
