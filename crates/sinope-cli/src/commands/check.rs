// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The `sinope check` command: parse source and print the syntax tree.
//!
//! Errors render through miette with the offending source attached, so the
//! failing position is shown in context.

use std::fmt::Write as _;
use std::io::Read as _;

use camino::Utf8Path;
use miette::{IntoDiagnostic, NamedSource, Result, WrapErr};
use tracing::debug;

use sinope_core::ast::{
    CallExpression, Expression, Primary, StatementSequence, StringLiteral, SubExpression,
};

/// Parses the given file (or stdin) and prints the tree.
pub fn check(path: Option<&Utf8Path>) -> Result<()> {
    let (name, source) = read_input(path)?;
    debug!(%name, bytes = source.len(), "parsing");

    match sinope_core::parse(&source) {
        Ok(program) => {
            print!("{}", render(&program));
            Ok(())
        }
        Err(error) => {
            Err(miette::Report::new(error).with_source_code(NamedSource::new(name, source)))
        }
    }
}

fn read_input(path: Option<&Utf8Path>) -> Result<(String, String)> {
    match path {
        Some(path) => {
            let source = std::fs::read_to_string(path)
                .into_diagnostic()
                .wrap_err_with(|| format!("failed to read {path}"))?;
            Ok((path.to_string(), source))
        }
        None => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .into_diagnostic()?;
            Ok(("<stdin>".to_string(), source))
        }
    }
}

/// Renders a parsed program as an indented tree.
fn render(program: &StatementSequence) -> String {
    let mut out = String::new();
    let count = program.statements.len();
    let plural = if count == 1 { "" } else { "s" };
    line(&mut out, 0, &format!("program — {count} statement{plural}"));
    for statement in &program.statements {
        render_statement(statement, &mut out);
    }
    out
}

fn render_statement(statement: &SubExpression, out: &mut String) {
    if statement.is_assignment_span() {
        let operators: Vec<&str> = statement
            .operators
            .iter()
            .filter_map(|op| op.kind().as_str())
            .collect();
        line(out, 1, &format!("assignment span ({})", operators.join(" ")));
        for element in &statement.elements {
            render_call(element, 2, out);
        }
    } else {
        render_call(&statement.elements[0], 1, out);
    }
}

fn render_call(call: &CallExpression, indent: usize, out: &mut String) {
    render_expression(&call.expression, indent, out);
    if let Some(group) = &call.arguments {
        line(out, indent, "arguments");
        for argument in &group.arguments {
            line(out, indent + 1, &format!("{}:", argument.label.name));
            render_expression(&argument.value, indent + 2, out);
        }
    }
}

fn render_expression(expression: &Expression, indent: usize, out: &mut String) {
    match expression {
        Expression::Chain(chain) => {
            line(out, indent, "chain");
            for primary in &chain.messages {
                render_primary(primary, indent + 1, out);
            }
        }
        Expression::Unary {
            operator, operand, ..
        } => {
            line(
                out,
                indent,
                &format!("unary {}", operator.kind().as_str().unwrap_or("?")),
            );
            render_expression(operand, indent + 1, out);
        }
        Expression::Binary {
            operator,
            left,
            right,
            ..
        } => {
            line(
                out,
                indent,
                &format!("binary {}", operator.kind().as_str().unwrap_or("?")),
            );
            render_expression(left, indent + 1, out);
            render_expression(right, indent + 1, out);
        }
    }
}

fn render_primary(primary: &Primary, indent: usize, out: &mut String) {
    match primary {
        Primary::Identifier(id) => line(out, indent, &format!("identifier {}", id.name)),
        Primary::Integer(int) => line(out, indent, &format!("integer {}", int.digits)),
        Primary::Symbol(symbol) => line(out, indent, &format!("symbol #{}", symbol.value)),
        Primary::String(StringLiteral::Simple { value, .. }) => {
            line(out, indent, &format!("string {value:?}"));
        }
        Primary::String(StringLiteral::Interpolated { head, parts, .. }) => {
            line(out, indent, "interpolated string");
            line(out, indent + 1, &format!("text {:?}", head.text.as_str()));
            for part in parts {
                if let Some(expression) = &part.expression {
                    render_expression(expression, indent + 1, out);
                }
                line(out, indent + 1, &format!("text {:?}", part.text.text.as_str()));
            }
        }
    }
}

fn line(out: &mut String, indent: usize, text: &str) {
    let _ = writeln!(out, "{:width$}{text}", "", width = indent * 2);
}
