// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The execution host contract.
//!
//! The host receives raw source text from its transport (the REPL) and
//! returns a result string. Execution is a pluggable strategy behind the
//! [`Evaluator`] trait; the shipped [`EchoEvaluator`] is pass-through — it
//! strips trailing whitespace and returns the text unchanged. A richer
//! strategy (parsing and rendering the tree, or actual evaluation) can be
//! swapped in without touching the transport.

/// Greeting shown when an interactive session starts.
pub const BANNER: &str = "Simple Newbie Object-oriented Programming Environment";

/// The language name.
pub const LANGUAGE: &str = "sinope";

/// The language version.
pub const LANGUAGE_VERSION: &str = "0.1";

/// An execution strategy: source text in, result text out.
pub trait Evaluator {
    /// Executes one unit of input and returns its result as text.
    fn evaluate(&mut self, code: &str) -> String;
}

/// The pass-through strategy: echo the input with trailing whitespace
/// stripped.
#[derive(Debug, Default, Clone, Copy)]
pub struct EchoEvaluator;

impl Evaluator for EchoEvaluator {
    fn evaluate(&mut self, code: &str) -> String {
        code.trim_end().to_string()
    }
}

/// Represents a value as text. Identity semantics: the host displays
/// results exactly as the evaluator produced them.
pub fn repr<T: std::fmt::Display + ?Sized>(value: &T) -> String {
    value.to_string()
}
