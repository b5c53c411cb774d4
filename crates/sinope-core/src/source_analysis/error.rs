// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Error types for the Sinope parser.
//!
//! Errors carry source locations ([`Span`]) for precise diagnostics and
//! integrate with [`miette`] for rendering. The first failure aborts the
//! whole parse: there is no recovery and no multi-error accumulation.

use miette::Diagnostic;
use thiserror::Error;

use super::Span;

/// A parse error with its source location.
///
/// Produced by [`parse`](super::parse) on the first position where the
/// input cannot be matched.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{kind}")]
#[diagnostic()]
pub struct ParseError {
    /// The kind of error.
    #[source]
    pub kind: ParseErrorKind,
    /// The source location of the error.
    #[label("here")]
    pub span: Span,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Creates a "lexical mismatch" error: the input at `span` does not
    /// match the expected token's character class.
    #[must_use]
    pub fn lexical_mismatch(expected: TokenClass, span: Span) -> Self {
        Self::new(ParseErrorKind::LexicalMismatch { expected }, span)
    }

    /// Creates an "unterminated string" error.
    #[must_use]
    pub fn unterminated_string(span: Span) -> Self {
        Self::new(ParseErrorKind::UnterminatedString, span)
    }

    /// Creates an "unbalanced interpolation" error: an opened `$...$`
    /// segment has no matching close.
    #[must_use]
    pub fn unbalanced_interpolation(span: Span) -> Self {
        Self::new(ParseErrorKind::UnbalancedInterpolation, span)
    }

    /// Creates a syntax error carrying the token kinds that would have
    /// been accepted at `span`.
    #[must_use]
    pub fn syntax(expected: Vec<TokenClass>, span: Span) -> Self {
        Self::new(ParseErrorKind::SyntaxError { expected }, span)
    }

    /// Creates a "nesting too deep" error.
    #[must_use]
    pub fn nesting_too_deep(span: Span) -> Self {
        Self::new(ParseErrorKind::NestingTooDeep, span)
    }
}

/// The kind of parse error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// Input at a position does not match an expected token's character class.
    #[error("expected {expected}")]
    LexicalMismatch {
        /// The token class that was expected.
        expected: TokenClass,
    },

    /// A string literal has no closing `"` before end of input.
    #[error("unterminated string literal")]
    UnterminatedString,

    /// An opened `$...$` interpolation segment has no matching closing `$`.
    #[error("unbalanced string interpolation: `$` has no matching `$`")]
    UnbalancedInterpolation,

    /// A higher-level construct cannot be completed at the current position.
    #[error("syntax error: expected {}", list_of(.expected))]
    SyntaxError {
        /// The token kinds that would have been accepted.
        expected: Vec<TokenClass>,
    },

    /// Expression nesting exceeded the configured depth limit.
    #[error("expression nesting too deep")]
    NestingTooDeep,
}

/// A class of token named in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    /// An identifier.
    Identifier,
    /// An integer literal.
    IntegerLiteral,
    /// A string literal.
    StringLiteral,
    /// A symbol literal.
    SymbolLiteral,
    /// An expression operator.
    Operator,
    /// An assignment operator.
    AssignmentOperator,
    /// A keyword argument label (`identifier:`).
    ArgumentLabel,
    /// A statement terminator (`.` or newline).
    Terminator,
}

impl std::fmt::Display for TokenClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::Identifier => "an identifier",
            Self::IntegerLiteral => "an integer literal",
            Self::StringLiteral => "a string literal",
            Self::SymbolLiteral => "a symbol literal",
            Self::Operator => "an operator",
            Self::AssignmentOperator => "an assignment operator",
            Self::ArgumentLabel => "an argument label",
            Self::Terminator => "a terminator",
        };
        write!(f, "{text}")
    }
}

/// Joins token classes with "or" for error messages.
fn list_of(expected: &[TokenClass]) -> String {
    match expected {
        [] => "nothing".to_string(),
        [single] => single.to_string(),
        [init @ .., last] => {
            let init = init
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            format!("{init} or {last}")
        }
    }
}
