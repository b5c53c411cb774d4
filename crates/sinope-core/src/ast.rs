// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Syntax-tree definitions for Sinope.
//!
//! The tree represents the structure of a program after parsing, before any
//! name resolution or evaluation. Every node carries a [`Span`] for error
//! reporting; nodes are immutable once produced, owned by the caller of
//! [`parse`](crate::source_analysis::parse), and hold no parent references.
//!
//! # Shape
//!
//! ```text
//! StatementSequence
//!   └─ SubExpression            one or more elements joined by `=` `+=` …
//!        └─ CallExpression      operator expression + optional arguments
//!             ├─ Expression     message chain / unary / binary
//!             └─ ArgumentGroup  `to: 10 do: f`
//! ```
//!
//! A `SubExpression` with several elements is an *assignment span*: the
//! grammar recognizes the chain shape but deliberately does not decompose it
//! into target/value pairs — which operand is the assignment target is a
//! question for a later stage, so the whole span is kept flat.

use ecow::EcoString;

use crate::source_analysis::{Span, Token};

/// Top-level result of a parse: statements separated by terminators.
///
/// May be empty — an input consisting only of terminators (or nothing)
/// parses to a sequence with no statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementSequence {
    /// The statements in source order.
    pub statements: Vec<SubExpression>,
    /// Source location spanning the entire input.
    pub span: Span,
}

impl StatementSequence {
    /// Creates a new statement sequence.
    #[must_use]
    pub fn new(statements: Vec<SubExpression>, span: Span) -> Self {
        Self { statements, span }
    }

    /// Returns true if the sequence contains no statements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

/// One statement: call expressions joined by assignment operators into a
/// single flat span.
///
/// `elements.len() == operators.len() + 1` always holds. A single-element
/// span is an ordinary expression statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubExpression {
    /// The call expressions in the span, left to right.
    pub elements: Vec<CallExpression>,
    /// The assignment operator tokens between elements.
    pub operators: Vec<Token>,
    /// Source location of the whole span.
    pub span: Span,
}

impl SubExpression {
    /// Creates a new sub-expression span.
    #[must_use]
    pub fn new(elements: Vec<CallExpression>, operators: Vec<Token>, span: Span) -> Self {
        debug_assert_eq!(elements.len(), operators.len() + 1);
        Self {
            elements,
            operators,
            span,
        }
    }

    /// Returns true if this span contains assignment operators.
    #[must_use]
    pub fn is_assignment_span(&self) -> bool {
        !self.operators.is_empty()
    }
}

/// An operator expression with an optional trailing keyword-argument group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallExpression {
    /// The operator expression.
    pub expression: Expression,
    /// The trailing argument group, if present.
    pub arguments: Option<ArgumentGroup>,
    /// Source location including the arguments.
    pub span: Span,
}

/// A Sinope expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    /// A juxtaposed run of primaries with no operator between them.
    Chain(MessageChain),

    /// A prefix operator applied to an operand.
    Unary {
        /// The operator token.
        operator: Token,
        /// The operand.
        operand: Box<Expression>,
        /// Source location of the whole form.
        span: Span,
    },

    /// A binary operation built by the precedence tiers.
    Binary {
        /// The operator token.
        operator: Token,
        /// The left operand.
        left: Box<Expression>,
        /// The right operand.
        right: Box<Expression>,
        /// Source location of the whole form.
        span: Span,
    },
}

impl Expression {
    /// Returns the span of this expression.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Chain(chain) => chain.span,
            Self::Unary { span, .. } | Self::Binary { span, .. } => *span,
        }
    }
}

/// One or more juxtaposed primaries, composed left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageChain {
    /// The primaries, in source order. Never empty.
    pub messages: Vec<Primary>,
    /// Source location from first to last primary.
    pub span: Span,
}

impl MessageChain {
    /// Creates a new message chain.
    #[must_use]
    pub fn new(messages: Vec<Primary>, span: Span) -> Self {
        debug_assert!(!messages.is_empty());
        Self { messages, span }
    }

    /// Returns the number of primaries in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// A chain is never empty; provided for completeness.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// An atomic element of a message chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Primary {
    /// An identifier.
    Identifier(Identifier),
    /// An integer literal.
    Integer(IntegerLiteral),
    /// A string literal (simple or interpolated).
    String(StringLiteral),
    /// A symbol literal.
    Symbol(SymbolLiteral),
}

impl Primary {
    /// Returns the span of this primary.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Identifier(id) => id.span,
            Self::Integer(int) => int.span,
            Self::String(string) => string.span(),
            Self::Symbol(symbol) => symbol.span,
        }
    }
}

/// An identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    /// The name.
    pub name: EcoString,
    /// Source location.
    pub span: Span,
}

impl Identifier {
    /// Creates a new identifier.
    #[must_use]
    pub fn new(name: impl Into<EcoString>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// An integer literal, kept as written.
///
/// The digit string is uninterpreted: underscores are preserved exactly as
/// they appeared, including odd placements like `1_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IntegerLiteral {
    /// The digits and underscores as written.
    pub digits: EcoString,
    /// Source location.
    pub span: Span,
}

/// A symbol literal. The value excludes the leading `#`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolLiteral {
    /// The symbol content.
    pub value: EcoString,
    /// Source location including the `#`.
    pub span: Span,
}

/// A string literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StringLiteral {
    /// Plain text between two `"` with no interpolation.
    Simple {
        /// The text between the quotes.
        value: EcoString,
        /// Source location including the quotes.
        span: Span,
    },

    /// Alternating text segments and embedded expressions, each expression
    /// delimited on both sides by `$`.
    ///
    /// The literal always begins with `head` and ends with the final part's
    /// text; between any two expressions sits a (possibly empty) segment.
    Interpolated {
        /// The text from the opening `"` to the first `$`.
        head: TextSegment,
        /// The expression slots and their following text segments. Never
        /// empty.
        parts: Vec<InterpolationPart>,
        /// Source location including the quotes.
        span: Span,
    },
}

impl StringLiteral {
    /// Returns the span of this literal.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Simple { span, .. } | Self::Interpolated { span, .. } => *span,
        }
    }
}

/// Literal text bounded by quote or `$` delimiters within a string literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextSegment {
    /// The text content (delimiters excluded).
    pub text: EcoString,
    /// Source location of the content.
    pub span: Span,
}

/// One `$…$` slot of an interpolated string and the text that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpolationPart {
    /// The embedded expression, if the slot was not empty.
    pub expression: Option<Expression>,
    /// The text segment after the slot's closing `$`.
    pub text: TextSegment,
    /// Source location from the slot's opening `$` to the end of `text`.
    pub span: Span,
}

/// A keyword-argument group: `to: 10 do: f`.
///
/// Labels are not required to be unique; pairs are kept in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentGroup {
    /// The labeled arguments. Never empty.
    pub arguments: Vec<KeywordArgument>,
    /// Source location from first label to last value.
    pub span: Span,
}

impl ArgumentGroup {
    /// Creates a new argument group.
    #[must_use]
    pub fn new(arguments: Vec<KeywordArgument>, span: Span) -> Self {
        debug_assert!(!arguments.is_empty());
        Self { arguments, span }
    }

    /// Returns the number of labeled arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    /// A group is never empty; provided for completeness.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }
}

/// One `label: value` pair of an argument group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordArgument {
    /// The label identifier (the `:` is not part of the name).
    pub label: Identifier,
    /// The argument value.
    pub value: Expression,
    /// Source location from label to value.
    pub span: Span,
}
