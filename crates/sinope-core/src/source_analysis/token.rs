// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Token types produced by the lexical primitives.
//!
//! Each token pairs a [`TokenKind`] with the [`Span`] of the matched text.
//! String payloads use [`EcoString`] so tokens are cheap to clone.
//!
//! String literals do not appear here: because they can embed full
//! expressions, they are produced directly as syntax-tree nodes by the
//! string-literal grammar rather than as flat tokens.

use ecow::EcoString;

use super::{Position, Span};

/// The kind of token, not including source location.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// An identifier: `foo`, `empty?`, `do!`, `_tmp`
    Identifier(EcoString),

    /// An integer literal: `42`, `1_000` (underscore placement is not
    /// validated; `1_` and `1__2` are accepted as written)
    Integer(EcoString),

    /// A symbol literal: `#foo`, `#foo.bar`, `#at:put:` — the value
    /// excludes the leading `#`
    Symbol(EcoString),

    /// An expression operator, including the decorated multi-character
    /// spellings: `+`, `**`, `(<=)`, `[^]`
    Operator(EcoString),

    /// An assignment operator: `=`, `+=`, `-=`, `*=`, `/=`, `%=`
    Assign(EcoString),

    /// The `:` delimiter that closes an argument label
    Colon,

    /// A statement terminator: `.` or a run of newline characters
    Terminator,
}

impl TokenKind {
    /// Returns the string content if this token carries one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Identifier(s)
            | Self::Integer(s)
            | Self::Symbol(s)
            | Self::Operator(s)
            | Self::Assign(s) => Some(s),
            Self::Colon | Self::Terminator => None,
        }
    }

    /// Returns `true` if this token is an identifier.
    #[must_use]
    pub const fn is_identifier(&self) -> bool {
        matches!(self, Self::Identifier(_))
    }

    /// Returns `true` if this token is an expression operator.
    #[must_use]
    pub const fn is_operator(&self) -> bool {
        matches!(self, Self::Operator(_))
    }

    /// Returns `true` if this token is an assignment operator.
    #[must_use]
    pub const fn is_assign(&self) -> bool {
        matches!(self, Self::Assign(_))
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identifier(s) | Self::Integer(s) | Self::Operator(s) | Self::Assign(s) => {
                write!(f, "{s}")
            }
            Self::Symbol(s) => write!(f, "#{s}"),
            Self::Colon => write!(f, ":"),
            Self::Terminator => write!(f, "<terminator>"),
        }
    }
}

/// A token with its source location.
///
/// # Examples
///
/// ```
/// use sinope_core::source_analysis::{Span, Token, TokenKind};
///
/// let token = Token::new(TokenKind::Identifier("foo".into()), Span::new(0, 3));
/// assert!(token.kind().is_identifier());
/// assert_eq!(token.span().len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns the kind of this token.
    #[must_use]
    pub fn kind(&self) -> &TokenKind {
        &self.kind
    }

    /// Consumes the token and returns its kind.
    #[must_use]
    pub fn into_kind(self) -> TokenKind {
        self.kind
    }

    /// Returns the source span of this token.
    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }

    /// Returns the line/column position of this token's start, given the
    /// source text it was produced from.
    #[must_use]
    pub fn position(&self, source: &str) -> Option<Position> {
        Position::from_byte_offset(source, self.span.start())
    }
}
